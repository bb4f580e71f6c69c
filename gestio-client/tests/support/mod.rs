//! In-memory backend for pipeline tests
#![allow(dead_code)]

use async_trait::async_trait;
use gestio_client::error::{ClientError, ClientResult};
use gestio_client::http::Backend;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned-response backend recording every request it sees
#[derive(Default)]
pub struct MockBackend {
    gets: Mutex<HashMap<String, Value>>,
    failing_gets: Mutex<HashMap<String, (u16, String)>>,
    post_responses: Mutex<HashMap<String, Result<Value, (u16, String)>>>,
    posts: Mutex<Vec<(String, Value)>>,
    get_count: AtomicUsize,
    post_delay: Mutex<Option<Duration>>,
    post_times_out: Mutex<bool>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_get(&self, path: &str, value: Value) {
        self.failing_gets.lock().unwrap().remove(path);
        self.gets.lock().unwrap().insert(path.to_string(), value);
    }

    pub fn fail_get(&self, path: &str, status: u16, message: &str) {
        self.failing_gets
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, message.to_string()));
    }

    pub fn set_post(&self, path: &str, value: Value) {
        self.post_responses
            .lock()
            .unwrap()
            .insert(path.to_string(), Ok(value));
    }

    pub fn fail_post(&self, path: &str, status: u16, message: &str) {
        self.post_responses
            .lock()
            .unwrap()
            .insert(path.to_string(), Err((status, message.to_string())));
    }

    pub fn delay_posts(&self, delay: Duration) {
        *self.post_delay.lock().unwrap() = Some(delay);
    }

    pub fn time_out_posts(&self) {
        *self.post_times_out.lock().unwrap() = true;
    }

    pub fn get_count(&self) -> usize {
        self.get_count.load(Ordering::SeqCst)
    }

    /// Recorded (path, body) pairs for POST and PUT requests
    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }

    /// Seed the three catalog routes in one call
    pub fn seed_catalog(&self, products: Value, clients: Value, suppliers: Value) {
        self.set_get("api/produits", products);
        self.set_get("api/clients", clients);
        self.set_get("api/fournisseurs", suppliers);
    }

    async fn dispatch_write<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> ClientResult<T> {
        let delay = *self.post_delay.lock().unwrap();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }
        if *self.post_times_out.lock().unwrap() {
            return Err(ClientError::Timeout);
        }
        self.posts.lock().unwrap().push((path.to_string(), body));
        let response = self.post_responses.lock().unwrap().get(path).cloned();
        match response {
            Some(Ok(value)) => Ok(serde_json::from_value(value)?),
            Some(Err((status, message))) => Err(ClientError::Api { status, message }),
            None => Err(ClientError::Api {
                status: 404,
                message: format!("no mock route for {path}"),
            }),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.get_count.fetch_add(1, Ordering::SeqCst);
        if let Some((status, message)) = self.failing_gets.lock().unwrap().get(path).cloned() {
            return Err(ClientError::Api { status, message });
        }
        let value = self
            .gets
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| ClientError::Api {
                status: 404,
                message: format!("no mock route for {path}"),
            })?;
        Ok(serde_json::from_value(value)?)
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.dispatch_write(path, body).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.dispatch_write(path, Value::Null).await
    }

    async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.dispatch_write(path, Value::Null).await
    }
}

/// Product JSON in the backend's wire shape
pub fn product_json(id: i64, name: &str, sale_price: f64, stock: i32) -> Value {
    json!({
        "id": id,
        "nom": name,
        "prix_achat": sale_price * 0.8,
        "prix_vente": sale_price,
        "stock_actuel": stock,
        "actif": true
    })
}
