//! Typed calls to the GestioStock REST endpoints

use crate::error::ClientResult;
use crate::http::Backend;
use chrono::NaiveDate;
use shared::models::{
    ClientRecord, Product, PurchaseOrder, PurchaseOrderCreate, PurchaseOrderStatus, Sale,
    SaleCreate, SaleStatus, Supplier,
};

/// Filters for `GET /api/ventes`
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub client_id: Option<i64>,
    pub status: Option<SaleStatus>,
}

impl SaleFilter {
    fn query(&self) -> String {
        let mut params = Vec::new();
        if let Some(d) = self.date_from {
            params.push(format!("date_debut={d}"));
        }
        if let Some(d) = self.date_to {
            params.push(format!("date_fin={d}"));
        }
        if let Some(id) = self.client_id {
            params.push(format!("client_id={id}"));
        }
        if let Some(wire) = self.status.and_then(|s| s.as_wire()) {
            params.push(format!("statut={wire}"));
        }
        params.join("&")
    }
}

/// Filters for `GET /api/commandes`
#[derive(Debug, Clone, Default)]
pub struct PurchaseOrderFilter {
    pub supplier_id: Option<i64>,
    pub status: Option<PurchaseOrderStatus>,
}

impl PurchaseOrderFilter {
    fn query(&self) -> String {
        let mut params = Vec::new();
        if let Some(id) = self.supplier_id {
            params.push(format!("fournisseur_id={id}"));
        }
        if let Some(wire) = self.status.and_then(|s| s.as_wire()) {
            params.push(format!("statut={wire}"));
        }
        params.join("&")
    }
}

fn with_query(path: &str, query: String) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Typed API surface over a [`Backend`]
#[derive(Debug, Clone)]
pub struct GestioApi<B> {
    backend: B,
}

impl<B: Backend> GestioApi<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ==================== Catalog ====================

    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.backend.get("api/produits").await
    }

    pub async fn list_clients(&self) -> ClientResult<Vec<ClientRecord>> {
        self.backend.get("api/clients").await
    }

    pub async fn list_suppliers(&self) -> ClientResult<Vec<Supplier>> {
        self.backend.get("api/fournisseurs").await
    }

    // ==================== Sales ====================

    pub async fn list_sales(&self, filter: &SaleFilter) -> ClientResult<Vec<Sale>> {
        self.backend
            .get(&with_query("api/ventes", filter.query()))
            .await
    }

    pub async fn create_sale(&self, payload: &SaleCreate) -> ClientResult<Sale> {
        self.backend.post("api/ventes", payload).await
    }

    /// `PUT /api/ventes/{id}/annuler` - cancel a confirmed sale
    pub async fn cancel_sale(&self, id: i64) -> ClientResult<Sale> {
        self.backend
            .put_empty(&format!("api/ventes/{id}/annuler"))
            .await
    }

    // ==================== Purchase orders ====================

    pub async fn list_purchase_orders(
        &self,
        filter: &PurchaseOrderFilter,
    ) -> ClientResult<Vec<PurchaseOrder>> {
        self.backend
            .get(&with_query("api/commandes", filter.query()))
            .await
    }

    pub async fn create_purchase_order(
        &self,
        payload: &PurchaseOrderCreate,
    ) -> ClientResult<PurchaseOrder> {
        self.backend.post("api/commandes", payload).await
    }

    /// `PUT /api/commandes/{id}/annuler` - cancel a pending order
    pub async fn cancel_purchase_order(&self, id: i64) -> ClientResult<PurchaseOrder> {
        self.backend
            .put_empty(&format!("api/commandes/{id}/annuler"))
            .await
    }

    /// `POST /api/commandes/{id}/recevoir` - mark an order received,
    /// which moves its quantities into stock on the server side
    pub async fn receive_purchase_order(&self, id: i64) -> ClientResult<PurchaseOrder> {
        self.backend
            .post_empty(&format!("api/commandes/{id}/recevoir"))
            .await
    }
}
