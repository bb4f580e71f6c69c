//! Remote catalog cache
//!
//! Holds the last-fetched products/clients/suppliers snapshot. A reload
//! buffers all three fetches off to the side and commits them as one unit,
//! so readers never observe a half-updated snapshot; on any failure the
//! previous snapshot stays in place.

use crate::api::GestioApi;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::Backend;
use shared::models::{ClientRecord, Product, Supplier};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Entity type a reload can fail on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntity {
    Products,
    Clients,
    Suppliers,
}

impl fmt::Display for CatalogEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CatalogEntity::Products => "produits",
            CatalogEntity::Clients => "clients",
            CatalogEntity::Suppliers => "fournisseurs",
        };
        f.write_str(name)
    }
}

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to load {entity}: {source}")]
    LoadFailed {
        entity: CatalogEntity,
        #[source]
        source: ClientError,
    },
}

impl CatalogError {
    pub fn entity(&self) -> CatalogEntity {
        match self {
            CatalogError::LoadFailed { entity, .. } => *entity,
        }
    }
}

/// Immutable point-in-time copy of the remote catalog
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
    clients: Vec<ClientRecord>,
    suppliers: Vec<Supplier>,
    product_index: HashMap<i64, usize>,
    client_index: HashMap<i64, usize>,
    supplier_index: HashMap<i64, usize>,
}

impl CatalogSnapshot {
    pub fn new(
        products: Vec<Product>,
        clients: Vec<ClientRecord>,
        suppliers: Vec<Supplier>,
    ) -> Self {
        let product_index = products.iter().enumerate().map(|(i, p)| (p.id, i)).collect();
        let client_index = clients.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        let supplier_index = suppliers
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id, i))
            .collect();
        Self {
            products,
            clients,
            suppliers,
            product_index,
            client_index,
            supplier_index,
        }
    }

    /// Lookup by id; `None` for ids gone stale since the last reload
    pub fn product(&self, id: i64) -> Option<&Product> {
        self.product_index.get(&id).map(|&i| &self.products[i])
    }

    pub fn client(&self, id: i64) -> Option<&ClientRecord> {
        self.client_index.get(&id).map(|&i| &self.clients[i])
    }

    pub fn supplier(&self, id: i64) -> Option<&Supplier> {
        self.supplier_index.get(&id).map(|&i| &self.suppliers[i])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    /// Products offered by the sale form: active and in stock
    pub fn sellable_products(&self) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(|p| p.active && p.stock_on_hand > 0)
    }
}

/// Cache holding the current snapshot behind an atomically swapped `Arc`
#[derive(Debug)]
pub struct CatalogCache {
    snapshot: RwLock<Arc<CatalogSnapshot>>,
    active_products_only: bool,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(CatalogSnapshot::default())),
            active_products_only: false,
        }
    }

    /// Cache configured from client settings, the same way
    /// [`ClientConfig::build_backend`] hands settings to the transport
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new().with_active_products_only(config.active_products_only)
    }

    /// Drop inactive products at snapshot assembly time
    pub fn with_active_products_only(mut self, enabled: bool) -> Self {
        self.active_products_only = enabled;
        self
    }

    /// Current snapshot; in-flight readers keep their `Arc` across reloads
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(
            &self
                .snapshot
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Fetch all three entity lists and swap the snapshot in one step.
    ///
    /// The three requests run concurrently; a single failure aborts the
    /// reload and leaves the previous snapshot visible.
    pub async fn reload<B: Backend>(
        &self,
        api: &GestioApi<B>,
    ) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        let (mut products, clients, suppliers) = tokio::try_join!(
            async {
                api.list_products()
                    .await
                    .map_err(|source| CatalogError::LoadFailed {
                        entity: CatalogEntity::Products,
                        source,
                    })
            },
            async {
                api.list_clients()
                    .await
                    .map_err(|source| CatalogError::LoadFailed {
                        entity: CatalogEntity::Clients,
                        source,
                    })
            },
            async {
                api.list_suppliers()
                    .await
                    .map_err(|source| CatalogError::LoadFailed {
                        entity: CatalogEntity::Suppliers,
                        source,
                    })
            },
        )?;

        if self.active_products_only {
            products.retain(|p| p.active);
        }

        tracing::info!(
            products = products.len(),
            clients = clients.len(),
            suppliers = suppliers.len(),
            "catalog snapshot swapped"
        );

        let next = Arc::new(CatalogSnapshot::new(products, clients, suppliers));
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);
        Ok(next)
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}
