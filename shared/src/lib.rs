//! Shared types for the GestioStock client
//!
//! Wire-level models for the GestioStock REST API. The backend speaks
//! French field names (`nom`, `prix_vente`, `stock_actuel`, ...); every
//! struct here maps them onto English-named Rust fields via serde renames
//! so the rest of the workspace never touches raw wire keys.

pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    ClientRecord, ItemPayload, Product, PurchaseOrder, PurchaseOrderCreate, PurchaseOrderStatus,
    Sale, SaleCreate, SaleItem, SaleStatus, Supplier,
};
pub use response::ErrorBody;
