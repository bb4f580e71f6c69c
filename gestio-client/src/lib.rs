//! GestioStock Client - cart, catalog cache and checkout for the GestioStock API
//!
//! Three cooperating pieces, all free of UI state:
//! - [`cart::Cart`] aggregates line items for an in-progress sale or
//!   purchase order, deduplicating by product and recomputing totals.
//! - [`catalog::CatalogCache`] holds the last-fetched product/client/supplier
//!   snapshot used for price defaulting and stock checks.
//! - [`checkout::CheckoutPipeline`] validates the cart against the snapshot
//!   and performs the single create request.

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod http;
pub mod money;

pub use api::{GestioApi, PurchaseOrderFilter, SaleFilter};
pub use cart::{Cart, CartError, CartTotals, LineInput, LineItem};
pub use catalog::{CatalogCache, CatalogEntity, CatalogError, CatalogSnapshot};
pub use checkout::{CheckoutError, CheckoutPipeline, CheckoutState, PurchaseDraft, SaleDraft};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{Backend, HttpBackend};

// Re-export shared types for convenience
pub use shared::models::{ClientRecord, Product, PurchaseOrder, Sale, Supplier};
