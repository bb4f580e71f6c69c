//! Wire models for the GestioStock API

pub mod counterparty;
pub mod item;
pub mod product;
pub mod purchase_order;
pub mod sale;

pub use counterparty::{ClientRecord, Supplier};
pub use item::ItemPayload;
pub use product::Product;
pub use purchase_order::{PurchaseOrder, PurchaseOrderCreate, PurchaseOrderStatus};
pub use sale::{Sale, SaleCreate, SaleItem, SaleStatus};
