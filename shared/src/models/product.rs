//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity as served by `GET /api/produits`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(default)]
    pub reference: Option<String>,
    /// Unit purchase price, defaulted into purchase-order lines
    #[serde(rename = "prix_achat", with = "rust_decimal::serde::float")]
    pub purchase_price: Decimal,
    /// Unit sale price, defaulted into sale lines
    #[serde(rename = "prix_vente", with = "rust_decimal::serde::float")]
    pub sale_price: Decimal,
    /// VAT rate in percent (e.g. 18 = 18%)
    #[serde(rename = "tva", default, with = "rust_decimal::serde::float")]
    pub vat_rate: Decimal,
    #[serde(rename = "stock_actuel", default)]
    pub stock_on_hand: i32,
    #[serde(rename = "stock_min", default)]
    pub stock_min: i32,
    #[serde(rename = "actif", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Product {
    /// Low-stock flag, mirrored from the backend's `stock_faible` property
    pub fn low_stock(&self) -> bool {
        self.stock_on_hand <= self.stock_min
    }
}
