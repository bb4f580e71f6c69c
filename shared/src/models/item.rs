//! Line-item payload shared by sale and purchase-order creation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a `POST /api/ventes` or `POST /api/commandes` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    #[serde(rename = "produit_id")]
    pub product_id: i64,
    #[serde(rename = "quantite")]
    pub quantity: i32,
    #[serde(rename = "prix_unitaire", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Per-line discount in percent [0, 100]
    #[serde(rename = "remise", with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,
}
