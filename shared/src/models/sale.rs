//! Sale Model

use super::ItemPayload;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sale status as reported by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SaleStatus {
    #[serde(rename = "confirmée")]
    Confirmed,
    #[serde(rename = "annulée")]
    Cancelled,
    #[serde(rename = "brouillon")]
    Draft,
    #[serde(other)]
    Unknown,
}

impl SaleStatus {
    /// Wire value used in query-string filters; `Unknown` has no wire form
    pub fn as_wire(&self) -> Option<&'static str> {
        match self {
            SaleStatus::Confirmed => Some("confirmée"),
            SaleStatus::Cancelled => Some("annulée"),
            SaleStatus::Draft => Some("brouillon"),
            SaleStatus::Unknown => None,
        }
    }
}

/// Create sale payload (`POST /api/ventes`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleCreate {
    /// Absent means an anonymous walk-in customer
    #[serde(rename = "client_id", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    #[serde(rename = "devise")]
    pub currency: String,
    #[serde(rename = "mode_paiement")]
    pub payment_method: String,
    #[serde(default)]
    pub notes: String,
    pub items: Vec<ItemPayload>,
}

/// Sale entity as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    #[serde(rename = "numero_facture")]
    pub invoice_number: String,
    #[serde(rename = "date_vente", default)]
    pub date: Option<NaiveDateTime>,
    /// Client display name, absent for anonymous sales
    #[serde(default)]
    pub client: Option<String>,
    #[serde(rename = "statut")]
    pub status: SaleStatus,
    #[serde(rename = "mode_paiement", default)]
    pub payment_method: String,
    #[serde(rename = "montant_total", default, with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(rename = "devise", default)]
    pub currency: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

/// Line item inside a returned sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(rename = "produit_id")]
    pub product_id: i64,
    #[serde(rename = "produit_nom", default)]
    pub product_name: Option<String>,
    #[serde(rename = "quantite")]
    pub quantity: i32,
    #[serde(rename = "prix_unitaire", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(rename = "remise", default, with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,
}
