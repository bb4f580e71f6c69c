//! Purchase Order Model

use super::ItemPayload;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Purchase-order status as reported by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PurchaseOrderStatus {
    #[serde(rename = "en_attente")]
    Pending,
    #[serde(rename = "confirmée")]
    Confirmed,
    #[serde(rename = "reçue")]
    Received,
    #[serde(rename = "annulée")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl PurchaseOrderStatus {
    /// Wire value used in query-string filters; `Unknown` has no wire form
    pub fn as_wire(&self) -> Option<&'static str> {
        match self {
            PurchaseOrderStatus::Pending => Some("en_attente"),
            PurchaseOrderStatus::Confirmed => Some("confirmée"),
            PurchaseOrderStatus::Received => Some("reçue"),
            PurchaseOrderStatus::Cancelled => Some("annulée"),
            PurchaseOrderStatus::Unknown => None,
        }
    }
}

/// Create purchase-order payload (`POST /api/commandes`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderCreate {
    #[serde(rename = "fournisseur_id")]
    pub supplier_id: i64,
    #[serde(rename = "date_livraison", skip_serializing_if = "Option::is_none")]
    pub expected_delivery: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub items: Vec<ItemPayload>,
}

/// Purchase-order entity as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: i64,
    #[serde(rename = "numero_commande")]
    pub order_number: String,
    #[serde(rename = "fournisseur", default)]
    pub supplier: Option<String>,
    #[serde(rename = "date_commande", default)]
    pub date: Option<NaiveDateTime>,
    #[serde(rename = "date_livraison", default)]
    pub expected_delivery: Option<NaiveDate>,
    #[serde(rename = "statut")]
    pub status: PurchaseOrderStatus,
    #[serde(rename = "montant_total", default, with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(rename = "nb_items", default)]
    pub item_count: i32,
    #[serde(rename = "devise", default)]
    pub currency: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_order_listing_row() {
        let json = r#"{
            "id": 4,
            "numero_commande": "CMD202608-00004",
            "fournisseur": "SODICA",
            "statut": "en_attente",
            "montant_total": 115000.0,
            "nb_items": 2
        }"#;
        let order: PurchaseOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, PurchaseOrderStatus::Pending);
        assert_eq!(order.item_count, 2);
    }
}
