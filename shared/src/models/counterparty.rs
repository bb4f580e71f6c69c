//! Counterparty models: clients and suppliers

use serde::{Deserialize, Serialize};

/// Client entity as served by `GET /api/clients`
///
/// Named `ClientRecord` to stay clear of HTTP-client types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: i64,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "prenom", default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telephone", default)]
    pub phone: Option<String>,
}

impl ClientRecord {
    /// Display label as rendered by the selection inputs
    pub fn label(&self) -> String {
        match &self.first_name {
            Some(first) => format!("{} {}", self.name, first),
            None => self.name.clone(),
        }
    }
}

/// Supplier entity as served by `GET /api/fournisseurs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telephone", default)]
    pub phone: Option<String>,
}
