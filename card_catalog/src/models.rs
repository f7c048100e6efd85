//! Catalog and price data types, plus the wire shapes they travel in.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One catalog entry.
///
/// `id` is assigned by the service; 0 means the record has not been stored yet.
/// `unique_key` is the human-facing catalog code (e.g. `swsh4-23`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "uniqueId")]
    pub unique_key: String,
    #[serde(rename = "pokemon")]
    pub display_name: String,
    #[serde(rename = "imageUrl")]
    pub image_ref: String,
}

impl CardRecord {
    /// A record that has not been stored yet (id 0)
    pub fn new(
        unique_key: impl Into<String>,
        display_name: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            unique_key: unique_key.into(),
            display_name: display_name.into(),
            image_ref: image_ref.into(),
        }
    }

    /// Same fields, addressed at an existing entry
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    /// Checks the fields the service requires on create and edit.
    pub fn validate_fields(&self) -> Result<()> {
        let blank = [
            ("unique key", &self.unique_key),
            ("display name", &self.display_name),
            ("image URL", &self.image_ref),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());

        match blank {
            Some((field, _)) => Err(CatalogError::InvalidRecord(format!("{} is empty", field))),
            None => Ok(()),
        }
    }

    /// Edit and delete address an entry by id, so it must be assigned.
    pub fn require_id(&self) -> Result<i64> {
        if self.is_new() {
            return Err(CatalogError::InvalidRecord(format!(
                "card '{}' has no service-assigned id",
                self.unique_key
            )));
        }
        Ok(self.id)
    }

    /// Case-insensitive match against id, display name and unique key.
    /// `term` must already be lowercase.
    pub(crate) fn matches(&self, term: &str) -> bool {
        self.id.to_string().contains(term)
            || self.display_name.to_lowercase().contains(term)
            || self.unique_key.to_lowercase().contains(term)
    }
}

/// Body of a create request. The service assigns the id.
#[derive(Debug, Serialize)]
pub(crate) struct NewCardBody<'a> {
    #[serde(rename = "uniqueId")]
    pub unique_key: &'a str,
    #[serde(rename = "pokemon")]
    pub display_name: &'a str,
    #[serde(rename = "imageUrl")]
    pub image_ref: &'a str,
}

impl<'a> From<&'a CardRecord> for NewCardBody<'a> {
    fn from(record: &'a CardRecord) -> Self {
        Self {
            unique_key: &record.unique_key,
            display_name: &record.display_name,
            image_ref: &record.image_ref,
        }
    }
}

/// Error body of either service (catalog uses `errorMsg`, price function `errorMessage`)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServiceErrorBody {
    #[serde(default)]
    pub error_msg: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ServiceErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error_msg
            .or(self.error_message)
            .filter(|m| !m.is_empty())
    }
}

/// One vendor's price range for a card
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VendorQuote {
    pub market: f64,
    pub high: f64,
    pub mid: f64,
    pub low: f64,
}

/// Timestamped set of vendor quotes for one card
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub retrieved_at: String,
    pub quotes: BTreeMap<String, VendorQuote>,
}

impl PriceSnapshot {
    pub fn quote(&self, vendor: &str) -> Option<&VendorQuote> {
        self.quotes.get(vendor)
    }
}

/// Price range as sent on the wire; any field may be missing or null
#[derive(Debug, Deserialize, Default)]
pub(crate) struct QuoteWire {
    #[serde(default)]
    pub market: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub mid: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
}

impl From<QuoteWire> for VendorQuote {
    fn from(wire: QuoteWire) -> Self {
        Self {
            market: wire.market.unwrap_or_default(),
            high: wire.high.unwrap_or_default(),
            mid: wire.mid.unwrap_or_default(),
            low: wire.low.unwrap_or_default(),
        }
    }
}

/// `data` payload of the price service.
///
/// The deployed function nests quotes under `prices` next to `updatedAt`
/// (always present, `prices` is null when the card has no quotes);
/// the flat form maps vendor names straight to quotes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PriceData {
    Nested {
        #[serde(rename = "updatedAt")]
        updated_at: String,
        #[serde(default)]
        prices: Option<BTreeMap<String, Option<QuoteWire>>>,
    },
    Flat(BTreeMap<String, QuoteWire>),
}

/// Full price service response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PriceResponse {
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub data: Option<PriceData>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl PriceResponse {
    /// Turns the response into a snapshot, stamping it with the service's
    /// update time or, when absent, the time it was received.
    pub fn into_snapshot(self) -> Result<PriceSnapshot> {
        if let Some(message) = self.error_message.filter(|m| !m.is_empty()) {
            return Err(CatalogError::PriceUnavailable(message));
        }

        let data = self
            .data
            .ok_or_else(|| CatalogError::PriceUnavailable("response carried no price data".to_string()))?;

        let (nested_updated_at, quotes): (Option<String>, BTreeMap<String, VendorQuote>) = match data {
            PriceData::Nested { updated_at, prices } => (
                Some(updated_at),
                prices
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|(vendor, quote)| quote.map(|q| (vendor, q.into())))
                    .collect(),
            ),
            PriceData::Flat(prices) => (
                None,
                prices.into_iter().map(|(vendor, q)| (vendor, q.into())).collect(),
            ),
        };

        let retrieved_at = nested_updated_at
            .or(self.updated_at)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

        Ok(PriceSnapshot {
            retrieved_at,
            quotes,
        })
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;
