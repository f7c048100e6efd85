//! Endpoint and timing configuration.

use std::time::Duration;

/// Catalog service base URL used when nothing else is configured
pub const DEFAULT_CATALOG_URL: &str = "http://localhost:8080";

/// Fixed external price-quote endpoint
pub const DEFAULT_PRICE_URL: &str =
    "https://asia-southeast1-cs3219-otot-b-363213.cloudfunctions.net/cs3219-otot-b-serverless/GetPrice";

pub const DEFAULT_USER_AGENT: &str = "CardCatalog/1.0";

/// How long a notification stays up before it dismisses itself
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(2000);

/// Where the client talks to and how it introduces itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub catalog_base_url: String,
    pub price_url: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_URL.to_string(),
            price_url: DEFAULT_PRICE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Config pointing both services at the given base URL (price endpoint at `/GetPrice`).
    /// Handy for local stacks and mock servers.
    pub fn for_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            catalog_base_url: base.to_string(),
            price_url: format!("{}/GetPrice", base),
            ..Self::default()
        }
    }

    /// Collection resource: `{base}/api/card`
    pub fn cards_url(&self) -> String {
        format!("{}/api/card", self.catalog_base_url.trim_end_matches('/'))
    }

    /// Item resource: `{base}/api/card/{id}`
    pub fn card_url(&self, id: i64) -> String {
        format!("{}/{}", self.cards_url(), id)
    }
}
