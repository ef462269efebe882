use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::errors::CoreError;
use crate::models::watchlist::Quote;

use super::traits::QuoteProvider;

/// Quote endpoints tried in order. The v7 endpoint is kept as a fallback
/// for regions where v8 answers with errors.
const ENDPOINTS: &[&str] = &[
    "https://query1.finance.yahoo.com/v8/finance/quote",
    "https://query1.finance.yahoo.com/v7/finance/quote",
];

/// Yahoo Finance quote provider.
///
/// - **Free**: no API key required (unofficial public API).
/// - **Coverage**: global equities, ETFs, indices.
/// - Tries a fixed ordered list of endpoints before declaring failure.
pub struct YahooQuoteProvider {
    client: Client,
}

impl YahooQuoteProvider {
    pub fn new() -> Self {
        let builder = Client::builder().timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }

    async fn try_endpoint(&self, url: &str) -> Result<QuoteEnvelope, CoreError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(CoreError::Api {
                provider: "Yahoo Finance".into(),
                message: format!("HTTP {}", response.status()),
            });
        }
        response.json().await.map_err(|e| CoreError::Api {
            provider: "Yahoo Finance".into(),
            message: format!("Failed to parse quote response: {e}"),
        })
    }
}

impl Default for YahooQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Yahoo API response types ────────────────────────────────────────

#[derive(Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteResponse,
}

#[derive(Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<QuoteEntry>,
}

#[derive(Deserialize)]
struct QuoteEntry {
    symbol: String,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "regularMarketChangePercent")]
    regular_market_change_percent: Option<f64>,
}

impl From<QuoteEntry> for Quote {
    fn from(entry: QuoteEntry) -> Self {
        Self {
            symbol: entry.symbol,
            short_name: entry.short_name,
            price: entry.regular_market_price,
            change_percent: entry.regular_market_change_percent,
        }
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, CoreError> {
        let joined = symbols.join(",");
        let mut last_error = None;

        for endpoint in ENDPOINTS {
            let url = format!("{endpoint}?symbols={joined}");
            let envelope = match self.try_endpoint(&url).await {
                Ok(envelope) => envelope,
                Err(e) => {
                    warn!(endpoint, error = %e, "quote endpoint failed, trying next");
                    last_error = Some(e);
                    continue;
                }
            };
            if envelope.quote_response.result.is_empty() {
                warn!(endpoint, "quote endpoint returned an empty result");
                last_error = Some(CoreError::NoQuoteData);
                continue;
            }
            return Ok(envelope
                .quote_response
                .result
                .into_iter()
                .map(Quote::from)
                .collect());
        }

        Err(last_error.unwrap_or(CoreError::NoQuoteData))
    }
}
