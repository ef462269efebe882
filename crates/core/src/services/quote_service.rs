use tracing::warn;

use crate::errors::CoreError;
use crate::models::watchlist::Quote;
use crate::providers::traits::QuoteProvider;
use crate::providers::yahoo::YahooQuoteProvider;

/// Fetches watchlist quotes with automatic provider fallback.
///
/// Providers are tried in registration order; the first non-empty result
/// wins. A total failure surfaces the last error. Quote fetching never
/// touches ledger state — a failure here is isolated to the caller.
pub struct QuoteService {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl QuoteService {
    /// Create an empty service with no providers registered.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a service with the default provider pre-configured.
    pub fn with_defaults() -> Self {
        let mut service = Self::new();
        service.register(Box::new(YahooQuoteProvider::new()));
        service
    }

    /// Register a provider. Registration order is fallback priority.
    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        self.providers.push(provider);
    }

    /// Names of the registered providers, in fallback order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Fetch current quotes for the given symbols.
    ///
    /// An empty symbol list short-circuits to an empty result without
    /// calling any provider.
    pub async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, CoreError> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let mut last_error = None;
        for provider in &self.providers {
            match provider.fetch_quotes(symbols).await {
                Ok(quotes) if !quotes.is_empty() => return Ok(quotes),
                Ok(_) => {
                    warn!(provider = provider.name(), "provider returned no quotes");
                    last_error = Some(CoreError::NoQuoteData);
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "quote fetch failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::NoQuoteData))
    }
}

impl Default for QuoteService {
    fn default() -> Self {
        Self::new()
    }
}
