use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::watchlist::Quote;

/// Trait abstraction over remote quote services.
///
/// The dashboard only consumes `fetch_quotes`; when an endpoint stops
/// working, only its implementation changes — the rest of the codebase is
/// untouched.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch current quotes for the given symbols.
    ///
    /// Symbols the service does not recognize are simply absent from the
    /// result; an empty result is not an error at this level.
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, CoreError>;
}
