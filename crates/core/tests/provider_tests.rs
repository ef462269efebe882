// ═══════════════════════════════════════════════════════════════════
//  Provider Tests — QuoteProvider fallback, QuoteService behavior
// ═══════════════════════════════════════════════════════════════════

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use centime_core::errors::CoreError;
use centime_core::models::watchlist::Quote;
use centime_core::providers::traits::QuoteProvider;
use centime_core::services::quote_service::QuoteService;

// ═══════════════════════════════════════════════════════════════════
//  Test Helpers — Mock Provider
// ═══════════════════════════════════════════════════════════════════

enum Behavior {
    /// Return these quotes.
    Quotes(Vec<Quote>),
    /// Succeed with an empty result.
    Empty,
    /// Fail with an API error.
    Fail,
}

struct MockQuoteProvider {
    name: String,
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
}

impl MockQuoteProvider {
    fn new(name: &str, behavior: Behavior) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                name: name.to_string(),
                behavior,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_quotes(&self, _symbols: &[String]) -> Result<Vec<Quote>, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Quotes(quotes) => Ok(quotes.clone()),
            Behavior::Empty => Ok(Vec::new()),
            Behavior::Fail => Err(CoreError::Api {
                provider: self.name.clone(),
                message: "service unavailable".into(),
            }),
        }
    }
}

fn quote(symbol: &str, price: f64) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        short_name: Some(symbol.to_string()),
        price: Some(price),
        change_percent: Some(0.5),
    }
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ═══════════════════════════════════════════════════════════════════
//  QuoteService
// ═══════════════════════════════════════════════════════════════════

#[tokio::test]
async fn single_provider_returns_its_quotes() {
    let (provider, calls) =
        MockQuoteProvider::new("Primary", Behavior::Quotes(vec![quote("AAPL", 185.0)]));
    let mut service = QuoteService::new();
    service.register(Box::new(provider));

    let quotes = service.fetch_quotes(&symbols(&["AAPL"])).await.unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].symbol, "AAPL");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failing_provider_falls_through_to_the_next() {
    let (first, first_calls) = MockQuoteProvider::new("Primary", Behavior::Fail);
    let (second, second_calls) =
        MockQuoteProvider::new("Fallback", Behavior::Quotes(vec![quote("MSFT", 410.0)]));
    let mut service = QuoteService::new();
    service.register(Box::new(first));
    service.register(Box::new(second));

    let quotes = service.fetch_quotes(&symbols(&["MSFT"])).await.unwrap();
    assert_eq!(quotes[0].symbol, "MSFT");
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_result_also_falls_through() {
    let (first, _) = MockQuoteProvider::new("Primary", Behavior::Empty);
    let (second, _) =
        MockQuoteProvider::new("Fallback", Behavior::Quotes(vec![quote("TSLA", 250.0)]));
    let mut service = QuoteService::new();
    service.register(Box::new(first));
    service.register(Box::new(second));

    let quotes = service.fetch_quotes(&symbols(&["TSLA"])).await.unwrap();
    assert_eq!(quotes[0].symbol, "TSLA");
}

#[tokio::test]
async fn first_success_stops_the_fallback_chain() {
    let (first, _) =
        MockQuoteProvider::new("Primary", Behavior::Quotes(vec![quote("AAPL", 185.0)]));
    let (second, second_calls) = MockQuoteProvider::new("Fallback", Behavior::Fail);
    let mut service = QuoteService::new();
    service.register(Box::new(first));
    service.register(Box::new(second));

    service.fetch_quotes(&symbols(&["AAPL"])).await.unwrap();
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn all_providers_failing_surfaces_the_last_error() {
    let (first, _) = MockQuoteProvider::new("Primary", Behavior::Fail);
    let (second, _) = MockQuoteProvider::new("Fallback", Behavior::Fail);
    let mut service = QuoteService::new();
    service.register(Box::new(first));
    service.register(Box::new(second));

    let err = service.fetch_quotes(&symbols(&["AAPL"])).await.unwrap_err();
    assert!(matches!(err, CoreError::Api { provider, .. } if provider == "Fallback"));
}

#[tokio::test]
async fn all_empty_reports_no_quote_data() {
    let (first, _) = MockQuoteProvider::new("Primary", Behavior::Empty);
    let mut service = QuoteService::new();
    service.register(Box::new(first));

    let err = service.fetch_quotes(&symbols(&["AAPL"])).await.unwrap_err();
    assert!(matches!(err, CoreError::NoQuoteData));
}

#[tokio::test]
async fn no_providers_reports_no_quote_data() {
    let service = QuoteService::new();
    let err = service.fetch_quotes(&symbols(&["AAPL"])).await.unwrap_err();
    assert!(matches!(err, CoreError::NoQuoteData));
}

#[tokio::test]
async fn empty_symbol_list_short_circuits_without_calling_providers() {
    let (provider, calls) = MockQuoteProvider::new("Primary", Behavior::Fail);
    let mut service = QuoteService::new();
    service.register(Box::new(provider));

    let quotes = service.fetch_quotes(&[]).await.unwrap();
    assert!(quotes.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn provider_names_follow_registration_order() {
    let (first, _) = MockQuoteProvider::new("Primary", Behavior::Empty);
    let (second, _) = MockQuoteProvider::new("Fallback", Behavior::Empty);
    let mut service = QuoteService::new();
    service.register(Box::new(first));
    service.register(Box::new(second));

    assert_eq!(service.provider_names(), vec!["Primary", "Fallback"]);
}

#[test]
fn default_service_has_the_yahoo_provider() {
    let service = QuoteService::with_defaults();
    assert_eq!(service.provider_names(), vec!["Yahoo Finance"]);
}
