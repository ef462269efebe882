use serde::{Deserialize, Serialize};

/// A stock followed on the dashboard, persisted under the `myStocks` key.
///
/// Symbols are uppercased on construction and unique within the watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedStock {
    /// Ticker symbol, uppercased (e.g., "AAPL", "BNP.PA")
    pub symbol: String,

    /// Human-readable name (e.g., "Apple")
    pub name: String,
}

impl WatchedStock {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
        }
    }
}

/// Watchlist seeded on first run, before the user has stored one.
pub fn default_watchlist() -> Vec<WatchedStock> {
    vec![
        WatchedStock::new("AAPL", "Apple"),
        WatchedStock::new("MSFT", "Microsoft"),
        WatchedStock::new("TSLA", "Tesla"),
        WatchedStock::new("BNP.PA", "BNP Paribas"),
    ]
}

/// A single quote fetched from the remote service. Transient — never
/// persisted, never part of ledger state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,

    /// Display name reported by the service, when it has one.
    pub short_name: Option<String>,

    /// Latest market price; absent for symbols the service cannot price.
    pub price: Option<f64>,

    /// Day-over-day change in percent.
    pub change_percent: Option<f64>,
}
