// ═══════════════════════════════════════════════════════════════════
//  Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use centime_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Amount must be greater than zero".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: Amount must be greater than zero"
        );
    }

    #[test]
    fn duplicate_account() {
        let err = CoreError::DuplicateAccount("Checking".into());
        assert_eq!(err.to_string(), "An account named 'Checking' already exists");
    }

    #[test]
    fn account_not_found() {
        let err = CoreError::AccountNotFound("Savings".into());
        assert_eq!(err.to_string(), "Account not found: Savings");
    }

    #[test]
    fn account_in_use() {
        let err = CoreError::AccountInUse("Checking".into());
        assert_eq!(
            err.to_string(),
            "Account 'Checking' still has transactions recorded against it"
        );
    }

    #[test]
    fn transaction_not_found() {
        let err = CoreError::TransactionNotFound(1704448800000);
        assert_eq!(err.to_string(), "Transaction not found: 1704448800000");
    }

    #[test]
    fn duplicate_stock() {
        let err = CoreError::DuplicateStock("AAPL".into());
        assert_eq!(err.to_string(), "'AAPL' is already on the watchlist");
    }

    #[test]
    fn storage() {
        let err = CoreError::Storage("disk full".into());
        assert_eq!(err.to_string(), "Storage error: disk full");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad value".into());
        assert_eq!(err.to_string(), "Serialization error: bad value");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("bad json".into());
        assert_eq!(err.to_string(), "Deserialization error: bad json");
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            provider: "Yahoo Finance".into(),
            message: "HTTP 500".into(),
        };
        assert_eq!(err.to_string(), "API error (Yahoo Finance): HTTP 500");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn no_quote_data() {
        let err = CoreError::NoQuoteData;
        assert_eq!(
            err.to_string(),
            "No quote data returned for the requested symbols"
        );
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn io_error_becomes_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Storage(msg) if msg.contains("missing file")));
    }

    #[test]
    fn serde_json_error_becomes_deserialization() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: CoreError = parse_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }
}
