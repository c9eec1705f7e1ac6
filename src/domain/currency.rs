use serde::Serialize;
use std::fmt;

/// The currency every catalog price is denominated in.
pub const BASE_CURRENCY: &str = "USD";

/// Currency list shown to a new user.
pub const DEFAULT_CURRENCIES: &str = "AED, ARS, AUD";

/// An upper-case, non-empty currency code such as `EUR`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Normalizes a token. Returns `None` when nothing is left after trimming.
    pub fn parse(token: &str) -> Option<Self> {
        let code = token.trim().to_uppercase();
        (!code.is_empty()).then_some(Self(code))
    }

    pub fn base() -> Self {
        Self(BASE_CURRENCY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_base(&self) -> bool {
        self.0 == BASE_CURRENCY
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splits comma-separated text into currency codes.
///
/// Tokens are trimmed and upper-cased; empty ones are dropped. Order and
/// duplicates are kept as typed. An empty result is left for the caller to
/// reject.
pub fn parse_currency_list(raw: &str) -> Vec<CurrencyCode> {
    raw.split(',').filter_map(CurrencyCode::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(raw: &str) -> Vec<String> {
        parse_currency_list(raw)
            .into_iter()
            .map(|c| c.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_parse_normalizes_tokens() {
        assert_eq!(codes("AED, ars ,, AUD"), vec!["AED", "ARS", "AUD"]);
    }

    #[test]
    fn test_parse_blank_input() {
        assert!(parse_currency_list("").is_empty());
        assert!(parse_currency_list("   ").is_empty());
        assert!(parse_currency_list(" , ,").is_empty());
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        assert_eq!(codes("eur,EUR"), vec!["EUR", "EUR"]);
    }

    #[test]
    fn test_default_currencies() {
        assert_eq!(codes(DEFAULT_CURRENCIES), vec!["AED", "ARS", "AUD"]);
        assert!(CurrencyCode::base().is_base());
    }
}
