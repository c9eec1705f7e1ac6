use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// USD-relative multipliers fetched for a single conversion.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRateTable {
    rates: HashMap<String, Decimal>,
}

impl ExchangeRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rate for `code`, treating zero or negative rates as absent.
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates
            .get(code)
            .copied()
            .filter(|rate| *rate > Decimal::ZERO)
    }

    pub fn insert(&mut self, code: impl Into<String>, rate: Decimal) {
        self.rates.insert(code.into(), rate);
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Decimal)> for ExchangeRateTable {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_non_positive_rates_are_absent() {
        let table: ExchangeRateTable = [("EUR", dec!(0.9)), ("XXX", dec!(0))].into_iter().collect();
        assert_eq!(table.rate("EUR"), Some(dec!(0.9)));
        assert_eq!(table.rate("XXX"), None);
        assert_eq!(table.rate("GBP"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_deserialize_numeric_rates() {
        let table: ExchangeRateTable =
            serde_json::from_str(r#"{"USD": 1, "EUR": 0.876, "JPY": 149.5}"#).unwrap();
        assert_eq!(table.rate("EUR"), Some(dec!(0.876)));
        assert_eq!(table.rate("JPY"), Some(dec!(149.5)));
        assert_eq!(table.rate("USD"), Some(dec!(1)));
    }
}
