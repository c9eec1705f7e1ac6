use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::str::FromStr;

/// Packages every new catalog starts with, in display order.
pub const DEFAULT_PACKAGES: &[(&str, u32)] = &[
    ("starter", 99),
    ("pro", 199),
    ("business", 299),
    ("enterprise", 499),
    ("hosting1Month", 15),
    ("hosting3Month", 12),
    ("hosting6Month", 9),
    ("hosting12Month", 6),
];

/// A non-negative price.
///
/// Wraps `rust_decimal::Decimal` so that user-entered text never produces a
/// negative or non-numeric value: anything that is not a valid non-negative
/// number coerces to [`Price::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Builds a price, clamping negative values to zero.
    pub fn new(value: Decimal) -> Self {
        Self(value.max(Decimal::ZERO))
    }

    /// Parses free text into a price.
    ///
    /// Accepts plain (`"12.5"`) and scientific (`"1.2e3"`) notation after
    /// trimming whitespace. Empty, unparseable or negative input yields
    /// [`Price::ZERO`], and so does a magnitude `Decimal` cannot hold
    /// (above roughly 7.9e28, e.g. `"1e30"`).
    pub fn parse_or_zero(raw: &str) -> Self {
        let trimmed = raw.trim();
        let parsed = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed));
        match parsed {
            Ok(value) if value >= Decimal::ZERO => Self(value),
            _ => Self::ZERO,
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<u32> for Price {
    fn from(value: u32) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

// Whole values are written as integers and fractional ones as floats, so a
// catalog renders as `{"starter": 100}` rather than `{"starter": "100.00"}`.
impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.0.normalize();
        if value.scale() == 0
            && let Some(whole) = value.to_i64()
        {
            return serializer.serialize_i64(whole);
        }
        match value.to_f64() {
            Some(float) => serializer.serialize_f64(float),
            None => serializer.serialize_str(&value.to_string()),
        }
    }
}

/// Editable mapping from package name to USD price.
///
/// Keys are unique and keep their insertion order for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PriceCatalog {
    entries: Vec<(String, Price)>,
}

impl PriceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the catalog pre-filled with [`DEFAULT_PACKAGES`].
    pub fn standard() -> Self {
        DEFAULT_PACKAGES
            .iter()
            .map(|(name, price)| ((*name).to_string(), Price::from(*price)))
            .collect()
    }

    /// Parses `raw` and stores it under `name`, inserting the entry if needed.
    ///
    /// Invalid text degrades to zero instead of failing.
    pub fn set_price(&mut self, name: &str, raw: &str) -> Price {
        let price = Price::parse_or_zero(raw);
        self.insert(name, price);
        price
    }

    /// Stores `price` under `name`, replacing any previous value in place.
    pub fn insert(&mut self, name: &str, price: Price) {
        match self.position(name) {
            Some(idx) => self.entries[idx].1 = price,
            None => self.entries.push((name.to_string(), price)),
        }
    }

    /// Adds a new package priced at zero.
    ///
    /// Returns `false` without touching the catalog when the trimmed name is
    /// empty or already present.
    pub fn add_entry(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.entries.push((name.to_string(), Price::ZERO));
        true
    }

    /// Removes a package. Returns `false` if it was not present.
    pub fn remove_entry(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<Price> {
        self.position(name).map(|idx| self.entries[idx].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Price)> {
        self.entries
            .iter()
            .map(|(name, price)| (name.as_str(), *price))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == name)
    }
}

impl FromIterator<(String, Price)> for PriceCatalog {
    fn from_iter<I: IntoIterator<Item = (String, Price)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (name, price) in iter {
            catalog.insert(&name, price);
        }
        catalog
    }
}

impl Serialize for PriceCatalog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, price) in &self.entries {
            map.serialize_entry(name, price)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_catalog_order() {
        let catalog = PriceCatalog::standard();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names[0], "starter");
        assert_eq!(names[7], "hosting12Month");
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.get("enterprise"), Some(Price::from(499)));
    }

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(Price::parse_or_zero("12.5").value(), dec!(12.5));
        assert_eq!(Price::parse_or_zero("  42 ").value(), dec!(42));
        assert_eq!(Price::parse_or_zero("1.5e2").value(), dec!(150));
        assert_eq!(Price::parse_or_zero(""), Price::ZERO);
        assert_eq!(Price::parse_or_zero("abc"), Price::ZERO);
        assert_eq!(Price::parse_or_zero("-3"), Price::ZERO);
    }

    #[test]
    fn test_parse_or_zero_out_of_range() {
        assert_eq!(Price::parse_or_zero("1e30"), Price::ZERO);
        assert_eq!(Price::parse_or_zero("1e400"), Price::ZERO);
        assert_eq!(
            Price::parse_or_zero("1e25").value(),
            Decimal::from_scientific("1e25").unwrap()
        );
    }

    #[test]
    fn test_set_price_leaves_other_entries_untouched() {
        let mut catalog = PriceCatalog::standard();
        catalog.set_price("pro", "249.99");
        assert_eq!(catalog.get("pro").unwrap().value(), dec!(249.99));
        assert_eq!(catalog.get("starter"), Some(Price::from(99)));

        catalog.set_price("pro", "not a number");
        assert_eq!(catalog.get("pro"), Some(Price::ZERO));
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn test_add_existing_entry_is_noop() {
        let mut catalog = PriceCatalog::standard();
        assert!(!catalog.add_entry("starter"));
        assert_eq!(catalog.get("starter"), Some(Price::from(99)));
        assert_eq!(catalog, PriceCatalog::standard());
    }

    #[test]
    fn test_add_entry() {
        let mut catalog = PriceCatalog::new();
        assert!(catalog.add_entry("addon"));
        assert!(!catalog.add_entry("   "));
        assert_eq!(catalog.get("addon"), Some(Price::ZERO));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_remove_missing_entry_is_noop() {
        let mut catalog = PriceCatalog::standard();
        assert!(!catalog.remove_entry("missing"));
        assert_eq!(catalog, PriceCatalog::standard());

        assert!(catalog.remove_entry("pro"));
        assert!(!catalog.contains("pro"));
    }

    #[test]
    fn test_serialize_preserves_order_and_number_shape() {
        let mut catalog = PriceCatalog::new();
        catalog.insert("zeta", Price::new(dec!(100.00)));
        catalog.insert("alpha", Price::new(dec!(87.6)));
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(json, r#"{"zeta":100,"alpha":87.6}"#);
    }
}
