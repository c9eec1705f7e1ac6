use super::catalog::{Price, PriceCatalog};
use super::currency::CurrencyCode;
use super::rates::ExchangeRateTable;
use crate::error::{ConverterError, Result};
use rust_decimal::RoundingStrategy;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Precision applied to converted prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Nearest hundredth.
    #[default]
    Cents,
    /// Nearest integer.
    Whole,
}

impl Rounding {
    pub fn from_flag(round_numbers: bool) -> Self {
        if round_numbers { Self::Whole } else { Self::Cents }
    }

    fn decimal_places(self) -> u32 {
        match self {
            Self::Cents => 2,
            Self::Whole => 0,
        }
    }

    pub fn apply(self, price: Price) -> Price {
        Price::new(
            price
                .value()
                .round_dp_with_strategy(self.decimal_places(), RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

/// Converted catalogs keyed by currency code.
///
/// The base currency always comes first and holds the catalog as entered;
/// the remaining entries follow the order the codes were requested in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    tables: Vec<(CurrencyCode, PriceCatalog)>,
}

impl ConversionResult {
    fn seeded(catalog: &PriceCatalog) -> Self {
        Self {
            tables: vec![(CurrencyCode::base(), catalog.clone())],
        }
    }

    fn put(&mut self, code: &CurrencyCode, catalog: PriceCatalog) {
        match self.tables.iter_mut().find(|(key, _)| key == code) {
            Some(entry) => entry.1 = catalog,
            None => self.tables.push((code.clone(), catalog)),
        }
    }

    pub fn get(&self, code: &str) -> Option<&PriceCatalog> {
        self.tables
            .iter()
            .find(|(key, _)| key.as_str() == code)
            .map(|(_, catalog)| catalog)
    }

    pub fn base(&self) -> &PriceCatalog {
        &self.tables[0].1
    }

    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.tables.iter().map(|(code, _)| code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, &PriceCatalog)> {
        self.tables.iter().map(|(code, catalog)| (code, catalog))
    }

    /// Number of currencies, base included.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Serialize for ConversionResult {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (code, catalog) in &self.tables {
            map.serialize_entry(code, catalog)?;
        }
        map.end()
    }
}

/// Converts every catalog price into each requested currency.
///
/// Codes missing from `rates` are skipped silently. The base currency is never
/// re-converted, so its entry stays identical to `catalog` whatever the
/// rounding policy. A product too large for `Decimal` fails the whole
/// conversion with [`ConverterError::PriceOutOfRange`].
pub fn convert(
    catalog: &PriceCatalog,
    currencies: &[CurrencyCode],
    rates: &ExchangeRateTable,
    rounding: Rounding,
) -> Result<ConversionResult> {
    let mut result = ConversionResult::seeded(catalog);

    for code in currencies.iter().filter(|code| !code.is_base()) {
        let Some(rate) = rates.rate(code.as_str()) else {
            tracing::debug!(currency = %code, "no rate available, skipping");
            continue;
        };

        let converted = catalog
            .iter()
            .map(|(name, price)| {
                let raw = price.value().checked_mul(rate).ok_or_else(|| {
                    ConverterError::PriceOutOfRange {
                        package: name.to_string(),
                        currency: code.to_string(),
                    }
                })?;
                Ok((name.to_string(), rounding.apply(Price::new(raw))))
            })
            .collect::<Result<PriceCatalog>>()?;
        result.put(code, converted);
    }

    Ok(result)
}
