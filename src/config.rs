use crate::domain::catalog::{DEFAULT_PACKAGES, Price, PriceCatalog};
use crate::domain::currency::DEFAULT_CURRENCIES;
use crate::error::Result;
use crate::infrastructure::http::DEFAULT_RATES_URL;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Prefix for environment overrides, e.g. `PRICE_CONVERTER_ROUND=true`.
pub const ENV_PREFIX: &str = "PRICE_CONVERTER";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PackageSetting {
    pub name: String,
    pub price: Decimal,
}

/// Startup settings for the converter.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Latest-rates endpoint; the base currency is appended as a path segment.
    pub rates_url: String,
    /// Initial content of the target currency field.
    pub currencies: String,
    pub round: bool,
    /// Initial catalog, in display order.
    #[serde(default = "default_packages")]
    pub packages: Vec<PackageSetting>,
}

fn default_packages() -> Vec<PackageSetting> {
    DEFAULT_PACKAGES
        .iter()
        .map(|(name, price)| PackageSetting {
            name: (*name).to_string(),
            price: Decimal::from(*price),
        })
        .collect()
}

impl Settings {
    /// Loads settings from defaults, then `path` (TOML) if given, then the
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("rates_url", DEFAULT_RATES_URL)?
            .set_default("currencies", DEFAULT_CURRENCIES)?
            .set_default("round", false)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        tracing::debug!(
            rates_url = %settings.rates_url,
            packages = settings.packages.len(),
            "settings loaded"
        );
        Ok(settings)
    }

    /// Builds the starting catalog. Negative prices coerce to zero.
    pub fn catalog(&self) -> PriceCatalog {
        self.packages
            .iter()
            .map(|package| (package.name.clone(), Price::new(package.price)))
            .collect()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rates_url: DEFAULT_RATES_URL.to_string(),
            currencies: DEFAULT_CURRENCIES.to_string(),
            round: false,
            packages: default_packages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_catalog_matches_standard() {
        assert_eq!(Settings::default().catalog(), PriceCatalog::standard());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, r#"currencies = "eur, gbp""#).unwrap();
        writeln!(file, "round = true").unwrap();
        writeln!(file, "[[packages]]").unwrap();
        writeln!(file, r#"name = "basic""#).unwrap();
        writeln!(file, "price = 10.5").unwrap();
        writeln!(file, "[[packages]]").unwrap();
        writeln!(file, r#"name = "refund""#).unwrap();
        writeln!(file, "price = -4").unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.currencies, "eur, gbp");
        assert!(settings.round);
        assert_eq!(settings.rates_url, DEFAULT_RATES_URL);

        let catalog = settings.catalog();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["basic", "refund"]);
        assert_eq!(catalog.get("basic").unwrap().value(), dec!(10.5));
        assert_eq!(catalog.get("refund"), Some(Price::ZERO));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("does/not/exist.toml"))).is_err());
    }
}
