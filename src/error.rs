use miette::Diagnostic;
use thiserror::Error;

/// Fallback message for failures that carry no text of their own.
pub const GENERIC_CONVERSION_MESSAGE: &str = "An error occurred during conversion";

#[derive(Error, Diagnostic, Debug)]
pub enum ConverterError {
    #[error("Please enter at least one target currency")]
    #[diagnostic(
        code(price_converter::empty_currency_list),
        help("pass a comma-separated list such as \"EUR, GBP\"")
    )]
    EmptyCurrencyList,
    #[error("Failed to fetch exchange rates: {0}")]
    #[diagnostic(code(price_converter::rate_fetch))]
    RateFetch(String),
    #[error("Converted price of `{package}` in {currency} is out of range")]
    #[diagnostic(
        code(price_converter::price_out_of_range),
        help("lower the package price; the product exceeds the supported decimal range")
    )]
    PriceOutOfRange { package: String, currency: String },
    #[error("A conversion is already in progress")]
    Busy,
    #[error("Clipboard error: {0}")]
    Clipboard(String),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{}", unexpected_message(.0))]
    Unexpected(String),
}

fn unexpected_message(message: &str) -> &str {
    if message.is_empty() {
        GENERIC_CONVERSION_MESSAGE
    } else {
        message
    }
}

impl From<reqwest::Error> for ConverterError {
    fn from(err: reqwest::Error) -> Self {
        Self::RateFetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConverterError>;
