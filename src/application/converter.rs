use crate::domain::catalog::{Price, PriceCatalog};
use crate::domain::conversion::{ConversionResult, Rounding, convert};
use crate::domain::currency::{DEFAULT_CURRENCIES, parse_currency_list};
use crate::domain::ports::{Clipboard, RateSource, RateSourceBox};
use crate::error::{ConverterError, Result};
use crate::interfaces::json::result_writer::render;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Where the converter is in its convert cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionStatus {
    #[default]
    Idle,
    Converting,
    Succeeded,
    Failed,
}

/// Everything the converter owns, in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterState {
    pub catalog: PriceCatalog,
    /// Raw text of the target currency field.
    pub currencies: String,
    pub round_numbers: bool,
    pub status: ConversionStatus,
    /// Last successful result. A later failure does not clear it.
    pub result: Option<ConversionResult>,
    /// Message of the most recent failure, cleared when a conversion starts.
    pub error: Option<String>,
}

impl ConverterState {
    pub fn new(catalog: PriceCatalog, currencies: impl Into<String>, round_numbers: bool) -> Self {
        Self {
            catalog,
            currencies: currencies.into(),
            round_numbers,
            status: ConversionStatus::Idle,
            result: None,
            error: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.status == ConversionStatus::Converting
    }
}

impl Default for ConverterState {
    fn default() -> Self {
        Self::new(PriceCatalog::standard(), DEFAULT_CURRENCIES, false)
    }
}

/// Controller for the pricing converter.
///
/// Edits and conversions go through `&self`; the state sits behind an async
/// `RwLock` that is never held across the rate fetch, so the catalog stays
/// editable while a conversion is in flight. Only one conversion runs at a
/// time: a second request made while one is pending fails with
/// [`ConverterError::Busy`].
pub struct PricingConverter {
    state: Arc<RwLock<ConverterState>>,
    rates: Arc<dyn RateSource>,
}

impl PricingConverter {
    /// Creates a converter with the standard catalog and currency list.
    pub fn new(rates: RateSourceBox) -> Self {
        Self::with_state(rates, ConverterState::default())
    }

    pub fn with_state(rates: RateSourceBox, state: ConverterState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            rates: Arc::from(rates),
        }
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> ConverterState {
        self.state.read().await.clone()
    }

    pub async fn catalog(&self) -> PriceCatalog {
        self.state.read().await.catalog.clone()
    }

    pub async fn set_price(&self, name: &str, raw: &str) -> Price {
        self.state.write().await.catalog.set_price(name, raw)
    }

    pub async fn add_package(&self, name: &str) -> bool {
        let added = self.state.write().await.catalog.add_entry(name);
        if !added {
            tracing::debug!(package = name, "package name empty or already present");
        }
        added
    }

    pub async fn remove_package(&self, name: &str) -> bool {
        self.state.write().await.catalog.remove_entry(name)
    }

    pub async fn set_currencies(&self, raw: impl Into<String>) {
        self.state.write().await.currencies = raw.into();
    }

    pub async fn set_round_numbers(&self, round_numbers: bool) {
        self.state.write().await.round_numbers = round_numbers;
    }

    /// Runs one conversion and records its outcome.
    ///
    /// Catalog, currency text and rounding flag are captured when the call
    /// starts. The work runs on a spawned task: dropping the returned future
    /// does not abort it, and its outcome still lands in the state.
    pub async fn convert(&self) -> Result<ConversionResult> {
        let (catalog, currencies, rounding) = {
            let mut state = self.state.write().await;
            if state.is_busy() {
                tracing::warn!("conversion requested while another is in progress");
                return Err(ConverterError::Busy);
            }
            state.status = ConversionStatus::Converting;
            state.error = None;
            (
                state.catalog.clone(),
                state.currencies.clone(),
                Rounding::from_flag(state.round_numbers),
            )
        };

        let state = Arc::clone(&self.state);
        let rates = Arc::clone(&self.rates);
        let task = tokio::spawn(async move {
            let outcome = run_conversion(rates, &catalog, &currencies, rounding).await;
            record_outcome(&state, &outcome).await;
            outcome
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                let outcome = Err(ConverterError::Unexpected(join_err.to_string()));
                record_outcome(&self.state, &outcome).await;
                outcome
            }
        }
    }

    /// The last successful result as indented JSON, if there is one.
    pub async fn rendered_result(&self) -> Result<Option<String>> {
        let state = self.state.read().await;
        state.result.as_ref().map(render).transpose()
    }

    /// Writes the last successful result to `clipboard`.
    ///
    /// Returns `false` when there is nothing to copy yet.
    pub async fn copy_result(&self, clipboard: &mut dyn Clipboard) -> Result<bool> {
        let Some(text) = self.rendered_result().await? else {
            return Ok(false);
        };
        clipboard.write_text(&text)?;
        tracing::info!(bytes = text.len(), "result copied to clipboard");
        Ok(true)
    }
}

async fn run_conversion(
    rates: Arc<dyn RateSource>,
    catalog: &PriceCatalog,
    raw_currencies: &str,
    rounding: Rounding,
) -> Result<ConversionResult> {
    let currencies = parse_currency_list(raw_currencies);
    if currencies.is_empty() {
        return Err(ConverterError::EmptyCurrencyList);
    }

    tracing::info!(
        currencies = currencies.len(),
        packages = catalog.len(),
        ?rounding,
        "converting prices"
    );

    // A panicking rate source must not leave the converter stuck in Converting.
    let table = tokio::spawn(async move { rates.latest_rates().await })
        .await
        .map_err(|e| ConverterError::Unexpected(e.to_string()))??;

    convert(catalog, &currencies, &table, rounding)
}

async fn record_outcome(state: &RwLock<ConverterState>, outcome: &Result<ConversionResult>) {
    let mut state = state.write().await;
    match outcome {
        Ok(result) => {
            tracing::info!(currencies = result.len(), "conversion succeeded");
            state.result = Some(result.clone());
            state.error = None;
            state.status = ConversionStatus::Succeeded;
        }
        Err(err) => {
            tracing::warn!(error = %err, "conversion failed");
            state.error = Some(err.to_string());
            state.status = ConversionStatus::Failed;
        }
    }
}
