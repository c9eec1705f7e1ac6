use clap::Parser;
use miette::{IntoDiagnostic, Result};
use price_converter::application::converter::{ConverterState, PricingConverter};
use price_converter::config::Settings;
use price_converter::domain::ports::ClipboardBox;
use price_converter::infrastructure::clipboard::SystemClipboard;
use price_converter::infrastructure::http::ExchangeRateApi;
use price_converter::interfaces::json::result_writer::ResultWriter;
use price_converter::logging::init_tracing;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated target currencies, e.g. "EUR, GBP"
    #[arg(long)]
    currencies: Option<String>,

    /// Round converted prices to whole numbers instead of cents
    #[arg(long)]
    round: bool,

    /// Latest-rates endpoint; "/USD" is appended
    #[arg(long)]
    rates_url: Option<String>,

    /// Add a package priced at zero (repeatable)
    #[arg(long = "add", value_name = "NAME")]
    add: Vec<String>,

    /// Set a package price (repeatable). Invalid numbers become 0.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Remove a package (repeatable)
    #[arg(long = "remove", value_name = "NAME")]
    remove: Vec<String>,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Copy the result to the system clipboard
    #[arg(long)]
    copy: bool,
}

fn parse_assignment(raw: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    Ok((name.trim().to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let settings = Settings::load(cli.config.as_deref())?;
    let rates_url = cli.rates_url.unwrap_or_else(|| settings.rates_url.clone());
    let currencies = cli.currencies.unwrap_or_else(|| settings.currencies.clone());
    let state = ConverterState::new(settings.catalog(), currencies, settings.round || cli.round);

    let converter = PricingConverter::with_state(Box::new(ExchangeRateApi::new(rates_url)), state);

    for name in &cli.add {
        if !converter.add_package(name).await {
            tracing::warn!(package = %name, "package not added: name empty or already present");
        }
    }
    for (name, value) in &cli.set {
        converter.set_price(name, value).await;
    }
    for name in &cli.remove {
        if !converter.remove_package(name).await {
            tracing::warn!(package = %name, "package not removed: not in catalog");
        }
    }

    let result = converter.convert().await?;

    match cli.output {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            ResultWriter::new(file).write_result(&result)?;
        }
        None => {
            let stdout = io::stdout();
            ResultWriter::new(stdout.lock()).write_result(&result)?;
        }
    }

    if cli.copy {
        let mut clipboard: ClipboardBox = Box::new(SystemClipboard::new()?);
        if converter.copy_result(clipboard.as_mut()).await? {
            eprintln!("Copied to clipboard!");
            if SystemClipboard::held_by_process() {
                hold_clipboard().await.into_diagnostic()?;
            }
        }
    }

    Ok(())
}

/// Keeps the process, and with it the X11 selection, alive until the user
/// presses Enter. Without a terminal there is nobody to wait for.
async fn hold_clipboard() -> io::Result<()> {
    if !io::stdin().is_terminal() {
        tracing::warn!(
            "clipboard contents are served by this process and are lost on exit \
             unless a clipboard manager takes them over"
        );
        return Ok(());
    }

    eprintln!("Press Enter once you have pasted (the clipboard is released on exit)...");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(())
}
