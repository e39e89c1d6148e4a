//! Session Keeper verification CLI
//!
//! Runs the headless-browser smoke test against the target application and
//! writes the screenshot artifact. A plain `sk-verify` with no arguments
//! reproduces the manual verification pass exactly.

use clap::Parser;
use session_keeper_verify::browser::navigation::DEFAULT_TEXT_TIMEOUT_MS;
use session_keeper_verify::runner::{self, VerificationRunner, VerifyOptions};
use std::path::PathBuf;

/// Session Keeper modal verification
#[derive(Parser, Debug)]
#[command(name = "sk-verify")]
#[command(version)]
#[command(about = "Headless-browser smoke test for the Session Keeper settings modal")]
struct Args {
    /// Target application URL
    #[arg(long, default_value = runner::DEFAULT_URL)]
    url: String,

    /// localStorage key for the injected credential
    #[arg(long, default_value = runner::DEFAULT_STORAGE_KEY)]
    storage_key: String,

    /// Injected credential value
    #[arg(long, default_value = runner::DEFAULT_STORAGE_VALUE)]
    storage_value: String,

    /// Selector for the control that opens the modal
    #[arg(long, default_value = runner::DEFAULT_SELECTOR)]
    selector: String,

    /// Text fragment expected inside the modal
    #[arg(long, default_value = runner::DEFAULT_MODAL_TEXT)]
    modal_text: String,

    /// Screenshot path on success
    #[arg(long, default_value = runner::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Screenshot path on failure
    #[arg(long, default_value = runner::DEFAULT_ERROR_OUTPUT)]
    error_output: PathBuf,

    /// Bound for the element-visibility wait, in milliseconds
    #[arg(long, default_value_t = runner::DEFAULT_ELEMENT_TIMEOUT_MS)]
    element_timeout_ms: u64,

    /// Bound for the modal-text wait, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TEXT_TIMEOUT_MS)]
    text_timeout_ms: u64,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<String>,

    /// Run Chrome without its sandbox (containers/CI)
    #[arg(long)]
    no_sandbox: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_options(self) -> VerifyOptions {
        VerifyOptions {
            url: self.url,
            storage_key: self.storage_key,
            storage_value: self.storage_value,
            selector: self.selector,
            modal_text: self.modal_text,
            output: self.output,
            error_output: self.error_output,
            element_timeout_ms: self.element_timeout_ms,
            text_timeout_ms: self.text_timeout_ms,
            chrome_path: self.chrome_path,
            sandbox: !self.no_sandbox,
            ..VerifyOptions::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let options = args.into_options();
    tracing::info!("Verifying Session Keeper modal at {}", options.url);

    let outcome = VerificationRunner::run(&options).await;
    println!("{}", outcome.status_line());
    // Both outcomes exit 0; the status line is the result
    Ok(())
}
