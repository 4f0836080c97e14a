use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, WriteLogger};
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use tickbox::core::config::{self, DatabaseTarget, ResolvedConfig};
use tickbox::core::todo::Todo;
use tickbox::storage::{self, StorageError, TodoStore};
use tickbox::tui;

#[derive(Parser)]
#[command(name = "tickbox", about = "Terminal todo list backed by a database table")]
struct Args {
    /// Database URL (mysql://... or sqlite:...), overrides config and env
    #[arg(long)]
    database_url: Option<String>,

    /// Config file to use instead of ~/.tickbox/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

// Single-threaded: storage calls block the loop exactly like the key reads do
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => return startup_failure("Could not read the tickbox config.", &e),
    };
    let config = config::resolve(&file_config, args.database_url.as_deref());
    init_logging(&config);

    info!("tickbox starting up (log level {})", config.log_level);

    println!("Connecting to the database, please wait...");
    let (store, items) = match load_or_exit(&config.database, |e| {
        startup_failure("Could not reach the todo database.", e)
    })
    .await
    {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    info!("Loaded {} todos from {} store", items.len(), store.name());

    match tui::run(store.as_ref(), items).await {
        Ok(()) => {
            info!("tickbox exiting normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Terminal error: {}", e);
            eprintln!("Terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// File logger - the terminal belongs to the TUI, so nothing goes to stderr.
fn init_logging(config: &ResolvedConfig) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
}

async fn connect_and_load(
    target: &DatabaseTarget,
) -> Result<(Box<dyn TodoStore>, Vec<Todo>), StorageError> {
    let store = storage::open(target).await?;
    let items = store.load_all().await?;
    Ok((store, items))
}

/// Open the store and load every todo. A failure is handed to `on_failure`,
/// whose exit code becomes the process exit code.
async fn load_or_exit<F>(
    target: &DatabaseTarget,
    on_failure: F,
) -> Result<(Box<dyn TodoStore>, Vec<Todo>), ExitCode>
where
    F: FnOnce(&StorageError) -> ExitCode,
{
    connect_and_load(target).await.map_err(|e| on_failure(&e))
}

fn startup_failure(headline: &str, e: &dyn Error) -> ExitCode {
    error!("Startup failed: {}", e);
    eprintln!("{headline}");
    eprintln!("Error: {e}");
    eprintln!("Press any key to exit...");
    if let Err(e) = tui::wait_for_key() {
        error!("Failed to read key: {}", e);
    }
    ExitCode::FAILURE
}
