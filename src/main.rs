//! afs-notify binary - terminal display for AFS node event notifications.
//!
//! Entry point only; the moving parts live in the `afs_notify` library.

use afs_notify::env::Environment;
use afs_notify::{tui, Config, NotificationClient};
use anyhow::Result;
use mimalloc::MiMalloc;

/// mimalloc as the global allocator.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Set by signal handlers, polled by the display loop each frame.
static SHUTDOWN_FLAG: std::sync::LazyLock<Arc<AtomicBool>> =
    std::sync::LazyLock::new(|| Arc::new(AtomicBool::new(false)));

#[derive(Parser)]
#[command(name = "afs-notify")]
#[command(version = VERSION)]
#[command(about = "Terminal display for AFS node event notifications")]
struct Cli {
    /// Server base URL (overrides config file and AFS_NOTIFY_SERVER_URL)
    #[arg(long)]
    server_url: Option<String>,
}

fn register_signal_handlers() -> Result<()> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::flag;

    flag::register(SIGINT, Arc::clone(&SHUTDOWN_FLAG))?;
    flag::register(SIGTERM, Arc::clone(&SHUTDOWN_FLAG))?;
    flag::register(SIGHUP, Arc::clone(&SHUTDOWN_FLAG))?;
    Ok(())
}

/// Connect the client, take over the terminal, run the display loop.
fn run(cli: &Cli) -> Result<()> {
    register_signal_handlers()?;

    let mut config = Config::load()?;
    if let Some(url) = &cli.server_url {
        config.server_url = url.clone();
    }

    // Everything that can fail loudly happens before raw mode, while
    // stderr still reaches the user
    println!("Connecting to {}...", config.server_url);
    let client = NotificationClient::new(config)?;
    client.connect();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = tui::TerminalGuard::new();

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    log::info!(
        "afs-notify v{} started ({})",
        VERSION,
        Environment::current()
    );

    let mut runner = tui::TuiRunner::new(terminal, client, Arc::clone(&SHUTDOWN_FLAG));
    runner.run()
}

/// Where log lines go; stdout belongs to the display.
///
/// `AFS_NOTIFY_LOG_FILE` wins, then the config dir override, then `/tmp`.
fn log_file_path() -> PathBuf {
    if let Ok(path) = std::env::var("AFS_NOTIFY_LOG_FILE") {
        return PathBuf::from(path);
    }
    if let Ok(config_dir) = std::env::var("AFS_NOTIFY_CONFIG_DIR") {
        return PathBuf::from(config_dir).join("afs-notify.log");
    }
    PathBuf::from("/tmp/afs-notify.log")
}

fn init_logging() {
    let log_path = log_file_path();
    let log_file = std::fs::File::create(&log_path)
        .unwrap_or_else(|_| panic!("Failed to create log file at {:?}", log_path));

    let default_filter = Environment::current().default_log_filter();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format_timestamp_secs()
        .init();
}

fn main() -> Result<()> {
    init_logging();

    // A panic inside the display loop must not strand the shell in raw
    // mode, and the backtrace should land in the log as well as stderr
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        log::error!("PANIC: {:?}", panic_info);
        tui::TerminalGuard::restore();
        default_hook(panic_info);
    }));

    let cli = Cli::parse();
    run(&cli)
}
