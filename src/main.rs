use anyhow::{Context, Result};
use clap::Parser;
use labterm::app::{App, Services};
use labterm::config::Config;
use labterm::services::LabWorkspace;
use ratatui::layout::Rect;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Work through shell-scripting labs: script and requirement side by side
#[derive(Parser, Debug)]
#[command(name = "labterm")]
#[command(version)]
struct Args {
    /// Student work directory containing student.json
    workdir: PathBuf,

    /// Lab to open (defaults to the first one listed in student.json)
    #[arg(long, value_name = "NAME")]
    lab: Option<String>,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long, value_name = "PATH", default_value = "/tmp/labterm.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::sync::Mutex::new(log_file))
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("labterm=info")))
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::load_or_default();
    };
    match Config::load_from_file(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config from {}: {}, using defaults", path.display(), e);
            Config::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;
    tracing::info!("labterm starting in {}", args.workdir.display());

    let config = load_config(args.config.as_deref());
    let workspace = LabWorkspace::open(&args.workdir, &config.lab)
        .with_context(|| format!("opening work directory {}", args.workdir.display()))?;

    let lab = match args.lab {
        Some(lab) => lab,
        None => workspace
            .labs()
            .first()
            .cloned()
            .context("student.json lists no labs")?,
    };

    let services = Services::from_config(&config, &workspace);
    let terminal = ratatui::try_init().context("initializing terminal")?;
    let size = match terminal.size() {
        Ok(size) => size,
        Err(e) => {
            ratatui::restore();
            return Err(e).context("reading terminal size");
        }
    };

    let mut app = App::new(
        &config,
        workspace,
        &lab,
        services,
        Rect::new(0, 0, size.width, size.height),
    );
    let result = app.run(terminal);
    ratatui::restore();

    if let Err(e) = &result {
        tracing::error!("labterm exited with error: {:#}", e);
    } else {
        tracing::info!("labterm exiting");
    }
    result
}
