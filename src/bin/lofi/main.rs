//! lofi - generative lo-fi music in the terminal
//!
//! Run with: cargo run --bin lofi -- --seed 42

mod ui;

use std::fs::{self, File};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use log::warn;

use lofi_engine::{Engine, EngineConfig};
use ui::App;

#[derive(Debug, Parser)]
#[command(name = "lofi", about = "Seed-driven generative lo-fi music")]
struct Args {
    /// Seed for the composition; wall-clock time when omitted
    #[arg(long)]
    seed: Option<String>,

    /// JSON file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, default_value = "lofi.log")]
    log_file: PathBuf,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(&args.log_file);

    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
            EngineConfig::from_json(&text)
                .wrap_err_with(|| format!("invalid config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(text) = &args.seed {
        match text.trim().parse::<u64>() {
            Ok(seed) => config.seed = Some(seed),
            Err(_) => warn!("ignoring non-numeric seed {text:?}"),
        }
    }
    if config.settings_path.is_none() {
        config.settings_path = Some(default_settings_path());
    }

    let mut engine = Engine::new(config).wrap_err("failed to open audio output")?;

    let mut terminal = ratatui::init();
    let result = App::new(&mut engine).run(&mut terminal);
    ratatui::restore();

    engine.cleanup();
    result
}

fn init_logging(path: &PathBuf) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // Nowhere to write without corrupting the UI.
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn default_settings_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".config/lofi_engine/settings.json"))
        .unwrap_or_else(|| PathBuf::from("lofi_settings.json"))
}
