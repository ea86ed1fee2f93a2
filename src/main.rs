use asset_register::ThemeChoice;
use asset_register::core::config::{self, CliOverrides, RegisterConfig};
use asset_register::core::seed;
use asset_register::core::state::App;
use asset_register::platform::preferences::{self, open_default_store};
use asset_register::platform::print::SystemPrintHost;
use asset_register::tui::{self, Services};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "asset-register", about = "Durable asset register with printable reports")]
struct Args {
    /// Records per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Colour theme for this run (overrides the stored preference)
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Start with an empty register instead of the sample records
    #[arg(long)]
    no_seed: bool,

    /// Read configuration from this file instead of ~/.asset-register/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, config_error) = match config::load_config(args.config.as_deref()) {
        Ok(c) => (c, None),
        Err(e) => (RegisterConfig::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            page_size: args.page_size,
            theme: args.theme.map(Into::into),
            no_seed: args.no_seed,
        },
    );

    // Initialize file logger - writes to asset-register.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = resolved
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::Debug);
    if let Ok(log_file) = File::create("asset-register.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring configuration file: {}", e);
    }

    log::info!(
        "Asset register starting up (page_size={}, seed={})",
        resolved.page_size,
        resolved.seed_sample_data
    );

    let prefs = open_default_store();
    let theme = resolved
        .theme_override
        .unwrap_or_else(|| preferences::load_theme(prefs.as_ref()));

    let records = if resolved.seed_sample_data {
        seed::sample_records()
    } else {
        Vec::new()
    };
    let app = App::from_config(&resolved, theme, records);

    let print_host = SystemPrintHost::new(resolved.print.command.clone())?;

    tui::run(
        app,
        Services {
            print_host: Arc::new(print_host),
            print_settings: resolved.print.clone(),
            preferences: prefs,
        },
    )
}
