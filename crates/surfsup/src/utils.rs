use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::LevelFilter;
use std::env;
use surfsup_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_DATABASE_PATH, DEFAULT_LOOKBACK_DAYS,
    DEFAULT_PORT, DEFAULT_REFERENCE_DATE, DEFAULT_STATION_ID,
};
use time::{format_description::well_known::Iso8601, OffsetDateTime};

use crate::AppSettings;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "SurfsUp - read-only climate API over the Hawaii weather station dataset"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $SURFSUP_CONFIG, ./surfsup.toml,
    /// $XDG_CONFIG_HOME/surfsup/surfsup.toml, /etc/surfsup/surfsup.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "SURFSUP_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(short, long, env = "SURFSUP_HOST")]
    #[serde(alias = "host")]
    pub domain: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SURFSUP_PORT")]
    pub port: Option<u16>,

    /// Path to the climate SQLite file (opened read-only)
    #[arg(long, env = "SURFSUP_DATABASE")]
    pub database: Option<String>,

    /// Maximum number of pooled read connections
    #[arg(long, env = "SURFSUP_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Last date present in the dataset (YYYY-MM-DD)
    #[arg(long, env = "SURFSUP_REFERENCE_DATE")]
    pub reference_date: Option<String>,

    /// Days before the reference date included in "last year" queries
    #[arg(long, env = "SURFSUP_LOOKBACK_DAYS")]
    pub lookback_days: Option<u32>,

    /// Station reported by /api/v1.0/tobs
    #[arg(short, long, env = "SURFSUP_STATION")]
    pub station: Option<String>,
}

impl Cli {
    pub fn host(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn database(&self) -> String {
        self.database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string())
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    pub fn reference_date(&self) -> String {
        self.reference_date
            .clone()
            .unwrap_or_else(|| DEFAULT_REFERENCE_DATE.to_string())
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days.unwrap_or(DEFAULT_LOOKBACK_DAYS)
    }

    pub fn station(&self) -> String {
        self.station
            .clone()
            .unwrap_or_else(|| DEFAULT_STATION_ID.to_string())
    }

    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database: self.database(),
            max_connections: self.max_connections(),
            reference_date: self.reference_date(),
            lookback_days: self.lookback_days(),
            station_id: self.station(),
        }
    }

    /// Fill any value not given on the command line or environment from `file`
    pub fn merge(self, file: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file.level),
            domain: self.domain.or(file.domain),
            port: self.port.or(file.port),
            database: self.database.or(file.database),
            max_connections: self.max_connections.or(file.max_connections),
            reference_date: self.reference_date.or(file.reference_date),
            lookback_days: self.lookback_days.or(file.lookback_days),
            station: self.station.or(file.station),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("SURFSUP_CONFIG", "surfsup.toml")
    };

    // The logger is not installed yet, so report problems on stderr
    let file_config: Cli = match load_config(&source) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ignoring config file {}: {:#}", source, e);
            Cli::default()
        }
    };

    cli_args.merge(file_config)
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let timestamp = OffsetDateTime::now_utc()
                .format(&Iso8601::DEFAULT)
                .unwrap_or_default();
            out.finish(format_args!(
                "[{} {}] {}: {}",
                timestamp,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
