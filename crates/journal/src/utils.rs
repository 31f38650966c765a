use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use log::{warn, LevelFilter};
use std::{env, time::Duration};
use time::{format_description::well_known::Iso8601, OffsetDateTime};
use weather_journal_core::{
    find_config_file, get_xdg_data_dir, load_config, path_exists, ConfigSource,
    DEFAULT_CONFIG_FILE, DEFAULT_JOURNAL_PORT,
};
use weather_sources::{DateMatch, SourcesConfig};

pub use weather_journal_core::create_dir_all;

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "Weather Journal - look up a day of weather for a place and keep it"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $WEATHER_JOURNAL_CONFIG, ./journal.toml,
    /// $XDG_CONFIG_HOME/weather-journal/journal.toml, /etc/weather-journal/journal.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "WEATHER_JOURNAL_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(short, long, env = "WEATHER_JOURNAL_HOST")]
    #[serde(alias = "host")]
    pub domain: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "WEATHER_JOURNAL_PORT")]
    pub port: Option<String>,

    /// Directory holding weather_journal.sqlite
    #[arg(long, env = "WEATHER_JOURNAL_DATABASE_DIR")]
    pub database_dir: Option<String>,

    /// Directory containing UI static files
    #[arg(short, long, env = "WEATHER_JOURNAL_UI_DIR")]
    pub ui_dir: Option<String>,

    /// Open-Meteo geocoding search endpoint
    #[arg(long, env = "WEATHER_JOURNAL_GEOCODING_URL")]
    pub geocoding_url: Option<String>,

    /// Open-Meteo forecast endpoint
    #[arg(long, env = "WEATHER_JOURNAL_FORECAST_URL")]
    pub forecast_url: Option<String>,

    /// Open-Meteo historical archive endpoint
    #[arg(long, env = "WEATHER_JOURNAL_ARCHIVE_URL")]
    pub archive_url: Option<String>,

    /// User-Agent sent upstream
    #[arg(long, env = "WEATHER_JOURNAL_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Geocoding request timeout in seconds
    #[arg(long, env = "WEATHER_JOURNAL_GEOCODING_TIMEOUT")]
    pub geocoding_timeout: Option<u64>,

    /// Forecast/archive request timeout in seconds
    #[arg(long, env = "WEATHER_JOURNAL_WEATHER_TIMEOUT")]
    pub weather_timeout: Option<u64>,

    /// Fail instead of reading the first entry when upstream omits the requested date
    #[arg(long, env = "WEATHER_JOURNAL_STRICT_DATES")]
    pub strict_dates: Option<bool>,
}

impl Cli {
    pub fn host(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_JOURNAL_PORT.to_string())
    }

    pub fn database_dir(&self) -> String {
        self.database_dir
            .clone()
            .unwrap_or_else(|| get_xdg_data_dir().to_string_lossy().into_owned())
    }

    pub fn static_dir(&self) -> String {
        let dir = self
            .ui_dir
            .clone()
            .unwrap_or_else(|| "./static".to_string());
        if !path_exists(&dir) {
            warn!("UI directory {} does not exist, /static will 404", dir);
        }
        dir
    }

    /// Upstream settings for the weather core, defaults filled in
    pub fn sources_config(&self) -> SourcesConfig {
        let mut config = SourcesConfig::default();
        if let Some(url) = &self.geocoding_url {
            config.geocoding_url = url.clone();
        }
        if let Some(url) = &self.forecast_url {
            config.forecast_url = url.clone();
        }
        if let Some(url) = &self.archive_url {
            config.archive_url = url.clone();
        }
        if let Some(agent) = &self.user_agent {
            config.user_agent = agent.clone();
        }
        if let Some(secs) = self.geocoding_timeout {
            config.geocoding_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.weather_timeout {
            config.weather_timeout = Duration::from_secs(secs);
        }
        if self.strict_dates.unwrap_or(false) {
            config.date_match = DateMatch::Strict;
        }
        config
    }

    /// CLI args (and env, handled by clap) override the file
    pub fn merge(self, file_config: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file_config.level),
            domain: self.domain.or(file_config.domain),
            port: self.port.or(file_config.port),
            database_dir: self.database_dir.or(file_config.database_dir),
            ui_dir: self.ui_dir.or(file_config.ui_dir),
            geocoding_url: self.geocoding_url.or(file_config.geocoding_url),
            forecast_url: self.forecast_url.or(file_config.forecast_url),
            archive_url: self.archive_url.or(file_config.archive_url),
            user_agent: self.user_agent.or(file_config.user_agent),
            geocoding_timeout: self.geocoding_timeout.or(file_config.geocoding_timeout),
            weather_timeout: self.weather_timeout.or(file_config.weather_timeout),
            strict_dates: self.strict_dates.or(file_config.strict_dates),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("WEATHER_JOURNAL_CONFIG", DEFAULT_CONFIG_FILE)
    };

    // The logger is not installed yet, so this goes straight to stderr
    if let Some(path) = source.path() {
        eprintln!("Loading config from: {}", path.display());
    }

    let file_config: Cli = load_config(&source).unwrap_or_else(|e| {
        eprintln!("Ignoring config from {}: {}", source, e);
        Cli::default()
    });

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
            out.finish(format_args!(
                "[{} {}] {}: {}",
                OffsetDateTime::now_utc()
                    .format(&Iso8601::DEFAULT)
                    .unwrap_or_default(),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}
