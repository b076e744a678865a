use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppEnv {
    Local,
    Dev,
    Test,
    Prod,
}

impl AppEnv {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Prod => "prod",
        }
    }
}

impl std::str::FromStr for AppEnv {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "dev" | "development" => Ok(Self::Dev),
            "test" => Ok(Self::Test),
            "prod" | "production" => Ok(Self::Prod),
            other => Err(ConfigError::InvalidEnv(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSection,
    pub observability: ObservabilitySection,
    pub table: TableSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSection {
    pub env: AppEnv,
    pub service_name: String,
    pub ops_http_bind_addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilitySection {
    pub log_filter: String,
}

/// Game tuning for every table created by this process. Tables copy the
/// section at creation; edits never affect hands already running.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableSection {
    pub min_players: usize,
    pub max_players: usize,
    pub small_blind: u64,
    pub big_blind: u64,
    pub min_buy_in: u64,
    pub max_buy_in: u64,
    pub default_buy_in: u64,
    pub turn_timer_ms: u64,
    pub time_bank_seconds: u32,
    pub hand_start_delay_ms: u64,
    pub showdown_delay_ms: u64,
    pub sit_out_auto_remove_ms: u64,
    pub max_hand_history: usize,
    pub elo_k_factor: f64,
    pub default_elo: f64,
}

impl Default for TableSection {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 9,
            small_blind: 1,
            big_blind: 2,
            min_buy_in: 40,
            max_buy_in: 400,
            default_buy_in: 200,
            turn_timer_ms: 15_000,
            time_bank_seconds: 30,
            hand_start_delay_ms: 3_000,
            showdown_delay_ms: 2_000,
            sit_out_auto_remove_ms: 600_000,
            max_hand_history: 100,
            elo_k_factor: 32.0,
            default_elo: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
}

impl<T> ResponseEnvelope<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub fn err(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(ErrorBody {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidName,
    InvalidBuyIn,
    DuplicateName,
    TableFull,
    UnknownPlayer,
    UnknownTable,
    NoActiveHand,
    NotYourTurn,
    IllegalAction,
    IllegalState,
    ExceedsMaxBuyIn,
    InternalError,
}

impl ErrorCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidBuyIn => "INVALID_BUY_IN",
            Self::DuplicateName => "DUPLICATE_NAME",
            Self::TableFull => "TABLE_FULL",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::UnknownTable => "UNKNOWN_TABLE",
            Self::NoActiveHand => "NO_ACTIVE_HAND",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::IllegalAction => "ILLEGAL_ACTION",
            Self::IllegalState => "ILLEGAL_STATE",
            Self::ExceedsMaxBuyIn => "EXCEEDS_MAX_BUY_IN",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid APP_ENV value: {0}")]
    InvalidEnv(String),
    #[error("unable to locate config directory (expected config/default.toml)")]
    ConfigDirNotFound,
    #[error("failed reading config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed parsing config file {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct PartialAppConfig {
    app: Option<PartialAppSection>,
    observability: Option<PartialObservabilitySection>,
    table: Option<PartialTableSection>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialAppSection {
    env: Option<AppEnv>,
    service_name: Option<String>,
    ops_http_bind_addr: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialObservabilitySection {
    log_filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialTableSection {
    min_players: Option<usize>,
    max_players: Option<usize>,
    small_blind: Option<u64>,
    big_blind: Option<u64>,
    min_buy_in: Option<u64>,
    max_buy_in: Option<u64>,
    default_buy_in: Option<u64>,
    turn_timer_ms: Option<u64>,
    time_bank_seconds: Option<u32>,
    hand_start_delay_ms: Option<u64>,
    showdown_delay_ms: Option<u64>,
    sit_out_auto_remove_ms: Option<u64>,
    max_hand_history: Option<usize>,
    elo_k_factor: Option<f64>,
    default_elo: Option<f64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV")
            .ok()
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or(AppEnv::Local);
        let config_dir = resolve_config_dir()?;
        Self::load_from_dir_for_env(config_dir, app_env)
    }

    pub fn load_from_dir_for_env(
        config_dir: impl AsRef<Path>,
        app_env: AppEnv,
    ) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let mut config = Self::default_for_env(app_env);
        merge_file(&mut config, &config_dir.join("default.toml"))?;
        let env_file = config_dir.join(format!("{}.toml", app_env.as_str()));
        if env_file.exists() {
            merge_file(&mut config, &env_file)?;
        }
        config.app.env = app_env;
        config.apply_env_overrides()?;
        Ok(config)
    }

    #[must_use]
    pub fn default_for_env(app_env: AppEnv) -> Self {
        Self {
            app: AppSection {
                env: app_env,
                service_name: "app-server".to_string(),
                ops_http_bind_addr: "127.0.0.1:9100".to_string(),
            },
            observability: ObservabilitySection {
                log_filter: "info".to_string(),
            },
            table: TableSection::default(),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(raw_env) = env::var("APP_ENV") {
            self.app.env = raw_env.parse()?;
        }
        if let Ok(service_name) = env::var("APP_SERVER__SERVICE_NAME") {
            self.app.service_name = service_name;
        }
        if let Ok(bind_addr) = env::var("APP_SERVER__OPS_HTTP_BIND_ADDR") {
            self.app.ops_http_bind_addr = bind_addr;
        }
        if let Ok(log_filter) = env::var("OBSERVABILITY__LOG_FILTER") {
            self.observability.log_filter = log_filter;
        } else if let Ok(log_filter) = env::var("RUST_LOG") {
            self.observability.log_filter = log_filter;
        }
        Ok(())
    }

    fn merge_partial(&mut self, partial: PartialAppConfig) {
        if let Some(app) = partial.app {
            if let Some(value) = app.env {
                self.app.env = value;
            }
            if let Some(value) = app.service_name {
                self.app.service_name = value;
            }
            if let Some(value) = app.ops_http_bind_addr {
                self.app.ops_http_bind_addr = value;
            }
        }
        if let Some(observability) = partial.observability {
            if let Some(value) = observability.log_filter {
                self.observability.log_filter = value;
            }
        }
        if let Some(table) = partial.table {
            merge_table_section(&mut self.table, table);
        }
    }
}

fn merge_table_section(section: &mut TableSection, partial: PartialTableSection) {
    macro_rules! take {
        ($field:ident) => {
            if let Some(value) = partial.$field {
                section.$field = value;
            }
        };
    }
    take!(min_players);
    take!(max_players);
    take!(small_blind);
    take!(big_blind);
    take!(min_buy_in);
    take!(max_buy_in);
    take!(default_buy_in);
    take!(turn_timer_ms);
    take!(time_bank_seconds);
    take!(hand_start_delay_ms);
    take!(showdown_delay_ms);
    take!(sit_out_auto_remove_ms);
    take!(max_hand_history);
    take!(elo_k_factor);
    take!(default_elo);
}

fn merge_file(config: &mut AppConfig, path: &Path) -> Result<(), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let partial =
        toml::from_str::<PartialAppConfig>(&content).map_err(|source| ConfigError::ParseToml {
            path: path.display().to_string(),
            source,
        })?;
    config.merge_partial(partial);
    Ok(())
}

fn resolve_config_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(path) = env::var("HOLDEM_CONFIG_DIR") {
        return Ok(PathBuf::from(path));
    }

    let mut current_dir = env::current_dir().map_err(|_| ConfigError::ConfigDirNotFound)?;
    loop {
        let candidate = current_dir.join("config");
        if candidate.join("default.toml").exists() {
            return Ok(candidate);
        }
        if !current_dir.pop() {
            break;
        }
    }

    Err(ConfigError::ConfigDirNotFound)
}
