use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranking::{ScoringWeights, DEFAULT_WEIGHTS};
use crate::search::{SearchPolicy, DEFAULT_MAX_SUGGESTIONS, DEFAULT_MIN_QUERY_CHARS};

pub const CONFIG_FILE_NAME: &str = "shortlist.toml";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub ranking: RankingConfig,
    pub search: SearchConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogConfig {
    /// TOML catalog file; the built-in catalog is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct RankingConfig {
    pub rating_weight: f64,
    pub popularity_weight: f64,
    pub discount_weight: f64,
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub min_query_chars: usize,
    pub max_suggestions: usize,
}

#[derive(Clone, Debug)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    /// Digits after the decimal separator in stored prices.
    pub minor_units: u32,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub max_suggestions: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            ranking: RankingConfig {
                rating_weight: DEFAULT_WEIGHTS.rating,
                popularity_weight: DEFAULT_WEIGHTS.popularity,
                discount_weight: DEFAULT_WEIGHTS.discount,
            },
            search: SearchConfig {
                min_query_chars: DEFAULT_MIN_QUERY_CHARS,
                max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            },
            display: DisplayConfig { currency_symbol: "₹".to_string(), minor_units: 0 },
            logging: LoggingConfig { level: "warn".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl RankingConfig {
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            rating: self.rating_weight,
            popularity: self.popularity_weight,
            discount: self.discount_weight,
        }
    }
}

impl SearchConfig {
    pub fn policy(&self) -> SearchPolicy {
        SearchPolicy { min_query_chars: self.min_query_chars, max_suggestions: self.max_suggestions }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
        }

        if let Some(ranking) = patch.ranking {
            if let Some(rating_weight) = ranking.rating_weight {
                self.ranking.rating_weight = rating_weight;
            }
            if let Some(popularity_weight) = ranking.popularity_weight {
                self.ranking.popularity_weight = popularity_weight;
            }
            if let Some(discount_weight) = ranking.discount_weight {
                self.ranking.discount_weight = discount_weight;
            }
        }

        if let Some(search) = patch.search {
            if let Some(min_query_chars) = search.min_query_chars {
                self.search.min_query_chars = min_query_chars;
            }
            if let Some(max_suggestions) = search.max_suggestions {
                self.search.max_suggestions = max_suggestions;
            }
        }

        if let Some(display) = patch.display {
            if let Some(currency_symbol) = display.currency_symbol {
                self.display.currency_symbol = currency_symbol;
            }
            if let Some(minor_units) = display.minor_units {
                self.display.minor_units = minor_units;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("SHORTLIST_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }

        if let Some(value) = read_env("SHORTLIST_RANKING_RATING_WEIGHT") {
            self.ranking.rating_weight = parse_f64("SHORTLIST_RANKING_RATING_WEIGHT", &value)?;
        }
        if let Some(value) = read_env("SHORTLIST_RANKING_POPULARITY_WEIGHT") {
            self.ranking.popularity_weight =
                parse_f64("SHORTLIST_RANKING_POPULARITY_WEIGHT", &value)?;
        }
        if let Some(value) = read_env("SHORTLIST_RANKING_DISCOUNT_WEIGHT") {
            self.ranking.discount_weight = parse_f64("SHORTLIST_RANKING_DISCOUNT_WEIGHT", &value)?;
        }

        if let Some(value) = read_env("SHORTLIST_SEARCH_MIN_QUERY_CHARS") {
            self.search.min_query_chars = parse_usize("SHORTLIST_SEARCH_MIN_QUERY_CHARS", &value)?;
        }
        if let Some(value) = read_env("SHORTLIST_SEARCH_MAX_SUGGESTIONS") {
            self.search.max_suggestions = parse_usize("SHORTLIST_SEARCH_MAX_SUGGESTIONS", &value)?;
        }

        if let Some(value) = read_env("SHORTLIST_DISPLAY_CURRENCY_SYMBOL") {
            self.display.currency_symbol = value;
        }
        if let Some(value) = read_env("SHORTLIST_DISPLAY_MINOR_UNITS") {
            self.display.minor_units = parse_u32("SHORTLIST_DISPLAY_MINOR_UNITS", &value)?;
        }

        let log_level =
            read_env("SHORTLIST_LOGGING_LEVEL").or_else(|| read_env("SHORTLIST_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("SHORTLIST_LOGGING_FORMAT").or_else(|| read_env("SHORTLIST_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = Some(catalog_path);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(max_suggestions) = overrides.max_suggestions {
            self.search.max_suggestions = max_suggestions;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_ranking(&self.ranking)?;
        validate_search(&self.search)?;
        validate_display(&self.display)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// Config file that `load` would read: the explicit path when it exists,
/// otherwise the first of `shortlist.toml` and `config/shortlist.toml`.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(CONFIG_FILE_NAME), Path::new("config").join(CONFIG_FILE_NAME)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if let Some(path) = &catalog.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "catalog.path must not be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_ranking(ranking: &RankingConfig) -> Result<(), ConfigError> {
    let weights = [
        ("ranking.rating_weight", ranking.rating_weight),
        ("ranking.popularity_weight", ranking.popularity_weight),
        ("ranking.discount_weight", ranking.discount_weight),
    ];

    for (key, weight) in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::Validation(format!(
                "{key} must be a finite, non-negative number"
            )));
        }
    }

    if weights.iter().all(|(_, weight)| *weight == 0.0) {
        return Err(ConfigError::Validation(
            "at least one ranking weight must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_search(search: &SearchConfig) -> Result<(), ConfigError> {
    if search.min_query_chars == 0 {
        return Err(ConfigError::Validation(
            "search.min_query_chars must be greater than zero".to_string(),
        ));
    }
    if search.max_suggestions == 0 {
        return Err(ConfigError::Validation(
            "search.max_suggestions must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_display(display: &DisplayConfig) -> Result<(), ConfigError> {
    if display.minor_units > 4 {
        return Err(ConfigError::Validation(
            "display.minor_units must be in range 0..=4".to_string(),
        ));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    ranking: Option<RankingPatch>,
    search: Option<SearchPatch>,
    display: Option<DisplayPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RankingPatch {
    rating_weight: Option<f64>,
    popularity_weight: Option<f64>,
    discount_weight: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchPatch {
    min_query_chars: Option<usize>,
    max_suggestions: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct DisplayPatch {
    currency_symbol: Option<String>,
    minor_units: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
