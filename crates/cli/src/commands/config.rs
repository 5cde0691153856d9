use std::env;
use std::fs;
use std::path::Path;

use shortlist_core::config::{resolve_config_path, AppConfig, LoadOptions};
use shortlist_core::ApplicationError;
use toml::Value;

use crate::commands::CommandResult;

/// One reported setting: its dotted key, effective value, the environment
/// variables that can set it (in precedence order) and the CLI flag that set
/// it, if any.
struct Field {
    key: &'static str,
    value: String,
    env_keys: &'static [&'static str],
    flag: Option<&'static str>,
}

impl Field {
    fn new(key: &'static str, value: String, env_keys: &'static [&'static str]) -> Self {
        Self { key, value, env_keys, flag: None }
    }

    fn set_by(mut self, flag: &'static str, overridden: bool) -> Self {
        if overridden {
            self.flag = Some(flag);
        }
        self
    }
}

pub fn run(options: LoadOptions) -> CommandResult {
    let config_file_path = resolve_config_path(options.config_path.as_deref());
    let overrides = options.overrides.clone();
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => return CommandResult::from_error("config", &ApplicationError::from(error)),
    };

    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let catalog_path = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<built-in>".to_string());

    let fields = [
        Field::new("catalog.path", catalog_path, &["SHORTLIST_CATALOG_PATH"])
            .set_by("--catalog", overrides.catalog_path.is_some()),
        Field::new(
            "ranking.rating_weight",
            config.ranking.rating_weight.to_string(),
            &["SHORTLIST_RANKING_RATING_WEIGHT"],
        ),
        Field::new(
            "ranking.popularity_weight",
            config.ranking.popularity_weight.to_string(),
            &["SHORTLIST_RANKING_POPULARITY_WEIGHT"],
        ),
        Field::new(
            "ranking.discount_weight",
            config.ranking.discount_weight.to_string(),
            &["SHORTLIST_RANKING_DISCOUNT_WEIGHT"],
        ),
        Field::new(
            "search.min_query_chars",
            config.search.min_query_chars.to_string(),
            &["SHORTLIST_SEARCH_MIN_QUERY_CHARS"],
        ),
        Field::new(
            "search.max_suggestions",
            config.search.max_suggestions.to_string(),
            &["SHORTLIST_SEARCH_MAX_SUGGESTIONS"],
        )
        .set_by("--max-suggestions", overrides.max_suggestions.is_some()),
        Field::new(
            "display.currency_symbol",
            config.display.currency_symbol.clone(),
            &["SHORTLIST_DISPLAY_CURRENCY_SYMBOL"],
        ),
        Field::new(
            "display.minor_units",
            config.display.minor_units.to_string(),
            &["SHORTLIST_DISPLAY_MINOR_UNITS"],
        ),
        Field::new(
            "logging.level",
            config.logging.level.clone(),
            &["SHORTLIST_LOGGING_LEVEL", "SHORTLIST_LOG_LEVEL"],
        )
        .set_by("--log-level", overrides.log_level.is_some()),
        Field::new(
            "logging.format",
            format!("{:?}", config.logging.format),
            &["SHORTLIST_LOGGING_FORMAT", "SHORTLIST_LOG_FORMAT"],
        )
        .set_by("--log-format", overrides.log_format.is_some()),
    ];

    let mut lines =
        vec!["effective config (source precedence: cli > env > file > default):".to_string()];
    lines.extend(fields.iter().map(|field| {
        let source =
            field_source(field, config_file_doc.as_ref(), config_file_path.as_deref());
        render_line(field.key, &field.value, source)
    }));
    CommandResult::text(lines.join("\n"))
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    field: &Field,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(flag) = field.flag {
        return format!("cli ({flag})");
    }

    if let Some(env_key) = field.env_keys.iter().find(|key| env_is_set(key)) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, field.key) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

/// Blank variables are ignored by config loading, so they never count as a source.
fn env_is_set(key: &str) -> bool {
    env::var(key).map(|value| !value.trim().is_empty()).unwrap_or(false)
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
