use std::env;
use std::fs;
use std::sync::{Mutex, OnceLock};

use serde_json::Value;
use shortlist_cli::commands::{catalog, compare, config, doctor, search, similar};
use shortlist_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use tempfile::TempDir;

#[test]
fn search_returns_case_insensitive_match() {
    let result = search::run(&AppConfig::default(), "iphone", true);
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["query"], "iphone");
    assert_eq!(names(&payload["suggestions"]), vec!["iPhone 15 Pro"]);
}

#[test]
fn search_below_threshold_returns_nothing() {
    let result = search::run(&AppConfig::default(), "o", true);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["suggestions"].as_array().map(Vec::len), Some(0));

    let human = search::run(&AppConfig::default(), "o", false);
    assert_eq!(human.output, "no suggestions");
}

#[test]
fn similar_lists_same_category_in_catalog_order() {
    let result = similar::run(&AppConfig::default(), 4, true);
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["product"]["name"], "MacBook Air M3");
    assert_eq!(names(&payload["similar"]), vec!["HP Spectre x360", "Dell XPS 13"]);
}

#[test]
fn similar_rejects_unknown_product() {
    let result = similar::run(&AppConfig::default(), 99, true);
    assert_eq!(result.exit_code, 4);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "similar");
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "unknown_product");
}

#[test]
fn compare_two_products_is_multi_selected_without_recommendations() {
    let result = compare::run(&AppConfig::default(), &[4, 6], true);
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["state"], "multi_selected");
    assert_eq!(payload["table"].as_array().map(Vec::len), Some(2));
    assert_eq!(payload["recommendations"].as_array().map(Vec::len), Some(0));
}

#[test]
fn compare_single_product_shows_recommendations() {
    let result = compare::run(&AppConfig::default(), &[4], false);
    assert_eq!(result.exit_code, 0);
    assert!(result.output.starts_with("state: SingleSelected"));
    assert!(result.output.contains("₹139,999"));
    assert!(result.output.contains("[6] Dell XPS 13"));
}

#[test]
fn compare_deduplicates_repeated_ids() {
    let result = compare::run(&AppConfig::default(), &[2, 2], true);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["state"], "single_selected");
    assert_eq!(payload["table"].as_array().map(Vec::len), Some(1));
}

#[test]
fn catalog_lists_products_best_first() {
    let result = catalog::run(&AppConfig::default(), true);
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    let products = payload["products"].as_array().cloned().unwrap_or_default();
    assert_eq!(products.len(), 6);
    assert_eq!(products[0]["product"]["name"], "MacBook Air M3");
    assert_eq!(products[5]["product"]["name"], "OnePlus 12");
}

#[test]
fn missing_catalog_file_is_a_catalog_failure() {
    let mut config = AppConfig::default();
    config.catalog.path = Some("/definitely/not/catalog.toml".into());

    let result = search::run(&config, "iphone", true);
    assert_eq!(result.exit_code, 3);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "catalog_load");
}

#[test]
fn catalog_file_replaces_builtin_products() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        r#"
[[products]]
id = 1
name = "Kindle Paperwhite"
price = 13999
rating = 4.6
discount = 20
popularity = 75
category = "Reader"

[[products]]
id = 2
name = "Kobo Clara"
price = 12999
rating = 4.3
discount = 10
popularity = 60
category = "Reader"
"#,
    )
    .expect("write catalog");

    let mut config = AppConfig::default();
    config.catalog.path = Some(path);

    let result = compare::run(&config, &[2], true);
    let payload = parse_payload(&result.output);
    assert_eq!(names(&payload["recommendations"]), vec!["Kindle Paperwhite"]);
}

#[test]
fn doctor_passes_with_defaults() {
    with_env(&[], || {
        let result = doctor::run(true, LoadOptions::default());
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "pass");
        assert_eq!(payload["checks"].as_array().map(Vec::len), Some(3));
    });
}

#[test]
fn doctor_skips_downstream_checks_on_config_failure() {
    with_env(&[("SHORTLIST_LOG_LEVEL", "chatty")], || {
        let result = doctor::run(true, LoadOptions::default());
        assert_eq!(result.exit_code, 1);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(payload["checks"][0]["status"], "fail");
        assert_eq!(payload["checks"][1]["status"], "skipped");
        assert_eq!(payload["checks"][2]["status"], "skipped");
    });
}

#[test]
fn config_reports_env_source() {
    with_env(&[("SHORTLIST_SEARCH_MAX_SUGGESTIONS", "3")], || {
        let result = config::run(LoadOptions::default());
        let output = result.output;

        assert_eq!(result.exit_code, 0);
        assert!(output.starts_with("effective config"));
        assert!(output.contains(
            "- search.max_suggestions = 3 (source: env (SHORTLIST_SEARCH_MAX_SUGGESTIONS))"
        ));
        assert!(output.contains("- catalog.path = <built-in> (source: default)"));
    });
}

#[test]
fn config_attributes_cli_flags_and_env_aliases() {
    with_env(&[("SHORTLIST_LOG_LEVEL", "debug"), ("SHORTLIST_SEARCH_MIN_QUERY_CHARS", "   ")], || {
        let options = LoadOptions {
            overrides: ConfigOverrides {
                catalog_path: Some("/tmp/cli.toml".into()),
                max_suggestions: Some(2),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        };

        let result = config::run(options);
        assert_eq!(result.exit_code, 0);

        let output = result.output;
        assert!(output.contains("- catalog.path = /tmp/cli.toml (source: cli (--catalog))"));
        assert!(output.contains("- search.max_suggestions = 2 (source: cli (--max-suggestions))"));
        assert!(output.contains("- logging.level = debug (source: env (SHORTLIST_LOG_LEVEL))"));
        assert!(output.contains("- search.min_query_chars = 2 (source: default)"));
    });
}

#[test]
fn config_failure_reports_config_outcome() {
    with_env(&[], || {
        let options = LoadOptions {
            overrides: ConfigOverrides {
                log_level: Some("chatty".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        };

        let result = config::run(options);
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "config");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn compare_rejects_unknown_product() {
    let result = compare::run(&AppConfig::default(), &[4, 99], true);
    assert_eq!(result.exit_code, 4);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "compare");
    assert_eq!(payload["error_class"], "unknown_product");
    assert!(payload["message"].as_str().unwrap_or_default().contains("99"));
}

fn names(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|error| {
        panic!("command output should be valid JSON ({error}): {output}")
    })
}

const MANAGED_VARS: &[&str] = &[
    "SHORTLIST_CATALOG_PATH",
    "SHORTLIST_SEARCH_MIN_QUERY_CHARS",
    "SHORTLIST_SEARCH_MAX_SUGGESTIONS",
    "SHORTLIST_LOG_LEVEL",
    "SHORTLIST_LOGGING_LEVEL",
    "SHORTLIST_LOG_FORMAT",
    "SHORTLIST_LOGGING_FORMAT",
];

fn with_env(vars: &[(&str, &str)], test: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard = ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(|e| e.into_inner());

    for var in MANAGED_VARS {
        env::remove_var(var);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test();

    for (key, _) in vars {
        env::remove_var(key);
    }
}
