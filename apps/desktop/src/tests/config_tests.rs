use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_match_reference_reply_delay() {
    let settings = Settings::default();
    assert_eq!(settings.reply_delay_ms, 1000);
    assert_eq!(settings.display_name, None);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_values_accept_integer_and_string_delay() {
    let mut settings = Settings::default();
    let table = parse_settings("display_name = \"neo\"\nreply_delay_ms = 250\n").expect("toml");
    settings.apply_file(&table);
    assert_eq!(settings.display_name.as_deref(), Some("neo"));
    assert_eq!(settings.reply_delay_ms, 250);

    let table = parse_settings("reply_delay_ms = \"75\"\nlog_filter = \"debug\"").expect("toml");
    settings.apply_file(&table);
    assert_eq!(settings.reply_delay_ms, 75);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn invalid_values_keep_previous_setting() {
    let mut settings = Settings::default();
    let table = parse_settings("reply_delay_ms = -5").expect("toml");
    settings.apply_file(&table);
    assert_eq!(settings.reply_delay_ms, 1000);

    settings.apply_env(env_from(&[("APP__REPLY_DELAY_MS", "soon")]));
    assert_eq!(settings.reply_delay_ms, 1000);
}

#[test]
fn env_overrides_file_values() {
    let mut settings = Settings::default();
    let table = parse_settings("display_name = \"from_file\"\nreply_delay_ms = 10").expect("toml");
    settings.apply_file(&table);
    settings.apply_env(env_from(&[
        ("APP__DISPLAY_NAME", "from_env"),
        ("APP__REPLY_DELAY_MS", "20"),
    ]));

    assert_eq!(settings.display_name.as_deref(), Some("from_env"));
    assert_eq!(settings.reply_delay_ms, 20);
}

#[test]
fn blank_display_name_falls_back_to_generated() {
    let mut settings = Settings::default();
    settings.apply_env(env_from(&[("APP__DISPLAY_NAME", "   ")]));
    assert_eq!(settings.display_name, None);

    let config = settings.session_config();
    assert!(config.display_name.starts_with("User_"));
    assert_eq!(config.reply_delay, Duration::from_millis(1000));
}

#[test]
fn explicit_missing_settings_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("secure_chat_missing_{suffix}.toml"));

    let err = load_settings(Some(&path)).expect_err("missing file");
    assert!(err.to_string().contains("failed to read settings file"));
}

#[test]
fn explicit_settings_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("secure_chat_settings_{suffix}.toml"));
    fs::write(&path, "reply_delay_ms = 42\n").expect("write settings");

    let settings = load_settings(Some(&path)).expect("load");
    if env::var("APP__REPLY_DELAY_MS").is_err() {
        assert_eq!(settings.reply_delay_ms, 42);
    }

    fs::remove_file(path).expect("cleanup");
}
