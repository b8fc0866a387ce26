//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, ClipboardBackend};
use crate::domain::error::ConfigError;
use crate::domain::history::MAX_HISTORY_LIMIT;
use crate::domain::interval::Interval;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(invalid(
            key,
            format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        ))
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "max_history" => {
            let n = parse_count(key, value)?;
            if n == 0 || n > MAX_HISTORY_LIMIT {
                return Err(invalid(
                    key,
                    format!("Value must be between 1 and {}", MAX_HISTORY_LIMIT),
                ));
            }
            config.max_history = Some(n);
        }
        "poll_interval" | "advance_window" | "select_window" => {
            let interval = value
                .parse::<Interval>()
                .map_err(|e| invalid(key, e.to_string()))?;
            let normalized = Some(interval.to_string());
            match key {
                "poll_interval" => config.poll_interval = normalized,
                "advance_window" => config.advance_window = normalized,
                _ => config.select_window = normalized,
            }
        }
        "clear_clipboard" => config.clear_clipboard = Some(parse_bool_for(key, value)?),
        "cycle" => config.cycle = Some(parse_bool_for(key, value)?),
        "notify" => config.notify = Some(parse_bool_for(key, value)?),
        "paste_keystroke" => config.paste_keystroke = Some(parse_bool_for(key, value)?),
        "preview_width" => {
            let width = parse_count(key, value)?;
            if width == 0 {
                return Err(invalid(key, "Value must be at least 1"));
            }
            config.preview_width = Some(width);
        }
        "backend" => {
            let backend = value
                .parse::<ClipboardBackend>()
                .map_err(|e| invalid(key, e.to_string()))?;
            config.backend = Some(backend.to_string());
        }
        _ => return check_key(key),
    }
    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "max_history" => config.max_history.map(|n| n.to_string()),
        "poll_interval" => config.poll_interval.clone(),
        "advance_window" => config.advance_window.clone(),
        "select_window" => config.select_window.clone(),
        "clear_clipboard" => config.clear_clipboard.map(|b| b.to_string()),
        "cycle" => config.cycle.map(|b| b.to_string()),
        "notify" => config.notify.map(|b| b.to_string()),
        "paste_keystroke" => config.paste_keystroke.map(|b| b.to_string()),
        "preview_width" => config.preview_width.map(|n| n.to_string()),
        "backend" => config.backend.clone(),
        _ => None,
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(key, "Value must be a positive whole number"))
}

fn parse_bool_for(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).map_err(|_| invalid(key, "Value must be 'true' or 'false'"))
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(()),
    }
}
