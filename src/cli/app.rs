//! Shared app plumbing: exit codes, logging and configuration loading

use std::env;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, ClipboardBackend};
use crate::domain::history::MAX_HISTORY_LIMIT;
use crate::domain::interval::Interval;
use crate::infrastructure::XdgConfigStore;

use super::args::WatcherOptions;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment overrides
pub const ENV_MAX_HISTORY: &str = "CLIP_CYCLE_MAX_HISTORY";
pub const ENV_POLL_INTERVAL: &str = "CLIP_CYCLE_POLL_INTERVAL";

/// Initialize env_logger. `RUST_LOG` wins over the default filter.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "clip_cycle=debug"
    } else {
        "clip_cycle=info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    load_merged_config_from(&XdgConfigStore::new(), cli_config).await
}

/// Merge `defaults < file < env < cli` using the given store
pub async fn load_merged_config_from<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = store.load().await.unwrap_or_else(|e| {
        log::warn!("Ignoring config file {}: {}", store.path().display(), e);
        AppConfig::empty()
    });

    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

/// Config values taken from the environment
pub fn env_config() -> AppConfig {
    let max_history = env::var(ENV_MAX_HISTORY)
        .ok()
        .filter(|s| !s.is_empty())
        .and_then(|s| match s.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                log::warn!("Ignoring {}={:?}: not a number", ENV_MAX_HISTORY, s);
                None
            }
        });

    AppConfig {
        max_history,
        poll_interval: env::var(ENV_POLL_INTERVAL).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    }
}

/// Validate a merged config into watcher options
pub fn watcher_options(config: &AppConfig) -> Result<WatcherOptions, String> {
    let max_history = config.max_history_or_default();
    if max_history == 0 || max_history > MAX_HISTORY_LIMIT {
        return Err(format!(
            "Invalid max_history {}: must be between 1 and {}",
            max_history, MAX_HISTORY_LIMIT
        ));
    }

    let options = WatcherOptions {
        max_history,
        poll_interval: parse_interval("poll_interval", config.poll_interval.as_deref())?
            .unwrap_or_else(Interval::default_poll),
        advance_window: parse_interval("advance_window", config.advance_window.as_deref())?
            .unwrap_or_else(Interval::default_advance_window),
        select_window: parse_interval("select_window", config.select_window.as_deref())?
            .unwrap_or_else(Interval::default_select_window),
        clear_clipboard: config.clear_clipboard_or_default(),
        cycle: config.cycle_or_default(),
        notify: config.notify_or_default(),
        paste_keystroke: config.paste_keystroke_or_default(),
        preview_width: config.preview_width_or_default(),
        backend: match config.backend.as_deref() {
            Some(s) => s
                .parse::<ClipboardBackend>()
                .map_err(|e| format!("Invalid backend: {}", e))?,
            None => ClipboardBackend::default(),
        },
    };

    for (key, window) in config.short_windows() {
        log::warn!(
            "{} ({}) is shorter than twice the poll interval ({}); own writes may be recorded again",
            key,
            window,
            options.poll_interval
        );
    }

    Ok(options)
}

fn parse_interval(key: &str, value: Option<&str>) -> Result<Option<Interval>, String> {
    value
        .map(|s| s.parse::<Interval>())
        .transpose()
        .map_err(|e| format!("Invalid {}: {}", key, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_make_valid_options() {
        let options = watcher_options(&AppConfig::defaults()).unwrap();
        assert_eq!(options.max_history, 20);
        assert_eq!(options.poll_interval.as_millis(), 500);
        assert_eq!(options.advance_window.as_millis(), 1200);
        assert_eq!(options.select_window.as_millis(), 1000);
        assert!(options.clear_clipboard);
        assert!(!options.cycle);
        assert_eq!(options.backend, ClipboardBackend::Arboard);
    }

    #[test]
    fn zero_history_rejected() {
        let config = AppConfig {
            max_history: Some(0),
            ..AppConfig::defaults()
        };
        assert!(watcher_options(&config).unwrap_err().contains("max_history"));
    }

    #[test]
    fn oversized_history_rejected() {
        let config = AppConfig {
            max_history: Some(MAX_HISTORY_LIMIT + 1),
            ..AppConfig::defaults()
        };
        assert!(watcher_options(&config).is_err());
    }

    #[test]
    fn bad_interval_rejected() {
        let config = AppConfig {
            poll_interval: Some("fast".to_string()),
            ..AppConfig::defaults()
        };
        assert!(watcher_options(&config).unwrap_err().contains("poll_interval"));
    }

    #[test]
    fn bad_backend_rejected() {
        let config = AppConfig {
            backend: Some("x11".to_string()),
            ..AppConfig::defaults()
        };
        let err = watcher_options(&config).unwrap_err();
        assert!(err.starts_with("Invalid backend"));
        assert!(err.contains("x11"));
    }

    #[test]
    fn error_labels_use_config_key_names() {
        let config = AppConfig {
            advance_window: Some("later".to_string()),
            ..AppConfig::defaults()
        };
        assert!(watcher_options(&config)
            .unwrap_err()
            .starts_with("Invalid advance_window:"));

        let config = AppConfig {
            poll_interval: Some("fast".to_string()),
            ..AppConfig::defaults()
        };
        assert!(watcher_options(&config)
            .unwrap_err()
            .starts_with("Invalid poll_interval:"));
    }

    #[tokio::test]
    async fn cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        store
            .save(&AppConfig {
                max_history: Some(40),
                cycle: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        let cli = AppConfig {
            max_history: Some(5),
            ..Default::default()
        };
        let merged = load_merged_config_from(&store, cli).await;

        assert_eq!(merged.cycle, Some(true));
        assert_eq!(merged.backend, Some("arboard".to_string()));
        // env may override the file but never the CLI
        assert_eq!(merged.max_history, Some(5));
    }

    #[tokio::test]
    async fn broken_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "max_history = [").await.unwrap();

        let merged =
            load_merged_config_from(&XdgConfigStore::with_path(path), AppConfig::empty()).await;
        assert_eq!(merged.select_window, Some("1s".to_string()));
    }
}
