use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use cors_client::Config;
use etcetera::{AppStrategy, AppStrategyArgs, choose_app_strategy};
use log::debug;
use once_cell::sync::Lazy;

/// Application strategy used to locate the config and data directories
pub static APP_STRATEGY: Lazy<AppStrategyArgs> = Lazy::new(|| AppStrategyArgs {
    top_level_domain: "ch".to_string(),
    author: "cors".to_string(),
    app_name: "cors".to_string(),
});

/// Environment variable overriding the configured origin
pub const ORIGIN_ENV: &str = "CORS_ORIGIN";

const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.json";

/// `<config dir>/cors/config.toml`
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let strategy = choose_app_strategy(APP_STRATEGY.clone())
        .context("HOME environment variable not set")?;
    Ok(strategy.in_config_dir(CONFIG_FILE))
}

/// `<data dir>/cors/session.json`
pub fn default_session_path() -> anyhow::Result<PathBuf> {
    let strategy = choose_app_strategy(APP_STRATEGY.clone())
        .context("HOME environment variable not set")?;
    Ok(strategy.in_data_dir(SESSION_FILE))
}

/// Load the config. An explicitly given file must exist; the default one is
/// optional. `CORS_ORIGIN` wins over whatever the file says.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match explicit {
        Some(path) => Config::from_file(path)?,
        None => {
            let path = default_config_path()?;
            if path.exists() {
                Config::from_file(&path)?
            } else {
                debug!("No config at {:?}, using defaults", path);
                Config::default()
            }
        }
    };

    apply_origin_override(&mut config, env::var(ORIGIN_ENV).ok());
    // The override bypassed parsing, so check it now
    config.api.base_address()?;
    Ok(config)
}

fn apply_origin_override(config: &mut Config, origin: Option<String>) {
    if let Some(origin) = origin.filter(|o| !o.is_empty()) {
        debug!("Origin overridden by {}: {}", ORIGIN_ENV, origin);
        config.api.origin = origin;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_app_strategy_initialization() {
        let strategy = &*APP_STRATEGY;

        assert_eq!(strategy.top_level_domain, "ch");
        assert_eq!(strategy.author, "cors");
        assert_eq!(strategy.app_name, "cors");
    }

    #[test]
    fn test_origin_override() {
        let mut config = Config::default();

        apply_origin_override(&mut config, Some("https://cors.example.org".to_string()));
        assert_eq!(config.api.origin, "https://cors.example.org");

        apply_origin_override(&mut config, Some(String::new()));
        assert_eq!(config.api.origin, "https://cors.example.org");

        apply_origin_override(&mut config, None);
        assert_eq!(config.api.origin, "https://cors.example.org");
    }

    #[test]
    fn test_load_explicit_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\norigin = \"http://school.local\"\ntimeout = 10").unwrap();

        let config = load_config(Some(file.path())).unwrap();

        // The environment may carry an override
        if env::var(ORIGIN_ENV).is_err() {
            assert_eq!(config.api.origin, "http://school.local");
        }
        assert_eq!(config.api.timeout, Some(10));
    }

    #[test]
    fn test_load_missing_explicit_config_fails() {
        let result = load_config(Some(Path::new("/nonexistent/cors.toml")));
        assert!(result.is_err());
    }
}
