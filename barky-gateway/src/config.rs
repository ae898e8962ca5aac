//! Layered gateway configuration.
//!
//! Built-in defaults, then an optional `barky.toml` in the working directory,
//! then `BARKY_*` environment variables (e.g. `BARKY_LISTEN_ADDR`).

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File, FileFormat, Source};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "barky.toml";
pub const ENV_PREFIX: &str = "BARKY";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Runtime settings for the `barky-gateway` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8000`.
    pub listen_addr: String,
    /// JSON snapshot loaded at startup and written at shutdown.
    pub data_file: Option<PathBuf>,
    /// Load the example records into an empty store at startup.
    pub seed_examples: bool,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl GatewayConfig {
    /// Read `barky.toml` (if present) and the `BARKY_*` environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file is malformed or a value has the
    /// wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(
            File::with_name(CONFIG_FILE).format(FileFormat::Toml).required(false),
            Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    fn build<F>(file: F, env: Environment) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        Config::builder()
            .set_default("listen_addr", DEFAULT_LISTEN_ADDR)?
            .set_default("seed_examples", false)?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<config::Map<String, String>>();
        Environment::with_prefix(ENV_PREFIX).try_parsing(true).source(Some(map))
    }

    #[test]
    fn defaults_apply_without_sources() {
        let config = match GatewayConfig::build(File::from_str("", FileFormat::Toml), env(&[])) {
            Ok(c) => c,
            Err(e) => panic!("config failed: {e}"),
        };
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert!(config.data_file.is_none());
        assert!(!config.seed_examples);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn environment_overrides_file() {
        let file = File::from_str(
            "listen_addr = \"0.0.0.0:9000\"\ndata_file = \"/var/lib/barky/store.json\"\n",
            FileFormat::Toml,
        );
        let vars = env(&[("BARKY_LISTEN_ADDR", "127.0.0.1:9999"), ("BARKY_SEED_EXAMPLES", "true")]);
        let config = match GatewayConfig::build(file, vars) {
            Ok(c) => c,
            Err(e) => panic!("config failed: {e}"),
        };
        assert_eq!(config.listen_addr, "127.0.0.1:9999");
        assert_eq!(config.data_file, Some(PathBuf::from("/var/lib/barky/store.json")));
        assert!(config.seed_examples);
    }

    #[test]
    fn wrongly_typed_value_is_an_error() {
        let file = File::from_str("seed_examples = \"sometimes\"\n", FileFormat::Toml);
        assert!(GatewayConfig::build(file, env(&[])).is_err());
    }
}
