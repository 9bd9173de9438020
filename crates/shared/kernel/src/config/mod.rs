use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

const ENV_PREFIX: &str = "CARGROUP";
const ENV_SEPARATOR: &str = "__";
const DEFAULT_CONFIG_FILE: &str = "server";

#[cargroup_derive::cargroup_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads layered configuration.
///
/// 1. **File**: `path`, or `server.{toml,yaml,json,...}` in the working
///    directory. The file is optional; missing sections fall back to defaults.
/// 2. **Environment**: variables prefixed `CARGROUP__`, nested with `__`
///    (`CARGROUP__SERVER__PORT=8080` sets `server.port`).
///
/// # Errors
/// Fails when the file exists but cannot be parsed, or when the merged
/// values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use cargroup_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .convert_case(config::Case::Snake)
        .try_parsing(true)
}

fn load_layered<T>(path: Option<impl AsRef<Path>>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    info!(path = %effective_path.display(), "Loading configuration");

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
