//! Kernel utilities shared across slices.
//!
//! * [`config::load_config`] layers an optional config file under
//!   `CARGROUP__`-prefixed environment overrides.
//! * `server` (feature `server`): [`server::state::ApiState`], the
//!   [`server::error::ApiError`] HTTP mapping and the system router.
//!
//! ```rust,ignore
//! use cargroup_kernel::config::load_config;
//! use cargroup_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server.toml"))?;
//! ```

pub mod config;
#[cfg(feature = "server")]
pub mod server;

pub use cargroup_domain as domain;
