//! Runtime configuration read once at startup.

use std::env;

/// Environment variable naming the address used when a locator carries none.
pub const ADDRESS_VARIABLE: &str = "VARLINK_ADDRESS";

/// Configuration inputs for one invocation.
///
/// The resolver treats the default address as an explicit input rather than
/// consulting the environment itself, so tests and embedders can substitute
/// their own.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Address applied to locators of the bare `INTERFACE` form.
    pub default_address: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            default_address: env::var(ADDRESS_VARIABLE)
                .ok()
                .filter(|value| !value.is_empty()),
        }
    }

    /// Builds a configuration with an explicit default address.
    #[must_use]
    pub fn with_default_address(address: impl Into<String>) -> Self {
        Self {
            default_address: Some(address.into()),
        }
    }
}
