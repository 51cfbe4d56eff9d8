//! Environment variable expansion for configuration strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a configuration value.
///
/// `field` names the config key for error reporting.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}
