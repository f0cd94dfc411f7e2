//! Environment variable expansion for configuration strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a config value.
///
/// # Arguments
///
/// * `value` - Raw string from the config file
/// * `field` - Config field path, used in error messages
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(
            expand_env("https://example.com", "site.url").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        assert_eq!(
            expand_env("${SEO_TEST_SURELY_UNSET_VAR:-fallback}", "ai.api_key").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_unset_var_is_error() {
        let err = expand_env("${SEO_TEST_SURELY_UNSET_VAR}", "ai.api_key").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("ai.api_key"));
        assert!(message.contains("SEO_TEST_SURELY_UNSET_VAR"));
    }
}
