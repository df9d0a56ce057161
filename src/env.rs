//! Runtime environment detection.
//!
//! The client changes two behaviors by environment: where configuration
//! lives (tests stay inside the repo instead of touching the user's home)
//! and how verbose logging defaults (development logs at `debug`). Both
//! read `AFS_NOTIFY_ENV`:
//!
//! - `test` selects [`Environment::Test`]
//! - `development` or `dev` selects [`Environment::Development`]
//! - anything else, or unset, selects [`Environment::Production`]

/// Runtime environment for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Default when `AFS_NOTIFY_ENV` is unset or unrecognized.
    Production,
    /// Local development; logging defaults to `debug`.
    Development,
    /// Integration tests; config reads and writes stay inside the repo.
    Test,
}

impl Environment {
    /// Detect the environment from `AFS_NOTIFY_ENV`.
    #[must_use]
    pub fn current() -> Self {
        Self::from_var(std::env::var("AFS_NOTIFY_ENV").ok().as_deref())
    }

    fn from_var(value: Option<&str>) -> Self {
        match value {
            Some("test") => Self::Test,
            Some("development" | "dev") => Self::Development,
            _ => Self::Production,
        }
    }

    /// Whether this is the test environment.
    #[must_use]
    pub fn is_test(self) -> bool {
        self == Self::Test
    }

    /// Log filter applied when `RUST_LOG` is not set.
    #[must_use]
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Production | Self::Test => "info",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
        };
        f.write_str(name)
    }
}

/// Whether the client is running under `AFS_NOTIFY_ENV=test`.
#[must_use]
pub fn is_test_mode() -> bool {
    Environment::current().is_test()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_var_parsing() {
        assert_eq!(Environment::from_var(Some("test")), Environment::Test);
        assert_eq!(
            Environment::from_var(Some("development")),
            Environment::Development
        );
        assert_eq!(Environment::from_var(Some("dev")), Environment::Development);
        assert_eq!(
            Environment::from_var(Some("staging")),
            Environment::Production
        );
        assert_eq!(Environment::from_var(None), Environment::Production);
    }

    #[test]
    fn test_default_log_filter_by_environment() {
        assert_eq!(Environment::Development.default_log_filter(), "debug");
        assert_eq!(Environment::Production.default_log_filter(), "info");
        assert_eq!(Environment::Test.default_log_filter(), "info");
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Environment::Production.to_string(), "production");
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::Test.to_string(), "test");
    }
}
