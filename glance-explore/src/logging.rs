//! Logging configuration for glance.
//!
//! Analyzer entry points are instrumented with `tracing` spans; this module
//! holds the knobs a host application uses to decide how chatty those spans
//! and events should be.

use tracing::Level;

/// Logging configuration for exploration sessions.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level for glance components.
    pub base_level: Level,
    /// Whether to log the SQL text of analyzer queries.
    pub log_query_text: bool,
    /// Whether to log dataset load operations.
    pub log_data_operations: bool,
    /// Maximum length for logged field values.
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_query_text: false,
            log_data_operations: true,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Verbose configuration suitable for debugging.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_query_text: true,
            log_data_operations: true,
            max_field_length: 1024,
        }
    }

    /// Minimal configuration for production with lowest overhead.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_query_text: false,
            log_data_operations: false,
            max_field_length: 128,
        }
    }

    /// Installs a global fmt subscriber for hosts that do not bring their
    /// own. `RUST_LOG` overrides the configured base level; repeated calls
    /// are no-ops.
    pub fn init(&self) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(self.base_level.to_string()));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Truncates a field value to the configured maximum length.
    pub fn truncate_field<'a>(&self, value: &'a str) -> &'a str {
        if value.len() <= self.max_field_length {
            value
        } else {
            let mut end = self.max_field_length;
            while !value.is_char_boundary(end) {
                end -= 1;
            }
            &value[..end]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        let config = LogConfig {
            max_field_length: 5,
            ..LogConfig::default()
        };
        assert_eq!(config.truncate_field("short"), "short");
        assert_eq!(config.truncate_field("long value"), "long ");
        // Multibyte content must not split a code point.
        let truncated = config.truncate_field("日本語テキスト");
        assert!(truncated.len() <= 5);
        assert!("日本語テキスト".starts_with(truncated));
    }
}
