use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_filter")]
    pub filter: String,
}

/// Settings for the counter scenario run by `reducer-demo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Starting counter value (default: 0).
    #[serde(default)]
    pub initial_count: i64,
    /// Deltas dispatched back-to-back, in order (default: [5, 1]).
    #[serde(default = "default_deltas")]
    pub deltas: Vec<i64>,
    /// Reducer delay per unit of |delta| in milliseconds (default: 20).
    #[serde(default = "default_delay_per_unit_ms")]
    pub delay_per_unit_ms: u64,
    /// Fail dispatches carrying a negative delta (default: true).
    #[serde(default = "default_reject_negative")]
    pub reject_negative: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_deltas() -> Vec<i64> {
    vec![5, 1]
}

fn default_delay_per_unit_ms() -> u64 {
    20
}

fn default_reject_negative() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            initial_count: 0,
            deltas: default_deltas(),
            delay_per_unit_ms: default_delay_per_unit_ms(),
            reject_negative: default_reject_negative(),
        }
    }
}
