use serde::{Deserialize, Serialize};
use tracing::Level;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "bin", derive(clap::ValueEnum))]
pub enum GatecrackLogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<GatecrackLogLevel> for Level {
    fn from(value: GatecrackLogLevel) -> Self {
        match value {
            GatecrackLogLevel::Trace => Level::TRACE,
            GatecrackLogLevel::Debug => Level::DEBUG,
            GatecrackLogLevel::Info => Level::INFO,
            GatecrackLogLevel::Warn => Level::WARN,
            GatecrackLogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetaConfig {
    #[serde(default)]
    pub log_level: GatecrackLogLevel,
}
