#[cfg(feature = "toml")]
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[cfg(feature = "toml")]
use crate::config::error::GatecrackConfigError;
use crate::config::meta::MetaConfig;
use crate::config::report::ReportConfig;
use crate::error::GatecrackError;
use crate::netlist::Netlist;
use crate::synthesis::builder::{SynthesisParams, SynthesisParamsBuilder};

pub mod error;
pub mod meta;
pub mod report;

/// The serializable settings found in a gatecrack .toml file. Every section
/// is optional. The netlist itself is named separately, so one config can be
/// reused across netlists; [GatecrackConfig::resolve] combines the two into a
/// [SynthesisParams].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GatecrackConfig {
    #[serde(default)]
    pub meta: MetaConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[cfg(feature = "toml")]
impl GatecrackConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GatecrackConfigError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, GatecrackConfigError> {
        let config = toml_edit::de::from_str(text)?;
        Ok(config)
    }
}

impl GatecrackConfig {
    pub fn resolve<P: AsRef<Path>>(&self, netlist: P) -> Result<SynthesisParams, GatecrackError> {
        let netlist = Netlist::load(netlist)?;
        let params = SynthesisParamsBuilder::default().netlist(netlist).build()?;
        Ok(params)
    }
}

#[cfg(all(test, feature = "toml"))]
mod tests {
    use crate::config::GatecrackConfig;
    use crate::config::meta::GatecrackLogLevel;

    #[test]
    fn test_defaults() {
        let c = GatecrackConfig::parse("").unwrap();
        assert_eq!(c, GatecrackConfig::default());
        assert_eq!(c.meta.log_level, GatecrackLogLevel::Info);
        assert!(!c.report.show_circuit);
        assert!(!c.report.show_truth_table);
    }

    #[test]
    fn test_partial_sections() {
        let c = GatecrackConfig::parse(
            "[meta]\nlog_level = \"TRACE\"\n[report]\nshow_circuit = true\n",
        )
        .unwrap();
        assert_eq!(c.meta.log_level, GatecrackLogLevel::Trace);
        assert!(c.report.show_circuit);
        assert!(!c.report.show_truth_table);
    }

    #[test]
    fn test_bad_log_level() {
        assert!(GatecrackConfig::parse("[meta]\nlog_level = \"LOUD\"\n").is_err());
    }

    #[test]
    fn test_missing_netlist() {
        let c = GatecrackConfig::default();
        assert!(c.resolve("/nonexistent/netlist.txt").is_err());
    }

    #[test]
    fn test_round_trip_default() {
        let text = toml_edit::ser::to_string_pretty(&GatecrackConfig::default()).unwrap();
        assert_eq!(GatecrackConfig::parse(&text).unwrap(), GatecrackConfig::default());
    }
}
