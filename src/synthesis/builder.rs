use derive_builder::Builder;

use crate::error::GatecrackError;
use crate::netlist::Netlist;
use crate::synthesis::GateSynthesis;

/// Everything the solver needs, assembled either by
/// [crate::config::GatecrackConfig::resolve] or programmatically through
/// [SynthesisParamsBuilder].
#[derive(Clone, Debug, Builder)]
pub struct SynthesisParams {
    pub netlist: Netlist,
}

impl SynthesisParamsBuilder {
    /// Parses `text` as a netlist and uses it.
    pub fn netlist_text(&mut self, text: &str) -> Result<&mut Self, GatecrackError> {
        self.netlist = Some(text.parse()?);
        Ok(self)
    }
}

impl SynthesisParams {
    pub fn build(&self) -> Result<GateSynthesis, GatecrackError> {
        GateSynthesis::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::GatecrackError;
    use crate::synthesis::builder::SynthesisParamsBuilder;

    #[test]
    fn test_missing_netlist() {
        let err = SynthesisParamsBuilder::default().build().unwrap_err();
        assert!(matches!(
            GatecrackError::from(err),
            GatecrackError::SynthesisParams(_)
        ));
    }

    #[test]
    fn test_netlist_text() {
        let params = SynthesisParamsBuilder::default()
            .netlist_text("INPUTVAR 1 A\nOUTPUTVAR 1 Z\nZ 1 0\nNOT A Z\n")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(params.netlist.inputs.len(), 1);
        assert!(params.build().is_ok());
    }
}
