use lynkan_domain::{Error, NativeIdSource, Result};
use machineid_rs::{Encryption, HWIDComponent, IdBuilder};

const PARAPHRASE: &str = "lynkan_device_id";

/// Host identifier derived from the OS machine id, hashed so the raw value
/// never leaves the device.
#[derive(Debug, Clone)]
pub struct MachineIdSource {
    paraphrase: String,
}

impl MachineIdSource {
    pub fn new(paraphrase: impl Into<String>) -> Self {
        Self { paraphrase: paraphrase.into() }
    }

    fn build(&self) -> anyhow::Result<String> {
        let mut builder = IdBuilder::new(Encryption::SHA256);
        builder
            .add_component(HWIDComponent::SystemID)
            .add_component(HWIDComponent::CPUCores);

        builder
            .build(&self.paraphrase)
            .map_err(|e| anyhow::anyhow!("Failed to generate machine ID: {e}"))
    }
}

impl Default for MachineIdSource {
    fn default() -> Self {
        Self::new(PARAPHRASE)
    }
}

impl NativeIdSource for MachineIdSource {
    fn read(&self) -> Result<Option<String>> {
        self.build().map(Some).map_err(Error::source_unavailable)
    }
}
