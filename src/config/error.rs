use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatecrackConfigError {
    #[error("An error reading the config file")]
    Io(#[from] std::io::Error),
    #[error("An error parsing the config file: {0}")]
    Toml(String),
}

#[cfg(feature = "toml")]
impl From<toml_edit::de::Error> for GatecrackConfigError {
    fn from(value: toml_edit::de::Error) -> Self {
        GatecrackConfigError::Toml(value.to_string())
    }
}
