use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "No settings file found. Checked:\n\
        - $VDROP_CONFIG\n\
        - ./vaultdrop.yaml, ./.vaultdrop.yaml\n\
        - ~/.config/vaultdrop/config.yaml"
    )]
    SettingsNotFound,

    #[error("Cannot parse settings: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Settings have no '{0}' backend section")]
    MissingSection(String),

    #[error("Invalid settings: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
