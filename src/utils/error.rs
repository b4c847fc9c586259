use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Action '{action}' is not allowed while {phase}")]
    InvalidPhaseError { action: String, phase: String },

    #[error("No video is selected")]
    NothingSelectedError,

    #[error("Script error on line {line}: {message}")]
    ScriptError { line: usize, message: String },

    #[error("Picker session is closed")]
    SessionClosedError,
}

pub type Result<T> = std::result::Result<T, PickerError>;
