use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid remap pair: {pair}. Expected FROM:TO, e.g. 1:10")]
    InvalidRemap { pair: String },

    #[error("Band index must be 1 or greater, got: {index}")]
    ZeroBand { index: usize },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Config error: {0}")]
    Config(#[from] nlcdpad::Error),
}
