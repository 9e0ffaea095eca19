use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] histx_core::ValidationError),

    #[error(transparent)]
    Export(#[from] histx_core::ExportError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Export(_) => 4,
            Self::Command(_) | Self::Io(_) => 10,
        }
    }
}
