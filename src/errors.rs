use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Config Decode Error: {0}")]
    Decode(String),

    #[error("Backend Command '{command}' Failed: {details}")]
    Backend { command: String, details: String },

    #[error("Stream Error: {0}")]
    Stream(String),

    #[error("File I/O Error: {0}")]
    Io(String),
}

impl AppError {
    pub fn backend(command: &str, details: impl ToString) -> Self {
        AppError::Backend {
            command: command.to_string(),
            details: details.to_string(),
        }
    }
}

// Allow conversion from std::io::Error to AppError::Io
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}
