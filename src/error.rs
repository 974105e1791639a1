//! Error types and handling for the forecast pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the forecast pipeline
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Connection or download failure against the file server
    #[error("Transfer error: {message}")]
    Transfer { message: String },

    /// The document could not be read or is not well-formed markup
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Local file operation failure
    #[error("Filesystem error on {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Document names must be plain file names
    #[error("Invalid document name: {name:?}")]
    InvalidDocumentName { name: String },
}

impl ForecastError {
    /// Create a new transfer error
    pub fn transfer<S: Into<String>>(message: S) -> Self {
        Self::Transfer {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new filesystem error
    pub fn filesystem<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::Transfer { .. } => {
                "Unable to download the forecast document. Please check your network connection."
                    .to_string()
            }
            ForecastError::Parse { .. } => {
                "The forecast document could not be read as XML.".to_string()
            }
            ForecastError::Filesystem { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            ForecastError::Config { message } => format!("Configuration error: {message}"),
            ForecastError::InvalidDocumentName { name } => {
                format!("'{name}' is not a valid document name")
            }
        }
    }
}

impl From<suppaftp::FtpError> for ForecastError {
    fn from(err: suppaftp::FtpError) -> Self {
        ForecastError::transfer(err.to_string())
    }
}

impl From<quick_xml::de::DeError> for ForecastError {
    fn from(err: quick_xml::de::DeError) -> Self {
        ForecastError::parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let transfer_err = ForecastError::transfer("connection refused");
        assert!(matches!(transfer_err, ForecastError::Transfer { .. }));

        let parse_err = ForecastError::parse("unexpected end of input");
        assert!(matches!(parse_err, ForecastError::Parse { .. }));

        let config_err = ForecastError::config("empty host");
        assert!(matches!(config_err, ForecastError::Config { .. }));
    }

    #[test]
    fn test_user_messages() {
        let transfer_err = ForecastError::transfer("test");
        assert!(transfer_err.user_message().contains("Unable to download"));

        let name_err = ForecastError::InvalidDocumentName {
            name: "../etc".to_string(),
        };
        assert!(name_err.user_message().contains("../etc"));
    }

    #[test]
    fn test_filesystem_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ForecastError::filesystem("IDN11060.xml", io_err);
        let rendered = err.to_string();
        assert!(rendered.contains("IDN11060.xml"));
        assert!(rendered.contains("file not found"));
    }
}
