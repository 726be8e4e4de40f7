use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Data format error at row {row}, column '{column}': {message}")]
    DataFormat {
        row: usize,
        column: String,
        message: String,
    },

    #[error("Malformed response body from {source_name}: {message}")]
    MalformedResponse {
        source_name: String,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid spreadsheet identifier: {0}")]
    InvalidIdentifier(String),
}

impl Error {
    /// True for rate limiting and server-side errors. An unreachable host
    /// is not transient; it surfaces immediately.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status == 429 || *status >= 500)
    }

    pub(crate) fn data_format(row: usize, column: &str, message: impl Into<String>) -> Self {
        Error::DataFormat {
            row,
            column: column.to_string(),
            message: message.into(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Error::Auth(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
