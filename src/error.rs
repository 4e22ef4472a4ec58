//! Error types for Medal Viz
//!
//! Centralized error handling using snafu for ergonomic error definitions.
//! Every chart converts these into an inline panel; see [`Error::panel_message`].

use snafu::Snafu;

/// Main error type for the application
#[derive(Debug, Snafu)]
pub enum Error {
    /// Backend answered with a non-success status
    #[snafu(display("HTTP error: status {status}"))]
    Http { status: u16 },

    /// JSON present but missing required fields, or required arrays are empty
    #[snafu(display("Unexpected data shape: {message}"))]
    DataShape { message: String },

    /// Rendering attempted before the container or renderer capability is ready
    #[snafu(display("Render precondition failed: {message}"))]
    RenderPrecondition { message: String },

    /// Transport-level failure (connect, timeout, TLS)
    #[snafu(display("Request failed: {source}"))]
    Request { source: reqwest::Error },

    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },
}

impl Error {
    /// Shorthand for a [`Error::DataShape`] error
    pub fn data_shape(message: impl Into<String>) -> Self {
        Error::DataShape {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::RenderPrecondition`] error
    pub fn render_precondition(message: impl Into<String>) -> Self {
        Error::RenderPrecondition {
            message: message.into(),
        }
    }

    /// Whether this error means "nothing to show" rather than a failure
    pub fn is_no_data(&self) -> bool {
        matches!(self, Error::DataShape { .. })
    }

    /// Human-readable text for the inline error panel that replaces a chart
    pub fn panel_message(&self) -> String {
        match self {
            Error::Http { status } => {
                format!("Error loading data: server returned HTTP {status}. Please try again later.")
            }
            Error::DataShape { message } => {
                format!("No data available for the selected parameters ({message}). Please try different selections.")
            }
            Error::RenderPrecondition { message } => {
                format!("Required visualization capability is not available: {message}.")
            }
            Error::Request { source } => {
                format!("Error loading data: {source}. Please check the server and reload.")
            }
            other => format!("Error: {other}"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Request { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_message_mentions_status() {
        let err = Error::Http { status: 500 };
        assert!(err.panel_message().contains("500"));
        assert!(!err.is_no_data());
    }

    #[test]
    fn test_data_shape_is_no_data() {
        let err = Error::data_shape("nodes is empty");
        assert!(err.is_no_data());
        assert!(err.panel_message().starts_with("No data available"));
    }
}
