use ::scraper::error::SelectorErrorKind;
use std::num::ParseIntError;

/// All errors that can occur while fetching, parsing, resolving or exporting.
#[derive(thiserror::Error, Debug)]
pub enum MatchupError {
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    ClientBuild(reqwest::Error),

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// Failed to parse an integer from scraped text.
    #[error("failed to parse integer: {0}")]
    IntParse(#[from] ParseIntError),

    /// Failed to parse a date from scraped text.
    #[error("failed to parse date: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// The stats API returned a body that does not match the expected shape.
    #[error("failed to decode JSON from {url}: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    /// An expected HTML element or JSON field was not found.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// The team has no known source identifier.
    #[error("could not map team {team:?} to a source identifier")]
    NameResolution { team: String },

    /// A required environment variable is missing or not unicode.
    #[error("environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        source: std::env::VarError,
    },

    /// An environment variable holds a value that cannot be used.
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnvVar { var: &'static str, value: String },

    /// Writing the spreadsheet failed.
    #[error("spreadsheet export failed: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

impl MatchupError {
    /// Whether the failure happened on the network rather than in parsing.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            MatchupError::Http { .. }
                | MatchupError::UnexpectedStatus { .. }
                | MatchupError::ResponseBody { .. }
        )
    }
}

impl<'a> From<SelectorErrorKind<'a>> for MatchupError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        MatchupError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MatchupError>;
