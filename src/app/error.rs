use thiserror::Error;

#[derive(Error, Debug)]
pub enum TidingsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Redirect from {0} has no usable Location header")]
    MissingLocation(String),

    #[error("Gave up after {0} redirects")]
    TooManyRedirects(usize),

    #[error("Invalid value {value:?} for option {option}")]
    InvalidOption { option: String, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TidingsError>;
