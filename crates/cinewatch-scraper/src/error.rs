use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("schedule block not found between {start_marker:?} and {end_marker:?}")]
    ExtractionMiss {
        start_marker: String,
        end_marker: String,
    },

    #[error("syntax error in embedded schedule data at offset {offset}: {reason}")]
    Syntax { offset: usize, reason: String },

    #[error("embedded schedule data never binds `{name}`")]
    MissingBinding { name: String },

    #[error("unexpected schedule shape: {reason}")]
    Shape { reason: String },
}
