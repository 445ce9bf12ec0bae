/// Failures of the extraction core.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("unknown restaurant: {0}")]
    UnknownRestaurant(String),
}

/// Failures of the surrounding service: scraping, fetching and serving.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("pdf extraction failed: {0}")]
    Pdf(String),

    #[error("no pdf link found for {0}")]
    MissingLink(String),

    #[error("update of {restaurant} timed out after {seconds}s")]
    Timeout { restaurant: String, seconds: u64 },

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
