/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] redis::RedisError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Human-readable message shown in place of a listing that failed to load.
    ///
    /// Transport details stay in the logs; the view only gets a short summary.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(what) => format!("{} could not be found", what),
            AppError::HttpClient(e) if e.is_timeout() => {
                "The catalog took too long to respond. Please try again later.".to_string()
            }
            AppError::HttpClient(_) | AppError::ExternalApi(_) => {
                "The catalog could not be reached. Please try again later.".to_string()
            }
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Storage(_)
            | AppError::Io(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => "Something went wrong. Please try again later.".to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_external_api_hides_details() {
        let err = AppError::ExternalApi("Catalog API returned status 502: <html>".to_string());
        let message = err.user_message();
        assert!(!message.contains("502"));
        assert!(message.contains("try again later"));
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::NotFound("Movie 42".to_string());
        assert_eq!(err.user_message(), "Movie 42 could not be found");
    }

    #[test]
    fn test_display_includes_source() {
        let err = AppError::Internal("boom".to_string());
        assert_eq!(err.to_string(), "Internal error: boom");
    }
}
