use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Connector error: {0}")]
    Connector(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Activity has no conversation")]
    MissingConversation,

    #[error("Activity has no service url")]
    MissingServiceUrl,
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn service_url(url: Option<&str>) -> Result<&str> {
        Ok(url.ok_or(HandlerError::MissingServiceUrl)?)
    }

    #[test]
    fn test_handler_error_converts_with_question_mark() {
        let err = service_url(None).unwrap_err();
        assert!(matches!(
            err,
            BotError::Handler(HandlerError::MissingServiceUrl)
        ));
        assert_eq!(err.to_string(), "Handler error: Activity has no service url");
    }

    #[test]
    fn test_bad_json_is_serialization_error() {
        let err: BotError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, BotError::Serialization(_)));
    }
}
