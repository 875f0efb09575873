use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the pipeline can report.
///
/// Variants carry the rendered message instead of the source error so that an
/// `Error` can be cloned into observable state and compared in tests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("{0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("{0}")]
    Unknown(String),
}

impl Error {
    pub fn msg(message: impl Into<String>) -> Error {
        Error::Unknown(message.into())
    }

    /// The bare message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Network(m)
            | Error::Decode(m)
            | Error::NotFound(m)
            | Error::Io(m)
            | Error::Unknown(m) => m.as_str(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn json_error_is_decode() -> anyhow::Result<()> {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();

        let r = Error::from(err);

        assert!(matches!(r, Error::Decode(_)));

        Ok(())
    }

    #[test]
    fn message_drops_kind_prefix() -> anyhow::Result<()> {
        let err = Error::Network(String::from("connection refused"));

        assert_eq!("connection refused", err.message());
        assert_eq!("network error: connection refused", err.to_string());

        Ok(())
    }
}
