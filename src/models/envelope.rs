use crate::error::Error;

/// Outcome of an asynchronous operation reported as data.
///
/// Built through the constructors, at most one of `data` and `error` is set.
/// `loading` is only ever `Some(true)` while a request is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEnvelope<T> {
    pub data: Option<T>,
    pub loading: Option<bool>,
    pub error: Option<Error>,
}

impl<T> Default for ResultEnvelope<T> {
    fn default() -> Self {
        ResultEnvelope {
            data: None,
            loading: None,
            error: None,
        }
    }
}

impl<T> ResultEnvelope<T> {
    pub fn with_data(data: T) -> Self {
        ResultEnvelope {
            data: Some(data),
            loading: Some(false),
            error: None,
        }
    }

    pub fn with_error(error: Error) -> Self {
        ResultEnvelope {
            data: None,
            loading: Some(false),
            error: Some(error),
        }
    }

    pub fn in_flight() -> Self {
        ResultEnvelope {
            data: None,
            loading: Some(true),
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading == Some(true)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl<T> From<crate::error::Result<T>> for ResultEnvelope<T> {
    fn from(r: crate::error::Result<T>) -> Self {
        match r {
            Ok(data) => ResultEnvelope::with_data(data),
            Err(err) => ResultEnvelope::with_error(err),
        }
    }
}
