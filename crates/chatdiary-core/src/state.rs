//! Terminal states delivered to observable slots.

use crate::Error;

/// Why a retrieval ended without a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport, HTTP status or producer failure
    Network(String),
    /// A diary timestamp could not be parsed during date filtering
    Parse { timestamp: String },
    /// The service answered without a `data` payload
    EmptyResult,
    /// The request was rejected before reaching the service
    InvalidInput(String),
}

impl From<&Error> for FailureKind {
    fn from(error: &Error) -> Self {
        match error {
            Error::TimestampParse { timestamp } => Self::Parse {
                timestamp: timestamp.clone(),
            },
            Error::EmptyResult => Self::EmptyResult,
            Error::InvalidInput(message) | Error::Config(message) => {
                Self::InvalidInput(message.clone())
            }
            other => Self::Network(other.to_string()),
        }
    }
}

/// Value held by a retrieval slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Fetch<T> {
    /// Request issued, no answer yet
    #[default]
    Pending,
    /// Request succeeded
    Ready(T),
    /// Request failed; no partial value is kept
    Failed(FailureKind),
}

impl<T> Fetch<T> {
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True once the request reached a terminal state.
    pub const fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub const fn failure(&self) -> Option<&FailureKind> {
        match self {
            Self::Failed(kind) => Some(kind),
            _ => None,
        }
    }
}

impl<T> From<crate::Result<T>> for Fetch<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(error) => Self::Failed(FailureKind::from(&error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_failure_kinds() {
        let parse = Error::TimestampParse {
            timestamp: "bad".to_string(),
        };
        assert_eq!(
            FailureKind::from(&parse),
            FailureKind::Parse {
                timestamp: "bad".to_string()
            }
        );
        assert_eq!(FailureKind::from(&Error::EmptyResult), FailureKind::EmptyResult);

        let api = Error::Api {
            status: 503,
            body: "down".to_string(),
        };
        assert!(matches!(
            FailureKind::from(&api),
            FailureKind::Network(message) if message.contains("503")
        ));
    }

    #[test]
    fn fetch_from_result() {
        let ok: Fetch<u8> = Ok(3).into();
        assert_eq!(ok.ready(), Some(&3));
        assert!(ok.is_settled());

        let failed: Fetch<u8> = Err(Error::EmptyResult).into();
        assert_eq!(failed.failure(), Some(&FailureKind::EmptyResult));
        assert_eq!(failed.into_ready(), None);

        assert!(Fetch::<u8>::default().is_pending());
    }
}
