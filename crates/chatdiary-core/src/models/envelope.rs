//! Response envelope used by the diary service list endpoints

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{Error, Result};

/// `{ "code": .., "msg": .., "data": .. }` wrapper around list payloads.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload; a missing or null `data` is [`Error::EmptyResult`].
    pub fn into_data(self) -> Result<T> {
        self.data.ok_or(Error::EmptyResult)
    }
}

/// Decode an enveloped payload from a raw response body.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str::<ApiEnvelope<T>>(body)?.into_data()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_data_with_message_alias() {
        let envelope: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"code": 200, "msg": "ok", "data": [1, 2]}"#).unwrap();
        assert_eq!(envelope.code, Some(200));
        assert_eq!(envelope.message.as_deref(), Some("ok"));
        assert_eq!(envelope.into_data().unwrap(), vec![1, 2]);
    }

    #[test]
    fn missing_or_null_data_is_empty_result() {
        assert!(matches!(
            decode_envelope::<Vec<u32>>(r#"{"code": 500}"#),
            Err(Error::EmptyResult)
        ));
        assert!(matches!(
            decode_envelope::<Vec<u32>>(r#"{"data": null}"#),
            Err(Error::EmptyResult)
        ));
    }

    #[test]
    fn empty_data_is_a_valid_result() {
        assert_eq!(
            decode_envelope::<Vec<u32>>(r#"{"data": []}"#).unwrap(),
            Vec::<u32>::new()
        );
    }

    #[test]
    fn malformed_body_is_serialization_error() {
        assert!(matches!(
            decode_envelope::<Vec<u32>>("<html>502</html>"),
            Err(Error::Serialization(_))
        ));
    }
}
