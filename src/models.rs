//! Response models for the Chaojiying API.
//!
//! Every endpoint answers with the same JSON envelope, `{"err_no": .., "err_str": ..}`,
//! plus endpoint-specific payload fields.

use crate::error::{ChaojiyingError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Account balance, from `/Upload/GetScore.php`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(rename = "err_no", deserialize_with = "deserialize_int_or_string")]
    pub error_code: i64,
    #[serde(rename = "err_str", default)]
    pub error_message: String,
    /// Remaining points.
    #[serde(rename = "tifen", deserialize_with = "deserialize_int_or_string")]
    pub point_balance: i64,
    /// Points held for in-flight recognitions.
    #[serde(rename = "tifen_lock", deserialize_with = "deserialize_int_or_string")]
    pub point_balance_locked: i64,
}

/// Recognition answer, from `/Upload/Processing.php`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResult {
    #[serde(rename = "err_no", deserialize_with = "deserialize_int_or_string")]
    pub error_code: i64,
    #[serde(rename = "err_str", default)]
    pub error_message: String,
    /// Pass this to [`report_error`](crate::Chaojiying::report_error) to dispute the answer.
    #[serde(rename = "pic_id", deserialize_with = "deserialize_string_or_int")]
    pub task_id: String,
    #[serde(rename = "pic_str")]
    pub recognized_text: String,
    #[serde(rename = "md5")]
    pub image_checksum: String,
}

/// Acknowledgement from `/Upload/ReportError.php`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOutcome {
    #[serde(rename = "err_no", deserialize_with = "deserialize_int_or_string")]
    pub error_code: i64,
    #[serde(rename = "err_str", default)]
    pub error_message: String,
}

/// The envelope alone, decoded before any payload field is looked at.
#[derive(Debug, Deserialize)]
struct ServiceStatus {
    #[serde(deserialize_with = "deserialize_int_or_string")]
    err_no: i64,
    #[serde(default)]
    err_str: String,
}

/// Decode a response body through the shared envelope.
///
/// A nonzero `err_no` becomes [`ChaojiyingError::Service`] even when the
/// payload fields are absent; the payload is only decoded on success.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let status = ServiceStatus::deserialize(&value)?;

    if status.err_no != 0 {
        return Err(ChaojiyingError::Service {
            code: status.err_no,
            message: status.err_str,
        });
    }

    Ok(serde_json::from_value(value)?)
}

/// Helper to deserialize integer fields the service sometimes sends as strings.
fn deserialize_int_or_string<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct IntOrStringVisitor;

    impl<'de> Visitor<'de> for IntOrStringVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("an integer or a numeric string")
        }

        fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            i64::try_from(v).map_err(|_| E::custom(format!("integer {} out of range", v)))
        }

        fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            v.trim()
                .parse()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(IntOrStringVisitor)
}

/// Helper to deserialize identifiers that can be either string or integer.
fn deserialize_string_or_int<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct StringOrIntVisitor;

    impl<'de> Visitor<'de> for StringOrIntVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or an integer")
        }

        fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_string<E>(self, v: String) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringOrIntVisitor)
}
