//! Inbound callbacks and their acknowledgement.
//!
//! Daraja delivers results (B2C, B2B, reversal, balance, status, STK push)
//! and C2B confirmations by POSTing JSON to URLs the merchant registered.
//! The library hands the body over verbatim and never interprets it; the
//! host decides what to do and answers with a [`StandardAck`].

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::MpesaError;

/// Raw inbound callback body, exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackPayload(Vec<u8>);

impl CallbackPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// UTF-8 view of the body.
    pub fn as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.0)
    }

    /// Decode the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for CallbackPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for CallbackPayload {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// Read the whole callback body from `reader`.
pub async fn receive_callback<R>(mut reader: R) -> Result<CallbackPayload, MpesaError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    tracing::debug!(bytes = buf.len(), "received M-Pesa callback");
    Ok(CallbackPayload(buf))
}

const ACCEPTED_DESC: &str = "Confirmation Service request accepted successfully";
const REJECTED_DESC: &str = "Confirmation Service not accepted";

const ACCEPTED_BODY: &str =
    r#"{"ResultDesc":"Confirmation Service request accepted successfully","ResultCode":"0"}"#;
const REJECTED_BODY: &str = r#"{"ResultDesc":"Confirmation Service not accepted","ResultCode":"1"}"#;

/// Body returned to Daraja after a callback. Serializes as
/// `{"ResultDesc": …, "ResultCode": …}` in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardAck {
    accepted: bool,
}

impl StandardAck {
    pub const CONTENT_TYPE: &'static str = "application/json";

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn result_desc(&self) -> &'static str {
        if self.accepted {
            ACCEPTED_DESC
        } else {
            REJECTED_DESC
        }
    }

    /// `"0"` when accepted, `"1"` otherwise.
    pub fn result_code(&self) -> &'static str {
        if self.accepted {
            "0"
        } else {
            "1"
        }
    }

    /// The serialized body, for hosts that write it themselves.
    pub fn to_json(&self) -> &'static str {
        if self.accepted {
            ACCEPTED_BODY
        } else {
            REJECTED_BODY
        }
    }
}

impl Serialize for StandardAck {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("StandardAck", 2)?;
        s.serialize_field("ResultDesc", self.result_desc())?;
        s.serialize_field("ResultCode", self.result_code())?;
        s.end()
    }
}

/// Acknowledge a callback.
pub fn acknowledge(accepted: bool) -> StandardAck {
    StandardAck { accepted }
}
