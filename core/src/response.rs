//! response.rs
//! Query/reply convention used when evaluating expressions on a K3 process.
//!
//! A query is a GET message whose payload is the expression as a char
//! string. The runtime replies with a two-element list `(code; text)`:
//! code 0 carries the formatted result, code 1 an error message.

use std::fmt;

use crate::codec::{db, k3_msg};
use crate::constants::response_codes;
use crate::headers::MessageType;
use crate::types::{CodecError, Result};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum K3Response {
    Ok(String),
    Error(String),
}

impl K3Response {
    pub fn from_value(value: &Value) -> Result<Self> {
        let unexpected =
            || CodecError::UnsupportedValue(format!("expected (code;text) reply, got {}", value));

        let [code, text] = value.as_list().ok_or_else(unexpected)? else {
            return Err(unexpected());
        };
        let text = text
            .as_bytes()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .ok_or_else(unexpected)?;
        match code.as_i32() {
            Some(response_codes::OK) => Ok(K3Response::Ok(text)),
            Some(response_codes::ERROR) => Ok(K3Response::Error(text)),
            _ => Err(unexpected()),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, K3Response::Ok(_))
    }

    pub fn into_result(self) -> std::result::Result<String, String> {
        match self {
            K3Response::Ok(text) => Ok(text),
            K3Response::Error(text) => Err(text),
        }
    }
}

impl fmt::Display for K3Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            K3Response::Ok(text) => f.write_str(text),
            K3Response::Error(text) => write!(f, "error: {}", text),
        }
    }
}

/// Build the GET message that asks the runtime to evaluate `expr`.
pub fn build_query(expr: &str) -> Result<Vec<u8>> {
    k3_msg(&Value::from(expr), MessageType::Get)
}

/// Decode a reply frame and interpret it.
pub fn decode_response(frame: &[u8]) -> Result<K3Response> {
    K3Response::from_value(&db(frame)?)
}
