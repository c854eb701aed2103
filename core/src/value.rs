//! value.rs
//! In-memory K3 values.
//!
//! Notes:
//! - `Value` is closed: every shape the codec can carry is a variant, so
//!   encode/decode dispatch is an exhaustive match.
//! - `Dict` keys are symbol text. A `BTreeMap` keeps keys unique (last insert
//!   wins) and gives a deterministic entry order on the wire.
//! - `CharString` holds raw bytes; the wire format does not promise UTF-8.

use std::collections::BTreeMap;
use std::fmt;

use crate::constants::tags;

pub type Dict = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int32(i32),
    Float64(f64),
    Char(u8),
    CharString(Vec<u8>),
    Symbol(String),
    SymbolVector(Vec<String>),
    List(Vec<Value>),
    Dict(Dict),
}

impl Value {
    pub fn sym(s: impl Into<String>) -> Self {
        Value::Symbol(s.into())
    }

    pub fn chr(c: u8) -> Self {
        Value::Char(c)
    }

    pub fn string(bytes: impl Into<Vec<u8>>) -> Self {
        Value::CharString(bytes.into())
    }

    pub fn symbols<I, S>(syms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::SymbolVector(syms.into_iter().map(Into::into).collect())
    }

    /// Build a dict from pairs; a repeated key keeps the last value.
    pub fn dict<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut map = Dict::new();
        for (k, v) in entries {
            map.insert(k.into(), v);
        }
        Value::Dict(map)
    }

    /// Wire tag this value is encoded with.
    pub fn type_tag(&self) -> i32 {
        match self {
            Value::Null => tags::NULL,
            Value::Int32(_) => tags::INT,
            Value::Float64(_) => tags::FLOAT,
            Value::Char(_) => tags::CHAR,
            Value::CharString(_) => tags::STRING,
            Value::Symbol(_) => tags::SYMBOL,
            Value::SymbolVector(_) => tags::SYMBOL_VECTOR,
            Value::List(_) => tags::LIST,
            Value::Dict(_) => tags::DICT,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int32(_) => "int",
            Value::Float64(_) => "float",
            Value::Char(_) => "char",
            Value::CharString(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::SymbolVector(_) => "symbol vector",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::CharString(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// JSON view for bridging replies to web clients.
    ///
    /// Strings are decoded lossily, symbols and strings both become JSON
    /// strings, and non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Int32(v) => Json::from(*v),
            Value::Float64(v) => serde_json::Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Char(c) => Json::String(char::from(*c).to_string()),
            Value::CharString(b) => Json::String(String::from_utf8_lossy(b).into_owned()),
            Value::Symbol(s) => Json::String(s.clone()),
            Value::SymbolVector(syms) => {
                Json::Array(syms.iter().cloned().map(Json::String).collect())
            }
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Dict(map) => Json::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::CharString(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::CharString(s.into_bytes())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Dict> for Value {
    fn from(map: Dict) -> Self {
        Value::Dict(map)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        v.to_json()
    }
}

/// K notation, close to what the K3 console prints.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "_n"),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{:?}", v),
            Value::Char(c) => write_quoted(f, &[*c]),
            Value::CharString(b) => write_quoted(f, b),
            Value::Symbol(s) => write!(f, "`{}", s),
            Value::SymbolVector(syms) => {
                if syms.is_empty() {
                    return write!(f, "0#`");
                }
                for s in syms {
                    write!(f, "`{}", s)?;
                }
                Ok(())
            }
            Value::List(items) => match items.as_slice() {
                [only] => write!(f, ",{}", only),
                _ => {
                    write!(f, "(")?;
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            write!(f, ";")?;
                        }
                        write!(f, "{}", item)?;
                    }
                    write!(f, ")")
                }
            },
            Value::Dict(map) => {
                write!(f, ".(")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ";")?;
                    }
                    write!(f, "(`{};{};)", k, v)?;
                }
                write!(f, ")")
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    write!(f, "\"")?;
    for &b in bytes {
        match b {
            b'"' => write!(f, "\\\"")?,
            b'\\' => write!(f, "\\\\")?,
            b'\n' => write!(f, "\\n")?,
            0x20..=0x7e => write!(f, "{}", b as char)?,
            _ => write!(f, "\\{:03o}", b)?,
        }
    }
    write!(f, "\"")
}
