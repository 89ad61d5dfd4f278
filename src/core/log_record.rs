//! Record handed to a sink for every emit call

use super::error_info::ErrorInfo;
use super::field_map::FieldMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One log record, built per call and never retained by the logger
///
/// Rendered as `{ code, message, err?, <custom fields>, data }`. Custom fields
/// are spread at the top level after `err`, so they can shadow `code`,
/// `message` or `err`; `data` is always written last.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub code: String,
    pub message: String,
    pub err: Option<ErrorInfo>,
    pub custom: FieldMap,
    pub data: FieldMap,
}

impl LogRecord {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            err: None,
            custom: FieldMap::new(),
            data: FieldMap::new(),
        }
    }

    /// Assemble a record from the three data tiers
    ///
    /// `data` is `context` overlaid with `adhoc`; custom fields stay at the
    /// top level and never enter `data`.
    pub fn assemble(
        code: impl Into<String>,
        message: impl Into<String>,
        err: Option<ErrorInfo>,
        context: &FieldMap,
        custom: &FieldMap,
        adhoc: &FieldMap,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            err,
            custom: custom.clone(),
            data: FieldMap::layered(&[context, adhoc]),
        }
    }

    pub fn with_err(mut self, err: ErrorInfo) -> Self {
        self.err = Some(err);
        self
    }

    pub fn with_custom(mut self, custom: FieldMap) -> Self {
        self.custom = custom;
        self
    }

    pub fn with_data(mut self, data: FieldMap) -> Self {
        self.data = data;
        self
    }

    /// Top-level fields in emission order
    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut obj = Map::new();
        obj.insert("code".to_string(), Value::String(self.code.clone()));
        obj.insert("message".to_string(), Value::String(self.message.clone()));
        if let Some(ref err) = self.err {
            obj.insert(
                "err".to_string(),
                serde_json::to_value(err).unwrap_or(Value::Null),
            );
        }
        for (key, value) in self.custom.iter() {
            obj.insert(key.clone(), value.clone());
        }
        obj.insert(
            "data".to_string(),
            Value::Object(self.data.as_map().clone()),
        );
        obj
    }

    pub fn to_json_value(&self) -> Value {
        Value::Object(self.to_json_map())
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for LogRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_map().serialize(serializer)
    }
}
