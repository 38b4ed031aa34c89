//! The JSON document driving one render cycle
//!
//! The schema is fixed but loose: every section may be missing or `null`, and
//! the document is kept verbatim so it can be exported exactly as received.

use crate::{
    data::coerce::{self, to_number},
    Result,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ITINERARY_KEY: &str = "itineraire";
pub const DEAD_ZONE_KEY: &str = "dead_zone";
pub const POLYLINE_KEY: &str = "polyline";
pub const COVERAGE_KEY: &str = "couverture";
pub const UBR_KEY: &str = "ubr";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Value);

impl Payload {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parses a document read from a file.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(text)?))
    }

    /// Parses a search endpoint response body.
    ///
    /// The endpoint encodes its answer twice: the body is a JSON string whose
    /// content is the document. A body that is already a document is accepted
    /// as is.
    pub fn from_response_body(body: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(body)? {
            Value::String(inner) => Self::from_json_str(&inner),
            value => Ok(Self(value)),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// False for documents that compare equal to `false` in the page
    /// (`null`, `false`, `0`, `""`, `[]`...): those render nothing.
    pub fn is_renderable(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
            Value::String(s) => to_number(s) != 0.0,
            array @ Value::Array(_) => to_number(&coerce::to_text(Some(array))) != 0.0,
            Value::Object(_) => true,
        }
    }

    /// A non-null section of the document. Documents that are not objects
    /// have no sections.
    pub fn section(&self, key: &str) -> Option<&Value> {
        self.0.as_object()?.get(key).filter(|v| !v.is_null())
    }

    pub fn itineraire(&self) -> Option<&Value> {
        self.section(ITINERARY_KEY)
    }

    pub fn dead_zone(&self) -> Option<&Value> {
        self.section(DEAD_ZONE_KEY)
    }

    pub fn polyline(&self) -> Option<&Value> {
        self.section(POLYLINE_KEY)
    }

    pub fn couverture(&self) -> Option<&Value> {
        self.section(COVERAGE_KEY)
    }

    pub fn ubr(&self) -> Option<&Value> {
        self.section(UBR_KEY)
    }

    /// Two-space indented JSON text.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Elements of a JSON array; anything else has none.
pub fn elements(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}
