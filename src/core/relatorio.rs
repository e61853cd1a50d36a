//! The relatorio entity and its request payloads
//!
//! A relatorio is a single store order: who ordered, how much, whether it
//! has been paid, and where to deliver it. `isPaid` is stored as 0/1 and
//! surfaced as a strict boolean everywhere above the store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::ValidationError;

/// Message used when any required create field is missing.
pub const MISSING_CREATE_FIELDS: &str = "name or isPaid or order_number or tel or address";

/// A persisted relatorio
///
/// `value` is an amount in whole currency units (reais). It is optional on
/// create and echoed back as `null` when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relatorio {
    pub id: i64,
    pub name: String,
    pub value: Option<i64>,
    #[serde(rename = "isPaid")]
    pub is_paid: bool,
    pub order_number: String,
    pub tel: String,
    pub address: String,
}

/// A validated relatorio that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelatorio {
    pub name: String,
    pub value: Option<i64>,
    pub is_paid: bool,
    pub order_number: String,
    pub tel: String,
    pub address: String,
}

impl NewRelatorio {
    /// Attach the store-assigned id
    pub fn with_id(self, id: i64) -> Relatorio {
        Relatorio {
            id,
            name: self.name,
            value: self.value,
            is_paid: self.is_paid,
            order_number: self.order_number,
            tel: self.tel,
            address: self.address,
        }
    }

    /// Validate a create payload
    ///
    /// Text fields must be non-empty strings. `isPaid` follows JavaScript
    /// truthiness: `false`, `0`, `""` and `null` are accepted and persist as
    /// unpaid. Only an absent key is rejected.
    pub fn from_payload(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let name = required_text(body, "name");
        let is_paid = body.get("isPaid").map(truthy);
        let order_number = required_text(body, "order_number");
        let tel = required_text(body, "tel");
        let address = required_text(body, "address");

        let (Some(name), Some(is_paid), Some(order_number), Some(tel), Some(address)) =
            (name, is_paid, order_number, tel, address)
        else {
            return Err(ValidationError::MissingFields(MISSING_CREATE_FIELDS));
        };

        let value = match body.get("value") {
            None | Some(Value::Null) => None,
            Some(v) => Some(v.as_i64().ok_or(ValidationError::InvalidField {
                field: "value",
                message: "expected an integer",
            })?),
        };

        Ok(Self {
            name,
            value,
            is_paid,
            order_number,
            tel,
            address,
        })
    }
}

/// Extract the `isPaid` flag of an update payload
///
/// Unlike create, update only accepts a JSON boolean.
pub fn paid_status_from_payload(body: &Map<String, Value>) -> Result<bool, ValidationError> {
    body.get("isPaid")
        .and_then(Value::as_bool)
        .ok_or(ValidationError::MissingIsPaid)
}

/// Parse a record id taken from the request path
pub fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::MissingId);
    }
    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidId(raw.to_string()))
}

fn required_text(body: &Map<String, Value>, field: &str) -> Option<String> {
    match body.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
