//! JSON payload built from one observation.
//!
//! Keys are always emitted in the order `date`, `humidity`, `temperature`.

use serde::{Deserialize, Serialize};

use crate::error::ReplayError;
use crate::record::Observation;

/// How temperature and humidity are typed in the JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueMode {
    /// Send column text verbatim as JSON strings.
    #[default]
    Text,
    /// Parse as floating point and send JSON numbers.
    Number,
}

/// A temperature or humidity value as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    /// Whole-number column text such as `60`; sent without a fraction.
    Integer(i64),
    Number(f64),
}

/// Request body for one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub date: String,
    pub humidity: FieldValue,
    pub temperature: FieldValue,
}

impl Payload {
    /// Build the payload for `obs` according to `mode`.
    pub fn from_observation(obs: &Observation, mode: ValueMode) -> Result<Self, ReplayError> {
        Ok(Self {
            date: obs.date.clone(),
            humidity: field_value(obs.line, "humidity", &obs.humidity, mode)?,
            temperature: field_value(obs.line, "temperature", &obs.temperature, mode)?,
        })
    }

    /// Serialize to the compact JSON request body.
    pub fn to_json(&self) -> Result<Vec<u8>, ReplayError> {
        Ok(serde_json::to_vec(self)?)
    }
}

fn field_value(
    line: usize,
    field: &'static str,
    raw: &str,
    mode: ValueMode,
) -> Result<FieldValue, ReplayError> {
    match mode {
        ValueMode::Text => Ok(FieldValue::Text(raw.to_string())),
        ValueMode::Number => {
            if let Ok(n) = raw.trim().parse::<i64>() {
                return Ok(FieldValue::Integer(n));
            }
            number_value(line, field, raw)
        }
    }
}

fn number_value(line: usize, field: &'static str, raw: &str) -> Result<FieldValue, ReplayError> {
    match raw.trim().parse::<f64>() {
        // NaN/inf would serialize as null; reject them here.
        Ok(n) if n.is_finite() => Ok(FieldValue::Number(n)),
        _ => Err(ReplayError::InvalidNumber {
            line,
            field,
            value: raw.to_string(),
        }),
    }
}
