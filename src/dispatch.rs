//! Request dispatch and validation
//!
//! Turns an untyped JSON request body into exactly one validated operation,
//! or a rejection. The check order is fixed: body shape, then recognized-key
//! count, then the selected key's value shape. Only after all three pass is
//! the statically typed [`Operation`] constructed and executed.

use serde_json::{Map, Value};

use crate::ai::ModelClient;
use crate::error::{ApiError, Result};
use crate::ops;

/// Recognized operation keys, in scan order.
///
/// Exactly one must be present as a direct property of the request body.
/// There is no precedence among them: any combination of two or more is
/// rejected outright.
pub const OPERATION_KEYS: [&str; 5] = ["fibonacci", "prime", "lcm", "hcf", "AI"];

/// A validated operation invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// First n terms of the Fibonacci sequence
    Fibonacci(u64),
    /// Primes of the input sequence, order preserved
    Prime(Vec<i64>),
    /// Least common multiple of the input sequence
    Lcm(Vec<i64>),
    /// Highest common factor of the input sequence
    Hcf(Vec<i64>),
    /// One-word answer from the external model service
    Ask(String),
}

impl Operation {
    /// Parse and validate a raw request body into an operation.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::InvalidBody)?;
        let Value::Object(obj) = value else {
            return Err(ApiError::InvalidBody);
        };

        let present: Vec<&str> = OPERATION_KEYS
            .iter()
            .copied()
            .filter(|k| obj.contains_key(*k))
            .collect();
        if present.len() != 1 {
            return Err(ApiError::AmbiguousOrMissingOperation {
                found: present.len(),
            });
        }

        Self::validate_value(present[0], &obj)
    }

    /// Validate the selected key's value shape and build the typed variant
    fn validate_value(key: &str, obj: &Map<String, Value>) -> Result<Self> {
        let value = &obj[key];
        match key {
            "fibonacci" => value
                .as_u64()
                .map(Self::Fibonacci)
                .ok_or_else(|| ApiError::invalid_value("'fibonacci' must be a non-negative integer")),
            "prime" => integer_sequence(value, key).map(Self::Prime),
            "lcm" => integer_sequence(value, key).map(Self::Lcm),
            "hcf" => integer_sequence(value, key).map(Self::Hcf),
            "AI" => {
                let question = value
                    .as_str()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| ApiError::invalid_value("'AI' must be a non-empty string"))?;
                Ok(Self::Ask(question.to_string()))
            }
            // OPERATION_KEYS and this match are kept in lockstep
            _ => Err(ApiError::internal(format!("unhandled operation key '{key}'"))),
        }
    }

    /// Execute the operation and produce the `data` value for the envelope.
    ///
    /// All arithmetic operations are synchronous and pure; only the AI
    /// delegation suspends.
    pub async fn execute(&self, ai: &ModelClient) -> Result<Value> {
        let data = match self {
            Self::Fibonacci(n) => {
                let seq = ops::fibonacci(*n).map_err(|_| {
                    ApiError::invalid_value(format!(
                        "'fibonacci' of {n} exceeds the supported integer range"
                    ))
                })?;
                to_json(&seq)?
            }
            Self::Prime(xs) => to_json(&ops::filter_primes(xs))?,
            Self::Lcm(xs) => {
                let value = ops::fold_lcm(xs).map_err(|_| {
                    ApiError::invalid_value("'lcm' result exceeds the supported integer range")
                })?;
                to_json(&value)?
            }
            Self::Hcf(xs) => to_json(&ops::fold_hcf(xs))?,
            Self::Ask(question) => Value::String(ai.ask(question).await?),
        };
        Ok(data)
    }
}

/// Validate a non-empty array of integers
fn integer_sequence(value: &Value, key: &str) -> Result<Vec<i64>> {
    let items = value
        .as_array()
        .filter(|a| !a.is_empty())
        .ok_or_else(|| invalid_sequence(key))?;
    items
        .iter()
        .map(|v| v.as_i64().ok_or_else(|| invalid_sequence(key)))
        .collect()
}

fn invalid_sequence(key: &str) -> ApiError {
    ApiError::invalid_value(format!("'{key}' must be a non-empty array of integers"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(format!("serialization: {e}")))
}
