use crate::event::PreparedEventData;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A single declarative constraint: a filter key bound to an operator and a
/// comparison value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub key: String,
    #[serde(flatten)]
    pub op: ConditionOp,
}

/// Comparison operator of a [`Condition`], tagged by `op` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ConditionOp {
    /// Strict value equality.
    Equals { value: Value },
    /// Numeric inclusive range. A non-numeric value never matches.
    Range { min: f64, max: f64 },
    /// Substring match on string values. A non-string value never matches.
    Contains { value: String },
    /// The key is present in the prepared data, whatever its value.
    Exists,
}

impl Condition {
    /// Evaluates this condition against a prepared data bag.
    ///
    /// An absent key is an unmet condition, never an error.
    pub fn is_satisfied_by(&self, data: &PreparedEventData) -> bool {
        match &self.op {
            ConditionOp::Exists => data.contains_key(&self.key),
            ConditionOp::Equals { value } => data.get(&self.key).is_some_and(|v| v == value),
            ConditionOp::Range { min, max } => data
                .get(&self.key)
                .and_then(Value::as_number)
                .is_some_and(|n| (*min..=*max).contains(&n)),
            ConditionOp::Contains { value } => data
                .get(&self.key)
                .and_then(Value::as_str)
                .is_some_and(|s| s.contains(value.as_str())),
        }
    }
}

/// A trigger filter: a [`Condition`] plus an optional declared default the
/// data-preparation step substitutes when the event carries no matching
/// attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerFilter {
    #[serde(flatten)]
    pub condition: Condition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl TriggerFilter {
    pub fn key(&self) -> &str {
        &self.condition.key
    }
}
