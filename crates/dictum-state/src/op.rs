//! Composite operations built on a single path resolution.
//!
//! Each operation resolves its path once with `create` and transforms the
//! slot in place through [`PathMap::find_with`].

use crate::error::{DictumError, DictumResult};
use crate::{Path, PathMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A numeric amount used by increment/decrement operations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
}

impl Number {
    /// Convert to f64.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    /// Check if this is an integer.
    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Number::Int(_))
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Int(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Number::Int(v as i64)
    }
}

impl From<u32> for Number {
    fn from(v: u32) -> Self {
        Number::Int(v as i64)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Number::Float(v as f64)
    }
}

#[derive(Clone, Copy)]
enum Step {
    Up,
    Down,
}

impl Step {
    fn name(self) -> &'static str {
        match self {
            Step::Up => "increment",
            Step::Down => "decrement",
        }
    }
}

impl PathMap {
    /// Add `amount` to the number at `path` and return the new value.
    ///
    /// A missing or `null` slot counts as zero.
    pub fn increment(
        &mut self,
        path: impl Into<Path>,
        amount: impl Into<Number>,
    ) -> DictumResult<Value> {
        self.step_number(path.into(), amount.into(), Step::Up)
    }

    /// Subtract `amount` from the number at `path` and return the new value.
    ///
    /// A missing or `null` slot counts as zero.
    pub fn decrement(
        &mut self,
        path: impl Into<Path>,
        amount: impl Into<Number>,
    ) -> DictumResult<Value> {
        self.step_number(path.into(), amount.into(), Step::Down)
    }

    /// Push `value` onto the array at `path`.
    ///
    /// A missing or `null` slot becomes a one-element array.
    pub fn append(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> DictumResult<()> {
        let path = path.into();
        let value = value.into();
        let mut outcome = Ok(());
        self.find_with(&path, true, |slot| match slot {
            Value::Null => *slot = Value::Array(vec![value]),
            Value::Array(items) => items.push(value),
            _ => outcome = Err(DictumError::append_requires_array(path.clone())),
        });
        outcome
    }

    fn step_number(&mut self, path: Path, amount: Number, step: Step) -> DictumResult<Value> {
        let mut outcome = Err(DictumError::invalid_operation(format!(
            "{} could not resolve {path}",
            step.name()
        )));
        self.find_with(&path, true, |slot| {
            outcome = stepped(slot, &path, amount, step).map(|next| {
                *slot = next.clone();
                next
            });
        });
        outcome
    }
}

fn stepped(current: &Value, path: &Path, amount: Number, step: Step) -> DictumResult<Value> {
    let base = match current {
        Value::Null => serde_json::Number::from(0),
        Value::Number(n) => n.clone(),
        _ => return Err(DictumError::numeric_on_non_number(path.clone())),
    };

    if let (Some(i), Number::Int(a)) = (base.as_i64(), amount) {
        let value = match step {
            Step::Up => i.checked_add(a),
            Step::Down => i.checked_sub(a),
        }
        .ok_or_else(|| {
            DictumError::invalid_operation(format!("{} overflow at {path}: {i} and {a}", step.name()))
        })?;
        return Ok(Value::Number(value.into()));
    }

    let f = base
        .as_f64()
        .ok_or_else(|| DictumError::numeric_on_non_number(path.clone()))?;
    let result = match step {
        Step::Up => f + amount.as_f64(),
        Step::Down => f - amount.as_f64(),
    };
    finite_number_from_f64(path, result, step.name()).map(Value::Number)
}

fn finite_number_from_f64(path: &Path, value: f64, op: &str) -> DictumResult<serde_json::Number> {
    if !value.is_finite() {
        return Err(DictumError::invalid_operation(format!(
            "{op} produced non-finite value at {path}"
        )));
    }

    serde_json::Number::from_f64(value).ok_or_else(|| {
        DictumError::invalid_operation(format!("{op} produced non-representable value at {path}"))
    })
}
