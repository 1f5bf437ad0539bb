use crate::value::Value;

/// Result of a conversion attempt.
///
/// A failure still carries a usable value: the caller's default, else the
/// target's zero value, else [`Value::Null`].
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Success(Value),
    Failure(Value),
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Success(_))
    }

    pub fn value(&self) -> &Value {
        match self {
            ConversionOutcome::Success(v) | ConversionOutcome::Failure(v) => v,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ConversionOutcome::Success(v) | ConversionOutcome::Failure(v) => v,
        }
    }

    /// The `(success, value)` pair of the classic try-convert signature.
    pub fn into_parts(self) -> (bool, Value) {
        let ok = self.is_success();
        (ok, self.into_value())
    }

    /// Drops the fallback of a failure.
    pub fn into_result(self) -> Result<Value, Value> {
        match self {
            ConversionOutcome::Success(v) => Ok(v),
            ConversionOutcome::Failure(v) => Err(v),
        }
    }

    pub(crate) fn ok(self) -> Option<Value> {
        match self {
            ConversionOutcome::Success(v) => Some(v),
            ConversionOutcome::Failure(_) => None,
        }
    }
}
