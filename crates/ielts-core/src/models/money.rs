use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Decimal amount as sent by the backend.
///
/// Prices arrive either as decimal strings (`"150000.00"`) or, for tests
/// without a price, as a bare number. Both are kept verbatim as text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Money(String);

impl Money {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(value) => Self(value),
            Raw::Number(value) => Self(value.to_string()),
        })
    }
}
