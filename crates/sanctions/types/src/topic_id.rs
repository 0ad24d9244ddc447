//! Topic identifiers: the opaque token naming a sanction's thread
//!
//! Discussion topics are named by 88-bit identifiers. The title of a topic
//! page carries either the base-36 form (up to 19 characters) or the
//! 22-character hexadecimal form. Matching is case-insensitive: input is
//! lower-cased before it is inspected.

use crate::{SanctionError, SanctionResult};
use serde::{Deserialize, Serialize};

/// Length of the canonical base-36 rendering
pub const ALNUM_LEN: usize = 19;

/// Length of the hexadecimal rendering
pub const HEX_LEN: usize = 22;

/// Number of significant bits in a topic identifier
pub const TOPIC_ID_BITS: u32 = 88;

const MAX_VALUE: u128 = (1u128 << TOPIC_ID_BITS) - 1;

/// Identifier of a discussion topic, and therefore of at most one sanction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicId(u128);

impl TopicId {
    /// Build an identifier from its numeric value
    pub fn from_value(value: u128) -> SanctionResult<Self> {
        if value > MAX_VALUE {
            return Err(SanctionError::InvalidIdentifier(format!(
                "value exceeds {} bits",
                TOPIC_ID_BITS
            )));
        }
        Ok(Self(value))
    }

    /// Parse raw title text, yielding `None` for anything malformed.
    ///
    /// An unparseable token is not an error for callers: it simply means the
    /// page is not a sanction topic.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::try_parse(raw).ok()
    }

    /// Parse raw title text, reporting why it was rejected
    pub fn try_parse(raw: &str) -> SanctionResult<Self> {
        let normalized = raw.to_lowercase();
        let len = normalized.len();

        if len == HEX_LEN && normalized.bytes().all(|b| b.is_ascii_hexdigit()) {
            let value = u128::from_str_radix(&normalized, 16)
                .map_err(|e| SanctionError::InvalidIdentifier(e.to_string()))?;
            return Self::from_value(value);
        }

        if len == 0 || len > ALNUM_LEN {
            return Err(SanctionError::InvalidIdentifier(format!(
                "expected 1-{} base-36 or {} hex characters, got {}",
                ALNUM_LEN, HEX_LEN, len
            )));
        }

        let mut value: u128 = 0;
        for c in normalized.chars() {
            let digit = c.to_digit(36).ok_or_else(|| {
                SanctionError::InvalidIdentifier(format!("unexpected character {:?}", c))
            })?;
            value = value
                .checked_mul(36)
                .and_then(|v| v.checked_add(u128::from(digit)))
                .ok_or_else(|| SanctionError::InvalidIdentifier("value overflow".into()))?;
        }

        Self::from_value(value)
    }

    /// Numeric value of the identifier
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Canonical 19-character base-36 form
    pub fn alphadecimal(&self) -> String {
        let mut digits = Vec::with_capacity(ALNUM_LEN);
        let mut rest = self.0;
        while rest > 0 {
            let digit = (rest % 36) as u32;
            // digit < 36, so from_digit always succeeds
            digits.push(std::char::from_digit(digit, 36).unwrap_or('0'));
            rest /= 36;
        }
        while digits.len() < ALNUM_LEN {
            digits.push('0');
        }
        digits.iter().rev().collect()
    }

    /// 22-character hexadecimal form
    pub fn hex(&self) -> String {
        format!("{:0width$x}", self.0, width = HEX_LEN)
    }
}

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.alphadecimal())
    }
}

impl std::str::FromStr for TopicId {
    type Err = SanctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl TryFrom<String> for TopicId {
    type Error = SanctionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(&value)
    }
}

impl From<TopicId> for String {
    fn from(id: TopicId) -> Self {
        id.alphadecimal()
    }
}
