//! Categorized explanation for why a task's outputs are not cached.

use crate::{DisabledReasonCategory, Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Why caching is not applied to a task.
///
/// A reason always carries a non-blank description. Consumers should branch on
/// [`category`](Self::category); the description is meant for people.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDisabledReason")]
pub struct DisabledReason {
    category: DisabledReasonCategory,
    description: Cow<'static, str>,
}

impl DisabledReason {
    /// Create a reason from a category and a human-readable description.
    ///
    /// # Panics
    ///
    /// Panics if `description` is empty or whitespace. Use [`try_new`](Self::try_new)
    /// for descriptions that come from outside the program.
    #[must_use]
    #[track_caller]
    #[expect(
        clippy::panic,
        reason = "a blank description is a defect in the caller, not a runtime condition"
    )]
    pub fn new(category: DisabledReasonCategory, description: impl Into<Cow<'static, str>>) -> Self {
        match Self::try_new(category, description) {
            Ok(reason) => reason,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a reason, rejecting blank descriptions with an error.
    pub fn try_new(
        category: DisabledReasonCategory,
        description: impl Into<Cow<'static, str>>,
    ) -> Result<Self> {
        let description = description.into();
        if is_blank(&description) {
            return Err(Error::EmptyDescription { category });
        }
        Ok(Self {
            category,
            description,
        })
    }

    /// Create a reason from a static description in const context.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if `description` is
    /// blank, under the same rule as [`new`](Self::new).
    #[must_use]
    pub const fn from_static(category: DisabledReasonCategory, description: &'static str) -> Self {
        assert!(
            !is_blank(description),
            "disabled reason has an empty description"
        );
        Self {
            category,
            description: Cow::Borrowed(description),
        }
    }

    /// Category of this reason
    #[must_use]
    pub const fn category(&self) -> DisabledReasonCategory {
        self.category
    }

    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// `s.trim().is_empty()`, usable in const context.
#[allow(clippy::cast_lossless)]
const fn is_blank(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let lead = bytes[i];
        let (code, len) = if lead < 0x80 {
            (lead as u32, 1)
        } else if lead < 0xE0 {
            ((((lead & 0x1F) as u32) << 6) | (bytes[i + 1] & 0x3F) as u32, 2)
        } else if lead < 0xF0 {
            (
                (((lead & 0x0F) as u32) << 12)
                    | (((bytes[i + 1] & 0x3F) as u32) << 6)
                    | (bytes[i + 2] & 0x3F) as u32,
                3,
            )
        } else {
            // No four-byte scalar is whitespace.
            return false;
        };
        if !is_whitespace(code) {
            return false;
        }
        i += len;
    }
    true
}

/// The Unicode `White_Space` set, as used by `char::is_whitespace`.
const fn is_whitespace(code: u32) -> bool {
    matches!(
        code,
        0x09..=0x0D
            | 0x20
            | 0x85
            | 0xA0
            | 0x1680
            | 0x2000..=0x200A
            | 0x2028
            | 0x2029
            | 0x202F
            | 0x205F
            | 0x3000
    )
}

impl fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description, self.category)
    }
}

/// Unvalidated wire form of [`DisabledReason`].
#[derive(Deserialize)]
struct RawDisabledReason {
    category: DisabledReasonCategory,
    description: String,
}

impl TryFrom<RawDisabledReason> for DisabledReason {
    type Error = Error;

    fn try_from(raw: RawDisabledReason) -> Result<Self> {
        Self::try_new(raw.category, raw.description)
    }
}
