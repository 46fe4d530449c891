//! Closed classification of why task output caching was not applied.

use crate::{DisabledReason, Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Category of a caching disabled reason.
///
/// Categories are used to aggregate and report disabled tasks independent of
/// the free-text description carried by a [`DisabledReason`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledReasonCategory {
    /// Cause could not be determined
    Unknown,

    /// Output caching is turned off for the whole build
    BuildCacheDisabled,

    /// The task declares itself as not cacheable
    NotCacheable,

    /// A condition required for caching the task was not met
    CacheIfConditionNotSatisfied,

    /// A condition that forbids caching the task was met
    DoNotCacheIfConditionSatisfied,

    /// The task declares no outputs, so there is nothing to store
    NoOutputsDeclared,

    /// An output cannot be stored in the cache (e.g. an unbounded directory tree)
    NonCacheableOutput,

    /// Another task writes to the same output locations
    OverlappingOutputs,

    /// The task implementation cannot be fingerprinted reliably
    NonCacheableImplementation,

    /// One or more inputs cannot be fingerprinted reliably
    NonCacheableInputs,

    /// Task validation failed
    ValidationFailure,
}

impl DisabledReasonCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Unknown,
        Self::BuildCacheDisabled,
        Self::NotCacheable,
        Self::CacheIfConditionNotSatisfied,
        Self::DoNotCacheIfConditionSatisfied,
        Self::NoOutputsDeclared,
        Self::NonCacheableOutput,
        Self::OverlappingOutputs,
        Self::NonCacheableImplementation,
        Self::NonCacheableInputs,
        Self::ValidationFailure,
    ];

    /// Stable snake_case identifier, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::BuildCacheDisabled => "build_cache_disabled",
            Self::NotCacheable => "not_cacheable",
            Self::CacheIfConditionNotSatisfied => "cache_if_condition_not_satisfied",
            Self::DoNotCacheIfConditionSatisfied => "do_not_cache_if_condition_satisfied",
            Self::NoOutputsDeclared => "no_outputs_declared",
            Self::NonCacheableOutput => "non_cacheable_output",
            Self::OverlappingOutputs => "overlapping_outputs",
            Self::NonCacheableImplementation => "non_cacheable_implementation",
            Self::NonCacheableInputs => "non_cacheable_inputs",
            Self::ValidationFailure => "validation_failure",
        }
    }

    /// Build a [`DisabledReason`] of this category.
    ///
    /// # Panics
    ///
    /// Panics if `description` is blank, see [`DisabledReason::new`].
    #[must_use]
    #[track_caller]
    pub fn reason(self, description: impl Into<Cow<'static, str>>) -> DisabledReason {
        DisabledReason::new(self, description)
    }
}

impl fmt::Display for DisabledReasonCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisabledReasonCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| Error::unknown_category(s))
    }
}
