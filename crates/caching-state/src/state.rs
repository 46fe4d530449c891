//! Cacheability verdict for a single task.

use crate::{DisabledReason, DisabledReasonCategory, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a task's outputs may be loaded from or stored to the cache.
///
/// A state is either [`Enabled`](Self::Enabled) or [`Disabled`](Self::Disabled)
/// with exactly one reason. There is no way to express "disabled" without
/// saying why, and no way to attach a reason to an enabled state.
///
/// Values are immutable once built. The decision logic that picks a verdict
/// produces one per task per build; cache lookup reads it through
/// [`is_enabled`](Self::is_enabled) and [`reason`](Self::reason).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case", try_from = "RawCachingState")]
pub enum CachingState {
    /// Caching applies to the task
    #[default]
    Enabled,

    /// Caching does not apply to the task
    Disabled(DisabledReason),
}

impl CachingState {
    /// Canonical enabled state.
    pub const ENABLED: Self = Self::Enabled;

    /// Canonical state for builds where output caching is turned off globally.
    pub const DISABLED: Self = Self::Disabled(DisabledReason::from_static(
        DisabledReasonCategory::BuildCacheDisabled,
        "Task output caching is disabled",
    ));

    /// The canonical enabled state.
    #[must_use]
    pub const fn enabled() -> Self {
        Self::ENABLED
    }

    /// The canonical globally disabled state.
    #[must_use]
    pub const fn globally_disabled() -> Self {
        Self::DISABLED
    }

    /// A disabled state carrying `reason`.
    #[must_use]
    pub const fn disabled(reason: DisabledReason) -> Self {
        Self::Disabled(reason)
    }

    /// A disabled state from an optional reason.
    ///
    /// Bridges call sites where the reason arrives as an `Option`, e.g. a
    /// decision routine that may or may not have found a cause.
    ///
    /// # Panics
    ///
    /// Panics if `reason` is `None`.
    #[must_use]
    #[track_caller]
    #[expect(
        clippy::panic,
        reason = "a disabled state without a reason is a defect in the decision logic"
    )]
    pub fn disabled_from(reason: Option<DisabledReason>) -> Self {
        match reason {
            Some(reason) => Self::Disabled(reason),
            None => panic!("disabled reason must be set if task output caching is disabled"),
        }
    }

    /// Returns `true` if caching applies.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Description of the disabled reason, or `None` when enabled.
    #[must_use]
    pub fn disabled_reason(&self) -> Option<&str> {
        self.reason().map(DisabledReason::description)
    }

    /// The disabled reason, or `None` when enabled.
    #[must_use]
    pub const fn reason(&self) -> Option<&DisabledReason> {
        match self {
            Self::Enabled => None,
            Self::Disabled(reason) => Some(reason),
        }
    }

    /// Category of the disabled reason, or `None` when enabled.
    #[must_use]
    pub fn category(&self) -> Option<DisabledReasonCategory> {
        self.reason().map(DisabledReason::category)
    }
}

impl From<DisabledReason> for CachingState {
    fn from(reason: DisabledReason) -> Self {
        Self::Disabled(reason)
    }
}

impl fmt::Display for CachingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => f.write_str("enabled (disabled reason: none)"),
            Self::Disabled(reason) => write!(f, "disabled (disabled reason: {reason})"),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum StateTag {
    Enabled,
    Disabled,
}

/// Unvalidated wire form of [`CachingState`].
#[derive(Deserialize)]
struct RawCachingState {
    state: StateTag,
    category: Option<DisabledReasonCategory>,
    description: Option<String>,
}

impl TryFrom<RawCachingState> for CachingState {
    type Error = Error;

    fn try_from(raw: RawCachingState) -> Result<Self> {
        match (raw.state, raw.category, raw.description) {
            (StateTag::Enabled, None, None) => Ok(Self::Enabled),
            (StateTag::Enabled, _, _) => Err(Error::inconsistent_state(
                "enabled state must not carry a disabled reason",
            )),
            (StateTag::Disabled, Some(category), Some(description)) => {
                DisabledReason::try_new(category, description).map(Self::Disabled)
            }
            (StateTag::Disabled, None, _) => Err(Error::inconsistent_state(
                "disabled state is missing its category",
            )),
            (StateTag::Disabled, Some(_), None) => Err(Error::inconsistent_state(
                "disabled state is missing its description",
            )),
        }
    }
}
