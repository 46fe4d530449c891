//! Per-build collection of caching verdicts for reporting.

use crate::{CachingState, DisabledReason, DisabledReasonCategory, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Caching verdict recorded for one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCachingVerdict {
    /// Name of the task
    pub task: String,
    /// Verdict reached for the task
    #[serde(flatten)]
    pub state: CachingState,
}

/// Caching verdicts of all tasks in a build, in recording order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachingSummary {
    verdicts: Vec<TaskCachingVerdict>,
}

impl CachingSummary {
    /// Create an empty summary
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the verdict for `task` and emit a task event if it is disabled.
    ///
    /// Verdicts equal to [`CachingState::DISABLED`] repeat the same line for
    /// every task of a globally disabled build and are emitted at debug level.
    pub fn record(&mut self, task: impl Into<String>, state: CachingState) {
        let task = task.into();
        if state == CachingState::DISABLED {
            tracing::debug!(
                target: "cuenv::task",
                event_type = "task.caching_disabled",
                task_name = %task,
                category = %DisabledReasonCategory::BuildCacheDisabled,
                reason = state.disabled_reason().unwrap_or_default(),
            );
        } else if let Some(reason) = state.reason() {
            crate::emit_task_caching_disabled!(task, reason.category(), reason.description());
        }
        self.verdicts.push(TaskCachingVerdict { task, state });
    }

    /// All recorded verdicts
    #[must_use]
    pub fn verdicts(&self) -> &[TaskCachingVerdict] {
        &self.verdicts
    }

    /// Number of tasks with caching enabled
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.state.is_enabled()).count()
    }

    /// Number of tasks with caching disabled
    #[must_use]
    pub fn disabled_count(&self) -> usize {
        self.verdicts.len() - self.enabled_count()
    }

    /// Disabled tasks with their reasons
    pub fn disabled(&self) -> impl Iterator<Item = (&str, &DisabledReason)> {
        self.verdicts
            .iter()
            .filter_map(|v| v.state.reason().map(|reason| (v.task.as_str(), reason)))
    }

    /// Number of disabled tasks per category
    #[must_use]
    pub fn counts_by_category(&self) -> BTreeMap<DisabledReasonCategory, usize> {
        let mut counts = BTreeMap::new();
        for (_, reason) in self.disabled() {
            *counts.entry(reason.category()).or_insert(0) += 1;
        }
        counts
    }

    /// One line per disabled task, with the reason description verbatim.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<String> {
        self.disabled()
            .map(|(task, reason)| {
                format!(
                    "Caching disabled for task '{task}': {}",
                    reason.description()
                )
            })
            .collect()
    }

    /// Serialize the summary as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::serialization(format!("Failed to serialize caching summary: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CachingSummary {
        let mut summary = CachingSummary::new();
        summary.record("build", CachingState::ENABLED);
        summary.record(
            "lint",
            CachingState::disabled(
                DisabledReasonCategory::NoOutputsDeclared.reason("Task has no outputs declared"),
            ),
        );
        summary.record(
            "deploy",
            CachingState::disabled(
                DisabledReasonCategory::NotCacheable.reason("Declared with cache: false"),
            ),
        );
        summary.record(
            "fmt",
            CachingState::disabled(
                DisabledReasonCategory::NoOutputsDeclared.reason("Task has no outputs declared"),
            ),
        );
        summary
    }

    #[test]
    fn test_empty_summary() {
        let summary = CachingSummary::new();
        assert_eq!(summary.enabled_count(), 0);
        assert_eq!(summary.disabled_count(), 0);
        assert!(summary.counts_by_category().is_empty());
        assert!(summary.diagnostics().is_empty());
    }

    #[test]
    fn test_counts() {
        let summary = sample();
        assert_eq!(summary.verdicts().len(), 4);
        assert_eq!(summary.enabled_count(), 1);
        assert_eq!(summary.disabled_count(), 3);
    }

    #[test]
    fn test_counts_by_category() {
        let counts = sample().counts_by_category();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&DisabledReasonCategory::NoOutputsDeclared], 2);
        assert_eq!(counts[&DisabledReasonCategory::NotCacheable], 1);
    }

    #[test]
    fn test_disabled_preserves_order() {
        let summary = sample();
        let tasks: Vec<&str> = summary.disabled().map(|(task, _)| task).collect();
        assert_eq!(tasks, vec!["lint", "deploy", "fmt"]);
    }

    #[test]
    fn test_diagnostics_use_description_verbatim() {
        assert_eq!(
            sample().diagnostics(),
            vec![
                "Caching disabled for task 'lint': Task has no outputs declared",
                "Caching disabled for task 'deploy': Declared with cache: false",
                "Caching disabled for task 'fmt': Task has no outputs declared",
            ]
        );
    }

    #[test]
    fn test_globally_disabled_build() {
        let mut summary = CachingSummary::new();
        for task in ["a", "b"] {
            summary.record(task, CachingState::DISABLED);
        }
        assert_eq!(
            summary.counts_by_category()[&DisabledReasonCategory::BuildCacheDisabled],
            2
        );
        assert_eq!(
            summary.diagnostics()[0],
            "Caching disabled for task 'a': Task output caching is disabled"
        );
    }

    #[test]
    fn test_json_shape() {
        let mut summary = CachingSummary::new();
        summary.record("build", CachingState::ENABLED);
        summary.record("deploy", CachingState::DISABLED);

        let value: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "verdicts": [
                    { "task": "build", "state": "enabled" },
                    {
                        "task": "deploy",
                        "state": "disabled",
                        "category": "build_cache_disabled",
                        "description": "Task output caching is disabled"
                    }
                ]
            })
        );

        let parsed: CachingSummary = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, summary);
    }

    #[test]
    fn test_report_rejects_enabled_verdict_with_reason() {
        let report = serde_json::json!({
            "verdicts": [
                {
                    "task": "build",
                    "state": "enabled",
                    "category": "not_cacheable",
                    "description": "Task has no outputs declared"
                }
            ]
        });
        let err = serde_json::from_value::<CachingSummary>(report).unwrap_err();
        assert!(err.to_string().contains("must not carry a disabled reason"), "{err}");
    }

    #[test]
    fn test_report_rejects_disabled_verdict_without_description() {
        let report = serde_json::json!({
            "verdicts": [
                { "task": "deploy", "state": "disabled", "category": "not_cacheable" }
            ]
        });
        assert!(serde_json::from_value::<CachingSummary>(report).is_err());
    }
}
