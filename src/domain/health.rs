//! Composite health model.
//!
//! A `ProbeResult` is what a single dependency check produced; a
//! `HealthReport` is the merged, caller-facing view of all of them.
//! The report only ever carries `"ok"` / `"unreachable"` per dependency,
//! error detail stays on the `ProbeResult` and goes to the logs.

use std::collections::BTreeMap;

use serde::Serialize;

/// HTTP status returned when every dependency is reachable.
pub const STATUS_HEALTHY: u16 = 200;

/// HTTP status returned when at least one dependency is unreachable.
pub const STATUS_UNHEALTHY: u16 = 503;

/// Outcome of one probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Stable dependency name (`"database"`, `"redis"`).
    pub name: String,
    /// Whether the round-trip completed in time without error.
    pub healthy: bool,
    /// Internal error text. Logged, never serialized to callers.
    pub error: Option<String>,
}

impl ProbeResult {
    /// A successful probe.
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            healthy: true,
            error: None,
        }
    }

    /// A failed probe carrying the reason for the logs.
    pub fn unhealthy(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            healthy: false,
            error: Some(error.into()),
        }
    }
}

/// Externally visible status of a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    Ok,
    Unreachable,
}

impl DependencyStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Unreachable => "unreachable",
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl std::fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merged health of every registered dependency.
///
/// Serializes transparently to `{"database":"ok","redis":"unreachable"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HealthReport {
    statuses: BTreeMap<String, DependencyStatus>,
}

impl HealthReport {
    /// Merge probe results into a report.
    ///
    /// A name that appears more than once is unreachable if any of its
    /// results is unhealthy.
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a ProbeResult>,
    {
        let mut statuses = BTreeMap::new();
        for result in results {
            let status = if result.healthy {
                DependencyStatus::Ok
            } else {
                DependencyStatus::Unreachable
            };
            statuses
                .entry(result.name.clone())
                .and_modify(|existing: &mut DependencyStatus| {
                    if !status.is_ok() {
                        *existing = DependencyStatus::Unreachable;
                    }
                })
                .or_insert(status);
        }
        Self { statuses }
    }

    /// Logical AND of every dependency status.
    pub fn is_healthy(&self) -> bool {
        self.statuses.values().all(|s| s.is_ok())
    }

    /// `200` when every dependency is ok, `503` otherwise.
    pub fn status_code(&self) -> u16 {
        if self.is_healthy() {
            STATUS_HEALTHY
        } else {
            STATUS_UNHEALTHY
        }
    }

    pub fn status_of(&self, name: &str) -> Option<DependencyStatus> {
        self.statuses.get(name).copied()
    }

    pub fn statuses(&self) -> &BTreeMap<String, DependencyStatus> {
        &self.statuses
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(db: bool, redis: bool) -> HealthReport {
        let results = [
            if db {
                ProbeResult::healthy("database")
            } else {
                ProbeResult::unhealthy("database", "connection refused")
            },
            if redis {
                ProbeResult::healthy("redis")
            } else {
                ProbeResult::unhealthy("redis", "i/o timeout")
            },
        ];
        HealthReport::from_results(&results)
    }

    #[test]
    fn test_all_outcome_combinations() {
        for (db, redis) in [(true, true), (true, false), (false, true), (false, false)] {
            let r = report(db, redis);
            let expected = if db && redis { 200 } else { 503 };
            assert_eq!(r.status_code(), expected, "db={db} redis={redis}");
            assert_eq!(r.status_of("database").map(DependencyStatus::is_ok), Some(db));
            assert_eq!(r.status_of("redis").map(DependencyStatus::is_ok), Some(redis));
        }
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let json = serde_json::to_string(&report(true, true)).unwrap();
        assert_eq!(json, r#"{"database":"ok","redis":"ok"}"#);

        let json = serde_json::to_string(&report(false, true)).unwrap();
        assert_eq!(json, r#"{"database":"unreachable","redis":"ok"}"#);
    }

    #[test]
    fn test_error_text_never_serialized() {
        let json = serde_json::to_string(&report(false, false)).unwrap();
        assert!(!json.contains("connection refused"));
        assert!(!json.contains("timeout"));
    }

    #[test]
    fn test_duplicate_name_is_and_merged() {
        let results = [
            ProbeResult::healthy("database"),
            ProbeResult::unhealthy("database", "boom"),
        ];
        let r = HealthReport::from_results(&results);
        assert_eq!(r.len(), 1);
        assert_eq!(r.status_of("database"), Some(DependencyStatus::Unreachable));
        assert_eq!(r.status_code(), STATUS_UNHEALTHY);
    }

    #[test]
    fn test_empty_report_is_healthy() {
        let r = HealthReport::from_results(std::iter::empty());
        assert!(r.is_empty());
        assert_eq!(r.status_code(), STATUS_HEALTHY);
    }
}
