//! Version retention decisions.
//!
//! Versions gathered from every page of a listing are grouped per key, put in
//! newest-first order and split into the versions to keep and the versions to
//! delete. The version flagged latest always sorts first, so it can only end up
//! in a deletion set if nothing at all is retained, which [`RetainCount`] rules out.

use super::version::ObjectVersion;
use crate::domain::value_objects::{ObjectKey, RetainCount, VersionId};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

/// How versions of one key are put in newest-first order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionOrdering {
    /// Last-modified timestamp descending; ties keep listing order
    #[default]
    LastModified,
    /// Version id as an opaque string, descending
    VersionId,
}

impl VersionOrdering {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionOrdering::LastModified => "last-modified",
            VersionOrdering::VersionId => "version-id",
        }
    }

    /// `Ordering::Less` means `a` is newer than `b`; `Equal` leaves the pair in
    /// the order the backend listed it.
    pub fn compare(&self, a: &ObjectVersion, b: &ObjectVersion) -> Ordering {
        let latest_first = b.is_latest.cmp(&a.is_latest);

        let recency = match self {
            // Timestamps have one-second resolution and version ids carry no
            // time order, so equal timestamps fall back to the stable sort.
            VersionOrdering::LastModified => b.last_modified.cmp(&a.last_modified),
            VersionOrdering::VersionId => b.version_id.cmp(&a.version_id),
        };

        latest_first.then(recency)
    }

    /// Stable sort, newest first.
    pub fn sort(&self, versions: &mut [ObjectVersion]) {
        versions.sort_by(|a, b| self.compare(a, b));
    }
}

impl std::fmt::Display for VersionOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VersionOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-modified" => Ok(VersionOrdering::LastModified),
            "version-id" => Ok(VersionOrdering::VersionId),
            other => Err(format!(
                "unknown ordering '{}' (expected 'last-modified' or 'version-id')",
                other
            )),
        }
    }
}

/// Versions of every key seen during a listing, grouped by key
#[derive(Debug, Default)]
pub struct VersionGroups {
    groups: BTreeMap<ObjectKey, Vec<ObjectVersion>>,
    seen: HashSet<(ObjectKey, VersionId)>,
}

impl VersionGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one version, keeping listing order within its key.
    ///
    /// Returns false if this key/version pair was already present.
    pub fn insert(&mut self, version: ObjectVersion) -> bool {
        if !self
            .seen
            .insert((version.key.clone(), version.version_id.clone()))
        {
            return false;
        }

        self.groups
            .entry(version.key.clone())
            .or_default()
            .push(version);
        true
    }

    pub fn extend(&mut self, versions: impl IntoIterator<Item = ObjectVersion>) {
        for version in versions {
            self.insert(version);
        }
    }

    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    pub fn version_count(&self) -> usize {
        self.seen.len()
    }

    /// One plan per key, in lexicographic key order.
    pub fn plan(self, retain: RetainCount, ordering: VersionOrdering) -> Vec<RetentionPlan> {
        self.groups
            .into_iter()
            .map(|(key, versions)| RetentionPlan::new(key, versions, retain, ordering))
            .collect()
    }
}

/// Which versions of one key survive a pruning run
#[derive(Debug, Clone, PartialEq)]
pub struct RetentionPlan {
    pub key: ObjectKey,
    /// Newest first
    pub keep: Vec<ObjectVersion>,
    /// Newest first, i.e. in the order deletions are issued
    pub delete: Vec<ObjectVersion>,
}

impl RetentionPlan {
    pub fn new(
        key: ObjectKey,
        mut versions: Vec<ObjectVersion>,
        retain: RetainCount,
        ordering: VersionOrdering,
    ) -> Self {
        ordering.sort(&mut versions);
        let split_at = retain.get().min(versions.len());
        let delete = versions.split_off(split_at);

        Self {
            key,
            keep: versions,
            delete,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.delete.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn version(key: &str, id: &str, minutes: i64, is_latest: bool) -> ObjectVersion {
        ObjectVersion {
            key: ObjectKey::new(key.to_string()).unwrap(),
            version_id: VersionId::new(id.to_string()).unwrap(),
            is_latest,
            size: Some(10),
            etag: None,
            last_modified: Some(base_time() + Duration::minutes(minutes)),
        }
    }

    fn ids(versions: &[ObjectVersion]) -> Vec<&str> {
        versions.iter().map(|v| v.version_id.as_str()).collect()
    }

    fn retain(n: usize) -> RetainCount {
        RetainCount::new(n).unwrap()
    }

    #[test]
    fn test_readme_scenario() {
        let key = ObjectKey::new("docs/readme.txt".to_string()).unwrap();
        let versions = vec![
            version("docs/readme.txt", "v3", 3, false),
            version("docs/readme.txt", "v1", 1, false),
            version("docs/readme.txt", "v5", 5, true),
            version("docs/readme.txt", "v2", 2, false),
            version("docs/readme.txt", "v4", 4, false),
        ];

        for ordering in [VersionOrdering::LastModified, VersionOrdering::VersionId] {
            let plan = RetentionPlan::new(key.clone(), versions.clone(), retain(2), ordering);
            assert_eq!(ids(&plan.keep), vec!["v5", "v4"]);
            assert_eq!(ids(&plan.delete), vec!["v3", "v2", "v1"]);
        }
    }

    #[test]
    fn test_nothing_deleted_when_within_retention() {
        let key = ObjectKey::new("a.txt".to_string()).unwrap();
        let versions = vec![
            version("a.txt", "v1", 1, false),
            version("a.txt", "v2", 2, true),
        ];

        let plan = RetentionPlan::new(key.clone(), versions.clone(), retain(2), Default::default());
        assert!(plan.is_noop());

        let plan = RetentionPlan::new(key, versions, retain(5), Default::default());
        assert!(plan.is_noop());
        assert_eq!(plan.keep.len(), 2);
    }

    #[test]
    fn test_latest_kept_even_with_inconsistent_ids() {
        // Latest version has the smallest id and an older timestamp than a
        // noncurrent one; it must still be retained.
        let key = ObjectKey::new("a.txt".to_string()).unwrap();
        let versions = vec![
            version("a.txt", "aaa", 1, true),
            version("a.txt", "zzz", 9, false),
            version("a.txt", "mmm", 5, false),
        ];

        for ordering in [VersionOrdering::LastModified, VersionOrdering::VersionId] {
            let plan = RetentionPlan::new(key.clone(), versions.clone(), retain(1), ordering);
            assert_eq!(ids(&plan.keep), vec!["aaa"]);
            assert!(plan.delete.iter().all(|v| !v.is_latest));
        }
    }

    #[test]
    fn test_timestamp_ordering_differs_from_id_ordering() {
        let key = ObjectKey::new("a.txt".to_string()).unwrap();
        let versions = vec![
            version("a.txt", "latest", 10, true),
            version("a.txt", "b-newer", 8, false),
            version("a.txt", "z-older", 2, false),
        ];

        let by_time = RetentionPlan::new(
            key.clone(),
            versions.clone(),
            retain(2),
            VersionOrdering::LastModified,
        );
        assert_eq!(ids(&by_time.delete), vec!["z-older"]);

        let by_id = RetentionPlan::new(key, versions, retain(2), VersionOrdering::VersionId);
        assert_eq!(ids(&by_id.delete), vec!["b-newer"]);
    }

    #[test]
    fn test_equal_timestamps_keep_listing_order() {
        // Listed newest first; ids are random and sort the other way round.
        let key = ObjectKey::new("a.txt".to_string()).unwrap();
        let versions = vec![
            version("a.txt", "Mlatest", 0, true),
            version("a.txt", "Anewer", 0, false),
            version("a.txt", "Zolder", 0, false),
        ];

        let plan = RetentionPlan::new(key, versions, retain(2), VersionOrdering::LastModified);
        assert_eq!(ids(&plan.keep), vec!["Mlatest", "Anewer"]);
        assert_eq!(ids(&plan.delete), vec!["Zolder"]);
    }

    #[test]
    fn test_missing_timestamp_sorts_oldest() {
        let key = ObjectKey::new("a.txt".to_string()).unwrap();
        let mut undated = version("a.txt", "undated", 0, false);
        undated.last_modified = None;
        let versions = vec![undated, version("a.txt", "dated", 1, false)];

        let plan = RetentionPlan::new(key, versions, retain(1), VersionOrdering::LastModified);
        assert_eq!(ids(&plan.keep), vec!["dated"]);
        assert_eq!(ids(&plan.delete), vec!["undated"]);
    }

    #[test]
    fn test_groups_merge_and_deduplicate() {
        let mut groups = VersionGroups::new();
        groups.extend(vec![
            version("b.txt", "v1", 1, false),
            version("a.txt", "v1", 1, true),
            version("b.txt", "v2", 2, true),
        ]);
        // Same version delivered again
        assert!(!groups.insert(version("b.txt", "v2", 2, true)));

        assert_eq!(groups.key_count(), 2);
        assert_eq!(groups.version_count(), 3);

        let plans = groups.plan(retain(1), VersionOrdering::LastModified);
        let keys: Vec<&str> = plans.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["a.txt", "b.txt"]);
        assert!(plans[0].is_noop());
        assert_eq!(ids(&plans[1].delete), vec!["v1"]);
    }

    #[test]
    fn test_ordering_from_str() {
        assert_eq!(
            "version-id".parse::<VersionOrdering>(),
            Ok(VersionOrdering::VersionId)
        );
        assert_eq!(
            "last-modified".parse::<VersionOrdering>(),
            Ok(VersionOrdering::LastModified)
        );
        assert!("newest".parse::<VersionOrdering>().is_err());
    }

    #[test]
    fn test_deletion_count_matches_excess() {
        let key = ObjectKey::new("k".to_string()).unwrap();
        for total in 1..=6usize {
            let versions: Vec<ObjectVersion> = (0..total)
                .map(|i| version("k", &format!("v{}", i), i as i64, i + 1 == total))
                .collect();

            for n in 1..=7usize {
                let plan = RetentionPlan::new(
                    key.clone(),
                    versions.clone(),
                    retain(n),
                    Default::default(),
                );
                assert_eq!(plan.delete.len(), total.saturating_sub(n));
                assert_eq!(plan.keep.len(), total.min(n));
                assert!(plan.keep[0].is_latest);
            }
        }
    }
}
