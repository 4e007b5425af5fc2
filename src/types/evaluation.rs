use std::fmt;

use serde::Serialize;

use super::entry::Entry;
use super::feature::FeatureMask;

/// A matched entry, recorded whether or not it is disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEntry {
    id: u32,
    disabled: bool,
    features: FeatureMask,
    description: String,
    cr_bugs: Vec<i64>,
    webkit_bugs: Vec<i64>,
}

impl ActiveEntry {
    pub(crate) fn from_entry(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            disabled: entry.disabled,
            features: entry.features,
            description: entry.description.clone(),
            cr_bugs: entry.cr_bugs.clone(),
            webkit_bugs: entry.webkit_bugs.clone(),
        }
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn features(&self) -> FeatureMask {
        self.features
    }
}

/// Why a feature is blacklisted, in the shape diagnostic pages consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistReason {
    pub description: String,
    pub cr_bugs: Vec<i64>,
    pub webkit_bugs: Vec<i64>,
}

/// Result of evaluating a [`RuleSet`](super::ruleset::RuleSet) against one
/// hardware snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
#[must_use]
pub struct Evaluation {
    features: FeatureMask,
    active: Vec<ActiveEntry>,
}

impl Evaluation {
    pub(crate) fn new(features: FeatureMask, active: Vec<ActiveEntry>) -> Self {
        Self { features, active }
    }

    /// Union of the feature masks of every matched, non-disabled entry.
    #[must_use]
    pub fn features(&self) -> FeatureMask {
        self.features
    }

    /// Matched entries in rule-set order, disabled ones included.
    #[must_use]
    pub fn active_entries(&self) -> &[ActiveEntry] {
        &self.active
    }

    #[must_use]
    pub fn active_ids(&self) -> Vec<u32> {
        self.active.iter().map(ActiveEntry::id).collect()
    }

    /// Ids of active entries whose mask intersects `feature` and whose
    /// disabled flag equals `disabled`.
    #[must_use]
    pub fn entry_ids(&self, feature: FeatureMask, disabled: bool) -> Vec<u32> {
        self.active
            .iter()
            .filter(|e| e.features.intersects(feature) && e.disabled == disabled)
            .map(ActiveEntry::id)
            .collect()
    }

    /// One reason per active, non-disabled entry.
    #[must_use]
    pub fn reasons(&self) -> Vec<BlacklistReason> {
        self.active
            .iter()
            .filter(|e| !e.disabled)
            .map(|e| BlacklistReason {
                description: e.description.clone(),
                cr_bugs: e.cr_bugs.clone(),
                webkit_bugs: e.webkit_bugs.clone(),
            })
            .collect()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "features: {}, active: [", self.features)?;
        for (i, e) in self.active.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", e.id)?;
            if e.disabled {
                f.write_str(" (disabled)")?;
            }
        }
        f.write_str("]")
    }
}
