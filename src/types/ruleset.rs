use std::collections::HashSet;
use std::fmt;

use super::criterion::OsType;
use super::entry::Entry;
use super::error::LoadError;
use super::evaluation::Evaluation;
use super::hardware::HardwareSnapshot;

/// Which entries survive a load, by their OS criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OsFilter {
    /// Keep every entry.
    All,
    /// Keep entries for the configured platform and OS-agnostic entries.
    #[default]
    CurrentOs,
}

/// Settings that shape a load.
///
/// ```
/// use gpu_blacklist::{LoadOptions, OsFilter, OsType};
///
/// let options = LoadOptions::new("23.0.1271.64")
///     .os_filter(OsFilter::All)
///     .platform(OsType::Windows);
/// assert_eq!(options.browser_version(), "23.0.1271.64");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct LoadOptions {
    browser_version: String,
    os_filter: OsFilter,
    platform: OsType,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            browser_version: "0".to_owned(),
            os_filter: OsFilter::default(),
            platform: OsType::current(),
        }
    }
}

impl LoadOptions {
    /// Options for the given reference browser version, which entries'
    /// `browser_version` criteria are tested against.
    pub fn new(browser_version: &str) -> Self {
        Self {
            browser_version: browser_version.to_owned(),
            ..Self::default()
        }
    }

    pub fn os_filter(mut self, os_filter: OsFilter) -> Self {
        self.os_filter = os_filter;
        self
    }

    /// Override the platform used by [`OsFilter::CurrentOs`].
    pub fn platform(mut self, platform: OsType) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn browser_version(&self) -> &str {
        &self.browser_version
    }

    #[must_use]
    pub(crate) fn keeps(&self, entry: &Entry) -> bool {
        match self.os_filter {
            OsFilter::All => true,
            OsFilter::CurrentOs => matches!(
                entry.os_type(),
                Some(os) if os == OsType::Any || os == self.platform
            ),
        }
    }
}

/// Builder for constructing a [`RuleSet`] from entries directly.
///
/// # Example
///
/// ```
/// use gpu_blacklist::{EntryBuilder, FeatureMask, HardwareSnapshot, RuleSetBuilder};
///
/// let ruleset = RuleSetBuilder::new(1, 0)
///     .entry(EntryBuilder::new(1).vendor_id(0x10de).features(FeatureMask::WEBGL).build())
///     .build()
///     .unwrap();
///
/// let eval = ruleset.evaluate(&HardwareSnapshot::new().vendor_id(0x10de));
/// assert_eq!(eval.features(), FeatureMask::WEBGL);
/// ```
#[derive(Debug)]
#[must_use]
pub struct RuleSetBuilder {
    schema_version: (u16, u16),
    entries: Vec<Entry>,
}

impl RuleSetBuilder {
    pub fn new(major: u16, minor: u16) -> Self {
        Self {
            schema_version: (major, minor),
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Validate and freeze the entries.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] for a zero or duplicate id, or an entry without
    /// features.
    pub fn build(self) -> Result<RuleSet, LoadError> {
        let mut seen = HashSet::new();
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.id == 0 {
                return Err(LoadError::InvalidId { index });
            }
            if !seen.insert(entry.id) {
                return Err(LoadError::DuplicateId { id: entry.id });
            }
            if entry.features.is_empty() {
                return Err(LoadError::EmptyBlacklist { id: entry.id });
            }
        }
        Ok(RuleSet::new(self.schema_version, self.entries))
    }
}

/// An immutable, ordered set of blacklist entries. Thread-safe and designed
/// to live behind `Arc`; a reload builds a new one instead of mutating.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    pub(crate) schema_version: (u16, u16),
    pub(crate) entries: Vec<Entry>,
    pub(crate) max_entry_id: u32,
    pub(crate) contains_unknown_fields: bool,
}

impl RuleSet {
    pub(crate) fn new(schema_version: (u16, u16), entries: Vec<Entry>) -> Self {
        let max_entry_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        let contains_unknown_fields = entries
            .iter()
            .any(|e| e.has_unknown_fields || e.has_unknown_features);
        Self {
            schema_version,
            entries,
            max_entry_id,
            contains_unknown_fields,
        }
    }

    /// Build a rule set from an already-parsed configuration tree.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] on any structural failure; see the crate docs for
    /// which problems are fatal and which only flag the entry.
    pub fn from_value(tree: &serde_json::Value, options: &LoadOptions) -> Result<Self, LoadError> {
        crate::load::load(tree, options)
    }

    /// Parse JSON text and build a rule set.
    ///
    /// # Errors
    ///
    /// Returns [`BlacklistError`](crate::BlacklistError) on JSON or load failure.
    pub fn from_json(input: &str, options: &LoadOptions) -> Result<Self, crate::BlacklistError> {
        let tree: serde_json::Value = serde_json::from_str(input)?;
        Ok(Self::from_value(&tree, options)?)
    }

    /// Read a JSON file and build a rule set.
    ///
    /// # Errors
    ///
    /// Returns [`BlacklistError`](crate::BlacklistError) on I/O, JSON or load failure.
    pub fn from_file(
        path: impl AsRef<std::path::Path>,
        options: &LoadOptions,
    ) -> Result<Self, crate::BlacklistError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input, options)
    }

    /// Evaluate every entry against the snapshot. Nothing is cached.
    pub fn evaluate(&self, hardware: &HardwareSnapshot) -> Evaluation {
        crate::evaluate::evaluate(&self.entries, hardware)
    }

    /// Schema version as `major.minor`.
    #[must_use]
    pub fn version(&self) -> String {
        format!("{}.{}", self.schema_version.0, self.schema_version.1)
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Largest id among loaded entries, including those the OS filter dropped.
    #[must_use]
    pub fn max_entry_id(&self) -> u32 {
        self.max_entry_id
    }

    /// Whether any loaded entry had unknown fields or unknown features.
    #[must_use]
    pub fn contains_unknown_fields(&self) -> bool {
        self.contains_unknown_fields
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RuleSet(version {}, {} entries, max id {})",
            self.version(),
            self.entries.len(),
            self.max_entry_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntryBuilder, FeatureMask, OsCriterion, VersionCriterion};

    fn entry(id: u32) -> Entry {
        EntryBuilder::new(id).features(FeatureMask::WEBGL).build()
    }

    #[test]
    fn builder_collects_entries() {
        let ruleset = RuleSetBuilder::new(2, 5)
            .entry(entry(3))
            .entry(entry(9))
            .build()
            .unwrap();
        assert_eq!(ruleset.version(), "2.5");
        assert_eq!(ruleset.num_entries(), 2);
        assert_eq!(ruleset.max_entry_id(), 9);
        assert!(!ruleset.contains_unknown_fields());
        assert_eq!(ruleset.to_string(), "RuleSet(version 2.5, 2 entries, max id 9)");
    }

    #[test]
    fn builder_rejects_zero_id() {
        let result = RuleSetBuilder::new(1, 0).entry(entry(0)).build();
        assert!(matches!(result, Err(LoadError::InvalidId { index: 0 })));
    }

    #[test]
    fn builder_rejects_duplicate_id() {
        let result = RuleSetBuilder::new(1, 0).entry(entry(4)).entry(entry(4)).build();
        assert!(matches!(result, Err(LoadError::DuplicateId { id: 4 })));
    }

    #[test]
    fn builder_rejects_empty_features() {
        let result = RuleSetBuilder::new(1, 0)
            .entry(EntryBuilder::new(1).build())
            .build();
        assert!(matches!(result, Err(LoadError::EmptyBlacklist { id: 1 })));
    }

    #[test]
    fn empty_ruleset_defaults() {
        let ruleset = RuleSet::default();
        assert_eq!(ruleset.num_entries(), 0);
        assert_eq!(ruleset.max_entry_id(), 0);
        assert_eq!(ruleset.version(), "0.0");
    }

    #[test]
    fn os_filter_keeps_platform_and_any() {
        let options = LoadOptions::new("1").platform(OsType::Linux);
        let linux = EntryBuilder::new(1)
            .os(OsCriterion::new(OsType::Linux, VersionCriterion::any()))
            .build();
        let win = EntryBuilder::new(2)
            .os(OsCriterion::new(OsType::Windows, VersionCriterion::any()))
            .build();
        let any = EntryBuilder::new(3).build();
        assert!(options.keeps(&linux));
        assert!(!options.keeps(&win));
        assert!(options.keeps(&any));

        let all = options.os_filter(OsFilter::All);
        assert!(all.keeps(&win));
    }
}
