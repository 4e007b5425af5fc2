use super::criterion::{
    FloatCriterion, MultiGpuStyle, OsCriterion, OsType, StringCriterion, VersionCriterion,
};
use super::feature::FeatureMask;
use super::hardware::HardwareSnapshot;

pub(crate) const DEFAULT_DESCRIPTION: &str = "The GPU is unavailable for an unexplained reason.";

/// One blacklist rule: a conjunction of optional hardware criteria, the
/// features it disables, and exceptions that veto it.
///
/// Exceptions reuse the criteria but carry no id, feature mask or
/// disabled flag of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub(crate) id: u32,
    pub(crate) disabled: bool,
    pub(crate) description: String,
    pub(crate) cr_bugs: Vec<i64>,
    pub(crate) webkit_bugs: Vec<i64>,

    pub(crate) os: Option<OsCriterion>,
    pub(crate) vendor_id: u32,
    pub(crate) device_ids: Vec<u32>,
    pub(crate) multi_gpu_style: MultiGpuStyle,
    pub(crate) driver_vendor: Option<StringCriterion>,
    pub(crate) driver_version: Option<VersionCriterion>,
    pub(crate) driver_date: Option<VersionCriterion>,
    pub(crate) gl_vendor: Option<StringCriterion>,
    pub(crate) gl_renderer: Option<StringCriterion>,
    pub(crate) perf_graphics: Option<FloatCriterion>,
    pub(crate) perf_gaming: Option<FloatCriterion>,
    pub(crate) perf_overall: Option<FloatCriterion>,

    pub(crate) features: FeatureMask,
    pub(crate) exceptions: Vec<Entry>,

    /// Criteria that were present but could not be built.
    pub(crate) malformed: Vec<&'static str>,
    pub(crate) has_unknown_fields: bool,
    pub(crate) has_unknown_features: bool,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            id: 0,
            disabled: false,
            description: DEFAULT_DESCRIPTION.to_owned(),
            cr_bugs: Vec::new(),
            webkit_bugs: Vec::new(),
            os: None,
            vendor_id: 0,
            device_ids: Vec::new(),
            multi_gpu_style: MultiGpuStyle::None,
            driver_vendor: None,
            driver_version: None,
            driver_date: None,
            gl_vendor: None,
            gl_renderer: None,
            perf_graphics: None,
            perf_gaming: None,
            perf_overall: None,
            features: FeatureMask::NONE,
            exceptions: Vec::new(),
            malformed: Vec::new(),
            has_unknown_fields: false,
            has_unknown_features: false,
        }
    }
}

impl Entry {
    /// `0` for exceptions.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn cr_bugs(&self) -> &[i64] {
        &self.cr_bugs
    }

    #[must_use]
    pub fn webkit_bugs(&self) -> &[i64] {
        &self.webkit_bugs
    }

    #[must_use]
    pub fn features(&self) -> FeatureMask {
        self.features
    }

    #[must_use]
    pub fn exceptions(&self) -> &[Entry] {
        &self.exceptions
    }

    /// The OS family the entry targets: [`OsType::Any`] without an OS
    /// criterion, `None` when the OS criterion is malformed.
    #[must_use]
    pub fn os_type(&self) -> Option<OsType> {
        match &self.os {
            Some(os) => Some(os.os_type()),
            None if self.malformed.contains(&"os") => None,
            None => Some(OsType::Any),
        }
    }

    /// Names of criteria that were present but malformed. An entry with any
    /// malformed criterion never matches.
    #[must_use]
    pub fn malformed_fields(&self) -> &[&'static str] {
        &self.malformed
    }

    #[must_use]
    pub fn has_unknown_fields(&self) -> bool {
        self.has_unknown_fields
    }

    #[must_use]
    pub fn has_unknown_features(&self) -> bool {
        self.has_unknown_features
    }

    /// Whether this entry applies to the snapshot, exceptions included.
    #[must_use]
    pub fn contains(&self, hardware: &HardwareSnapshot) -> bool {
        crate::evaluate::entry_matches(self, hardware.os_type.resolve(), hardware)
    }
}

/// Builds [`Entry`] values without going through a configuration tree.
///
/// ```
/// use gpu_blacklist::{EntryBuilder, FeatureMask, StringCriterion, StringOp};
///
/// let entry = EntryBuilder::new(7)
///     .vendor_id(0x1002)
///     .gl_renderer(StringCriterion::new(StringOp::Contains, "radeon"))
///     .features(FeatureMask::WEBGL)
///     .exception(EntryBuilder::for_exception().device_ids([0x68b8]).build())
///     .build();
/// assert_eq!(entry.id(), 7);
/// assert_eq!(entry.exceptions().len(), 1);
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct EntryBuilder {
    entry: Entry,
}

impl EntryBuilder {
    pub fn new(id: u32) -> Self {
        Self {
            entry: Entry {
                id,
                ..Entry::default()
            },
        }
    }

    /// Start an exception; it has no id and no features.
    pub fn for_exception() -> Self {
        Self::default()
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.entry.disabled = disabled;
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        description.clone_into(&mut self.entry.description);
        self
    }

    pub fn cr_bugs(mut self, bugs: impl IntoIterator<Item = i64>) -> Self {
        self.entry.cr_bugs = bugs.into_iter().collect();
        self
    }

    pub fn webkit_bugs(mut self, bugs: impl IntoIterator<Item = i64>) -> Self {
        self.entry.webkit_bugs = bugs.into_iter().collect();
        self
    }

    pub fn os(mut self, os: OsCriterion) -> Self {
        self.entry.os = Some(os);
        self
    }

    pub fn vendor_id(mut self, vendor_id: u32) -> Self {
        self.entry.vendor_id = vendor_id;
        self
    }

    pub fn device_ids(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.entry.device_ids = ids.into_iter().collect();
        self
    }

    pub fn multi_gpu_style(mut self, style: MultiGpuStyle) -> Self {
        self.entry.multi_gpu_style = style;
        self
    }

    pub fn driver_vendor(mut self, criterion: StringCriterion) -> Self {
        self.entry.driver_vendor = Some(criterion);
        self
    }

    pub fn driver_version(mut self, criterion: VersionCriterion) -> Self {
        self.entry.driver_version = Some(criterion);
        self
    }

    /// The criterion's bounds must be dates (see [`VersionCriterion::parse_date`]).
    pub fn driver_date(mut self, criterion: VersionCriterion) -> Self {
        self.entry.driver_date = Some(criterion);
        self
    }

    pub fn gl_vendor(mut self, criterion: StringCriterion) -> Self {
        self.entry.gl_vendor = Some(criterion);
        self
    }

    pub fn gl_renderer(mut self, criterion: StringCriterion) -> Self {
        self.entry.gl_renderer = Some(criterion);
        self
    }

    pub fn perf_graphics(mut self, criterion: FloatCriterion) -> Self {
        self.entry.perf_graphics = Some(criterion);
        self
    }

    pub fn perf_gaming(mut self, criterion: FloatCriterion) -> Self {
        self.entry.perf_gaming = Some(criterion);
        self
    }

    pub fn perf_overall(mut self, criterion: FloatCriterion) -> Self {
        self.entry.perf_overall = Some(criterion);
        self
    }

    pub fn features(mut self, features: FeatureMask) -> Self {
        self.entry.features = features;
        self
    }

    pub fn exception(mut self, exception: Entry) -> Self {
        self.entry.exceptions.push(exception);
        self
    }

    pub fn build(self) -> Entry {
        self.entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_description() {
        let entry = EntryBuilder::new(1).build();
        assert_eq!(entry.description(), DEFAULT_DESCRIPTION);
    }

    #[test]
    fn os_type_defaults_to_any() {
        let entry = EntryBuilder::new(1).build();
        assert_eq!(entry.os_type(), Some(OsType::Any));

        let entry = EntryBuilder::new(1)
            .os(OsCriterion::new(OsType::Windows, VersionCriterion::any()))
            .build();
        assert_eq!(entry.os_type(), Some(OsType::Windows));
    }

    #[test]
    fn malformed_os_has_no_type() {
        let mut entry = EntryBuilder::new(1).build();
        entry.malformed.push("os");
        assert_eq!(entry.os_type(), None);
    }

    #[test]
    fn builder_sets_metadata() {
        let entry = EntryBuilder::new(42)
            .disabled(true)
            .description("Intel GMA 500 is too slow")
            .cr_bugs([72938])
            .webkit_bugs([1, 2])
            .features(FeatureMask::ALL)
            .build();
        assert_eq!(entry.id(), 42);
        assert!(entry.disabled());
        assert_eq!(entry.description(), "Intel GMA 500 is too slow");
        assert_eq!(entry.cr_bugs(), &[72938]);
        assert_eq!(entry.webkit_bugs(), &[1, 2]);
        assert_eq!(entry.features(), FeatureMask::ALL);
        assert!(!entry.has_unknown_fields());
        assert!(entry.malformed_fields().is_empty());
    }
}
