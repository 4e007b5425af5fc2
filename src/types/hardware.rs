use super::criterion::OsType;
use super::version::Version;

/// Performance scores reported for the GPU. A score of `0.0` means it has not
/// been measured.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerformanceStats {
    pub graphics: f32,
    pub gaming: f32,
    pub overall: f32,
}

/// Snapshot of the platform and GPU that rules are evaluated against.
///
/// Built with chained setters, every field optional:
///
/// ```
/// use gpu_blacklist::{HardwareSnapshot, OsType};
///
/// let hw = HardwareSnapshot::new()
///     .os(OsType::Linux, "3.2.0-23-generic")
///     .vendor_id(0x10de)
///     .device_id(0x0640)
///     .driver_version("295.40")
///     .gl_renderer("GeForce 9500 GT/PCIe/SSE2");
/// assert_eq!(hw.os_version().map(ToString::to_string), Some("3.2.0".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HardwareSnapshot {
    pub(crate) os_type: OsType,
    pub(crate) os_version: Option<Version>,
    pub(crate) vendor_id: u32,
    pub(crate) device_id: u32,
    pub(crate) optimus: bool,
    pub(crate) amd_switchable: bool,
    pub(crate) driver_vendor: String,
    pub(crate) driver_version: String,
    pub(crate) driver_date: String,
    pub(crate) gl_vendor: String,
    pub(crate) gl_renderer: String,
    pub(crate) performance: PerformanceStats,
}

impl HardwareSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the OS family and release string. The release is cut at the first
    /// character that is neither a digit nor a dot; an unparsable release is
    /// treated as unknown. [`OsType::Any`] stands for the current platform.
    #[must_use]
    pub fn os(mut self, os_type: OsType, release: &str) -> Self {
        self.os_type = os_type;
        self.os_version = Version::from_os_release(release);
        self
    }

    #[must_use]
    pub fn os_type(&self) -> OsType {
        self.os_type
    }

    #[must_use]
    pub fn os_version(&self) -> Option<&Version> {
        self.os_version.as_ref()
    }

    #[must_use]
    pub fn vendor_id(mut self, vendor_id: u32) -> Self {
        self.vendor_id = vendor_id;
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: u32) -> Self {
        self.device_id = device_id;
        self
    }

    #[must_use]
    pub fn optimus(mut self, optimus: bool) -> Self {
        self.optimus = optimus;
        self
    }

    #[must_use]
    pub fn amd_switchable(mut self, amd_switchable: bool) -> Self {
        self.amd_switchable = amd_switchable;
        self
    }

    #[must_use]
    pub fn driver_vendor(mut self, vendor: &str) -> Self {
        vendor.clone_into(&mut self.driver_vendor);
        self
    }

    #[must_use]
    pub fn driver_version(mut self, version: &str) -> Self {
        version.clone_into(&mut self.driver_version);
        self
    }

    /// Driver date as reported by the OS, `mm-dd-yyyy`.
    #[must_use]
    pub fn driver_date(mut self, date: &str) -> Self {
        date.clone_into(&mut self.driver_date);
        self
    }

    #[must_use]
    pub fn gl_vendor(mut self, vendor: &str) -> Self {
        vendor.clone_into(&mut self.gl_vendor);
        self
    }

    #[must_use]
    pub fn gl_renderer(mut self, renderer: &str) -> Self {
        renderer.clone_into(&mut self.gl_renderer);
        self
    }

    #[must_use]
    pub fn performance(mut self, stats: PerformanceStats) -> Self {
        self.performance = stats;
        self
    }
}
