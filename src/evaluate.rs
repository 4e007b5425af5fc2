use crate::types::ActiveEntry;
use crate::{
    numerical_to_lexical, Entry, Evaluation, FeatureMask, FloatCriterion, HardwareSnapshot,
    MultiGpuStyle, OsType, Version,
};

pub(crate) fn evaluate(entries: &[Entry], hardware: &HardwareSnapshot) -> Evaluation {
    let os_type = hardware.os_type.resolve();
    let mut features = FeatureMask::NONE;
    let mut active = Vec::new();

    for entry in entries {
        if entry_matches(entry, os_type, hardware) {
            if !entry.disabled {
                features |= entry.features;
            }
            active.push(ActiveEntry::from_entry(entry));
        }
    }

    Evaluation::new(features, active)
}

/// All present criteria must hold and no exception may match.
pub(crate) fn entry_matches(entry: &Entry, os_type: OsType, hw: &HardwareSnapshot) -> bool {
    if !entry.malformed.is_empty() {
        return false;
    }
    if let Some(os) = &entry.os {
        if !os.contains(os_type, hw.os_version.as_ref()) {
            return false;
        }
    }
    if entry.vendor_id != 0 && entry.vendor_id != hw.vendor_id {
        return false;
    }
    if !entry.device_ids.is_empty() && !entry.device_ids.contains(&hw.device_id) {
        return false;
    }
    match entry.multi_gpu_style {
        MultiGpuStyle::Optimus if !hw.optimus => return false,
        MultiGpuStyle::AmdSwitchable if !hw.amd_switchable => return false,
        _ => {}
    }
    if let Some(vendor) = &entry.driver_vendor {
        if !vendor.contains(&hw.driver_vendor) {
            return false;
        }
    }
    if let Some(criterion) = &entry.driver_version {
        let candidate = if criterion.is_lexical() {
            numerical_to_lexical(&hw.driver_version)
        } else {
            hw.driver_version.as_str().into()
        };
        match candidate.parse::<Version>() {
            Ok(version) if criterion.contains(&version) => {}
            _ => return false,
        }
    }
    if let Some(criterion) = &entry.driver_date {
        match Version::from_date(&hw.driver_date) {
            Ok(date) if criterion.contains(&date) => {}
            _ => return false,
        }
    }
    if let Some(vendor) = &entry.gl_vendor {
        if !vendor.contains(&hw.gl_vendor) {
            return false;
        }
    }
    if let Some(renderer) = &entry.gl_renderer {
        if !renderer.contains(&hw.gl_renderer) {
            return false;
        }
    }
    let perf = &hw.performance;
    if !measured_within(entry.perf_graphics.as_ref(), perf.graphics)
        || !measured_within(entry.perf_gaming.as_ref(), perf.gaming)
        || !measured_within(entry.perf_overall.as_ref(), perf.overall)
    {
        return false;
    }

    !entry
        .exceptions
        .iter()
        .any(|exception| entry_matches(exception, os_type, hw))
}

/// An unmeasured score (`0.0`) fails any present criterion.
#[allow(clippy::float_cmp)]
fn measured_within(criterion: Option<&FloatCriterion>, score: f32) -> bool {
    match criterion {
        None => true,
        Some(criterion) => score != 0.0 && criterion.contains(score),
    }
}
