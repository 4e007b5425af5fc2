//! A declarative GPU and driver blacklist.
//!
//! A configuration tree lists entries; each entry matches hardware by OS,
//! PCI ids, driver strings and versions, GL strings and performance scores,
//! and names the graphics features to disable on a match. Exceptions nested
//! in an entry veto it for narrower hardware.
//!
//! ```
//! use gpu_blacklist::{FeatureMask, HardwareSnapshot, LoadOptions, OsFilter, OsType, RuleSet};
//!
//! let config = r#"{
//!     "version": "1.0",
//!     "entries": [{
//!         "id": 1,
//!         "os": { "type": "linux" },
//!         "vendor_id": "0x10de",
//!         "exceptions": [{ "device_id": ["0x1234"] }],
//!         "blacklist": ["webgl"]
//!     }]
//! }"#;
//! let ruleset = RuleSet::from_json(config, &LoadOptions::new("20.0").os_filter(OsFilter::All))?;
//!
//! let hw = HardwareSnapshot::new().os(OsType::Linux, "3.2").vendor_id(0x10de);
//! assert_eq!(ruleset.evaluate(&hw).features(), FeatureMask::WEBGL);
//! assert!(ruleset.evaluate(&hw.device_id(0x1234)).features().is_empty());
//! # Ok::<(), gpu_blacklist::BlacklistError>(())
//! ```
//!
//! Loading is all-or-nothing for structural problems (see [`LoadError`]).
//! Unknown keys and unknown feature names only flag the entry; an exception
//! with unknown keys is dropped from its parent. A criterion that fails to
//! parse is recorded in [`Entry::malformed_fields`] and the entry never
//! matches.

mod blacklist;
mod error;
mod evaluate;
mod load;
pub mod parse;
mod types;

pub use blacklist::Blacklist;
pub use error::BlacklistError;
pub use types::{
    numerical_to_lexical, ActiveEntry, BlacklistReason, CriterionError, Entry, EntryBuilder,
    Evaluation, FeatureMask, FloatCriterion, HardwareSnapshot, LoadError, LoadOptions,
    MultiGpuStyle, NumericOp, OsCriterion, OsFilter, OsType, PerformanceStats, RuleSet,
    RuleSetBuilder, StringCriterion, StringOp, Version, VersionCriterion, VersionStyle,
};
