mod criterion;
mod entry;
mod error;
mod evaluation;
mod feature;
mod hardware;
mod op;
mod ruleset;
mod version;

pub use criterion::{
    FloatCriterion, MultiGpuStyle, OsCriterion, OsType, StringCriterion, VersionCriterion,
};
pub use entry::{Entry, EntryBuilder};
pub use error::{CriterionError, LoadError};
pub use evaluation::{ActiveEntry, BlacklistReason, Evaluation};
pub use feature::FeatureMask;
pub use hardware::{HardwareSnapshot, PerformanceStats};
pub use op::{NumericOp, StringOp, VersionStyle};
pub use ruleset::{LoadOptions, OsFilter, RuleSet, RuleSetBuilder};
pub use version::{numerical_to_lexical, Version};
