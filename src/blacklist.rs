use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::debug;

use crate::{BlacklistError, Evaluation, HardwareSnapshot, LoadError, LoadOptions, RuleSet};

/// The currently published [`RuleSet`].
///
/// Loads build a complete replacement and swap it in; evaluations work on an
/// `Arc` snapshot, so they see either the old or the new rule set in full. A
/// failed load leaves the published rule set untouched.
#[derive(Debug, Default)]
pub struct Blacklist {
    current: RwLock<Arc<RuleSet>>,
}

impl Blacklist {
    /// A blacklist with an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide instance, created empty on first use.
    pub fn global() -> &'static Blacklist {
        static GLOBAL: OnceLock<Blacklist> = OnceLock::new();
        GLOBAL.get_or_init(Blacklist::new)
    }

    /// The published rule set.
    #[must_use]
    pub fn current(&self) -> Arc<RuleSet> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Build a rule set from a configuration tree and publish it.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`]; the previous rule set stays published.
    pub fn load(
        &self,
        tree: &serde_json::Value,
        options: &LoadOptions,
    ) -> Result<Arc<RuleSet>, LoadError> {
        let ruleset = RuleSet::from_value(tree, options)?;
        Ok(self.publish(ruleset))
    }

    /// Parse JSON text, build a rule set and publish it.
    ///
    /// # Errors
    ///
    /// Returns [`BlacklistError`]; the previous rule set stays published.
    pub fn load_json(
        &self,
        input: &str,
        options: &LoadOptions,
    ) -> Result<Arc<RuleSet>, BlacklistError> {
        let ruleset = RuleSet::from_json(input, options)?;
        Ok(self.publish(ruleset))
    }

    /// Replace the published rule set.
    pub fn publish(&self, ruleset: RuleSet) -> Arc<RuleSet> {
        let ruleset = Arc::new(ruleset);
        debug!(
            version = %ruleset.version(),
            entries = ruleset.num_entries(),
            max_entry_id = ruleset.max_entry_id(),
            "publishing gpu blacklist"
        );
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&ruleset);
        ruleset
    }

    /// Called by the hardware-info provider when the GPU snapshot changes;
    /// re-evaluates the published rule set.
    pub fn notify_hardware_changed(&self, hardware: &HardwareSnapshot) -> Evaluation {
        self.current().evaluate(hardware)
    }
}
