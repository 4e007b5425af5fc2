
use gpu_blacklist::{
    numerical_to_lexical, FeatureMask, FloatCriterion, NumericOp, Version, VersionCriterion,
};
use proptest::prelude::*;
use strategies::{
    arb_components, arb_entry, arb_ruleset, arb_score, arb_snapshot, arb_version, GenCriteria,
};

// ---------------------------------------------------------------------------
// Invariant 1: Determinism
//
// Evaluating the same rule set against the same snapshot always yields the
// same evaluation.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn determinism(gen in arb_ruleset(), hw in arb_snapshot()) {
        let ruleset = gen.build();
        let first = ruleset.evaluate(&hw);
        for _ in 0..3 {
            prop_assert_eq!(&first, &ruleset.evaluate(&hw));
        }
    }

    #[test]
    fn determinism_rebuild(gen in arb_ruleset(), hw in arb_snapshot()) {
        prop_assert_eq!(gen.build().evaluate(&hw), gen.build().evaluate(&hw));
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Aggregation
//
// The mask is exactly the union of the active, enabled entries' features, and
// active entries appear in rule set order.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn mask_is_union_of_enabled_active(gen in arb_ruleset(), hw in arb_snapshot()) {
        let ruleset = gen.build();
        let eval = ruleset.evaluate(&hw);
        let expected = eval
            .active_entries()
            .iter()
            .filter(|active| !active.disabled())
            .fold(FeatureMask::NONE, |acc, active| acc | active.features());
        prop_assert_eq!(eval.features(), expected);
    }

    #[test]
    fn active_matches_entry_contains(gen in arb_ruleset(), hw in arb_snapshot()) {
        let ruleset = gen.build();
        let expected: Vec<u32> = ruleset
            .entries()
            .iter()
            .filter(|entry| entry.contains(&hw))
            .map(|entry| entry.id())
            .collect();
        prop_assert_eq!(ruleset.evaluate(&hw).active_ids(), expected);
    }

    #[test]
    fn disabled_entries_contribute_nothing(gen in arb_ruleset(), hw in arb_snapshot()) {
        let mut all_disabled = gen.clone();
        for entry in &mut all_disabled.entries {
            entry.disabled = true;
        }
        let eval = all_disabled.build().evaluate(&hw);
        prop_assert!(eval.features().is_empty());
        prop_assert!(eval.reasons().is_empty());
        prop_assert_eq!(eval.active_ids(), gen.build().evaluate(&hw).active_ids());
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Exceptions
//
// An exception can only narrow its parent; an exception without criteria
// vetoes the parent on every snapshot.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn exceptions_only_narrow(gen in arb_entry(), hw in arb_snapshot()) {
        let mut bare = gen.clone();
        bare.exceptions.clear();
        if gen.build(1).contains(&hw) {
            prop_assert!(bare.build(1).contains(&hw));
        }
    }

    #[test]
    fn catch_all_exception_vetoes(gen in arb_entry(), hw in arb_snapshot()) {
        let mut vetoed = gen;
        vetoed.exceptions.push(GenCriteria::default());
        prop_assert!(!vetoed.build(1).contains(&hw));
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Version comparison
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn trailing_zeros_are_insignificant(components in arb_components(), zeros in 0_usize..3) {
        let mut padded = components.clone();
        padded.extend(std::iter::repeat(0).take(zeros));
        prop_assert_eq!(Version::from_components(components), Version::from_components(padded));
    }

    #[test]
    fn eq_matches_any_extension(prefix in arb_components(), suffix in arb_components()) {
        let bound = Version::from_components(prefix.clone()).to_string();
        let criterion = VersionCriterion::parse("=", "", &bound, "").unwrap();
        let mut extended = prefix;
        extended.extend(suffix);
        prop_assert!(criterion.contains(&Version::from_components(extended)));
    }

    #[test]
    fn comparison_ops_agree_with_ordering(bound in arb_version(), candidate in arb_version()) {
        let text = bound.to_string();
        let check = |op: &str| VersionCriterion::parse(op, "", &text, "").unwrap().contains(&candidate);
        prop_assert_eq!(check("<"), candidate < bound);
        prop_assert_eq!(check("<="), candidate <= bound);
        prop_assert_eq!(check(">"), candidate > bound);
        prop_assert_eq!(check(">="), candidate >= bound);
        prop_assert!(check("any"));
    }

    #[test]
    fn reversed_version_between_matches_nothing(
        a in arb_version(),
        b in arb_version(),
        candidate in arb_version(),
    ) {
        prop_assume!(a != b);
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let reversed =
            VersionCriterion::parse("between", "", &high.to_string(), &low.to_string()).unwrap();
        prop_assert!(!reversed.contains(&candidate));

        let ordered =
            VersionCriterion::parse("between", "", &low.to_string(), &high.to_string()).unwrap();
        prop_assert_eq!(ordered.contains(&candidate), low <= candidate && candidate <= high);
    }

    #[test]
    fn lexical_rewrite_is_idempotent(major in 0_u16..100, rest in "[0-9]{1,4}") {
        let numerical = format!("{major}.{rest}");
        let once = numerical_to_lexical(&numerical).into_owned();
        let twice = numerical_to_lexical(&once).into_owned();
        prop_assert_eq!(twice.as_str(), once.as_str());
        prop_assert!(once.parse::<Version>().is_ok());
    }
}

// ---------------------------------------------------------------------------
// Invariant 5: Float ranges
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn float_between_ignores_bound_order(a in 0.1_f32..10.0, b in 0.1_f32..10.0, x in 0.1_f32..10.0) {
        let forward = FloatCriterion::new(NumericOp::Between, a, b);
        let backward = FloatCriterion::new(NumericOp::Between, b, a);
        prop_assert_eq!(forward.contains(x), backward.contains(x));
        prop_assert_eq!(forward.contains(x), a.min(b) <= x && x <= a.max(b));
    }

    #[test]
    fn float_any_accepts_everything(a in 0.1_f32..10.0, b in 0.1_f32..10.0, x in arb_score()) {
        prop_assert!(FloatCriterion::new(NumericOp::Any, a, b).contains(x));
    }
}
