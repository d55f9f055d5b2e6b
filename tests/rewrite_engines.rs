// tests/rewrite_engines.rs
use std::time::Instant;
use turtle_lsystems::{DeriveOptions, LsystemError, RuleSet, derive, derive_with};

fn dragon_rules() -> RuleSet {
    RuleSet::literal([("X", "X-YF-"), ("Y", "+FX+Y")])
}

#[test]
fn test_order_zero_returns_axiom_for_every_variant() {
    let literal = dragon_rules();
    let weighted = RuleSet::weighted(["F[+F]F"], [1]);
    let contextual = RuleSet::contextual([("0 < 0 > 1", "1")]);

    assert_eq!(derive(0, "$FX", &literal).unwrap().as_str(), "$FX");
    assert_eq!(derive(0, "$F", &weighted).unwrap().as_str(), "$F");
    assert_eq!(derive(0, "F1[+F0]1", &contextual).unwrap().as_str(), "F1[+F0]1");
}

#[test]
fn test_doubling_rule_grows_exactly() {
    let rules = RuleSet::literal([("F", "FF")]);
    let symbols = derive(3, "F", &rules).unwrap();
    assert_eq!(symbols.as_str(), "FFFFFFFF");
    assert_eq!(symbols.len(), 8);
}

#[test]
fn test_dragon_generations() {
    assert_eq!(derive(1, "$FX", &dragon_rules()).unwrap().as_str(), "$FX-YF-");
    assert_eq!(
        derive(2, "$FX", &dragon_rules()).unwrap().as_str(),
        "$FX-YF--+FX+YF-"
    );
    // Every generation doubles the X/Y count and adds one F per X/Y.
    assert_eq!(derive(10, "$FX", &dragon_rules()).unwrap().count('F'), 1024);
}

#[test]
fn test_substitution_is_not_recursive_within_a_generation() {
    // Fibonacci words: B produced by A must not be rewritten in the same sweep.
    let rules = RuleSet::literal([("A", "AB"), ("B", "A")]);
    assert_eq!(derive(1, "A", &rules).unwrap().as_str(), "AB");
    assert_eq!(derive(2, "A", &rules).unwrap().as_str(), "ABA");
    assert_eq!(derive(3, "A", &rules).unwrap().as_str(), "ABAAB");
}

#[test]
fn test_first_declared_key_wins() {
    let rules = RuleSet::literal([("FX", "FX"), ("F", "FF")]);
    assert_eq!(derive(1, "FXF", &rules).unwrap().as_str(), "FXFF");

    let pseudo = RuleSet::literal([("Fl", "Fl+Fr"), ("Fr", "Fl-Fr")]);
    assert_eq!(derive(1, "Fl", &pseudo).unwrap().as_str(), "Fl+Fr");
    assert_eq!(derive(2, "Fl", &pseudo).unwrap().as_str(), "Fl+Fr+Fl-Fr");
}

#[test]
fn test_invalid_literal_setup_is_rejected() {
    let empty_key = RuleSet::literal([("", "F")]);
    assert!(matches!(
        derive(1, "F", &empty_key),
        Err(LsystemError::Configuration(_))
    ));
    assert!(matches!(
        derive(1, "", &dragon_rules()),
        Err(LsystemError::Configuration(_))
    ));
}

#[test]
fn test_weighted_rejects_bad_weights() {
    let zero = RuleSet::weighted(["F[+F]F", "F[+F]F", "F[-F]F"], [1, 0, 0]);
    assert!(matches!(derive(1, "F", &zero), Err(LsystemError::Configuration(_))));

    let too_few = RuleSet::weighted(["F[+F]F", "F[-F]F"], [1]);
    assert!(matches!(derive(1, "F", &too_few), Err(LsystemError::Configuration(_))));

    let no_rules = RuleSet::weighted(Vec::<String>::new(), [1]);
    assert!(matches!(derive(1, "F", &no_rules), Err(LsystemError::Configuration(_))));

    let no_weights = RuleSet::weighted(["F"], Vec::<i64>::new());
    assert!(matches!(derive(1, "F", &no_weights), Err(LsystemError::Configuration(_))));
}

#[test]
fn test_weighted_rejects_negative_and_overflowing_weights() {
    let negative = RuleSet::weighted(["F+F", "F-F"], [-1, 2]);
    assert!(matches!(derive(1, "F", &negative), Err(LsystemError::Configuration(_))));

    let overflow = RuleSet::weighted(["F+F", "F-F", "FF"], [i64::MAX, i64::MAX, i64::MAX]);
    assert!(matches!(
        derive_with(1, "F", &overflow, &DeriveOptions::seeded(1)),
        Err(LsystemError::Configuration(_))
    ));
}

#[test]
fn test_weights_beyond_u32_are_summed_without_panicking() {
    let rules = RuleSet::weighted(["F+F", "F-F"], [i64::from(u32::MAX), 1]);
    let symbols = derive_with(1, "F", &rules, &DeriveOptions::seeded(1)).unwrap();
    assert!(symbols.as_str() == "F+F" || symbols.as_str() == "F-F");
}

#[test]
fn test_single_weighted_rule_matches_literal_substitution() {
    let weighted = RuleSet::weighted(["F-F"], [1]);
    let literal = RuleSet::literal([("F", "F-F")]);
    assert_eq!(
        derive(3, "F+F", &weighted).unwrap(),
        derive(3, "F+F", &literal).unwrap()
    );

    // Extra weights are ignored.
    let extra = RuleSet::weighted(["FF"], [2, 5, 9]);
    assert_eq!(derive(2, "F", &extra).unwrap().as_str(), "FFFF");
}

#[test]
fn test_seeded_stochastic_derivation_is_reproducible() {
    let rules = RuleSet::weighted(["F[+F]F[-F]F", "F[+F]F", "F[-F]F"], [1, 1, 1]);
    let a = derive_with(4, "$F", &rules, &DeriveOptions::seeded(7)).unwrap();
    let b = derive_with(4, "$F", &rules, &DeriveOptions::seeded(7)).unwrap();
    assert_eq!(a, b);

    // Only F is rewritten, so everything else survives in order.
    let grown = derive_with(1, "$+F-", &rules, &DeriveOptions::seeded(3)).unwrap();
    assert!(grown.starts_with("$+F"));
    assert!(grown.ends_with('-'));
}

#[test]
fn test_contextual_empty_table_is_identity_except_turn_swap() {
    let empty = RuleSet::contextual(Vec::<(String, String)>::new());
    assert_eq!(derive(1, "F1[+F0]1", &empty).unwrap().as_str(), "F1[-F0]1");
    assert_eq!(derive(2, "F1[+F0]1", &empty).unwrap().as_str(), "F1[+F0]1");
    assert_eq!(derive(5, "0", &empty).unwrap().as_str(), "0");
}

#[test]
fn test_contextual_rewrites_only_variables() {
    let rules = RuleSet::contextual([("0 < 0 > 1", "1")]);
    // The first 0 has no left context, so only the second one matches.
    assert_eq!(derive(1, "F0F0F1", &rules).unwrap().as_str(), "F0F1F1");
    // A lone symbol has no context at all.
    assert_eq!(derive(1, "0", &rules).unwrap().as_str(), "0");
}

#[test]
fn test_contextual_left_context_skips_closed_branches() {
    let rules = RuleSet::contextual([("1 < 0 > 1", "1F1")]);
    // The 0 at index 4 sees the 1 before the [0] branch and the 1 after F.
    // The 0 inside the branch has no right context (end of branch).
    assert_eq!(derive(1, "1[0]0F1", &rules).unwrap().as_str(), "1[0]1F1F1");
}

#[test]
fn test_contextual_right_context_skips_side_branches() {
    let rules = RuleSet::contextual([("1 < 0 > 1", "1F1")]);
    assert_eq!(derive(1, "1F0[1]1", &rules).unwrap().as_str(), "1F1F1[1]1");
}

#[test]
fn test_contextual_rejects_unsupported_symbols_and_bad_keys() {
    let rules = RuleSet::contextual([("0 < 0 > 1", "1")]);
    assert!(matches!(
        derive(1, "F0X", &rules),
        Err(LsystemError::UnsupportedSymbol { symbol: 'X', .. })
    ));

    let bad_key = RuleSet::contextual([("0<0>1", "1")]);
    assert!(matches!(derive(1, "F0", &bad_key), Err(LsystemError::Configuration(_))));

    let empty_successor = RuleSet::contextual([("0 < 0 > 1", "")]);
    assert!(matches!(
        derive(1, "F0", &empty_successor),
        Err(LsystemError::Configuration(_))
    ));
}

#[test]
fn test_contextual_unmatched_close_is_an_underflow() {
    let rules = RuleSet::contextual([("0 < 0 > 1", "1")]);
    assert!(matches!(
        derive(1, "F]0", &rules),
        Err(LsystemError::StackUnderflow { position: 1 })
    ));
}

#[test]
fn test_growth_limit_aborts_between_generations() {
    let rules = RuleSet::literal([("F", "FF")]);
    let options = DeriveOptions {
        max_symbols: Some(100),
        ..Default::default()
    };
    match derive_with(10, "F", &rules, &options) {
        Err(LsystemError::Aborted { generation, .. }) => assert_eq!(generation, 7),
        other => panic!("expected an abort, got {other:?}"),
    }
    // Six generations stay under the limit.
    assert_eq!(derive_with(6, "F", &rules, &options).unwrap().len(), 64);
}

#[test]
fn test_expired_deadline_aborts_before_first_generation() {
    let options = DeriveOptions {
        deadline: Some(Instant::now()),
        ..Default::default()
    };
    assert!(matches!(
        derive_with(3, "F", &RuleSet::literal([("F", "FF")]), &options),
        Err(LsystemError::Aborted { generation: 1, .. })
    ));
}
