// tests/config_presets.rs
use serde_json::json;
use turtle_lsystems::emit::hpgl::{self, HpglOptions};
use turtle_lsystems::presets;
use turtle_lsystems::{DeriveOptions, LsystemConfig, LsystemError, RuleSet, layout};

#[test]
fn test_config_loads_from_json() {
    let document = json!({
        "name": "Dragon",
        "order": 2,
        "angle": 90.0,
        "axiom": "$FX",
        "rules": { "kind": "literal", "rules": [["X", "X-YF-"], ["Y", "+FX+Y"]] }
    });
    let config = LsystemConfig::from_json(&document.to_string()).unwrap();

    assert_eq!(config.title(), "Dragon(2)");
    assert_eq!(config.label, None);
    assert_eq!(config.rules, RuleSet::literal([("X", "X-YF-"), ("Y", "+FX+Y")]));
    assert_eq!(config.derive().unwrap().as_str(), "$FX-YF--+FX+YF-");
}

#[test]
fn test_weighted_and_contextual_documents() {
    let bush = json!({
        "name": "Bush",
        "order": 3,
        "angle": 25.7,
        "axiom": "$F",
        "rules": { "kind": "weighted", "rules": ["F[+F]F", "F[-F]F"], "weights": [3, 1] }
    });
    let config = LsystemConfig::from_json(&bush.to_string()).unwrap();
    let a = config.derive_with(&DeriveOptions::seeded(11)).unwrap();
    let b = config.derive_with(&DeriveOptions::seeded(11)).unwrap();
    assert_eq!(a, b);

    let plant = json!({
        "name": "Plant",
        "order": 1,
        "angle": 22.5,
        "axiom": "F1F0F1",
        "label": "p",
        "rules": { "kind": "contextual", "rules": { "1 < 0 > 1": "1F1" } }
    });
    let config = LsystemConfig::from_json(&plant.to_string()).unwrap();
    assert_eq!(config.derive().unwrap().as_str(), "F1F1F1F1");
    assert_eq!(config.label.as_deref(), Some("p"));
}

#[test]
fn test_invalid_documents_are_rejected() {
    let negative = json!({
        "name": "Bad", "order": -1, "angle": 90.0, "axiom": "F",
        "rules": { "kind": "literal", "rules": [] }
    });
    assert!(matches!(
        LsystemConfig::from_json(&negative.to_string()),
        Err(LsystemError::Configuration(_))
    ));

    let flat = json!({
        "name": "Bad", "order": 1, "angle": 0.0, "axiom": "F",
        "rules": { "kind": "literal", "rules": [] }
    });
    assert!(matches!(
        LsystemConfig::from_json(&flat.to_string()),
        Err(LsystemError::Configuration(_))
    ));

    let bad_key = json!({
        "name": "Bad", "order": 1, "angle": 90.0, "axiom": "F0",
        "rules": { "kind": "contextual", "rules": { "0 <0> 1": "1" } }
    });
    assert!(matches!(
        LsystemConfig::from_json(&bad_key.to_string()),
        Err(LsystemError::Configuration(_))
    ));

    let negative_weight = json!({
        "name": "Bad", "order": 1, "angle": 25.7, "axiom": "F",
        "rules": { "kind": "weighted", "rules": ["F[+F]F", "F[-F]F"], "weights": [2, -1] }
    });
    assert!(matches!(
        LsystemConfig::from_json(&negative_weight.to_string()),
        Err(LsystemError::Configuration(_))
    ));

    assert!(matches!(
        LsystemConfig::from_json(r#"{"name": "Bad", "order": 1}"#),
        Err(LsystemError::Json(_))
    ));
    assert!(matches!(
        LsystemConfig::from_json("not json"),
        Err(LsystemError::Json(_))
    ));
}

#[test]
fn test_every_preset_validates() {
    for config in presets::deterministic_catalogue() {
        assert!(config.validate().is_ok(), "{} failed to validate", config.name);
    }
    for config in presets::hogeweg_hesper_plants() {
        assert!(config.validate().is_ok(), "{} failed to validate", config.name);
    }
    assert!(presets::stochastic_bush([1, 1, 1]).validate().is_ok());
    assert!(presets::stochastic_bush([1, 0, 1]).validate().is_err());
}

#[test]
fn test_every_preset_draws_at_low_order() {
    for mut config in presets::deterministic_catalogue() {
        config.order = config.order.min(3);
        let drawing = config.draw(&DeriveOptions::default());
        assert!(drawing.is_ok(), "{} failed: {:?}", config.name, drawing.err());
    }
}

#[test]
fn test_dragon_and_snowflake_segment_counts() {
    let dragon = presets::dragon().draw(&DeriveOptions::default()).unwrap();
    assert_eq!(dragon.segments().count(), 1024);

    let snowflake = presets::koch_snowflake().draw(&DeriveOptions::default()).unwrap();
    assert_eq!(snowflake.segments().count(), 3 * 4usize.pow(4));
}

#[test]
fn test_polygon_presets_fill() {
    let mut leaf = presets::lsfp_fig_2_9();
    leaf.order = 1;
    let drawing = leaf.draw(&DeriveOptions::default()).unwrap();
    assert_eq!(drawing.polygon_count(), 1);
    assert_eq!(drawing.segments().count(), 0);
}

#[test]
fn test_stochastic_bush_is_reproducible_with_a_seed() {
    let bush = presets::stochastic_bush([1, 1, 1]);
    let a = bush.draw(&DeriveOptions::seeded(42)).unwrap();
    let b = bush.draw(&DeriveOptions::seeded(42)).unwrap();
    assert_eq!(a, b);
    assert_eq!(bush.title(), "Stochastic(weights 1,1,1)(5)");
}

#[test]
fn test_plants_lay_out_side_by_side() {
    let inputs: Vec<_> = presets::hogeweg_hesper_plants()
        .into_iter()
        .map(|mut plant| {
            plant.order = 8;
            plant.subplot(&DeriveOptions::default()).unwrap()
        })
        .collect();
    let canvas = layout(&inputs).unwrap();

    let labels: Vec<&str> = canvas.subplots.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b", "c", "d", "e"]);
    for pair in canvas.subplots.windows(2) {
        assert!(pair[1].origin_x > pair[0].drawing.bbox.x_max);
    }

    let program = hpgl::multi_plot(&canvas, &HpglOptions::default());
    assert_eq!(program.as_str().matches("LO16;").count(), 5);
}
