use serde_json::json;
use shardcut::algorithms::edges::EdgeProfile;
use shardcut::params::{ParamError, PuzzleParams};
use shardcut::Generator;

#[test]
fn partial_document_takes_defaults() {
    let v = json!({"grid_width": 30, "seed": 7, "edge_profile": "noise", "tab": {"min_size": 2.0}});
    let p = PuzzleParams::from_json_value(v).expect("valid params");
    assert_eq!(p.grid_width, 30);
    assert_eq!(p.grid_height, 12);
    assert_eq!(p.seed, 7);
    assert_eq!(p.edge_profile, EdgeProfile::Noise);
    assert_eq!(p.tab.min_size, 2.0);
    assert_eq!(p.tab.relative_width, 0.35);
}

#[test]
fn origin_round_trips() {
    let v = json!({"origin": {"x": 12.5, "y": 40.0}});
    let p = PuzzleParams::from_json_value(v).unwrap();
    let back = serde_json::to_value(&p).unwrap();
    assert_eq!(back["origin"]["x"], 12.5);
    assert_eq!(PuzzleParams::from_json_value(back), Some(p));
}

#[test]
fn json_caps_exceeded_counts() {
    for (field, n) in [("angle_count", 721), ("ring_count", 201), ("edge_segments", 257), ("grid_width", 1001)] {
        let mut v = json!({});
        v[field] = json!(n);
        match PuzzleParams::from_json_value_strict(v) {
            Err(ParamError::OutOfRange { param, .. }) => assert_eq!(param, field),
            other => panic!("expected cap on {}: {:?}", field, other),
        }
    }
}

#[test]
fn json_invalid_numbers() {
    let v = json!({"origin": {"x": 1.0e38, "y": 0.0}});
    assert!(PuzzleParams::from_json_value(v).is_none());
    let v = json!({"cell_size": 0.0});
    assert!(PuzzleParams::from_json_value(v).is_none());
    let v = json!({"growth_factor": 1.0e3});
    assert!(PuzzleParams::from_json_value(v).is_none());
    let v = json!({"angle_count": "many"});
    assert_eq!(PuzzleParams::from_json_value_strict(v).unwrap_err().code(), "invalid_json");
}

#[test]
fn rejected_document_leaves_generator_untouched() {
    let mut g = Generator::default();
    let before = g.to_svg_document();
    let ver = g.geom_version();
    assert!(!g.set_params_json(r#"{"ring_count": 100000}"#));
    assert!(g.set_params_json_strict("not json").is_err());
    assert_eq!(g.geom_version(), ver);
    assert_eq!(g.to_svg_document(), before);

    assert_eq!(g.set_params_json_strict(r#"{"highlight_tabs": true}"#), Ok(true));
    assert!(g.params().highlight_tabs);
    assert!(g.to_svg_document().contains("#f59e42"));
}
