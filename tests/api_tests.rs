use js_sys::{Array, Float64Array, Reflect, Uint32Array};
use serde::Deserialize;
use shardcut_wasm::Generator;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(v: &JsValue, k: &str) -> JsValue {
    Reflect::get(v, &JsValue::from_str(k)).unwrap()
}

#[wasm_bindgen_test]
fn default_generator_produces_document() {
    let g = Generator::new();
    let doc = g.svg_document();
    assert!(doc.starts_with("<?xml"));
    assert!(doc.contains("width=\"240mm\""));
    assert_eq!(g.file_name(), "puzzle_cristal_24x12.svg");
    let paths = Array::from(&g.svg_paths());
    assert!(paths.length() > 0);
}

#[wasm_bindgen_test]
fn path_data_offsets_cover_points() {
    let g = Generator::new();
    let pd = g.get_path_data();
    let pts = Float64Array::new(&get(&pd, "points"));
    let offs = Uint32Array::new(&get(&pd, "offsets"));
    let kinds = Uint32Array::new(&get(&pd, "kinds"));
    assert_eq!(offs.length(), kinds.length() + 1);
    assert_eq!(offs.get_index(0), 0);
    assert_eq!(offs.get_index(offs.length() - 1) * 2, pts.length());
}

#[wasm_bindgen_test]
fn params_round_trip_through_js() {
    #[derive(Deserialize)]
    struct Partial {
        angle_count: i64,
        ring_count: i64,
    }
    let mut g = Generator::new();
    let v0 = g.geom_version();
    assert!(g.set_params_json(r#"{"angle_count": 12, "ring_count": 5}"#));
    assert_eq!(g.geom_version(), v0 + 1);
    let p: Partial = serde_wasm_bindgen::from_value(g.params()).unwrap();
    assert_eq!((p.angle_count, p.ring_count), (12, 5));
    // same document again changes nothing
    assert!(g.set_params_json(r#"{"angle_count": 12, "ring_count": 5}"#));
    assert_eq!(g.geom_version(), v0 + 1);
}

#[wasm_bindgen_test]
fn json_document_matches_string_form() {
    let g = Generator::new();
    let v = g.to_json();
    assert_eq!(get(&v, "units").as_string().as_deref(), Some("mm"));
    let parsed: serde_json::Value = serde_json::from_str(&g.to_json_string()).unwrap();
    let paths = Array::from(&get(&v, "paths"));
    assert_eq!(paths.length() as usize, parsed["paths"].as_array().unwrap().len());
}
