use js_sys::Reflect;
use shardcut_wasm::Generator;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

fn err_param(v: &JsValue) -> Option<String> {
    let err = Reflect::get(v, &JsValue::from_str("error")).ok()?;
    let data = Reflect::get(&err, &JsValue::from_str("data")).ok()?;
    Reflect::get(&data, &JsValue::from_str("param")).ok()?.as_string()
}

#[wasm_bindgen_test]
fn rejected_documents_return_typed_errors() {
    let mut g = Generator::new();
    let ver = g.geom_version();

    let r = g.set_params_json_res("{ nope");
    assert!(is_err(&r, "invalid_json"));
    assert_eq!(g.geom_version(), ver, "state mutated on error");

    let r2 = g.set_params_json_res(r#"{"angle_count": 100000}"#);
    assert!(is_err(&r2, "out_of_range"));
    assert_eq!(err_param(&r2).as_deref(), Some("angle_count"));
    assert_eq!(g.geom_version(), ver);

    let r3 = g.set_params_json_res(r#"{"tab": {"angle_degrees": 90.5}}"#);
    assert!(is_err(&r3, "out_of_range"));
    assert_eq!(err_param(&r3).as_deref(), Some("tab.angle_degrees"));
}

#[wasm_bindgen_test]
fn non_finite_from_js_object() {
    let mut g = Generator::new();
    let obj = js_sys::Object::new();
    Reflect::set(&obj, &JsValue::from_str("bias_scalar"), &JsValue::from_f64(f64::NAN)).unwrap();
    let r = g.set_params_res(obj.into());
    // NaN does not survive the JSON value model, so it is rejected either way
    assert!(is_err(&r, "non_finite") || is_err(&r, "invalid_json"));
    assert!(!g.set_params_json("\"just a string\""));
}

#[wasm_bindgen_test]
fn accepted_document_reports_change() {
    let mut g = Generator::new();
    let r = g.set_params_json_res(r#"{"seed": 7}"#);
    let value = Reflect::get(&r, &JsValue::from_str("value")).unwrap();
    assert_eq!(value.as_bool(), Some(true));
    let again = g.set_params_json_res(r#"{"seed": 7}"#);
    let value2 = Reflect::get(&again, &JsValue::from_str("value")).unwrap();
    assert_eq!(value2.as_bool(), Some(false));
}
