use wasm_bindgen::prelude::*;
use js_sys::Object;
use shardcut::params::ParamError;

use crate::interop::{new_obj, set_kv};

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

fn param_data(param: &str) -> Object {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    d
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    err("non_finite", format!("parameter '{}' must be finite", param), Some(param_data(param).into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f64, max: f64, got: f64) -> JsValue {
    let d = param_data(param);
    set_kv(&d, "min", &JsValue::from_f64(min));
    set_kv(&d, "max", &JsValue::from_f64(max));
    set_kv(&d, "got", &JsValue::from_f64(got));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn invalid_json(message: impl Into<String>) -> JsValue {
    err("invalid_json", message, None)
}

pub fn from_param_error(e: &ParamError) -> JsValue {
    match e {
        ParamError::NonFinite(p) => non_finite(p),
        ParamError::OutOfRange { param, min, max, got } => out_of_range(param, *min, *max, *got),
        ParamError::InvalidJson(msg) => invalid_json(msg.clone()),
    }
}
