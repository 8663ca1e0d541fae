use js_sys::{Array, Float64Array, Object, Reflect, Uint32Array};
use shardcut::model::Vec2;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_u32(slice: &[u32]) -> Uint32Array {
    let arr = Uint32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
pub fn arr_f64(slice: &[f64]) -> Float64Array {
    let arr = Float64Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
/// Interleaved `[x0, y0, x1, y1, ...]`.
pub fn flat_points(points: &[Vec2]) -> Float64Array {
    let mut flat = Vec::with_capacity(points.len() * 2);
    for p in points { flat.push(p.x); flat.push(p.y); }
    arr_f64(&flat)
}
pub fn str_array(items: &[String]) -> Array {
    items.iter().map(|s| JsValue::from_str(s)).collect()
}
