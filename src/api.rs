use crate::Generator;
use serde::Serialize;
use shardcut::model::PathKind;
use shardcut::params::{ParamError, PuzzleParams};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;
use crate::interop;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize>(v: &T) -> JsValue {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).unwrap_or(JsValue::NULL)
}

fn warn_rejected(e: &ParamError) {
    web_sys::console::warn_1(&JsValue::from_str(&format!("shardcut: params rejected: {}", e)));
}

fn params_from_js(v: JsValue) -> Result<PuzzleParams, ParamError> {
    let val = serde_wasm_bindgen::from_value::<serde_json::Value>(v)
        .map_err(|e| ParamError::InvalidJson(e.to_string()))?;
    PuzzleParams::from_json_value_strict(val)
}

#[wasm_bindgen]
impl Generator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Generator {
        crate::Generator::rs_new()
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }

    // Parameters
    pub fn set_params_json(&mut self, s: &str) -> bool {
        match self.inner.set_params_json_strict(s) {
            Ok(_) => true,
            Err(e) => {
                warn_rejected(&e);
                false
            }
        }
    }
    pub fn set_params_json_res(&mut self, s: &str) -> JsValue {
        match self.inner.set_params_json_strict(s) {
            Ok(changed) => error::ok(JsValue::from_bool(changed)),
            Err(e) => error::from_param_error(&e),
        }
    }
    pub fn set_params(&mut self, v: JsValue) -> bool {
        match params_from_js(v) {
            Ok(p) => {
                self.inner.set_params(p);
                true
            }
            Err(e) => {
                warn_rejected(&e);
                false
            }
        }
    }
    pub fn set_params_res(&mut self, v: JsValue) -> JsValue {
        match params_from_js(v) {
            Ok(p) => error::ok(JsValue::from_bool(self.inner.set_params(p))),
            Err(e) => error::from_param_error(&e),
        }
    }
    pub fn params(&self) -> JsValue {
        to_js(&self.inner.params())
    }
    pub fn file_name(&self) -> String {
        self.inner.file_name()
    }

    // Output
    pub fn svg_document(&self) -> String {
        self.inner.to_svg_document()
    }
    pub fn svg_paths(&self) -> JsValue {
        interop::str_array(&self.inner.to_svg_paths()).into()
    }
    pub fn svg_paths_res(&self) -> JsValue {
        error::ok(self.svg_paths())
    }
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.to_json_value())
    }
    pub fn to_json_string(&self) -> String {
        self.inner.to_json()
    }

    /// Typed-array view of the cut paths for canvas previews:
    /// `points` is interleaved x/y, path `i` spans `offsets[i]..offsets[i+1]` points,
    /// `kinds` is 0 for normal and 1 for advisory cuts.
    pub fn get_path_data(&self) -> JsValue {
        let t = self.inner.template();
        let mut offsets: Vec<u32> = Vec::with_capacity(t.paths.len() + 1);
        let mut kinds: Vec<u32> = Vec::with_capacity(t.paths.len());
        let mut points = Vec::new();
        offsets.push(0);
        for p in &t.paths {
            points.extend_from_slice(&p.points);
            offsets.push(points.len() as u32);
            kinds.push(match p.kind {
                PathKind::Normal => 0,
                PathKind::AdvisoryCut => 1,
            });
        }
        let obj = interop::new_obj();
        interop::set_kv(&obj, "points", &interop::flat_points(&points).into());
        interop::set_kv(&obj, "offsets", &interop::arr_u32(&offsets).into());
        interop::set_kv(&obj, "kinds", &interop::arr_u32(&kinds).into());
        obj.into()
    }

    pub fn cached_edge_count(&self) -> u32 {
        self.inner.cached_edges() as u32
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new()
    }
}
