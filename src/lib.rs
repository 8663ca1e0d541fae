use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

#[wasm_bindgen]
pub struct Generator { pub(crate) inner: shardcut::Generator }

impl Generator {
    pub fn rs_new() -> Generator { Generator { inner: shardcut::Generator::default() } }
    pub fn rs_geom_version(&self) -> u64 { self.inner.geom_version() }
}
