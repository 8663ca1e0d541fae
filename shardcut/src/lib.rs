pub mod model;
pub mod params;
pub mod geometry {
    pub mod hash;
    pub mod limits;
    pub mod math;
    pub mod noise;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod assemble;
    pub mod edges;
    pub mod plan;
    pub mod seeds;
    pub mod split;
    pub mod tabs;
    pub mod tessellate;
}
mod json;
mod svg;

use algorithms::edges::EdgeCache;
use algorithms::seeds::{Jitter, JitterMemo};
use model::{Cell, ExtraCut, SamplePlan, Seed, Template};
use params::{ParamError, PuzzleParams};
use std::cell::RefCell;

#[cfg(feature = "pass_prof")]
use std::time::Instant;

/// Intermediate products of one pass, kept for inspection and tests.
#[derive(Clone, Debug, Default)]
pub struct Stages {
    pub plan: SamplePlan,
    pub seeds: Vec<Seed>,
    pub cells: Vec<Cell>,
    pub cuts: Vec<ExtraCut>,
}

/// One generation pass: a fixed parameter set plus the two caches that are
/// only valid for it. Concurrent passes each need their own `Pass`.
pub struct Pass {
    params: PuzzleParams,
    jitter: JitterMemo,
    edges: EdgeCache,
}

impl Pass {
    pub fn new(params: &PuzzleParams) -> Pass {
        let params = params.sanitized();
        let jitter = JitterMemo::new(params.seed_value());
        Pass { params, jitter, edges: EdgeCache::new() }
    }

    pub fn params(&self) -> &PuzzleParams {
        &self.params
    }

    pub fn edge_cache(&self) -> &EdgeCache {
        &self.edges
    }

    pub fn jitter_memo(&self) -> &JitterMemo {
        &self.jitter
    }

    /// Drops both caches; the next run recomputes everything.
    pub fn reset(&mut self) {
        self.jitter.clear();
        self.edges.clear();
    }

    /// Plan, seeds, cells and advisory cuts.
    pub fn stages(&mut self) -> Stages {
        let p = &self.params;
        let bounds = p.bounds();
        let origin = p.origin();

        #[cfg(feature = "pass_prof")]
        let t0 = Instant::now();
        let plan = algorithms::plan::build_plan(
            p.angle_count,
            p.ring_count,
            p.min_radius(),
            p.max_radius(),
            p.growth_factor,
        );
        let jitter = Jitter { radius: p.jitter_radius_mm(), angle: p.jitter_angle };
        let seeds = algorithms::seeds::seed_field(&plan, origin, jitter, &bounds, p.seed_value(), &mut self.jitter);
        #[cfg(feature = "pass_prof")]
        let t1 = Instant::now();
        let cells = algorithms::tessellate::tessellate(&seeds, origin, p.bias_scalar, &bounds);
        #[cfg(feature = "pass_prof")]
        let t2 = Instant::now();
        let cuts = algorithms::split::split_oversized(&cells, &bounds);

        #[cfg(feature = "pass_prof")]
        eprintln!(
            "[pass_prof] seeds={} ({:.3} ms) cells={} ({:.3} ms) cuts={} ({:.3} ms)",
            seeds.len(),
            (t1 - t0).as_secs_f64() * 1000.0,
            cells.len(),
            (t2 - t1).as_secs_f64() * 1000.0,
            cuts.len(),
            t2.elapsed().as_secs_f64() * 1000.0
        );
        Stages { plan, seeds, cells, cuts }
    }

    /// Full pipeline.
    pub fn run(&mut self) -> Template {
        let stages = self.stages();
        let p = &self.params;
        let bounds = p.bounds();

        #[cfg(feature = "pass_prof")]
        let t0 = Instant::now();
        let paths = algorithms::assemble::assemble(
            &stages.cells,
            &stages.cuts,
            &bounds,
            p.merge_center,
            &mut self.edges,
            &p.edge_params(),
            &p.tab,
        );
        #[cfg(feature = "pass_prof")]
        eprintln!(
            "[pass_prof] paths={} edges_cached={} ({:.3} ms)",
            paths.len(),
            self.edges.len(),
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Template {
            width: bounds.width,
            height: bounds.height,
            stroke_width: p.stroke_width,
            corner_radius: p.corner_radius,
            highlight_tabs: p.highlight_tabs,
            paths,
        }
    }
}

/// Runs a fresh pass.
pub fn generate(params: &PuzzleParams) -> Template {
    Pass::new(params).run()
}

/// Long-lived generator for an interactive surface: keeps the current pass and
/// its template, and throws both away whenever a parameter changes.
pub struct Generator {
    pass: RefCell<Pass>,
    geom_ver: u64,
    built: RefCell<Option<(u64, Template)>>,
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new(PuzzleParams::default())
    }
}

impl Generator {
    pub fn new(params: PuzzleParams) -> Generator {
        Generator { pass: RefCell::new(Pass::new(&params)), geom_ver: 1, built: RefCell::new(None) }
    }

    /// Monotonic version; increments whenever the parameters change.
    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    pub fn params(&self) -> PuzzleParams {
        self.pass.borrow().params().clone()
    }

    /// Returns true when the parameters changed and the caches were cleared.
    pub fn set_params(&mut self, params: PuzzleParams) -> bool {
        if params.sanitized() == *self.pass.borrow().params() {
            return false;
        }
        self.pass.replace(Pass::new(&params));
        self.geom_ver += 1;
        self.built.replace(None);
        true
    }

    /// Accepts a JSON parameter document; false (and no change) when it is rejected.
    pub fn set_params_json(&mut self, s: &str) -> bool {
        match PuzzleParams::from_json_str(s) {
            Some(p) => {
                self.set_params(p);
                true
            }
            None => false,
        }
    }

    /// Like `set_params_json` but reports why a document was rejected.
    /// `Ok(false)` means the document was valid but changed nothing.
    pub fn set_params_json_strict(&mut self, s: &str) -> Result<bool, ParamError> {
        let p = PuzzleParams::from_json_str_strict(s)?;
        Ok(self.set_params(p))
    }

    /// Current template, rebuilt only after a parameter change.
    pub fn template(&self) -> Template {
        if let Some((ver, t)) = self.built.borrow().as_ref() {
            if *ver == self.geom_ver {
                return t.clone();
            }
        }
        let t = self.pass.borrow_mut().run();
        self.built.replace(Some((self.geom_ver, t.clone())));
        t
    }

    pub fn stages(&self) -> Stages {
        self.pass.borrow_mut().stages()
    }

    /// Number of edge polylines memoized by the current pass.
    pub fn cached_edges(&self) -> usize {
        self.pass.borrow().edge_cache().len()
    }

    pub fn to_svg_document(&self) -> String {
        svg::to_svg_document_impl(&self.template())
    }

    pub fn to_svg_paths(&self) -> Vec<String> {
        svg::to_svg_paths_impl(&self.template())
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(&self.template())
    }

    pub fn to_json(&self) -> String {
        json::to_json_string_impl(&self.template())
    }

    pub fn file_name(&self) -> String {
        self.pass.borrow().params().file_name()
    }
}

impl Template {
    pub fn to_svg_document(&self) -> String {
        svg::to_svg_document_impl(self)
    }

    pub fn to_svg_paths(&self) -> Vec<String> {
        svg::to_svg_paths_impl(self)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }
}
