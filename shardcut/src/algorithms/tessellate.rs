use std::collections::HashMap;

use crate::geometry::math::{dist_sq, polygon_area};
use crate::geometry::tolerance::{clamp, quantize, EPS_CELL_AREA, EPS_DENOM, EPS_WELD};
use crate::model::{Bounds, Cell, Seed, Vec2};

/// Scales every point's distance from `origin` by `bias` (negative treated as 0).
pub fn apply_radial_bias(points: &[Vec2], origin: Vec2, bias: f64) -> Vec<Vec2> {
    let k = bias.max(0.0);
    points
        .iter()
        .map(|p| {
            let dx = p.x - origin.x;
            let dy = p.y - origin.y;
            let r = (dx * dx + dy * dy).sqrt();
            let a = dy.atan2(dx);
            let br = (r * k).max(0.0);
            Vec2 { x: origin.x + br * a.cos(), y: origin.y + br * a.sin() }
        })
        .collect()
}

/// Keeps the part of `poly` where `n . p <= c`.
fn clip_half_plane(poly: &[Vec2], nx: f64, ny: f64, c: f64, out: &mut Vec<Vec2>) {
    out.clear();
    let n = poly.len();
    if n == 0 {
        return;
    }
    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        let fa = nx * a.x + ny * a.y - c;
        let fb = nx * b.x + ny * b.y - c;
        let a_in = fa <= 0.0;
        let b_in = fb <= 0.0;
        if a_in {
            out.push(a);
        }
        if a_in != b_in {
            let den = fa - fb;
            if den.abs() > EPS_DENOM {
                let t = fa / den;
                out.push(Vec2 { x: a.x + (b.x - a.x) * t, y: a.y + (b.y - a.y) * t });
            }
        }
    }
}

/// Uniform bucket grid over the sites, used to visit neighbours nearest first.
struct SiteGrid {
    min: Vec2,
    cell: f64,
    nx: i64,
    ny: i64,
    buckets: Vec<Vec<usize>>,
}

impl SiteGrid {
    fn build(sites: &[Vec2], bounds: &Bounds) -> SiteGrid {
        let mut min = Vec2 { x: 0.0, y: 0.0 };
        let mut max = Vec2 { x: bounds.width, y: bounds.height };
        for s in sites {
            min.x = min.x.min(s.x);
            min.y = min.y.min(s.y);
            max.x = max.x.max(s.x);
            max.y = max.y.max(s.y);
        }
        let w = (max.x - min.x).max(1e-9);
        let h = (max.y - min.y).max(1e-9);
        let cell = (w * h / sites.len().max(1) as f64).sqrt().max(1e-6);
        let nx = ((w / cell).ceil() as i64).clamp(1, 4096);
        let ny = ((h / cell).ceil() as i64).clamp(1, 4096);
        let cell = (w / nx as f64).max(h / ny as f64);
        let mut buckets = vec![Vec::new(); (nx * ny) as usize];
        let mut g = SiteGrid { min, cell, nx, ny, buckets: Vec::new() };
        for (i, s) in sites.iter().enumerate() {
            let (cx, cy) = g.cell_of(*s);
            buckets[(cy * nx + cx) as usize].push(i);
        }
        g.buckets = buckets;
        g
    }

    fn cell_of(&self, p: Vec2) -> (i64, i64) {
        let cx = (((p.x - self.min.x) / self.cell).floor() as i64).clamp(0, self.nx - 1);
        let cy = (((p.y - self.min.y) / self.cell).floor() as i64).clamp(0, self.ny - 1);
        (cx, cy)
    }

    /// Site indices in the square ring at Chebyshev distance `k` around `(cx, cy)`.
    fn ring(&self, cx: i64, cy: i64, k: i64, out: &mut Vec<usize>) {
        out.clear();
        for y in (cy - k)..=(cy + k) {
            if y < 0 || y >= self.ny {
                continue;
            }
            let edge_row = y == cy - k || y == cy + k;
            let mut x = cx - k;
            while x <= cx + k {
                if x >= 0 && x < self.nx {
                    out.extend_from_slice(&self.buckets[(y * self.nx + x) as usize]);
                }
                x += if edge_row || k == 0 { 1 } else { 2 * k };
            }
        }
    }

    fn max_ring(&self) -> i64 {
        self.nx.max(self.ny)
    }
}

/// Raw (unrounded) Voronoi cell of every site, clipped to the frame.
/// `None` for sites whose cell is empty, including later duplicates of a coincident site.
pub fn voronoi_cells(sites: &[Vec2], bounds: &Bounds) -> Vec<Option<Vec<Vec2>>> {
    if sites.is_empty() || !(bounds.width > 0.0 && bounds.height > 0.0) {
        return vec![None; sites.len()];
    }
    let grid = SiteGrid::build(sites, bounds);
    let frame = [
        Vec2 { x: 0.0, y: 0.0 },
        Vec2 { x: bounds.width, y: 0.0 },
        Vec2 { x: bounds.width, y: bounds.height },
        Vec2 { x: 0.0, y: bounds.height },
    ];
    let mut cells = Vec::with_capacity(sites.len());
    let mut ring = Vec::new();
    let mut scratch = Vec::new();
    for (i, &si) in sites.iter().enumerate() {
        let mut poly = frame.to_vec();
        let (cx, cy) = grid.cell_of(si);
        let mut dead = false;
        'rings: for k in 0..=grid.max_ring() {
            grid.ring(cx, cy, k, &mut ring);
            ring.sort_by(|&a, &b| {
                dist_sq(si, sites[a]).total_cmp(&dist_sq(si, sites[b])).then(a.cmp(&b))
            });
            for &j in &ring {
                if j == i {
                    continue;
                }
                let sj = sites[j];
                if sj == si {
                    if j < i {
                        dead = true;
                        break 'rings;
                    }
                    continue;
                }
                let nx = sj.x - si.x;
                let ny = sj.y - si.y;
                let c = 0.5 * ((sj.x * sj.x + sj.y * sj.y) - (si.x * si.x + si.y * si.y));
                clip_half_plane(&poly, nx, ny, c, &mut scratch);
                std::mem::swap(&mut poly, &mut scratch);
                if poly.len() < 3 {
                    dead = true;
                    break 'rings;
                }
            }
            // no site beyond ring k is closer than k cells; it cannot cut the cell
            // once that distance exceeds twice the farthest vertex
            let reach_sq = poly.iter().map(|v| dist_sq(si, *v)).fold(0.0f64, f64::max);
            let gap = k as f64 * grid.cell;
            if gap * gap >= 4.0 * reach_sq {
                break;
            }
        }
        cells.push(if dead { None } else { Some(poly) });
    }
    cells
}

/// Shared vertex table for independently clipped cells. Each cell computes its
/// corners on its own, so one Voronoi vertex arrives several times with
/// floating-point noise; every arrival within `tol` of a known vertex is
/// replaced by that vertex. Representatives are pairwise farther than `tol`.
pub struct VertexWeld {
    tol: f64,
    buckets: HashMap<(i64, i64), Vec<Vec2>>,
}

impl VertexWeld {
    pub fn new(tol: f64) -> Self {
        VertexWeld { tol: tol.max(f64::MIN_POSITIVE), buckets: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn bucket(&self, p: Vec2) -> (i64, i64) {
        ((p.x / self.tol).floor() as i64, (p.y / self.tol).floor() as i64)
    }

    /// Nearest known vertex within `tol`, else `p` itself (which becomes known).
    pub fn snap(&mut self, p: Vec2) -> Vec2 {
        let (bx, by) = self.bucket(p);
        let tol_sq = self.tol * self.tol;
        let mut best: Option<(f64, Vec2)> = None;
        for y in (by - 1)..=(by + 1) {
            for x in (bx - 1)..=(bx + 1) {
                let Some(reps) = self.buckets.get(&(x, y)) else {
                    continue;
                };
                for &r in reps {
                    let d = dist_sq(p, r);
                    if d <= tol_sq && best.map_or(true, |(bd, _)| d < bd) {
                        best = Some((d, r));
                    }
                }
            }
        }
        match best {
            Some((_, r)) => r,
            None => {
                self.buckets.entry((bx, by)).or_default().push(p);
                p
            }
        }
    }
}

/// Rounds to the vertex grid, pins into the frame, drops repeated vertices.
/// `None` when fewer than three vertices or ~zero area remain.
pub fn normalize_polygon(poly: &[Vec2], bounds: &Bounds) -> Option<Vec<Vec2>> {
    let mut out: Vec<Vec2> = Vec::with_capacity(poly.len());
    for p in poly {
        let q = Vec2 {
            x: clamp(quantize(p.x), 0.0, bounds.width),
            y: clamp(quantize(p.y), 0.0, bounds.height),
        };
        if out.last() != Some(&q) {
            out.push(q);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    if out.len() < 3 || polygon_area(&out) <= EPS_CELL_AREA {
        return None;
    }
    Some(out)
}

/// Biased, clipped Voronoi tessellation: one cell per surviving seed, in seed order.
pub fn tessellate(seeds: &[Seed], origin: Vec2, bias: f64, bounds: &Bounds) -> Vec<Cell> {
    let positions: Vec<Vec2> = seeds.iter().map(|s| s.pos).collect();
    let sites = apply_radial_bias(&positions, origin, bias);
    let mut weld = VertexWeld::new(EPS_WELD);
    voronoi_cells(&sites, bounds)
        .into_iter()
        .enumerate()
        .filter_map(|(i, poly)| {
            let welded: Vec<Vec2> = poly?.into_iter().map(|p| weld.snap(p)).collect();
            let polygon = normalize_polygon(&welded, bounds)?;
            Some(Cell { seed: i, role: seeds[i].role, polygon })
        })
        .collect()
}
