use std::collections::HashSet;

use crate::algorithms::edges::{EdgeCache, EdgeParams};
use crate::algorithms::tabs::{synthesize, TabParams};
use crate::geometry::math::{closest_index, is_frame_edge, midpoint};
use crate::geometry::tolerance::TAB_VISUAL_SCALE;
use crate::model::{Bounds, Cell, CutPath, EdgeKey, ExtraCut, PathKind, RingRole, Tab, Vec2};

/// Unique boundary segments in first-visit order (cells in order, vertices in order).
/// With `merge_center` the innermost ring contributes no edges of its own, so it
/// reads as a single center piece.
pub fn collect_edges(cells: &[Cell], merge_center: bool) -> Vec<(Vec2, Vec2)> {
    let mut seen: HashSet<EdgeKey> = HashSet::new();
    let mut out = Vec::new();
    for cell in cells {
        if merge_center && cell.role == (RingRole::Primary { ring: 0 }) {
            continue;
        }
        let n = cell.polygon.len();
        for j in 0..n {
            let p0 = cell.polygon[j];
            let p1 = cell.polygon[(j + 1) % n];
            let (key, _) = EdgeKey::canonical(p0, p1);
            if key.a == key.b {
                continue;
            }
            if seen.insert(key) {
                out.push((p0, p1));
            }
        }
    }
    out
}

/// Replaces the samples between the tab anchors with the tab outline, scaled
/// by the visual factor toward the anchors' midpoint.
/// Returns the spliced polyline and the inclusive index span of the tab.
/// `points` must hold at least two samples.
pub fn splice_tab(points: &[Vec2], tab: &Tab) -> (Vec<Vec2>, (usize, usize)) {
    let mut i0 = closest_index(points, tab.start);
    let mut i1 = closest_index(points, tab.end);
    if i0 > i1 {
        std::mem::swap(&mut i0, &mut i1);
    }
    if i0 == i1 {
        if i1 + 1 < points.len() {
            i1 += 1;
        } else if i0 > 0 {
            i0 -= 1;
        }
    }
    let c = midpoint(tab.start, tab.end);
    let scale = |p: Vec2| Vec2 {
        x: c.x + (p.x - c.x) * TAB_VISUAL_SCALE,
        y: c.y + (p.y - c.y) * TAB_VISUAL_SCALE,
    };
    let outline: Vec<Vec2> = tab.outline().into_iter().map(scale).collect();
    // the edge's own endpoints always survive so corners stay shared
    let mut out = Vec::with_capacity(points.len() + outline.len() + 2);
    out.extend_from_slice(&points[..i0.max(1)]);
    let span_start = out.len();
    out.extend_from_slice(&outline);
    let span_end = out.len() - 1;
    out.extend_from_slice(&points[(i1 + 1).min(points.len() - 1)..]);
    (out, (span_start, span_end))
}

/// Reconstructed edge with its tab spliced in when one is renderable.
/// Frame edges never carry a tab.
pub fn edge_path(
    p0: Vec2,
    p1: Vec2,
    kind: PathKind,
    bounds: &Bounds,
    cache: &mut EdgeCache,
    edge: &EdgeParams,
    tab: &TabParams,
) -> CutPath {
    let points = cache.reconstruct(p0, p1, edge);
    if points.len() < 2 || is_frame_edge(p0, p1, bounds) {
        return CutPath { kind, points, tab_span: None };
    }
    let first = points[0];
    let last = points[points.len() - 1];
    match synthesize(first, last, tab) {
        Some(t) if !t.too_small => {
            let (points, span) = splice_tab(&points, &t);
            CutPath { kind, points, tab_span: Some(span) }
        }
        _ => CutPath { kind, points, tab_span: None },
    }
}

/// All cut paths of a pass: tessellation edges first, then advisory cuts.
pub fn assemble(
    cells: &[Cell],
    cuts: &[ExtraCut],
    bounds: &Bounds,
    merge_center: bool,
    cache: &mut EdgeCache,
    edge: &EdgeParams,
    tab: &TabParams,
) -> Vec<CutPath> {
    let mut paths: Vec<CutPath> = collect_edges(cells, merge_center)
        .into_iter()
        .map(|(p0, p1)| edge_path(p0, p1, PathKind::Normal, bounds, cache, edge, tab))
        .collect();
    paths.extend(
        cuts.iter()
            .map(|c| edge_path(c.a, c.b, PathKind::AdvisoryCut, bounds, cache, edge, tab)),
    );
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::edges::EdgeProfile;
    use crate::model::TabShape;

    fn straight(segments: i64) -> EdgeParams {
        EdgeParams { segments, amplitude: 0.0, frequency: 0.05, profile: EdgeProfile::Wave }
    }

    #[test]
    fn shared_edges_are_collected_once() {
        let a = Cell {
            seed: 0,
            role: RingRole::Fill,
            polygon: vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0)],
        };
        let b = Cell {
            seed: 1,
            role: RingRole::Fill,
            polygon: vec![Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0), Vec2::new(20.0, 10.0), Vec2::new(10.0, 10.0)],
        };
        let edges = collect_edges(&[a, b], true);
        assert_eq!(edges.len(), 7);
    }

    #[test]
    fn center_ring_is_merged() {
        let a = Cell {
            seed: 0,
            role: RingRole::Primary { ring: 0 },
            polygon: vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)],
        };
        assert!(collect_edges(&[a.clone()], true).is_empty());
        assert_eq!(collect_edges(&[a], false).len(), 3);
    }

    #[test]
    fn splice_keeps_ends_and_inserts_outline() {
        let pts: Vec<Vec2> = (0..=8).map(|i| Vec2::new(i as f64 * 10.0, 0.0)).collect();
        let tab = Tab {
            start: Vec2::new(30.0, 0.0),
            end: Vec2::new(50.0, 0.0),
            shape: TabShape::Triangle { tip: Vec2::new(40.0, 5.0) },
            too_small: false,
        };
        let (out, (s, e)) = splice_tab(&pts, &tab);
        assert_eq!(out[0], pts[0]);
        assert_eq!(*out.last().unwrap(), pts[8]);
        assert_eq!(e - s, 2);
        assert_eq!(out[s], Vec2::new(34.0, 0.0));
        assert_eq!(out[s + 1], Vec2::new(40.0, 3.0));
        assert_eq!(out[e], Vec2::new(46.0, 0.0));
        assert_eq!(out.len(), 3 + 3 + 3);
    }

    #[test]
    fn splice_on_bare_segment_keeps_endpoints() {
        let pts = vec![Vec2::new(0.0, 0.0), Vec2::new(20.0, 0.0)];
        let tab = Tab {
            start: Vec2::new(5.0, 0.0),
            end: Vec2::new(15.0, 0.0),
            shape: TabShape::Triangle { tip: Vec2::new(10.0, 4.0) },
            too_small: false,
        };
        let (out, (s, e)) = splice_tab(&pts, &tab);
        assert_eq!(out.len(), 5);
        assert_eq!((s, e), (1, 3));
        assert_eq!(out[0], pts[0]);
        assert_eq!(out[4], pts[1]);
    }

    #[test]
    fn frame_edge_never_carries_tab() {
        let b = Bounds { width: 100.0, height: 100.0 };
        let mut cache = EdgeCache::new();
        let tab = TabParams { min_size: 0.1, relative_width: 0.5, relative_height: 0.3, ..TabParams::default() };
        let (bottom, mid) = (Vec2::new(0.0, 0.0), Vec2::new(0.0, 50.0));
        let p = edge_path(bottom, Vec2::new(100.0, 0.0), PathKind::Normal, &b, &mut cache, &straight(8), &tab);
        assert!(p.tab_span.is_none());
        let q = edge_path(mid, Vec2::new(100.0, 50.0), PathKind::Normal, &b, &mut cache, &straight(8), &tab);
        assert!(q.tab_span.is_some());
    }
}
