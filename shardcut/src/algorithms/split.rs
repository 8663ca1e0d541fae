use crate::geometry::math::{dist, midpoint, polygon_area};
use crate::geometry::tolerance::MAX_PIECE_AREA_PCT;
use crate::model::{Bounds, Cell, ExtraCut, RingRole};

/// Cut joining the midpoint of the longest side with the midpoint of the side
/// half-way around the polygon from it.
pub fn advisory_cut(cell_idx: usize, cell: &Cell) -> Option<ExtraCut> {
    let poly = &cell.polygon;
    let n = poly.len();
    if n < 3 {
        return None;
    }
    let mut max_len = 0.0f64;
    let mut max_idx = 0usize;
    for i in 0..n {
        let len = dist(poly[i], poly[(i + 1) % n]);
        if len > max_len {
            max_len = len;
            max_idx = i;
        }
    }
    let opp = (max_idx + n / 2) % n;
    Some(ExtraCut {
        cell: cell_idx,
        a: midpoint(poly[max_idx], poly[(max_idx + 1) % n]),
        b: midpoint(poly[opp], poly[(opp + 1) % n]),
    })
}

/// One advisory cut per fill cell larger than 12% of the frame. Primary cells are never split.
pub fn split_oversized(cells: &[Cell], bounds: &Bounds) -> Vec<ExtraCut> {
    let max_area = MAX_PIECE_AREA_PCT * bounds.area();
    cells
        .iter()
        .enumerate()
        .filter(|(_, c)| c.role == RingRole::Fill && polygon_area(&c.polygon) > max_area)
        .filter_map(|(i, c)| advisory_cut(i, c))
        .collect()
}
