use crate::model::{CutPath, PathKind, Template, Vec2};

const CUT_STROKE: &str = "#111";
const CUT_WIDTH: f64 = 0.15;
const FRAME_STROKE: &str = "#222";
const TAB_HIGHLIGHT_STROKE: &str = "#f59e42";
const TAB_HIGHLIGHT_WIDTH: f64 = 1.2;

fn path_d(points: &[Vec2]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            d.push_str(&format!("M {} {}", p.x, p.y));
        } else {
            d.push_str(&format!(" L {} {}", p.x, p.y));
        }
    }
    d
}

/// Path `d` strings, one per cut path, tabs included.
pub fn to_svg_paths_impl(t: &Template) -> Vec<String> {
    t.paths.iter().filter(|p| p.points.len() > 1).map(|p| path_d(&p.points)).collect()
}

fn push_path(svg: &mut String, d: &str, stroke: &str, width: f64, dashed: bool) {
    if d.is_empty() {
        return;
    }
    let dash = if dashed { " stroke-dasharray=\"3 2\"" } else { "" };
    svg.push_str(&format!(
        "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"{}/>\n",
        d, stroke, width, dash
    ));
}

fn push_cut(svg: &mut String, p: &CutPath, highlight: bool) {
    if p.points.len() < 2 {
        return;
    }
    let dashed = p.kind == PathKind::AdvisoryCut && p.tab_span.is_none();
    match p.tab_span {
        Some((s, e)) if highlight => {
            // emit the tab as its own path so it can be styled
            if s > 0 {
                push_path(svg, &path_d(&p.points[..=s]), CUT_STROKE, CUT_WIDTH, false);
            }
            push_path(svg, &path_d(&p.points[s..=e]), TAB_HIGHLIGHT_STROKE, TAB_HIGHLIGHT_WIDTH, false);
            if e + 1 < p.points.len() {
                push_path(svg, &path_d(&p.points[e..]), CUT_STROKE, CUT_WIDTH, false);
            }
        }
        _ => push_path(svg, &path_d(&p.points), CUT_STROKE, CUT_WIDTH, dashed),
    }
}

/// Standalone SVG document, 1 user unit = 1 mm.
pub fn to_svg_document_impl(t: &Template) -> String {
    let mut svg = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}mm\" height=\"{h}mm\" viewBox=\"0 0 {w} {h}\">\n",
        w = t.width,
        h = t.height
    ));
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" rx=\"{}\"/>\n",
        t.width, t.height, FRAME_STROKE, t.stroke_width, t.corner_radius
    ));
    for p in &t.paths {
        push_cut(&mut svg, p, t.highlight_tabs);
    }
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(paths: Vec<CutPath>, highlight: bool) -> Template {
        Template {
            width: 240.0,
            height: 120.0,
            stroke_width: 0.2,
            corner_radius: 1.5,
            highlight_tabs: highlight,
            paths,
        }
    }

    #[test]
    fn document_has_physical_units_and_frame() {
        let doc = to_svg_document_impl(&template(vec![], false));
        assert!(doc.contains("width=\"240mm\" height=\"120mm\" viewBox=\"0 0 240 120\""));
        assert!(doc.contains("rx=\"1.5\""));
        assert!(doc.ends_with("</svg>"));
    }

    #[test]
    fn advisory_without_tab_is_dashed() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0)];
        let cut = CutPath { kind: PathKind::AdvisoryCut, points, tab_span: None };
        let doc = to_svg_document_impl(&template(vec![cut], false));
        assert!(doc.contains("M 0 0 L 5 5"));
        assert!(doc.contains("stroke-dasharray=\"3 2\""));
    }

    #[test]
    fn highlighted_tab_is_separate_path() {
        let pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.5, 1.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
        ];
        let cut = CutPath { kind: PathKind::Normal, points: pts, tab_span: Some((1, 3)) };
        let doc = to_svg_document_impl(&template(vec![cut.clone()], true));
        assert_eq!(doc.matches("<path").count(), 3);
        assert!(doc.contains("stroke=\"#f59e42\""));
        let plain = to_svg_document_impl(&template(vec![cut], false));
        assert_eq!(plain.matches("<path").count(), 1);
    }
}
