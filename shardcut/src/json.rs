use serde::Serialize;
use serde_json::Value;

use crate::model::{PathKind, Template, Vec2};

pub const DOC_VERSION: u32 = 1;

/// Flat document for the serializer side: one record per polyline plus the frame.
pub fn to_json_impl(t: &Template) -> Value {
    #[derive(Serialize)]
    struct FrameSer {
        width: f64,
        height: f64,
        stroke_width: f64,
        corner_radius: f64,
    }
    #[derive(Serialize)]
    struct PathSer {
        kind: PathKind,
        points: Vec<[f64; 2]>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tab: Option<[usize; 2]>,
    }
    #[derive(Serialize)]
    struct Doc {
        version: u32,
        units: &'static str,
        frame: FrameSer,
        highlight_tabs: bool,
        paths: Vec<PathSer>,
    }
    let pt = |p: &Vec2| [p.x, p.y];
    let doc = Doc {
        version: DOC_VERSION,
        units: "mm",
        frame: FrameSer {
            width: t.width,
            height: t.height,
            stroke_width: t.stroke_width,
            corner_radius: t.corner_radius,
        },
        highlight_tabs: t.highlight_tabs,
        paths: t
            .paths
            .iter()
            .map(|p| PathSer {
                kind: p.kind,
                points: p.points.iter().map(pt).collect(),
                tab: p.tab_span.map(|(s, e)| [s, e]),
            })
            .collect(),
    };
    serde_json::to_value(doc).unwrap_or(Value::Null)
}

pub fn to_json_string_impl(t: &Template) -> String {
    to_json_impl(t).to_string()
}
