pub mod layout;
pub mod measure;
pub mod outline;
pub mod tree;

use std::fmt::Write;

use wasm_bindgen::prelude::*;

use layout::{LayoutConfig, LayoutEngine, TreeLayout};
use outline::{Outline, OutlineParser};

pub use layout::{LayoutError, layout as layout_tree};
pub use tree::{ChildMap, TreeModel};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Parse an outline and lay it out.
pub fn layout_outline(
    source: &str,
    config: LayoutConfig,
) -> Result<(Outline, TreeLayout<String>), String> {
    let outline = OutlineParser::new(source).parse().map_err(|e| e.to_string())?;
    let engine = LayoutEngine::new(config).map_err(|e| e.to_string())?;
    let layout = engine
        .layout(&outline.tree, &outline.root)
        .map_err(|e| e.to_string())?;
    Ok((outline, layout))
}

/// One `label<TAB>x<TAB>y` line per node, in outline order.
pub fn format_positions(outline: &Outline, layout: &TreeLayout<String>) -> String {
    let mut out = String::new();
    for label in &outline.labels {
        if let Some(p) = layout.get(label) {
            writeln!(&mut out, "{}\t{}\t{}", label, p.x, p.y).unwrap();
        }
    }
    out
}

fn wasm_config(separation: Option<f64>, level_height: Option<f64>) -> LayoutConfig {
    let defaults = LayoutConfig::default();
    LayoutConfig::with_separation(
        separation.unwrap_or(defaults.min_separation),
        level_height.unwrap_or(defaults.level_height),
    )
}

/// Lay out an outline and return tab-separated positions
#[wasm_bindgen(js_name = "layoutOutline")]
pub fn layout_outline_text(
    source: &str,
    separation: Option<f64>,
    level_height: Option<f64>,
) -> Result<String, String> {
    let (outline, layout) = layout_outline(source, wasm_config(separation, level_height))?;
    Ok(format_positions(&outline, &layout))
}

/// Lay out an outline and return `[x0, y0, x1, y1, ...]` in outline order
#[wasm_bindgen(js_name = "layoutOutlineCoords")]
pub fn layout_outline_coords(
    source: &str,
    separation: Option<f64>,
    level_height: Option<f64>,
) -> Result<js_sys::Float64Array, String> {
    let (outline, layout) = layout_outline(source, wasm_config(separation, level_height))?;
    let coords: Vec<f64> = outline
        .labels
        .iter()
        .filter_map(|label| layout.get(label))
        .flat_map(|p| [p.x, p.y])
        .collect();
    Ok(js_sys::Float64Array::from(coords.as_slice()))
}
