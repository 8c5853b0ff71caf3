//! Scanner canvas painting. Everything here is a pure function of a
//! [`RenderSnapshot`] so the layout can be checked without a window.

use egui::{Color32, Pos2, Rect, Shape, Stroke, StrokeKind};
use scanner_core::{GridMapping, MarkerIndicator, RenderSnapshot};
use shared::domain::GridCoordinate;

pub const MARKER_RADIUS: f32 = 10.0;

const BACKGROUND: Color32 = Color32::from_rgb(0x1e, 0x1e, 0x1e);
const GRID_LINE: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
const VISITED_FILL: Color32 = Color32::from_rgba_premultiplied(0x2a, 0x4a, 0x6a, 0xb0);
const FOCUSED_OUTLINE: Color32 = Color32::from_rgb(0xe0, 0xc0, 0x40);

pub fn marker_color(indicator: MarkerIndicator) -> Color32 {
    match indicator {
        MarkerIndicator::Idle => Color32::from_gray(0x80),
        MarkerIndicator::Moving => Color32::from_rgb(0x30, 0xc0, 0x50),
        MarkerIndicator::Focusing => Color32::from_rgb(0xd0, 0x30, 0x30),
    }
}

/// Canvas size in points; zero until a session is established.
pub fn canvas_size(snapshot: &RenderSnapshot<'_>) -> egui::Vec2 {
    snapshot
        .bounds
        .map(|bounds| {
            let (w, h) = GridMapping::new(snapshot.cell_size).canvas_size(bounds);
            egui::vec2(w as f32, h as f32)
        })
        .unwrap_or(egui::Vec2::ZERO)
}

/// Background, ledgers, grid lines and the marker, back to front.
pub fn scene_shapes(origin: Pos2, snapshot: &RenderSnapshot<'_>) -> Vec<Shape> {
    let size = canvas_size(snapshot);
    let mut shapes = vec![Shape::rect_filled(
        Rect::from_min_size(origin, size),
        0.0,
        BACKGROUND,
    )];

    let mapping = GridMapping::new(snapshot.cell_size);
    for entry in snapshot.visited {
        shapes.push(Shape::rect_filled(
            ledger_rect(origin, mapping, *entry),
            0.0,
            VISITED_FILL,
        ));
    }
    for entry in snapshot.focused_cells {
        shapes.push(Shape::rect_stroke(
            ledger_rect(origin, mapping, *entry).shrink(1.0),
            0.0,
            Stroke::new(2.0, FOCUSED_OUTLINE),
            StrokeKind::Inside,
        ));
    }

    if let Some(bounds) = snapshot.bounds {
        let cell = snapshot.cell_size as f32;
        let stroke = Stroke::new(0.5, GRID_LINE);
        for col in 0..=bounds.width {
            let x = origin.x + col as f32 * cell;
            shapes.push(Shape::line_segment(
                [egui::pos2(x, origin.y), egui::pos2(x, origin.y + size.y)],
                stroke,
            ));
        }
        for row in 0..=bounds.height {
            let y = origin.y + row as f32 * cell;
            shapes.push(Shape::line_segment(
                [egui::pos2(origin.x, y), egui::pos2(origin.x + size.x, y)],
                stroke,
            ));
        }

        let center = origin
            + egui::vec2(snapshot.position.x as f32, snapshot.position.y as f32);
        shapes.push(Shape::circle_filled(
            center,
            MARKER_RADIUS,
            marker_color(snapshot.indicator),
        ));
    }

    shapes
}

fn ledger_rect(origin: Pos2, mapping: GridMapping, entry: GridCoordinate) -> Rect {
    let (min, size) = mapping.cell_rect(entry);
    Rect::from_min_size(
        origin + egui::vec2(min.x as f32, min.y as f32),
        egui::vec2(size as f32, size as f32),
    )
}
