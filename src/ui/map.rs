use geo::Rect as GeoRect;
use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker as CanvasMarker,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, Borders,
    },
    Frame,
};
use std::str::FromStr;

use super::state::{RenderedDistrict, TerminalView};
use crate::view::Layer;

/// Bangladesh and the northern Bay of Bengal, used until data is framed
const DEFAULT_VIEWPORT: ([f64; 2], [f64; 2]) = ([87.5, 93.0], [20.5, 26.8]);

/// Fraction of the framed extent added on every side
const VIEWPORT_PADDING: f64 = 0.05;

/// Parse a CSS-style color, falling back when the terminal palette can't express it
pub fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_str(value).unwrap_or(fallback)
}

/// Canvas x/y bounds for the current viewport
pub fn canvas_bounds(viewport: Option<GeoRect<f64>>) -> ([f64; 2], [f64; 2]) {
    let Some(rect) = viewport else {
        return DEFAULT_VIEWPORT;
    };

    // A zero-sized box (single point) still needs some extent to draw
    let pad_x = (rect.width() * VIEWPORT_PADDING).max(0.01);
    let pad_y = (rect.height() * VIEWPORT_PADDING).max(0.01);
    (
        [rect.min().x - pad_x, rect.max().x + pad_x],
        [rect.min().y - pad_y, rect.max().y + pad_y],
    )
}

fn outline_color(district: &RenderedDistrict) -> Color {
    if district.style.dash_array.is_none() {
        // emphasized
        Color::White
    } else {
        parse_color(district.style.fill_color, Color::Gray)
    }
}

fn draw_district(ctx: &mut Context, district: &RenderedDistrict) {
    let color = outline_color(district);
    for ring in &district.rings {
        for pair in ring.windows(2) {
            let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
            ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
        }
    }
}

/// Center of the bounding box of the outer rings
pub fn label_position(district: &RenderedDistrict) -> Option<(f64, f64)> {
    let mut points = district.rings.iter().flatten();
    let &(x, y) = points.next()?;
    let (min_x, min_y, max_x, max_y) = points.fold((x, y, x, y), |(a, b, c, d), &(x, y)| {
        (a.min(x), b.min(y), c.max(x), d.max(y))
    });
    Some(((min_x + max_x) / 2.0, (min_y + max_y) / 2.0))
}

fn draw_layer(ctx: &mut Context, view: &TerminalView, layer: Layer) {
    let markers = view.layer_markers(layer);
    if layer == Layer::StormTrack {
        for pair in markers.windows(2) {
            ctx.draw(&CanvasLine::new(
                pair[0].position.x(),
                pair[0].position.y(),
                pair[1].position.x(),
                pair[1].position.y(),
                Color::DarkGray,
            ));
        }
    }

    for marker in markers {
        let coords = [(marker.position.x(), marker.position.y())];
        ctx.draw(&Points {
            coords: &coords,
            color: parse_color(marker.color, Color::Magenta),
        });
    }
}

/// Draw districts, then each visible overlay layer on top
pub fn render_map(f: &mut Frame, area: Rect, view: &TerminalView) {
    let (x_bounds, y_bounds) = canvas_bounds(view.viewport);

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("🗺️ Storm Risk Map"))
        .marker(CanvasMarker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for district in &view.districts {
                draw_district(ctx, district);
            }
            ctx.layer();
            // only the hovered district is emphasized, and it was raised to the end
            if let Some(hovered) = view.districts.last().filter(|d| d.style.dash_array.is_none()) {
                if let Some((x, y)) = label_position(hovered) {
                    ctx.print(x, y, hovered.name.clone());
                }
            }
            for layer in Layer::ALL {
                if view.is_layer_visible(layer) {
                    draw_layer(ctx, view, layer);
                }
            }
        });

    f.render_widget(canvas, area);
}
