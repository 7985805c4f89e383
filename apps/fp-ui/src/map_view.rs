//! The map canvas: a pannable, zoomable Web-Mercator viewport that paints
//! whatever the scene currently holds (boundary layers, flow lines,
//! markers) and reports marker hover transitions.

use egui::{Color32, FontId, Pos2, Rect, Stroke, vec2};

use fp_core::{LatLon, MercatorPoint, project};
use fp_map::{HoverEvent, LayerKind, MapScene, MapStyle, Marker};

use crate::symbols;

const MARKER_HIT_RADIUS: f32 = 10.0;
const POPUP_OFFSET: f32 = 33.0;
const MIN_ZOOM: f64 = 1.0;
const MAX_ZOOM: f64 = 16.0;

pub struct MapView {
    center: MercatorPoint,
    zoom: f64,
    hovered: Option<String>,
}

impl Default for MapView {
    fn default() -> Self {
        MapView {
            center: project(LatLon::default()),
            zoom: 3.0,
            hovered: None,
        }
    }
}

impl MapView {
    pub fn recenter(&mut self, center: LatLon) {
        self.center = project(center);
    }

    pub fn show(&mut self, ui: &mut egui::Ui, scene: &MapScene) -> Option<HoverEvent> {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;

        if response.dragged() {
            let delta = response.drag_delta();
            let world = self.world_px();
            self.center.x -= delta.x as f64 / world;
            self.center.y -= delta.y as f64 / world;
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.zoom = (self.zoom + scroll as f64 * 0.005).clamp(MIN_ZOOM, MAX_ZOOM);
            }
        }

        let palette = style_palette(scene.style());
        painter.rect_filled(rect, 0.0, palette.background);
        self.draw_graticule(&painter, rect, palette.graticule);

        for layer in scene.layers() {
            let Some(source) = scene.source(&layer.source) else {
                continue;
            };
            match &layer.kind {
                LayerKind::Fill(paint) => {
                    let color = parse_paint_color(&paint.color, paint.opacity);
                    for ring in source.polygon_rings() {
                        let points = self.path_to_screen(rect, ring);
                        if points.len() >= 3 {
                            painter.add(egui::Shape::convex_polygon(
                                points,
                                color,
                                Stroke::NONE,
                            ));
                        }
                    }
                }
                LayerKind::Line(paint) => {
                    let color = parse_paint_color(&paint.color, paint.opacity);
                    let stroke = Stroke::new(paint.width, color);
                    for ring in source.polygon_rings() {
                        let points = self.path_to_screen(rect, ring);
                        if points.len() >= 2 {
                            painter.add(egui::Shape::closed_line(points, stroke));
                        }
                    }
                    for line in source.line_strings() {
                        let points = self.path_to_screen(rect, line);
                        if points.len() < 2 {
                            continue;
                        }
                        match &paint.dash {
                            Some(pattern) => {
                                // dash units scale with line width
                                let unit = paint.width;
                                painter.extend(egui::Shape::dashed_line_with_offset(
                                    &points,
                                    stroke,
                                    &[3.0 * unit],
                                    &[4.0 * unit],
                                    dash_start(pattern) * unit,
                                ));
                            }
                            None => {
                                painter.add(egui::Shape::line(points, stroke));
                            }
                        }
                    }
                }
            }
        }

        let pointer = response.hover_pos();
        let mut hit: Option<&Marker> = None;
        for marker in scene.markers() {
            let pos = self.to_screen(rect, marker.position);
            symbols::draw_marker_symbol(&painter, marker.icon, pos, palette.marker_outline);
            if hit.is_none() {
                if let Some(p) = pointer {
                    if p.distance(pos) <= MARKER_HIT_RADIUS {
                        hit = Some(marker);
                    }
                }
            }
        }

        if let Some(marker) = hit {
            self.draw_popup(&painter, rect, marker, &palette);
        }

        match (self.hovered.as_deref(), hit) {
            (prev, Some(marker)) if prev != Some(marker.node.name.as_str()) => {
                self.hovered = Some(marker.node.name.clone());
                Some(HoverEvent::Enter(marker.node.clone()))
            }
            (Some(_), None) => {
                self.hovered = None;
                Some(HoverEvent::Leave)
            }
            _ => None,
        }
    }

    fn world_px(&self) -> f64 {
        256.0 * self.zoom.exp2()
    }

    fn to_screen(&self, rect: Rect, p: LatLon) -> Pos2 {
        self.mercator_to_screen(rect, project(p))
    }

    fn mercator_to_screen(&self, rect: Rect, m: MercatorPoint) -> Pos2 {
        let world = self.world_px();
        Pos2 {
            x: rect.center().x + ((m.x - self.center.x) * world) as f32,
            y: rect.center().y + ((m.y - self.center.y) * world) as f32,
        }
    }

    /// Screen points for a GeoJSON ring or line string, dropping malformed
    /// positions.
    fn path_to_screen(&self, rect: Rect, path: &[Vec<f64>]) -> Vec<Pos2> {
        path.iter()
            .filter_map(|p| fp_model::geojson::position_latlon(p))
            .map(|ll| self.to_screen(rect, ll))
            .collect()
    }

    fn draw_graticule(&self, painter: &egui::Painter, rect: Rect, color: Color32) {
        let stroke = Stroke::new(0.5, color);
        for lon in (-180..=180).step_by(10) {
            let x = self
                .mercator_to_screen(rect, project(LatLon { lat: 0.0, lon: lon as f64 }))
                .x;
            if rect.x_range().contains(x) {
                painter.vline(x, rect.y_range(), stroke);
            }
        }
        for lat in (-80..=80).step_by(10) {
            let y = self
                .mercator_to_screen(rect, project(LatLon { lat: lat as f64, lon: 0.0 }))
                .y;
            if rect.y_range().contains(y) {
                painter.hline(rect.x_range(), y, stroke);
            }
        }
    }

    fn draw_popup(&self, painter: &egui::Painter, rect: Rect, marker: &Marker, palette: &StylePalette) {
        let anchor = self.to_screen(rect, marker.position);
        let mut lines = marker.popup_text.lines();
        let name = lines.next().unwrap_or("");
        let kind = lines.next().unwrap_or("");

        let name_galley =
            painter.layout_no_wrap(name.to_string(), FontId::proportional(13.0), palette.text);
        let kind_galley =
            painter.layout_no_wrap(kind.to_string(), FontId::proportional(11.0), palette.text_dim);

        let pad = 6.0;
        let width = name_galley.size().x.max(kind_galley.size().x) + 2.0 * pad;
        let height = name_galley.size().y + kind_galley.size().y + 2.0 * pad + 2.0;
        let popup = Rect::from_center_size(
            anchor - vec2(0.0, POPUP_OFFSET + height / 2.0),
            vec2(width, height),
        );

        painter.rect_filled(popup, 4.0, palette.popup_background);
        painter.rect_stroke(popup, 4.0, Stroke::new(1.0, palette.popup_border));
        let mut cursor = popup.min + vec2(pad, pad);
        painter.galley(
            Pos2 {
                x: popup.center().x - name_galley.size().x / 2.0,
                y: cursor.y,
            },
            name_galley.clone(),
            palette.text,
        );
        cursor.y += name_galley.size().y + 2.0;
        painter.galley(
            Pos2 {
                x: popup.center().x - kind_galley.size().x / 2.0,
                y: cursor.y,
            },
            kind_galley,
            palette.text_dim,
        );
    }
}

pub struct StylePalette {
    pub background: Color32,
    pub graticule: Color32,
    pub text: Color32,
    pub text_dim: Color32,
    pub popup_background: Color32,
    pub popup_border: Color32,
    pub marker_outline: Color32,
}

pub fn style_palette(style: MapStyle) -> StylePalette {
    match style {
        MapStyle::Streets => StylePalette {
            background: Color32::from_rgb(0xe8, 0xec, 0xe4),
            graticule: Color32::from_rgb(0xd0, 0xd6, 0xcc),
            text: Color32::from_rgb(0x20, 0x24, 0x28),
            text_dim: Color32::from_rgb(0x60, 0x66, 0x6c),
            popup_background: Color32::from_rgb(0xfd, 0xfd, 0xfb),
            popup_border: Color32::from_rgb(0xb0, 0xb6, 0xac),
            marker_outline: Color32::from_rgb(0x20, 0x24, 0x28),
        },
        MapStyle::Satellite => StylePalette {
            background: Color32::from_rgb(0x15, 0x1a, 0x21),
            graticule: Color32::from_rgb(0x26, 0x2d, 0x36),
            text: Color32::from_rgb(0xe6, 0xe8, 0xea),
            text_dim: Color32::from_rgb(0x9a, 0xa2, 0xaa),
            popup_background: Color32::from_rgb(0x20, 0x26, 0x2e),
            popup_border: Color32::from_rgb(0x43, 0x4c, 0x56),
            marker_outline: Color32::from_rgb(0xe6, 0xe8, 0xea),
        },
    }
}

/// Engine paint colors: `#RGB`/`#RRGGBB` hex plus the few CSS names the
/// pipeline uses. Unknowns render gray rather than failing.
pub fn parse_paint_color(spec: &str, opacity: f32) -> Color32 {
    let base = match spec {
        "black" => Color32::BLACK,
        "white" => Color32::WHITE,
        "blue" => Color32::from_rgb(0x00, 0x00, 0xff),
        s => parse_hex_color(s).unwrap_or(Color32::GRAY),
    };
    let a = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
    Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), a)
}

fn parse_hex_color(s: &str) -> Option<Color32> {
    let hex = s.strip_prefix('#')?;
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
            let (r, g, b) = (digit(0)?, digit(1)?, digit(2)?);
            Some(Color32::from_rgb(r * 17, g * 17, b * 17))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

/// Where the 3-unit dash starts within the repeating 7-unit cycle encoded
/// by an engine dash array. Odd-length arrays wrap their leading dash onto
/// the end of the cycle; even-length arrays lead with a zero dash and a
/// gap.
fn dash_start(pattern: &[f32]) -> f32 {
    match pattern {
        [lead, gap, _tail] => (lead + gap) % 7.0,
        [_zero, gap, _dash, _tail] => *gap,
        _ => 0.0,
    }
}
