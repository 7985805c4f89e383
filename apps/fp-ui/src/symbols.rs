//! Marker symbol painting, one shape per icon kind.

use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use fp_map::MarkerIcon;

const R: f32 = 6.0;

pub fn marker_color(icon: MarkerIcon) -> Color32 {
    match icon {
        MarkerIcon::Reservoir => Color32::from_rgb(0x19, 0x76, 0xd2),
        MarkerIcon::Hydropower => Color32::from_rgb(0xef, 0x6c, 0x00),
        MarkerIcon::Catchment => Color32::from_rgb(0x38, 0x8e, 0x3c),
        MarkerIcon::Link => Color32::from_rgb(0x75, 0x75, 0x75),
        MarkerIcon::InstreamFlowRequirement => Color32::from_rgb(0x00, 0x89, 0x7b),
        MarkerIcon::BreakLink => Color32::from_rgb(0xc6, 0x28, 0x28),
        MarkerIcon::Output => Color32::from_rgb(0x6a, 0x1b, 0x9a),
        MarkerIcon::River => Color32::from_rgb(0x4f, 0xc3, 0xf7),
        MarkerIcon::Default => Color32::from_rgb(0x54, 0x5e, 0x64),
    }
}

pub fn draw_marker_symbol(
    painter: &egui::Painter,
    icon: MarkerIcon,
    center: Pos2,
    outline: Color32,
) {
    let color = marker_color(icon);
    let stroke = Stroke::new(1.5, outline);

    match icon {
        MarkerIcon::Reservoir => {
            // Reservoir as a filled basin rectangle
            let rect = Rect::from_center_size(center, Vec2::new(R * 2.0, R * 1.4));
            painter.rect_filled(rect, R * 0.3, color);
            painter.rect_stroke(rect, R * 0.3, stroke);
        }
        MarkerIcon::Hydropower => {
            painter.circle_filled(center, R, color);
            // bolt through the middle
            painter.line_segment(
                [
                    center + Vec2::new(R * 0.3, -R * 0.7),
                    center + Vec2::new(-R * 0.3, 0.1),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    center + Vec2::new(-R * 0.3, 0.1),
                    center + Vec2::new(R * 0.3, R * 0.7),
                ],
                stroke,
            );
        }
        MarkerIcon::Catchment => {
            painter.circle_stroke(center, R, Stroke::new(2.0, color));
        }
        MarkerIcon::Link => {
            painter.circle_filled(center, R * 0.6, color);
        }
        MarkerIcon::InstreamFlowRequirement => {
            painter.circle_stroke(center, R, Stroke::new(2.0, color));
            painter.line_segment(
                [
                    center + Vec2::new(-R * 0.7, 0.0),
                    center + Vec2::new(R * 0.7, 0.0),
                ],
                Stroke::new(2.0, color),
            );
        }
        MarkerIcon::BreakLink => {
            let w = R * 0.8;
            painter.line_segment(
                [center + Vec2::new(-w, -w), center + Vec2::new(w, w)],
                Stroke::new(2.0, color),
            );
            painter.line_segment(
                [center + Vec2::new(-w, w), center + Vec2::new(w, -w)],
                Stroke::new(2.0, color),
            );
        }
        MarkerIcon::Output => {
            // downward triangle
            let points = vec![
                center + Vec2::new(-R, -R * 0.7),
                center + Vec2::new(R, -R * 0.7),
                center + Vec2::new(0.0, R),
            ];
            painter.add(egui::Shape::convex_polygon(points, color, stroke));
        }
        MarkerIcon::River => {
            // two short wave segments
            for dy in [-R * 0.35, R * 0.35] {
                painter.line_segment(
                    [
                        center + Vec2::new(-R * 0.9, dy + R * 0.2),
                        center + Vec2::new(-R * 0.2, dy - R * 0.2),
                    ],
                    Stroke::new(2.0, color),
                );
                painter.line_segment(
                    [
                        center + Vec2::new(-R * 0.2, dy - R * 0.2),
                        center + Vec2::new(R * 0.9, dy + R * 0.2),
                    ],
                    Stroke::new(2.0, color),
                );
            }
        }
        MarkerIcon::Default => {
            let rect = Rect::from_center_size(center, Vec2::splat(R * 1.4));
            painter.rect_filled(rect, 0.0, color);
            painter.rect_stroke(rect, 0.0, stroke);
        }
    }
}
