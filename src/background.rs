//! Gradient backdrops for the wall.

use egui::{Color32, Mesh, Painter, Rect, Shape};

pub const DEFAULT_BACKGROUND: &str = "Classic";

#[derive(Debug, PartialEq)]
pub struct BackgroundPreset {
    pub name: &'static str,
    /// Top-left, middle and bottom-right colors of the diagonal gradient.
    pub stops: [Color32; 3],
}

pub static PRESETS: [BackgroundPreset; 9] = [
    BackgroundPreset {
        name: "Classic",
        stops: [
            Color32::from_rgb(0xc0, 0x84, 0xfc),
            Color32::from_rgb(0xec, 0x48, 0x99),
            Color32::from_rgb(0xef, 0x44, 0x44),
        ],
    },
    BackgroundPreset {
        name: "Sunset",
        stops: [
            Color32::from_rgb(0xfb, 0x92, 0x3c),
            Color32::from_rgb(0xef, 0x44, 0x44),
            Color32::from_rgb(0xec, 0x48, 0x99),
        ],
    },
    BackgroundPreset {
        name: "Ocean",
        stops: [
            Color32::from_rgb(0x60, 0xa5, 0xfa),
            Color32::from_rgb(0x06, 0xb6, 0xd4),
            Color32::from_rgb(0x14, 0xb8, 0xa6),
        ],
    },
    BackgroundPreset {
        name: "Lavender",
        stops: [
            Color32::from_rgb(0xc0, 0x84, 0xfc),
            Color32::from_rgb(0xf4, 0x72, 0xb6),
            Color32::from_rgb(0xf8, 0x71, 0x71),
        ],
    },
    BackgroundPreset {
        name: "Forest",
        stops: [
            Color32::from_rgb(0x4a, 0xde, 0x80),
            Color32::from_rgb(0x10, 0xb9, 0x81),
            Color32::from_rgb(0x14, 0xb8, 0xa6),
        ],
    },
    BackgroundPreset {
        name: "Golden",
        stops: [
            Color32::from_rgb(0xfa, 0xcc, 0x15),
            Color32::from_rgb(0xf9, 0x73, 0x16),
            Color32::from_rgb(0xef, 0x44, 0x44),
        ],
    },
    BackgroundPreset {
        name: "Arctic",
        stops: [
            Color32::from_rgb(0xbf, 0xdb, 0xfe),
            Color32::from_rgb(0xa5, 0xf3, 0xfc),
            Color32::from_rgb(0x93, 0xc5, 0xfd),
        ],
    },
    BackgroundPreset {
        name: "Berry",
        stops: [
            Color32::from_rgb(0xec, 0x48, 0x99),
            Color32::from_rgb(0xa8, 0x55, 0xf7),
            Color32::from_rgb(0x63, 0x66, 0xf1),
        ],
    },
    BackgroundPreset {
        name: "Mint",
        stops: [
            Color32::from_rgb(0x86, 0xef, 0xac),
            Color32::from_rgb(0x5e, 0xea, 0xd4),
            Color32::from_rgb(0x67, 0xe8, 0xf9),
        ],
    },
];

/// Looks a preset up by name, case-insensitively, falling back to the default.
pub fn preset(name: &str) -> &'static BackgroundPreset {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(|| {
            log::warn!("Unknown background {name:?}, using {DEFAULT_BACKGROUND}");
            &PRESETS[0]
        })
}

/// Builds a top-left to bottom-right gradient covering `rect`.
pub fn gradient_mesh(rect: Rect, preset: &BackgroundPreset) -> Mesh {
    let [start, middle, end] = preset.stops;
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), start);
    mesh.colored_vertex(rect.right_top(), middle);
    mesh.colored_vertex(rect.right_bottom(), end);
    mesh.colored_vertex(rect.left_bottom(), middle);
    mesh.add_triangle(0, 1, 3);
    mesh.add_triangle(1, 2, 3);
    mesh
}

pub fn paint(painter: &Painter, rect: Rect, preset: &BackgroundPreset) {
    painter.add(Shape::mesh(gradient_mesh(rect, preset)));
}
