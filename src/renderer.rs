//! Painting of photo tiles. Pure drawing: all state comes in through [`TileLayout`].

use crate::constants::{
    COLOR_DELETE_BUTTON, COLOR_DELETE_BUTTON_HOVER, COLOR_LABEL_BG_ALPHA, COLOR_TILE_BORDER,
    COLOR_TILE_PLACEHOLDER, COLOR_TILE_SHADOW, COLOR_TOP_RING, DELETE_BUTTON_INSET,
    DELETE_BUTTON_SIZE, LABEL_BG_EXPANSION, LABEL_FONT_SIZE, LABEL_PADDING, TILE_BORDER,
    TILE_SHADOW_OFFSET, TILE_SHADOW_SPREAD, TOP_RING_WIDTH,
};
use crate::wall::TileLayout;
use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{pos2, vec2, Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Shape, TextureId, Vec2};

/// Decoded photo ready to be drawn.
#[derive(Clone, Copy, Debug)]
pub struct TileImage {
    pub texture: TextureId,
    pub size: Vec2,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TileControls {
    pub show_delete: bool,
    pub delete_hovered: bool,
}

/// Centre of the delete button in wall coordinates, following the tile's tilt.
pub fn delete_button_center(tile: &TileLayout) -> Pos2 {
    let rect = tile.rect();
    let half = tile.extent / 2.0;
    let inset = (DELETE_BUTTON_INSET + DELETE_BUTTON_SIZE / 2.0) * tile.scale;
    let local = vec2(half - inset, -half + inset);
    rect.center() + tile.rotation() * local
}

/// Top-left corner of the file-name text in wall coordinates, inside the photo
/// and following the tile's tilt.
pub fn label_origin(tile: &TileLayout) -> Pos2 {
    let rect = tile.rect();
    let inset = TILE_BORDER * tile.scale + LABEL_PADDING;
    let local = rect.left_top() + vec2(inset, inset) - rect.center();
    rect.center() + tile.rotation() * local
}

pub fn delete_button_hit(tile: &TileLayout, pos: Pos2) -> bool {
    pos.distance(delete_button_center(tile)) <= DELETE_BUTTON_SIZE / 2.0 * tile.scale
}

/// UV sub-rectangle that crops an image of `size` to a centred square.
pub fn cover_uv(size: Vec2) -> Rect {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0));
    }
    if size.x > size.y {
        let w = size.y / size.x;
        Rect::from_min_max(pos2((1.0 - w) / 2.0, 0.0), pos2((1.0 + w) / 2.0, 1.0))
    } else {
        let h = size.x / size.y;
        Rect::from_min_max(pos2(0.0, (1.0 - h) / 2.0), pos2(1.0, (1.0 + h) / 2.0))
    }
}

fn rotated_quad(rect: Rect, color: Color32, rot: Rot2, origin: Pos2) -> Shape {
    let mut mesh = Mesh::default();
    mesh.add_colored_rect(rect, color);
    mesh.rotate(rot, origin);
    Shape::mesh(mesh)
}

/// Draws one tile. `offset` maps wall coordinates to screen coordinates.
pub fn paint_tile(
    painter: &Painter,
    offset: Vec2,
    tile: &TileLayout,
    image: Option<TileImage>,
    label: Option<&str>,
    controls: TileControls,
) {
    let rect = tile.rect().translate(offset);
    let center = rect.center();
    let rot = tile.rotation();
    let scale = tile.scale;

    if tile.is_top || tile.is_dragging {
        let shadow = rect
            .translate(vec2(0.0, TILE_SHADOW_OFFSET * scale))
            .expand(TILE_SHADOW_SPREAD * scale);
        painter.add(rotated_quad(shadow, COLOR_TILE_SHADOW, rot, center));
    }
    if tile.is_top {
        painter.add(rotated_quad(rect.expand(TOP_RING_WIDTH), COLOR_TOP_RING, rot, center));
    }
    painter.add(rotated_quad(rect, COLOR_TILE_BORDER, rot, center));

    let image_rect = rect.shrink(TILE_BORDER * scale);
    match image {
        Some(image) => {
            let mut mesh = Mesh::with_texture(image.texture);
            mesh.add_rect_with_uv(image_rect, cover_uv(image.size), Color32::WHITE);
            mesh.rotate(rot, center);
            painter.add(Shape::mesh(mesh));
        }
        None => {
            painter.add(rotated_quad(image_rect, COLOR_TILE_PLACEHOLDER, rot, center));
        }
    }

    if let Some(name) = label {
        let font_id = FontId::proportional(LABEL_FONT_SIZE);
        let galley = painter.layout_no_wrap(name.to_string(), font_id, Color32::WHITE);
        let text_rect = Rect::from_min_size(
            image_rect.left_top() + vec2(LABEL_PADDING, LABEL_PADDING),
            galley.size(),
        );
        painter.add(rotated_quad(
            text_rect.expand(LABEL_BG_EXPANSION),
            Color32::from_black_alpha(COLOR_LABEL_BG_ALPHA),
            rot,
            center,
        ));
        let text_pos = label_origin(tile) + offset;
        painter.add(TextShape::new(text_pos, galley, Color32::WHITE).with_angle(rot.angle()));
    }

    if controls.show_delete {
        let button_center = delete_button_center(tile) + offset;
        let radius = DELETE_BUTTON_SIZE / 2.0 * scale;
        painter.circle_filled(
            button_center,
            radius,
            if controls.delete_hovered {
                COLOR_DELETE_BUTTON_HOVER
            } else {
                COLOR_DELETE_BUTTON
            },
        );
        painter.text(
            button_center,
            Align2::CENTER_CENTER,
            "x",
            FontId::monospace(radius),
            Color32::WHITE,
        );
    }
}
