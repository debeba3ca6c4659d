//! Centralized constants for wall layout, tile rendering, and colors.
//!
//! Everything tunable at runtime is mirrored by a field in [`crate::config::WallConfig`];
//! the values here are the defaults and the fixed visual metrics.

use egui::Color32;

// =============================================================================
// PLACEMENT CONSTANTS
// =============================================================================

/// Base width and height of a photo tile before its random scale is applied.
pub const PHOTO_SIZE: f32 = 192.0;

/// Gap kept between the wall edge and tiles, and between neighbouring tiles.
pub const WALL_MARGIN: f32 = 14.0;

/// Total number of placement samples a single generation pass may draw
/// before it gives up on avoiding overlap.
pub const PLACEMENT_RETRY_BUDGET: usize = 1000;

/// Tiles are tilted by a uniform angle in `[-MAX_ROTATION_DEG, MAX_ROTATION_DEG]`.
pub const MAX_ROTATION_DEG: f32 = 15.0;

/// Smallest random scale applied to a tile.
pub const MIN_SCALE: f32 = 0.8;

/// Largest random scale applied to a tile.
pub const MAX_SCALE: f32 = 1.2;

/// Stacking value of the bottom-most tile; the stack index is added on top.
pub const BASE_Z: i32 = 10;

// =============================================================================
// WINDOW CONSTANTS
// =============================================================================

/// Initial window width when the application starts.
pub const INITIAL_WINDOW_WIDTH: f32 = 1100.0;

/// Initial window height when the application starts.
pub const INITIAL_WINDOW_HEIGHT: f32 = 860.0;

// =============================================================================
// TILE RENDERING CONSTANTS
// =============================================================================

/// Width of the white photo border, in unscaled tile units.
pub const TILE_BORDER: f32 = 4.0;


/// Offset of the drop shadow under the topmost tile.
pub const TILE_SHADOW_OFFSET: f32 = 6.0;

/// Blur-ish spread of the drop shadow, approximated by expanding the shadow rect.
pub const TILE_SHADOW_SPREAD: f32 = 6.0;

/// Width of the highlight ring around the topmost tile.
pub const TOP_RING_WIDTH: f32 = 2.0;

/// Side of the square delete button in the tile's top-right corner.
pub const DELETE_BUTTON_SIZE: f32 = 32.0;

/// Inset of the delete button from the tile's top-right corner.
pub const DELETE_BUTTON_INSET: f32 = 8.0;

/// Decoded thumbnails are capped to this many pixels on their longest side.
pub const THUMBNAIL_MAX_DIMENSION: u32 = 512;

// =============================================================================
// LABEL CONSTANTS
// =============================================================================

/// Font size for file name labels.
pub const LABEL_FONT_SIZE: f32 = 12.0;

/// Padding around file name label text.
pub const LABEL_PADDING: f32 = 4.0;

/// Expansion for label background rectangle.
pub const LABEL_BG_EXPANSION: f32 = 2.0;

/// Alpha of the label background.
pub const COLOR_LABEL_BG_ALPHA: u8 = 180;

// =============================================================================
// TOOLBAR CONSTANTS
// =============================================================================

/// Spacing at the start of the toolbar.
pub const TOOLBAR_START_SPACING: f32 = 8.0;

/// Size of toolbar button icons.
pub const TOOLBAR_ICON_SIZE: f32 = 20.0;

/// Minimum size for toolbar buttons.
pub const TOOLBAR_BUTTON_SIZE: f32 = 32.0;

/// Font size of the wall title.
pub const TITLE_FONT_SIZE: f32 = 26.0;

// =============================================================================
// COLORS
// =============================================================================

/// Background color for the toolbar.
pub const COLOR_TOOLBAR_BG: Color32 = Color32::from_rgba_premultiplied(20, 20, 20, 90);

/// Photo border color.
pub const COLOR_TILE_BORDER: Color32 = Color32::WHITE;

/// Fill drawn in place of a photo whose file failed to decode.
pub const COLOR_TILE_PLACEHOLDER: Color32 = Color32::from_rgb(70, 70, 80);

/// Drop shadow under the topmost tile.
pub const COLOR_TILE_SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 46);

/// Highlight ring around the topmost tile.
pub const COLOR_TOP_RING: Color32 = Color32::from_rgba_premultiplied(230, 230, 230, 230);

/// Delete button color in normal state.
pub const COLOR_DELETE_BUTTON: Color32 = Color32::from_rgb(220, 38, 38);

/// Delete button color when hovered.
pub const COLOR_DELETE_BUTTON_HOVER: Color32 = Color32::from_rgb(255, 90, 90);

/// Text color of the empty-state message.
pub const COLOR_EMPTY_TEXT: Color32 = Color32::from_rgba_premultiplied(178, 178, 178, 178);
