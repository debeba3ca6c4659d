use crate::background::{self, BackgroundPreset, PRESETS};
use crate::config::WallConfig;
use crate::constants::{
    COLOR_EMPTY_TEXT, COLOR_TOOLBAR_BG, THUMBNAIL_MAX_DIMENSION, TITLE_FONT_SIZE,
    TOOLBAR_BUTTON_SIZE, TOOLBAR_ICON_SIZE, TOOLBAR_START_SPACING,
};
use crate::drag::PointerSignal;
use crate::image_loader::load_thumbnails;
use crate::input::InputRouter;
use crate::library::{LocalLibrary, PhotoSource};
use crate::photo::{Photo, PhotoId};
use crate::renderer::{self, TileControls, TileImage};
use crate::wall::{measured_wall_size, WallResponse, WallState};
use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Vec2};
use std::collections::HashMap;

pub struct PhotoWallApp {
    library: Option<LocalLibrary>,
    photos: Vec<Photo>,
    textures: HashMap<PhotoId, egui::TextureHandle>,
    wall: WallState,
    input: InputRouter,
    background: &'static BackgroundPreset,
    show_file_names: bool,
    refresh_requested: bool,
    delete_gesture: DeleteGesture,
}

/// Press on a tile's delete button, confirmed by releasing over the same button.
#[derive(Debug, Default)]
struct DeleteGesture {
    armed: Option<PhotoId>,
    pointer: Option<Pos2>,
}

impl DeleteGesture {
    fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    fn arm(&mut self, id: PhotoId, pos: Pos2) {
        self.armed = Some(id);
        self.pointer = Some(pos);
    }

    fn track(&mut self, pos: Pos2) {
        self.pointer = Some(pos);
    }

    /// Photo to delete, when the pointer is still over the button it was pressed on.
    fn finish(self, target_at: impl FnOnce(Pos2) -> Option<PhotoId>) -> Option<PhotoId> {
        let armed = self.armed?;
        let pos = self.pointer?;
        (target_at(pos).as_ref() == Some(&armed)).then_some(armed)
    }
}

impl PhotoWallApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: WallConfig,
        library: Option<LocalLibrary>,
    ) -> Self {
        Self {
            wall: WallState::new(&config),
            background: background::preset(&config.background),
            show_file_names: config.show_file_names,
            library,
            photos: Vec::new(),
            textures: HashMap::new(),
            input: InputRouter::new(),
            refresh_requested: true,
            delete_gesture: DeleteGesture::default(),
        }
    }

    /// Refetches the photo list, decodes new thumbnails and regenerates the layout.
    /// A failed fetch keeps the previous list.
    fn reload_photos(&mut self, ctx: &egui::Context, wall_size: Vec2) {
        if let Some(library) = &self.library {
            match library.fetch() {
                Ok(photos) => self.photos = photos,
                Err(err) => log::error!("Failed to fetch photos: {err}"),
            }

            let jobs: Vec<_> = self
                .photos
                .iter()
                .filter(|photo| !self.textures.contains_key(&photo.id))
                .map(|photo| (photo.id.clone(), library.resolve(photo)))
                .collect();
            for (id, result) in load_thumbnails(jobs, THUMBNAIL_MAX_DIMENSION) {
                match result {
                    Ok(image) => {
                        let texture = ctx.load_texture(
                            format!("photo-{id}"),
                            image,
                            egui::TextureOptions::LINEAR,
                        );
                        self.textures.insert(id, texture);
                    }
                    Err(err) => log::warn!("{err}"),
                }
            }
        }

        let photos = &self.photos;
        self.textures
            .retain(|id, _| photos.iter().any(|photo| &photo.id == id));

        let ids = self.photos.iter().map(|photo| photo.id.clone()).collect();
        self.wall.refresh(ids, wall_size);
    }

    fn upload_photos(&mut self) {
        let Some(library) = self.library.as_mut() else {
            log::warn!("No photo library available for upload");
            return;
        };
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
            .pick_files()
        {
            for path in paths {
                if let Err(err) = library.upload(&path) {
                    log::error!("{err}");
                }
            }
            self.refresh_requested = true;
        }
    }

    fn delete_photo(&mut self, id: &PhotoId) {
        let Some(library) = self.library.as_mut() else {
            return;
        };
        match self.wall.delete(id, library) {
            Ok(true) => self.refresh_requested = true,
            Ok(false) => {}
            Err(err) => log::error!("Failed to delete photo {id}: {err}"),
        }
    }

    fn display_name(&self, id: &PhotoId) -> Option<&str> {
        self.photos
            .iter()
            .find(|photo| &photo.id == id)
            .map(Photo::display_name)
    }

    fn toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::default()
                    .fill(COLOR_TOOLBAR_BG)
                    .inner_margin(4.0)
                    .outer_margin(0.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add_space(TOOLBAR_START_SPACING);
                    ui.label(
                        RichText::new(self.wall.mode().title())
                            .size(TITLE_FONT_SIZE)
                            .strong()
                            .color(Color32::WHITE),
                    );
                    ui.add_space(TOOLBAR_START_SPACING * 2.0);

                    if !self.wall.is_read_only() && toolbar_button(ui, "🖼", "Upload Photos") {
                        self.upload_photos();
                    }
                    if toolbar_button(ui, "🔀", "Shuffle") {
                        self.refresh_requested = true;
                    }

                    ui.menu_button(RichText::new("🎨").size(TOOLBAR_ICON_SIZE), |ui| {
                        for preset in &PRESETS {
                            let selected = self.background.name == preset.name;
                            if ui.selectable_label(selected, preset.name).clicked() {
                                log::debug!("Background set to {}", preset.name);
                                self.background = preset;
                                ui.close_menu();
                            }
                        }
                    });

                    if toolbar_button(ui, "🏷", "Toggle File Names (Ctrl+N)") {
                        self.show_file_names = !self.show_file_names;
                    }
                });
            });
    }

    fn canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (canvas_rect, response) =
                    ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
                let wall_size = measured_wall_size(canvas_rect.size(), ctx.screen_rect().size());
                if std::mem::take(&mut self.refresh_requested) {
                    self.reload_photos(ctx, wall_size);
                } else if self.wall.resize(wall_size) {
                    log::debug!("Wall resized to {:?}", wall_size);
                }

                let origin = canvas_rect.min;
                let events = ui.input(|i| i.events.clone());
                let pointer_on_canvas = response.contains_pointer();
                for signal in self.input.route(&events, origin) {
                    match signal {
                        PointerSignal::Press(_) if !pointer_on_canvas => continue,
                        PointerSignal::Press(pos) => {
                            if let Some(id) = self.delete_target(pos) {
                                self.delete_gesture.arm(id, pos);
                                continue;
                            }
                        }
                        PointerSignal::Move(pos) if self.delete_gesture.is_armed() => {
                            self.delete_gesture.track(pos);
                            continue;
                        }
                        PointerSignal::Release if self.delete_gesture.is_armed() => {
                            let gesture = std::mem::take(&mut self.delete_gesture);
                            if let Some(id) = gesture.finish(|pos| self.delete_target(pos)) {
                                self.delete_photo(&id);
                            }
                            continue;
                        }
                        PointerSignal::Cancel if self.delete_gesture.is_armed() => {
                            self.delete_gesture = DeleteGesture::default();
                            continue;
                        }
                        _ => {}
                    }
                    match self.wall.handle(signal) {
                        WallResponse::Dropped(outcome) => {
                            log::debug!(
                                "Dropped {} at {:?} (moved: {})",
                                outcome.item,
                                outcome.position,
                                outcome.moved
                            );
                        }
                        WallResponse::Background(pos) => {
                            log::trace!("Press on empty wall at {:?}", pos);
                        }
                        _ => {}
                    }
                }

                let hover = response.hover_pos().map(|p| p - origin.to_vec2());
                let hovered = hover.and_then(|p| self.wall.hit_test(p));
                if self.wall.drag().is_dragging() {
                    ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
                } else if hovered.is_some() {
                    ctx.set_cursor_icon(egui::CursorIcon::Grab);
                }

                let painter = ui.painter_at(canvas_rect);
                background::paint(&painter, canvas_rect, self.background);

                if self.photos.is_empty() {
                    let message = if self.wall.is_read_only() {
                        "No photos yet!"
                    } else {
                        "No photos yet! Upload some to get started."
                    };
                    painter.text(
                        canvas_rect.center(),
                        Align2::CENTER_CENTER,
                        message,
                        FontId::proportional(TITLE_FONT_SIZE),
                        COLOR_EMPTY_TEXT,
                    );
                    return;
                }

                let show_controls = !self.wall.is_read_only() && !self.wall.drag().is_dragging();
                for tile in self.wall.tiles() {
                    let image = self.textures.get(&tile.id).map(|texture| TileImage {
                        texture: texture.id(),
                        size: texture.size_vec2(),
                    });
                    let label = if self.show_file_names {
                        self.display_name(&tile.id)
                    } else {
                        None
                    };
                    let show_delete = show_controls && hovered.as_ref() == Some(&tile.id);
                    let controls = TileControls {
                        show_delete,
                        delete_hovered: show_delete
                            && hover.is_some_and(|p| renderer::delete_button_hit(&tile, p)),
                    };
                    renderer::paint_tile(&painter, origin.to_vec2(), &tile, image, label, controls);
                }
            });
    }

    /// Photo whose delete button sits under `pos`, if deleting is possible there.
    fn delete_target(&self, pos: Pos2) -> Option<PhotoId> {
        if self.wall.is_read_only() || self.wall.drag().is_dragging() {
            return None;
        }
        let id = self.wall.hit_test(pos)?;
        self.wall
            .tiles()
            .into_iter()
            .find(|tile| tile.id == id)
            .filter(|tile| renderer::delete_button_hit(tile, pos))
            .map(|tile| tile.id)
    }
}

fn toolbar_button(ui: &mut egui::Ui, icon: &str, hint: &str) -> bool {
    ui.add(
        egui::Button::new(RichText::new(icon).size(TOOLBAR_ICON_SIZE))
            .min_size(Vec2::splat(TOOLBAR_BUTTON_SIZE))
            .frame(false),
    )
    .on_hover_text(hint)
    .clicked()
}

impl eframe::App for PhotoWallApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::N)) {
            self.show_file_names = !self.show_file_names;
        }

        self.toolbar(ctx);
        self.canvas(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.wall.reset();
        log::info!("Photo wall closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed_on(id: &str) -> DeleteGesture {
        let mut gesture = DeleteGesture::default();
        gesture.arm(PhotoId::from(id), Pos2::new(10.0, 10.0));
        gesture
    }

    fn button_of_a(pos: Pos2) -> Option<PhotoId> {
        (pos.distance(Pos2::new(10.0, 10.0)) <= 16.0).then(|| PhotoId::from("a"))
    }

    #[test]
    fn release_on_the_same_button_deletes() {
        let mut gesture = armed_on("a");
        gesture.track(Pos2::new(12.0, 9.0));
        assert_eq!(gesture.finish(button_of_a), Some(PhotoId::from("a")));
    }

    #[test]
    fn dragging_off_the_button_before_release_keeps_the_photo() {
        let mut gesture = armed_on("a");
        gesture.track(Pos2::new(200.0, 200.0));
        assert!(gesture.is_armed());
        assert_eq!(gesture.finish(button_of_a), None);
    }

    #[test]
    fn release_over_another_photos_button_keeps_both() {
        let gesture = armed_on("b");
        assert_eq!(gesture.finish(button_of_a), None);
    }

    #[test]
    fn unarmed_gesture_deletes_nothing() {
        assert_eq!(DeleteGesture::default().finish(button_of_a), None);
    }
}
