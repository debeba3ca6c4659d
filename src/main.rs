mod app;
mod background;
mod config;
mod constants;
mod drag;
mod image_loader;
mod input;
mod library;
mod overrides;
mod paths;
mod photo;
mod placement;
mod renderer;
mod wall;
mod z_stack;

use app::PhotoWallApp;
use config::WallConfig;
use constants::{INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH};
use eframe::egui;
use library::LocalLibrary;
use paths::AppPaths;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let default_paths = AppPaths::from_project_dirs();
    let config = default_paths
        .as_ref()
        .map(|paths| WallConfig::load_or_default(&paths.data))
        .unwrap_or_default();

    let paths = match &config.library_dir {
        Some(dir) => Some(AppPaths::at(dir)),
        None => default_paths,
    };
    let library = match paths {
        Some(paths) => match LocalLibrary::open(&paths) {
            Ok(library) => {
                log::info!("Photo library at {}", library.root().display());
                Some(library)
            }
            Err(err) => {
                log::error!("Failed to open photo library: {err}");
                None
            }
        },
        None => {
            log::error!("Could not determine a data directory for the photo library");
            None
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([INITIAL_WINDOW_WIDTH, INITIAL_WINDOW_HEIGHT]),
        ..Default::default()
    };

    eframe::run_native(
        "Photo Wall",
        options,
        Box::new(move |cc| Ok(Box::new(PhotoWallApp::new(cc, config, library)))),
    )
}
