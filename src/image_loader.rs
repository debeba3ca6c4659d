use crate::photo::PhotoId;
use egui::ColorImage;
use image::{DynamicImage, ImageFormat};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub type ThumbnailResult = (PhotoId, Result<ColorImage, String>);

/// Decodes the first frame of the image at `path`, shrunk so that its longest side
/// is at most `max_dimension` pixels.
pub fn load_thumbnail(path: &Path, max_dimension: u32) -> Result<ColorImage, String> {
    let bytes =
        fs::read(path).map_err(|err| format!("Failed to read {}: {err}", path.display()))?;

    let format = image::guess_format(&bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .map_err(|err| format!("Failed to determine format for {}: {err}", path.display()))?;

    let image = image::load_from_memory_with_format(&bytes, format)
        .map_err(|err| format!("Failed to decode {}: {err}", path.display()))?;

    let max_dimension = max_dimension.max(1);
    let image = if image.width() > max_dimension || image.height() > max_dimension {
        image.thumbnail(max_dimension, max_dimension)
    } else {
        image
    };

    Ok(color_image_from_dynamic(image))
}

/// Decodes every photo on the rayon pool. Results keep the input order.
pub fn load_thumbnails(jobs: Vec<(PhotoId, PathBuf)>, max_dimension: u32) -> Vec<ThumbnailResult> {
    jobs.into_par_iter()
        .map(|(id, path)| {
            let result = load_thumbnail(&path, max_dimension);
            (id, result)
        })
        .collect()
}

fn color_image_from_dynamic(image: DynamicImage) -> ColorImage {
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, &rgba.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use uuid::Uuid;

    fn write_png(width: u32, height: u32) -> PathBuf {
        let path = std::env::temp_dir().join(format!("photo_wall_thumb_{}.png", Uuid::new_v4()));
        RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn large_image_is_downscaled_keeping_aspect() {
        let path = write_png(800, 400);
        let image = load_thumbnail(&path, 200).unwrap();
        assert_eq!(image.size, [200, 100]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn small_image_is_left_alone() {
        let path = write_png(30, 20);
        let image = load_thumbnail(&path, 200).unwrap();
        assert_eq!(image.size, [30, 20]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_thumbnail(Path::new("/definitely/not/here.png"), 64).unwrap_err();
        assert!(err.contains("/definitely/not/here.png"));
    }

    #[test]
    fn batch_keeps_order_and_isolates_failures() {
        let good = write_png(10, 10);
        let jobs = vec![
            (PhotoId::from("good"), good.clone()),
            (PhotoId::from("bad"), PathBuf::from("/nope.png")),
        ];
        let results = load_thumbnails(jobs, 64);
        assert_eq!(results[0].0.as_str(), "good");
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].0.as_str(), "bad");
        assert!(results[1].1.is_err());
        fs::remove_file(good).unwrap();
    }
}
