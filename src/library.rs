//! Local photo library: image files in `photos/` described by `data/photos.json`.
//!
//! This is the wall's only collaborator. The wall consumes it through [`PhotoSource`]
//! (list and delete); uploading is driven directly by the toolbar.

use crate::paths::AppPaths;
use crate::photo::{Photo, PhotoId};
use image::ImageFormat;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub const MANIFEST_FILE_NAME: &str = "photos.json";

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("photo library I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("photo manifest is invalid: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("photo {0} is not in the library")]
    UnknownPhoto(PhotoId),
    #[error("{} is not a supported image file", .0.display())]
    NotAnImage(PathBuf),
}

/// Ordered photo listing plus deletion.
pub trait PhotoSource {
    /// All photos, newest first.
    fn fetch(&self) -> Result<Vec<Photo>, LibraryError>;

    /// Absolute location of the photo's image file.
    fn resolve(&self, photo: &Photo) -> PathBuf;

    fn delete(&mut self, id: &PhotoId) -> Result<(), LibraryError>;
}

pub struct LocalLibrary {
    root: PathBuf,
    photos_dir: PathBuf,
    manifest: PathBuf,
}

impl LocalLibrary {
    pub fn open(paths: &AppPaths) -> Result<Self, LibraryError> {
        paths.ensure_dirs_exist()?;
        Ok(Self {
            root: paths.base.clone(),
            photos_dir: paths.photos.clone(),
            manifest: paths.data.join(MANIFEST_FILE_NAME),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copies `source` into the library under a fresh id.
    pub fn upload(&mut self, source: &Path) -> Result<Photo, LibraryError> {
        let format = ImageFormat::from_path(source)
            .map_err(|_| LibraryError::NotAnImage(source.to_path_buf()))?;
        let extension = format.extensions_str().first().copied().unwrap_or("img");

        let id = PhotoId::generate();
        let stored_name = format!("{id}.{extension}");
        let destination = self.photos_dir.join(&stored_name);
        let file_size = fs::copy(source, &destination)?;

        let file_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| stored_name.clone());

        let photo = Photo {
            id,
            file_name,
            file_path: Path::new("photos").join(&stored_name),
            file_size,
            created_at: now_secs(),
        };

        let mut photos = self.read_manifest()?;
        photos.push(photo.clone());
        if let Err(err) = self.write_manifest(&photos) {
            // Keep the store consistent with the manifest.
            let _ = fs::remove_file(&destination);
            return Err(err);
        }

        log::info!("Uploaded {} as {}", source.display(), photo.id);
        Ok(photo)
    }

    fn read_manifest(&self) -> Result<Vec<Photo>, LibraryError> {
        match fs::read_to_string(&self.manifest) {
            Ok(text) if text.trim().is_empty() => Ok(Vec::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_manifest(&self, photos: &[Photo]) -> Result<(), LibraryError> {
        let tmp = self.manifest.with_extension("json.tmp");
        let file = fs::File::create(&tmp)?;
        serde_json::to_writer_pretty(io::BufWriter::new(file), photos)?;
        fs::rename(&tmp, &self.manifest)?;
        Ok(())
    }
}

impl PhotoSource for LocalLibrary {
    fn fetch(&self) -> Result<Vec<Photo>, LibraryError> {
        let mut photos = self.read_manifest()?;
        // Later manifest entries win ties so that same-second uploads still list newest first.
        photos.reverse();
        photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(photos)
    }

    fn resolve(&self, photo: &Photo) -> PathBuf {
        self.root.join(&photo.file_path)
    }

    fn delete(&mut self, id: &PhotoId) -> Result<(), LibraryError> {
        let mut photos = self.read_manifest()?;
        let index = photos
            .iter()
            .position(|photo| &photo.id == id)
            .ok_or_else(|| LibraryError::UnknownPhoto(id.clone()))?;
        let photo = photos.remove(index);

        // Manifest before file, so every listed photo still has its image.
        self.write_manifest(&photos)?;

        match fs::remove_file(self.resolve(&photo)) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::warn!("Image file for {} was already gone", photo.id);
            }
            Err(err) => {
                log::warn!("Deleted photo {} but could not remove its file: {err}", photo.id);
            }
        }

        log::info!("Deleted photo {}", photo.id);
        Ok(())
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
