use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

pub struct AppPaths {
    pub base: PathBuf,
    pub photos: PathBuf,
    pub data: PathBuf,
}

impl AppPaths {
    pub fn from_project_dirs() -> Option<Self> {
        ProjectDirs::from("com", "photowall", "PhotoWall").map(|dirs| Self::at(dirs.data_dir()))
    }

    /// Library layout rooted at an explicit directory.
    pub fn at(base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
            photos: base.join("photos"),
            data: base.join("data"),
        }
    }

    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.photos)?;
        fs::create_dir_all(&self.data)?;
        Ok(())
    }
}
