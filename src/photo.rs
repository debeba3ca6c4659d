use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stable identity of a photo on the wall.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(String);

impl PhotoId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PhotoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PhotoId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A photo record as the library reports it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub file_name: String,
    /// Location of the stored file, relative to the library root.
    pub file_path: PathBuf,
    #[serde(default)]
    pub file_size: u64,
    /// Seconds since the Unix epoch.
    #[serde(default)]
    pub created_at: u64,
}

impl Photo {
    pub fn display_name(&self) -> &str {
        Path::new(&self.file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
    }
}
