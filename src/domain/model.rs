use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// Identifier of an asset in the device media library.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AssetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Only meaningful for videos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Duration>,
}

/// One selectable asset. Equality and hashing use the asset id only, so the
/// same asset loaded twice with different metadata is still one selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub id: AssetId,
    #[serde(default)]
    pub metadata: AssetMetadata,
}

impl MediaItem {
    pub fn image(id: impl Into<AssetId>) -> Self {
        Self {
            kind: MediaKind::Image,
            id: id.into(),
            metadata: AssetMetadata::default(),
        }
    }

    pub fn video(id: impl Into<AssetId>) -> Self {
        Self {
            kind: MediaKind::Video,
            id: id.into(),
            metadata: AssetMetadata::default(),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.metadata.duration = Some(duration);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.metadata.created_at = Some(created_at);
        self
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

impl PartialEq for MediaItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MediaItem {}

impl Hash for MediaItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Tabs the picker can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Image,
    Camera,
    Video,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Image => "image",
            Tab::Camera => "camera",
            Tab::Video => "video",
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "image" | "images" => Ok(Tab::Image),
            "camera" => Ok(Tab::Camera),
            "video" | "videos" => Ok(Tab::Video),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

/// Final selection handed to the delegate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Selection {
    pub images: Vec<MediaItem>,
    pub videos: Vec<MediaItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ignores_metadata() {
        let a = MediaItem::video("clip").with_duration(Duration::from_secs(3));
        let b = MediaItem::video("clip");
        assert_eq!(a, b);
        assert_ne!(MediaItem::image("a"), MediaItem::image("b"));
    }

    #[test]
    fn test_tab_from_str() {
        assert_eq!("videos".parse::<Tab>().unwrap(), Tab::Video);
        assert_eq!("camera".parse::<Tab>().unwrap(), Tab::Camera);
        assert!("album".parse::<Tab>().is_err());
    }
}
