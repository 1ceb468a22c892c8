//! Messaging and resource types

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::PsnError;

/// Group conversation addressed by a message or resource.
///
/// A group's main conversation uses the group id as its thread id, so an
/// empty thread id is normalized to the group id on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagingTarget {
    group_id: String,
    thread_id: String,
}

impl MessagingTarget {
    pub fn new(group_id: impl Into<String>, thread_id: Option<String>) -> Self {
        let group_id = group_id.into();
        let thread_id = thread_id
            .filter(|thread| !thread.trim().is_empty())
            .unwrap_or_else(|| group_id.clone());
        Self { group_id, thread_id }
    }

    /// Target the main thread of a group.
    pub fn main_thread(group_id: impl Into<String>) -> Self {
        Self::new(group_id, None)
    }

    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    #[must_use]
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }
}

/// Kind of resource referenced by a message.
///
/// Numeric codes follow the remote protocol. Only `Image` and `Sticker`
/// have transfer semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Image,
    Sticker,
    Video,
    Audio,
    Link,
}

impl ResourceKind {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Image => 0,
            Self::Sticker => 1,
            Self::Video => 2,
            Self::Audio => 3,
            Self::Link => 4,
        }
    }
}

impl TryFrom<u8> for ResourceKind {
    type Error = PsnError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Image),
            1 => Ok(Self::Sticker),
            2 => Ok(Self::Video),
            3 => Ok(Self::Audio),
            4 => Ok(Self::Link),
            other => Err(PsnError::InvalidInput(format!("unknown resource type code {other}"))),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Image => "Image",
            Self::Sticker => "Sticker",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Link => "Link",
        };
        f.write_str(name)
    }
}

/// Where the bytes of an upload come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    /// Remote image (`http(s)://...{png,jpg,jpeg}`), fetched into a scoped
    /// temporary file before upload.
    RemoteImage(String),
    /// Local file read directly.
    LocalPath(PathBuf),
    /// An http(s) URL that does not point at a supported image.
    UnsupportedUrl(String),
}
