use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error raised when a caller-supplied attribute name is not part of the
/// component's attribute surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttrError {
    #[error("unknown attribute: {0}")]
    Unknown(String),
}

/// The component's attribute surface.
///
/// Attribute names follow the markup spelling of the element, including the
/// two camel-cased ones (`videoPlay`, `videoStartAt`). Values are plain
/// strings; `autoload`, `nocookie` and `short` act as presence flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attr {
    /// Video identifier for single-video mode.
    #[serde(rename = "videoid")]
    VideoId,
    /// Playlist identifier; non-empty switches to playlist-embed mode.
    #[serde(rename = "playlistid")]
    PlaylistId,
    /// Human-readable video title.
    #[serde(rename = "videotitle")]
    VideoTitle,
    /// Accessible action label for the play control.
    #[serde(rename = "videoPlay")]
    VideoPlay,
    /// Playback start offset in seconds (string passthrough).
    #[serde(rename = "videoStartAt")]
    VideoStartAt,
    /// Presence flag: arm the visibility watcher regardless of short-form.
    #[serde(rename = "autoload")]
    AutoLoad,
    /// Presence flag: use the privacy-enhanced provider host.
    #[serde(rename = "nocookie")]
    NoCookie,
    /// Poster image quality variant.
    #[serde(rename = "posterquality")]
    PosterQuality,
    /// Loading-strategy hint for the poster image.
    #[serde(rename = "posterloading")]
    PosterLoading,
    /// Raw passthrough query string appended to the embed URL.
    #[serde(rename = "params")]
    Params,
    /// Presence flag (empty value only): short-form candidate.
    #[serde(rename = "short")]
    Short,
}

impl Attr {
    /// All attributes, in declaration order.
    pub const ALL: [Attr; 11] = [
        Attr::VideoId,
        Attr::PlaylistId,
        Attr::VideoTitle,
        Attr::VideoPlay,
        Attr::VideoStartAt,
        Attr::AutoLoad,
        Attr::NoCookie,
        Attr::PosterQuality,
        Attr::PosterLoading,
        Attr::Params,
        Attr::Short,
    ];

    /// Attribute name as written in markup.
    pub fn as_name(&self) -> &'static str {
        match self {
            Attr::VideoId => "videoid",
            Attr::PlaylistId => "playlistid",
            Attr::VideoTitle => "videotitle",
            Attr::VideoPlay => "videoPlay",
            Attr::VideoStartAt => "videoStartAt",
            Attr::AutoLoad => "autoload",
            Attr::NoCookie => "nocookie",
            Attr::PosterQuality => "posterquality",
            Attr::PosterLoading => "posterloading",
            Attr::Params => "params",
            Attr::Short => "short",
        }
    }

    /// Whether a change to this attribute opens a new activation epoch.
    ///
    /// Only watched attributes tear down an active embed and re-run setup;
    /// everything else is read lazily at its next use.
    pub fn is_watched(&self) -> bool {
        matches!(
            self,
            Attr::VideoId | Attr::PlaylistId | Attr::VideoTitle | Attr::VideoPlay
        )
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_name())
    }
}

impl FromStr for Attr {
    type Err = AttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attr::ALL
            .iter()
            .copied()
            .find(|attr| attr.as_name() == s)
            .ok_or_else(|| AttrError::Unknown(s.to_string()))
    }
}

/// Current attribute state of one component instance.
///
/// A plain name/value store. Presence-flag semantics live in the readers:
/// `has` answers flag presence, `get` exposes the raw value (an empty
/// string is a legal, meaningful value for `short`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeMap {
    values: HashMap<Attr, String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of an attribute, if set.
    pub fn get(&self, attr: Attr) -> Option<&str> {
        self.values.get(&attr).map(String::as_str)
    }

    /// Value of an attribute, falling back to a default when absent.
    pub fn value_or<'a>(&'a self, attr: Attr, default: &'a str) -> &'a str {
        match self.get(attr) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }

    /// Percent-encoded value of an attribute, empty string when absent.
    ///
    /// Identifiers flow straight into URLs; encoding happens at this read
    /// boundary.
    pub fn encoded(&self, attr: Attr) -> String {
        urlencoding::encode(self.get(attr).unwrap_or_default()).into_owned()
    }

    /// Whether an attribute is present at all (presence-flag semantics).
    pub fn has(&self, attr: Attr) -> bool {
        self.values.contains_key(&attr)
    }

    /// Set an attribute, returning the previous value.
    pub fn set(&mut self, attr: Attr, value: impl Into<String>) -> Option<String> {
        self.values.insert(attr, value.into())
    }

    /// Remove an attribute, returning the previous value.
    pub fn remove(&mut self, attr: Attr) -> Option<String> {
        self.values.remove(&attr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_name_roundtrip() {
        for attr in Attr::ALL {
            assert_eq!(Attr::from_str(attr.as_name()), Ok(attr));
        }
        assert_eq!(
            Attr::from_str("videoID"),
            Err(AttrError::Unknown("videoID".to_string()))
        );
    }

    #[test]
    fn test_watched_set() {
        let watched: Vec<Attr> = Attr::ALL.into_iter().filter(Attr::is_watched).collect();
        assert_eq!(
            watched,
            vec![Attr::VideoId, Attr::PlaylistId, Attr::VideoTitle, Attr::VideoPlay]
        );
    }

    #[test]
    fn test_presence_flags() {
        let mut attrs = AttributeMap::new();
        assert!(!attrs.has(Attr::AutoLoad));

        attrs.set(Attr::AutoLoad, "");
        assert!(attrs.has(Attr::AutoLoad));
        assert_eq!(attrs.get(Attr::AutoLoad), Some(""));

        attrs.remove(Attr::AutoLoad);
        assert!(!attrs.has(Attr::AutoLoad));
    }

    #[test]
    fn test_value_or_defaults() {
        let mut attrs = AttributeMap::new();
        assert_eq!(attrs.value_or(Attr::VideoTitle, "Video"), "Video");

        attrs.set(Attr::VideoTitle, "");
        assert_eq!(attrs.value_or(Attr::VideoTitle, "Video"), "Video");

        attrs.set(Attr::VideoTitle, "Launch day");
        assert_eq!(attrs.value_or(Attr::VideoTitle, "Video"), "Launch day");
    }

    #[test]
    fn test_encoded_value() {
        let mut attrs = AttributeMap::new();
        assert_eq!(attrs.encoded(Attr::VideoId), "");

        attrs.set(Attr::VideoId, "dQw4w9WgXcQ");
        assert_eq!(attrs.encoded(Attr::VideoId), "dQw4w9WgXcQ");

        attrs.set(Attr::VideoId, "a b&c");
        assert_eq!(attrs.encoded(Attr::VideoId), "a%20b%26c");
    }

    #[test]
    fn test_set_returns_previous() {
        let mut attrs = AttributeMap::new();
        assert_eq!(attrs.set(Attr::VideoId, "one"), None);
        assert_eq!(attrs.set(Attr::VideoId, "two"), Some("one".to_string()));
    }
}
