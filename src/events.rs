use serde::{Deserialize, Serialize};

use crate::attrs::Attr;
use crate::config::EmbedConfig;

/// Discrete page-side events an instance responds to.
///
/// The host observes the real page (gestures, intersection, viewport
/// geometry, attribute writes) and reports them here; the lifecycle never
/// polls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageEvent {
    /// Pointer entered the instance. First one per process triggers the
    /// connection prewarm.
    PointerOver,
    /// Direct activation gesture.
    Click,
    /// Intersection observation from the host's viewport tracking.
    VisibilityChanged { intersecting: bool },
    /// Viewport width changed; feeds short-form resolution.
    ViewportResized { width_px: f64 },
    /// Attribute write, `None` removes the attribute.
    AttributeWritten { attr: Attr, value: Option<String> },
}

/// Outbound lifecycle notifications, dispatched through the host bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EmbedEvent {
    /// The embed frame was injected. Exactly one per activation epoch;
    /// hosts re-broadcast it as a bubbling, cancelable page event.
    Activated {
        /// Percent-encoded video identifier of the activated embed.
        video_id: String,
    },
    /// A watched attribute changed to a different value and the instance
    /// re-resolved its configuration.
    ConfigChanged {
        before: Box<EmbedConfig>,
        after: Box<EmbedConfig>,
    },
}

/// Command for the embedded player API, delivered as a JSON postMessage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCommand {
    pub event: String,
    pub func: String,
    pub args: String,
}

impl PlayerCommand {
    /// The best-effort play command sent after short-form activation.
    pub fn play() -> Self {
        Self {
            event: "command".to_string(),
            func: "playVideo".to_string(),
            args: String::new(),
        }
    }

    /// Render the command as the player's JSON wire format.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            log::warn!("Failed to serialize player command: {err}");
            String::new()
        })
    }
}
