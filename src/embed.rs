use serde::{Deserialize, Serialize};

use crate::config::EmbedConfig;

/// Permissions allow-list granted to every embed frame.
pub const EMBED_ALLOW: &str =
    "accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture";

/// Build the embed request URL for the given snapshot.
///
/// Playlist mode takes precedence over single-video mode when a playlist
/// identifier is present. The `nocookie` flag selects the privacy-enhanced
/// provider host. Empty identifiers degrade to syntactically valid but
/// semantically empty URLs rather than failing.
pub fn embed_url(config: &EmbedConfig, autoplay: bool) -> String {
    let host_suffix = if config.no_cookie { "-nocookie" } else { "" };
    let target = if config.playlist_id.is_empty() {
        format!("{}?", config.video_id)
    } else {
        format!("?listType=playlist&list={}&", config.playlist_id)
    };

    format!(
        "https://www.youtube{host_suffix}.com/embed/{target}autoplay={}&{}",
        u8::from(autoplay),
        config.query_tail(),
    )
}

/// Fixed query composition written to the `params` attribute on short-form
/// activation. Looping a single video requires naming it as a one-item
/// playlist.
pub fn short_form_params(video_id: &str) -> String {
    format!(
        "loop=1&mute=1&modestbranding=1&playsinline=1&rel=0&enablejsapi=1&playlist={video_id}"
    )
}

/// The injected embed frame: everything the host needs to materialize the
/// real player element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFrame {
    /// Full embed request URL.
    pub src: String,
    /// Accessible title, mirrors the configured video title.
    pub title: String,
    /// Permissions allow-list.
    pub allow: String,
    /// Fullscreen capability flag.
    pub allow_fullscreen: bool,
}

impl EmbedFrame {
    /// Assemble a frame from a resolved snapshot.
    pub fn new(config: &EmbedConfig, autoplay: bool) -> Self {
        Self {
            src: embed_url(config, autoplay),
            title: config.title.clone(),
            allow: EMBED_ALLOW.to_string(),
            allow_fullscreen: true,
        }
    }

    /// Render the frame as markup for hosts that paint from strings.
    pub fn markup(&self) -> String {
        format!(
            r#"<iframe frameborder="0" title="{}" allow="{}" allowfullscreen src="{}"></iframe>"#,
            self.title, self.allow, self.src,
        )
    }
}
