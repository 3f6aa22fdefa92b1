use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::attrs::{Attr, AttributeMap};

/// Default short-form breakpoint: 40em at the 16px reference font size.
pub const DEFAULT_SHORT_FORM_MAX_WIDTH_PX: f64 = 640.0;

/// Default delay before the best-effort play command is sent to a
/// freshly injected short-form embed.
pub const DEFAULT_PLAY_COMMAND_DELAY: Duration = Duration::from_secs(2);

pub(crate) const DEFAULT_TITLE: &str = "Video";
pub(crate) const DEFAULT_PLAY_LABEL: &str = "Play";
pub(crate) const DEFAULT_START_AT: &str = "0";
pub(crate) const DEFAULT_POSTER_QUALITY: &str = "hqdefault";
pub(crate) const DEFAULT_POSTER_LOADING: &str = "lazy";

/// Instance-level tunables.
///
/// Hosts with different breakpoints or slower-booting embeds adjust these
/// instead of forking the lifecycle logic.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedOptions {
    /// Viewport widths at or below this engage short-form behavior when the
    /// `short` flag is set.
    pub short_form_max_width_px: f64,
    /// Delay between short-form activation and the play command.
    pub play_command_delay: Duration,
    /// CSP nonce stamped onto the scaffold `<style>` element, if the host
    /// page enforces one.
    pub style_nonce: Option<String>,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            short_form_max_width_px: DEFAULT_SHORT_FORM_MAX_WIDTH_PX,
            play_command_delay: DEFAULT_PLAY_COMMAND_DELAY,
            style_nonce: None,
        }
    }
}

/// Resolved configuration snapshot of one instance.
///
/// A pure projection of the attribute map and the current viewport width;
/// recomputed on every read path and never cached, so it cannot drift from
/// the attributes. Identifiers arrive percent-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Percent-encoded video identifier; empty in playlist-only mode.
    pub video_id: String,
    /// Percent-encoded playlist identifier; non-empty selects playlist mode.
    pub playlist_id: String,
    /// Human-readable label, defaults to "Video".
    pub title: String,
    /// Accessible action label, defaults to "Play".
    pub play_label: String,
    /// Start offset in seconds, string passthrough, defaults to "0".
    pub start_at: String,
    /// Arm the visibility watcher even without short-form.
    pub auto_load: bool,
    /// Use the privacy-enhanced provider host.
    pub no_cookie: bool,
    /// Poster quality variant, defaults to "hqdefault".
    pub poster_quality: String,
    /// Poster loading-strategy hint, defaults to "lazy".
    pub poster_loading: String,
    /// Raw passthrough query string; empty when the attribute is absent.
    pub extra_params: String,
    /// Short-form: `short` flag set to the empty string AND the viewport is
    /// at most the breakpoint. Evaluated at resolve time.
    pub short_form: bool,
}

impl EmbedConfig {
    /// Resolve the current snapshot.
    ///
    /// Infallible and idempotent: absent attributes map to their documented
    /// defaults, and equal inputs always produce equal snapshots.
    pub fn resolve(
        attrs: &AttributeMap,
        viewport_width: Option<f64>,
        options: &EmbedOptions,
    ) -> Self {
        let short_form = attrs.get(Attr::Short) == Some("")
            && viewport_width.is_some_and(|width| width <= options.short_form_max_width_px);

        Self {
            video_id: attrs.encoded(Attr::VideoId),
            playlist_id: attrs.encoded(Attr::PlaylistId),
            title: attrs.value_or(Attr::VideoTitle, DEFAULT_TITLE).to_string(),
            play_label: attrs.value_or(Attr::VideoPlay, DEFAULT_PLAY_LABEL).to_string(),
            start_at: attrs.value_or(Attr::VideoStartAt, DEFAULT_START_AT).to_string(),
            auto_load: attrs.has(Attr::AutoLoad),
            no_cookie: attrs.has(Attr::NoCookie),
            poster_quality: attrs
                .value_or(Attr::PosterQuality, DEFAULT_POSTER_QUALITY)
                .to_string(),
            poster_loading: attrs
                .value_or(Attr::PosterLoading, DEFAULT_POSTER_LOADING)
                .to_string(),
            extra_params: attrs.get(Attr::Params).unwrap_or_default().to_string(),
            short_form,
        }
    }

    /// Accessible label applied to the poster, the play control, and the
    /// shell tooltip.
    pub fn accessible_label(&self) -> String {
        format!("{}: {}", self.play_label, self.title)
    }

    /// Query tail appended to every embed URL: `start=<seconds>&<extra>`.
    ///
    /// An absent `params` attribute composes as the empty string; the tail
    /// must never contain a stringified missing value.
    pub fn query_tail(&self) -> String {
        format!("start={}&{}", self.start_at, self.extra_params)
    }

    /// Whether setup should arm the visibility watcher.
    pub fn wants_watcher(&self) -> bool {
        self.auto_load || self.short_form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_absent_attributes() {
        let attrs = AttributeMap::new();
        let config = EmbedConfig::resolve(&attrs, None, &EmbedOptions::default());

        assert_eq!(config.video_id, "");
        assert_eq!(config.playlist_id, "");
        assert_eq!(config.title, "Video");
        assert_eq!(config.play_label, "Play");
        assert_eq!(config.start_at, "0");
        assert!(!config.auto_load);
        assert!(!config.no_cookie);
        assert_eq!(config.poster_quality, "hqdefault");
        assert_eq!(config.poster_loading, "lazy");
        assert_eq!(config.extra_params, "");
        assert!(!config.short_form);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut attrs = AttributeMap::new();
        attrs.set(Attr::VideoId, "abc123");
        attrs.set(Attr::Short, "");

        let options = EmbedOptions::default();
        let first = EmbedConfig::resolve(&attrs, Some(375.0), &options);
        let second = EmbedConfig::resolve(&attrs, Some(375.0), &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_identifiers_are_encoded() {
        let mut attrs = AttributeMap::new();
        attrs.set(Attr::VideoId, "a/b?c");
        attrs.set(Attr::PlaylistId, "PL one");

        let config = EmbedConfig::resolve(&attrs, None, &EmbedOptions::default());
        assert_eq!(config.video_id, "a%2Fb%3Fc");
        assert_eq!(config.playlist_id, "PL%20one");
    }

    #[test]
    fn test_short_form_requires_flag_and_narrow_viewport() {
        let options = EmbedOptions::default();
        let mut attrs = AttributeMap::new();
        attrs.set(Attr::VideoId, "abc123");

        // No flag at all.
        assert!(!EmbedConfig::resolve(&attrs, Some(375.0), &options).short_form);

        // Flag set with the empty value, narrow viewport.
        attrs.set(Attr::Short, "");
        assert!(EmbedConfig::resolve(&attrs, Some(375.0), &options).short_form);
        assert!(EmbedConfig::resolve(&attrs, Some(640.0), &options).short_form);

        // Wide viewport or unknown viewport.
        assert!(!EmbedConfig::resolve(&attrs, Some(1280.0), &options).short_form);
        assert!(!EmbedConfig::resolve(&attrs, None, &options).short_form);

        // Only the empty-string value engages the flag.
        attrs.set(Attr::Short, "true");
        assert!(!EmbedConfig::resolve(&attrs, Some(375.0), &options).short_form);
    }

    #[test]
    fn test_query_tail_never_stringifies_missing_params() {
        let attrs = AttributeMap::new();
        let config = EmbedConfig::resolve(&attrs, None, &EmbedOptions::default());

        let tail = config.query_tail();
        assert_eq!(tail, "start=0&");
        assert!(!tail.contains("undefined"));
        assert!(!tail.contains("null"));
    }

    #[test]
    fn test_query_tail_composes_start_and_params() {
        let mut attrs = AttributeMap::new();
        attrs.set(Attr::VideoStartAt, "42");
        attrs.set(Attr::Params, "rel=0&controls=0");

        let config = EmbedConfig::resolve(&attrs, None, &EmbedOptions::default());
        assert_eq!(config.query_tail(), "start=42&rel=0&controls=0");
    }

    #[test]
    fn test_custom_breakpoint() {
        let mut attrs = AttributeMap::new();
        attrs.set(Attr::Short, "");

        let options = EmbedOptions {
            short_form_max_width_px: 900.0,
            ..EmbedOptions::default()
        };
        assert!(EmbedConfig::resolve(&attrs, Some(800.0), &options).short_form);
        assert!(!EmbedConfig::resolve(&attrs, Some(1000.0), &options).short_form);
    }
}
