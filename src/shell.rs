use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_POSTER_LOADING, EmbedOptions};
use crate::embed::EmbedFrame;

/// Referrer policy stamped on the poster image. Fixed: the provider only
/// needs the page origin to serve posters.
pub const POSTER_REFERRER_POLICY: &str = "origin";

/// The poster image surface of the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterSurface {
    /// Poster image URL; empty until the first configuration pass.
    pub source: String,
    /// Accessible alternative text, `"{play_label}: {title}"`.
    pub alt_text: String,
    /// Loading-strategy hint (`lazy` by default).
    pub loading: String,
}

impl Default for PosterSurface {
    fn default() -> Self {
        Self {
            source: String::new(),
            alt_text: String::new(),
            loading: DEFAULT_POSTER_LOADING.to_string(),
        }
    }
}

/// Visual state of one embed instance, the model a host paints from.
///
/// Holds the poster surface, the accessible labels, and at most one embed
/// frame. The frame slot and the activated flag move together: the shell
/// is activated exactly when it holds a frame. On activation the poster
/// and play control are hidden, not removed, so a configuration-change
/// teardown restores them without rebuilding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShellState {
    /// Poster surface shown while deactivated.
    pub poster: PosterSurface,
    /// Accessible label on the play control.
    pub control_label: String,
    /// Tooltip on the host container.
    pub tooltip: String,
    frame: Option<EmbedFrame>,
    activated: bool,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the shell currently holds a live embed frame.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// The injected frame, if any.
    pub fn frame(&self) -> Option<&EmbedFrame> {
        self.frame.as_ref()
    }

    /// Whether the poster surface and play control are currently shown.
    pub fn poster_visible(&self) -> bool {
        !self.activated
    }

    /// Install the embed frame and switch to the activated visual state.
    ///
    /// Refuses a second frame: returns `false` and leaves the shell
    /// untouched when one is already installed.
    pub fn install_frame(&mut self, frame: EmbedFrame) -> bool {
        if self.activated {
            return false;
        }
        self.frame = Some(frame);
        self.activated = true;
        true
    }

    /// Remove the frame and restore the pre-activation visuals.
    pub fn clear_frame(&mut self) -> Option<EmbedFrame> {
        self.activated = false;
        self.frame.take()
    }
}

/// Generate the static scaffold stylesheet.
///
/// Reserves the aspect box before any image loads: 16:9 by default, 9:16
/// for flagged instances under the short-form breakpoint. The media query
/// breakpoint is rendered from the same option that drives short-form
/// resolution, so layout and logic cannot disagree.
pub fn scaffold_css(options: &EmbedOptions) -> String {
    let max_width = options.short_form_max_width_px;
    format!(
        r##"
:host {{ contain: content; display: block; position: relative; width: 100%; padding-bottom: calc(100% / (16 / 9)); }}
@media (max-width: {max_width}px) {{ :host([short]) {{ padding-bottom: calc(100% / (9 / 16)); }} }}
#frame, #placeholder, iframe {{ position: absolute; width: 100%; height: 100%; left: 0; }}
#frame {{ cursor: pointer; }}
#placeholder {{ object-fit: cover; }}
#frame::before {{ content: ''; display: block; position: absolute; top: 0; background-image: linear-gradient(180deg, #111 -20%, transparent 90%); height: 60px; width: 100%; z-index: 1; }}
#playButton {{ width: 68px; height: 48px; background-color: transparent; background-image: url('data:image/svg+xml;utf8,<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 68 48"><path d="M66.52 7.74c-.78-2.93-2.49-5.41-5.42-6.19C55.79.13 34 0 34 0S12.21.13 6.9 1.55c-2.93.78-4.63 3.26-5.42 6.19C.06 13.05 0 24 0 24s.06 10.95 1.48 16.26c.78 2.93 2.49 5.41 5.42 6.19C12.21 47.87 34 48 34 48s21.79-.13 27.1-1.55c2.93-.78 4.64-3.26 5.42-6.19C67.94 34.95 68 24 68 24s-.06-10.95-1.48-16.26z" fill="red"/><path d="M45 24 27 14v20" fill="white"/></svg>'); z-index: 1; border: 0; border-radius: inherit; }}
#playButton:before {{ content: ''; border-style: solid; border-width: 11px 0 11px 19px; border-color: transparent transparent transparent #fff; }}
#playButton, #playButton:before {{ position: absolute; top: 50%; left: 50%; transform: translate3d(-50%, -50%, 0); cursor: inherit; }}
.activated {{ cursor: unset; }}
#frame.activated::before, #frame.activated > #playButton {{ display: none; }}
"##
    )
}

/// Generate the static scaffold subtree.
///
/// The `<style>` element carries the CSP nonce when the host page
/// enforces one.
pub fn scaffold_markup(options: &EmbedOptions) -> String {
    let nonce = match &options.style_nonce {
        Some(nonce) => format!(" nonce=\"{nonce}\""),
        None => String::new(),
    };
    let css = scaffold_css(options);

    format!(
        r#"<style{nonce}>{css}</style>
<div id="frame">
    <img id="placeholder" referrerpolicy="{POSTER_REFERRER_POLICY}" loading="lazy">
    <button id="playButton"></button>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::AttributeMap;
    use crate::config::EmbedConfig;

    fn test_frame() -> EmbedFrame {
        let attrs = AttributeMap::new();
        let config = EmbedConfig::resolve(&attrs, None, &EmbedOptions::default());
        EmbedFrame::new(&config, false)
    }

    #[test]
    fn test_new_shell_is_deactivated() {
        let shell = ShellState::new();
        assert!(!shell.is_activated());
        assert!(shell.frame().is_none());
        assert!(shell.poster_visible());
        assert_eq!(shell.poster.loading, "lazy");
    }

    #[test]
    fn test_install_frame_activates_once() {
        let mut shell = ShellState::new();
        assert!(shell.install_frame(test_frame()));
        assert!(shell.is_activated());
        assert!(!shell.poster_visible());

        // Second install is refused, first frame stays.
        assert!(!shell.install_frame(test_frame()));
        assert!(shell.frame().is_some());
    }

    #[test]
    fn test_clear_frame_restores_poster() {
        let mut shell = ShellState::new();
        shell.install_frame(test_frame());

        assert!(shell.clear_frame().is_some());
        assert!(!shell.is_activated());
        assert!(shell.poster_visible());
        assert!(shell.clear_frame().is_none());
    }

    #[test]
    fn test_css_reserves_both_aspect_boxes() {
        let css = scaffold_css(&EmbedOptions::default());
        assert!(css.contains("padding-bottom: calc(100% / (16 / 9))"));
        assert!(css.contains("padding-bottom: calc(100% / (9 / 16))"));
        assert!(css.contains("@media (max-width: 640px)"));
    }

    #[test]
    fn test_css_honors_custom_breakpoint() {
        let options = EmbedOptions {
            short_form_max_width_px: 900.0,
            ..EmbedOptions::default()
        };
        assert!(scaffold_css(&options).contains("@media (max-width: 900px)"));
    }

    #[test]
    fn test_markup_structure() {
        let markup = scaffold_markup(&EmbedOptions::default());
        assert!(markup.contains("<style>"));
        assert!(markup.contains(r#"<div id="frame">"#));
        assert!(markup.contains(r#"referrerpolicy="origin""#));
        assert!(markup.contains(r#"<button id="playButton">"#));
    }

    #[test]
    fn test_markup_carries_style_nonce() {
        let options = EmbedOptions {
            style_nonce: Some("r4nd0m".to_string()),
            ..EmbedOptions::default()
        };
        assert!(scaffold_markup(&options).contains(r#"<style nonce="r4nd0m">"#));
    }
}
