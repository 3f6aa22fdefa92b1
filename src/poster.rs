use crate::config::EmbedConfig;
use crate::shell::ShellState;

/// Deterministic poster image URL for the configured video.
///
/// Always the webp variant; there is no fallback chain and no retry, a
/// failed poster load simply leaves the surface blank.
pub fn poster_url(config: &EmbedConfig) -> String {
    format!(
        "https://i3.ytimg.com/vi_webp/{}/{}.webp",
        config.video_id, config.poster_quality
    )
}

/// Apply the resolved snapshot to the shell surfaces.
///
/// Sets the poster source and loading hint, and writes the accessible
/// label onto the poster, the play control, and the host tooltip. Runs on
/// every configuration epoch.
pub fn apply(config: &EmbedConfig, shell: &mut ShellState) {
    let label = config.accessible_label();

    shell.poster.source = poster_url(config);
    shell.poster.loading = config.poster_loading.clone();
    shell.poster.alt_text = label.clone();
    shell.control_label = label.clone();
    shell.tooltip = label;

    log::debug!("Poster applied: {}", shell.poster.source);
}
