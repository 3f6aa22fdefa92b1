use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::attrs::{Attr, AttrError, AttributeMap};
use crate::config::{EmbedConfig, EmbedOptions};
use crate::embed::{self, EmbedFrame};
use crate::events::{EmbedEvent, PageEvent, PlayerCommand};
use crate::host::HostBridge;
use crate::poster;
use crate::prewarm::PrewarmGate;
use crate::shell::{self, ShellState};
use crate::watcher::{VisibilityWatcher, WatcherState};

/// One deferred-activation embed instance.
///
/// Owns the attribute map, the visual shell, the visibility watcher, and
/// the schedule of delayed player commands. All lifecycle work happens in
/// response to [`PageEvent`]s or [`LiteEmbed::tick`] deadlines; nothing
/// here blocks or polls.
///
/// Configuration is never cached: every read path resolves a fresh
/// [`EmbedConfig`] from the attributes and the last reported viewport
/// width.
#[derive(Debug)]
pub struct LiteEmbed<H: HostBridge> {
    attrs: AttributeMap,
    shell: ShellState,
    watcher: VisibilityWatcher,
    gate: Arc<PrewarmGate>,
    options: EmbedOptions,
    viewport_width: Option<f64>,
    scheduled: Vec<(Instant, PlayerCommand)>,
    host: H,
}

impl<H: HostBridge> LiteEmbed<H> {
    /// Resolve the current configuration snapshot.
    pub fn config(&self) -> EmbedConfig {
        EmbedConfig::resolve(&self.attrs, self.viewport_width, &self.options)
    }

    /// Route one page event through the lifecycle.
    pub fn handle_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::PointerOver => {
                self.gate.warm(&self.host);
            }
            PageEvent::Click => {
                self.activate(true);
            }
            PageEvent::VisibilityChanged { intersecting } => {
                if self.watcher.should_fire(intersecting, self.is_activated()) {
                    log::debug!("Instance visible in viewport, deferred activation");
                    self.gate.warm(&self.host);
                    self.activate(false);
                }
            }
            PageEvent::ViewportResized { width_px } => {
                self.viewport_width = Some(width_px);
            }
            PageEvent::AttributeWritten { attr, value } => match value {
                Some(value) => self.set_attribute(attr, value),
                None => self.remove_attribute(attr),
            },
        }
    }

    /// Inject the embed frame and leave the poster-only state.
    ///
    /// Absorbed while already activated: no second frame, no second
    /// event. Short-form instances force autoplay, persistently overwrite
    /// the `params` attribute with the loop composition, and schedule the
    /// delayed play command. Dispatches [`EmbedEvent::Activated`] exactly
    /// once per activation epoch, then stands the watcher down.
    pub fn activate(&mut self, force_autoplay: bool) {
        if self.is_activated() {
            log::debug!("Embed already activated, ignoring");
            return;
        }

        let mut config = self.config();
        let autoplay = force_autoplay || config.short_form;
        if config.short_form {
            // Persistent write, observable through the params getter.
            self.attrs
                .set(Attr::Params, embed::short_form_params(&config.video_id));
            config = self.config();
        }

        let frame = EmbedFrame::new(&config, autoplay);
        log::info!("Activating embed: {}", frame.src);

        if !self.shell.install_frame(frame) {
            log::debug!("Shell already holds a frame, ignoring");
            return;
        }

        if config.short_form {
            let due = Instant::now() + self.options.play_command_delay;
            self.scheduled.push((due, PlayerCommand::play()));
            log::debug!(
                "Play command scheduled in {:?}",
                self.options.play_command_delay
            );
        }

        self.host.dispatch(EmbedEvent::Activated {
            video_id: config.video_id,
        });
        self.watcher.disarm();
    }

    /// Fire scheduled player commands whose deadline has passed.
    ///
    /// A command fires against whatever frame is current at its deadline;
    /// with no frame present it is dropped silently. There is no
    /// cancellation path.
    pub fn tick(&mut self, now: Instant) {
        if self.scheduled.is_empty() {
            return;
        }

        let pending = std::mem::take(&mut self.scheduled);
        for (due, command) in pending {
            if due > now {
                self.scheduled.push((due, command));
            } else if self.shell.frame().is_some() {
                log::debug!("Posting delayed player command");
                self.host.post_player_command(command);
            } else {
                log::debug!("No embed frame for delayed player command, dropping");
            }
        }
    }

    /// Time until the earliest scheduled command, `None` when nothing is
    /// scheduled. Already-due commands report zero.
    pub fn time_until_next_command(&self, now: Instant) -> Option<Duration> {
        self.scheduled
            .iter()
            .map(|(due, _)| due.saturating_duration_since(now))
            .min()
    }

    /// Store an attribute value and react to it.
    ///
    /// A watched attribute changing value starts a new configuration
    /// epoch: any live frame is torn down, setup runs against the new
    /// snapshot, and [`EmbedEvent::ConfigChanged`] is dispatched with the
    /// snapshots from before and after the write. Unwatched attributes
    /// and same-value writes only store.
    pub fn set_attribute(&mut self, attr: Attr, value: impl Into<String>) {
        let value = value.into();
        if !attr.is_watched() {
            self.attrs.set(attr, value);
            return;
        }

        let before = self.config();
        let previous = self.attrs.set(attr, value.clone());
        if previous.as_deref() == Some(value.as_str()) {
            log::debug!("Unchanged {attr} write, ignoring");
            return;
        }
        self.begin_epoch(before);
    }

    /// Remove an attribute, with the same watched-change reaction as
    /// [`LiteEmbed::set_attribute`].
    pub fn remove_attribute(&mut self, attr: Attr) {
        if !attr.is_watched() {
            self.attrs.remove(attr);
            return;
        }

        let before = self.config();
        if self.attrs.remove(attr).is_some() {
            self.begin_epoch(before);
        }
    }

    /// Store an attribute by its page-side name.
    pub fn set_attribute_str(&mut self, name: &str, value: &str) -> Result<(), AttrError> {
        let attr: Attr = name.parse()?;
        self.set_attribute(attr, value);
        Ok(())
    }

    /// Raw attribute value, if present.
    pub fn attribute(&self, attr: Attr) -> Option<&str> {
        self.attrs.get(attr)
    }

    pub fn is_activated(&self) -> bool {
        self.shell.is_activated()
    }

    pub fn shell(&self) -> &ShellState {
        &self.shell
    }

    pub fn watcher_state(&self) -> WatcherState {
        self.watcher.state()
    }

    pub fn viewport_width(&self) -> Option<f64> {
        self.viewport_width
    }

    pub fn options(&self) -> &EmbedOptions {
        &self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Static scaffold subtree for this instance's options.
    pub fn scaffold_markup(&self) -> String {
        shell::scaffold_markup(&self.options)
    }

    // Configuration projections, resolved per read.

    /// Percent-encoded video identifier.
    pub fn video_id(&self) -> String {
        self.config().video_id
    }

    /// Percent-encoded playlist identifier.
    pub fn playlist_id(&self) -> String {
        self.config().playlist_id
    }

    pub fn video_title(&self) -> String {
        self.config().title
    }

    pub fn play_label(&self) -> String {
        self.config().play_label
    }

    pub fn start_at(&self) -> String {
        self.config().start_at
    }

    pub fn auto_load(&self) -> bool {
        self.config().auto_load
    }

    pub fn no_cookie(&self) -> bool {
        self.config().no_cookie
    }

    pub fn poster_quality(&self) -> String {
        self.config().poster_quality
    }

    pub fn poster_loading(&self) -> String {
        self.config().poster_loading
    }

    /// Composed query tail, `start=<seconds>&<extra>`.
    pub fn params(&self) -> String {
        self.config().query_tail()
    }

    pub fn short_form(&self) -> bool {
        self.config().short_form
    }

    pub fn set_video_id(&mut self, id: &str) {
        self.set_attribute(Attr::VideoId, id);
    }

    pub fn set_playlist_id(&mut self, id: &str) {
        self.set_attribute(Attr::PlaylistId, id);
    }

    pub fn set_video_title(&mut self, title: &str) {
        self.set_attribute(Attr::VideoTitle, title);
    }

    pub fn set_play_label(&mut self, label: &str) {
        self.set_attribute(Attr::VideoPlay, label);
    }

    pub fn set_params(&mut self, params: &str) {
        self.set_attribute(Attr::Params, params);
    }

    /// Apply the current snapshot to the shell and align the watcher.
    fn setup(&mut self) {
        let config = self.config();
        poster::apply(&config, &mut self.shell);
        self.watcher.sync(config.wants_watcher());
    }

    /// Start a new configuration epoch after a watched-attribute change.
    fn begin_epoch(&mut self, before: EmbedConfig) {
        if let Some(frame) = self.shell.clear_frame() {
            log::info!("Configuration changed, tearing down embed: {}", frame.src);
        }
        self.setup();

        let after = self.config();
        self.host.dispatch(EmbedEvent::ConfigChanged {
            before: Box::new(before),
            after: Box::new(after),
        });
    }
}

/// Builder for [`LiteEmbed`] instances.
///
/// Collects attributes and tunables, then `build(host)` mounts the
/// instance: the initial setup pass applies the poster and arms the
/// watcher before any event arrives.
#[derive(Debug, Default)]
pub struct EmbedBuilder {
    attrs: AttributeMap,
    options: EmbedOptions,
    gate: Option<Arc<PrewarmGate>>,
    viewport_width: Option<f64>,
}

impl EmbedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn video_id(mut self, id: impl Into<String>) -> Self {
        self.attrs.set(Attr::VideoId, id);
        self
    }

    pub fn playlist_id(mut self, id: impl Into<String>) -> Self {
        self.attrs.set(Attr::PlaylistId, id);
        self
    }

    pub fn video_title(mut self, title: impl Into<String>) -> Self {
        self.attrs.set(Attr::VideoTitle, title);
        self
    }

    pub fn play_label(mut self, label: impl Into<String>) -> Self {
        self.attrs.set(Attr::VideoPlay, label);
        self
    }

    pub fn start_at(mut self, seconds: impl Into<String>) -> Self {
        self.attrs.set(Attr::VideoStartAt, seconds);
        self
    }

    pub fn poster_quality(mut self, quality: impl Into<String>) -> Self {
        self.attrs.set(Attr::PosterQuality, quality);
        self
    }

    pub fn poster_loading(mut self, loading: impl Into<String>) -> Self {
        self.attrs.set(Attr::PosterLoading, loading);
        self
    }

    pub fn params(mut self, params: impl Into<String>) -> Self {
        self.attrs.set(Attr::Params, params);
        self
    }

    /// Arm the visibility watcher regardless of short-form.
    pub fn auto_load(mut self) -> Self {
        self.attrs.set(Attr::AutoLoad, "");
        self
    }

    /// Use the privacy-enhanced provider host.
    pub fn no_cookie(mut self) -> Self {
        self.attrs.set(Attr::NoCookie, "");
        self
    }

    /// Flag the instance short-form. Engages only under the breakpoint.
    pub fn short(mut self) -> Self {
        self.attrs.set(Attr::Short, "");
        self
    }

    /// Set any attribute by enum, for values without a named setter.
    pub fn attribute(mut self, attr: Attr, value: impl Into<String>) -> Self {
        self.attrs.set(attr, value);
        self
    }

    /// Initial viewport width in CSS pixels.
    pub fn viewport_width(mut self, width_px: f64) -> Self {
        self.viewport_width = Some(width_px);
        self
    }

    pub fn options(mut self, options: EmbedOptions) -> Self {
        self.options = options;
        self
    }

    /// Inject a prewarm gate; defaults to the process-wide one.
    pub fn prewarm_gate(mut self, gate: Arc<PrewarmGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Mount the instance against its host bridge.
    pub fn build<H: HostBridge>(self, host: H) -> LiteEmbed<H> {
        let mut instance = LiteEmbed {
            attrs: self.attrs,
            shell: ShellState::new(),
            watcher: VisibilityWatcher::new(),
            gate: self.gate.unwrap_or_else(PrewarmGate::shared),
            options: self.options,
            viewport_width: self.viewport_width,
            scheduled: Vec::new(),
            host,
        };
        instance.setup();
        instance
    }
}
