//! Deferred-activation placeholder for YouTube embeds.
//!
//! A [`LiteEmbed`] stands in for the heavyweight player frame: the host
//! paints a lightweight poster shell immediately and the real embed is
//! injected only when the user clicks the instance or, for `autoload` and
//! short-form instances, when it scrolls into view. The first pointer
//! hover preconnects the provider origins once per process so the
//! eventual embed request starts on warm sockets.
//!
//! # Lifecycle
//!
//! The host reports the page to the instance as [`PageEvent`]s and
//! receives outward effects (resource hints, player commands, lifecycle
//! events) through its [`HostBridge`]. Configuration lives in attributes:
//! writes to the watched ones (`videoid`, `playlistid`, `videotitle`,
//! `videoPlay`) tear down a live embed and start a fresh epoch, announced
//! as [`EmbedEvent::ConfigChanged`] with before/after snapshots. The
//! bundled [`runtime::drive`] loop feeds an instance from a tokio channel
//! and fires its delayed player commands.
//!
//! # Examples
//!
//! ```
//! use litetube::{ChannelHost, EmbedBuilder, EmbedEvent, HostEffect, PageEvent};
//!
//! let (host, mut effects) = ChannelHost::new();
//! let mut embed = EmbedBuilder::new()
//!     .video_id("dQw4w9WgXcQ")
//!     .video_title("Launch recap")
//!     .build(host);
//!
//! embed.handle_event(PageEvent::Click);
//! assert!(embed.is_activated());
//! assert!(matches!(
//!     effects.try_recv(),
//!     Ok(HostEffect::Event(EmbedEvent::Activated { .. }))
//! ));
//! ```

pub mod attrs;
pub mod config;
pub mod embed;
pub mod events;
pub mod host;
pub mod instance;
pub mod poster;
pub mod prewarm;
pub mod runtime;
pub mod shell;
pub mod watcher;

pub use attrs::{Attr, AttrError, AttributeMap};
pub use config::{EmbedConfig, EmbedOptions};
pub use embed::{EMBED_ALLOW, EmbedFrame, embed_url, short_form_params};
pub use events::{EmbedEvent, PageEvent, PlayerCommand};
pub use host::{ChannelHost, HostBridge, HostEffect};
pub use instance::{EmbedBuilder, LiteEmbed};
pub use poster::poster_url;
pub use prewarm::{HintKind, PRECONNECT_ORIGINS, PrewarmGate, ResourceHint};
pub use runtime::drive;
pub use shell::{POSTER_REFERRER_POLICY, PosterSurface, ShellState, scaffold_css, scaffold_markup};
pub use watcher::{VisibilityWatcher, WatcherState};
