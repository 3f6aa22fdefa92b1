use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::events::{EmbedEvent, PlayerCommand};
use crate::prewarm::ResourceHint;

/// Bridge to the embedding page or runtime.
///
/// The lifecycle pushes its outward effects through this seam and never
/// observes their delivery. Every method is infallible by contract: a
/// host that fails internally absorbs its own failure rather than
/// surfacing it into the lifecycle.
pub trait HostBridge {
    /// Install a resource hint in the page head.
    fn add_resource_hint(&self, hint: ResourceHint);

    /// Deliver a postMessage command to the embedded player, best effort.
    fn post_player_command(&self, command: PlayerCommand);

    /// Re-broadcast a lifecycle event to the page.
    fn dispatch(&self, event: EmbedEvent);
}

/// One outward effect, as forwarded by [`ChannelHost`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEffect {
    ResourceHint(ResourceHint),
    PlayerCommand(PlayerCommand),
    Event(EmbedEvent),
}

/// Host bridge that forwards every effect over an unbounded channel.
///
/// Clones share the same channel, so several instances can feed one
/// effect stream. A closed receiver turns every forward into an absorbed
/// no-op.
#[derive(Debug, Clone)]
pub struct ChannelHost {
    sender: mpsc::UnboundedSender<HostEffect>,
}

impl ChannelHost {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<HostEffect>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    fn forward(&self, effect: HostEffect) {
        if self.sender.send(effect).is_err() {
            log::debug!("Host effect channel closed, dropping effect");
        }
    }
}

impl HostBridge for ChannelHost {
    fn add_resource_hint(&self, hint: ResourceHint) {
        self.forward(HostEffect::ResourceHint(hint));
    }

    fn post_player_command(&self, command: PlayerCommand) {
        self.forward(HostEffect::PlayerCommand(command));
    }

    fn dispatch(&self, event: EmbedEvent) {
        self.forward(HostEffect::Event(event));
    }
}
