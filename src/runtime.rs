use tokio::sync::mpsc;
use tokio::time::{self, Instant};

use crate::events::PageEvent;
use crate::host::HostBridge;
use crate::instance::LiteEmbed;

/// Drive an instance from a stream of page events.
///
/// Waits for whichever comes first, the next page event or the earliest
/// scheduled command deadline, and feeds it to the instance. Scheduled
/// commands keep firing while the channel stays open even if no further
/// events arrive. Returns the instance once every sender is dropped.
pub async fn drive<H: HostBridge>(
    mut embed: LiteEmbed<H>,
    mut events: mpsc::UnboundedReceiver<PageEvent>,
) -> LiteEmbed<H> {
    log::debug!("Embed driver started");

    loop {
        match embed.time_until_next_command(Instant::now()) {
            Some(delay) => {
                tokio::select! {
                    event = events.recv() => match event {
                        Some(event) => embed.handle_event(event),
                        None => break,
                    },
                    () = time::sleep(delay) => embed.tick(Instant::now()),
                }
            }
            None => match events.recv().await {
                Some(event) => embed.handle_event(event),
                None => break,
            },
        }
    }

    log::debug!("Embed driver stopped, event channel closed");
    embed
}
