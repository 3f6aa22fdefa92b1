//! Walkthrough of one embed instance's life: mount, prewarm, deferred
//! activation, the delayed play command, and a configuration change.
//!
//! Run with `cargo run --example lifecycle`; set `RUST_LOG=debug` to see
//! the lifecycle internals.

use std::time::Duration;

use anyhow::Result;
use litetube::{
    ChannelHost, EmbedBuilder, EmbedEvent, EmbedOptions, HostEffect, PageEvent, drive,
    scaffold_markup,
};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = EmbedOptions {
        // Shortened so the walkthrough does not idle for two seconds.
        play_command_delay: Duration::from_millis(300),
        ..EmbedOptions::default()
    };
    log::debug!("Scaffold subtree:\n{}", scaffold_markup(&options));

    let (host, mut effects) = ChannelHost::new();
    let embed = EmbedBuilder::new()
        .video_id("dQw4w9WgXcQ")
        .video_title("Launch recap")
        .short()
        .viewport_width(375.0)
        .options(options)
        .build(host);

    log::info!("Mounted: poster {}", embed.shell().poster.source);

    let (page, events) = mpsc::unbounded_channel();
    let driver = tokio::spawn(drive(embed, events));

    // The page reports a hover, then the instance scrolling into view.
    page.send(PageEvent::PointerOver)?;
    page.send(PageEvent::VisibilityChanged { intersecting: true })?;

    while let Some(effect) = effects.recv().await {
        match effect {
            HostEffect::ResourceHint(hint) => {
                log::info!("page <- {} {}", hint.kind.as_rel(), hint.href);
            }
            HostEffect::Event(EmbedEvent::Activated { video_id }) => {
                log::info!("page <- activated: {video_id}");
            }
            HostEffect::Event(EmbedEvent::ConfigChanged { before, after }) => {
                log::info!(
                    "page <- config changed: {} -> {}",
                    before.video_id,
                    after.video_id
                );
            }
            HostEffect::PlayerCommand(command) => {
                log::info!("player <- {}", command.to_json());
                break;
            }
        }
    }

    // A watched attribute write tears the embed down for a new epoch.
    page.send(PageEvent::AttributeWritten {
        attr: litetube::Attr::VideoId,
        value: Some("9bZkp7q19f0".to_string()),
    })?;
    if let Some(HostEffect::Event(EmbedEvent::ConfigChanged { before, after })) =
        effects.recv().await
    {
        log::info!(
            "page <- config changed: {} -> {}",
            before.video_id,
            after.video_id
        );
    }

    drop(page);
    let embed = driver.await?;
    log::info!(
        "Driver stopped; activated={}, poster {}",
        embed.is_activated(),
        embed.shell().poster.source
    );

    Ok(())
}
