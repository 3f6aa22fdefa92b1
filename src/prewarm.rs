use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::host::HostBridge;

/// Origins the provider contacts while booting a player, preconnected
/// ahead of the first activation.
pub const PRECONNECT_ORIGINS: [&str; 6] = [
    "https://i.ytimg.com/",
    "https://s.ytimg.com",
    "https://www.youtube.com",
    "https://www.google.com",
    "https://googleads.g.doubleclick.net",
    "https://static.doubleclick.net",
];

/// Relationship kind of a resource hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintKind {
    #[serde(rename = "dns-prefetch")]
    DnsPrefetch,
    #[serde(rename = "preconnect")]
    Preconnect,
}

impl HintKind {
    pub fn as_rel(&self) -> &'static str {
        match self {
            Self::DnsPrefetch => "dns-prefetch",
            Self::Preconnect => "preconnect",
        }
    }
}

/// A link-element resource hint for the host to install in the page head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHint {
    pub kind: HintKind,
    /// Hinted origin.
    pub href: String,
    /// Request the connection with CORS mode so the warmed socket is
    /// reusable for the poster and player fetches.
    pub cross_origin: bool,
}

impl ResourceHint {
    pub fn preconnect(origin: &str) -> Self {
        Self {
            kind: HintKind::Preconnect,
            href: origin.to_string(),
            cross_origin: true,
        }
    }
}

/// Process-wide once-gate for connection prewarming.
///
/// The transition is monotonic: `false -> true`, never back. Instances
/// share the process default from [`PrewarmGate::shared`]; tests inject a
/// fresh gate per scenario instead of resetting global state.
#[derive(Debug, Default)]
pub struct PrewarmGate {
    warmed: AtomicBool,
}

impl PrewarmGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// The gate shared by every instance that does not inject its own.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<PrewarmGate>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }

    pub fn is_warmed(&self) -> bool {
        self.warmed.load(Ordering::SeqCst)
    }

    /// Issue the preconnect hints exactly once.
    ///
    /// The winning call emits one hint per origin in
    /// [`PRECONNECT_ORIGINS`] and returns `true`; every later call, from
    /// any instance or thread, is absorbed.
    pub fn warm(&self, host: &dyn HostBridge) -> bool {
        if self.warmed.swap(true, Ordering::SeqCst) {
            log::debug!("Connections already prewarmed, skipping");
            return false;
        }

        log::info!("Prewarming {} provider origins", PRECONNECT_ORIGINS.len());
        for origin in PRECONNECT_ORIGINS {
            host.add_resource_hint(ResourceHint::preconnect(origin));
        }
        true
    }
}
