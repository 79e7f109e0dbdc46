//! Provider-facing seams.
//!
//! Backend adapters interact with the core through two narrow surfaces:
//! the [`ProviderHandle`] they use to push normalized provider events in,
//! and the [`MediaBackend`] trait they implement so the player can forward
//! playback commands out. The core never depends on a concrete backend.

use std::sync::{Arc, Weak};

use async_trait::async_trait;

use crate::events::ProviderEvent;
use crate::player::PlayerInner;
use crate::player::error::{PlayerError, ProviderError, Result};

/// Token representing an active mount.
///
/// Dropping it (at unmount, or with the player) severs every outstanding
/// [`ProviderHandle`] immediately.
pub(crate) struct Mount {
    pub(crate) player: Weak<PlayerInner>,
}

/// Emission side of a mounted provider.
///
/// Returned by [`Player::mount`](crate::Player::mount); the backend
/// adapter calls [`emit`](Self::emit) once per real state change. The
/// handle holds no strong reference to the player: once the mount is torn
/// down, emission fails with [`PlayerError::Unmounted`] and nothing is
/// delivered.
#[derive(Clone)]
pub struct ProviderHandle {
    mount: Weak<Mount>,
}

impl ProviderHandle {
    pub(crate) fn new(mount: &Arc<Mount>) -> Self {
        Self {
            mount: Arc::downgrade(mount),
        }
    }

    /// Deliver one provider event to the core.
    ///
    /// The event is translated, committed, and rebroadcast synchronously
    /// before this call returns.
    ///
    /// # Errors
    /// [`PlayerError::Unmounted`] if the mount or the player is gone.
    pub fn emit(&self, event: ProviderEvent) -> Result<()> {
        let mount = self.mount.upgrade().ok_or(PlayerError::Unmounted)?;
        let player = mount.player.upgrade().ok_or(PlayerError::Unmounted)?;
        player.process_provider_event(&event);
        Ok(())
    }

    /// Whether the mount backing this handle is still alive.
    pub fn is_mounted(&self) -> bool {
        self.mount
            .upgrade()
            .is_some_and(|mount| mount.player.strong_count() > 0)
    }
}

impl std::fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

#[async_trait]
/// Playback command surface a backend adapter implements.
///
/// Commands are the only place the integration may suspend; the core
/// itself never awaits inside a state transition. A backend acknowledges
/// commands by emitting the corresponding provider events through its
/// [`ProviderHandle`] once the underlying media element reacts.
pub trait MediaBackend: Send + Sync {
    /// Load a new media resource.
    async fn load(&self, src: &str) -> std::result::Result<(), ProviderError>;

    /// Begin or resume playback.
    async fn play(&self) -> std::result::Result<(), ProviderError>;

    /// Pause playback.
    async fn pause(&self) -> std::result::Result<(), ProviderError>;

    /// Seek to a playback position in seconds.
    async fn seek(&self, time: f64) -> std::result::Result<(), ProviderError>;

    /// Change the audio volume, in `[0, 1]`.
    async fn set_volume(&self, volume: f64) -> std::result::Result<(), ProviderError>;

    /// Mute or unmute the audio.
    async fn set_muted(&self, muted: bool) -> std::result::Result<(), ProviderError>;
}
