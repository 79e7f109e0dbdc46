//! Playercore - state-synchronization core for embeddable media players.
//!
//! The core reconciles low-level provider events (raised by whichever
//! media backend is mounted) into a single canonical, read-controlled
//! player state, and rebroadcasts that state two ways:
//!
//! - as a parallel family of public [`PlayerEvent`]s at the player's
//!   boundary (bubbling to host-owned ancestor scopes), and
//! - as per-field reactive channels ([`PlayerContext`]) that any number
//!   of descendant consumers can bind to without a reference to the core.
//!
//! Provider events stay contained inside the boundary by default; a
//! single instance-level toggle lifts containment.
//!
//! # Quick Start
//!
//! ```
//! use playercore::{Player, PlayerOptions, ProviderEvent};
//!
//! let player = Player::new(PlayerOptions::default());
//! let handle = player.mount()?;
//!
//! // A descendant consumer mirrors the fields it cares about.
//! let _volume_sub = player.context().volume.subscribe(|volume| {
//!     println!("volume is now {}", volume.value());
//! });
//!
//! // The backend adapter pushes normalized provider events.
//! handle.emit(ProviderEvent::VolumeChange(0.3))?;
//! assert_eq!(player.context().volume.get().value(), 0.3);
//! # Ok::<(), playercore::PlayerError>(())
//! ```

/// Shared reactive building blocks.
pub mod common;

/// Event catalog and containment-aware dispatch.
pub mod events;

/// Player core: state model, translation, host surface.
pub mod player;

/// Provider-facing seams: emission handle and backend command trait.
pub mod provider;

pub use common::{Property, Subscription};
pub use events::{Event, EventScope, PlayerEvent, Propagation, ProviderEvent};
pub use player::context::PlayerContext;
pub use player::error::{PlayerError, ProviderError, Result};
pub use player::types::{
    Device, InputDevice, MediaType, PlayerId, Source, UNKNOWN_DURATION, ViewType, Volume,
};
pub use player::{Player, PlayerOptions};
pub use provider::{MediaBackend, ProviderHandle};
