//! Event catalog and dispatch.
//!
//! Two strictly parallel, name-correlated event families flow through the
//! core: internal provider events (backend → core, one-way) and public
//! player events (core → world). Both share payload shapes and a
//! kebab-case wire naming convention (`provider-<name>` vs `<name>`).

pub mod dispatch;

pub use dispatch::{EventScope, Propagation};

use crate::player::error::ProviderError;
use crate::player::types::{MediaType, ViewType};

/// Notification raised by the mounted provider.
///
/// A provider event is a pure notification: it carries the *new* value (or
/// nothing, for action signals) and is never assumed to already be
/// reflected in state. The translator alone decides whether and how to
/// commit it.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    /// Playback was requested to resume
    Play,

    /// Playback was requested to pause
    Pause,

    /// Media is actively playing back
    Playing,

    /// Mute state changed
    MutedChange(bool),

    /// Audio volume changed, in `[0, 1]`
    VolumeChange(f64),

    /// Playback position changed, in seconds
    TimeChange(f64),

    /// Total media length changed, in seconds
    DurationChange(f64),

    /// Downloaded amount changed, in seconds
    BufferedChange(f64),

    /// Whether playback is stalled waiting on data
    BufferingChange(bool),

    /// Player view type changed
    ViewTypeChange(ViewType),

    /// Active media type changed
    MediaTypeChange(MediaType),

    /// The provider has loaded and can be interacted with
    Ready,

    /// Media can play through without stalling
    PlaybackReady,

    /// Playback has started for the first time in this load
    PlaybackStart,

    /// Playback has reached the end of the media
    PlaybackEnd,

    /// The provider surfaced a failure
    Error(ProviderError),
}

impl ProviderEvent {
    /// Stable wire name of the event (`provider-` prefixed).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Play => "provider-play",
            Self::Pause => "provider-pause",
            Self::Playing => "provider-playing",
            Self::MutedChange(_) => "provider-muted-change",
            Self::VolumeChange(_) => "provider-volume-change",
            Self::TimeChange(_) => "provider-time-change",
            Self::DurationChange(_) => "provider-duration-change",
            Self::BufferedChange(_) => "provider-buffered-change",
            Self::BufferingChange(_) => "provider-buffering-change",
            Self::ViewTypeChange(_) => "provider-view-type-change",
            Self::MediaTypeChange(_) => "provider-media-type-change",
            Self::Ready => "provider-ready",
            Self::PlaybackReady => "provider-playback-ready",
            Self::PlaybackStart => "provider-playback-start",
            Self::PlaybackEnd => "provider-playback-end",
            Self::Error(_) => "provider-error",
        }
    }
}

/// Public notification reflecting a committed state change.
///
/// Payload-carrying variants always carry the committed value: clamping
/// and derivation happen before emission, so listeners and context readers
/// observe the same generation of state.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Playback resumed (paused cleared)
    Play,

    /// Playback paused
    Pause,

    /// Media is actively playing back
    Playing,

    /// Committed mute state
    MutedChange(bool),

    /// Committed volume, clamped to `[0, 1]`
    VolumeChange(f64),

    /// Committed playback position, clamped to the duration bounds
    TimeChange(f64),

    /// Committed media length
    DurationChange(f64),

    /// Committed downloaded amount
    BufferedChange(f64),

    /// Committed buffering flag
    BufferingChange(bool),

    /// Committed view type
    ViewTypeChange(ViewType),

    /// Committed media type
    MediaTypeChange(MediaType),

    /// The provider is ready (counterpart of [`ProviderEvent::Ready`])
    Ready,

    /// Media is ready for playback to begin
    PlaybackReady,

    /// Playback started for the first time in this load
    PlaybackStart,

    /// Playback reached the end of the media
    PlaybackEnd,

    /// Relayed provider failure; no state was mutated
    Error(ProviderError),
}

impl PlayerEvent {
    /// Stable wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Playing => "playing",
            Self::MutedChange(_) => "muted-change",
            Self::VolumeChange(_) => "volume-change",
            Self::TimeChange(_) => "time-change",
            Self::DurationChange(_) => "duration-change",
            Self::BufferedChange(_) => "buffered-change",
            Self::BufferingChange(_) => "buffering-change",
            Self::ViewTypeChange(_) => "view-type-change",
            Self::MediaTypeChange(_) => "media-type-change",
            Self::Ready => "ready",
            Self::PlaybackReady => "playback-ready",
            Self::PlaybackStart => "playback-start",
            Self::PlaybackEnd => "playback-end",
            Self::Error(_) => "error",
        }
    }
}

/// Any event observable at a player boundary.
///
/// Provider events stay confined to the boundary by default; player events
/// bubble to ancestor scopes. See [`dispatch`] for the containment policy.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Internal provider notification
    Provider(ProviderEvent),

    /// Public player notification
    Player(PlayerEvent),
}

impl Event {
    /// Stable wire name of the wrapped event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Provider(event) => event.name(),
            Self::Player(event) => event.name(),
        }
    }

    /// The wrapped player event, if this is a public notification.
    pub fn as_player(&self) -> Option<&PlayerEvent> {
        match self {
            Self::Player(event) => Some(event),
            Self::Provider(_) => None,
        }
    }

    /// The wrapped provider event, if this is an internal notification.
    pub fn as_provider(&self) -> Option<&ProviderEvent> {
        match self {
            Self::Provider(event) => Some(event),
            Self::Player(_) => None,
        }
    }
}
