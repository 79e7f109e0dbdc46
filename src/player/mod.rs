//! Player core: canonical state, event translation, and containment.

/// Canonical state record built from reactive properties.
pub mod context;
/// Player and provider error types.
pub mod error;
/// Provider event reducer.
pub(crate) mod translator;
/// Domain types shared across the player surface.
pub mod types;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::events::{Event, EventScope, Propagation, ProviderEvent};
use crate::provider::{MediaBackend, Mount, ProviderHandle};

use context::PlayerContext;
use error::{PlayerError, Result};
use translator::Translator;
use types::{Device, InputDevice, Source, Volume};

/// Construction-time options for a player.
///
/// Seeds the writable state fields and the bubbling toggle. Serializable
/// so hosts can keep player presets in their own configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerOptions {
    /// Initial media resource identifier
    pub src: Source,

    /// Initial volume in `[0, 1]`; out-of-range values are clamped
    pub volume: f64,

    /// Whether playback starts paused
    pub paused: bool,

    /// Whether audio starts muted
    pub muted: bool,

    /// Whether the provider should render its own controls
    pub controls: bool,

    /// Initial poster URL
    pub poster: Option<String>,

    /// Aspect ratio expressed as `width:height`
    pub aspect_ratio: String,

    /// Whether provider events may escape the player boundary
    pub allow_provider_events_to_bubble: bool,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            src: Source::new(),
            volume: 1.0,
            paused: true,
            muted: false,
            controls: false,
            poster: None,
            aspect_ratio: "16:9".to_string(),
            allow_provider_events_to_bubble: false,
        }
    }
}

pub(crate) struct PlayerInner {
    context: PlayerContext,
    scope: EventScope<Event>,
    allow_provider_bubble: AtomicBool,
    backend: Mutex<Option<Arc<dyn MediaBackend>>>,
    mount: Mutex<Option<Arc<Mount>>>,

    // Serializes transitions so each one is an atomic unit. Never held
    // while awaiting; uncontended in the single-threaded delivery model.
    transition: Mutex<()>,
}

impl PlayerInner {
    /// Process one provider event: containment-scoped redispatch of the
    /// raw event, state transition, then public event dispatch.
    pub(crate) fn process_provider_event(&self, event: &ProviderEvent) {
        let _serialized = lock_or_recover(&self.transition);

        let propagation = if self.allow_provider_bubble.load(Ordering::Acquire) {
            Propagation::Bubble
        } else {
            Propagation::Local
        };
        self.scope.dispatch(&Event::Provider(event.clone()), propagation);

        // State is fully committed (context fan-out included) before the
        // public event becomes observable.
        let public = Translator::apply(&self.context, event);
        debug!(event = public.name(), "dispatching player event");
        self.scope.dispatch(&Event::Player(public), Propagation::Bubble);
    }
}

/// The state-synchronization core of an embeddable media player.
///
/// A player reconciles provider events from a mounted backend into one
/// canonical state record ([`PlayerContext`]), rebroadcasts every commit
/// as a public [`PlayerEvent`] at its boundary, and mirrors the full state
/// surface into per-field reactive channels for descendant consumers.
///
/// # Example
///
/// ```
/// use playercore::{Player, ProviderEvent};
///
/// let player = Player::default();
/// let handle = player.mount()?;
///
/// handle.emit(ProviderEvent::DurationChange(120.0))?;
/// handle.emit(ProviderEvent::TimeChange(30.0))?;
///
/// assert_eq!(player.context().current_time.get(), 30.0);
/// assert!(player.context().has_playback_started.get());
/// # Ok::<(), playercore::PlayerError>(())
/// ```
pub struct Player {
    inner: Arc<PlayerInner>,
}

impl Player {
    /// Create a player with the given options.
    pub fn new(options: PlayerOptions) -> Self {
        let inner = Arc::new(PlayerInner {
            context: PlayerContext::new(&options),
            scope: EventScope::new(),
            allow_provider_bubble: AtomicBool::new(options.allow_provider_events_to_bubble),
            backend: Mutex::new(None),
            mount: Mutex::new(None),
            transition: Mutex::new(()),
        });

        debug!(player = %inner.context.uuid.get(), "player created");
        Self { inner }
    }

    /// The player's state record.
    ///
    /// Clone it (a cheap handle copy) to hand descendant consumers
    /// read-only access to any subset of fields.
    pub fn context(&self) -> &PlayerContext {
        &self.inner.context
    }

    /// The player's event boundary.
    ///
    /// Listen here for public events (and for contained provider events);
    /// attach it to a host scope to model ancestors.
    pub fn events(&self) -> &EventScope<Event> {
        &self.inner.scope
    }

    /// Attach the player's boundary below a host-owned ancestor scope.
    pub fn attach_to(&self, parent: &EventScope<Event>) {
        self.inner.scope.attach_to(parent);
    }

    /// Detach the player's boundary from its ancestor scope.
    pub fn detach(&self) {
        self.inner.scope.detach();
    }

    /// Whether provider events may currently escape the boundary.
    pub fn allow_provider_events_to_bubble(&self) -> bool {
        self.inner.allow_provider_bubble.load(Ordering::Acquire)
    }

    /// Lift or restore provider event containment.
    ///
    /// Applies to the next and subsequent provider events; a single
    /// instance-level toggle with no per-event override.
    pub fn set_allow_provider_events_to_bubble(&self, allow: bool) {
        self.inner.allow_provider_bubble.store(allow, Ordering::Release);
    }

    /// Mount a provider and return its emission handle.
    ///
    /// The handle is the one delivery path for provider events; clone it
    /// freely into the backend adapter.
    ///
    /// # Errors
    /// [`PlayerError::AlreadyMounted`] if a mount is active.
    #[instrument(skip(self), fields(player = %self.inner.context.uuid.get()))]
    pub fn mount(&self) -> Result<ProviderHandle> {
        let mut slot = lock_or_recover(&self.inner.mount);
        if slot.is_some() {
            return Err(PlayerError::AlreadyMounted);
        }

        let mount = Arc::new(Mount {
            player: Arc::downgrade(&self.inner),
        });
        let handle = ProviderHandle::new(&mount);
        *slot = Some(mount);

        debug!("provider mounted");
        Ok(handle)
    }

    /// Tear down the active mount.
    ///
    /// Takes effect immediately: any surviving [`ProviderHandle`] becomes
    /// inert and no further provider event is processed.
    ///
    /// # Errors
    /// [`PlayerError::NotMounted`] if nothing is mounted.
    #[instrument(skip(self), fields(player = %self.inner.context.uuid.get()))]
    pub fn unmount(&self) -> Result<()> {
        let mut slot = lock_or_recover(&self.inner.mount);
        if slot.take().is_none() {
            return Err(PlayerError::NotMounted);
        }

        debug!("provider unmounted");
        Ok(())
    }

    /// Whether a provider is currently mounted.
    pub fn is_mounted(&self) -> bool {
        lock_or_recover(&self.inner.mount).is_some()
    }

    // --- host-writable state -------------------------------------------

    /// Set the media resource identifier.
    pub fn set_src(&self, src: impl Into<Source>) {
        let _serialized = lock_or_recover(&self.inner.transition);
        self.inner.context.src.set(src.into());
    }

    /// Set the volume; values outside `[0, 1]` are clamped.
    pub fn set_volume(&self, volume: f64) {
        let _serialized = lock_or_recover(&self.inner.transition);
        self.inner.context.volume.set(Volume::new(volume));
    }

    /// Seek the state record to a playback position.
    ///
    /// Clamped to the duration bounds; latches the started flag and
    /// recomputes the ended flag exactly like a provider time change.
    /// Returns the committed position.
    pub fn set_current_time(&self, time: f64) -> f64 {
        let _serialized = lock_or_recover(&self.inner.transition);
        translator::commit_time(&self.inner.context, time)
    }

    /// Set the paused flag.
    pub fn set_paused(&self, paused: bool) {
        let _serialized = lock_or_recover(&self.inner.transition);
        self.inner.context.paused.set(paused);
    }

    /// Set the muted flag.
    pub fn set_muted(&self, muted: bool) {
        let _serialized = lock_or_recover(&self.inner.transition);
        self.inner.context.muted.set(muted);
    }

    /// Set whether the provider should render its own controls.
    pub fn set_controls(&self, controls: bool) {
        let _serialized = lock_or_recover(&self.inner.transition);
        self.inner.context.controls.set(controls);
    }

    /// Set the poster URL.
    pub fn set_poster(&self, poster: Option<String>) {
        let _serialized = lock_or_recover(&self.inner.transition);
        self.inner.context.poster.set(poster);
    }

    /// Set the aspect ratio (`width:height`).
    pub fn set_aspect_ratio(&self, aspect_ratio: impl Into<String>) {
        let _serialized = lock_or_recover(&self.inner.transition);
        self.inner.context.aspect_ratio.set(aspect_ratio.into());
    }

    // --- environment inputs --------------------------------------------

    /// Report the device kind detected by the host environment.
    ///
    /// Detection heuristics live outside the core; this commits the value
    /// and its shorthand flags atomically.
    pub fn set_device(&self, device: Device) {
        let _serialized = lock_or_recover(&self.inner.transition);
        let context = &self.inner.context;

        let device_changed = context.device.stage(device);
        let mobile = context.is_mobile_device.stage(device == Device::Mobile);
        let desktop = context.is_desktop_device.stage(device == Device::Desktop);

        if device_changed {
            context.device.flush();
        }
        if mobile {
            context.is_mobile_device.flush();
        }
        if desktop {
            context.is_desktop_device.flush();
        }
    }

    /// Report the input kind detected by the host environment.
    pub fn set_input_device(&self, input_device: InputDevice) {
        let _serialized = lock_or_recover(&self.inner.transition);
        let context = &self.inner.context;

        let input_changed = context.input_device.stage(input_device);
        let touch = context
            .is_touch_input_device
            .stage(input_device == InputDevice::Touch);
        let mouse = context
            .is_mouse_input_device
            .stage(input_device == InputDevice::Mouse);
        let keyboard = context
            .is_keyboard_input_device
            .stage(input_device == InputDevice::Keyboard);

        if input_changed {
            context.input_device.flush();
        }
        if touch {
            context.is_touch_input_device.flush();
        }
        if mouse {
            context.is_mouse_input_device.flush();
        }
        if keyboard {
            context.is_keyboard_input_device.flush();
        }
    }

    // --- backend commands ----------------------------------------------

    /// Attach the backend used to execute playback commands.
    pub fn attach_backend(&self, backend: Arc<dyn MediaBackend>) {
        let mut slot = lock_or_recover(&self.inner.backend);
        *slot = Some(backend);
    }

    /// Detach the backend; subsequent commands fail with
    /// [`PlayerError::NoBackend`].
    pub fn detach_backend(&self) {
        let mut slot = lock_or_recover(&self.inner.backend);
        *slot = None;
    }

    /// Ask the backend to load a media resource.
    ///
    /// # Errors
    /// [`PlayerError::NoBackend`] without a backend,
    /// [`PlayerError::Backend`] if the command fails.
    pub async fn load(&self, src: impl Into<Source>) -> Result<()> {
        let src = src.into();
        self.backend("load")?.load(&src).await?;
        Ok(())
    }

    /// Ask the backend to begin or resume playback.
    ///
    /// # Errors
    /// [`PlayerError::NoBackend`] without a backend,
    /// [`PlayerError::Backend`] if the command fails.
    pub async fn play(&self) -> Result<()> {
        self.backend("play")?.play().await?;
        Ok(())
    }

    /// Ask the backend to pause playback.
    ///
    /// # Errors
    /// [`PlayerError::NoBackend`] without a backend,
    /// [`PlayerError::Backend`] if the command fails.
    pub async fn pause(&self) -> Result<()> {
        self.backend("pause")?.pause().await?;
        Ok(())
    }

    /// Ask the backend to resume when paused, or pause when playing.
    ///
    /// # Errors
    /// [`PlayerError::NoBackend`] without a backend,
    /// [`PlayerError::Backend`] if the command fails.
    pub async fn toggle_play(&self) -> Result<()> {
        if self.inner.context.paused.get() {
            self.play().await
        } else {
            self.pause().await
        }
    }

    /// Ask the backend to seek to a position in seconds.
    ///
    /// # Errors
    /// [`PlayerError::NoBackend`] without a backend,
    /// [`PlayerError::Backend`] if the command fails.
    pub async fn seek(&self, time: f64) -> Result<()> {
        self.backend("seek")?.seek(time).await?;
        Ok(())
    }

    /// Ask the backend to change the volume.
    ///
    /// # Errors
    /// [`PlayerError::NoBackend`] without a backend,
    /// [`PlayerError::Backend`] if the command fails.
    pub async fn change_volume(&self, volume: f64) -> Result<()> {
        self.backend("change_volume")?.set_volume(volume).await?;
        Ok(())
    }

    /// Ask the backend to mute or unmute.
    ///
    /// # Errors
    /// [`PlayerError::NoBackend`] without a backend,
    /// [`PlayerError::Backend`] if the command fails.
    pub async fn change_muted(&self, muted: bool) -> Result<()> {
        self.backend("change_muted")?.set_muted(muted).await?;
        Ok(())
    }

    fn backend(&self, operation: &'static str) -> Result<Arc<dyn MediaBackend>> {
        debug!(operation, "forwarding backend command");
        lock_or_recover(&self.inner.backend)
            .as_ref()
            .map(Arc::clone)
            .ok_or(PlayerError::NoBackend { operation })
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerOptions::default())
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("uuid", &self.inner.context.uuid.get())
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}

/// Take a mutex guard, recovering the inner data if a panicking thread
/// poisoned it. State behind these locks is always left consistent
/// between operations.
fn lock_or_recover<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
