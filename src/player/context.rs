use crate::common::Property;

use super::PlayerOptions;
use super::types::{
    Device, InputDevice, MediaType, PlayerId, Source, UNKNOWN_DURATION, ViewType, Volume,
};

/// Canonical player state, exposed field-by-field as reactive properties.
///
/// Each player instance owns exactly one context for its lifetime; it is
/// created at construction with documented defaults and dropped with the
/// player. Descendant consumers clone the context (cheap handle copies)
/// and bind to whichever fields they need via [`Property::subscribe`] or
/// [`Property::watch`]; the core never holds references to consumers.
///
/// Mutation is crate-private. Writable fields are committed by the host
/// through [`Player`](crate::Player) setters or by the translator from
/// provider events; read-only fields are only ever produced by the
/// translator or by the environment-input setters.
#[derive(Debug, Clone)]
pub struct PlayerContext {
    /// Unique identifier of the owning player instance
    pub uuid: Property<PlayerId>,

    /// Identifier or URL of the current media resource
    pub src: Property<Source>,

    /// Audio volume, clamped to `[0, 1]`
    pub volume: Property<Volume>,

    /// Current playback position in seconds, clamped to duration bounds
    pub current_time: Property<f64>,

    /// Whether playback should be paused
    pub paused: Property<bool>,

    /// Whether the audio is muted
    pub muted: Property<bool>,

    /// Whether the provider should render its own controls
    pub controls: Property<bool>,

    /// Poster URL for the current media resource
    pub poster: Property<Option<String>>,

    /// Aspect ratio expressed as `width:height` (e.g. `16:9`)
    pub aspect_ratio: Property<String>,

    /// Total media length in seconds; [`UNKNOWN_DURATION`] until reported,
    /// `f64::INFINITY` for live streams
    pub duration: Property<f64>,

    /// Seconds of media downloaded so far
    pub buffered: Property<f64>,

    /// Whether playback is stalled waiting on data
    pub is_buffering: Property<bool>,

    /// Whether media is actively playing back
    pub is_playing: Property<bool>,

    /// Latched true the first time a position above zero is committed
    pub has_playback_started: Property<bool>,

    /// Whether playback has reached the end of the media
    pub has_playback_ended: Property<bool>,

    /// Whether the provider has loaded and can be interacted with
    pub is_provider_ready: Property<bool>,

    /// Whether media can play through without stalling
    pub is_playback_ready: Property<bool>,

    /// The player view in use
    pub view_type: Property<ViewType>,

    /// Shorthand for `view_type == ViewType::Audio`
    pub is_audio_view: Property<bool>,

    /// Shorthand for `view_type == ViewType::Video`
    pub is_video_view: Property<bool>,

    /// The active media type
    pub media_type: Property<MediaType>,

    /// Shorthand for `media_type == MediaType::Audio`
    pub is_audio: Property<bool>,

    /// Shorthand for `media_type == MediaType::Video`
    pub is_video: Property<bool>,

    /// Device kind reported by the host environment
    pub device: Property<Device>,

    /// Shorthand for `device == Device::Mobile`
    pub is_mobile_device: Property<bool>,

    /// Shorthand for `device == Device::Desktop`
    pub is_desktop_device: Property<bool>,

    /// Input kind reported by the host environment
    pub input_device: Property<InputDevice>,

    /// Shorthand for `input_device == InputDevice::Touch`
    pub is_touch_input_device: Property<bool>,

    /// Shorthand for `input_device == InputDevice::Mouse`
    pub is_mouse_input_device: Property<bool>,

    /// Shorthand for `input_device == InputDevice::Keyboard`
    pub is_keyboard_input_device: Property<bool>,
}

impl PlayerContext {
    /// Create a fresh state record seeded from `options`.
    pub(crate) fn new(options: &PlayerOptions) -> Self {
        Self {
            uuid: Property::new(PlayerId::generate()),
            src: Property::new(options.src.clone()),
            volume: Property::new(Volume::new(options.volume)),
            current_time: Property::new(0.0),
            paused: Property::new(options.paused),
            muted: Property::new(options.muted),
            controls: Property::new(options.controls),
            poster: Property::new(options.poster.clone()),
            aspect_ratio: Property::new(options.aspect_ratio.clone()),
            duration: Property::new(UNKNOWN_DURATION),
            buffered: Property::new(0.0),
            is_buffering: Property::new(false),
            is_playing: Property::new(false),
            has_playback_started: Property::new(false),
            has_playback_ended: Property::new(false),
            is_provider_ready: Property::new(false),
            is_playback_ready: Property::new(false),
            view_type: Property::new(ViewType::Unknown),
            is_audio_view: Property::new(false),
            is_video_view: Property::new(false),
            media_type: Property::new(MediaType::Unknown),
            is_audio: Property::new(false),
            is_video: Property::new(false),
            device: Property::new(Device::Unknown),
            is_mobile_device: Property::new(false),
            is_desktop_device: Property::new(false),
            input_device: Property::new(InputDevice::Unknown),
            is_touch_input_device: Property::new(false),
            is_mouse_input_device: Property::new(false),
            is_keyboard_input_device: Property::new(false),
        }
    }
}
