use std::fmt;
use std::ops::Deref;

use uuid::Uuid;

/// Identifier or URL of a media resource.
///
/// A native media element accepts an absolute/relative URL, while a
/// third-party provider may accept its own identifier scheme (e.g.
/// `youtube/{video-id}`). The core treats it as opaque.
pub type Source = String;

/// Unique identifier for a player instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Generate a fresh random (v4) identifier.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The type of player view in use.
///
/// Normally follows the media type, but a provider may allow a different
/// view (e.g. audio with a poster rendered as video).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewType {
    /// No media loaded, or the provider has not reported a view yet
    #[default]
    Unknown,

    /// Audio player view
    Audio,

    /// Video player view
    Video,
}

/// The type of media that is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    /// No media loaded, or the type cannot be determined
    #[default]
    Unknown,

    /// Audio media
    Audio,

    /// Video media
    Video,
}

/// The kind of device the player is presented on.
///
/// Detection is environment glue and lives outside the core; the value is
/// injected via [`Player::set_device`](crate::Player::set_device).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    /// Device kind has not been reported
    #[default]
    Unknown,

    /// Small-screen / handheld device
    Mobile,

    /// Desktop-class device
    Desktop,
}

/// The kind of input the player is being interacted with.
///
/// Injected via [`Player::set_input_device`](crate::Player::set_input_device);
/// the core performs no input detection itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputDevice {
    /// Input kind has not been reported
    #[default]
    Unknown,

    /// Pointer/mouse interaction
    Mouse,

    /// Touch interaction
    Touch,

    /// Keyboard interaction
    Keyboard,
}

/// Audio volume of the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Volume(f64);

impl Volume {
    /// Create a new instance of a volume with safeguarded values.
    ///
    /// Values outside `[0, 1]` (including NaN) are clamped into range.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the volume as a percentage.
    pub fn as_percentage(&self) -> f64 {
        self.0 * 100.0
    }

    /// Get the raw value in `[0, 1]`.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Deref for Volume {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<f64> for Volume {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Sentinel duration for "no media loaded / length unknown".
///
/// A live stream reports `f64::INFINITY` instead.
pub const UNKNOWN_DURATION: f64 = -1.0;

/// Whether a duration value carries a usable finite length.
pub fn is_known_duration(duration: f64) -> bool {
    duration.is_finite() && duration >= 0.0
}

/// Normalize a provider-reported duration.
///
/// Negative or NaN values collapse to [`UNKNOWN_DURATION`]; infinity is
/// preserved as the live-stream sentinel.
pub(crate) fn normalize_duration(duration: f64) -> f64 {
    if duration.is_nan() || duration < 0.0 {
        UNKNOWN_DURATION
    } else {
        duration
    }
}

/// Clamp a playback position into the valid range for `duration`.
///
/// Positions are never negative; when the duration is known and finite the
/// position is additionally capped at the duration.
pub(crate) fn clamp_time(time: f64, duration: f64) -> f64 {
    let time = if time.is_nan() { 0.0 } else { time.max(0.0) };
    if is_known_duration(duration) {
        time.min(duration)
    } else {
        time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_clamps_out_of_range_values() {
        assert_eq!(Volume::new(1.5).value(), 1.0);
        assert_eq!(Volume::new(-0.2).value(), 0.0);
        assert_eq!(Volume::new(f64::NAN).value(), 0.0);
        assert_eq!(Volume::new(0.5).value(), 0.5);
    }

    #[test]
    fn player_ids_are_unique() {
        assert_ne!(PlayerId::generate(), PlayerId::generate());
    }

    #[test]
    fn duration_normalization() {
        assert_eq!(normalize_duration(-5.0), UNKNOWN_DURATION);
        assert_eq!(normalize_duration(f64::NAN), UNKNOWN_DURATION);
        assert_eq!(normalize_duration(f64::NEG_INFINITY), UNKNOWN_DURATION);
        assert_eq!(normalize_duration(f64::INFINITY), f64::INFINITY);
        assert_eq!(normalize_duration(120.0), 120.0);
    }

    #[test]
    fn time_clamps_to_known_duration() {
        assert_eq!(clamp_time(150.0, 100.0), 100.0);
        assert_eq!(clamp_time(-3.0, 100.0), 0.0);
        assert_eq!(clamp_time(150.0, UNKNOWN_DURATION), 150.0);
        assert_eq!(clamp_time(150.0, f64::INFINITY), 150.0);
    }
}
