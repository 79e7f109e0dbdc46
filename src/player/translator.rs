use tracing::debug;

use crate::events::{PlayerEvent, ProviderEvent};

use super::context::PlayerContext;
use super::types::{MediaType, ViewType, Volume, clamp_time, is_known_duration, normalize_duration};

/// Applies provider events to the state record and derives the matching
/// public event.
///
/// Each provider event maps to exactly one state transition and exactly
/// one public event carrying the committed (possibly clamped or derived)
/// value. Transitions stage every field write first and flush subscriber
/// notifications only once the whole write set is stored, so no reader
/// observes a half-applied update. Re-delivering an event with an
/// unchanged payload re-derives the same state with no compounding effect.
pub(crate) struct Translator;

impl Translator {
    /// Run one transition and return the public event to dispatch.
    ///
    /// The caller dispatches the returned event only after this function
    /// returns, which is what guarantees listeners observe fully
    /// committed state.
    pub(crate) fn apply(context: &PlayerContext, event: &ProviderEvent) -> PlayerEvent {
        debug!(event = event.name(), "translating provider event");

        match event {
            ProviderEvent::Play => {
                context.paused.set(false);
                PlayerEvent::Play
            }

            ProviderEvent::Pause => {
                let paused = context.paused.stage(true);
                let playing = context.is_playing.stage(false);
                if paused {
                    context.paused.flush();
                }
                if playing {
                    context.is_playing.flush();
                }
                PlayerEvent::Pause
            }

            ProviderEvent::Playing => {
                let paused = context.paused.stage(false);
                let playing = context.is_playing.stage(true);
                let buffering = context.is_buffering.stage(false);
                if paused {
                    context.paused.flush();
                }
                if playing {
                    context.is_playing.flush();
                }
                if buffering {
                    context.is_buffering.flush();
                }
                PlayerEvent::Playing
            }

            ProviderEvent::MutedChange(muted) => {
                context.muted.set(*muted);
                PlayerEvent::MutedChange(*muted)
            }

            ProviderEvent::VolumeChange(volume) => {
                let committed = Volume::new(*volume);
                context.volume.set(committed);
                PlayerEvent::VolumeChange(committed.value())
            }

            ProviderEvent::TimeChange(time) => {
                let committed = commit_time(context, *time);
                PlayerEvent::TimeChange(committed)
            }

            ProviderEvent::DurationChange(duration) => {
                let committed = commit_duration(context, *duration);
                PlayerEvent::DurationChange(committed)
            }

            ProviderEvent::BufferedChange(buffered) => {
                let committed = clamp_time(*buffered, context.duration.get());
                context.buffered.set(committed);
                PlayerEvent::BufferedChange(committed)
            }

            ProviderEvent::BufferingChange(buffering) => {
                context.is_buffering.set(*buffering);
                PlayerEvent::BufferingChange(*buffering)
            }

            ProviderEvent::ViewTypeChange(view_type) => {
                commit_view_type(context, *view_type);
                PlayerEvent::ViewTypeChange(*view_type)
            }

            ProviderEvent::MediaTypeChange(media_type) => {
                commit_media_type(context, *media_type);
                PlayerEvent::MediaTypeChange(*media_type)
            }

            ProviderEvent::Ready => {
                context.is_provider_ready.set(true);
                PlayerEvent::Ready
            }

            ProviderEvent::PlaybackReady => {
                context.is_playback_ready.set(true);
                PlayerEvent::PlaybackReady
            }

            ProviderEvent::PlaybackStart => {
                context.has_playback_started.set(true);
                PlayerEvent::PlaybackStart
            }

            ProviderEvent::PlaybackEnd => {
                context.has_playback_ended.set(true);
                PlayerEvent::PlaybackEnd
            }

            // Out-of-band: relayed without touching playback flags so the
            // host decides recovery.
            ProviderEvent::Error(error) => PlayerEvent::Error(error.clone()),
        }
    }
}

/// Commit a playback position: clamp to duration bounds, latch the
/// started flag, recompute the ended flag. Returns the committed value.
///
/// Shared between the provider time-change transition and the host's
/// position setter so both honor the same invariants.
pub(crate) fn commit_time(context: &PlayerContext, time: f64) -> f64 {
    let duration = context.duration.get();
    let committed = clamp_time(time, duration);

    let time_changed = context.current_time.stage(committed);
    let started = context.has_playback_started.get() || committed > 0.0;
    let started_changed = context.has_playback_started.stage(started);
    let ended = is_known_duration(duration) && committed == duration;
    let ended_changed = context.has_playback_ended.stage(ended);

    if time_changed {
        context.current_time.flush();
    }
    if started_changed {
        context.has_playback_started.flush();
    }
    if ended_changed {
        context.has_playback_ended.flush();
    }

    committed
}

/// Commit a media duration: normalize the sentinel, re-clamp the current
/// position against the new bounds, recompute the ended flag.
pub(crate) fn commit_duration(context: &PlayerContext, duration: f64) -> f64 {
    let committed = normalize_duration(duration);

    let duration_changed = context.duration.stage(committed);
    let time = clamp_time(context.current_time.get(), committed);
    let time_changed = context.current_time.stage(time);
    let ended = is_known_duration(committed) && time == committed;
    let ended_changed = context.has_playback_ended.stage(ended);

    if duration_changed {
        context.duration.flush();
    }
    if time_changed {
        context.current_time.flush();
    }
    if ended_changed {
        context.has_playback_ended.flush();
    }

    committed
}

/// Commit a view type together with its shorthand flags.
pub(crate) fn commit_view_type(context: &PlayerContext, view_type: ViewType) {
    let view = context.view_type.stage(view_type);
    let audio = context.is_audio_view.stage(view_type == ViewType::Audio);
    let video = context.is_video_view.stage(view_type == ViewType::Video);

    if view {
        context.view_type.flush();
    }
    if audio {
        context.is_audio_view.flush();
    }
    if video {
        context.is_video_view.flush();
    }
}

/// Commit a media type together with its shorthand flags.
pub(crate) fn commit_media_type(context: &PlayerContext, media_type: MediaType) {
    let media = context.media_type.stage(media_type);
    let audio = context.is_audio.stage(media_type == MediaType::Audio);
    let video = context.is_video.stage(media_type == MediaType::Video);

    if media {
        context.media_type.flush();
    }
    if audio {
        context.is_audio.flush();
    }
    if video {
        context.is_video.flush();
    }
}
