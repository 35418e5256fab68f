//! Background audio control
//!
//! Platforms commonly refuse to start audio before the user has interacted
//! with the page. The controller treats that refusal as routine: a rejected
//! attempt shows the paused state and the next pointer/key/touch event tries
//! again, until one attempt succeeds.
//!
//! The audio indicator follows the element's own play/pause events
//! (`handle_media_event`). The controller only sets it directly where no
//! event will arrive: a rejected play request, or audio that was already
//! playing.

use crate::error::Result;
use crate::types::{AudioState, Interaction, MediaEvent};
use crate::view::SlideshowView;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Platform audio element
#[async_trait]
pub trait AudioElement: Send + Sync {
    /// Whether playback is currently paused
    fn is_paused(&self) -> bool;

    /// Request playback; rejected when the platform blocks unsolicited audio
    async fn play(&self) -> Result<()>;

    /// Pause playback
    fn pause(&self);
}

/// Autoplay attempts, explicit toggling and first-interaction unlock
pub struct AudioController {
    element: Option<Arc<dyn AudioElement>>,
    view: Arc<dyn SlideshowView>,

    /// Interaction listeners still installed
    unlock_armed: AtomicBool,
}

impl AudioController {
    /// Create a controller; `None` means the page has no audio
    pub fn new(element: Option<Arc<dyn AudioElement>>, view: Arc<dyn SlideshowView>) -> Self {
        let unlock_armed = AtomicBool::new(element.is_some());
        Self {
            element,
            view,
            unlock_armed,
        }
    }

    /// Try to start playback without a user gesture
    ///
    /// Never fails: a rejection is reflected as `Paused`. Once audio plays
    /// the interaction unlock is no longer needed and is disarmed.
    pub async fn attempt_autoplay(&self) -> AudioState {
        let Some(element) = &self.element else {
            return AudioState::Unavailable;
        };

        if !element.is_paused() {
            self.unlock_armed.store(false, Ordering::SeqCst);
            self.view.set_audio_indicator(true);
            return AudioState::Playing;
        }

        match element.play().await {
            Ok(()) => {
                self.unlock_armed.store(false, Ordering::SeqCst);
                AudioState::Playing
            }
            Err(e) => {
                tracing::debug!("Autoplay rejected: {}", e);
                self.view.set_audio_indicator(false);
                AudioState::Paused
            }
        }
    }

    /// Explicit user play/pause
    ///
    /// The user has taken control, so the interaction unlock is dropped.
    pub async fn toggle(&self) -> AudioState {
        let Some(element) = &self.element else {
            return AudioState::Unavailable;
        };
        self.unlock_armed.store(false, Ordering::SeqCst);

        if !element.is_paused() {
            element.pause();
            return AudioState::Paused;
        }

        match element.play().await {
            Ok(()) => AudioState::Playing,
            Err(e) => {
                tracing::warn!("Audio playback needs user interaction: {}", e);
                self.view.set_audio_indicator(false);
                AudioState::Paused
            }
        }
    }

    /// Reflect a play/pause event reported by the audio element
    pub fn handle_media_event(&self, event: MediaEvent) {
        self.view.set_audio_indicator(event == MediaEvent::Play);
    }

    /// Retry autoplay on a user interaction until it succeeds once
    ///
    /// Returns true when this interaction unlocked playback.
    pub async fn on_user_interaction(&self, interaction: Interaction) -> bool {
        if !self.unlock_armed.load(Ordering::SeqCst) {
            return false;
        }

        match self.attempt_autoplay().await {
            AudioState::Playing => {
                tracing::debug!("Audio unlocked by {:?} interaction", interaction);
                true
            }
            AudioState::Paused => {
                tracing::warn!("Audio unlock failed, waiting for next interaction");
                false
            }
            AudioState::Unavailable => false,
        }
    }

    /// Whether interactions still trigger unlock attempts
    pub fn is_unlock_armed(&self) -> bool {
        self.unlock_armed.load(Ordering::SeqCst)
    }
}
