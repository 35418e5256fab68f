//! Keyboard and pointer surfaces
//!
//! Maps raw input onto controller operations, gated by mode. Every key
//! press and control activation also counts as a user interaction for the
//! audio unlock, whether or not the current mode reacts to it.

use crate::controller::{RenderTask, Slideshow};
use crate::types::{Control, Interaction, Key, Mode};
use std::sync::Arc;

impl Slideshow {
    /// Handle a key press
    ///
    /// Returns true when the key was consumed, in which case the host should
    /// suppress its default action (e.g. Space scrolling the page).
    ///
    /// | Mode    | Keys                                   |
    /// |---------|----------------------------------------|
    /// | welcome | Enter/Space: begin                     |
    /// | gallery | ArrowLeft: back, ArrowRight/Space: next |
    /// | end     | Enter/Space: replay                    |
    /// | letter  | Escape: back to end                    |
    pub fn handle_key(&self, key: Key) -> bool {
        self.retry_audio_unlock(Interaction::Key);

        match (self.mode(), key) {
            (Mode::Welcome, Key::Enter | Key::Space) => {
                let _ = self.begin();
                true
            }
            (Mode::End, Key::Enter | Key::Space) => {
                let _ = self.replay();
                true
            }
            (Mode::Gallery, Key::ArrowLeft) => {
                let _ = self.go_back();
                true
            }
            (Mode::Gallery, Key::ArrowRight | Key::Space) => {
                let _ = self.manual_next();
                true
            }
            (Mode::Letter, Key::Escape) => self.close_letter_to_end(),
            _ => false,
        }
    }

    /// Handle activation of a page control
    ///
    /// Returns the render task when the control re-rendered.
    pub fn activate(&self, control: Control) -> Option<RenderTask> {
        // The audio button takes control of playback itself
        if control != Control::ToggleAudio {
            self.retry_audio_unlock(Interaction::Pointer);
        }

        match control {
            Control::Begin => self.begin(),
            Control::Home => {
                self.home();
                None
            }
            Control::ToggleAutoplay => {
                self.toggle_autoplay();
                None
            }
            Control::Next => self.manual_next(),
            Control::Previous => self.go_back(),
            Control::End => {
                self.reach_end();
                None
            }
            Control::OpenLetter => {
                self.open_letter();
                None
            }
            Control::CloseLetter => {
                self.close_letter_to_end();
                None
            }
            Control::Replay => self.replay(),
            Control::Collection(start) => self.jump_to_collection(start),
            Control::CollageCard(index) => self.enter_at(index),
            Control::ToggleAudio => {
                let audio = Arc::clone(&self.inner.audio);
                tokio::spawn(async move {
                    audio.toggle().await;
                });
                None
            }
        }
    }

    /// Retry blocked audio in the background while the unlock is armed
    pub fn retry_audio_unlock(&self, interaction: Interaction) {
        if !self.inner.audio.is_unlock_armed() {
            return;
        }

        let audio = Arc::clone(&self.inner.audio);
        tokio::spawn(async move {
            audio.on_user_interaction(interaction).await;
        });
    }
}
