//! Slideshow controller - core orchestration
//!
//! Owns the navigation index, the mode state machine and the auto-advance
//! timer, and coordinates the render pipeline, preload cache and audio.
//!
//! Mode transitions:
//!
//! ```text
//!            begin                reach_end          open_letter
//! Welcome ──────────▶ Gallery ─────────────▶ End ───────────────▶ Letter
//!    ▲                   ▲      replay        │ ◀─────────────────   │
//!    │                   └────────────────────┘  close_letter_to_end │
//!    └──────────────────── home (from any mode) ─────────────────────┘
//! ```
//!
//! Boundary policy: `go_next` on the last slide ends the show (`End` mode)
//! instead of wrapping. `go_back` on the first slide wraps to the last.

use crate::audio::{AudioController, AudioElement};
use crate::cache::{ImageLoader, PreloadCache};
use crate::lock;
use crate::timer::PlaybackTimer;
use crate::types::{Mode, NavigationAffordances, PreloadStatus, RenderOutcome, SlideshowConfig};
use crate::view::SlideshowView;
use keepsake_core::{Collection, SlideIndex};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

/// Handle to a spawned render; await it to learn how the render ended
pub type RenderTask = JoinHandle<RenderOutcome>;

pub(crate) struct Inner {
    pub(crate) config: SlideshowConfig,
    pub(crate) slides: SlideIndex,
    pub(crate) view: Arc<dyn SlideshowView>,
    pub(crate) cache: PreloadCache,
    pub(crate) audio: Arc<AudioController>,
    pub(crate) state: Mutex<PlaybackState>,
}

/// Mutable playback state, only touched under the `Inner::state` lock
pub(crate) struct PlaybackState {
    pub(crate) current_index: usize,
    pub(crate) mode: Mode,

    /// Bumped at the start of every render; a render only commits while it
    /// still holds the latest value
    pub(crate) render_token: u64,

    pub(crate) timer: PlaybackTimer,
}

/// Slideshow playback controller
///
/// Cheap to clone; clones share the same state. Operations that re-render
/// spawn tokio tasks, so the controller must be used inside a tokio runtime.
#[derive(Clone)]
pub struct Slideshow {
    pub(crate) inner: Arc<Inner>,
}

impl Slideshow {
    /// Create a controller in `Welcome` mode at slide 0
    pub fn new(
        config: SlideshowConfig,
        slides: SlideIndex,
        view: Arc<dyn SlideshowView>,
        loader: Arc<dyn ImageLoader>,
        audio: Option<Arc<dyn AudioElement>>,
    ) -> Self {
        let cache = PreloadCache::new(loader, config.preload_warn_threshold);
        let audio = Arc::new(AudioController::new(audio, Arc::clone(&view)));
        let timer = PlaybackTimer::new(config.autoplay, config.advance_interval);

        view.update_affordances(&NavigationAffordances::compute(
            0,
            slides.len(),
            slides.collection_start_of(0),
        ));

        Self {
            inner: Arc::new(Inner {
                config,
                slides,
                view,
                cache,
                audio,
                state: Mutex::new(PlaybackState {
                    current_index: 0,
                    mode: Mode::Welcome,
                    render_token: 0,
                    timer,
                }),
            }),
        }
    }

    // ===== Accessors =====

    /// Index of the slide on screen
    pub fn current_index(&self) -> usize {
        self.lock_state().current_index
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.lock_state().mode
    }

    /// Number of slides
    pub fn slide_count(&self) -> usize {
        self.inner.slides.len()
    }

    /// Sub-collections, for the selector
    pub fn collections(&self) -> Vec<Collection> {
        self.inner.slides.collections()
    }

    /// Whether auto-advance is switched on
    pub fn is_auto_playing(&self) -> bool {
        self.lock_state().timer.is_enabled()
    }

    /// Whether an auto-advance timer is currently armed
    pub fn is_timer_running(&self) -> bool {
        self.lock_state().timer.is_running()
    }

    /// Preload status of a resolved image URL
    pub fn preload_status(&self, url: &str) -> Option<PreloadStatus> {
        self.inner.cache.status(url)
    }

    /// Background audio controller
    pub fn audio(&self) -> &AudioController {
        &self.inner.audio
    }

    // ===== Navigation =====

    /// Advance one slide; on the last slide, end the show
    ///
    /// Returns `None` when nothing was rendered (empty list or end reached).
    pub fn go_next(&self) -> Option<RenderTask> {
        let last = self.inner.slides.last_index()?;

        let mut state = self.lock_state();
        if state.current_index >= last {
            drop(state);
            self.reach_end();
            return None;
        }
        state.current_index += 1;
        drop(state);

        Some(self.spawn_render())
    }

    /// Go back one slide, wrapping to the last from the first
    ///
    /// Manual navigation restarts the auto-advance countdown.
    pub fn go_back(&self) -> Option<RenderTask> {
        let last = self.inner.slides.last_index()?;

        let mut state = self.lock_state();
        state.current_index = match state.current_index {
            0 => last,
            index => index - 1,
        };
        drop(state);

        let task = self.spawn_render();
        self.restart_timer();
        Some(task)
    }

    /// `go_next` from a user action; restarts the countdown
    pub fn manual_next(&self) -> Option<RenderTask> {
        let task = self.go_next();
        self.restart_timer();
        task
    }

    /// Jump to `index`, clamped into range
    pub fn jump_to_collection(&self, index: usize) -> Option<RenderTask> {
        let last = self.inner.slides.last_index()?;

        self.lock_state().current_index = index.min(last);

        let task = self.spawn_render();
        self.restart_timer();
        Some(task)
    }

    /// Timer tick: advance without re-arming the timer
    fn advance(&self) {
        let _ = self.go_next();
    }

    // ===== Mode transitions =====

    /// Welcome → Gallery
    ///
    /// Re-renders when already in the gallery; ignored from End and Letter.
    pub fn begin(&self) -> Option<RenderTask> {
        let state = self.lock_state();
        let mode = state.mode;
        match mode {
            Mode::Welcome => Some(self.enter_gallery(state)),
            Mode::Gallery => {
                drop(state);
                Some(self.spawn_render())
            }
            Mode::End | Mode::Letter => {
                tracing::debug!("begin ignored in {:?} mode", mode);
                None
            }
        }
    }

    /// Any mode → Welcome
    pub fn home(&self) {
        let mut state = self.lock_state();
        if state.mode != Mode::Welcome {
            tracing::info!("Returning to welcome from {:?}", state.mode);
        }
        self.disarm_timer(&mut state);
        state.mode = Mode::Welcome;
        self.inner.view.show_view(Mode::Welcome);
        self.inner.view.animate_view_entry(Mode::Welcome);
    }

    /// Gallery → End
    ///
    /// Returns whether the transition happened.
    pub fn reach_end(&self) -> bool {
        let mut state = self.lock_state();
        if state.mode != Mode::Gallery {
            tracing::debug!("reach_end ignored in {:?} mode", state.mode);
            return false;
        }

        tracing::info!("Slideshow finished at slide {}", state.current_index);
        self.disarm_timer(&mut state);
        state.mode = Mode::End;
        self.inner.view.show_view(Mode::End);
        self.inner.view.animate_view_entry(Mode::End);
        true
    }

    /// End → Letter
    pub fn open_letter(&self) -> bool {
        let mut state = self.lock_state();
        if state.mode != Mode::End {
            tracing::debug!("open_letter ignored in {:?} mode", state.mode);
            return false;
        }

        self.disarm_timer(&mut state);
        state.mode = Mode::Letter;
        self.inner.view.show_view(Mode::Letter);
        self.inner.view.animate_view_entry(Mode::Letter);
        true
    }

    /// Letter → End (the end view does not play, so the timer stays off)
    pub fn close_letter_to_end(&self) -> bool {
        let mut state = self.lock_state();
        if state.mode != Mode::Letter {
            return false;
        }

        state.mode = Mode::End;
        self.inner.view.show_view(Mode::End);
        true
    }

    /// End → Gallery, starting over from the first slide
    pub fn replay(&self) -> Option<RenderTask> {
        let mut state = self.lock_state();
        if state.mode != Mode::End {
            tracing::debug!("replay ignored in {:?} mode", state.mode);
            return None;
        }

        state.current_index = 0;
        Some(self.enter_gallery(state))
    }

    /// Open the gallery directly at `index` (memory-collage cards)
    ///
    /// Works from Welcome, Gallery and End; ignored from Letter.
    pub fn enter_at(&self, index: usize) -> Option<RenderTask> {
        let last = self.inner.slides.last_index()?;

        let mut state = self.lock_state();
        let mode = state.mode;
        if mode == Mode::Letter {
            tracing::debug!("enter_at ignored in letter mode");
            return None;
        }
        state.current_index = index.min(last);

        match mode {
            Mode::Gallery => {
                drop(state);
                let task = self.spawn_render();
                self.restart_timer();
                Some(task)
            }
            Mode::Welcome | Mode::End | Mode::Letter => Some(self.enter_gallery(state)),
        }
    }

    /// Switch auto-advance on or off; returns the new setting
    ///
    /// The timer only runs in the gallery; switching on elsewhere arms it
    /// the next time the gallery opens. The indicator follows the armed
    /// timer, not the setting.
    pub fn toggle_autoplay(&self) -> bool {
        let mut state = self.lock_state();
        let enabled = !state.timer.is_enabled();
        state.timer.set_enabled(enabled);

        if !enabled {
            self.disarm_timer(&mut state);
        } else if state.mode == Mode::Gallery {
            self.arm_timer(&mut state);
        }

        enabled
    }

    // ===== Internals =====

    fn enter_gallery(&self, mut state: MutexGuard<'_, PlaybackState>) -> RenderTask {
        tracing::info!("Entering gallery at slide {}", state.current_index);

        state.mode = Mode::Gallery;
        self.inner.view.show_view(Mode::Gallery);
        self.inner.view.animate_view_entry(Mode::Gallery);
        self.arm_timer(&mut state);
        drop(state);

        let audio = Arc::clone(&self.inner.audio);
        tokio::spawn(async move {
            audio.attempt_autoplay().await;
        });

        self.spawn_render()
    }

    /// Re-arm the countdown after manual navigation
    fn restart_timer(&self) {
        let mut state = self.lock_state();
        if state.mode == Mode::Gallery && state.timer.is_enabled() {
            self.arm_timer(&mut state);
        }
    }

    fn arm_timer(&self, state: &mut PlaybackState) {
        let inner = Arc::downgrade(&self.inner);
        let armed = state.timer.start(move || {
            if let Some(inner) = inner.upgrade() {
                Slideshow { inner }.advance();
            }
        });

        if armed {
            self.inner.view.set_autoplay_indicator(true);
        }
    }

    fn disarm_timer(&self, state: &mut PlaybackState) {
        state.timer.stop();
        self.inner.view.set_autoplay_indicator(false);
    }

    pub(crate) fn spawn_render(&self) -> RenderTask {
        let this = self.clone();
        tokio::spawn(async move { this.render_current_slide().await })
    }

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, PlaybackState> {
        lock(&self.inner.state)
    }
}
