//! Shared fakes for slideshow tests
//!
//! - `RecordingView` records every view call
//! - `GatedLoader` serves images instantly unless a URL is gated or failing
//! - `ScriptedAudio` rejects a configurable number of play requests
#![allow(dead_code)]

use async_trait::async_trait;
use keepsake_core::{Slide, SlideIndex};
use keepsake_playback::{
    AudioElement, ImageHandle, ImageLoader, Mode, NavigationAffordances, PlaybackError, Result,
    Slideshow, SlideshowConfig, SlideshowView,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

// ===== View =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    ShowView(Mode),
    AnimateView(Mode),
    ClearCaption,
    ShowTransition(String, String),
    ShowPhoto,
    SetImage(String),
    AnimatePhoto,
    SetCaption(String),
    ShowBanner(String, String),
    HideBanner,
    Affordances(NavigationAffordances),
    AutoplayIndicator(bool),
    AudioIndicator(bool),
}

#[derive(Default)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    fn record(&self, call: ViewCall) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn images_set(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ViewCall::SetImage(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn last_image(&self) -> Option<String> {
        self.images_set().pop()
    }

    pub fn last_affordances(&self) -> Option<NavigationAffordances> {
        self.calls().into_iter().rev().find_map(|call| match call {
            ViewCall::Affordances(affordances) => Some(affordances),
            _ => None,
        })
    }

    pub fn visible_view(&self) -> Option<Mode> {
        self.calls().into_iter().rev().find_map(|call| match call {
            ViewCall::ShowView(mode) => Some(mode),
            _ => None,
        })
    }

    pub fn last_audio_indicator(&self) -> Option<bool> {
        self.calls().into_iter().rev().find_map(|call| match call {
            ViewCall::AudioIndicator(playing) => Some(playing),
            _ => None,
        })
    }

    pub fn last_autoplay_indicator(&self) -> Option<bool> {
        self.calls().into_iter().rev().find_map(|call| match call {
            ViewCall::AutoplayIndicator(running) => Some(running),
            _ => None,
        })
    }

    pub fn count(&self, wanted: &ViewCall) -> usize {
        self.calls().iter().filter(|call| *call == wanted).count()
    }
}

impl SlideshowView for RecordingView {
    fn show_view(&self, mode: Mode) {
        self.record(ViewCall::ShowView(mode));
    }

    fn animate_view_entry(&self, mode: Mode) {
        self.record(ViewCall::AnimateView(mode));
    }

    fn clear_caption(&self) {
        self.record(ViewCall::ClearCaption);
    }

    fn show_transition(&self, title: &str, description: &str) {
        self.record(ViewCall::ShowTransition(
            title.to_string(),
            description.to_string(),
        ));
    }

    fn show_photo(&self) {
        self.record(ViewCall::ShowPhoto);
    }

    fn set_image_source(&self, url: &str) {
        self.record(ViewCall::SetImage(url.to_string()));
    }

    fn animate_photo_entry(&self) {
        self.record(ViewCall::AnimatePhoto);
    }

    fn set_caption(&self, caption: &str) {
        self.record(ViewCall::SetCaption(caption.to_string()));
    }

    fn show_collection_banner(&self, title: &str, description: &str) {
        self.record(ViewCall::ShowBanner(
            title.to_string(),
            description.to_string(),
        ));
    }

    fn hide_collection_banner(&self) {
        self.record(ViewCall::HideBanner);
    }

    fn update_affordances(&self, affordances: &NavigationAffordances) {
        self.record(ViewCall::Affordances(affordances.clone()));
    }

    fn set_autoplay_indicator(&self, running: bool) {
        self.record(ViewCall::AutoplayIndicator(running));
    }

    fn set_audio_indicator(&self, playing: bool) {
        self.record(ViewCall::AudioIndicator(playing));
    }
}

// ===== Loader =====

#[derive(Default)]
pub struct GatedLoader {
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    failing: Mutex<HashSet<String>>,
    undecodable: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
}

impl GatedLoader {
    /// Hold loads of `url` until the returned semaphore gets a permit
    pub fn gate(&self, url: &str) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.gates
            .lock()
            .unwrap()
            .insert(url.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn fail(&self, url: &str) {
        self.failing.lock().unwrap().insert(url.to_string());
    }

    pub fn fail_decode(&self, url: &str) {
        self.undecodable.lock().unwrap().insert(url.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls().iter().filter(|call| *call == url).count()
    }
}

#[async_trait]
impl ImageLoader for GatedLoader {
    async fn load(&self, url: &str) -> Result<ImageHandle> {
        self.calls.lock().unwrap().push(url.to_string());

        let gate = self.gates.lock().unwrap().get(url).cloned();
        if let Some(gate) = gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| PlaybackError::image_load(url, e.to_string()))?;
            permit.forget();
        }

        if self.failing.lock().unwrap().contains(url) {
            return Err(PlaybackError::image_load(url, "404 Not Found"));
        }

        Ok(ImageHandle::new(url, vec![0xFF, 0xD8]))
    }

    async fn decode(&self, image: &ImageHandle) -> Result<()> {
        if self.undecodable.lock().unwrap().contains(&image.url) {
            return Err(PlaybackError::Decode(image.url.clone()));
        }
        Ok(())
    }
}

// ===== Audio =====

pub struct ScriptedAudio {
    paused: AtomicBool,
    rejections_left: AtomicUsize,
    play_calls: AtomicUsize,
}

impl ScriptedAudio {
    /// Audio element that rejects the first `rejections` play requests
    pub fn rejecting(rejections: usize) -> Self {
        Self {
            paused: AtomicBool::new(true),
            rejections_left: AtomicUsize::new(rejections),
            play_calls: AtomicUsize::new(0),
        }
    }

    pub fn play_calls(&self) -> usize {
        self.play_calls.load(Ordering::SeqCst)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }
}

#[async_trait]
impl AudioElement for ScriptedAudio {
    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    async fn play(&self) -> Result<()> {
        self.play_calls.fetch_add(1, Ordering::SeqCst);

        let rejected = self
            .rejections_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if rejected {
            return Err(PlaybackError::AutoplayBlocked(
                "play() can only be initiated by a user gesture".to_string(),
            ));
        }

        self.paused.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }
}

// ===== Fixtures =====

pub struct Harness {
    pub slideshow: Slideshow,
    pub view: Arc<RecordingView>,
    pub loader: Arc<GatedLoader>,
}

pub fn images(count: usize) -> Vec<Slide> {
    (0..count)
        .map(|i| Slide::image(format!("images/{}.jpg", i)))
        .collect()
}

pub fn url(index: usize) -> String {
    format!("/static/images/{}.jpg", index)
}

pub fn harness(slides: Vec<Slide>) -> Harness {
    harness_with(slides, SlideshowConfig::default(), None)
}

pub fn harness_with(
    slides: Vec<Slide>,
    config: SlideshowConfig,
    audio: Option<Arc<dyn AudioElement>>,
) -> Harness {
    let view = Arc::new(RecordingView::default());
    let loader = Arc::new(GatedLoader::default());
    let slideshow = Slideshow::new(
        config,
        SlideIndex::new(slides),
        view.clone(),
        loader.clone(),
        audio,
    );

    Harness {
        slideshow,
        view,
        loader,
    }
}

/// Let spawned tasks run until they block
pub async fn settle() {
    for _ in 0..50 {
        tokio::task::yield_now().await;
    }
}
