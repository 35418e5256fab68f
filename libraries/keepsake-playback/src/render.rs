//! Render pipeline
//!
//! Puts the slide at the current index on screen. Renders can overlap
//! (rapid key repeat, a timer tick during a slow image load), so every
//! render takes a fresh token and re-checks it after each suspension point.
//! A render whose token is stale stops before touching the view again; the
//! most recently started render always wins.
//!
//! Token checks and the view mutations they guard run under the state lock,
//! which keeps the guarantee on a multi-threaded runtime too.

use crate::controller::Slideshow;
use crate::types::{NavigationAffordances, RenderOutcome};
use keepsake_core::{ImageSlide, Slide};

/// Title shown on a transition card without a folder name
const FALLBACK_TRANSITION_TITLE: &str = "Next Memory";

/// Neighbour offsets warmed after each render, nearest first
const WARM_UP_OFFSETS: [isize; 5] = [0, 1, -1, 2, -2];

impl Slideshow {
    /// Render the slide at the current index
    pub(crate) async fn render_current_slide(&self) -> RenderOutcome {
        let inner = &self.inner;
        let view = &inner.view;

        let (token, index, image) = {
            let mut state = self.lock_state();
            state.render_token += 1;
            let token = state.render_token;
            let index = state.current_index;

            let Some(slide) = inner.slides.slide_at(index) else {
                view.update_affordances(&self.affordances(index));
                return RenderOutcome::Empty;
            };

            view.clear_caption();

            match slide {
                Slide::Transition(transition) => {
                    view.hide_collection_banner();
                    view.show_transition(
                        transition
                            .source_folder
                            .as_deref()
                            .unwrap_or(FALLBACK_TRANSITION_TITLE),
                        transition.folder_description.as_deref().unwrap_or(""),
                    );
                    self.finish_render(index);
                    return RenderOutcome::Committed;
                }
                Slide::Image(image) => {
                    view.show_photo();
                    (token, index, image)
                }
            }
        };

        if let Some(path) = image.image.as_deref() {
            let url = inner.config.image_url(path);
            let handle = inner.cache.preload(&url).await;

            {
                let state = self.lock_state();
                if state.render_token != token {
                    tracing::debug!("Render of slide {} superseded during load", index);
                    return RenderOutcome::Superseded;
                }
                view.set_image_source(&url);
            }

            if let Some(handle) = &handle {
                if let Err(e) = inner.cache.decode(handle).await {
                    tracing::debug!("Decode failed, showing image without waiting: {}", e);
                }
            }
        }

        let state = self.lock_state();
        if state.render_token != token {
            tracing::debug!("Render of slide {} superseded before display", index);
            return RenderOutcome::Superseded;
        }

        if image.image.is_some() {
            view.animate_photo_entry();
        }
        self.show_details(image);
        self.finish_render(index);
        drop(state);

        RenderOutcome::Committed
    }

    /// Caption and sub-collection banner of an image slide
    fn show_details(&self, image: &ImageSlide) {
        let view = &self.inner.view;

        if let Some(caption) = image.caption.as_deref() {
            view.set_caption(caption);
        }

        match (image.source_folder.as_deref(), image.title.as_deref()) {
            (Some(folder), _) => {
                let description = image.folder_description.as_deref().unwrap_or("");
                view.show_collection_banner(folder, description);
            }
            (None, Some(title)) => view.show_collection_banner(title, ""),
            (None, None) => view.hide_collection_banner(),
        }
    }

    /// Warm the neighbourhood and refresh the navigation controls
    fn finish_render(&self, index: usize) {
        self.warm_up(index);
        self.inner.view.update_affordances(&self.affordances(index));
    }

    /// Start fetching the images around `center`; results are discarded
    pub(crate) fn warm_up(&self, center: usize) {
        let inner = &self.inner;

        for offset in WARM_UP_OFFSETS {
            let Some(index) = center.checked_add_signed(offset) else {
                continue;
            };
            if let Some(Slide::Image(ImageSlide {
                image: Some(path), ..
            })) = inner.slides.slide_at(index)
            {
                drop(inner.cache.preload(&inner.config.image_url(path)));
            }
        }
    }

    fn affordances(&self, index: usize) -> NavigationAffordances {
        let slides = &self.inner.slides;
        NavigationAffordances::compute(index, slides.len(), slides.collection_start_of(index))
    }
}
