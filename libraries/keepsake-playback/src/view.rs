//! Rendering surface abstraction
//!
//! The controller never touches a concrete UI. Everything it shows goes
//! through this capability set, so a browser binding, a native window or a
//! test recorder can sit behind it.

use crate::types::{Mode, NavigationAffordances};

/// Capability set the controller drives
///
/// Calls are made while the controller holds its state lock, so an
/// implementation must not call back into the `Slideshow`.
pub trait SlideshowView: Send + Sync {
    /// Make the view for `mode` the only visible one
    fn show_view(&self, mode: Mode);

    /// Play the entry animation of the view for `mode`
    fn animate_view_entry(&self, mode: Mode);

    /// Remove any caption from the photo surface
    fn clear_caption(&self);

    /// Hide the photo surface and show the transition card
    fn show_transition(&self, title: &str, description: &str);

    /// Hide the transition card and show the photo surface
    fn show_photo(&self);

    /// Point the photo surface at `url`
    fn set_image_source(&self, url: &str);

    /// Play the photo entry animation
    fn animate_photo_entry(&self);

    /// Show a caption under the photo
    fn set_caption(&self, caption: &str);

    /// Show the sub-collection banner
    fn show_collection_banner(&self, title: &str, description: &str);

    /// Hide the sub-collection banner
    fn hide_collection_banner(&self);

    /// Refresh counter, previous/next enablement and the collection selector
    fn update_affordances(&self, affordances: &NavigationAffordances);

    /// Reflect whether auto-advance is running
    fn set_autoplay_indicator(&self, running: bool);

    /// Reflect whether background audio is playing
    fn set_audio_indicator(&self, playing: bool);
}
