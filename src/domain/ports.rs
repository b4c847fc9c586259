use crate::core::cart::Cart;
use crate::domain::model::{MediaItem, Tab};

/// Presentation surface that re-renders when the cart changes.
///
/// Observers are held weakly by the cart, so callbacks take `&self`; keep any
/// render state behind a `Cell`/`RefCell`. Callbacks must not mutate the cart.
pub trait CartObserver {
    fn on_item_added(&self, cart: &Cart, item: &MediaItem, newly_taken: bool);
    fn on_item_removed(&self, cart: &Cart, item: &MediaItem);
    fn on_reloaded(&self, cart: &Cart);
}

/// Host application callbacks.
pub trait PickerDelegate {
    fn on_images_selected(&self, images: &[MediaItem]);
    /// Only called when the video limit allows more than one video.
    fn on_videos_selected(&self, videos: &[MediaItem]);
    /// Only called in single-video mode.
    fn on_video_selected(&self, video: &MediaItem);
    fn on_preview_requested(&self, images: &[MediaItem]);
    fn on_cancelled(&self);
}

pub trait PermissionProvider {
    fn photos_authorized(&self) -> bool;
    fn camera_authorized(&self) -> bool;
}

/// Read-only session configuration.
pub trait ConfigProvider {
    fn tabs_to_show(&self) -> &[Tab];
    fn initial_tab(&self) -> Option<Tab>;
    fn video_limit(&self) -> usize;
    fn image_limit(&self) -> usize;
    fn maximum_video_duration_secs(&self) -> u64;
}
