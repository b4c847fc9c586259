//! Selection limits.
//!
//! Limits use `0` for "unlimited". The default video limit is `1`, which puts
//! the picker in single-video mode: picking a new video replaces the old one.

use crate::core::cart::Cart;
use crate::domain::model::MediaItem;
use crate::domain::ports::ConfigProvider;
use std::time::Duration;

pub const DEFAULT_VIDEO_LIMIT: usize = 1;
pub const DEFAULT_IMAGE_LIMIT: usize = 0;
pub const DEFAULT_MAXIMUM_VIDEO_DURATION_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    video_limit: usize,
    image_limit: usize,
    maximum_video_duration: Duration,
}

/// What a tap on a video cell should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoTap {
    Deselect,
    Select { evict_existing: bool },
    Reject,
}

/// Which delegate callback a "done with videos" action maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCompletion {
    Many,
    One,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            video_limit: DEFAULT_VIDEO_LIMIT,
            image_limit: DEFAULT_IMAGE_LIMIT,
            maximum_video_duration: Duration::from_secs(DEFAULT_MAXIMUM_VIDEO_DURATION_SECS),
        }
    }
}

impl SelectionPolicy {
    pub fn new(video_limit: usize) -> Self {
        Self {
            video_limit,
            ..Self::default()
        }
    }

    pub fn unlimited() -> Self {
        Self::new(0)
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            video_limit: config.video_limit(),
            image_limit: config.image_limit(),
            maximum_video_duration: Duration::from_secs(config.maximum_video_duration_secs()),
        }
    }

    pub fn with_image_limit(mut self, image_limit: usize) -> Self {
        self.image_limit = image_limit;
        self
    }

    pub fn with_maximum_video_duration(mut self, duration: Duration) -> Self {
        self.maximum_video_duration = duration;
        self
    }

    pub fn video_limit(&self) -> usize {
        self.video_limit
    }

    pub fn image_limit(&self) -> usize {
        self.image_limit
    }

    pub fn maximum_video_duration(&self) -> Duration {
        self.maximum_video_duration
    }

    pub fn supports_multiple_videos(&self) -> bool {
        self.video_limit == 0 || self.video_limit > 1
    }

    pub fn supports_additional_video(&self, selected: usize) -> bool {
        self.video_limit == 0 || self.video_limit > selected
    }

    pub fn supports_additional_image(&self, selected: usize) -> bool {
        self.image_limit == 0 || self.image_limit > selected
    }

    /// Longer videos are still selectable; surfaces show a "first N seconds" hint.
    pub fn exceeds_max_duration(&self, item: &MediaItem) -> bool {
        item.metadata
            .duration
            .map(|d| d > self.maximum_video_duration)
            .unwrap_or(false)
    }

    pub fn plan_video_tap(&self, cart: &Cart, item: &MediaItem) -> VideoTap {
        if cart.contains(item) {
            return VideoTap::Deselect;
        }

        let evict_existing = !self.supports_multiple_videos() && !cart.videos().is_empty();
        let remaining = if evict_existing {
            0
        } else {
            cart.videos().len()
        };

        if self.supports_additional_video(remaining) {
            VideoTap::Select { evict_existing }
        } else {
            VideoTap::Reject
        }
    }

    pub fn video_completion(&self, selected: usize) -> VideoCompletion {
        if self.video_limit == 0 || self.video_limit > 1 || selected > 1 {
            VideoCompletion::Many
        } else {
            VideoCompletion::One
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_videos_support() {
        assert!(SelectionPolicy::new(0).supports_multiple_videos());
        assert!(!SelectionPolicy::new(1).supports_multiple_videos());
        assert!(SelectionPolicy::new(3).supports_multiple_videos());
    }

    #[test]
    fn test_additional_video_support() {
        let policy = SelectionPolicy::new(2);
        assert!(policy.supports_additional_video(1));
        assert!(!policy.supports_additional_video(2));
        assert!(SelectionPolicy::unlimited().supports_additional_video(1000));
    }

    #[test]
    fn test_video_completion_branches() {
        assert_eq!(SelectionPolicy::new(0).video_completion(1), VideoCompletion::Many);
        assert_eq!(SelectionPolicy::new(2).video_completion(1), VideoCompletion::Many);
        assert_eq!(SelectionPolicy::new(1).video_completion(1), VideoCompletion::One);
        // More than one selected always reports the list, whatever the limit says.
        assert_eq!(SelectionPolicy::new(1).video_completion(2), VideoCompletion::Many);
    }

    #[test]
    fn test_plan_video_tap() {
        let mut cart = Cart::new(SelectionPolicy::new(1));
        let policy = *cart.policy();
        let a = MediaItem::video("a");
        let b = MediaItem::video("b");

        assert_eq!(
            policy.plan_video_tap(&cart, &a),
            VideoTap::Select {
                evict_existing: false
            }
        );
        cart.add_video(a.clone(), false);
        assert_eq!(policy.plan_video_tap(&cart, &a), VideoTap::Deselect);
        assert_eq!(
            policy.plan_video_tap(&cart, &b),
            VideoTap::Select {
                evict_existing: true
            }
        );

        let mut full = Cart::new(SelectionPolicy::new(2));
        full.add_video(a, false);
        full.add_video(b, false);
        assert_eq!(
            full.policy().plan_video_tap(&full, &MediaItem::video("c")),
            VideoTap::Reject
        );
    }

    #[test]
    fn test_exceeds_max_duration() {
        let policy = SelectionPolicy::default();
        assert!(policy.exceeds_max_duration(&MediaItem::video("long").with_duration(Duration::from_secs(40))));
        assert!(!policy.exceeds_max_duration(&MediaItem::video("short").with_duration(Duration::from_secs(5))));
        assert!(!policy.exceeds_max_duration(&MediaItem::video("unknown")));
    }
}
