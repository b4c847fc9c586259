//! Session-scoped store of the selected images and videos.
//!
//! The cart owns both selection lists and is the only thing allowed to change
//! them; everything else reads through [`Cart::images`] and [`Cart::videos`].
//! Every mutation is reported synchronously to the registered observers
//! before the call returns.

use crate::core::policy::SelectionPolicy;
use crate::domain::model::{MediaItem, MediaKind, Selection};
use crate::domain::ports::CartObserver;
use std::rc::{Rc, Weak};

/// Weakly held observers. Dropped observers are pruned on the next
/// notification and never reported as errors.
#[derive(Default)]
struct ObserverSet {
    entries: Vec<Weak<dyn CartObserver>>,
}

impl ObserverSet {
    fn insert(&mut self, observer: Weak<dyn CartObserver>) {
        if self.entries.iter().any(|w| Weak::ptr_eq(w, &observer)) {
            return;
        }
        self.entries.push(observer);
    }

    fn live(&mut self) -> Vec<Rc<dyn CartObserver>> {
        self.entries.retain(|w| w.strong_count() > 0);
        self.entries.iter().filter_map(Weak::upgrade).collect()
    }

    fn len(&self) -> usize {
        self.entries.iter().filter(|w| w.strong_count() > 0).count()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

pub struct Cart {
    images: Vec<MediaItem>,
    videos: Vec<MediaItem>,
    observers: ObserverSet,
    policy: SelectionPolicy,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(SelectionPolicy::default())
    }
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart")
            .field("images", &self.images)
            .field("videos", &self.videos)
            .field("observers", &self.observers.len())
            .field("policy", &self.policy)
            .finish()
    }
}

impl Cart {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            images: Vec::new(),
            videos: Vec::new(),
            observers: ObserverSet::default(),
            policy,
        }
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    pub fn images(&self) -> &[MediaItem] {
        &self.images
    }

    pub fn videos(&self) -> &[MediaItem] {
        &self.videos
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.videos.is_empty()
    }

    pub fn selection(&self) -> Selection {
        Selection {
            images: self.images.clone(),
            videos: self.videos.clone(),
        }
    }

    /// Registers `observer` without keeping it alive. Registering the same
    /// observer twice has no effect.
    pub fn add_observer<O: CartObserver + 'static>(&mut self, observer: &Rc<O>) {
        let weak: Weak<dyn CartObserver> = Rc::downgrade(observer) as Weak<dyn CartObserver>;
        self.observers.insert(weak);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Adds an image. Videos are routed to [`Cart::add_video`].
    ///
    /// Returns `false` when nothing changed: the item was already selected or
    /// the image limit is reached.
    pub fn add_image(&mut self, item: MediaItem, newly_taken: bool) -> bool {
        if item.is_video() {
            return self.add_video(item, newly_taken);
        }
        if self.images.contains(&item) || self.videos.contains(&item) {
            tracing::debug!("Image {} already in cart", item.id);
            return false;
        }
        if !self.policy.supports_additional_image(self.images.len()) {
            tracing::debug!(
                "Image {} rejected: limit of {} reached",
                item.id,
                self.policy.image_limit()
            );
            return false;
        }

        self.images.push(item.clone());
        tracing::debug!("Added image {} (rank {})", item.id, self.images.len());
        self.notify(|observer, cart| observer.on_item_added(cart, &item, newly_taken));
        true
    }

    /// Removes an image. Videos are routed to [`Cart::remove_video`].
    pub fn remove_image(&mut self, item: &MediaItem) -> bool {
        if item.is_video() {
            return self.remove_video(item);
        }
        let Some(index) = self.images.iter().position(|i| i == item) else {
            return false;
        };

        let removed = self.images.remove(index);
        tracing::debug!("Removed image {}", removed.id);
        self.notify(|observer, cart| observer.on_item_removed(cart, &removed));
        true
    }

    /// Adds a video, applying the selection policy: in single-video mode the
    /// current selection is evicted first, and the add is dropped when the
    /// video limit is reached.
    pub fn add_video(&mut self, item: MediaItem, newly_taken: bool) -> bool {
        if item.kind == MediaKind::Image {
            return self.add_image(item, newly_taken);
        }
        if self.videos.contains(&item) || self.images.contains(&item) {
            tracing::debug!("Video {} already in cart", item.id);
            return false;
        }

        if !self.policy.supports_multiple_videos() && !self.videos.is_empty() {
            self.clear_videos();
        }
        if !self.policy.supports_additional_video(self.videos.len()) {
            tracing::debug!(
                "Video {} rejected: limit of {} reached",
                item.id,
                self.policy.video_limit()
            );
            return false;
        }

        self.videos.push(item.clone());
        tracing::debug!("Added video {} (rank {})", item.id, self.videos.len());
        self.notify(|observer, cart| observer.on_item_added(cart, &item, newly_taken));
        true
    }

    pub fn remove_video(&mut self, item: &MediaItem) -> bool {
        if item.kind == MediaKind::Image {
            return self.remove_image(item);
        }
        let Some(index) = self.videos.iter().position(|v| v == item) else {
            return false;
        };

        let removed = self.videos.remove(index);
        tracing::debug!("Removed video {}", removed.id);
        self.notify(|observer, cart| observer.on_item_removed(cart, &removed));
        true
    }

    /// Deselects every video, oldest first, reporting each one as removed.
    /// Observers see the list shrink one entry per notification.
    pub fn clear_videos(&mut self) {
        while !self.videos.is_empty() {
            let video = self.videos.remove(0);
            tracing::debug!("Evicted video {}", video.id);
            self.notify(|observer, cart| observer.on_item_removed(cart, &video));
        }
    }

    pub fn contains(&self, item: &MediaItem) -> bool {
        match item.kind {
            MediaKind::Image => self.images.contains(item),
            MediaKind::Video => self.videos.contains(item),
        }
    }

    /// Zero-based selection rank of `item` within its own list.
    pub fn index_of(&self, item: &MediaItem) -> Option<usize> {
        let list = match item.kind {
            MediaKind::Image => &self.images,
            MediaKind::Video => &self.videos,
        };
        list.iter().position(|i| i == item)
    }

    /// Replaces the image selection in one step and fires a single reload.
    /// Videos and repeated ids in `images` are dropped, and so is everything
    /// past the image limit.
    pub fn reload_images(&mut self, images: Vec<MediaItem>) {
        let mut kept: Vec<MediaItem> = Vec::with_capacity(images.len());
        for item in images {
            if item.is_video() {
                tracing::warn!("Ignoring video {} in image reload", item.id);
                continue;
            }
            if kept.contains(&item) || self.videos.contains(&item) {
                continue;
            }
            if !self.policy.supports_additional_image(kept.len()) {
                tracing::debug!(
                    "Image {} dropped from reload: limit of {} reached",
                    item.id,
                    self.policy.image_limit()
                );
                continue;
            }
            kept.push(item);
        }

        self.images = kept;
        tracing::debug!("Reloaded cart with {} images", self.images.len());
        self.notify(|observer, cart| observer.on_reloaded(cart));
    }

    /// Empties both selections and forgets every observer. Nobody is notified.
    pub fn reset(&mut self) {
        self.images.clear();
        self.videos.clear();
        self.observers.clear();
    }

    fn notify<F>(&mut self, deliver: F)
    where
        F: Fn(&dyn CartObserver, &Cart),
    {
        let live = self.observers.live();
        for observer in &live {
            deliver(observer.as_ref(), self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Seen {
        Added(String, bool),
        Removed(String),
        Reloaded(usize),
    }

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<Seen>>,
    }

    impl CartObserver for Recorder {
        fn on_item_added(&self, _cart: &Cart, item: &MediaItem, newly_taken: bool) {
            self.seen
                .borrow_mut()
                .push(Seen::Added(item.id.to_string(), newly_taken));
        }

        fn on_item_removed(&self, _cart: &Cart, item: &MediaItem) {
            self.seen.borrow_mut().push(Seen::Removed(item.id.to_string()));
        }

        fn on_reloaded(&self, cart: &Cart) {
            self.seen.borrow_mut().push(Seen::Reloaded(cart.images().len()));
        }
    }

    fn ids(items: &[MediaItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_add_and_remove_images_keep_order() {
        let mut cart = Cart::default();
        assert!(cart.add_image(MediaItem::image("a"), false));
        assert!(cart.add_image(MediaItem::image("b"), false));
        assert!(cart.add_image(MediaItem::image("c"), false));
        assert!(cart.remove_image(&MediaItem::image("b")));
        assert!(!cart.remove_image(&MediaItem::image("missing")));

        assert_eq!(ids(cart.images()), vec!["a", "c"]);
        assert_eq!(cart.index_of(&MediaItem::image("c")), Some(1));
        assert_eq!(cart.index_of(&MediaItem::image("b")), None);
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let recorder = Rc::new(Recorder::default());
        let mut cart = Cart::default();
        cart.add_observer(&recorder);

        cart.add_image(MediaItem::image("a"), false);
        assert!(!cart.add_image(MediaItem::image("a"), true));

        assert_eq!(cart.images().len(), 1);
        assert_eq!(recorder.seen.borrow().len(), 1);
    }

    #[test]
    fn test_add_image_routes_videos() {
        let mut cart = Cart::new(SelectionPolicy::unlimited());
        cart.add_image(MediaItem::video("v"), false);

        assert!(cart.images().is_empty());
        assert_eq!(ids(cart.videos()), vec!["v"]);
        assert!(cart.contains(&MediaItem::video("v")));
        assert!(!cart.contains(&MediaItem::image("v")));

        cart.remove_image(&MediaItem::video("v"));
        assert!(cart.videos().is_empty());
    }

    #[test]
    fn test_identity_never_in_both_lists() {
        let mut cart = Cart::new(SelectionPolicy::unlimited());
        cart.add_image(MediaItem::image("shared"), false);
        assert!(!cart.add_video(MediaItem::video("shared"), false));
        assert!(cart.videos().is_empty());
    }

    #[test]
    fn test_single_video_mode_evicts_previous() {
        let recorder = Rc::new(Recorder::default());
        let mut cart = Cart::new(SelectionPolicy::new(1));
        cart.add_observer(&recorder);

        cart.add_video(MediaItem::video("a"), false);
        cart.add_video(MediaItem::video("b"), false);

        assert_eq!(ids(cart.videos()), vec!["b"]);
        assert_eq!(
            *recorder.seen.borrow(),
            vec![
                Seen::Added("a".into(), false),
                Seen::Removed("a".into()),
                Seen::Added("b".into(), false),
            ]
        );
    }

    #[test]
    fn test_video_limit_rejects_extra() {
        let mut cart = Cart::new(SelectionPolicy::new(2));
        cart.add_video(MediaItem::video("a"), false);
        cart.add_video(MediaItem::video("b"), false);

        assert!(!cart.policy().supports_additional_video(cart.videos().len()));
        assert!(!cart.add_video(MediaItem::video("c"), false));
        assert_eq!(ids(cart.videos()), vec!["a", "b"]);
    }

    #[test]
    fn test_unlimited_videos_keep_order() {
        let mut cart = Cart::new(SelectionPolicy::unlimited());
        for i in 0..10 {
            cart.add_video(MediaItem::video(format!("v{}", i)), false);
        }
        assert_eq!(cart.videos().len(), 10);
        assert_eq!(cart.index_of(&MediaItem::video("v7")), Some(7));
    }

    #[test]
    fn test_image_limit() {
        let mut cart = Cart::new(SelectionPolicy::default().with_image_limit(1));
        assert!(cart.add_image(MediaItem::image("a"), false));
        assert!(!cart.add_image(MediaItem::image("b"), false));
    }

    #[test]
    fn test_reload_fires_single_event_and_dedups() {
        let recorder = Rc::new(Recorder::default());
        let mut cart = Cart::default();
        cart.add_image(MediaItem::image("old"), false);
        cart.add_observer(&recorder);

        cart.reload_images(vec![
            MediaItem::image("x"),
            MediaItem::image("y"),
            MediaItem::image("x"),
            MediaItem::video("v"),
        ]);

        assert_eq!(ids(cart.images()), vec!["x", "y"]);
        assert_eq!(*recorder.seen.borrow(), vec![Seen::Reloaded(2)]);
    }

    #[test]
    fn test_reload_respects_image_limit() {
        let mut cart = Cart::new(SelectionPolicy::default().with_image_limit(1));
        cart.reload_images(vec![
            MediaItem::image("a"),
            MediaItem::image("b"),
            MediaItem::image("c"),
        ]);

        assert_eq!(ids(cart.images()), vec!["a"]);
        assert!(!cart.policy().supports_additional_image(cart.images().len()));
    }

    #[test]
    fn test_eviction_shrinks_list_per_notification() {
        struct Remaining {
            seen: RefCell<Vec<Vec<String>>>,
        }

        impl CartObserver for Remaining {
            fn on_item_added(&self, _cart: &Cart, _item: &MediaItem, _newly_taken: bool) {}
            fn on_item_removed(&self, cart: &Cart, _item: &MediaItem) {
                self.seen
                    .borrow_mut()
                    .push(cart.videos().iter().map(|v| v.id.to_string()).collect());
            }
            fn on_reloaded(&self, _cart: &Cart) {}
        }

        let observer = Rc::new(Remaining {
            seen: RefCell::new(Vec::new()),
        });
        let mut cart = Cart::new(SelectionPolicy::unlimited());
        for id in ["a", "b", "c"] {
            cart.add_video(MediaItem::video(id), false);
        }
        cart.add_observer(&observer);

        cart.clear_videos();

        assert_eq!(
            *observer.seen.borrow(),
            vec![
                vec!["b".to_string(), "c".to_string()],
                vec!["c".to_string()],
                Vec::<String>::new(),
            ]
        );
    }

    #[test]
    fn test_selection_snapshot() {
        let mut cart = Cart::new(SelectionPolicy::unlimited());
        cart.add_image(MediaItem::image("p"), false);
        cart.add_video(MediaItem::video("v"), false);

        let selection = cart.selection();
        cart.reset();

        assert_eq!(selection.images, vec![MediaItem::image("p")]);
        assert_eq!(selection.videos, vec![MediaItem::video("v")]);
    }

    #[test]
    fn test_reset_clears_lists_and_observers() {
        let recorder = Rc::new(Recorder::default());
        let mut cart = Cart::new(SelectionPolicy::unlimited());
        cart.add_observer(&recorder);
        cart.add_image(MediaItem::image("a"), false);
        cart.add_video(MediaItem::video("v"), false);

        cart.reset();
        assert!(cart.is_empty());
        assert_eq!(cart.observer_count(), 0);

        cart.add_image(MediaItem::image("b"), false);
        assert_eq!(recorder.seen.borrow().len(), 2);
    }

    #[test]
    fn test_dropped_observer_is_skipped() {
        let kept = Rc::new(Recorder::default());
        let dropped = Rc::new(Recorder::default());
        let mut cart = Cart::default();
        cart.add_observer(&dropped);
        cart.add_observer(&kept);
        cart.add_observer(&kept);
        assert_eq!(cart.observer_count(), 2);

        drop(dropped);
        cart.add_image(MediaItem::image("a"), true);

        assert_eq!(cart.observer_count(), 1);
        assert_eq!(*kept.seen.borrow(), vec![Seen::Added("a".into(), true)]);
    }

    #[test]
    fn test_observer_sees_updated_cart() {
        struct Badge {
            rank: RefCell<Option<usize>>,
        }

        impl CartObserver for Badge {
            fn on_item_added(&self, cart: &Cart, item: &MediaItem, _newly_taken: bool) {
                *self.rank.borrow_mut() = cart.index_of(item);
            }
            fn on_item_removed(&self, _cart: &Cart, _item: &MediaItem) {}
            fn on_reloaded(&self, _cart: &Cart) {}
        }

        let badge = Rc::new(Badge {
            rank: RefCell::new(None),
        });
        let mut cart = Cart::default();
        cart.add_observer(&badge);
        cart.add_image(MediaItem::image("a"), false);
        cart.add_image(MediaItem::image("b"), false);

        assert_eq!(*badge.rank.borrow(), Some(1));
    }
}
