//! Stack-preview strip model.
//!
//! Each grid shows the most recent selections of its kind as a small stack
//! with a counter. This is the render state only; drawing happens elsewhere.

use crate::core::cart::Cart;
use crate::domain::model::{MediaItem, MediaKind};
use crate::domain::ports::CartObserver;
use std::cell::RefCell;

pub const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackState {
    /// Newest last, at most [`MAX_VISIBLE`] entries.
    pub visible: Vec<MediaItem>,
    pub count: usize,
    /// The last change was an addition and should animate in.
    pub animate_last: bool,
    /// A camera shot landed; the album grid must be re-fetched.
    pub album_refresh_pending: bool,
    pub renders: usize,
}

#[derive(Debug)]
pub struct StackPreview {
    kind: MediaKind,
    state: RefCell<StackState>,
}

impl StackPreview {
    pub fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            state: RefCell::new(StackState::default()),
        }
    }

    pub fn state(&self) -> StackState {
        self.state.borrow().clone()
    }

    pub fn acknowledge_album_refresh(&self) {
        self.state.borrow_mut().album_refresh_pending = false;
    }

    fn render(&self, cart: &Cart, added: bool) {
        let items = match self.kind {
            MediaKind::Image => cart.images(),
            MediaKind::Video => cart.videos(),
        };
        let start = items.len().saturating_sub(MAX_VISIBLE);

        let mut state = self.state.borrow_mut();
        state.visible = items[start..].to_vec();
        state.count = items.len();
        state.animate_last = added;
        state.renders += 1;
    }
}

impl CartObserver for StackPreview {
    fn on_item_added(&self, cart: &Cart, item: &MediaItem, newly_taken: bool) {
        if item.kind != self.kind {
            return;
        }
        if newly_taken {
            self.state.borrow_mut().album_refresh_pending = true;
        }
        self.render(cart, true);
    }

    fn on_item_removed(&self, cart: &Cart, item: &MediaItem) {
        if item.kind == self.kind {
            self.render(cart, false);
        }
    }

    fn on_reloaded(&self, cart: &Cart) {
        self.render(cart, false);
    }
}
