//! Top-level picker coordinator.
//!
//! Owns the session's [`Cart`], decides which tabs are visible from the
//! configuration and the granted permissions, and turns terminal actions into
//! [`PickerDelegate`] callbacks.

use crate::core::cart::Cart;
use crate::core::policy::{SelectionPolicy, VideoCompletion, VideoTap};
use crate::domain::model::{MediaItem, MediaKind, Tab};
use crate::domain::ports::{ConfigProvider, PermissionProvider, PickerDelegate};
use crate::utils::error::{PickerError, Result};
use chrono::Utc;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Photo library access is missing; the permission surface is shown.
    Unauthorized,
    Browsing,
    Finished(Outcome),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Unauthorized => f.write_str("unauthorized"),
            Phase::Browsing => f.write_str("browsing"),
            Phase::Finished(_) => f.write_str("finished"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Cancelled,
    ImagesSelected,
    VideosSelected,
    VideoSelected,
}

/// User actions that reach the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    Cancel,
    DoneWithImages,
    DoneWithVideos,
    /// Not terminal: the host shows an enlarged view and the picker stays open.
    RequestPreview,
}

impl PickerAction {
    fn name(&self) -> &'static str {
        match self {
            PickerAction::Cancel => "cancel",
            PickerAction::DoneWithImages => "done-images",
            PickerAction::DoneWithVideos => "done-videos",
            PickerAction::RequestPreview => "preview",
        }
    }
}

/// Visible tabs and the active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pages {
    pub tabs: Vec<Tab>,
    pub selected_index: usize,
}

impl Pages {
    pub fn active(&self) -> Tab {
        self.tabs[self.selected_index]
    }
}

pub struct PickerController<D: PickerDelegate, P: PermissionProvider> {
    cart: Cart,
    delegate: D,
    permissions: P,
    tabs_to_show: Vec<Tab>,
    initial_tab: Option<Tab>,
    phase: Phase,
    pages: Option<Pages>,
}

impl<D: PickerDelegate, P: PermissionProvider> PickerController<D, P> {
    pub fn new<C: ConfigProvider>(config: &C, delegate: D, permissions: P) -> Self {
        Self {
            cart: Cart::new(SelectionPolicy::from_config(config)),
            delegate,
            permissions,
            tabs_to_show: config.tabs_to_show().to_vec(),
            initial_tab: config.initial_tab(),
            phase: Phase::Unauthorized,
            pages: None,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access for observer registration and bulk reloads.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pages(&self) -> Option<&Pages> {
        self.pages.as_ref()
    }

    pub fn active_tab(&self) -> Option<Tab> {
        self.pages.as_ref().map(Pages::active)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Builds the tab pages if permissions allow, otherwise stays on the
    /// permission surface.
    pub fn load(&mut self) -> Phase {
        if self.phase == Phase::Unauthorized {
            self.try_enter_browsing();
        }
        self.phase
    }

    /// Called once the permission surface reports success.
    pub fn permissions_granted(&mut self) -> Phase {
        match self.phase {
            Phase::Unauthorized => {
                if !self.try_enter_browsing() {
                    tracing::warn!("Permissions reported granted but photo access is still missing");
                }
            }
            Phase::Browsing => tracing::debug!("Already browsing, ignoring permission grant"),
            Phase::Finished(_) => {}
        }
        self.phase
    }

    fn try_enter_browsing(&mut self) -> bool {
        match self.make_pages() {
            Some(pages) => {
                tracing::info!(
                    "Browsing {} tab(s), starting on {}",
                    pages.tabs.len(),
                    pages.active().as_str()
                );
                self.pages = Some(pages);
                self.phase = Phase::Browsing;
                true
            }
            None => false,
        }
    }

    fn make_pages(&self) -> Option<Pages> {
        if !self.permissions.photos_authorized() {
            return None;
        }

        let use_camera = self.permissions.camera_authorized();
        let tabs: Vec<Tab> = self
            .tabs_to_show
            .iter()
            .copied()
            .filter(|tab| *tab != Tab::Camera || use_camera)
            .collect();
        if tabs.is_empty() {
            return None;
        }

        let initial = self.initial_tab.unwrap_or(Tab::Camera);
        let selected_index = tabs.iter().position(|t| *t == initial).unwrap_or(0);
        Some(Pages {
            tabs,
            selected_index,
        })
    }

    /// Switches the active tab. Returns `false` if `tab` is not visible.
    pub fn select_tab(&mut self, tab: Tab) -> Result<bool> {
        self.ensure_browsing("tab")?;
        let Some(pages) = self.pages.as_mut() else {
            return Ok(false);
        };
        match pages.tabs.iter().position(|t| *t == tab) {
            Some(index) => {
                pages.selected_index = index;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Grid tap: selects or deselects `item`. Returns whether the item is
    /// selected afterwards.
    pub fn toggle(&mut self, item: MediaItem) -> Result<bool> {
        self.ensure_browsing("toggle")?;

        match item.kind {
            MediaKind::Image => {
                if self.cart.contains(&item) {
                    self.cart.remove_image(&item);
                    Ok(false)
                } else {
                    Ok(self.cart.add_image(item, false))
                }
            }
            MediaKind::Video => match self.cart.policy().plan_video_tap(&self.cart, &item) {
                VideoTap::Deselect => {
                    self.cart.remove_video(&item);
                    Ok(false)
                }
                VideoTap::Select { evict_existing } => {
                    if evict_existing {
                        tracing::debug!("Single-video mode, replacing current selection");
                    }
                    if self.cart.policy().exceeds_max_duration(&item) {
                        tracing::info!(
                            "Video {} is longer than {}s, only the start will be used",
                            item.id,
                            self.cart.policy().maximum_video_duration().as_secs()
                        );
                    }
                    Ok(self.cart.add_video(item, false))
                }
                VideoTap::Reject => {
                    tracing::debug!("Video {} rejected, selection is full", item.id);
                    Ok(false)
                }
            },
        }
    }

    /// A shot taken with the camera tab; observers see `newly_taken = true`.
    /// Shots without a timestamp are stamped with the capture time.
    pub fn capture(&mut self, item: MediaItem) -> Result<bool> {
        self.ensure_browsing("capture")?;
        let item = match item.metadata.created_at {
            Some(_) => item,
            None => item.with_created_at(Utc::now()),
        };
        Ok(self.cart.add_image(item, true))
    }

    pub fn reload_images(&mut self, images: Vec<MediaItem>) -> Result<()> {
        self.ensure_browsing("reload")?;
        self.cart.reload_images(images);
        Ok(())
    }

    pub fn handle(&mut self, action: PickerAction) -> Result<()> {
        if self.is_finished() {
            tracing::warn!("Ignoring '{}', picker already finished", action.name());
            return Ok(());
        }
        if action != PickerAction::Cancel {
            self.ensure_browsing(action.name())?;
        }

        match action {
            PickerAction::Cancel => {
                tracing::info!("Picker cancelled");
                self.delegate.on_cancelled();
                self.finish(Outcome::Cancelled);
            }
            PickerAction::DoneWithImages => {
                tracing::info!("Done with {} image(s)", self.cart.images().len());
                self.delegate.on_images_selected(self.cart.images());
                self.finish(Outcome::ImagesSelected);
            }
            PickerAction::DoneWithVideos => {
                let videos = self.cart.videos();
                match self.cart.policy().video_completion(videos.len()) {
                    VideoCompletion::Many => {
                        tracing::info!("Done with {} video(s)", videos.len());
                        self.delegate.on_videos_selected(videos);
                        self.finish(Outcome::VideosSelected);
                    }
                    VideoCompletion::One => {
                        let Some(video) = videos.first() else {
                            return Err(PickerError::NothingSelectedError);
                        };
                        tracing::info!("Done with video {}", video.id);
                        self.delegate.on_video_selected(video);
                        self.finish(Outcome::VideoSelected);
                    }
                }
            }
            PickerAction::RequestPreview => {
                tracing::debug!("Preview requested for {} image(s)", self.cart.images().len());
                self.delegate.on_preview_requested(self.cart.images());
            }
        }
        Ok(())
    }

    /// Ends the session: empties the cart and drops every observer.
    pub fn teardown(&mut self) {
        self.cart.reset();
        self.pages = None;
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::Finished(outcome);
    }

    fn ensure_browsing(&self, action: &str) -> Result<()> {
        if self.phase == Phase::Browsing {
            Ok(())
        } else {
            Err(PickerError::InvalidPhaseError {
                action: action.to_string(),
                phase: self.phase.to_string(),
            })
        }
    }
}
