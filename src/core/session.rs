//! Session-scoped event channel.
//!
//! The controller and its cart are `!Send` and live on one task. Anything
//! running elsewhere (library enumeration, player loading, UI callbacks on
//! other tasks) talks to them through a cloneable [`SessionHandle`]; the
//! owning task applies the messages in arrival order.

use crate::core::controller::{Phase, PickerAction, PickerController};
use crate::domain::model::{MediaItem, Tab};
use crate::domain::ports::{PermissionProvider, PickerDelegate};
use crate::utils::error::{PickerError, Result};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum SessionMessage {
    PermissionsGranted,
    SelectTab(Tab),
    Toggle(MediaItem),
    Capture(MediaItem),
    ReloadImages(Vec<MediaItem>),
    Action(PickerAction),
}

#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionMessage>,
}

impl SessionHandle {
    pub fn send(&self, message: SessionMessage) -> Result<()> {
        self.tx
            .send(message)
            .map_err(|_| PickerError::SessionClosedError)
    }

    pub fn toggle(&self, item: MediaItem) -> Result<()> {
        self.send(SessionMessage::Toggle(item))
    }

    pub fn capture(&self, item: MediaItem) -> Result<()> {
        self.send(SessionMessage::Capture(item))
    }

    pub fn action(&self, action: PickerAction) -> Result<()> {
        self.send(SessionMessage::Action(action))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

pub struct PickerSession<D: PickerDelegate, P: PermissionProvider> {
    controller: PickerController<D, P>,
    rx: mpsc::UnboundedReceiver<SessionMessage>,
    rejected: usize,
}

impl<D: PickerDelegate, P: PermissionProvider> PickerSession<D, P> {
    pub fn new(controller: PickerController<D, P>) -> (Self, SessionHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            controller,
            rx,
            rejected: 0,
        };
        (session, SessionHandle { tx })
    }

    pub fn controller(&self) -> &PickerController<D, P> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PickerController<D, P> {
        &mut self.controller
    }

    pub fn into_controller(self) -> PickerController<D, P> {
        self.controller
    }

    /// Messages refused by the controller so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Applies messages until the picker finishes or every handle is dropped.
    pub async fn run(&mut self) -> Phase {
        while !self.controller.is_finished() {
            match self.rx.recv().await {
                Some(message) => self.dispatch(message),
                None => {
                    tracing::debug!("All session handles dropped");
                    break;
                }
            }
        }
        self.controller.phase()
    }

    /// Applies whatever is queued without waiting. Meant to be called once
    /// per UI frame. Returns the number of messages handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while !self.controller.is_finished() {
            let Ok(message) = self.rx.try_recv() else {
                break;
            };
            self.dispatch(message);
            handled += 1;
        }
        handled
    }

    fn dispatch(&mut self, message: SessionMessage) {
        if let Err(e) = self.apply(message) {
            self.rejected += 1;
            tracing::warn!("Session message rejected: {}", e);
        }
    }

    fn apply(&mut self, message: SessionMessage) -> Result<()> {
        match message {
            SessionMessage::PermissionsGranted => {
                self.controller.permissions_granted();
            }
            SessionMessage::SelectTab(tab) => {
                if !self.controller.select_tab(tab)? {
                    tracing::debug!("Tab {} is not visible", tab.as_str());
                }
            }
            SessionMessage::Toggle(item) => {
                self.controller.toggle(item)?;
            }
            SessionMessage::Capture(item) => {
                self.controller.capture(item)?;
            }
            SessionMessage::ReloadImages(images) => self.controller.reload_images(images)?,
            SessionMessage::Action(action) => self.controller.handle(action)?,
        }
        Ok(())
    }
}
