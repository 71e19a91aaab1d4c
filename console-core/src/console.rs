use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};
use crate::modal::ModalNotifier;
use crate::model::{format_display_time, ChatMessage, Ticket};
use crate::render::{self, Projection, ViewNode};
use crate::session::SessionState;
use crate::sidebar::{SidebarController, SidebarPhase};
use crate::store::CollectionStore;
use chrono::NaiveTime;
use std::cell::RefCell;

/// External call currently in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    Bootstrap,
    Login,
    Register,
    Logout,
}

/// All mutable UI state for one page load.
#[derive(Clone, Debug)]
pub struct Console {
    config: ConsoleConfig,
    session: SessionState,
    sidebar: SidebarController,
    tickets: CollectionStore<Ticket>,
    chat: CollectionStore<ChatMessage>,
    modal: ModalNotifier,
    pending: Option<PendingAction>,
    bootstrapped: bool,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            sidebar: SidebarController::new(config.sidebar_breakpoint),
            config,
            session: SessionState::default(),
            tickets: CollectionStore::new("tickets"),
            chat: CollectionStore::new("chat"),
            modal: ModalNotifier::default(),
            pending: None,
            bootstrapped: false,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn sidebar(&self) -> &SidebarController {
        &self.sidebar
    }

    pub fn tickets(&self) -> &CollectionStore<Ticket> {
        &self.tickets
    }

    pub fn tickets_mut(&mut self) -> &mut CollectionStore<Ticket> {
        &mut self.tickets
    }

    pub fn chat(&self) -> &CollectionStore<ChatMessage> {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut CollectionStore<ChatMessage> {
        &mut self.chat
    }

    pub fn modal(&self) -> &ModalNotifier {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut ModalNotifier {
        &mut self.modal
    }

    /// The loading spinner is up exactly while an external call is pending.
    pub fn loading_visible(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn mark_bootstrapped(&mut self) -> Result<()> {
        if self.bootstrapped {
            return Err(ConsoleError::AlreadyBootstrapped);
        }
        self.bootstrapped = true;
        Ok(())
    }

    /// Claims the single in-flight slot. Fails with `Busy` if another call
    /// has not finished yet.
    pub fn begin(&mut self, action: PendingAction) -> Result<()> {
        if let Some(current) = self.pending {
            tracing::warn!(?action, ?current, "rejecting request while another is pending");
            return Err(ConsoleError::Busy);
        }
        self.pending = Some(action);
        Ok(())
    }

    pub fn finish(&mut self) {
        self.pending = None;
    }

    pub fn toggle_sidebar(&mut self) -> SidebarPhase {
        self.sidebar.toggle()
    }

    pub fn on_viewport_resize(&mut self, width: u32) -> bool {
        self.sidebar.on_viewport_resize(width)
    }

    /// Appends the compose text as a message from the current user. Blank
    /// input is ignored and returns `None`.
    pub fn send_message(&mut self, text: &str, at: NaiveTime) -> Option<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let message = ChatMessage::new(
            self.config.current_user.clone(),
            text,
            format_display_time(at),
        );
        Some(self.chat.append(message))
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    pub fn tickets_projection(&self) -> Projection {
        render::render_tickets(self.tickets.snapshot())
    }

    pub fn stats_projection(&self) -> Projection {
        render::render_ticket_stats(self.tickets.snapshot())
    }

    pub fn chat_projection(&self) -> Projection {
        render::render_chat(self.chat.snapshot(), &self.config.current_user)
    }

    pub fn modal_projection(&self) -> Option<ViewNode> {
        render::render_modal(&self.modal)
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

/// Shared access to a [`Console`] that async handlers can reach without
/// holding a borrow across an await point.
pub trait StateCell {
    fn with_mut<R>(&self, f: impl FnOnce(&mut Console) -> R) -> R;

    fn read<R>(&self, f: impl FnOnce(&Console) -> R) -> R {
        self.with_mut(|console| f(console))
    }
}

impl StateCell for RefCell<Console> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut Console) -> R) -> R {
        f(&mut self.borrow_mut())
    }

    fn read<R>(&self, f: impl FnOnce(&Console) -> R) -> R {
        f(&self.borrow())
    }
}
