//! One-shot page start-up: classify the page, settle the session, load the
//! stores and decide which listeners the front end wires.

use crate::config::Notice;
use crate::console::{Console, PendingAction, StateCell};
use crate::error::Result;
use crate::service::{AuthService, DataService};

pub const LOGIN_BODY_CLASS: &str = "login-page-body";
pub const REGISTER_BODY_CLASS: &str = "register-page-body";
pub const DASHBOARD_CONTAINER_ID: &str = "dashboard-page";
pub const HEADER_ID: &str = "main-header";
pub const SIDEBAR_ID: &str = "main-sidebar";
/// `<script type="application/json">` element carrying a [`ConsoleConfig`] override.
///
/// [`ConsoleConfig`]: crate::config::ConsoleConfig
pub const CONFIG_ELEMENT_ID: &str = "console-config";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Login,
    Register,
    Shell,
}

/// What the server-rendered document tells us about itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageMarkers {
    pub body_classes: Vec<String>,
    pub has_dashboard_container: bool,
    pub notice: Option<Notice>,
}

impl PageMarkers {
    pub fn page_kind(&self) -> PageKind {
        let has = |class: &str| self.body_classes.iter().any(|c| c == class);
        if has(LOGIN_BODY_CLASS) {
            PageKind::Login
        } else if has(REGISTER_BODY_CLASS) {
            PageKind::Register
        } else {
            PageKind::Shell
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellConfiguration {
    LoginShell,
    RegisterShell,
    AuthenticatedShell,
    /// The application shell loaded without a session; header and sidebar
    /// stay hidden.
    UnauthenticatedShell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Listener {
    LoginSubmit,
    RegisterSubmit,
    LogoutClick,
    SidebarToggle,
    SendMessageClick,
    SendMessageEnter,
    ViewportResize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootPlan {
    pub page_kind: PageKind,
    pub configuration: ShellConfiguration,
    pub listeners: Vec<Listener>,
}

impl BootPlan {
    /// Header and sidebar are only shown for a signed-in shell.
    pub fn chrome_visible(&self) -> bool {
        self.configuration == ShellConfiguration::AuthenticatedShell
    }

    /// Stores are loaded and projected only for a signed-in shell.
    pub fn renders_collections(&self) -> bool {
        self.chrome_visible()
    }

    pub fn listens(&self, listener: Listener) -> bool {
        self.listeners.contains(&listener)
    }
}

fn listeners_for(kind: PageKind) -> Vec<Listener> {
    match kind {
        PageKind::Login => vec![Listener::LoginSubmit, Listener::ViewportResize],
        PageKind::Register => vec![Listener::RegisterSubmit, Listener::ViewportResize],
        PageKind::Shell => vec![
            Listener::LogoutClick,
            Listener::SidebarToggle,
            Listener::SendMessageClick,
            Listener::SendMessageEnter,
            Listener::ViewportResize,
        ],
    }
}

/// Runs once per page load; a second call fails with `AlreadyBootstrapped`
/// and leaves the state untouched.
pub async fn boot<S, A, D>(state: &S, markers: &PageMarkers, auth: &A, data: &D) -> Result<BootPlan>
where
    S: StateCell,
    A: AuthService + ?Sized,
    D: DataService + ?Sized,
{
    state.with_mut(Console::mark_bootstrapped)?;
    let page_kind = markers.page_kind();

    let configuration = match page_kind {
        PageKind::Login | PageKind::Register => {
            if let Some(notice) = markers.notice {
                state.with_mut(|c| c.modal_mut().show_message(notice.title(), notice.message()));
            }
            if page_kind == PageKind::Login {
                ShellConfiguration::LoginShell
            } else {
                ShellConfiguration::RegisterShell
            }
        }
        PageKind::Shell => {
            state.with_mut(|c| c.begin(PendingAction::Bootstrap))?;
            let authenticated = match auth.current_session().await {
                Ok(authenticated) => authenticated,
                Err(err) => {
                    tracing::warn!(%err, "session lookup failed, using dashboard marker");
                    markers.has_dashboard_container
                }
            };

            let loaded = if authenticated {
                Some((data.tickets().await, data.messages().await))
            } else {
                None
            };

            state.with_mut(|console| {
                console.finish();
                console.session_mut().set_authenticated(authenticated);
                let Some((tickets, messages)) = loaded else {
                    return;
                };
                let mut failures = Vec::new();
                match tickets {
                    Ok(v) => console.tickets_mut().replace_all(v),
                    Err(e) => failures.push(format!("tickets: {e}")),
                }
                match messages {
                    Ok(v) => console.chat_mut().replace_all(v),
                    Err(e) => failures.push(format!("messages: {e}")),
                }
                if !failures.is_empty() {
                    tracing::warn!(?failures, "initial data load incomplete");
                    console
                        .modal_mut()
                        .show_message("Data Unavailable", failures.join("\n"));
                }
            });

            if authenticated {
                ShellConfiguration::AuthenticatedShell
            } else {
                ShellConfiguration::UnauthenticatedShell
            }
        }
    };

    tracing::info!(?page_kind, ?configuration, "page bootstrapped");
    Ok(BootPlan {
        page_kind,
        configuration,
        listeners: listeners_for(page_kind),
    })
}
