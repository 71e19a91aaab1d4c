use crate::bridge::{HttpAuth, HttpData};
use crate::dom;
use console_core::actions::{self, ActionOutcome};
use console_core::bootstrap::{self, BootPlan, Listener, PageKind};
use console_core::forms::{Credentials, RegistrationForm};
use console_core::render::ScrollAnchor;
use console_core::{Console, StateCell};
use leptos::*;
use std::cell::RefCell;
use wasm_bindgen_futures::spawn_local;

/// The page's [`Console`], shared by every handler. [`StateCell::read`]
/// subscribes the calling view to later mutations; `peek` does not.
#[derive(Clone, Copy)]
struct ConsoleCell {
    console: StoredValue<RefCell<Console>>,
    changed: Trigger,
}

impl ConsoleCell {
    fn new(console: Console) -> Self {
        Self {
            console: store_value(RefCell::new(console)),
            changed: create_trigger(),
        }
    }

    fn peek<R>(&self, f: impl FnOnce(&Console) -> R) -> R {
        self.console.with_value(|cell| f(&cell.borrow()))
    }
}

impl StateCell for ConsoleCell {
    fn with_mut<R>(&self, f: impl FnOnce(&mut Console) -> R) -> R {
        let out = self.console.with_value(|cell| f(&mut cell.borrow_mut()));
        self.changed.notify();
        out
    }

    fn read<R>(&self, f: impl FnOnce(&Console) -> R) -> R {
        self.changed.track();
        self.peek(f)
    }
}

#[derive(Clone, Copy)]
struct Ctx {
    cell: ConsoleCell,
    auth: HttpAuth,
    plan: RwSignal<Option<BootPlan>>,
}

impl Ctx {
    /// Handlers stay inert until boot has decided which ones this page wires.
    fn listens(&self, listener: Listener) -> bool {
        self.plan
            .with_untracked(|plan| plan.as_ref().is_some_and(|p| p.listens(listener)))
    }

    fn follow(&self, context: &str, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::Navigate(nav) => {
                let href = self.cell.peek(|c| c.config().routes.href(&nav));
                dom::navigate(&href);
            }
            ActionOutcome::Notified => {
                let shown = self.cell.peek(|c| c.modal().content().map(|m| m.message.clone()));
                if let Some(message) = shown {
                    dom::report(context, &message);
                }
            }
            ActionOutcome::Updated | ActionOutcome::Ignored => {}
        }
    }

    fn busy(&self) -> bool {
        self.cell.read(Console::loading_visible)
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = dom::read_config();
    let auth = HttpAuth::new(config.request_timeout_ms);
    let data = HttpData::new(config.request_timeout_ms);
    let ctx = Ctx {
        cell: ConsoleCell::new(Console::new(config)),
        auth,
        plan: create_rw_signal(None),
    };

    let markers = dom::read_markers();
    let page_kind = markers.page_kind();

    spawn_local(async move {
        match bootstrap::boot(&ctx.cell, &markers, &ctx.auth, &data).await {
            Ok(plan) => ctx.plan.set(Some(plan)),
            Err(err) => dom::report("bootstrap", &err.to_string()),
        }
    });

    let _ = window_event_listener(ev::resize, move |_| {
        if ctx.listens(Listener::ViewportResize) {
            let width = dom::viewport_width();
            ctx.cell.with_mut(|c| c.on_viewport_resize(width));
        }
    });

    view! {
      <Show when=move || ctx.busy()>
        <div id="loading-spinner" class="fixed inset-0 z-50 flex items-center justify-center bg-white/60">
          <div class="h-10 w-10 animate-spin rounded-full border-4 border-sky-500 border-t-transparent"></div>
        </div>
      </Show>
      {match page_kind {
          PageKind::Login => view! { <LoginView ctx=ctx /> }.into_view(),
          PageKind::Register => view! { <RegisterView ctx=ctx /> }.into_view(),
          PageKind::Shell => view! { <ShellView ctx=ctx /> }.into_view(),
      }}
      <MessageModal cell=ctx.cell />
    }
}

#[component]
fn LoginView(ctx: Ctx) -> impl IntoView {
    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let register_href = ctx.cell.peek(|c| c.config().routes.register.clone());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if !ctx.listens(Listener::LoginSubmit) {
            return;
        }
        let credentials = Credentials::new(username.get_untracked(), password.get_untracked());
        spawn_local(async move {
            let outcome = actions::login(&ctx.cell, &ctx.auth, &credentials).await;
            ctx.follow("login failed", outcome);
        });
    };

    view! {
      <div class="min-h-screen flex items-center justify-center p-4">
        <form id="login-form" class="card w-full max-w-sm space-y-4" on:submit=on_submit>
          <h2 class="text-2xl font-bold text-center">"Sign in"</h2>
          <input
            id="username"
            type="text"
            placeholder="Username"
            autocomplete="username"
            prop:value=move || username.get()
            on:input=move |ev| username.set(event_target_value(&ev))
          />
          <input
            id="password"
            type="password"
            placeholder="Password"
            autocomplete="current-password"
            prop:value=move || password.get()
            on:input=move |ev| password.set(event_target_value(&ev))
          />
          <button type="submit" class="btn btn-primary w-full" disabled=move || ctx.busy()>
            "Log in"
          </button>
          <p class="text-sm text-center">
            "No account yet? "
            <a href=register_href>"Register"</a>
          </p>
        </form>
      </div>
    }
}

type FieldGet = fn(&RegistrationForm) -> &String;
type FieldSet = fn(&mut RegistrationForm, String);

fn form_field(
    form: RwSignal<RegistrationForm>,
    id: &'static str,
    kind: &'static str,
    placeholder: &'static str,
    get: FieldGet,
    set: FieldSet,
) -> impl IntoView {
    view! {
      <input
        id=id
        name=id
        type=kind
        placeholder=placeholder
        prop:value=move || form.with(|f| get(f).clone())
        on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
      />
    }
}

#[component]
fn RegisterView(ctx: Ctx) -> impl IntoView {
    let form = create_rw_signal(RegistrationForm::default());
    let login_href = ctx.cell.peek(|c| c.config().routes.login.clone());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if !ctx.listens(Listener::RegisterSubmit) {
            return;
        }
        let submitted = form.get_untracked();
        spawn_local(async move {
            let outcome = actions::register(&ctx.cell, &ctx.auth, &submitted).await;
            ctx.follow("registration failed", outcome);
        });
    };

    view! {
      <div class="min-h-screen flex items-center justify-center p-4">
        <form id="register-form" class="card w-full max-w-md space-y-3" on:submit=on_submit>
          <h2 class="text-2xl font-bold text-center">"Create an account"</h2>
          {form_field(form, "username", "text", "Username", |f| &f.username, |f, v| f.username = v)}
          {form_field(form, "email", "email", "Email", |f| &f.email, |f, v| f.email = v)}
          <div class="grid grid-cols-2 gap-3">
            {form_field(form, "first_name", "text", "First name", |f| &f.first_name, |f, v| f.first_name = v)}
            {form_field(form, "last_name", "text", "Last name", |f| &f.last_name, |f, v| f.last_name = v)}
          </div>
          {form_field(form, "password", "password", "Password", |f| &f.password, |f, v| f.password = v)}
          {form_field(
              form,
              "password_confirm",
              "password",
              "Confirm password",
              |f| &f.password_confirm,
              |f, v| f.password_confirm = v,
          )}
          <button type="submit" class="btn btn-primary w-full" disabled=move || ctx.busy()>
            "Register"
          </button>
          <p class="text-sm text-center">
            "Already registered? "
            <a href=login_href>"Log in"</a>
          </p>
        </form>
      </div>
    }
}

#[component]
fn ShellView(ctx: Ctx) -> impl IntoView {
    let cell = ctx.cell;
    let chrome_hidden =
        move || !ctx.plan.with(|plan| plan.as_ref().is_some_and(BootPlan::chrome_visible));
    let renders =
        move || ctx.plan.with(|plan| plan.as_ref().is_some_and(BootPlan::renders_collections));
    let dashboard_href = cell.peek(|c| c.config().routes.dashboard.clone());

    let tickets_html = create_memo(move |_| cell.read(|c| c.tickets_projection().html()));
    let stats_html = create_memo(move |_| cell.read(|c| c.stats_projection().html()));
    let chat = create_memo(move |_| {
        cell.read(|c| {
            let projection = c.chat_projection();
            (projection.html(), projection.scroll)
        })
    });
    let chat_ref = create_node_ref::<html::Div>();

    create_effect(move |_| {
        if chat.with(|(_, scroll)| *scroll) != ScrollAnchor::Bottom {
            return;
        }
        request_animation_frame(move || {
            if let Some(el) = chat_ref.get_untracked() {
                el.set_scroll_top(el.scroll_height());
            }
        });
    });

    let toggle = move |_: ev::MouseEvent| {
        if ctx.listens(Listener::SidebarToggle) {
            cell.with_mut(|c| {
                c.toggle_sidebar();
            });
        }
    };

    let on_logout = move |_: ev::MouseEvent| {
        if !ctx.listens(Listener::LogoutClick) {
            return;
        }
        spawn_local(async move {
            let outcome = actions::logout(&cell, &ctx.auth).await;
            ctx.follow("logout", outcome);
        });
    };

    let compose = create_rw_signal(String::new());
    let send = move |via: Listener| {
        if !ctx.listens(via) {
            return;
        }
        let text = compose.get_untracked();
        if actions::send_message(&cell, &text, dom::local_time()) == ActionOutcome::Updated {
            compose.set(String::new());
        }
    };

    let sidebar_class = move || {
        format!(
            "sidebar fixed inset-y-0 left-0 z-30 w-64 transform transition-transform duration-200 md:translate-x-0 {}",
            cell.read(|c| c.sidebar().visual_class())
        )
    };

    view! {
      <header id="main-header" class="app-header flex items-center justify-between px-4 py-3" class:hidden=chrome_hidden>
        <button id="sidebar-toggle" class="md:hidden" aria-label="Toggle navigation" on:click=toggle>
          "Menu"
        </button>
        <h1 class="text-lg font-semibold">"Support Console"</h1>
        <button id="logout-button" class="btn btn-secondary" disabled=move || ctx.busy() on:click=on_logout>
          "Log out"
        </button>
      </header>
      <aside id="main-sidebar" class=sidebar_class class:hidden=chrome_hidden>
        <nav class="flex flex-col gap-1 p-4">
          <a class="sidebar-link" href=dashboard_href>"Dashboard"</a>
        </nav>
      </aside>
      {move || {
          cell.read(|c| c.sidebar().overlay()).map(|overlay| {
              view! {
                <div
                  id=overlay.element_id()
                  data-overlay-id=overlay.id()
                  class="fixed inset-0 bg-black bg-opacity-50 z-20 md:hidden"
                  on:click=toggle
                ></div>
              }
          })
      }}
      <main class="md:ml-64 p-6">
        <Show when=renders>
          <section id="dashboard-view" class="space-y-6">
            <div id="ticket-stats" class="grid grid-cols-2 md:grid-cols-4 gap-4" inner_html=move || stats_html.get()></div>
            <div class="card overflow-x-auto">
              <table class="min-w-full divide-y divide-gray-200">
                <thead>
                  <tr>
                    <th>"Title"</th>
                    <th>"Status"</th>
                    <th>"Priority"</th>
                    <th>"Assigned To"</th>
                    <th>"Date"</th>
                  </tr>
                </thead>
                <tbody id="tickets-table-body" inner_html=move || tickets_html.get()></tbody>
              </table>
            </div>
            <div class="card flex flex-col h-96">
              <div
                id="chat-messages"
                class="flex-1 overflow-y-auto space-y-3 p-4"
                node_ref=chat_ref
                inner_html=move || chat.with(|(html, _)| html.clone())
              ></div>
              <div class="flex gap-2 p-4 border-t">
                <input
                  id="new-message-input"
                  type="text"
                  class="flex-1"
                  placeholder="Type a message..."
                  prop:value=move || compose.get()
                  on:input=move |ev| compose.set(event_target_value(&ev))
                  on:keypress=move |ev: ev::KeyboardEvent| {
                      if ev.key() == "Enter" {
                          send(Listener::SendMessageEnter);
                      }
                  }
                />
                <button id="send-message-button" class="btn btn-primary" on:click=move |_| send(Listener::SendMessageClick)>
                  "Send"
                </button>
              </div>
            </div>
          </section>
        </Show>
      </main>
    }
}

#[component]
fn MessageModal(cell: ConsoleCell) -> impl IntoView {
    let body = create_memo(move |_| cell.read(|c| c.modal_projection().map(|node| node.to_html())));

    view! {
      <Show when=move || body.with(Option::is_some)>
        <div id="custom-message-modal" class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-[100] p-4">
          <div class="flex flex-col items-center gap-4">
            <div class="w-full" inner_html=move || body.get().unwrap_or_default()></div>
            <button id="modal-close-button" class="btn btn-primary" on:click=move |_| cell.with_mut(Console::close_modal)>
              "OK"
            </button>
          </div>
        </div>
      </Show>
    }
}
