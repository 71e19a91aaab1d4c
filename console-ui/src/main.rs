mod app;
mod bridge;
mod dom;
mod logging;

use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    mount_to_body(|| view! { <app::App /> });
}
