mod app;
mod dashboard;

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

#[cfg(not(target_arch = "wasm32"))]
fn init_panic_hook() {}

#[cfg(target_arch = "wasm32")]
fn main() {
    init_panic_hook();
    dashboard::init_logging();

    launch(app::App);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dioxus_desktop::{Config, WindowBuilder};

    init_panic_hook();
    dashboard::init_logging();

    let cfg = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Paddock")
            .with_resizable(true),
    );
    LaunchBuilder::desktop().with_cfg(cfg).launch(app::App);
}
