#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use dioxus::prelude::*;
use dioxus_desktop::{tao::window::WindowBuilder, Config as DesktopConfig};

use parcel_cost_calculator::ui::APP_TITLE;
use parcel_cost_calculator::{app, logging};

/// Wayland explicit sync crashes the WebKit renderer on some drivers.
/// Both knobs are only set when the caller has not chosen a value.
fn apply_wayland_workarounds() {
    if std::env::var("WAYLAND_DISPLAY").is_err() {
        return;
    }
    for (key, value) in [("WGPU_BACKEND", "gl"), ("WEBKIT_DISABLE_DMABUF_RENDERER", "1")] {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
        }
    }
}

fn main() {
    logging::init_logging();
    apply_wayland_workarounds();

    let window = WindowBuilder::new()
        .with_title(APP_TITLE)
        .with_resizable(true);

    LaunchBuilder::desktop()
        .with_cfg(DesktopConfig::new().with_window(window))
        .launch(app::App);
}
