mod app;
mod chart;
mod components;
mod pages;

use wasm_bindgen::JsValue;
use wow_metrics::Record;

/// Report fixture rows that would render as nonsense
fn check_fixtures() {
    let mut problems = Vec::new();
    problems.extend(shared::monthly_metrics().iter().filter_map(|r| r.validate().err()));
    problems.extend(shared::channel_metrics().iter().filter_map(|r| r.validate().err()));
    problems.extend(shared::region_metrics().iter().filter_map(|r| r.validate().err()));
    problems.extend(shared::sku_inventory().iter().filter_map(|r| r.validate().err()));
    problems.extend(shared::slow_movers().iter().filter_map(|r| r.validate().err()));

    for problem in problems {
        web_sys::console::warn_1(&JsValue::from_str(&format!("invalid fixture row: {problem}")));
    }
}

fn main() {
    console_error_panic_hook::set_once();
    check_fixtures();
    leptos::mount::mount_to_body(app::App);
}
