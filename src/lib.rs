//! FEH battle simulator comparison page, compiled to WASM.
//!
//! Two ways in from JavaScript:
//! - `load_catalog` + `mount_compare_page` wire the server-rendered page
//!   directly: unit info panels, dropdown tooltips and form auto-submit.
//! - `handle_request(method, path, query, body)` serves the same data as
//!   HTML fragments, routed with `matchit`.

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod catalog;
pub mod page;
pub mod render;
pub mod routes;
pub mod state;
pub mod tooltip;

use catalog::Catalog;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Load the reference collections the server rendered into the page.
///
/// Each argument is a JSON array; pass an empty string for a collection the
/// page doesn't provide.
#[wasm_bindgen]
pub fn load_catalog(units_json: &str, weapons_json: &str, skills_json: &str) -> Result<(), JsValue> {
    install_catalog(units_json, weapons_json, skills_json).map_err(|e| JsValue::from_str(&e))
}

fn install_catalog(units_json: &str, weapons_json: &str, skills_json: &str) -> Result<(), String> {
    let catalog = Catalog::from_json(units_json, weapons_json, skills_json).map_err(|e| {
        log::warn!("load_catalog: {}", e);
        e
    })?;
    let catalog = state::replace_catalog(catalog);
    log::debug!(
        "catalog loaded: {} units",
        catalog.units().map_or(0, |u| u.len())
    );
    Ok(())
}

/// Wire info panels, change listeners and tooltips into the current page.
/// Call once after `DOMContentLoaded` (and after `load_catalog`).
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn mount_compare_page() -> Result<(), JsValue> {
    let catalog = state::current_catalog().unwrap_or_default();
    browser::mount(catalog)
}

/// Process an HTTP-like request and return an HTML fragment.
///
/// # Arguments
/// * `method` — HTTP method ("GET" or "POST")
/// * `path`   — URL path (e.g. "/api/unit-info")
/// * `query`  — query string (e.g. "?role=attacker&unit=Marth")
/// * `body`   — request body, empty for GET
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();
    router.insert("/api/unit-info", "unit_info").ok();
    router.insert("/api/describe", "describe").ok();
    router.insert("/api/weapon-options", "weapon_options").ok();
    router.insert("/api/skill-options", "skill_options").ok();
    router.insert("/api/catalog", "catalog").ok();

    let catalog = state::current_catalog();
    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("unit_info", "GET") => routes::unit_info::handle(catalog, query),
            ("describe", "GET") => routes::describe::handle(catalog.as_deref(), query),
            ("weapon_options", "GET") => routes::options::handle_weapons(catalog.as_deref(), query),
            ("skill_options", "GET") => routes::options::handle_skills(catalog.as_deref(), query),
            ("catalog", "POST") => routes::catalog::handle_post(body),
            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="error">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="error">405 — method not allowed</span>"#.to_string()
}
