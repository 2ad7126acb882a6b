//! `GET /api/unit-info?role={attacker|defender}&unit={name}`
//!
//! Returns the portrait and stat block as two out-of-band fragments so an
//! HTMX swap updates both `{role}-img` and `{role}-info` at once.

use crate::catalog::Catalog;
use crate::page::Role;
use crate::render::UnitInfoRenderer;
use crate::routes::util::{error_span, get_param, parse_query};
use std::rc::Rc;

pub fn handle(catalog: Option<Rc<Catalog>>, query: &str) -> String {
    let params = parse_query(query);
    let Some(role) = get_param(&params, "role").and_then(Role::parse) else {
        return error_span("role must be attacker or defender");
    };
    let unit = get_param(&params, "unit").unwrap_or("");

    let Some(catalog) = catalog else {
        return String::new();
    };
    let Some(panel) = UnitInfoRenderer::new(catalog).render(unit) else {
        return String::new();
    };

    format!(
        r#"<div id="{img_id}" hx-swap-oob="innerHTML">{img}</div><div id="{info_id}" hx-swap-oob="innerHTML">{info}</div>"#,
        img_id = role.image_id(),
        img = panel.image_html,
        info_id = role.info_id(),
        info = panel.info_html,
    )
}
