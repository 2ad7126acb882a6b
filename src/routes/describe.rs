//! Route handler for GET /api/describe
//!
//! Query params:
//!   kind — `weapon` or `skill`
//!   name — record name
//!
//! Returns the description as a `<span>`, followed by a stats line for
//! weapons (might, range, color, effectiveness) and a badge for refinable
//! skills. Unknown records render as an empty string.

use crate::catalog::{Catalog, LookupKind, Skill, Weapon};
use crate::render::escape_html;
use crate::routes::util::{error_span, get_param, parse_query};

pub fn handle(catalog: Option<&Catalog>, query: &str) -> String {
    let params = parse_query(query);
    let Some(kind) = get_param(&params, "kind").and_then(LookupKind::parse) else {
        return error_span("kind must be weapon or skill");
    };
    let name = get_param(&params, "name").unwrap_or("");
    let Some(catalog) = catalog else {
        return String::new();
    };

    let mut html = String::new();
    match kind {
        LookupKind::Weapon => {
            let Some(weapon) = catalog.weapons().and_then(|w| w.get(name)) else {
                return html;
            };
            push_description(&mut html, catalog.describe(kind, name));
            if let Some(stats) = weapon_stats(weapon) {
                html.push_str(&format!(r#"<span class="stats">{}</span>"#, stats));
            }
        }
        LookupKind::Skill => {
            let Some(skill) = catalog.skills().and_then(|s| s.get(name)) else {
                return html;
            };
            push_description(&mut html, catalog.describe(kind, name));
            push_refinable(&mut html, skill);
        }
    }
    html
}

fn push_description(html: &mut String, text: Option<&str>) {
    if let Some(text) = text {
        html.push_str(&format!(
            r#"<span class="description">{}</span>"#,
            escape_html(text)
        ));
    }
}

fn push_refinable(html: &mut String, skill: &Skill) {
    if skill.refinable {
        html.push_str(r#"<span class="refinable">Refinable</span>"#);
    }
}

/// "Mt 16, Rng 1, Red, Effective against: Dragon", or `None` when the
/// weapon carries no stats.
fn weapon_stats(weapon: &Weapon) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(might) = weapon.might {
        parts.push(format!("Mt {}", might));
    }
    if let Some(range) = weapon.range {
        parts.push(format!("Rng {}", range));
    }
    if let Some(color) = weapon.color.as_deref().filter(|c| !c.is_empty()) {
        parts.push(escape_html(color));
    }
    if let Some(target) = weapon.effective_against.as_deref().filter(|e| !e.is_empty()) {
        parts.push(format!("Effective against: {}", escape_html(target)));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}
