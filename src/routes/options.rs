//! Dropdown option lists for the weapon and skill selectors.
//!
//! - `GET /api/weapon-options?unit=&selected=` — weapons matching the unit's
//!   weapon type (every weapon when the unit or its type is unknown).
//! - `GET /api/skill-options?unit=&slot=&selected=` — skills for one slot
//!   that the unit may equip.
//!
//! Both lists start with an empty "None" option.

use crate::catalog::{Catalog, Unit};
use crate::render::escape_html;
use crate::routes::util::{error_span, get_param, parse_query};

pub fn handle_weapons(catalog: Option<&Catalog>, query: &str) -> String {
    let params = parse_query(query);
    let selected = get_param(&params, "selected").unwrap_or("");
    let Some(catalog) = catalog else {
        return render_options(std::iter::empty(), selected);
    };
    let Some(weapons) = catalog.weapons() else {
        return render_options(std::iter::empty(), selected);
    };

    let weapon_type = get_param(&params, "unit")
        .and_then(|name| catalog.unit(name))
        .and_then(|unit| unit.weapon_type.as_deref());

    let names = weapons
        .iter()
        .filter(|w| match (weapon_type, w.weapon_type.as_deref()) {
            (Some(wanted), Some(have)) => wanted.eq_ignore_ascii_case(have),
            (Some(_), None) => false,
            (None, _) => true,
        })
        .map(|w| w.name.as_str());
    render_options(names, selected)
}

pub fn handle_skills(catalog: Option<&Catalog>, query: &str) -> String {
    let params = parse_query(query);
    let Some(slot) = get_param(&params, "slot").filter(|s| !s.is_empty()) else {
        return error_span("Missing slot parameter");
    };
    let selected = get_param(&params, "selected").unwrap_or("");
    let Some(skills) = catalog.and_then(|c| c.skills()) else {
        return render_options(std::iter::empty(), selected);
    };

    let unit: Option<&Unit> = get_param(&params, "unit").and_then(|name| catalog?.unit(name));
    let movement = unit.and_then(|u| u.unit_type.as_deref());
    let weapon_type = unit.and_then(|u| u.weapon_type.as_deref());

    let names = skills
        .iter()
        .filter(|s| s.is_slot(slot))
        .filter(|s| unit.is_none() || s.is_usable_by(movement, weapon_type))
        .map(|s| s.name.as_str());
    render_options(names, selected)
}

fn render_options<'a>(names: impl Iterator<Item = &'a str>, selected: &str) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str(r#"<option value="">None</option>"#);
    for name in names {
        let escaped = escape_html(name);
        let mark = if name == selected { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            escaped, mark, escaped
        ));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;

    #[test]
    fn weapons_filtered_by_unit_type() {
        let catalog = sample_catalog();
        let html = handle_weapons(Some(&catalog), "unit=Marth&selected=Falchion");
        assert!(html.starts_with(r#"<option value="">None</option>"#));
        assert!(html.contains(r#"<option value="Falchion" selected>Falchion</option>"#));
        assert!(html.contains(r#"value="Silver Sword+""#));
        assert!(!html.contains("Lightning Breath+"));
    }

    #[test]
    fn unknown_unit_lists_all_weapons() {
        let catalog = sample_catalog();
        let html = handle_weapons(Some(&catalog), "unit=Nobody");
        assert_eq!(html.matches("<option").count(), 4);
        assert!(!html.contains(" selected"));
    }

    #[test]
    fn no_catalog_gives_empty_choice() {
        assert_eq!(
            handle_weapons(None, "unit=Marth"),
            r#"<option value="">None</option>"#
        );
        assert_eq!(
            handle_skills(None, "slot=A"),
            r#"<option value="">None</option>"#
        );
    }

    #[test]
    fn skills_by_slot_and_restrictions() {
        let catalog = sample_catalog();
        let html = handle_skills(Some(&catalog), "unit=Tiki&slot=B");
        // Tiki is an armored dragon: neither B skill applies.
        assert_eq!(html.matches("<option").count(), 1);

        let html = handle_skills(Some(&catalog), "unit=Marth&slot=B&selected=Swordbreaker+3");
        assert!(html.contains(r#"<option value="Swordbreaker 3" selected>"#));
        assert!(html.contains("Wings of Mercy 3"));
        assert!(!html.contains("Moonbow"));
    }

    #[test]
    fn skills_without_unit_ignore_restrictions() {
        let catalog = sample_catalog();
        let html = handle_skills(Some(&catalog), "slot=b");
        assert_eq!(html.matches("<option").count(), 3);
    }

    #[test]
    fn skills_need_slot() {
        let catalog = sample_catalog();
        assert!(handle_skills(Some(&catalog), "unit=Marth").contains("Missing slot"));
    }
}
