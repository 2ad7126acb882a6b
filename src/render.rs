//! Unit info panel: portrait `<img>` plus a stat block, rendered as HTML
//! fragments for the `{role}-img` and `{role}-info` containers.

use crate::catalog::{Catalog, Unit};
use std::rc::Rc;

pub const PLACEHOLDER_IMG: &str = "/static/img/placeholder.png";
pub const PORTRAIT_WIDTH: u32 = 640;
pub const PORTRAIT_HEIGHT: u32 = 750;

/// The two fragments making up one side of the comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPanel {
    pub image_html: String,
    pub info_html: String,
}

pub struct UnitInfoRenderer {
    catalog: Rc<Catalog>,
}

impl UnitInfoRenderer {
    pub fn new(catalog: Rc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Render the panel for `unit_name`.
    ///
    /// Returns `None` while no unit collection is loaded: the containers
    /// should be left untouched. An unknown name yields the placeholder
    /// portrait and an empty info block.
    pub fn render(&self, unit_name: &str) -> Option<UnitPanel> {
        let units = self.catalog.units()?;
        Some(match units.get(unit_name) {
            Some(unit) => UnitPanel {
                image_html: render_portrait(unit),
                info_html: render_stats(unit),
            },
            None => UnitPanel {
                image_html: render_placeholder(),
                info_html: String::new(),
            },
        })
    }
}

fn render_placeholder() -> String {
    format!(
        r#"<img src='{src}' alt='No unit selected' width='{w}' height='{h}' style='border-radius:12px;opacity:0.5;'>"#,
        src = PLACEHOLDER_IMG,
        w = PORTRAIT_WIDTH,
        h = PORTRAIT_HEIGHT,
    )
}

fn render_portrait(unit: &Unit) -> String {
    let Some(url) = unit.portrait() else {
        return render_placeholder();
    };
    // onerror clears itself first so a broken placeholder can't loop.
    format!(
        r#"<img src='{src}' alt='{alt}' width='{w}' height='{h}' style='border-radius:12px;' onerror="this.onerror=null;this.src='{fallback}';">"#,
        src = escape_html(url),
        alt = escape_html(&unit.name),
        w = PORTRAIT_WIDTH,
        h = PORTRAIT_HEIGHT,
        fallback = PLACEHOLDER_IMG,
    )
}

fn render_stats(unit: &Unit) -> String {
    let mut html = String::with_capacity(512);
    html.push_str(r#"<div style="border:1px solid #ccc; padding:8px; margin:8px 0;">"#);
    html.push_str(&format!("<strong>{}</strong><br>", escape_html(&unit.name)));
    html.push_str(&format!(
        "<span>HP: {}, Atk: {}, Spd: {}, Def: {}, Res: {}</span><br>",
        unit.hp, unit.atk, unit.spd, unit.defense, unit.res
    ));
    html.push_str(&format!(
        "<span>Movement: {}, Weapon: {}</span><br>",
        category(unit.unit_type.as_deref()),
        category(unit.weapon_type.as_deref()),
    ));
    html.push_str(&format!("<span>Superboons: {}</span><br>", list(&unit.superboons)));
    html.push_str(&format!("<span>Superbanes: {}</span><br>", list(&unit.superbanes)));
    html.push_str(&format!(
        "<span>Exclusive Skills: {}</span>",
        list(&unit.exclusive_skills)
    ));
    html.push_str("</div>");
    html
}

fn category(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => escape_html(v),
        _ => "None".to_string(),
    }
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        return "None".to_string();
    }
    escape_html(&items.join(", "))
}

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::{alice, sample_catalog};

    fn renderer() -> UnitInfoRenderer {
        UnitInfoRenderer::new(Rc::new(sample_catalog()))
    }

    #[test]
    fn no_units_loaded_renders_nothing() {
        let r = UnitInfoRenderer::new(Rc::new(Catalog::new(None, Some(vec![]), Some(vec![]))));
        assert_eq!(r.render("Alice"), None);
    }

    #[test]
    fn unknown_unit_gets_placeholder() {
        for name in ["", "Nobody", "alice", "Alice "] {
            let panel = renderer().render(name).unwrap();
            assert!(panel.info_html.is_empty());
            assert!(panel.image_html.contains(PLACEHOLDER_IMG));
            assert!(panel.image_html.contains("alt='No unit selected'"));
            assert!(panel.image_html.contains("width='640' height='750'"));
            assert!(panel.image_html.contains("opacity:0.5"));
        }
    }

    #[test]
    fn alice_example() {
        let panel = renderer().render("Alice").unwrap();
        assert!(panel.info_html.contains("HP: 40, Atk: 30, Spd: 35, Def: 20, Res: 25"));
        assert!(panel.info_html.contains("Movement: Infantry, Weapon: Sword"));
        assert!(panel.info_html.contains("Superboons: None"));
        assert!(panel.info_html.contains("Superbanes: Res"));
        assert!(panel.info_html.contains("Exclusive Skills: None"));
        assert!(panel.image_html.contains(PLACEHOLDER_IMG));
        assert!(panel.image_html.contains("opacity:0.5"));
        assert!(!panel.image_html.contains("onerror"));
    }

    #[test]
    fn portrait_has_fallback_at_full_opacity() {
        let panel = renderer().render("Marth").unwrap();
        assert!(panel.image_html.contains("src='/static/img/marth.png'"));
        assert!(panel.image_html.contains("alt='Marth'"));
        assert!(!panel.image_html.contains("opacity"));
        assert!(panel.image_html.contains(
            "onerror=\"this.onerror=null;this.src='/static/img/placeholder.png';\""
        ));
        assert!(panel.info_html.contains("Superboons: Spd, Atk"));
        assert!(panel.info_html.contains("Exclusive Skills: Falchion"));
    }

    #[test]
    fn missing_categories_read_none() {
        let mut unit = alice();
        unit.unit_type = None;
        unit.weapon_type = Some(String::new());
        let html = render_stats(&unit);
        assert!(html.contains("Movement: None, Weapon: None"));
    }

    #[test]
    fn names_are_escaped() {
        let mut unit = alice();
        unit.name = "<b>Alice's</b>".to_string();
        unit.image_url = Some("/img/a.png".to_string());
        let html = render_stats(&unit);
        assert!(html.contains("<strong>&lt;b&gt;Alice&#39;s&lt;/b&gt;</strong>"));
        assert!(render_portrait(&unit).contains("alt='&lt;b&gt;Alice&#39;s&lt;/b&gt;'"));
    }
}
