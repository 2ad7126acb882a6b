//! Comparison page controller.
//!
//! Owns the wiring decisions (what to render on load, what a selector change
//! does, which dropdowns get tooltips) and drives the page through
//! `PageHost`. The browser module only forwards DOM events here.

use crate::catalog::{Catalog, LookupKind};
use crate::render::UnitInfoRenderer;
use crate::tooltip::Describe;
use log::debug;
use std::rc::Rc;

/// Which side of the comparison an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Attacker,
    Defender,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Attacker, Role::Defender];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "attacker" => Some(Self::Attacker),
            "defender" => Some(Self::Defender),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attacker => "attacker",
            Self::Defender => "defender",
        }
    }

    /// Id of the unit `<select>`.
    pub fn selector_id(self) -> &'static str {
        self.as_str()
    }

    pub fn info_id(self) -> &'static str {
        match self {
            Self::Attacker => "attacker-info",
            Self::Defender => "defender-info",
        }
    }

    pub fn image_id(self) -> &'static str {
        match self {
            Self::Attacker => "attacker-img",
            Self::Defender => "defender-img",
        }
    }
}

/// Dropdowns that show a description tooltip, with their lookup source.
pub const TOOLTIP_DROPDOWNS: [(&str, LookupKind); 14] = [
    ("attacker_weapon", LookupKind::Weapon),
    ("defender_weapon", LookupKind::Weapon),
    ("attacker_special", LookupKind::Skill),
    ("defender_special", LookupKind::Skill),
    ("attacker_a", LookupKind::Skill),
    ("defender_a", LookupKind::Skill),
    ("attacker_b", LookupKind::Skill),
    ("defender_b", LookupKind::Skill),
    ("attacker_c", LookupKind::Skill),
    ("defender_c", LookupKind::Skill),
    ("attacker_seal", LookupKind::Skill),
    ("defender_seal", LookupKind::Skill),
    ("attacker_x", LookupKind::Skill),
    ("defender_x", LookupKind::Skill),
];

/// The page as seen by the controller.
pub trait PageHost {
    /// Current value of the `<select>` with this id, `None` if it doesn't
    /// exist. A select with no options reports `""`.
    fn selected_value(&self, id: &str) -> Option<String>;
    /// Overwrite an element's inner HTML. Missing elements are skipped.
    fn set_inner_html(&self, id: &str, html: &str);
    /// Submit the comparison form.
    fn submit_form(&self);
}

pub struct ComparePage {
    catalog: Rc<Catalog>,
    renderer: UnitInfoRenderer,
}

impl ComparePage {
    pub fn new(catalog: Rc<Catalog>) -> Self {
        Self {
            renderer: UnitInfoRenderer::new(Rc::clone(&catalog)),
            catalog,
        }
    }

    /// Render whatever the server pre-selected.
    pub fn on_load<H: PageHost>(&self, host: &H) {
        for role in Role::ALL {
            if let Some(name) = host.selected_value(role.selector_id()) {
                self.show_unit(host, role, &name);
            }
        }
    }

    /// Re-render one side of the comparison.
    pub fn show_unit<H: PageHost>(&self, host: &H, role: Role, unit_name: &str) {
        if let Some(panel) = self.renderer.render(unit_name) {
            host.set_inner_html(role.image_id(), &panel.image_html);
            host.set_inner_html(role.info_id(), &panel.info_html);
        }
    }

    /// A `<select>` changed. `select_id` may be empty for anonymous selects;
    /// `in_form` says whether it sits inside the comparison form.
    pub fn on_select_change<H: PageHost>(
        &self,
        host: &H,
        select_id: &str,
        value: &str,
        in_form: bool,
    ) {
        if let Some(role) = Role::parse(select_id) {
            self.show_unit(host, role, value);
        }
        if in_form {
            debug!("select '{}' changed, submitting form", select_id);
            host.submit_form();
        }
    }

    /// Dropdown ids to bind and their lookup functions. Empty unless both
    /// weapon and skill descriptions are loaded.
    pub fn tooltip_targets(&self) -> Vec<(&'static str, Describe)> {
        if !self.catalog.has_descriptions() {
            return Vec::new();
        }
        TOOLTIP_DROPDOWNS
            .iter()
            .map(|&(id, kind)| (id, describer(Rc::clone(&self.catalog), kind)))
            .collect()
    }
}

fn describer(catalog: Rc<Catalog>, kind: LookupKind) -> Describe {
    Box::new(move |value| catalog.describe(kind, value).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::render::PLACEHOLDER_IMG;
    use crate::tooltip::tests::FakeSurface;
    use crate::tooltip::{DropdownTooltip, Point};
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakePage {
        selects: HashMap<String, String>,
        html: RefCell<HashMap<String, String>>,
        submits: Cell<u32>,
    }

    impl FakePage {
        fn with_selects(selects: &[(&str, &str)]) -> Self {
            Self {
                selects: selects
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                ..Self::default()
            }
        }

        fn html(&self, id: &str) -> Option<String> {
            self.html.borrow().get(id).cloned()
        }
    }

    impl PageHost for FakePage {
        fn selected_value(&self, id: &str) -> Option<String> {
            self.selects.get(id).cloned()
        }

        fn set_inner_html(&self, id: &str, html: &str) {
            self.html.borrow_mut().insert(id.to_string(), html.to_string());
        }

        fn submit_form(&self) {
            self.submits.set(self.submits.get() + 1);
        }
    }

    fn page() -> ComparePage {
        ComparePage::new(Rc::new(sample_catalog()))
    }

    #[test]
    fn role_ids() {
        assert_eq!(Role::parse("defender"), Some(Role::Defender));
        assert_eq!(Role::parse("attacker_weapon"), None);
        assert_eq!(Role::Attacker.info_id(), "attacker-info");
        assert_eq!(Role::Defender.image_id(), "defender-img");
    }

    #[test]
    fn load_renders_preselected_units() {
        let host = FakePage::with_selects(&[("attacker", "Alice"), ("defender", "Marth")]);
        page().on_load(&host);
        assert!(host.html("attacker-info").unwrap().contains("Superbanes: Res"));
        assert!(host.html("defender-img").unwrap().contains("marth.png"));
        assert_eq!(host.submits.get(), 0);
    }

    #[test]
    fn load_skips_missing_selectors() {
        let host = FakePage::with_selects(&[("defender", "")]);
        page().on_load(&host);
        assert!(host.html("attacker-info").is_none());
        assert_eq!(host.html("defender-info").unwrap(), "");
        assert!(host.html("defender-img").unwrap().contains(PLACEHOLDER_IMG));
    }

    #[test]
    fn load_without_units_touches_nothing() {
        let page = ComparePage::new(Rc::new(Catalog::default()));
        let host = FakePage::with_selects(&[("attacker", "Alice")]);
        page.on_load(&host);
        assert!(host.html.borrow().is_empty());
    }

    #[test]
    fn role_change_rerenders_and_submits_once() {
        let host = FakePage::default();
        page().on_select_change(&host, "attacker", "Tiki", true);
        assert!(host.html("attacker-info").unwrap().contains("Movement: Armored"));
        assert_eq!(host.submits.get(), 1);
    }

    #[test]
    fn other_select_in_form_submits_once() {
        let host = FakePage::default();
        let page = page();
        page.on_select_change(&host, "attacker_weapon", "Falchion", true);
        assert_eq!(host.submits.get(), 1);
        page.on_select_change(&host, "", "x", true);
        assert_eq!(host.submits.get(), 2);
        assert!(host.html.borrow().is_empty());
    }

    #[test]
    fn change_outside_form_does_not_submit() {
        let host = FakePage::default();
        page().on_select_change(&host, "defender", "Alice", false);
        assert_eq!(host.submits.get(), 0);
        assert!(host.html("defender-info").is_some());
    }

    #[test]
    fn tooltip_targets_cover_all_slots() {
        let targets = page().tooltip_targets();
        let ids: Vec<_> = targets.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids.len(), 14);
        assert!(ids.contains(&"defender_seal"));
        let (_, weapon) = &targets[0];
        assert_eq!(weapon("Falchion").as_deref(), Some("Effective against dragons."));
        assert_eq!(weapon("Moonbow"), None);
        let (_, special) = &targets[2];
        assert!(special("Moonbow").unwrap().contains("30%"));
    }

    #[test]
    fn tooltips_skipped_without_descriptions() {
        let units = sample_catalog().units().map(|u| u.iter().cloned().collect());
        let catalog = Catalog::new(units, Some(vec![]), None);
        assert!(ComparePage::new(Rc::new(catalog)).tooltip_targets().is_empty());
    }

    #[test]
    fn bound_tooltip_follows_hover() {
        let surface = FakeSurface::default();
        let mut targets = page().tooltip_targets();
        let (_, describe) = targets.remove(4);
        let mut tip = DropdownTooltip::new(surface.clone(), describe);
        tip.enter(Some("Death Blow 3"), Point::new(0, 0));
        assert_eq!(surface.0.borrow().nodes.len(), 1);
        tip.leave();
        assert!(surface.0.borrow().nodes.is_empty());
    }
}
