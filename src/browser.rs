//! DOM bindings for the comparison page (wasm32 only).
//!
//! Implements `PageHost` and `TooltipSurface` on top of `web-sys` and hooks
//! the page controller up to `change` / `mouseover` / `mousemove` /
//! `mouseout` listeners. Listener closures live for the whole page, so they
//! are leaked with `Closure::forget`; the form submit reloads the page anyway.

use crate::catalog::Catalog;
use crate::page::{ComparePage, PageHost, Role};
use crate::tooltip::{Describe, DropdownTooltip, Point, TOOLTIP_STYLE, TooltipSurface};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, HtmlElement, HtmlFormElement, HtmlSelectElement, MouseEvent, Node,
};

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn select_by_id(document: &Document, id: &str) -> Option<HtmlSelectElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
}

/// Value of the selected option for tooltip lookups, `None` when nothing
/// is selected.
fn selected_option(select: &HtmlSelectElement) -> Option<String> {
    if select.selected_index() < 0 {
        None
    } else {
        Some(select.value())
    }
}

pub struct WebPage {
    document: Document,
    form: Option<HtmlFormElement>,
}

impl WebPage {
    /// The page in `document`; the comparison form is the one enclosing the
    /// attacker selector.
    pub fn for_document(document: Document) -> Self {
        let form = select_by_id(&document, Role::Attacker.selector_id())
            .and_then(|sel| sel.closest("form").ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
        Self { document, form }
    }

    /// Every select that needs a change listener, paired with whether it
    /// sits in the comparison form. Each select appears once: all selects in
    /// the form, then the role selectors that live outside it.
    pub fn watched_selects(&self) -> Result<Vec<(HtmlSelectElement, bool)>, JsValue> {
        let mut selects = Vec::new();
        if let Some(form) = &self.form {
            let list = form.query_selector_all("select")?;
            for i in 0..list.length() {
                if let Some(sel) = list.item(i).and_then(|n| n.dyn_into::<HtmlSelectElement>().ok()) {
                    selects.push((sel, true));
                }
            }
        }
        for role in Role::ALL {
            if let Some(sel) = select_by_id(&self.document, role.selector_id()) {
                if !self.contains(&sel) {
                    selects.push((sel, false));
                }
            }
        }
        Ok(selects)
    }

    fn contains(&self, select: &HtmlSelectElement) -> bool {
        let node: &Node = select.as_ref();
        self.form
            .as_ref()
            .is_some_and(|form| form.contains(Some(node)))
    }
}

impl PageHost for WebPage {
    /// An existing select with no options reports `""`, which renders the
    /// placeholder.
    fn selected_value(&self, id: &str) -> Option<String> {
        select_by_id(&self.document, id).map(|s| s.value())
    }

    fn set_inner_html(&self, id: &str, html: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_inner_html(html);
        }
    }

    fn submit_form(&self) {
        if let Some(form) = &self.form {
            if let Err(e) = form.submit() {
                warn!("form submit failed: {}", js_err(e));
            }
        }
    }
}

/// Tooltip nodes as fixed-position `<div>`s appended to `<body>`.
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl TooltipSurface for DomSurface {
    type Node = HtmlElement;

    fn create(&self, text: &str) -> Result<HtmlElement, String> {
        let node = self
            .document
            .create_element("div")
            .map_err(js_err)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "div is not an HtmlElement".to_string())?;
        node.set_text_content(Some(text));
        let style = node.style();
        for (name, value) in TOOLTIP_STYLE {
            style.set_property(name, value).map_err(js_err)?;
        }
        let body = self.document.body().ok_or("document has no body")?;
        body.append_child(&node).map_err(js_err)?;
        Ok(node)
    }

    fn set_text(&self, node: &HtmlElement, text: &str) {
        node.set_text_content(Some(text));
    }

    fn place(&self, node: &HtmlElement, at: Point) -> Result<(), String> {
        let style = node.style();
        style
            .set_property("left", &format!("{}px", at.x))
            .map_err(js_err)?;
        style
            .set_property("top", &format!("{}px", at.y))
            .map_err(js_err)
    }

    fn remove(&self, node: HtmlElement) {
        node.remove();
    }
}

/// Wire the comparison page in the current document.
pub fn mount(catalog: Rc<Catalog>) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let host = Rc::new(WebPage::for_document(document.clone()));
    let page = Rc::new(ComparePage::new(catalog));

    page.on_load(&*host);

    let selects = host.watched_selects()?;
    debug!("watching {} selects", selects.len());
    for (select, in_form) in selects {
        watch_changes(Rc::clone(&page), Rc::clone(&host), select, in_form)?;
    }

    for (id, describe) in page.tooltip_targets() {
        bind_tooltip(&document, id, describe)?;
    }
    Ok(())
}

fn watch_changes(
    page: Rc<ComparePage>,
    host: Rc<WebPage>,
    select: HtmlSelectElement,
    in_form: bool,
) -> Result<(), JsValue> {
    let target = select.clone();
    let on_change = Closure::wrap(Box::new(move |_: Event| {
        page.on_select_change(&*host, &target.id(), &target.value(), in_form);
    }) as Box<dyn FnMut(Event)>);
    select.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(())
}

/// Attach a hover tooltip to the dropdown `id`. Missing dropdowns are skipped.
pub fn bind_tooltip(document: &Document, id: &str, describe: Describe) -> Result<(), JsValue> {
    let Some(dropdown) = select_by_id(document, id) else {
        return Ok(());
    };
    let tooltip = Rc::new(RefCell::new(DropdownTooltip::new(
        DomSurface::new(document.clone()),
        describe,
    )));

    let on_over = {
        let tooltip = Rc::clone(&tooltip);
        let dropdown = dropdown.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            let selected = selected_option(&dropdown);
            tooltip.borrow_mut().enter(selected.as_deref(), cursor(&e));
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    let on_move = {
        let tooltip = Rc::clone(&tooltip);
        Closure::wrap(Box::new(move |e: MouseEvent| {
            tooltip.borrow_mut().move_to(cursor(&e));
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    let on_out = Closure::wrap(Box::new(move |_: MouseEvent| {
        tooltip.borrow_mut().leave();
    }) as Box<dyn FnMut(MouseEvent)>);

    dropdown.add_event_listener_with_callback("mouseover", on_over.as_ref().unchecked_ref())?;
    dropdown.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    dropdown.add_event_listener_with_callback("mouseout", on_out.as_ref().unchecked_ref())?;
    on_over.forget();
    on_move.forget();
    on_out.forget();
    Ok(())
}

fn cursor(e: &MouseEvent) -> Point {
    Point::new(e.client_x(), e.client_y())
}
