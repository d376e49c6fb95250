//! DOM helpers.
//!
//! Thin wrappers over `web_sys` lookup, class, and style calls shared by the
//! controllers.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn document() -> Document {
    doc()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn query(selector: &str) -> Option<Element> {
    doc().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let nl = doc().query_selector_all(selector).unwrap();
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

pub fn create_element(tag: &str) -> Element {
    doc().create_element(tag).unwrap()
}

pub fn set_display(el: &Element, value: &str) {
    let _ = el
        .unchecked_ref::<web_sys::HtmlElement>()
        .style()
        .set_property("display", value);
}

/// Resolve the nearest ancestor of an event's target matching `selector`.
/// Used by the delegated document-level click handler.
pub fn closest_from_event(e: &web_sys::Event, selector: &str) -> Option<Element> {
    let target = e.target()?;
    let el = target.dyn_into::<Element>().ok()?;
    el.closest(selector).ok()?
}
