//! Admin panel conveniences: sidebar toggle, search box, image previews.
//!
//! All three features are independent, bind only when their elements exist
//! on the page, and make no network calls.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::dom;

/// Page-specific search action, invoked with the trimmed non-empty query.
pub type SearchHandler = Rc<dyn Fn(&str)>;

pub struct AdminPanelController {
    search_handler: SearchHandler,
}

impl AdminPanelController {
    /// Controller with the default diagnostic search stub.
    pub fn new() -> Self {
        Self::with_search_handler(Rc::new(|query: &str| {
            gloo_console::log!("searching for:", query);
        }))
    }

    pub fn with_search_handler(handler: SearchHandler) -> Self {
        Self {
            search_handler: handler,
        }
    }

    pub fn bind(&self) {
        bind_sidebar_toggle();
        self.bind_search();
        bind_image_previews();
    }

    fn bind_search(&self) {
        let (Some(input_el), Some(btn)) = (dom::query(".search-input"), dom::query(".search-btn"))
        else {
            return;
        };
        let Ok(input) = input_el.dyn_into::<HtmlInputElement>() else {
            return;
        };

        {
            let input = input.clone();
            let handler = self.search_handler.clone();
            let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
                run_search(&input, &handler);
            }) as Box<dyn FnMut(_)>);
            btn.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
                .unwrap();
            cb.forget();
        }
        {
            let input2 = input.clone();
            let handler = self.search_handler.clone();
            let cb = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                if e.key() == "Enter" {
                    run_search(&input2, &handler);
                }
            }) as Box<dyn FnMut(_)>);
            input
                .add_event_listener_with_callback("keypress", cb.as_ref().unchecked_ref())
                .unwrap();
            cb.forget();
        }
    }
}

fn run_search(input: &HtmlInputElement, handler: &SearchHandler) {
    let query = input.value().trim().to_string();
    if !query.is_empty() {
        handler(&query);
    }
}

/// Sidebar visibility as explicit state; the `active` class and the main
/// content margin are both derived from it on every toggle.
fn bind_sidebar_toggle() {
    let (Some(toggle), Some(sidebar), Some(main)) = (
        dom::query(".sidebar-toggle"),
        dom::query(".sidebar"),
        dom::query(".main-content"),
    ) else {
        return;
    };

    let open = Rc::new(Cell::new(dom::has_class(&sidebar, "active")));
    let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
        open.set(!open.get());
        apply_sidebar_state(&sidebar, &main, open.get());
    }) as Box<dyn FnMut(_)>);
    toggle
        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

fn apply_sidebar_state(sidebar: &Element, main: &Element, open: bool) {
    dom::toggle_class(sidebar, "active", open);
    let margin = if open { "0" } else { "280px" };
    let _ = main
        .unchecked_ref::<web_sys::HtmlElement>()
        .style()
        .set_property("margin-left", margin);
}

/// Wire a change listener on every file input with a `data-preview` target.
fn bind_image_previews() {
    for input_el in dom::query_all(r#"input[type="file"][data-preview]"#) {
        let Ok(input) = input_el.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        let input2 = input.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            render_previews(&input2);
        }) as Box<dyn FnMut(_)>);
        input
            .add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}

/// Clear the preview target and rebuild one thumbnail per selected image
/// file. Non-image files are skipped.
pub fn render_previews(input: &HtmlInputElement) {
    let Some(preview_id) = input.get_attribute("data-preview") else {
        return;
    };
    let Some(preview) = dom::by_id(&preview_id) else {
        return;
    };
    dom::set_inner_html(&preview, "");

    let Some(files) = input.files() else {
        return;
    };
    for i in 0..files.length() {
        let Some(file) = files.item(i) else { continue };
        if !is_image(&file.type_()) {
            continue;
        }
        append_thumbnail(&preview, &file);
    }
}

fn append_thumbnail(preview: &Element, file: &web_sys::File) {
    let Ok(reader) = web_sys::FileReader::new() else {
        return;
    };
    let preview = preview.clone();
    let reader2 = reader.clone();
    let onload = Closure::once(move |_: web_sys::ProgressEvent| {
        let Some(data_url) = reader2.result().ok().and_then(|v| v.as_string()) else {
            return;
        };
        let img = dom::create_element("img");
        let _ = img.set_attribute("src", &data_url);
        img.set_class_name("img-thumbnail me-2 mb-2");
        let _ = img
            .unchecked_ref::<web_sys::HtmlElement>()
            .style()
            .set_property("height", "100px");
        let _ = preview.append_child(&img);
    });
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();
    let _ = reader.read_as_data_url(file);
}

pub(crate) fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_mime_types_pass_the_filter() {
        assert!(is_image("image/png"));
        assert!(is_image("image/jpeg"));
        assert!(is_image("image/svg+xml"));
    }

    #[test]
    fn non_image_mime_types_are_skipped() {
        assert!(!is_image("application/pdf"));
        assert!(!is_image("text/html"));
        assert!(!is_image(""));
    }
}
