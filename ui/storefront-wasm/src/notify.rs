//! Transient notification banner.
//!
//! One banner element (`#global-notification`), created on first use and
//! reused. A new notification replaces the current one and cancels its
//! pending dismiss timer, so a superseded timer can never clip a newer
//! message.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom;

const DISMISS_MS: i32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl Level {
    pub fn css_class(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
        }
    }
}

thread_local! {
    static DISMISS_TIMER: RefCell<Option<(i32, Closure<dyn FnMut()>)>> = RefCell::new(None);
}

/// Show a notification, auto-dismissed after a fixed timeout.
///
/// The dismiss closure is kept alongside its timer handle so a superseding
/// notification cancels the timer and drops the closure, instead of leaking
/// a forgotten one per superseded message.
pub fn show(message: &str, level: Level) {
    let banner = ensure_banner();
    banner.set_text_content(Some(message));
    banner.set_class_name(&format!("notification {} show", level.css_class()));

    let window = dom::window();
    DISMISS_TIMER.with(|t| {
        if let Some((id, _closure)) = t.borrow_mut().take() {
            window.clear_timeout_with_handle(id);
        }
    });

    let banner2 = banner.clone();
    let cb = Closure::once(move || {
        dom::remove_class(&banner2, "show");
        DISMISS_TIMER.with(|t| *t.borrow_mut() = None);
    });
    let id = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            DISMISS_MS,
        )
        .unwrap();
    DISMISS_TIMER.with(|t| *t.borrow_mut() = Some((id, cb)));
}

fn ensure_banner() -> Element {
    if let Some(el) = dom::by_id("global-notification") {
        return el;
    }
    let el = dom::create_element("div");
    el.set_id("global-notification");
    el.set_class_name("notification");
    dom::document().body().unwrap().append_child(&el).unwrap();
    el
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_css_classes() {
        assert_eq!(Level::Success.css_class(), "success");
        assert_eq!(Level::Error.css_class(), "error");
        assert_eq!(Level::Warning.css_class(), "warning");
        assert_eq!(Level::Info.css_class(), "info");
    }
}
