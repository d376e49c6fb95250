//! Wishlist toggle flow.
//!
//! Membership is tracked as explicit state per product (`state::Membership`);
//! the button's `in-wishlist` class, icon, and title are derived from it.
//! Removal is a two-step protocol: the product id is resolved to a wishlist
//! item id first, then the delete is issued. The two steps are not atomic —
//! a concurrent removal from another tab shows up as a missing item id and
//! settles as a silent revert, not an error.

use sf_api_types::{
    BadgeCountResponse, ProductId, WishlistItemLookupResponse, WishlistMutationResponse,
};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::api::{self, ApiError};
use crate::dom;
use crate::notify::{self, Level};
use crate::state::{self, Membership, WishlistAction};

const LOGIN_PATH: &str = "/user-login/";
const LOGIN_REDIRECT_DELAY_MS: i32 = 1_500;

/// Result of one add/remove exchange with the backend.
enum Outcome {
    Applied { total: Option<u64> },
    Rejected { message: String },
    Unauthorized,
    /// Lookup found no wishlist item id; nothing was deleted.
    MissingItem,
}

#[derive(Clone)]
pub struct WishlistController {
    csrf: Option<String>,
}

impl WishlistController {
    pub fn new() -> Self {
        Self {
            csrf: api::csrf_token(),
        }
    }

    /// Record initial membership from the server-rendered `in-wishlist`
    /// class on each button. After this, state drives the class.
    pub fn seed_from_dom(&self) {
        for btn in dom::query_all(".add-to-wishlist-btn") {
            if let Some(product_id) = btn.get_attribute("data-product-id") {
                state::seed_membership(&product_id, dom::has_class(&btn, "in-wishlist"));
            }
        }
    }

    pub async fn handle_click(&self, btn: Element) {
        let product_id = match btn.get_attribute("data-product-id") {
            Some(p) if !p.is_empty() => ProductId(p),
            _ => return,
        };
        // Buttons rendered after init are seeded on first sight.
        state::seed_membership(&product_id.0, dom::has_class(&btn, "in-wishlist"));
        self.toggle(&product_id, &btn).await;
    }

    /// Dispatch to add or remove based on tracked membership. Clicks while a
    /// request is in flight are ignored (the button is also disabled).
    pub async fn toggle(&self, product_id: &ProductId, button: &Element) {
        let current = state::membership(&product_id.0).unwrap_or(Membership::Out);
        let Some((pending, action)) = current.on_click() else {
            return;
        };
        state::set_membership(&product_id.0, pending);
        apply_presentation(button, pending);

        let outcome = match action {
            WishlistAction::Add => self.add(product_id).await,
            WishlistAction::Remove => self.remove(product_id).await,
        };

        match outcome {
            Outcome::Applied { total } => {
                let settled = pending.resolved(true);
                state::set_membership(&product_id.0, settled);
                apply_presentation(button, settled);
                if let Some(total) = total {
                    update_wishlist_badges(total);
                }
                let message = match action {
                    WishlistAction::Add => "Added to wishlist!",
                    WishlistAction::Remove => "Removed from wishlist",
                };
                notify::show(message, Level::Success);
            }
            Outcome::Rejected { message } => {
                let settled = pending.resolved(false);
                state::set_membership(&product_id.0, settled);
                apply_presentation(button, settled);
                notify::show(&message, Level::Error);
            }
            Outcome::MissingItem => {
                // Already gone (e.g. removed from another tab): revert
                // quietly, no delete was sent.
                let settled = pending.resolved(false);
                state::set_membership(&product_id.0, settled);
                apply_presentation(button, settled);
            }
            Outcome::Unauthorized => {
                let settled = pending.resolved(false);
                state::set_membership(&product_id.0, settled);
                apply_presentation(button, settled);
                notify::show("Please login to use wishlist", Level::Error);
                redirect_to_login_after_delay();
            }
        }
    }

    /// POST /wishlist/add/{productId}/
    async fn add(&self, product_id: &ProductId) -> Outcome {
        let path = format!(
            "/wishlist/add/{}/",
            js_sys::encode_uri_component(&product_id.0)
        );
        match api::request(&path, "POST", None, self.csrf.as_deref()).await {
            Ok(value) => mutation_outcome(value, "Could not add to wishlist"),
            Err(e) => transport_outcome(e, "wishlist add"),
        }
    }

    /// GET /wishlist/get-item-id/{productId}/ then
    /// POST /wishlist/remove/{itemId}/
    async fn remove(&self, product_id: &ProductId) -> Outcome {
        let lookup_path = format!(
            "/wishlist/get-item-id/{}/",
            js_sys::encode_uri_component(&product_id.0)
        );
        let item_id = match api::request(&lookup_path, "GET", None, None).await {
            Ok(value) => serde_json::from_value::<WishlistItemLookupResponse>(value)
                .ok()
                .and_then(|r| r.item_id),
            Err(e) => return transport_outcome(e, "wishlist item lookup"),
        };
        let Some(item_id) = item_id else {
            return Outcome::MissingItem;
        };

        let path = format!("/wishlist/remove/{}/", item_id);
        match api::request(&path, "POST", None, self.csrf.as_deref()).await {
            Ok(value) => mutation_outcome(value, "Error removing item"),
            Err(e) => transport_outcome(e, "wishlist remove"),
        }
    }

    /// GET /wishlist/count/ — initial badge state at page load. A failure
    /// here is logged and otherwise ignored.
    pub async fn init_count(&self) {
        match api::request("/wishlist/count/", "GET", None, None).await {
            Ok(value) => {
                if let Ok(resp) = serde_json::from_value::<BadgeCountResponse>(value) {
                    update_wishlist_badges(resp.count);
                }
            }
            Err(e) => gloo_console::warn!(format!("wishlist count unavailable: {e}")),
        }
    }
}

fn mutation_outcome(value: serde_json::Value, fallback_message: &str) -> Outcome {
    match serde_json::from_value::<WishlistMutationResponse>(value) {
        Ok(resp) if resp.success => Outcome::Applied {
            total: resp.total_items(),
        },
        Ok(resp) => Outcome::Rejected {
            message: resp.message.unwrap_or_else(|| fallback_message.to_string()),
        },
        Err(e) => {
            gloo_console::error!(format!("wishlist response parse: {e}"));
            Outcome::Rejected {
                message: fallback_message.to_string(),
            }
        }
    }
}

fn transport_outcome(e: ApiError, context: &str) -> Outcome {
    if e.is_unauthorized() {
        return Outcome::Unauthorized;
    }
    gloo_console::error!(format!("{context}: {e}"));
    Outcome::Rejected {
        message: "Network error. Please try again.".to_string(),
    }
}

/// Derive the button's classes, icon, title, and disabled flag from state.
pub fn apply_presentation(button: &Element, m: Membership) {
    dom::toggle_class(button, "in-wishlist", m.in_wishlist());
    if let Ok(Some(icon)) = button.query_selector("i") {
        icon.set_class_name(icon_class(m));
    }
    let title = if m.in_wishlist() {
        "Remove from Wishlist"
    } else {
        "Add to Wishlist"
    };
    let _ = button.set_attribute("title", title);
    if let Some(b) = button.dyn_ref::<web_sys::HtmlButtonElement>() {
        b.set_disabled(m.is_pending());
    }
}

fn icon_class(m: Membership) -> &'static str {
    match m {
        Membership::Pending { .. } => "fas fa-spinner fa-spin",
        Membership::In => "fas fa-heart text-danger",
        Membership::Out => "far fa-heart",
    }
}

/// Set every wishlist badge to `count`, hidden at zero.
pub fn update_wishlist_badges(count: u64) {
    for badge in dom::query_all(".wishlist-badge") {
        dom::set_text(&badge, &count.to_string());
        dom::set_display(&badge, if count > 0 { "flex" } else { "none" });
    }
}

thread_local! {
    static REDIRECT_TIMER: RefCell<Option<(i32, Closure<dyn FnMut()>)>> = RefCell::new(None);
}

/// Login URL carrying `path` as the return target.
pub fn login_redirect_target(path: &str) -> String {
    format!(
        "{}?next={}",
        LOGIN_PATH,
        js_sys::encode_uri_component(path)
    )
}

/// Send the user to the login page after a fixed delay, carrying the current
/// path as the return target. A repeated 401/403 before the delay elapses
/// replaces the pending redirect (cancelling its timer and dropping its
/// closure) rather than stacking another one.
fn redirect_to_login_after_delay() {
    let window = dom::window();
    REDIRECT_TIMER.with(|t| {
        if let Some((id, _closure)) = t.borrow_mut().take() {
            window.clear_timeout_with_handle(id);
        }
    });

    let cb = Closure::once(move || {
        REDIRECT_TIMER.with(|t| *t.borrow_mut() = None);
        let location = dom::window().location();
        let path = location.pathname().unwrap_or_else(|_| "/".to_string());
        let _ = location.set_href(&login_redirect_target(&path));
    });
    let id = match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        LOGIN_REDIRECT_DELAY_MS,
    ) {
        Ok(id) => id,
        Err(_) => return,
    };
    REDIRECT_TIMER.with(|t| *t.borrow_mut() = Some((id, cb)));
}
