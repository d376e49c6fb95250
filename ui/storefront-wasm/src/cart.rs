//! Add-to-cart flow.
//!
//! Delegated clicks on `.add-to-cart-btn` post the variant's quantity to the
//! backend and refresh the cart badges from the response.

use sf_api_types::{BadgeCountResponse, CartAddResponse, VariantId};
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::api;
use crate::dom;
use crate::notify::{self, Level};

const LOADING_LABEL: &str = r#"<i class="fas fa-spinner fa-spin"></i> Adding..."#;

#[derive(Clone)]
pub struct CartController {
    csrf: Option<String>,
}

impl CartController {
    pub fn new() -> Self {
        Self {
            csrf: api::csrf_token(),
        }
    }

    /// Handle a click on an add-to-cart button: validate the variant id,
    /// swap in a loading label for the duration of the request, and restore
    /// the button unconditionally afterward.
    pub async fn handle_click(&self, btn: Element) {
        let variant_id = match btn.get_attribute("data-variant-id") {
            Some(v) if !v.is_empty() => VariantId(v),
            _ => {
                notify::show("Invalid product variant", Level::Error);
                return;
            }
        };

        let original_label = btn.inner_html();
        set_button_disabled(&btn, true);
        btn.set_inner_html(LOADING_LABEL);

        self.add_item(&variant_id, 1).await;

        btn.set_inner_html(&original_label);
        set_button_disabled(&btn, false);
    }

    /// POST /cart/add/{variantId}/
    pub async fn add_item(&self, variant_id: &VariantId, quantity: u32) {
        let body = serde_json::json!({ "quantity": quantity }).to_string();
        let path = format!("/cart/add/{}/", js_sys::encode_uri_component(&variant_id.0));

        let value = match api::request(&path, "POST", Some(body), self.csrf.as_deref()).await {
            Ok(v) => v,
            Err(e) => {
                gloo_console::error!(format!("add to cart: {e}"));
                notify::show("Error adding product to cart", Level::Error);
                return;
            }
        };

        match serde_json::from_value::<CartAddResponse>(value) {
            Ok(resp) if resp.success => {
                notify::show(
                    resp.message.as_deref().unwrap_or("Added to cart"),
                    Level::Success,
                );
                match resp.cart_total_items {
                    Some(total) => update_cart_badges(total),
                    None => refresh_cart_badges().await,
                }
                update_quantity_display(&resp);
            }
            Ok(resp) => {
                notify::show(
                    resp.message
                        .as_deref()
                        .unwrap_or("Could not add product to cart"),
                    Level::Error,
                );
            }
            Err(e) => {
                gloo_console::error!(format!("cart response parse: {e}"));
                notify::show("Error adding product to cart", Level::Error);
            }
        }
    }
}

/// Set every cart badge to `count`, hidden at zero.
pub fn update_cart_badges(count: u64) {
    for badge in dom::query_all(".cart-badge, .cart-count") {
        dom::set_text(&badge, &count.to_string());
        dom::set_display(&badge, if count > 0 { "inline" } else { "none" });
    }
}

/// GET /cart/count/ — used at page init and when the add response omits the
/// new total.
pub async fn refresh_cart_badges() {
    match api::request("/cart/count/", "GET", None, None).await {
        Ok(v) => {
            if let Ok(resp) = serde_json::from_value::<BadgeCountResponse>(v) {
                update_cart_badges(resp.count);
            }
        }
        Err(e) => gloo_console::warn!(format!("cart count refresh: {e}")),
    }
}

/// Update the quantity display scoped to the variant the response names.
fn update_quantity_display(resp: &CartAddResponse) {
    let (Some(qty), Some(variant_id)) = (resp.item_quantity, resp.variant_id.as_deref()) else {
        return;
    };
    let selector = format!(r#"[data-variant-id="{}"] .quantity-display"#, variant_id);
    if let Some(el) = dom::query(&selector) {
        dom::set_text(&el, &qty.to_string());
    }
}

fn set_button_disabled(btn: &Element, disabled: bool) {
    if let Some(b) = btn.dyn_ref::<web_sys::HtmlButtonElement>() {
        b.set_disabled(disabled);
    }
}
