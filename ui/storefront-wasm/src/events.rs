//! Event wiring.
//!
//! Storefront buttons (cart, wishlist) are handled through one delegated
//! document-level click listener so dynamically rendered buttons work
//! without rebinding. Admin features bind to their own elements.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::admin::AdminPanelController;
use crate::cart::CartController;
use crate::dom;
use crate::wishlist::WishlistController;

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(
    cart: &CartController,
    wishlist: &WishlistController,
    admin: &AdminPanelController,
) {
    bind_storefront_clicks(cart, wishlist);
    admin.bind();
}

fn bind_storefront_clicks(cart: &CartController, wishlist: &WishlistController) {
    let cart = cart.clone();
    let wishlist = wishlist.clone();
    let cb = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
        if let Some(btn) = dom::closest_from_event(&e, ".add-to-cart-btn") {
            e.prevent_default();
            let cart = cart.clone();
            wasm_bindgen_futures::spawn_local(async move {
                cart.handle_click(btn).await;
            });
            return;
        }
        if let Some(btn) = dom::closest_from_event(&e, ".add-to-wishlist-btn") {
            e.prevent_default();
            let wishlist = wishlist.clone();
            wasm_bindgen_futures::spawn_local(async move {
                wishlist.handle_click(btn).await;
            });
        }
    }) as Box<dyn FnMut(_)>);
    dom::document()
        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}
