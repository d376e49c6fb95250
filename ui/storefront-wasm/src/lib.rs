//! Storefront WASM Frontend
//!
//! Browser-side controllers for the storefront and admin pages: cart adds,
//! wishlist toggles, badge counters, and admin panel conveniences.
//! One module per concern.

pub mod admin;
pub mod api;
pub mod cart;
pub mod dom;
pub mod events;
pub mod notify;
pub mod state;
pub mod wishlist;

use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

/// Main initialisation sequence.
async fn init() -> Result<(), JsValue> {
    let cart = cart::CartController::new();
    let wishlist = wishlist::WishlistController::new();
    let admin = admin::AdminPanelController::new();

    // Membership state is seeded once from the server-rendered classes;
    // from here on state drives presentation.
    wishlist.seed_from_dom();

    events::bind_events(&cart, &wishlist, &admin);

    // Initial badge counts
    cart::refresh_cart_badges().await;
    wishlist.init_count().await;

    Ok(())
}
