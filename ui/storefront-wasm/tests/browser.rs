#![cfg(target_arch = "wasm32")]

//! Browser tests for DOM-touching behavior. Run with `wasm-pack test` or
//! `cargo test --target wasm32-unknown-unknown` under a wasm test runner.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::Element;

use storefront_wasm::cart::{self, CartController};
use storefront_wasm::notify::{self, Level};
use storefront_wasm::state::Membership;
use storefront_wasm::wishlist;

wasm_bindgen_test_configure!(run_in_browser);

fn body() -> Element {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .body()
        .unwrap()
        .into()
}

fn mount(html: &str) -> Element {
    let doc = web_sys::window().unwrap().document().unwrap();
    let host = doc.create_element("div").unwrap();
    host.set_inner_html(html);
    body().append_child(&host).unwrap();
    host
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

/// Replace `window.fetch` with a stub that records whether it was called.
/// Returns the flag and the original fetch for restoration.
fn stub_fetch() -> (Rc<Cell<bool>>, JsValue) {
    let window = web_sys::window().unwrap();
    let original = js_sys::Reflect::get(&window, &"fetch".into()).unwrap();
    let called = Rc::new(Cell::new(false));
    let called2 = called.clone();
    let fake = Closure::wrap(Box::new(move |_req: JsValue| -> JsValue {
        called2.set(true);
        js_sys::Promise::reject(&JsValue::from_str("unexpected fetch")).into()
    }) as Box<dyn FnMut(JsValue) -> JsValue>);
    js_sys::Reflect::set(&window, &"fetch".into(), fake.as_ref()).unwrap();
    fake.forget();
    (called, original)
}

fn restore_fetch(original: JsValue) {
    let window = web_sys::window().unwrap();
    js_sys::Reflect::set(&window, &"fetch".into(), &original).unwrap();
}

#[wasm_bindgen_test]
fn notification_banner_is_created_and_superseded() {
    notify::show("first message", Level::Error);
    let doc = web_sys::window().unwrap().document().unwrap();
    let banner = doc.get_element_by_id("global-notification").unwrap();
    assert_eq!(banner.text_content().unwrap(), "first message");
    assert!(banner.class_list().contains("error"));
    assert!(banner.class_list().contains("show"));

    // a second notification reuses the same element and replaces the level
    notify::show("second message", Level::Success);
    assert_eq!(banner.text_content().unwrap(), "second message");
    assert!(banner.class_list().contains("success"));
    assert!(!banner.class_list().contains("error"));
}

#[wasm_bindgen_test]
fn wishlist_presentation_derives_from_state() {
    let host = mount(
        r#"<button class="add-to-wishlist-btn" data-product-id="42"><i class="far fa-heart"></i></button>"#,
    );
    let btn = host.query_selector("button").unwrap().unwrap();

    wishlist::apply_presentation(&btn, Membership::In);
    assert!(btn.class_list().contains("in-wishlist"));
    let icon = btn.query_selector("i").unwrap().unwrap();
    assert_eq!(icon.class_name(), "fas fa-heart text-danger");
    assert_eq!(btn.get_attribute("title").unwrap(), "Remove from Wishlist");

    wishlist::apply_presentation(&btn, Membership::Pending { prior: true });
    assert_eq!(icon.class_name(), "fas fa-spinner fa-spin");
    // prior membership keeps showing while pending
    assert!(btn.class_list().contains("in-wishlist"));

    wishlist::apply_presentation(&btn, Membership::Out);
    assert!(!btn.class_list().contains("in-wishlist"));
    assert_eq!(icon.class_name(), "far fa-heart");
    assert_eq!(btn.get_attribute("title").unwrap(), "Add to Wishlist");
}

#[wasm_bindgen_test]
async fn cart_click_without_variant_id_sends_nothing_and_shows_error() {
    let host = mount(r#"<button class="add-to-cart-btn">Add to cart</button>"#);
    let btn = host.query_selector("button").unwrap().unwrap();
    let original_label = btn.inner_html();

    let (fetch_called, original_fetch) = stub_fetch();
    let cart = CartController::new();
    cart.handle_click(btn.clone()).await;
    restore_fetch(original_fetch);

    assert!(!fetch_called.get(), "no request may be issued");

    let doc = web_sys::window().unwrap().document().unwrap();
    let banner = doc.get_element_by_id("global-notification").unwrap();
    assert_eq!(banner.text_content().unwrap(), "Invalid product variant");
    assert!(banner.class_list().contains("error"));

    // button untouched: label intact, not left disabled
    assert_eq!(btn.inner_html(), original_label);
    let btn_el: web_sys::HtmlButtonElement = btn.unchecked_into();
    assert!(!btn_el.disabled());

    body().remove_child(&host).unwrap();
}

#[wasm_bindgen_test]
fn login_redirect_carries_current_path_as_return_target() {
    assert_eq!(
        wishlist::login_redirect_target("/products/42/"),
        "/user-login/?next=%2Fproducts%2F42%2F"
    );
    assert_eq!(wishlist::login_redirect_target("/"), "/user-login/?next=%2F");
}

#[wasm_bindgen_test]
async fn superseding_notification_cancels_previous_dismiss_timer() {
    notify::show("first", Level::Info);
    sleep(1_500).await;
    notify::show("second", Level::Success);

    // past the first timer's 3 s deadline: had it survived the
    // supersession it would have cleared the banner by now
    sleep(2_000).await;
    let doc = web_sys::window().unwrap().document().unwrap();
    let banner = doc.get_element_by_id("global-notification").unwrap();
    assert_eq!(banner.text_content().unwrap(), "second");
    assert!(banner.class_list().contains("show"));

    // the second timer still dismisses on its own schedule
    sleep(2_000).await;
    assert!(!banner.class_list().contains("show"));
}

#[wasm_bindgen_test]
fn badge_counts_update_and_hide_at_zero() {
    let host = mount(
        r#"<span class="cart-badge"></span><span class="wishlist-badge"></span>"#,
    );

    cart::update_cart_badges(3);
    let cart_badge = host.query_selector(".cart-badge").unwrap().unwrap();
    assert_eq!(cart_badge.text_content().unwrap(), "3");

    wishlist::update_wishlist_badges(0);
    let wl_badge = host.query_selector(".wishlist-badge").unwrap().unwrap();
    assert_eq!(wl_badge.text_content().unwrap(), "0");
    let style = wl_badge
        .unchecked_ref::<web_sys::HtmlElement>()
        .style()
        .get_property_value("display")
        .unwrap();
    assert_eq!(style, "none");

    body().remove_child(&host).unwrap();
}
