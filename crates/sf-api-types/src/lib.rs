//! Shared JSON payload types for the storefront backend API.
//!
//! Mirrors the wire contract of the cart and wishlist endpoints. Kept free of
//! any browser types so the storefront UI and tests can share them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariantId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductId(pub String);

/// Response of `POST /cart/add/{variantId}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartAddResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cart_total_items: Option<u64>,
    #[serde(default)]
    pub item_quantity: Option<u64>,
    #[serde(default)]
    pub variant_id: Option<String>,
}

/// Response of `GET /cart/count/` and `GET /wishlist/count/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeCountResponse {
    pub count: u64,
}

/// Response of `POST /wishlist/add/{productId}/` and
/// `POST /wishlist/remove/{itemId}/`.
///
/// The backend reports the new total under either `wishlist_total_items` or
/// `wishlist_count` depending on the endpoint; both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistMutationResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub wishlist_total_items: Option<u64>,
    #[serde(default)]
    pub wishlist_count: Option<u64>,
}

impl WishlistMutationResponse {
    /// New wishlist total, whichever field the backend chose to send.
    pub fn total_items(&self) -> Option<u64> {
        self.wishlist_total_items.or(self.wishlist_count)
    }
}

/// Response of `GET /wishlist/get-item-id/{productId}/`.
///
/// `item_id` is absent (or null) when the product is no longer in the
/// wishlist, e.g. it was removed from another tab between render and click.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItemLookupResponse {
    #[serde(default)]
    pub item_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_newtypes_are_plain_json_strings() {
        // ids travel as bare strings in URLs and data attributes
        let v: VariantId = serde_json::from_str(r#""17""#).unwrap();
        assert_eq!(v, VariantId("17".into()));
        assert_eq!(
            serde_json::to_string(&ProductId("42".into())).unwrap(),
            r#""42""#
        );
    }

    #[test]
    fn cart_add_response_tolerates_missing_optionals() {
        let r: CartAddResponse =
            serde_json::from_str(r#"{"success":true,"message":"Added to cart"}"#).unwrap();
        assert!(r.success);
        assert_eq!(r.message.as_deref(), Some("Added to cart"));
        assert_eq!(r.cart_total_items, None);
        assert_eq!(r.item_quantity, None);
    }

    #[test]
    fn cart_add_response_full_payload() {
        let r: CartAddResponse = serde_json::from_str(
            r#"{"success":true,"message":"ok","cart_total_items":4,"item_quantity":2,"variant_id":"17"}"#,
        )
        .unwrap();
        assert_eq!(r.cart_total_items, Some(4));
        assert_eq!(r.item_quantity, Some(2));
        assert_eq!(r.variant_id.as_deref(), Some("17"));
    }

    #[test]
    fn wishlist_total_prefers_total_items_field() {
        let r: WishlistMutationResponse = serde_json::from_str(
            r#"{"success":true,"wishlist_total_items":3,"wishlist_count":9}"#,
        )
        .unwrap();
        assert_eq!(r.total_items(), Some(3));
    }

    #[test]
    fn wishlist_total_falls_back_to_count_field() {
        let r: WishlistMutationResponse =
            serde_json::from_str(r#"{"success":true,"wishlist_count":5}"#).unwrap();
        assert_eq!(r.total_items(), Some(5));
    }

    #[test]
    fn wishlist_total_absent_when_backend_sends_neither() {
        let r: WishlistMutationResponse =
            serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(r.total_items(), None);
    }

    #[test]
    fn item_lookup_handles_null_and_missing_id() {
        let r: WishlistItemLookupResponse =
            serde_json::from_str(r#"{"item_id":null}"#).unwrap();
        assert_eq!(r.item_id, None);
        let r: WishlistItemLookupResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(r.item_id, None);
        let r: WishlistItemLookupResponse =
            serde_json::from_str(r#"{"item_id":42}"#).unwrap();
        assert_eq!(r.item_id, Some(42));
    }
}
