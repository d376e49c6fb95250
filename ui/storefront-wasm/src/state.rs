//! Application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Wishlist membership is tracked here as explicit state per product id;
//! button classes and icons are derived from it, never read back from the
//! DOM after seeding.

use std::cell::RefCell;
use std::collections::HashMap;

/// Wishlist membership of one product, as known to this page.
///
/// `Pending` remembers the membership the product had when the request was
/// issued so a failed request can revert to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Membership {
    Out,
    In,
    Pending { prior: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WishlistAction {
    Add,
    Remove,
}

impl Membership {
    /// Transition taken when the user clicks the toggle. `None` while a
    /// request is already in flight.
    pub fn on_click(self) -> Option<(Membership, WishlistAction)> {
        match self {
            Membership::Out => Some((Membership::Pending { prior: false }, WishlistAction::Add)),
            Membership::In => Some((Membership::Pending { prior: true }, WishlistAction::Remove)),
            Membership::Pending { .. } => None,
        }
    }

    /// Settle a pending transition: success lands on the opposite side,
    /// failure reverts to the prior membership.
    pub fn resolved(self, success: bool) -> Membership {
        match self {
            Membership::Pending { prior } => {
                let now_in = if success { !prior } else { prior };
                if now_in {
                    Membership::In
                } else {
                    Membership::Out
                }
            }
            settled => settled,
        }
    }

    /// Whether the `in-wishlist` presentation class applies. While pending
    /// the prior membership keeps showing, as the outcome is unknown.
    pub fn in_wishlist(self) -> bool {
        match self {
            Membership::In => true,
            Membership::Out => false,
            Membership::Pending { prior } => prior,
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Membership::Pending { .. })
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub wishlist: HashMap<String, Membership>,
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

pub fn membership(product_id: &str) -> Option<Membership> {
    with(|s| s.wishlist.get(product_id).copied())
}

pub fn set_membership(product_id: &str, m: Membership) {
    with_mut(|s| {
        s.wishlist.insert(product_id.to_string(), m);
    });
}

/// Record initial membership for a product, without clobbering state the
/// controller already tracks.
pub fn seed_membership(product_id: &str, in_wishlist: bool) {
    with_mut(|s| {
        s.wishlist
            .entry(product_id.to_string())
            .or_insert(if in_wishlist {
                Membership::In
            } else {
                Membership::Out
            });
    });
}
