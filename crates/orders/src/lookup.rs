//! Read-side ports the acceptance workflow depends on.

use std::sync::Arc;

use orderflow_core::{OrderId, PickupCode};

use crate::order::Order;

/// Looks orders up by identifier.
///
/// `Ok(None)` means "no such order" and is a normal answer. `Err` is reserved for
/// technical failures (store unreachable, poisoned lock, ...), so callers can tell
/// the two apart.
pub trait OrderLookup: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, Self::Error>;
}

/// Resolves a customer-facing pickup code to the order it belongs to.
pub trait PickupCodeService: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn find_order_id(&self, pickup_code: &PickupCode) -> Result<OrderId, Self::Error>;
}

impl<L> OrderLookup for Arc<L>
where
    L: OrderLookup + ?Sized,
{
    type Error = L::Error;

    fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, Self::Error> {
        (**self).find_by_id(id)
    }
}

impl<S> PickupCodeService for Arc<S>
where
    S: PickupCodeService + ?Sized,
{
    type Error = S::Error;

    fn find_order_id(&self, pickup_code: &PickupCode) -> Result<OrderId, Self::Error> {
        (**self).find_order_id(pickup_code)
    }
}
