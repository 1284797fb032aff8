use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use orderflow_core::{DomainError, Entity, OrderId, PickupCode};
use orderflow_orders::{Order, OrderLookup, OrderStatus, PickupCodeService};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Internal lock poisoning.
    #[error("order store lock poisoned")]
    Poisoned,

    /// No order carries the pickup code.
    #[error("unknown pickup code: {0}")]
    UnknownPickupCode(PickupCode),

    /// The pickup code already belongs to a different order.
    #[error("pickup code {pickup_code} already belongs to order {owner}")]
    PickupCodeTaken { pickup_code: PickupCode, owner: OrderId },
}

#[derive(Debug, Default)]
struct Tables {
    orders: HashMap<OrderId, Order>,
    pickup_codes: HashMap<PickupCode, OrderId>,
}

/// In-memory order store.
///
/// Intended for tests/dev. Lookups are by id or by pickup code; status changes go
/// through [`InMemoryOrderStore::transition`], which only lands if the stored status
/// still matches the expected one.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    tables: RwLock<Tables>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Result<Self, StoreError> {
        let store = Self::new();
        for order in orders {
            store.upsert(order)?;
        }
        Ok(store)
    }

    /// Insert or replace an order (keyed by its id).
    ///
    /// The pickup-code index follows the stored record: a replaced order's old code
    /// is released. A code still held by another order is refused with
    /// `PickupCodeTaken` and nothing is written.
    pub fn upsert(&self, order: Order) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;

        let key = Entity::id(&order).clone();
        if let Some(code) = order.pickup_code() {
            if let Some(owner) = tables.pickup_codes.get(code).filter(|owner| **owner != key) {
                return Err(StoreError::PickupCodeTaken {
                    pickup_code: code.clone(),
                    owner: owner.clone(),
                });
            }
        }

        let released = tables
            .orders
            .get(&key)
            .and_then(|previous| previous.pickup_code().cloned());
        if let Some(old_code) = released {
            tables.pickup_codes.remove(&old_code);
        }
        if let Some(code) = order.pickup_code() {
            tables.pickup_codes.insert(code.clone(), key.clone());
        }
        tables.orders.insert(key, order);
        Ok(())
    }

    pub fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.orders.get(id).cloned())
    }

    pub fn len(&self) -> usize {
        self.tables.read().map(|t| t.orders.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compare-and-set on status.
    ///
    /// Moves the order to `to` only if it is currently in `from`. At most one of
    /// several concurrent `Pending -> Accepted` transitions for the same id succeeds;
    /// the others get `DomainError::Conflict`.
    pub fn transition(
        &self,
        id: &OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Order, TransitionError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;

        let current = tables.orders.get_mut(id).ok_or_else(DomainError::not_found)?;
        if current.status() != from {
            return Err(DomainError::conflict(format!(
                "order {id} is {} (expected {from})",
                current.status()
            ))
            .into());
        }

        *current = current.with_status(to);
        Ok(current.clone())
    }
}

/// Failure of [`InMemoryOrderStore::transition`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl OrderLookup for InMemoryOrderStore {
    type Error = StoreError;

    fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, Self::Error> {
        self.get(id)
    }
}

impl PickupCodeService for InMemoryOrderStore {
    type Error = StoreError;

    fn find_order_id(&self, pickup_code: &PickupCode) -> Result<OrderId, Self::Error> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        tables
            .pickup_codes
            .get(pickup_code)
            .cloned()
            .ok_or_else(|| StoreError::UnknownPickupCode(pickup_code.clone()))
    }
}
