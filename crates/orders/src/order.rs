use serde::{Deserialize, Serialize};

use orderflow_core::{Entity, OrderId, PickupCode};

/// Order status lifecycle.
///
/// Only `Pending -> Accepted` is driven from this workspace; the other states are
/// set by whoever owns the order store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Cancelled,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::Cancelled,
        OrderStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Completed => "COMPLETED",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown order status: {s}"))
    }
}

/// An order as held by the order store.
///
/// Immutable value: status changes produce a new `Order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    pickup_code: Option<PickupCode>,
    status: OrderStatus,
}

impl Order {
    pub fn new(id: OrderId, status: OrderStatus) -> Self {
        Self {
            id,
            pickup_code: None,
            status,
        }
    }

    pub fn with_pickup_code(mut self, pickup_code: PickupCode) -> Self {
        self.pickup_code = Some(pickup_code);
        self
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn pickup_code(&self) -> Option<&PickupCode> {
        self.pickup_code.as_ref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, OrderStatus::Pending)
    }

    /// Copy of this order with its status replaced.
    pub fn with_status(&self, status: OrderStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Copy of this order in the `Accepted` state.
    pub fn accepted(&self) -> Self {
        self.with_status(OrderStatus::Accepted)
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Order {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Order(id={}, status={})", self.id, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_id(raw: &str) -> OrderId {
        OrderId::new(raw).unwrap()
    }

    #[test]
    fn accepted_copy_leaves_original_untouched() {
        let pending = Order::new(order_id("o1"), OrderStatus::Pending)
            .with_pickup_code(PickupCode::new("pc-1").unwrap());

        let accepted = pending.accepted();

        assert_eq!(pending.status(), OrderStatus::Pending);
        assert_eq!(accepted.status(), OrderStatus::Accepted);
        assert_eq!(accepted.id(), pending.id());
        assert_eq!(accepted.pickup_code(), pending.pickup_code());
    }

    #[test]
    fn display_matches_log_format() {
        let order = Order::new(order_id("o1"), OrderStatus::Accepted)
            .with_pickup_code(PickupCode::new("pc-1").unwrap());
        assert_eq!(order.to_string(), "Order(id=o1, status=ACCEPTED)");
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!(" CANCELLED ".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn status_serializes_in_screaming_case() {
        let json = serde_json::to_string(&OrderStatus::Accepted).unwrap();
        assert_eq!(json, "\"ACCEPTED\"");
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }

    #[test]
    fn only_pending_is_pending() {
        for status in OrderStatus::ALL {
            let order = Order::new(order_id("o1"), status);
            assert_eq!(order.is_pending(), status == OrderStatus::Pending);
        }
    }
}
