use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::error::{DriverAssignmentError, OrderStatusError};
use crate::models::driver::Driver;
use crate::models::order::{Actor, Order, OrderEvent, OrderEventType, OrderStatus};
use crate::models::service::ServiceConfig;

use crate::models::order::OrderStatus::*;

/// Statuses from which a driver may be (re)assigned.
pub const ASSIGNABLE_STATUSES: [OrderStatus; 4] = [
    Pending,
    AcceptedByMitra,
    PendingDriverAssignment,
    RejectedByDriver,
];

pub fn assignable(status: OrderStatus) -> bool {
    ASSIGNABLE_STATUSES.contains(&status)
}

/// Legal single-step transitions for the status-update operations.
/// `DriverAssigned` never appears as a target here: the assignment operation
/// is the only path into it.
pub fn allowed_transitions(from: OrderStatus) -> &'static [OrderStatus] {
    match from {
        Pending => &[AcceptedByMitra, CancelledByUser, CancelledByMitra],
        AcceptedByMitra => &[PendingDriverAssignment, CancelledByUser, CancelledByMitra],
        PendingDriverAssignment => &[CancelledByUser, CancelledByMitra],
        DriverAssigned => &[
            AcceptedByDriver,
            RejectedByDriver,
            CancelledByUser,
            CancelledByMitra,
        ],
        RejectedByDriver => &[CancelledByUser, CancelledByMitra],
        AcceptedByDriver => &[
            DriverAtPickup,
            CancelledByUser,
            CancelledByMitra,
            CancelledByDriver,
        ],
        DriverAtPickup => &[PickedUp, CancelledByUser, CancelledByDriver],
        PickedUp => &[InTransit, CancelledByDriver],
        InTransit => &[DriverAtDropoff, FailedDelivery],
        DriverAtDropoff => &[Delivered, FailedDelivery],
        CancelledByUser | CancelledByMitra | CancelledByDriver | FailedDelivery => &[Refunded],
        Delivered | Refunded => &[],
    }
}

pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

/// Guarded single-step status change. On success returns the updated order
/// together with the one STATUS_UPDATE event to append; on failure the order
/// is untouched and no event exists.
pub fn transition(
    order: &Order,
    target: OrderStatus,
    actor: Actor,
    reason: Option<String>,
) -> Result<(Order, OrderEvent), OrderStatusError> {
    if !can_transition(order.status, target) {
        return Err(OrderStatusError::IllegalTransition {
            from: order.status,
            to: target,
        });
    }

    let now = Utc::now();
    let mut updated = order.clone();
    updated.status = target;
    updated.updated_at = now;

    let event = OrderEvent {
        id: Uuid::new_v4(),
        order_id: order.id,
        event_type: OrderEventType::StatusUpdate,
        payload: json!({
            "old_status": order.status,
            "new_status": target,
            "reason": reason,
        }),
        actor,
        recorded_at: now,
    };

    Ok((updated, event))
}

/// Assigns (or explicitly re-assigns) a driver. Preconditions are checked in
/// a fixed order; the caller supplies the driver's service eligibility as a
/// plain list of service ids.
pub fn assign_driver(
    order: &Order,
    driver: &Driver,
    service: &ServiceConfig,
    eligible_service_ids: &[Uuid],
    actor: Actor,
    reason: Option<String>,
) -> Result<(Order, OrderEvent), DriverAssignmentError> {
    if !assignable(order.status) {
        return Err(DriverAssignmentError::OrderNotAssignable {
            status: order.status,
        });
    }

    if driver.mitra_id != order.mitra_id {
        return Err(DriverAssignmentError::DriverWrongMitra);
    }

    if !driver.is_active {
        return Err(DriverAssignmentError::DriverInactive);
    }

    if !eligible_service_ids.contains(&service.id) {
        return Err(DriverAssignmentError::DriverNotEligible);
    }

    let now = Utc::now();
    let mut updated = order.clone();
    updated.status = DriverAssigned;
    updated.driver_id = Some(driver.id);
    updated.updated_at = now;

    let event = OrderEvent {
        id: Uuid::new_v4(),
        order_id: order.id,
        event_type: OrderEventType::AssignmentChanged,
        payload: json!({
            "old_driver_id": order.driver_id,
            "new_driver_id": driver.id,
            "reason": reason,
        }),
        actor,
        recorded_at: now,
    };

    Ok((updated, event))
}
