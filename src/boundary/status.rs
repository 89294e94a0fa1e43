use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::lifecycle;
use crate::error::EngineError;
use crate::models::order::{Actor, Order, OrderEvent, OrderStatus};
use crate::observability::metrics::MetricsSink;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateInput {
    pub order: Order,
    pub target_status: OrderStatus,
    pub actor: Actor,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateOutcome {
    pub order: Order,
    pub event: OrderEvent,
}

/// Applies one guarded status transition (driver accept/reject, arrivals,
/// pickup, delivery, cancellations, refunds).
pub fn update_status(
    input: StatusUpdateInput,
    sink: &dyn MetricsSink,
) -> Result<StatusUpdateOutcome, EngineError> {
    let result = lifecycle::transition(&input.order, input.target_status, input.actor, input.reason);

    match result {
        Ok((order, event)) => {
            sink.status_update("success");
            info!(
                order_id = %order.id,
                status = ?order.status,
                "order status updated"
            );
            Ok(StatusUpdateOutcome { order, event })
        }
        Err(err) => {
            sink.status_update("error");
            warn!(
                order_id = %input.order.id,
                code = err.code(),
                "status update rejected"
            );
            Err(err.into())
        }
    }
}
