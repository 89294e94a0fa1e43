use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::lifecycle;
use crate::error::EngineError;
use crate::models::driver::Driver;
use crate::models::order::{Actor, Order, OrderEvent};
use crate::models::service::ServiceConfig;
use crate::observability::metrics::MetricsSink;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentInput {
    pub order: Order,
    pub driver: Driver,
    pub service: ServiceConfig,
    pub eligible_service_ids: Vec<Uuid>,
    pub actor: Actor,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub order: Order,
    pub event: OrderEvent,
}

/// Validates and applies one driver assignment. The at-most-one-assignment
/// guarantee is the caller's conditional write on the returned order.
pub fn assign_driver(
    input: AssignmentInput,
    sink: &dyn MetricsSink,
) -> Result<AssignmentOutcome, EngineError> {
    let result = lifecycle::assign_driver(
        &input.order,
        &input.driver,
        &input.service,
        &input.eligible_service_ids,
        input.actor,
        input.reason,
    );

    match result {
        Ok((order, event)) => {
            sink.assignment("success");
            info!(
                order_id = %order.id,
                driver_id = %input.driver.id,
                "driver assigned"
            );
            Ok(AssignmentOutcome { order, event })
        }
        Err(err) => {
            sink.assignment("error");
            warn!(
                order_id = %input.order.id,
                driver_id = %input.driver.id,
                code = err.code(),
                "driver assignment rejected"
            );
            Err(err.into())
        }
    }
}
