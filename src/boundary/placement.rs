use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::zone::ZoneResolver;
use crate::engine::{cost, trust};
use crate::error::EngineError;
use crate::models::cost::CostBreakdown;
use crate::models::order::{
    Actor, Order, OrderEvent, OrderEventType, OrderStatus, PlacementRequest,
};
use crate::models::service::ServiceConfig;
use crate::models::trust::TrustEvaluation;
use crate::observability::metrics::MetricsSink;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementInput {
    pub service: ServiceConfig,
    pub request: PlacementRequest,
}

/// The order, its first audit event, and the derived artifacts. The caller
/// persists order + event in one atomic write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub order: Order,
    pub cost: CostBreakdown,
    pub trust: TrustEvaluation,
    pub event: OrderEvent,
}

/// Runs the full placement pipeline: talangan validation, cost calculation,
/// trust evaluation, then order construction in PENDING.
pub fn place_order(
    input: PlacementInput,
    resolver: &dyn ZoneResolver,
    sink: &dyn MetricsSink,
) -> Result<PlacementOutcome, EngineError> {
    match run_placement(input, resolver) {
        Ok(outcome) => {
            sink.placement("success");
            info!(
                order_id = %outcome.order.id,
                total = outcome.cost.total,
                risk_level = ?outcome.trust.risk_level,
                "order placed"
            );
            Ok(outcome)
        }
        Err(err) => {
            sink.placement("error");
            warn!(code = err.code(), "order placement rejected");
            Err(err)
        }
    }
}

fn run_placement(
    input: PlacementInput,
    resolver: &dyn ZoneResolver,
) -> Result<PlacementOutcome, EngineError> {
    let PlacementInput { service, request } = input;
    let order_id = Uuid::new_v4();

    cost::validate_talangan(&service, request.talangan_requested())?;
    let breakdown = cost::compute_cost(&service, &request.details, resolver)?;
    let evaluation = trust::evaluate_trust(&service, &request, order_id)?;

    let now = Utc::now();
    let talangan_amount = request.talangan_requested();
    let order = Order {
        id: order_id,
        service_id: service.id,
        mitra_id: service.mitra_id,
        driver_id: None,
        status: OrderStatus::Pending,
        details: request.details,
        orderer_wa: request.orderer_wa,
        receiver_wa: request.receiver_wa,
        talangan_amount,
        cost: breakdown.clone(),
        created_at: now,
        updated_at: now,
    };

    let event = OrderEvent {
        id: Uuid::new_v4(),
        order_id,
        event_type: OrderEventType::StatusUpdate,
        payload: json!({
            "old_status": null,
            "new_status": OrderStatus::Pending,
            "reason": "order placed",
            "risk_level": evaluation.risk_level,
        }),
        actor: Actor::system(),
        recorded_at: now,
    };

    Ok(PlacementOutcome {
        order,
        cost: breakdown,
        trust: evaluation,
        event,
    })
}
