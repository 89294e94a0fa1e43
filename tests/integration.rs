use antaran_engine::boundary::{
    AssignmentInput, PlacementInput, StatusUpdateInput, assign_driver, place_order, update_status,
};
use antaran_engine::engine::zone::KeywordZoneResolver;
use antaran_engine::models::driver::Driver;
use antaran_engine::models::order::{Actor, ActorKind, Order, OrderStatus};
use antaran_engine::observability::metrics::{NoopSink, PrometheusSink};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

const SERVICE_ID: &str = "00000000-0000-0000-0000-00000000000a";
const MITRA_ID: &str = "00000000-0000-0000-0000-00000000000b";

fn per_km_service() -> Value {
    json!({
        "id": SERVICE_ID,
        "mitra_id": MITRA_ID,
        "name": "Antar Cepat",
        "pricing": { "strategy": "PER_KM", "rate_per_km": 5000.0 },
        "admin_fee": 2000.0,
        "talangan_enabled": true,
        "talangan_max_amount": 50000.0,
        "muatan_types": [
            { "id": "dokumen", "label": "Dokumen", "handling_fee": 1000.0 }
        ],
        "fasilitas": [
            { "id": "asuransi", "label": "Asuransi", "fee": 3000.0 }
        ]
    })
}

fn zone_service() -> Value {
    json!({
        "id": SERVICE_ID,
        "mitra_id": MITRA_ID,
        "name": "Antar Zona",
        "pricing": {
            "strategy": "ZONE_PAIR",
            "table": [
                { "origin": "JAKARTA", "destination": "BANDUNG", "price": 90000.0 }
            ]
        },
        "admin_fee": 2000.0
    })
}

fn basic_request() -> Value {
    json!({
        "details": {
            "pickup": {
                "text": "Jl. Sudirman 1, Jakarta",
                "location": { "lat": -6.2088, "lng": 106.8456 }
            },
            "dropoff": {
                "text": "Jl. Asia Afrika 8, Bandung",
                "location": { "lat": -6.9175, "lng": 107.6191 }
            }
        },
        "orderer_wa": "6281200001111"
    })
}

fn placement_input(service: Value, request: Value) -> PlacementInput {
    serde_json::from_value(json!({ "service": service, "request": request }))
        .expect("valid placement input")
}

fn place(service: Value, request: Value) -> antaran_engine::boundary::PlacementOutcome {
    place_order(placement_input(service, request), &KeywordZoneResolver, &NoopSink).unwrap()
}

fn driver_for(order: &Order, active: bool) -> Driver {
    Driver {
        id: Uuid::from_u128(77),
        mitra_id: order.mitra_id,
        name: "Budi".to_string(),
        is_active: active,
        created_at: Utc::now(),
    }
}

fn mitra_actor() -> Actor {
    Actor {
        kind: ActorKind::Mitra,
        id: Some(MITRA_ID.to_string()),
    }
}

#[test]
fn per_km_placement_prices_the_jakarta_bandung_run() {
    let outcome = place(per_km_service(), basic_request());

    assert_eq!(outcome.order.status, OrderStatus::Pending);
    assert!(outcome.order.driver_id.is_none());

    let distance = outcome.cost.meta.distance_km.unwrap();
    assert!((distance - 116.24).abs() < 0.5);
    assert!((outcome.cost.distance_cost - 581_200.0).abs() < 2_500.0);
    assert_eq!(outcome.cost.total, outcome.cost.admin_fee + outcome.cost.distance_cost);
    assert!((outcome.cost.line_sum() - outcome.cost.total).abs() < 1e-6);

    // Exactly one creation event accompanies the order.
    assert_eq!(outcome.event.order_id, outcome.order.id);
    assert_eq!(outcome.event.payload["new_status"], "PENDING");
    assert!(outcome.event.payload["old_status"].is_null());
}

#[test]
fn placement_outcome_serializes_for_the_transport_layer() {
    let outcome = place(per_km_service(), basic_request());

    let body = serde_json::to_value(&outcome).unwrap();
    assert_eq!(body["order"]["status"], "PENDING");
    assert_eq!(body["trust"]["risk_level"], "STANDARD");
    assert_eq!(body["event"]["event_type"], "STATUS_UPDATE");
    assert!(body["cost"]["lines"].as_array().unwrap().len() >= 2);
}

#[test]
fn zone_pair_placement_matches_the_configured_pair() {
    let mut request = basic_request();
    request["details"]["pickup"]["location"] = Value::Null;
    request["details"]["dropoff"]["location"] = Value::Null;

    let outcome = place(zone_service(), request);

    assert_eq!(outcome.cost.zone_cost, 90_000.0);
    assert_eq!(outcome.cost.total, 92_000.0);
    assert_eq!(outcome.cost.meta.origin_zone.as_deref(), Some("JAKARTA"));
}

#[test]
fn placement_without_coordinates_fails_with_tagged_payload() {
    let mut request = basic_request();
    request["details"]["pickup"]["location"] = Value::Null;

    let err = place_order(
        placement_input(per_km_service(), request),
        &KeywordZoneResolver,
        &NoopSink,
    )
    .unwrap_err();

    let payload = err.to_payload();
    assert_eq!(payload["error"]["code"], "MISSING_COORDINATES");
    assert_eq!(payload["error"]["details"]["missing"][0], "pickup");
}

#[test]
fn talangan_order_requires_receiver_and_raises_risk() {
    let mut request = basic_request();
    request["talangan_amount"] = json!(25_000.0);

    let err = place_order(
        placement_input(per_km_service(), request.clone()),
        &KeywordZoneResolver,
        &NoopSink,
    )
    .unwrap_err();
    assert_eq!(err.code(), "RECEIVER_WA_REQUIRED");

    request["receiver_wa"] = json!("081234567890");
    let outcome = place(per_km_service(), request);

    assert!(outcome.trust.receiver_notification_required);
    let notification = outcome.trust.notification.unwrap();
    assert_eq!(notification.wa_number, "6281234567890");
    assert!(notification.deep_link.starts_with("https://wa.me/6281234567890?text="));
    assert_eq!(outcome.order.talangan_amount, 25_000.0);
}

#[test]
fn talangan_above_the_service_limit_is_rejected() {
    let mut request = basic_request();
    request["talangan_amount"] = json!(60_000.0);
    request["receiver_wa"] = json!("081234567890");

    let err = place_order(
        placement_input(per_km_service(), request),
        &KeywordZoneResolver,
        &NoopSink,
    )
    .unwrap_err();

    assert_eq!(err.code(), "TALANGAN_EXCEEDS_LIMIT");
}

#[test]
fn full_lifecycle_from_placement_to_delivery() {
    let outcome = place(per_km_service(), basic_request());
    let service = serde_json::from_value(per_km_service()).unwrap();
    let driver = driver_for(&outcome.order, true);

    let assigned = assign_driver(
        AssignmentInput {
            order: outcome.order,
            driver: driver.clone(),
            service,
            eligible_service_ids: vec![Uuid::parse_str(SERVICE_ID).unwrap()],
            actor: mitra_actor(),
            reason: Some("closest driver on shift".to_string()),
        },
        &NoopSink,
    )
    .unwrap();

    assert_eq!(assigned.order.status, OrderStatus::DriverAssigned);
    assert_eq!(assigned.order.driver_id, Some(driver.id));
    assert_eq!(assigned.event.payload["new_driver_id"], driver.id.to_string());

    let driver_actor = Actor {
        kind: ActorKind::Driver,
        id: Some(driver.id.to_string()),
    };

    let mut order = assigned.order;
    for target in [
        OrderStatus::AcceptedByDriver,
        OrderStatus::DriverAtPickup,
        OrderStatus::PickedUp,
        OrderStatus::InTransit,
        OrderStatus::DriverAtDropoff,
        OrderStatus::Delivered,
    ] {
        let updated = update_status(
            StatusUpdateInput {
                order,
                target_status: target,
                actor: driver_actor.clone(),
                reason: None,
            },
            &NoopSink,
        )
        .unwrap();

        assert_eq!(updated.order.status, target);
        assert_eq!(updated.event.order_id, updated.order.id);
        order = updated.order;
    }
}

#[test]
fn second_assignment_on_the_same_order_conflicts() {
    let outcome = place(per_km_service(), basic_request());
    let service: antaran_engine::models::service::ServiceConfig =
        serde_json::from_value(per_km_service()).unwrap();
    let driver = driver_for(&outcome.order, true);
    let eligible = vec![service.id];

    let input = AssignmentInput {
        order: outcome.order,
        driver,
        service,
        eligible_service_ids: eligible,
        actor: mitra_actor(),
        reason: None,
    };

    let first = assign_driver(input.clone(), &NoopSink).unwrap();

    let retry = AssignmentInput {
        order: first.order,
        ..input
    };
    let err = assign_driver(retry, &NoopSink).unwrap_err();
    assert_eq!(err.code(), "ORDER_NOT_ASSIGNABLE");
}

#[test]
fn inactive_driver_is_rejected_at_the_boundary() {
    let outcome = place(per_km_service(), basic_request());
    let service: antaran_engine::models::service::ServiceConfig =
        serde_json::from_value(per_km_service()).unwrap();
    let driver = driver_for(&outcome.order, false);
    let eligible = vec![service.id];

    let err = assign_driver(
        AssignmentInput {
            order: outcome.order,
            driver,
            service,
            eligible_service_ids: eligible,
            actor: mitra_actor(),
            reason: None,
        },
        &NoopSink,
    )
    .unwrap_err();

    assert_eq!(err.code(), "DRIVER_INACTIVE");
}

#[test]
fn illegal_status_jump_is_rejected_with_details() {
    let outcome = place(per_km_service(), basic_request());

    let err = update_status(
        StatusUpdateInput {
            order: outcome.order,
            target_status: OrderStatus::Delivered,
            actor: mitra_actor(),
            reason: None,
        },
        &NoopSink,
    )
    .unwrap_err();

    let payload = err.to_payload();
    assert_eq!(payload["error"]["code"], "ILLEGAL_TRANSITION");
    assert_eq!(payload["error"]["details"]["from"], "PENDING");
    assert_eq!(payload["error"]["details"]["to"], "DELIVERED");
}

#[test]
fn cancelled_order_can_be_refunded() {
    let outcome = place(per_km_service(), basic_request());
    let user = Actor {
        kind: ActorKind::User,
        id: Some("user-1".to_string()),
    };

    let cancelled = update_status(
        StatusUpdateInput {
            order: outcome.order,
            target_status: OrderStatus::CancelledByUser,
            actor: user.clone(),
            reason: Some("changed my mind".to_string()),
        },
        &NoopSink,
    )
    .unwrap();

    let refunded = update_status(
        StatusUpdateInput {
            order: cancelled.order,
            target_status: OrderStatus::Refunded,
            actor: Actor::system(),
            reason: None,
        },
        &NoopSink,
    )
    .unwrap();

    assert_eq!(refunded.order.status, OrderStatus::Refunded);
}

#[test]
fn boundary_outcomes_are_counted_per_result() {
    let sink = PrometheusSink::new();

    place_order(
        placement_input(per_km_service(), basic_request()),
        &KeywordZoneResolver,
        &sink,
    )
    .unwrap();

    let mut bad_request = basic_request();
    bad_request["details"]["pickup"]["location"] = Value::Null;
    let _ = place_order(
        placement_input(per_km_service(), bad_request),
        &KeywordZoneResolver,
        &sink,
    );

    let exported = sink.encode().unwrap();
    assert!(exported.contains("order_placements_total{outcome=\"success\"} 1"));
    assert!(exported.contains("order_placements_total{outcome=\"error\"} 1"));
}
