use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::cost::CostBreakdown;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Free-text address as entered by the orderer, with coordinates when the
/// client could geocode them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub text: String,
    pub location: Option<GeoPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetails {
    pub pickup: Address,
    pub dropoff: Address,
    pub muatan_id: Option<String>,
    #[serde(default)]
    pub fasilitas_ids: Vec<String>,
    pub item_quantity: Option<u32>,
    pub notes: Option<String>,
}

/// Everything the orderer submits in a single placement call. Ephemeral:
/// lives only for the duration of that call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub details: OrderDetails,
    pub orderer_wa: String,
    pub receiver_wa: Option<String>,
    pub talangan_amount: Option<f64>,
    #[serde(default)]
    pub is_barang_penting: bool,
}

impl PlacementRequest {
    pub fn talangan_requested(&self) -> f64 {
        self.talangan_amount.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    AcceptedByMitra,
    PendingDriverAssignment,
    DriverAssigned,
    AcceptedByDriver,
    RejectedByDriver,
    DriverAtPickup,
    PickedUp,
    InTransit,
    DriverAtDropoff,
    Delivered,
    CancelledByUser,
    CancelledByMitra,
    CancelledByDriver,
    FailedDelivery,
    Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub service_id: Uuid,
    pub mitra_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub status: OrderStatus,
    pub details: OrderDetails,
    pub orderer_wa: String,
    pub receiver_wa: Option<String>,
    pub talangan_amount: f64,
    pub cost: CostBreakdown,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventType {
    StatusUpdate,
    AssignmentChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorKind {
    User,
    Mitra,
    Driver,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    pub id: Option<String>,
}

impl Actor {
    pub fn system() -> Self {
        Self {
            kind: ActorKind::System,
            id: None,
        }
    }
}

/// Append-only audit record. Exactly one is produced by every accepted
/// status or assignment change; never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    pub id: Uuid,
    pub order_id: Uuid,
    pub event_type: OrderEventType,
    pub payload: serde_json::Value,
    pub actor: Actor,
    pub recorded_at: DateTime<Utc>,
}
