use serde_json::{Value, json};
use thiserror::Error;

use crate::models::order::OrderStatus;

/// Coordinate validation failures from the distance calculator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("invalid coordinate: {axis} = {value}")]
    InvalidCoordinate { axis: &'static str, value: f64 },
}

impl GeoError {
    pub fn code(&self) -> &'static str {
        match self {
            GeoError::InvalidCoordinate { .. } => "INVALID_COORDINATE",
        }
    }

    pub fn details(&self) -> Value {
        match self {
            GeoError::InvalidCoordinate { axis, value } => json!({
                "axis": axis,
                "value": value,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostCalculationError {
    #[error("invalid pricing config: {message}")]
    InvalidPricingConfig { message: String },

    #[error("coordinates missing for distance-based pricing")]
    MissingCoordinates { missing: Vec<String> },

    #[error("distance {distance_km:.2} km exceeds coverage limit {limit_km:.2} km")]
    DistanceExceedsCoverage { distance_km: f64, limit_km: f64 },

    #[error("no zone price configured for {origin_zone} -> {destination_zone}")]
    ZonePriceNotFound {
        origin_zone: String,
        destination_zone: String,
        configured_pairs: Vec<String>,
    },

    #[error("muatan {muatan_id} is not offered by this service")]
    InvalidMuatanSelection { muatan_id: String },

    #[error("fasilitas {fasilitas_id} is not offered by this service")]
    InvalidFasilitasSelection { fasilitas_id: String },

    #[error("talangan requested but the service does not offer it")]
    TalanganNotEnabled { requested: f64 },

    #[error("talangan {requested} exceeds the service limit {max_amount}")]
    TalanganExceedsLimit { requested: f64, max_amount: f64 },
}

impl CostCalculationError {
    pub fn code(&self) -> &'static str {
        match self {
            CostCalculationError::InvalidPricingConfig { .. } => "INVALID_PRICING_CONFIG",
            CostCalculationError::MissingCoordinates { .. } => "MISSING_COORDINATES",
            CostCalculationError::DistanceExceedsCoverage { .. } => "DISTANCE_EXCEEDS_COVERAGE",
            CostCalculationError::ZonePriceNotFound { .. } => "ZONE_PRICE_NOT_FOUND",
            CostCalculationError::InvalidMuatanSelection { .. } => "INVALID_MUATAN_SELECTION",
            CostCalculationError::InvalidFasilitasSelection { .. } => "INVALID_FASILITAS_SELECTION",
            CostCalculationError::TalanganNotEnabled { .. } => "TALANGAN_NOT_ENABLED",
            CostCalculationError::TalanganExceedsLimit { .. } => "TALANGAN_EXCEEDS_LIMIT",
        }
    }

    pub fn details(&self) -> Value {
        match self {
            CostCalculationError::InvalidPricingConfig { message } => json!({
                "message": message,
            }),
            CostCalculationError::MissingCoordinates { missing } => json!({
                "missing": missing,
            }),
            CostCalculationError::DistanceExceedsCoverage {
                distance_km,
                limit_km,
            } => json!({
                "distance_km": distance_km,
                "limit_km": limit_km,
            }),
            CostCalculationError::ZonePriceNotFound {
                origin_zone,
                destination_zone,
                configured_pairs,
            } => json!({
                "origin_zone": origin_zone,
                "destination_zone": destination_zone,
                "configured_pairs": configured_pairs,
            }),
            CostCalculationError::InvalidMuatanSelection { muatan_id } => json!({
                "muatan_id": muatan_id,
            }),
            CostCalculationError::InvalidFasilitasSelection { fasilitas_id } => json!({
                "fasilitas_id": fasilitas_id,
            }),
            CostCalculationError::TalanganNotEnabled { requested } => json!({
                "requested": requested,
            }),
            CostCalculationError::TalanganExceedsLimit {
                requested,
                max_amount,
            } => json!({
                "requested": requested,
                "max_amount": max_amount,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrustMechanismError {
    #[error("receiver WhatsApp number is required for this order")]
    ReceiverWaRequired,

    #[error("receiver WhatsApp number is present but unusable: {supplied}")]
    MissingReceiverWa { supplied: String },
}

impl TrustMechanismError {
    pub fn code(&self) -> &'static str {
        match self {
            TrustMechanismError::ReceiverWaRequired => "RECEIVER_WA_REQUIRED",
            TrustMechanismError::MissingReceiverWa { .. } => "MISSING_RECEIVER_WA",
        }
    }

    pub fn details(&self) -> Value {
        match self {
            TrustMechanismError::ReceiverWaRequired => json!({}),
            TrustMechanismError::MissingReceiverWa { supplied } => json!({
                "supplied": supplied,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderStatusError {
    #[error("illegal transition {from:?} -> {to:?}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },
}

impl OrderStatusError {
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatusError::IllegalTransition { .. } => "ILLEGAL_TRANSITION",
        }
    }

    pub fn details(&self) -> Value {
        match self {
            OrderStatusError::IllegalTransition { from, to } => json!({
                "from": from,
                "to": to,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DriverAssignmentError {
    #[error("order in status {status:?} is not assignable")]
    OrderNotAssignable { status: OrderStatus },

    #[error("driver belongs to a different mitra")]
    DriverWrongMitra,

    #[error("driver is inactive")]
    DriverInactive,

    #[error("driver is not qualified for this service")]
    DriverNotEligible,
}

impl DriverAssignmentError {
    pub fn code(&self) -> &'static str {
        match self {
            DriverAssignmentError::OrderNotAssignable { .. } => "ORDER_NOT_ASSIGNABLE",
            DriverAssignmentError::DriverWrongMitra => "DRIVER_WRONG_MITRA",
            DriverAssignmentError::DriverInactive => "DRIVER_INACTIVE",
            DriverAssignmentError::DriverNotEligible => "DRIVER_NOT_ELIGIBLE",
        }
    }

    /// CONFLICT-class: the order exists but is no longer in a state that
    /// accepts an assignment.
    pub fn is_conflict(&self) -> bool {
        matches!(self, DriverAssignmentError::OrderNotAssignable { .. })
    }

    pub fn details(&self) -> Value {
        match self {
            DriverAssignmentError::OrderNotAssignable { status } => json!({
                "status": status,
            }),
            _ => json!({}),
        }
    }
}

/// Service-config authoring failures, raised once when a Mitra saves the
/// config rather than on every order.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("per-km rate must be a positive number, got {rate_per_km}")]
    InvalidPerKmRate { rate_per_km: f64 },

    #[error("zone-pair pricing requires at least one zone price")]
    EmptyZoneTable,

    #[error("zone names cannot be blank")]
    BlankZoneName,

    #[error("{field} cannot be negative, got {amount}")]
    NegativeFee { field: String, amount: f64 },

    #[error("coverage radius must be a positive number, got {radius_km}")]
    InvalidCoverageRadius { radius_km: f64 },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidPerKmRate { .. } => "INVALID_PER_KM_RATE",
            ConfigError::EmptyZoneTable => "EMPTY_ZONE_TABLE",
            ConfigError::BlankZoneName => "BLANK_ZONE_NAME",
            ConfigError::NegativeFee { .. } => "NEGATIVE_FEE",
            ConfigError::InvalidCoverageRadius { .. } => "INVALID_COVERAGE_RADIUS",
        }
    }
}

/// Single tagged failure surfaced at the boundary. Callers are expected to
/// branch on `code()` rather than pattern-match the inner enums.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error(transparent)]
    Cost(#[from] CostCalculationError),

    #[error(transparent)]
    Trust(#[from] TrustMechanismError),

    #[error(transparent)]
    Status(#[from] OrderStatusError),

    #[error(transparent)]
    Assignment(#[from] DriverAssignmentError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Geo(err) => err.code(),
            EngineError::Cost(err) => err.code(),
            EngineError::Trust(err) => err.code(),
            EngineError::Status(err) => err.code(),
            EngineError::Assignment(err) => err.code(),
            EngineError::Config(err) => err.code(),
        }
    }

    /// JSON shape handed to the transport layer, which maps it onto its own
    /// status codes.
    pub fn to_payload(&self) -> Value {
        let details = match self {
            EngineError::Geo(err) => err.details(),
            EngineError::Cost(err) => err.details(),
            EngineError::Trust(err) => err.details(),
            EngineError::Status(err) => err.details(),
            EngineError::Assignment(err) => err.details(),
            EngineError::Config(_) => json!({}),
        };

        json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "details": details,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CostCalculationError, EngineError};

    #[test]
    fn boundary_payload_carries_code_and_details() {
        let err = EngineError::from(CostCalculationError::DistanceExceedsCoverage {
            distance_km: 42.5,
            limit_km: 30.0,
        });

        let payload = err.to_payload();
        assert_eq!(payload["error"]["code"], "DISTANCE_EXCEEDS_COVERAGE");
        assert_eq!(payload["error"]["details"]["distance_km"], 42.5);
        assert_eq!(payload["error"]["details"]["limit_km"], 30.0);
    }
}
