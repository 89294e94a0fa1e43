use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingMethod {
    PerKm,
    ZonePair,
}

/// One rendered line in the itemized breakdown shown to the orderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostLine {
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostMeta {
    pub method: PricingMethod,
    pub distance_km: Option<f64>,
    pub origin_zone: Option<String>,
    pub destination_zone: Option<String>,
    pub item_count: Option<u32>,
}

/// Full cost picture for one order. Computed once at placement and never
/// recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub admin_fee: f64,
    pub distance_cost: f64,
    pub zone_cost: f64,
    pub per_item_cost: f64,
    pub muatan_fee: f64,
    pub fasilitas_fee: f64,
    pub lines: Vec<CostLine>,
    pub subtotal: f64,
    pub total: f64,
    pub meta: CostMeta,
}

impl CostBreakdown {
    pub fn field_sum(&self) -> f64 {
        self.admin_fee
            + self.distance_cost
            + self.zone_cost
            + self.per_item_cost
            + self.muatan_fee
            + self.fasilitas_fee
    }

    pub fn line_sum(&self) -> f64 {
        self.lines.iter().map(|line| line.amount).sum()
    }
}
