use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ConfigError;

/// A fixed price for one ordered origin -> destination zone pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZonePrice {
    pub origin: String,
    pub destination: String,
    pub price: f64,
}

/// Closed union over the supported pricing strategies. Validated once when a
/// Mitra saves the service, not re-validated per order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingScheme {
    PerKm { rate_per_km: f64 },
    ZonePair { table: Vec<ZonePrice> },
}

/// A cargo type the service is willing to carry, with its handling surcharge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuatanType {
    pub id: String,
    pub label: String,
    pub handling_fee: f64,
}

/// An optional facility the orderer can add (cool box, helper, insurance...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fasilitas {
    pub id: String,
    pub label: String,
    pub fee: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub id: Uuid,
    pub mitra_id: Uuid,
    pub name: String,
    pub pricing: PricingScheme,
    pub admin_fee: f64,
    pub coverage_radius_km: Option<f64>,
    pub per_item_rate: Option<f64>,
    #[serde(default)]
    pub muatan_types: Vec<MuatanType>,
    #[serde(default)]
    pub fasilitas: Vec<Fasilitas>,
    #[serde(default)]
    pub talangan_enabled: bool,
    #[serde(default)]
    pub talangan_max_amount: f64,
    #[serde(default)]
    pub default_barang_penting: bool,
}

impl ServiceConfig {
    /// Boundary validation run when a Mitra authors or edits the service.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.pricing {
            PricingScheme::PerKm { rate_per_km } => {
                if *rate_per_km <= 0.0 || !rate_per_km.is_finite() {
                    return Err(ConfigError::InvalidPerKmRate {
                        rate_per_km: *rate_per_km,
                    });
                }
            }
            PricingScheme::ZonePair { table } => {
                if table.is_empty() {
                    return Err(ConfigError::EmptyZoneTable);
                }
                for entry in table {
                    if entry.origin.trim().is_empty() || entry.destination.trim().is_empty() {
                        return Err(ConfigError::BlankZoneName);
                    }
                    if entry.price < 0.0 || !entry.price.is_finite() {
                        return Err(ConfigError::NegativeFee {
                            field: "zone price".to_string(),
                            amount: entry.price,
                        });
                    }
                }
            }
        }

        for (field, amount) in self.fee_fields() {
            if amount < 0.0 || !amount.is_finite() {
                return Err(ConfigError::NegativeFee {
                    field: field.to_string(),
                    amount,
                });
            }
        }

        if let Some(radius) = self.coverage_radius_km {
            if radius <= 0.0 || !radius.is_finite() {
                return Err(ConfigError::InvalidCoverageRadius { radius_km: radius });
            }
        }

        Ok(())
    }

    pub fn muatan(&self, id: &str) -> Option<&MuatanType> {
        self.muatan_types.iter().find(|m| m.id == id)
    }

    pub fn fasilitas_by_id(&self, id: &str) -> Option<&Fasilitas> {
        self.fasilitas.iter().find(|f| f.id == id)
    }

    fn fee_fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![
            ("admin_fee", self.admin_fee),
            ("talangan_max_amount", self.talangan_max_amount),
        ];
        if let Some(rate) = self.per_item_rate {
            fields.push(("per_item_rate", rate));
        }
        fields.extend(self.muatan_types.iter().map(|m| ("handling_fee", m.handling_fee)));
        fields.extend(self.fasilitas.iter().map(|f| ("fasilitas fee", f.fee)));
        fields
    }
}
