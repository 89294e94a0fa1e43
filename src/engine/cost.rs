use crate::engine::zone::ZoneResolver;
use crate::error::CostCalculationError;
use crate::geo;
use crate::models::cost::{CostBreakdown, CostLine, CostMeta, PricingMethod};
use crate::models::order::OrderDetails;
use crate::models::service::{PricingScheme, ServiceConfig};

/// Applies a service's pricing configuration to one order. Deterministic and
/// side-effect free: the same config and details always produce the same
/// breakdown.
pub fn compute_cost(
    config: &ServiceConfig,
    details: &OrderDetails,
    resolver: &dyn ZoneResolver,
) -> Result<CostBreakdown, CostCalculationError> {
    let mut lines = Vec::new();

    let admin_fee = config.admin_fee;
    push_line(&mut lines, "Biaya admin".to_string(), admin_fee);

    let mut distance_cost = 0.0;
    let mut zone_cost = 0.0;
    let mut meta = CostMeta {
        method: PricingMethod::PerKm,
        distance_km: None,
        origin_zone: None,
        destination_zone: None,
        item_count: None,
    };

    match &config.pricing {
        PricingScheme::PerKm { rate_per_km } => {
            if *rate_per_km <= 0.0 || !rate_per_km.is_finite() {
                return Err(CostCalculationError::InvalidPricingConfig {
                    message: "per-km pricing selected but no usable rate configured".to_string(),
                });
            }

            let distance_km = resolve_distance(details)?;

            if let Some(limit_km) = config.coverage_radius_km {
                // Raw distance against the limit, not the cost. Boundary is
                // inclusive: distance == limit still ships.
                if distance_km > limit_km {
                    return Err(CostCalculationError::DistanceExceedsCoverage {
                        distance_km,
                        limit_km,
                    });
                }
            }

            distance_cost = distance_km * rate_per_km;
            meta.distance_km = Some(distance_km);
            push_line(
                &mut lines,
                format!("Biaya jarak {distance_km:.2} km"),
                distance_cost,
            );
        }
        PricingScheme::ZonePair { table } => {
            meta.method = PricingMethod::ZonePair;

            if table.is_empty() {
                return Err(CostCalculationError::InvalidPricingConfig {
                    message: "zone-pair pricing selected but the zone table is empty".to_string(),
                });
            }

            let origin_zone = resolver.zone_of(&details.pickup.text);
            let destination_zone = resolver.zone_of(&details.dropoff.text);

            let entry = table.iter().find(|entry| {
                entry.origin.eq_ignore_ascii_case(&origin_zone)
                    && entry.destination.eq_ignore_ascii_case(&destination_zone)
            });

            let Some(entry) = entry else {
                return Err(CostCalculationError::ZonePriceNotFound {
                    configured_pairs: table
                        .iter()
                        .map(|e| format!("{} -> {}", e.origin, e.destination))
                        .collect(),
                    origin_zone,
                    destination_zone,
                });
            };

            zone_cost = entry.price;
            push_line(
                &mut lines,
                format!("Tarif zona {origin_zone} -> {destination_zone}"),
                zone_cost,
            );
            meta.origin_zone = Some(origin_zone);
            meta.destination_zone = Some(destination_zone);
        }
    }

    let mut per_item_cost = 0.0;
    if let Some(rate) = config.per_item_rate {
        let quantity = details.item_quantity.unwrap_or(1);
        per_item_cost = f64::from(quantity) * rate;
        meta.item_count = Some(quantity);
        push_line(
            &mut lines,
            format!("Biaya per item x{quantity}"),
            per_item_cost,
        );
    }

    let mut muatan_fee = 0.0;
    if let Some(muatan_id) = &details.muatan_id {
        let Some(muatan) = config.muatan(muatan_id) else {
            return Err(CostCalculationError::InvalidMuatanSelection {
                muatan_id: muatan_id.clone(),
            });
        };
        muatan_fee = muatan.handling_fee;
        push_line(
            &mut lines,
            format!("Penanganan muatan: {}", muatan.label),
            muatan_fee,
        );
    }

    let mut fasilitas_fee = 0.0;
    for fasilitas_id in &details.fasilitas_ids {
        let Some(fasilitas) = config.fasilitas_by_id(fasilitas_id) else {
            return Err(CostCalculationError::InvalidFasilitasSelection {
                fasilitas_id: fasilitas_id.clone(),
            });
        };
        fasilitas_fee += fasilitas.fee;
        push_line(
            &mut lines,
            format!("Fasilitas: {}", fasilitas.label),
            fasilitas.fee,
        );
    }

    // No tax or discount stage: subtotal and total are the same number.
    let total = admin_fee + distance_cost + zone_cost + per_item_cost + muatan_fee + fasilitas_fee;

    Ok(CostBreakdown {
        admin_fee,
        distance_cost,
        zone_cost,
        per_item_cost,
        muatan_fee,
        fasilitas_fee,
        lines,
        subtotal: total,
        total,
        meta,
    })
}

// Rules that do not apply contribute no line.
fn push_line(lines: &mut Vec<CostLine>, description: String, amount: f64) {
    if amount > 0.0 {
        lines.push(CostLine {
            description,
            amount,
        });
    }
}

fn resolve_distance(details: &OrderDetails) -> Result<f64, CostCalculationError> {
    match geo::order_distance(&details.pickup, &details.dropoff) {
        Ok(Some(distance_km)) => Ok(distance_km),
        Ok(None) => {
            let mut missing = Vec::new();
            if details.pickup.location.is_none() {
                missing.push("pickup".to_string());
            }
            if details.dropoff.location.is_none() {
                missing.push("dropoff".to_string());
            }
            Err(CostCalculationError::MissingCoordinates { missing })
        }
        Err(err) => Err(CostCalculationError::MissingCoordinates {
            missing: vec![err.to_string()],
        }),
    }
}

/// Checks a requested talangan (advance payment) against the service's
/// feature flag and limit. A zero or absent request always passes.
pub fn validate_talangan(
    config: &ServiceConfig,
    requested: f64,
) -> Result<(), CostCalculationError> {
    if requested <= 0.0 {
        return Ok(());
    }

    if !config.talangan_enabled {
        return Err(CostCalculationError::TalanganNotEnabled { requested });
    }

    if requested > config.talangan_max_amount {
        return Err(CostCalculationError::TalanganExceedsLimit {
            requested,
            max_amount: config.talangan_max_amount,
        });
    }

    Ok(())
}
