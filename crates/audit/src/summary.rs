//! Narrative summary, derived from the aggregates, consumed by the report.

use crate::model::{CarrierImpact, CarrierStats, Narrative, RiskFlag, WorstDecile};

/// Build the executive-summary data: cheapest / most expensive carrier by
/// mean normalized cost, per-carrier normalization impact, and the
/// spend-concentration risk flag.
///
/// `carriers` must be non-empty; the engine rejects empty input before this
/// point.
pub fn narrative(
    carriers: &[CarrierStats],
    worst: &WorstDecile,
    heavy_tail_share_pct: f64,
) -> Narrative {
    let cheapest = carriers
        .iter()
        .min_by(|a, b| {
            a.mean_normalized
                .partial_cmp(&b.mean_normalized)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("non-empty carriers");
    let most_expensive = carriers
        .iter()
        .max_by(|a, b| {
            a.mean_normalized
                .partial_cmp(&b.mean_normalized)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("non-empty carriers");

    let impacts = carriers
        .iter()
        .map(|c| CarrierImpact {
            carrier: c.carrier.clone(),
            mean_raw: c.mean_raw,
            mean_normalized: c.mean_normalized,
            pct_difference: c.pct_difference,
        })
        .collect();

    let risk = if worst.share_pct > heavy_tail_share_pct {
        RiskFlag::HeavyTail
    } else {
        RiskFlag::WellDistributed
    };

    Narrative {
        cheapest_carrier: cheapest.carrier.clone(),
        cheapest_mean_normalized: cheapest.mean_normalized,
        most_expensive_carrier: most_expensive.carrier.clone(),
        most_expensive_mean_normalized: most_expensive.mean_normalized,
        impacts,
        worst_share_pct: worst.share_pct,
        risk,
    }
}
