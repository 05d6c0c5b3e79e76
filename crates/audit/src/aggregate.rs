//! Group classified lines into shipments and shipments into carrier stats.

use std::collections::HashMap;

use crate::derive::{ClassifiedLine, CostVector};
use crate::model::{CarrierStats, Shipment};
use crate::stats;

/// Group classified lines by shipment id, preserving first-seen order.
/// Cost vectors are summed; carrier and zone are taken from the first row
/// seen for the shipment.
pub fn group_shipments(lines: &[ClassifiedLine]) -> Vec<Shipment> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, String, String, CostVector)> = Vec::new();

    for cl in lines {
        match index.get(&cl.line.shipment_id) {
            Some(&i) => groups[i].3.accumulate(cl.costs),
            None => {
                index.insert(cl.line.shipment_id.clone(), groups.len());
                groups.push((
                    cl.line.shipment_id.clone(),
                    cl.line.carrier.clone(),
                    cl.line.zone.clone(),
                    cl.costs,
                ));
            }
        }
    }

    groups
        .into_iter()
        .map(|(shipment_id, carrier, zone, v)| Shipment {
            shipment_id,
            carrier,
            zone,
            cost_raw: v.raw,
            cost_normalized: v.normalized,
            cost_a: v.a,
            cost_b: v.b,
            cost_c: v.c,
            cost_d: v.d,
            surcharge_ratio: if v.a == 0.0 { None } else { Some(v.b / v.a) },
        })
        .collect()
}

/// Group shipments by carrier and compute per-carrier statistics, sorted by
/// total raw spend descending.
pub fn carrier_stats(shipments: &[Shipment]) -> Vec<CarrierStats> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&Shipment>)> = Vec::new();

    for s in shipments {
        match index.get(&s.carrier) {
            Some(&i) => groups[i].1.push(s),
            None => {
                index.insert(s.carrier.clone(), groups.len());
                groups.push((s.carrier.clone(), vec![s]));
            }
        }
    }

    let mut out: Vec<CarrierStats> = groups
        .into_iter()
        .map(|(carrier, members)| {
            let raw: Vec<f64> = members.iter().map(|s| s.cost_raw).collect();
            let norm: Vec<f64> = members.iter().map(|s| s.cost_normalized).collect();
            let mean_raw = stats::mean(&raw);
            let mean_normalized = stats::mean(&norm);
            CarrierStats {
                carrier,
                shipment_count: members.len(),
                mean_raw,
                mean_normalized,
                median_normalized: stats::median(&norm),
                std_normalized: stats::sample_std(&norm),
                p90_normalized: stats::percentile(&norm, 90.0),
                total_raw: raw.iter().sum(),
                pct_difference: if mean_raw == 0.0 {
                    None
                } else {
                    Some((mean_normalized - mean_raw) / mean_raw * 100.0)
                },
            }
        })
        .collect();

    out.sort_by(|a, b| {
        b.total_raw
            .partial_cmp(&a.total_raw)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::classify_lines;
    use crate::model::ChargeLine;

    fn line(id: &str, charge_type: &str, charge: f64, carrier: &str) -> ChargeLine {
        ChargeLine {
            shipment_id: id.into(),
            charge_type: charge_type.into(),
            charge,
            carrier: carrier.into(),
            zone: "2".into(),
        }
    }

    #[test]
    fn shipment_t1_worked_example() {
        let lines = classify_lines(&[
            line("T1", "Base Rate", 100.0, "UPS"),
            line("T1", "Fuel Surcharge", 15.0, "UPS"),
            line("T1", "GST", 9.0, "UPS"),
        ]);
        let shipments = group_shipments(&lines);
        assert_eq!(shipments.len(), 1);
        let s = &shipments[0];
        assert_eq!(s.cost_raw, 124.0);
        assert_eq!(s.cost_a, 100.0);
        assert_eq!(s.cost_b, 15.0);
        assert_eq!(s.cost_d, 9.0);
        assert_eq!(s.cost_normalized, 115.0);
        assert_eq!(s.surcharge_ratio, Some(0.15));
    }

    #[test]
    fn raw_equals_category_sum_per_shipment() {
        let lines = classify_lines(&[
            line("T1", "Base Rate", 50.25, "UPS"),
            line("T1", "Weekend Delivery", 12.10, "UPS"),
            line("T2", "Freight", 80.0, "FedEx"),
            line("T2", "Sales Tax", 6.4, "FedEx"),
            line("T2", "Fuel Surcharge", 11.5, "FedEx"),
        ]);
        for s in group_shipments(&lines) {
            assert_eq!(s.cost_raw, s.cost_a + s.cost_b + s.cost_c + s.cost_d);
            assert_eq!(s.cost_normalized, s.cost_a + s.cost_b);
        }
    }

    #[test]
    fn first_seen_carrier_and_order() {
        let lines = classify_lines(&[
            line("T2", "Base Rate", 10.0, "FedEx"),
            line("T1", "Base Rate", 20.0, "UPS"),
            line("T2", "Fuel Surcharge", 1.0, "Purolator"), // conflicting carrier
        ]);
        let shipments = group_shipments(&lines);
        assert_eq!(shipments[0].shipment_id, "T2");
        assert_eq!(shipments[1].shipment_id, "T1");
        // First row for T2 wins; the conflict is not flagged.
        assert_eq!(shipments[0].carrier, "FedEx");
    }

    #[test]
    fn ratio_undefined_without_core_freight() {
        let lines = classify_lines(&[line("T1", "Fuel Surcharge", 5.0, "UPS")]);
        let shipments = group_shipments(&lines);
        assert_eq!(shipments[0].surcharge_ratio, None);
    }

    fn shipment(id: &str, carrier: &str, raw: f64, norm: f64) -> Shipment {
        Shipment {
            shipment_id: id.into(),
            carrier: carrier.into(),
            zone: "2".into(),
            cost_raw: raw,
            cost_normalized: norm,
            cost_a: norm,
            cost_b: 0.0,
            cost_c: 0.0,
            cost_d: raw - norm,
            surcharge_ratio: None,
        }
    }

    #[test]
    fn pct_difference_rounds_to_minus_16_67() {
        let shipments = vec![shipment("T1", "UPS", 120.0, 100.0)];
        let stats = carrier_stats(&shipments);
        let pct = stats[0].pct_difference.unwrap();
        assert!((pct - (-16.666_666_666_666_668)).abs() < 1e-9);
        assert_eq!(format!("{:.2}", pct), "-16.67");
    }

    #[test]
    fn carriers_sorted_by_total_spend() {
        let shipments = vec![
            shipment("T1", "UPS", 50.0, 50.0),
            shipment("T2", "FedEx", 200.0, 180.0),
            shipment("T3", "UPS", 60.0, 55.0),
        ];
        let stats = carrier_stats(&shipments);
        assert_eq!(stats[0].carrier, "FedEx");
        assert_eq!(stats[1].carrier, "UPS");
        assert_eq!(stats[1].shipment_count, 2);
        assert_eq!(stats[1].total_raw, 110.0);
    }

    #[test]
    fn single_shipment_carrier_has_no_std() {
        let shipments = vec![shipment("T1", "UPS", 100.0, 90.0)];
        let stats = carrier_stats(&shipments);
        assert!(stats[0].std_normalized.is_none());
        assert_eq!(stats[0].median_normalized, 90.0);
        assert_eq!(stats[0].p90_normalized, 90.0);
    }

    #[test]
    fn zero_raw_mean_yields_undefined_difference() {
        let shipments = vec![shipment("T1", "UPS", 0.0, 0.0)];
        let stats = carrier_stats(&shipments);
        assert!(stats[0].pct_difference.is_none());
    }
}
