//! Worst-decile extraction: the top 10% of shipments by normalized cost.

use crate::model::{CarrierShare, Shipment, WorstDecile};

/// Select the k = max(1, floor(0.1 n)) shipments with the largest normalized
/// cost. Ties keep first-seen shipment order (stable selection).
pub fn worst_decile(shipments: &[Shipment]) -> WorstDecile {
    let n = shipments.len();
    let k = (((n as f64) * 0.1).floor() as usize).max(1).min(n);

    let mut order: Vec<usize> = (0..n).collect();
    // Stable sort: equal normalized costs stay in group order.
    order.sort_by(|&i, &j| {
        shipments[j]
            .cost_normalized
            .partial_cmp(&shipments[i].cost_normalized)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let selected: Vec<Shipment> = order[..k].iter().map(|&i| shipments[i].clone()).collect();

    let spend: f64 = selected.iter().map(|s| s.cost_normalized).sum();
    let total: f64 = shipments.iter().map(|s| s.cost_normalized).sum();
    let share_pct = if total == 0.0 { 0.0 } else { spend / total * 100.0 };

    // Carrier mix: percentage of the k shipments per carrier, largest first.
    let mut mix: Vec<CarrierShare> = Vec::new();
    for s in &selected {
        match mix.iter_mut().find(|m| m.carrier == s.carrier) {
            Some(m) => m.pct += 1.0,
            None => mix.push(CarrierShare { carrier: s.carrier.clone(), pct: 1.0 }),
        }
    }
    for m in &mut mix {
        m.pct = m.pct / k as f64 * 100.0;
    }
    mix.sort_by(|a, b| b.pct.partial_cmp(&a.pct).unwrap_or(std::cmp::Ordering::Equal));

    WorstDecile { count: k, spend, share_pct, carrier_mix: mix, shipments: selected }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipment(id: &str, carrier: &str, norm: f64) -> Shipment {
        Shipment {
            shipment_id: id.into(),
            carrier: carrier.into(),
            zone: "2".into(),
            cost_raw: norm,
            cost_normalized: norm,
            cost_a: norm,
            cost_b: 0.0,
            cost_c: 0.0,
            cost_d: 0.0,
            surcharge_ratio: None,
        }
    }

    #[test]
    fn k_is_floor_of_ten_percent() {
        let shipments: Vec<Shipment> = (0..23)
            .map(|i| shipment(&format!("T{i}"), "UPS", i as f64))
            .collect();
        assert_eq!(worst_decile(&shipments).count, 2);
    }

    #[test]
    fn k_has_floor_of_one() {
        let shipments: Vec<Shipment> = (0..3)
            .map(|i| shipment(&format!("T{i}"), "UPS", i as f64))
            .collect();
        assert_eq!(worst_decile(&shipments).count, 1);
    }

    #[test]
    fn selects_largest_by_normalized_cost() {
        let shipments: Vec<Shipment> = (0..20)
            .map(|i| shipment(&format!("T{i}"), "UPS", i as f64))
            .collect();
        let worst = worst_decile(&shipments);
        assert_eq!(worst.count, 2);
        assert_eq!(worst.shipments[0].shipment_id, "T19");
        assert_eq!(worst.shipments[1].shipment_id, "T18");
        assert_eq!(worst.spend, 19.0 + 18.0);
    }

    #[test]
    fn ties_keep_group_order() {
        let shipments = vec![
            shipment("T1", "UPS", 100.0),
            shipment("T2", "FedEx", 100.0),
            shipment("T3", "UPS", 100.0),
        ];
        let worst = worst_decile(&shipments);
        assert_eq!(worst.count, 1);
        assert_eq!(worst.shipments[0].shipment_id, "T1");
    }

    #[test]
    fn share_and_mix() {
        let mut shipments: Vec<Shipment> = (0..18)
            .map(|i| shipment(&format!("T{i}"), "UPS", 10.0))
            .collect();
        shipments.push(shipment("BIG1", "FedEx", 200.0));
        shipments.push(shipment("BIG2", "FedEx", 100.0));
        // n = 20, k = 2, spend = 300 of 480 total
        let worst = worst_decile(&shipments);
        assert_eq!(worst.count, 2);
        assert_eq!(worst.spend, 300.0);
        assert!((worst.share_pct - 62.5).abs() < 1e-12);
        assert_eq!(worst.carrier_mix.len(), 1);
        assert_eq!(worst.carrier_mix[0].carrier, "FedEx");
        assert_eq!(worst.carrier_mix[0].pct, 100.0);
    }

    #[test]
    fn zero_total_spend_has_zero_share() {
        let shipments = vec![shipment("T1", "UPS", 0.0), shipment("T2", "UPS", 0.0)];
        let worst = worst_decile(&shipments);
        assert_eq!(worst.share_pct, 0.0);
    }
}
