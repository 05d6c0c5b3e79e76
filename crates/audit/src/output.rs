//! CSV writers for the three persisted tables.

use std::io;

use crate::error::AuditError;
use crate::model::{CarrierStats, Shipment};

fn num(v: f64) -> String {
    v.to_string()
}

fn opt_num(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn shipment_record(s: &Shipment) -> Vec<String> {
    vec![
        s.shipment_id.clone(),
        s.carrier.clone(),
        s.zone.clone(),
        num(s.cost_raw),
        num(s.cost_normalized),
        num(s.cost_a),
        num(s.cost_b),
        num(s.cost_c),
        num(s.cost_d),
        opt_num(s.surcharge_ratio),
    ]
}

const SHIPMENT_HEADERS: [&str; 10] = [
    "Shipment ID",
    "Carrier Name",
    "Zones",
    "Cost_Raw",
    "Cost_Normalized",
    "Cost_A",
    "Cost_B",
    "Cost_C",
    "Cost_D",
    "Surcharge_Ratio",
];

/// One row per shipment (`shipment_level_data.csv`).
pub fn write_shipments<W: io::Write>(w: W, shipments: &[Shipment]) -> Result<(), AuditError> {
    let mut writer = csv::Writer::from_writer(w);
    writer
        .write_record(SHIPMENT_HEADERS)
        .map_err(|e| AuditError::Io(e.to_string()))?;
    for s in shipments {
        writer
            .write_record(shipment_record(s))
            .map_err(|e| AuditError::Io(e.to_string()))?;
    }
    writer.flush().map_err(|e| AuditError::Io(e.to_string()))
}

/// One row per carrier (`carrier_stats.csv`), already sorted by total spend.
pub fn write_carrier_stats<W: io::Write>(
    w: W,
    carriers: &[CarrierStats],
) -> Result<(), AuditError> {
    let mut writer = csv::Writer::from_writer(w);
    writer
        .write_record([
            "Carrier Name",
            "Shipment_Count",
            "Avg_Raw_Cost",
            "Avg_Norm_Cost",
            "Median_Norm_Cost",
            "Std_Norm_Cost",
            "P90_Norm_Cost",
            "Total_Spend",
            "%_Difference",
        ])
        .map_err(|e| AuditError::Io(e.to_string()))?;
    for c in carriers {
        writer
            .write_record([
                c.carrier.clone(),
                c.shipment_count.to_string(),
                num(c.mean_raw),
                num(c.mean_normalized),
                num(c.median_normalized),
                opt_num(c.std_normalized),
                num(c.p90_normalized),
                num(c.total_raw),
                opt_num(c.pct_difference),
            ])
            .map_err(|e| AuditError::Io(e.to_string()))?;
    }
    writer.flush().map_err(|e| AuditError::Io(e.to_string()))
}

/// The selected worst-decile shipment rows (`worst_shipments_10pct.csv`).
/// Same columns as the shipment table.
pub fn write_worst<W: io::Write>(w: W, shipments: &[Shipment]) -> Result<(), AuditError> {
    write_shipments(w, shipments)
}
