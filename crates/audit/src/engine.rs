//! Pipeline orchestration and CSV loading.

use crate::aggregate::{carrier_stats, group_shipments};
use crate::config::{AuditConfig, SourceConfig};
use crate::decile::worst_decile;
use crate::derive::{classify_lines, ClassifiedLine};
use crate::error::AuditError;
use crate::model::{
    AuditMeta, AuditResult, Category, ChargeLine, ClassificationCounts,
};
use crate::summary::narrative;

/// Run the full audit over pre-loaded charge lines.
///
/// Each stage is a pure transform over the previous output: classify rows,
/// derive per-row costs, group by shipment, group by carrier, extract the
/// worst decile, build the narrative.
pub fn run(config: &AuditConfig, lines: &[ChargeLine]) -> Result<AuditResult, AuditError> {
    if lines.is_empty() {
        return Err(AuditError::EmptyInput);
    }

    let classified = classify_lines(lines);
    let counts = classification_counts(&classified);
    let shipments = group_shipments(&classified);
    let carriers = carrier_stats(&shipments);
    let worst = worst_decile(&shipments);
    let narrative = narrative(&carriers, &worst, config.risk.heavy_tail_share_pct);

    let total_raw = shipments.iter().map(|s| s.cost_raw).sum();
    let total_normalized = shipments.iter().map(|s| s.cost_normalized).sum();

    Ok(AuditResult {
        meta: AuditMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        counts,
        total_raw,
        total_normalized,
        shipments,
        carriers,
        worst,
        narrative,
    })
}

const EXCLUDED_SAMPLE_LIMIT: usize = 10;

fn classification_counts(classified: &[ClassifiedLine]) -> ClassificationCounts {
    let mut counts = ClassificationCounts {
        rows: classified.len(),
        a: 0,
        b: 0,
        c: 0,
        d: 0,
        excluded_samples: Vec::new(),
    };

    for cl in classified {
        match cl.category {
            Category::A => counts.a += 1,
            Category::B => counts.b += 1,
            Category::C => counts.c += 1,
            Category::D => {
                counts.d += 1;
                if counts.excluded_samples.len() < EXCLUDED_SAMPLE_LIMIT
                    && !counts.excluded_samples.contains(&cl.line.charge_type)
                {
                    counts.excluded_samples.push(cl.line.charge_type.clone());
                }
            }
        }
    }

    counts
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load charge lines from CSV text, applying the configured column mapping.
///
/// A missing required column is fatal and reports the full header list
/// observed. An unparsable charge amount is not: it becomes 0.0 and the row
/// stays in every count.
pub fn load_charge_lines(
    csv_data: &str,
    source: &SourceConfig,
) -> Result<Vec<ChargeLine>, AuditError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AuditError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = &source.columns;

    let idx = |name: &str| -> Result<usize, AuditError> {
        headers.iter().position(|h| h == name).ok_or_else(|| AuditError::MissingColumn {
            column: name.into(),
            found: headers.clone(),
        })
    };

    let shipment_id_idx = idx(&col.shipment_id)?;
    let charge_type_idx = idx(&col.charge_type)?;
    let charge_idx = idx(&col.charge)?;
    let carrier_idx = idx(&col.carrier)?;
    let zone_idx = idx(&col.zone)?;

    let mut lines = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| AuditError::Io(e.to_string()))?;

        let charge_type = match record.get(charge_type_idx).map(str::trim) {
            Some("") | None => "nan".to_string(),
            Some(v) => v.to_string(),
        };

        // Coerce, never drop: a malformed amount must not remove the row.
        let charge = record
            .get(charge_idx)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0);

        lines.push(ChargeLine {
            shipment_id: record.get(shipment_id_idx).unwrap_or("").to_string(),
            charge_type,
            charge,
            carrier: record.get(carrier_idx).unwrap_or("").to_string(),
            zone: record.get(zone_idx).unwrap_or("").to_string(),
        });
    }

    Ok(lines)
}

/// Distinct charge-type labels in first-seen order, the standalone
/// diagnostic feed, independent of the audit pipeline.
pub fn distinct_charge_types(
    csv_data: &str,
    source: &SourceConfig,
) -> Result<Vec<String>, AuditError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AuditError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let charge_type_idx = headers
        .iter()
        .position(|h| *h == source.columns.charge_type)
        .ok_or_else(|| AuditError::MissingColumn {
            column: source.columns.charge_type.clone(),
            found: headers.clone(),
        })?;

    let mut distinct: Vec<String> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AuditError::Io(e.to_string()))?;
        let label = match record.get(charge_type_idx).map(str::trim) {
            Some("") | None => "nan".to_string(),
            Some(v) => v.to_string(),
        };
        if !distinct.contains(&label) {
            distinct.push(label);
        }
    }

    Ok(distinct)
}
