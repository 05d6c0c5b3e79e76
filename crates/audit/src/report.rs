//! Textual report rendering. All numbers come from an already-computed
//! [`AuditResult`]; nothing here feeds back into the pipeline.

use std::fmt::Write as _;

use crate::model::{AuditResult, RiskFlag};

fn opt_pct(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.1}%"),
        None => "n/a".to_string(),
    }
}

/// Render the sequential console report.
pub fn render(result: &AuditResult) -> String {
    let mut out = String::new();
    let rule = "=".repeat(50);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "FREIGHT COST AUDIT - {}", result.meta.config_name);
    let _ = writeln!(out, "{rule}");

    // Load + classification
    let c = &result.counts;
    let _ = writeln!(out, "\nLoaded {} charge lines.", c.rows);
    let _ = writeln!(out, "\nClassification (rows per category):");
    let _ = writeln!(out, "  A (Core Freight):         {}", c.a);
    let _ = writeln!(out, "  B (Structural Surcharge): {}", c.b);
    let _ = writeln!(out, "  C (Conditional Charge):   {}", c.c);
    let _ = writeln!(out, "  D (Excluded):             {}", c.d);
    if !c.excluded_samples.is_empty() {
        let _ = writeln!(
            out,
            "Sample excluded charge types: {}",
            c.excluded_samples.join(", ")
        );
    }

    // Shipment totals
    let _ = writeln!(out, "\nTotal shipments: {}", result.shipments.len());
    let _ = writeln!(out, "Total raw spend: {:.2}", result.total_raw);
    let _ = writeln!(out, "Total normalized spend: {:.2}", result.total_normalized);

    // Carrier stats
    let _ = writeln!(out, "\nCarrier statistics (by total spend):");
    for cs in &result.carriers {
        let std = match cs.std_normalized {
            Some(v) => format!("{v:.2}"),
            None => "n/a".to_string(),
        };
        let _ = writeln!(
            out,
            "  {}: {} shipment(s), raw mean {:.2}, norm mean {:.2}, median {:.2}, std {}, p90 {:.2}, total {:.2}",
            cs.carrier,
            cs.shipment_count,
            cs.mean_raw,
            cs.mean_normalized,
            cs.median_normalized,
            std,
            cs.p90_normalized,
            cs.total_raw,
        );
    }

    // Normalization impact
    let _ = writeln!(out, "\nNormalization impact:");
    for imp in &result.narrative.impacts {
        let _ = writeln!(
            out,
            "  {}: raw {:.2} -> norm {:.2} ({})",
            imp.carrier,
            imp.mean_raw,
            imp.mean_normalized,
            opt_pct(imp.pct_difference),
        );
    }

    // Worst decile
    let w = &result.worst;
    let _ = writeln!(
        out,
        "\nWorst 10%: {} shipment(s) out of {}",
        w.count,
        result.shipments.len()
    );
    let _ = writeln!(
        out,
        "Worst 10% spend: {:.2} ({:.1}% of total normalized spend)",
        w.spend, w.share_pct
    );
    for m in &w.carrier_mix {
        let _ = writeln!(out, "  {}: {:.1}% of worst shipments", m.carrier, m.pct);
    }

    // Executive summary
    let n = &result.narrative;
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "EXECUTIVE SUMMARY");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "- Processed {} shipments.", result.shipments.len());
    let _ = writeln!(out, "- Total invoiced amount: {:.2}", result.total_raw);
    let _ = writeln!(out, "- Normalized evaluated amount: {:.2}", result.total_normalized);
    let _ = writeln!(
        out,
        "- Most cost-effective carrier: {} ({:.2}/shipment)",
        n.cheapest_carrier, n.cheapest_mean_normalized
    );
    let _ = writeln!(
        out,
        "- Most expensive carrier: {} ({:.2}/shipment)",
        n.most_expensive_carrier, n.most_expensive_mean_normalized
    );
    for imp in &n.impacts {
        if let Some(diff) = imp.pct_difference {
            let direction = if diff < 0.0 { "reduced" } else { "increased" };
            let _ = writeln!(
                out,
                "- {}: normalization {} cost basis by {:.1}%",
                imp.carrier,
                direction,
                diff.abs()
            );
        }
    }
    let _ = writeln!(
        out,
        "- The most expensive 10% of shipments contribute {:.1}% of total normalized spend.",
        n.worst_share_pct
    );
    match n.risk {
        RiskFlag::HeavyTail => {
            let _ = writeln!(
                out,
                "  ALERT: heavy tail risk: significant spend concentration in outliers."
            );
        }
        RiskFlag::WellDistributed => {
            let _ = writeln!(out, "  Spend is relatively well distributed.");
        }
    }

    out
}
