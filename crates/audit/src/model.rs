use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single invoice line, as loaded from the source table.
///
/// `charge` is already coerced: unparsable amounts become 0.0 at load time
/// so a malformed amount never drops the row from counts.
#[derive(Debug, Clone)]
pub struct ChargeLine {
    pub shipment_id: String,
    pub charge_type: String,
    pub charge: f64,
    pub carrier: String,
    pub zone: String,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Comparability category. Assigned exactly once per charge line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// Core freight (base rate / freight).
    A,
    /// Structural surcharge, inherent to shipment characteristics.
    B,
    /// Conditional charge: timing/service choices, carrier-avoidable.
    C,
    /// Excluded: taxes, duties, administrative charges.
    D,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::A => "Core Freight",
            Self::B => "Structural Surcharge",
            Self::C => "Conditional Charge",
            Self::D => "Excluded",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Aggregate over all charge lines sharing a shipment id.
///
/// `carrier` and `zone` are first-seen per group: if a shipment's lines
/// disagree, the first row in input order is authoritative.
#[derive(Debug, Clone, Serialize)]
pub struct Shipment {
    pub shipment_id: String,
    pub carrier: String,
    pub zone: String,
    pub cost_raw: f64,
    pub cost_normalized: f64,
    pub cost_a: f64,
    pub cost_b: f64,
    pub cost_c: f64,
    pub cost_d: f64,
    /// cost_b / cost_a; None when cost_a is 0 (undefined, not zero).
    pub surcharge_ratio: Option<f64>,
}

/// Aggregate over shipments sharing a carrier.
#[derive(Debug, Clone, Serialize)]
pub struct CarrierStats {
    pub carrier: String,
    pub shipment_count: usize,
    pub mean_raw: f64,
    pub mean_normalized: f64,
    pub median_normalized: f64,
    /// Sample standard deviation; None for fewer than 2 shipments.
    pub std_normalized: Option<f64>,
    /// 90th percentile, linear interpolation between nearest ranks.
    pub p90_normalized: f64,
    pub total_raw: f64,
    /// (mean_normalized − mean_raw) / mean_raw × 100; None when mean_raw is 0.
    pub pct_difference: Option<f64>,
}

// ---------------------------------------------------------------------------
// Worst decile
// ---------------------------------------------------------------------------

/// Share of the worst-decile shipments held by one carrier.
#[derive(Debug, Clone, Serialize)]
pub struct CarrierShare {
    pub carrier: String,
    pub pct: f64,
}

/// The k = max(1, floor(0.1 n)) shipments with the largest normalized cost.
#[derive(Debug, Clone, Serialize)]
pub struct WorstDecile {
    pub count: usize,
    pub spend: f64,
    /// Combined share of total normalized spend, in percent.
    pub share_pct: f64,
    pub carrier_mix: Vec<CarrierShare>,
    pub shipments: Vec<Shipment>,
}

// ---------------------------------------------------------------------------
// Narrative summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    HeavyTail,
    WellDistributed,
}

impl std::fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HeavyTail => write!(f, "heavy_tail"),
            Self::WellDistributed => write!(f, "well_distributed"),
        }
    }
}

/// Per-carrier normalization impact for the narrative.
#[derive(Debug, Clone, Serialize)]
pub struct CarrierImpact {
    pub carrier: String,
    pub mean_raw: f64,
    pub mean_normalized: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pct_difference: Option<f64>,
}

/// Reporting output only; no downstream logic depends on these fields.
#[derive(Debug, Clone, Serialize)]
pub struct Narrative {
    pub cheapest_carrier: String,
    pub cheapest_mean_normalized: f64,
    pub most_expensive_carrier: String,
    pub most_expensive_mean_normalized: f64,
    pub impacts: Vec<CarrierImpact>,
    pub worst_share_pct: f64,
    pub risk: RiskFlag,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Row and category counts from the classification pass.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationCounts {
    pub rows: usize,
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
    /// Up to 10 distinct excluded charge-type labels, first-seen order.
    pub excluded_samples: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditResult {
    pub meta: AuditMeta,
    pub counts: ClassificationCounts,
    pub total_raw: f64,
    pub total_normalized: f64,
    pub shipments: Vec<Shipment>,
    pub carriers: Vec<CarrierStats>,
    pub worst: WorstDecile,
    pub narrative: Narrative,
}
