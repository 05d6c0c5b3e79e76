//! Charge-type classification: an ordered rule table, first match wins.

use crate::model::Category;

/// Keywords that mark a charge as excluded (taxes, duties, admin).
const EXCLUSION_KEYWORDS: &[&str] = &[
    "gst", "hst", "pst", "vat", "tax", "duty", "customs", "adjustment", "admin",
    "disbursement", "broker",
];

/// Exact labels for core freight.
const CORE_LABELS: &[&str] = &["base rate", "freight"];

/// Keywords for structural surcharges (fuel, DAS, residential, weight/dims,
/// signature, COD, declared value).
const STRUCTURAL_KEYWORDS: &[&str] = &[
    "fuel", "delivery area", "extended area", "remote", "residential", "oversize",
    "overweight", "large package", "handling", "weight", "ahs", "signature", "cod",
    "declared value", "address correction",
];

/// Keywords for conditional charges (weekend, special handling, call tag).
const CONDITIONAL_KEYWORDS: &[&str] = &[
    "weekend", "saturday", "sunday", "call tag", "call ahead", "special handling",
];

enum Pred {
    Contains(&'static str),
    ContainsAll(&'static [&'static str]),
    ContainsAny(&'static [&'static str]),
    EqualsAny(&'static [&'static str]),
}

impl Pred {
    fn matches(&self, label: &str) -> bool {
        match self {
            Self::Contains(needle) => label.contains(needle),
            Self::ContainsAll(needles) => needles.iter().all(|n| label.contains(n)),
            Self::ContainsAny(needles) => needles.iter().any(|n| label.contains(n)),
            Self::EqualsAny(exact) => exact.iter().any(|e| *e == label),
        }
    }
}

struct Rule {
    pred: Pred,
    category: Category,
}

/// Ordered rule table. Ordering is significant: the three carve-outs sit
/// above the exclusion rule, so adjustment-named corrections to structural
/// surcharges land in B instead of D, and the exclusion rule sits above the
/// A/B/C checks, so a label containing both "tax" and "fuel" resolves to D.
const RULES: &[Rule] = &[
    Rule { pred: Pred::Contains("fuel surcharge adjustment"), category: Category::B },
    Rule {
        pred: Pred::ContainsAll(&["delivery area surcharge", "adjustment"]),
        category: Category::B,
    },
    Rule { pred: Pred::Contains("signature required adjustment"), category: Category::B },
    Rule { pred: Pred::ContainsAny(EXCLUSION_KEYWORDS), category: Category::D },
    Rule { pred: Pred::EqualsAny(CORE_LABELS), category: Category::A },
    Rule { pred: Pred::ContainsAny(STRUCTURAL_KEYWORDS), category: Category::B },
    Rule { pred: Pred::ContainsAny(CONDITIONAL_KEYWORDS), category: Category::C },
    Rule { pred: Pred::Contains("future day pickup"), category: Category::C },
];

/// Classify a raw charge-type label. Total, deterministic, case-insensitive.
/// Unmatched labels fall through to D: unclassified charges are treated as
/// non-comparable rather than silently included.
pub fn classify(charge_type: &str) -> Category {
    let label = normalize_label(charge_type);
    RULES
        .iter()
        .find(|r| r.pred.matches(&label))
        .map(|r| r.category)
        .unwrap_or(Category::D)
}

/// Lowercase the label; blank/missing labels become the literal text "nan"
/// (how the source table stringifies missing values).
pub fn normalize_label(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "nan".to_string();
    }
    trimmed.to_lowercase()
}
