//! Per-row cost derivation: a pure mapping from (Category, amount) to a
//! per-category cost vector.

use crate::classify::classify;
use crate::model::{Category, ChargeLine};

/// Per-row (or summed) cost fields. By construction
/// `raw == a + b + c + d` and `normalized == a + b`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CostVector {
    pub raw: f64,
    pub normalized: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl CostVector {
    pub fn accumulate(&mut self, other: CostVector) {
        self.raw += other.raw;
        self.normalized += other.normalized;
        self.a += other.a;
        self.b += other.b;
        self.c += other.c;
        self.d += other.d;
    }
}

/// Map one classified amount to its cost vector. The amount lands in exactly
/// one category slot; normalized carries it only for A and B.
pub fn cost_vector(category: Category, amount: f64) -> CostVector {
    let mut v = CostVector { raw: amount, ..CostVector::default() };
    match category {
        Category::A => {
            v.a = amount;
            v.normalized = amount;
        }
        Category::B => {
            v.b = amount;
            v.normalized = amount;
        }
        Category::C => v.c = amount,
        Category::D => v.d = amount,
    }
    v
}

/// A charge line with its assigned category and derived costs.
#[derive(Debug, Clone)]
pub struct ClassifiedLine {
    pub line: ChargeLine,
    pub category: Category,
    pub costs: CostVector,
}

/// Classify every line and derive its cost vector. One pass, input order
/// preserved.
pub fn classify_lines(lines: &[ChargeLine]) -> Vec<ClassifiedLine> {
    lines
        .iter()
        .map(|line| {
            let category = classify(&line.charge_type);
            ClassifiedLine {
                line: line.clone(),
                category,
                costs: cost_vector(category, line.charge),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_partitions_amount() {
        for category in [Category::A, Category::B, Category::C, Category::D] {
            let v = cost_vector(category, 42.5);
            assert_eq!(v.raw, 42.5);
            assert_eq!(v.a + v.b + v.c + v.d, v.raw);
            assert_eq!(v.normalized, v.a + v.b);
        }
    }

    #[test]
    fn normalized_carries_only_a_and_b() {
        assert_eq!(cost_vector(Category::A, 10.0).normalized, 10.0);
        assert_eq!(cost_vector(Category::B, 10.0).normalized, 10.0);
        assert_eq!(cost_vector(Category::C, 10.0).normalized, 0.0);
        assert_eq!(cost_vector(Category::D, 10.0).normalized, 0.0);
    }

    #[test]
    fn accumulate_sums_fields() {
        let mut total = CostVector::default();
        total.accumulate(cost_vector(Category::A, 100.0));
        total.accumulate(cost_vector(Category::B, 15.0));
        total.accumulate(cost_vector(Category::D, 9.0));
        assert_eq!(total.raw, 124.0);
        assert_eq!(total.normalized, 115.0);
        assert_eq!(total.a, 100.0);
        assert_eq!(total.b, 15.0);
        assert_eq!(total.c, 0.0);
        assert_eq!(total.d, 9.0);
    }

    #[test]
    fn negative_amounts_pass_through() {
        // Credits keep their sign; nothing clamps to zero.
        let v = cost_vector(Category::D, -5.0);
        assert_eq!(v.raw, -5.0);
        assert_eq!(v.d, -5.0);
    }
}
