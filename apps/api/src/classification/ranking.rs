//! Top-K Selector: pure ranking over per-class probabilities.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub probability: f32,
}

/// Normalizes a caller-supplied `k`: missing or non-positive means `DEFAULT_TOP_K`.
pub fn effective_k(k: Option<i64>) -> usize {
    match k {
        Some(k) if k > 0 => usize::try_from(k).unwrap_or(usize::MAX),
        _ => DEFAULT_TOP_K,
    }
}

/// Returns the `k` highest-probability labels, descending.
///
/// The sort is stable, so equal probabilities keep their input order (the
/// classifier's class order). A `k` larger than the input returns everything.
pub fn top_k(scores: &[LabelScore], k: Option<i64>) -> Vec<LabelScore> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(effective_k(k));
    ranked
}
