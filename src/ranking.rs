//! Multicriteria ranking of evaluated projects
//!
//! Each metric is min-max normalized across the whole candidate set, then
//! combined with the caller's weights. Weights are used exactly as given;
//! call [`Weights::normalized`] upstream when they should sum to one.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Metrics of one project; absent values rank as zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    #[serde(default)]
    pub npv: Option<f64>,
    #[serde(default)]
    pub irr: Option<f64>,
    #[serde(default)]
    pub benefit_cost: Option<f64>,
}

/// Weight per metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub npv: f64,
    pub irr: f64,
    pub benefit_cost: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            npv: 0.5,
            irr: 0.3,
            benefit_cost: 0.2,
        }
    }
}

impl Weights {
    pub fn new(npv: f64, irr: f64, benefit_cost: f64) -> Self {
        Self { npv, irr, benefit_cost }
    }

    pub fn total(&self) -> f64 {
        self.npv + self.irr + self.benefit_cost
    }

    /// Rescale so the weights sum to one (total floored at 1e-6)
    pub fn normalized(&self) -> Self {
        let total = self.total().max(1e-6);
        Self {
            npv: self.npv / total,
            irr: self.irr / total,
            benefit_cost: self.benefit_cost / total,
        }
    }
}

/// A named project offered for ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankCandidate {
    pub name: String,
    pub metrics: ProjectMetrics,
}

impl RankCandidate {
    pub fn new(name: impl Into<String>, metrics: ProjectMetrics) -> Self {
        Self { name: name.into(), metrics }
    }
}

/// Min-max normalized metric values of one entry, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetrics {
    pub npv: f64,
    pub irr: f64,
    pub benefit_cost: f64,
}

/// One row of a ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub npv: f64,
    pub irr: f64,
    pub benefit_cost: f64,
    pub normalized: NormalizedMetrics,
    pub score: f64,
}

/// Min-max normalize; a column with no spread normalizes to all zeros
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if values.is_empty() || max == min {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - min) / (max - min)).collect()
}

/// Rank candidates by weighted normalized score, highest first
///
/// The sort is stable: equal scores keep their input order. Candidates with
/// an empty name are labelled `proj_<index>`.
pub fn rank_projects(candidates: &[RankCandidate], weights: &Weights) -> Vec<RankingEntry> {
    let npvs: Vec<f64> = candidates.iter().map(|c| c.metrics.npv.unwrap_or(0.0)).collect();
    let irrs: Vec<f64> = candidates.iter().map(|c| c.metrics.irr.unwrap_or(0.0)).collect();
    let ratios: Vec<f64> = candidates.iter().map(|c| c.metrics.benefit_cost.unwrap_or(0.0)).collect();

    let norm_npv = min_max_normalize(&npvs);
    let norm_irr = min_max_normalize(&irrs);
    let norm_ratio = min_max_normalize(&ratios);

    let mut entries: Vec<RankingEntry> = candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let normalized = NormalizedMetrics {
                npv: norm_npv[i],
                irr: norm_irr[i],
                benefit_cost: norm_ratio[i],
            };
            let score = weights.npv * normalized.npv
                + weights.irr * normalized.irr
                + weights.benefit_cost * normalized.benefit_cost;

            RankingEntry {
                name: if candidate.name.is_empty() {
                    format!("proj_{}", i)
                } else {
                    candidate.name.clone()
                },
                npv: npvs[i],
                irr: irrs[i],
                benefit_cost: ratios[i],
                normalized,
                score,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn candidate(name: &str, npv: f64, irr: f64, bc: f64) -> RankCandidate {
        RankCandidate::new(name, ProjectMetrics {
            npv: Some(npv),
            irr: Some(irr),
            benefit_cost: Some(bc),
        })
    }

    #[test]
    fn test_dominant_project_ranks_first() {
        let candidates = vec![
            candidate("B", 500.0, 0.15, 1.2),
            candidate("A", 1000.0, 0.20, 1.5),
        ];
        let ranking = rank_projects(&candidates, &Weights::new(0.5, 0.3, 0.2));

        assert_eq!(ranking[0].name, "A");
        assert_abs_diff_eq!(ranking[0].score, 1.0, epsilon = 1e-12);
        assert_eq!(ranking[1].name, "B");
        assert_eq!(ranking[1].score, 0.0);
    }

    #[test]
    fn test_normalized_values_in_unit_interval() {
        let candidates = vec![
            candidate("x", -200.0, 0.05, 0.9),
            candidate("y", 750.0, 0.31, 1.4),
            candidate("z", 120.0, 0.12, 1.1),
        ];
        let ranking = rank_projects(&candidates, &Weights::default());

        for entry in &ranking {
            for v in [entry.normalized.npv, entry.normalized.irr, entry.normalized.benefit_cost] {
                assert!((0.0..=1.0).contains(&v));
            }
        }
        assert!(ranking.iter().any(|e| e.normalized.npv == 1.0));
        assert!(ranking.iter().any(|e| e.normalized.irr == 1.0));
        assert!(ranking.iter().any(|e| e.normalized.benefit_cost == 1.0));
    }

    #[test]
    fn test_tied_metrics_normalize_to_zero_and_keep_order() {
        let candidates = vec![
            candidate("first", 100.0, 0.1, 1.1),
            candidate("second", 100.0, 0.1, 1.1),
            candidate("third", 100.0, 0.1, 1.1),
        ];
        let ranking = rank_projects(&candidates, &Weights::default());
        let names: Vec<&str> = ranking.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert!(ranking.iter().all(|e| e.score == 0.0));
    }

    #[test]
    fn test_missing_metrics_count_as_zero() {
        let candidates = vec![
            RankCandidate::new("no-irr", ProjectMetrics { npv: Some(50.0), irr: None, benefit_cost: None }),
            candidate("full", 50.0, 0.2, 1.3),
        ];
        let ranking = rank_projects(&candidates, &Weights::default());
        assert_eq!(ranking[0].name, "full");
        assert_eq!(ranking[1].irr, 0.0);
        assert_abs_diff_eq!(ranking[0].score, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_weights_used_as_given() {
        let candidates = vec![candidate("a", 0.0, 0.0, 0.0), candidate("b", 1.0, 1.0, 1.0)];
        let ranking = rank_projects(&candidates, &Weights::new(2.0, 2.0, 2.0));
        assert_abs_diff_eq!(ranking[0].score, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_weight_normalization() {
        let w = Weights::new(1.0, 1.0, 2.0).normalized();
        assert_abs_diff_eq!(w.total(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(w.benefit_cost, 0.5, epsilon = 1e-12);
        assert_eq!(Weights::new(0.0, 0.0, 0.0).normalized().total(), 0.0);
    }

    #[test]
    fn test_unnamed_candidate_gets_index_label() {
        let ranking = rank_projects(&[candidate("", 1.0, 0.1, 1.0)], &Weights::default());
        assert_eq!(ranking[0].name, "proj_0");
    }
}
