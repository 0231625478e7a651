use qsim::Counts;
use serde::Serialize;
use std::collections::BTreeMap;

/// Measurement counts over every outcome of an `n`-bit classical register.
/// Outcomes that never occurred are kept with a zero count.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    pub counts: BTreeMap<String, u32>,
    pub shots: u32,
}

impl Histogram {
    pub fn new(observed: Counts, num_bits: usize) -> Self {
        let mut counts: BTreeMap<String, u32> = (0..1usize << num_bits)
            .map(|i| (format!("{:0width$b}", i, width = num_bits), 0))
            .collect();
        for (outcome, n) in observed {
            *counts.entry(outcome).or_insert(0) += n;
        }
        let shots = counts.values().sum();
        Self { counts, shots }
    }

    pub fn count(&self, outcome: &str) -> u32 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    pub fn probability(&self, outcome: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(outcome) as f64 / self.shots as f64
    }

    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        self.counts
            .keys()
            .map(|k| (k.clone(), self.probability(k)))
            .collect()
    }

    /// Horizontal bar chart, one line per outcome, the tallest bar `width` cells wide.
    pub fn render(&self, width: usize) -> String {
        let max = self.counts.values().copied().max().unwrap_or(0).max(1);
        let mut out = String::new();
        for (outcome, &n) in &self.counts {
            let bar = (n as f64 / max as f64 * width as f64).round() as usize;
            out.push_str(&format!(
                "{outcome} | {:<width$} {n:>5} ({:.3})\n",
                "█".repeat(bar),
                self.probability(outcome),
                width = width
            ));
        }
        out
    }
}
