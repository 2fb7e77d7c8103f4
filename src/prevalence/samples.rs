use crate::utils::{Allele, Result, NUM_ALLELES};

/// Sequence counts indexed `[tree][allele][day]`, allele order A, C, G, T.
#[derive(Debug, Clone, PartialEq)]
pub struct AlleleSamples {
    counts: Vec<Vec<Vec<f64>>>,
    num_days: usize,
}

impl AlleleSamples {
    pub fn new(counts: Vec<Vec<Vec<f64>>>) -> Result<Self> {
        if counts.is_empty() {
            return Err("Sample grid has no trees".to_string());
        }
        let num_days = counts[0].first().map_or(0, |row| row.len());
        if num_days == 0 {
            return Err("Sample grid has no days".to_string());
        }
        for (tree_index, tree) in counts.iter().enumerate() {
            if tree.len() != NUM_ALLELES {
                return Err(format!(
                    "Tree {} has {} allele rows, expected {}",
                    tree_index,
                    tree.len(),
                    NUM_ALLELES
                ));
            }
            for (allele, row) in Allele::ALL.iter().zip(tree) {
                if row.len() != num_days {
                    return Err(format!(
                        "Tree {} allele {} has {} days, expected {}",
                        tree_index,
                        allele,
                        row.len(),
                        num_days
                    ));
                }
                if let Some(day) = row.iter().position(|c| !c.is_finite() || *c < 0.0) {
                    return Err(format!(
                        "Tree {} allele {} day {} has invalid count {}",
                        tree_index, allele, day, row[day]
                    ));
                }
            }
        }
        Ok(Self { counts, num_days })
    }

    pub fn num_trees(&self) -> usize {
        self.counts.len()
    }

    pub fn num_days(&self) -> usize {
        self.num_days
    }

    pub fn count(&self, tree: usize, allele: Allele, day: usize) -> f64 {
        self.counts[tree][allele.index()][day]
    }

    pub fn total(&self, tree: usize, day: usize) -> f64 {
        self.counts[tree].iter().map(|row| row[day]).sum()
    }

    /// Share of sequences in `tree` on `day` carrying `alt`; zero when nothing was sampled.
    pub fn proportion(&self, tree: usize, alt: Allele, day: usize) -> f64 {
        let total = self.total(tree, day);
        if total > 0.0 {
            self.count(tree, alt, day) / total
        } else {
            0.0
        }
    }
}
