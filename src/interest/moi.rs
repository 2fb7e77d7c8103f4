use crate::ensemble::{Mutation, MutationKey};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// Pattern of recurring or conflicting events at one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    /// Some lineage returned to the root allele.
    Reversal,
    /// Distinct derived alleles at one site.
    SameSite,
    /// The identical substitution on separate branches.
    MultipleIntroductions,
    /// Covers most tips; derived from aggregate statistics, never from classification.
    ManyTips,
}

impl Feature {
    pub const CLASSIFIED: [Feature; 3] = [
        Feature::Reversal,
        Feature::SameSite,
        Feature::MultipleIntroductions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Reversal => "reversal",
            Feature::SameSite => "same-site",
            Feature::MultipleIntroductions => "multiple-introductions",
            Feature::ManyTips => "many-tips",
        }
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reversal" => Ok(Feature::Reversal),
            "same-site" => Ok(Feature::SameSite),
            "multiple-introductions" => Ok(Feature::MultipleIntroductions),
            "many-tips" => Ok(Feature::ManyTips),
            _ => Err(format!(
                "Invalid feature '{}'. Options are: reversal, same-site, multiple-introductions, many-tips",
                s
            )),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mutation carried on the branch above `node_index` in one tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Introduction {
    pub mutation: Mutation,
    pub node_index: usize,
}

impl Introduction {
    pub fn new(mutation: Mutation, node_index: usize) -> Self {
        Self {
            mutation,
            node_index,
        }
    }
}

/// Evidence from one tree: every introduction at the site, before deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeInterestData {
    pub tree_index: usize,
    pub introductions: Vec<Introduction>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterestData {
    pub confidence: f64,
    pub introductions: Vec<TreeInterestData>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationOfInterest {
    pub mutation: Mutation,
    pub name: String,
    pub tree_count: usize,
    pub confidence: f64,
    pub base_tip_counts: Vec<u32>,
    pub median_tip_count: f64,
    pub apobec_count: usize,
    pub features: BTreeMap<Feature, InterestData>,
}

impl MutationOfInterest {
    pub fn new(mutation: Mutation) -> Self {
        Self {
            mutation,
            name: mutation.name(),
            tree_count: 0,
            confidence: 0.0,
            base_tip_counts: Vec::new(),
            median_tip_count: 0.0,
            apobec_count: 0,
            features: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> MutationKey {
        self.mutation.key()
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains_key(&feature)
    }

    /// Majority of the trees place this mutation in an APOBEC context.
    pub fn is_apobec(&self) -> bool {
        self.tree_count > 0 && 2 * self.apobec_count >= self.tree_count
    }
}

/// Finalized table plus the three classifier buckets. Buckets store positions in `all`.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOfInterestSet {
    pub(super) all: Vec<MutationOfInterest>,
    pub(super) reversals: Vec<usize>,
    pub(super) same_site: Vec<usize>,
    pub(super) multiple_introductions: Vec<usize>,
    pub(super) tree_count: usize,
}

impl MutationOfInterestSet {
    /// All mutations, ordered by site then alleles.
    pub fn all(&self) -> &[MutationOfInterest] {
        &self.all
    }

    pub fn tree_count(&self) -> usize {
        self.tree_count
    }

    pub fn get(&self, key: &MutationKey) -> Option<&MutationOfInterest> {
        self.all
            .binary_search_by(|moi| moi.key().cmp(key))
            .ok()
            .map(|index| &self.all[index])
    }

    pub fn bucket_indices(&self, feature: Feature) -> &[usize] {
        match feature {
            Feature::Reversal => &self.reversals,
            Feature::SameSite => &self.same_site,
            Feature::MultipleIntroductions => &self.multiple_introductions,
            // Built by select::many_tips from the current tree's tip count
            Feature::ManyTips => &[],
        }
    }

    pub fn bucket(&self, feature: Feature) -> impl Iterator<Item = &MutationOfInterest> + '_ {
        self.bucket_indices(feature)
            .iter()
            .map(move |&index| &self.all[index])
    }
}
