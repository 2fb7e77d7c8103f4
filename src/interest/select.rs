use super::{Feature, MutationOfInterest, MutationOfInterestSet};
use std::{cmp::Ordering, fmt, str::FromStr};

pub const DEFAULT_MANY_TIPS_FRACTION: f64 = 0.75;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.25;
pub const DEFAULT_MIN_TIP_FRACTION: f64 = 0.05;

/// Entries whose median tip count covers at least `fraction` of the tips of
/// the tree currently shown.
pub fn many_tips(
    set: &MutationOfInterestSet,
    tree_tip_count: usize,
    fraction: f64,
) -> Vec<&MutationOfInterest> {
    let threshold = fraction * tree_tip_count as f64;
    set.all()
        .iter()
        .filter(|moi| moi.median_tip_count >= threshold)
        .collect()
}

/// Either the full table or a single feature bucket.
pub fn category<'a>(
    set: &'a MutationOfInterestSet,
    feature: Option<Feature>,
    tree_tip_count: usize,
    many_tips_fraction: f64,
) -> Vec<&'a MutationOfInterest> {
    match feature {
        None => set.all().iter().collect(),
        Some(Feature::ManyTips) => many_tips(set, tree_tip_count, many_tips_fraction),
        Some(feature) => set.bucket(feature).collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Site,
    Tips,
    Trees,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "site" => Ok(SortKey::Site),
            "tips" => Ok(SortKey::Tips),
            "trees" => Ok(SortKey::Trees),
            _ => Err(format!(
                "Invalid sort key '{}'. Options are: site, tips, trees",
                s
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Site => "site",
            SortKey::Tips => "tips",
            SortKey::Trees => "trees",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!(
                "Invalid sort direction '{}'. Options are: asc, desc",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionParams {
    pub min_confidence: f64,
    pub min_tip_fraction: f64,
    pub tree_tip_count: usize,
}

impl SelectionParams {
    pub fn min_tips(&self) -> f64 {
        (self.min_tip_fraction * self.tree_tip_count as f64).round()
    }

    pub fn accepts(&self, moi: &MutationOfInterest) -> bool {
        moi.confidence >= self.min_confidence && moi.median_tip_count >= self.min_tips()
    }
}

pub fn select<'a>(
    mutations: impl IntoIterator<Item = &'a MutationOfInterest>,
    params: &SelectionParams,
) -> Vec<&'a MutationOfInterest> {
    mutations
        .into_iter()
        .filter(|moi| params.accepts(moi))
        .collect()
}

fn compare(a: &MutationOfInterest, b: &MutationOfInterest, key: SortKey) -> Ordering {
    match key {
        SortKey::Site => a.mutation.site.cmp(&b.mutation.site),
        SortKey::Tips => a.median_tip_count.total_cmp(&b.median_tip_count),
        SortKey::Trees => a.tree_count.cmp(&b.tree_count),
    }
}

/// Stable sort; entries with equal keys keep their table order in both directions.
pub fn sort_mutations(mutations: &mut [&MutationOfInterest], key: SortKey, direction: SortDirection) {
    match direction {
        SortDirection::Ascending => mutations.sort_by(|a, b| compare(a, b, key)),
        SortDirection::Descending => mutations.sort_by(|a, b| compare(b, a, key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::Mutation;
    use crate::interest::InterestData;
    use crate::utils::Allele::*;

    fn moi(site: u32, tree_count: usize, median_tip_count: f64) -> MutationOfInterest {
        let mut moi = MutationOfInterest::new(Mutation::new(site, C, T, 1.0));
        moi.tree_count = tree_count;
        moi.confidence = tree_count as f64 / 10.0;
        moi.median_tip_count = median_tip_count;
        moi
    }

    fn set(all: Vec<MutationOfInterest>) -> MutationOfInterestSet {
        MutationOfInterestSet {
            all,
            reversals: vec![],
            same_site: vec![1],
            multiple_introductions: vec![],
            tree_count: 10,
        }
    }

    fn names(mutations: &[&MutationOfInterest]) -> Vec<String> {
        mutations.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn many_tips_threshold_is_inclusive() {
        let set = set(vec![moi(0, 10, 75.0), moi(1, 10, 74.5), moi(2, 10, 100.0)]);
        let selected = many_tips(&set, 100, DEFAULT_MANY_TIPS_FRACTION);
        assert_eq!(names(&selected), vec!["C1T", "C3T"]);
    }

    #[test]
    fn category_dispatch() {
        let mut with_feature = moi(1, 4, 3.0);
        with_feature
            .features
            .insert(Feature::SameSite, InterestData::default());
        let set = set(vec![moi(0, 10, 90.0), with_feature]);
        assert_eq!(category(&set, None, 100, 0.75).len(), 2);
        assert_eq!(names(&category(&set, Some(Feature::SameSite), 100, 0.75)), vec!["C2T"]);
        assert_eq!(names(&category(&set, Some(Feature::ManyTips), 100, 0.75)), vec!["C1T"]);
        assert!(category(&set, Some(Feature::Reversal), 100, 0.75).is_empty());
    }

    #[test]
    fn select_applies_both_thresholds() {
        let all = [moi(0, 9, 10.0), moi(1, 2, 50.0), moi(2, 8, 4.0), moi(3, 5, 5.0)];
        let params = SelectionParams {
            min_confidence: 0.5,
            min_tip_fraction: 0.05,
            tree_tip_count: 90,
        };
        // round(4.5) = 5 tips
        assert_eq!(params.min_tips(), 5.0);
        assert_eq!(names(&select(&all, &params)), vec!["C1T", "C4T"]);
        assert_eq!(select(&all, &SelectionParams::default()).len(), 4);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let all = [moi(5, 3, 1.0), moi(1, 7, 9.0), moi(3, 3, 4.0)];
        let mut view: Vec<&MutationOfInterest> = all.iter().collect();

        sort_mutations(&mut view, SortKey::Site, SortDirection::Ascending);
        assert_eq!(names(&view), vec!["C2T", "C4T", "C6T"]);

        sort_mutations(&mut view, SortKey::Tips, SortDirection::Descending);
        assert_eq!(names(&view), vec!["C2T", "C4T", "C6T"]);

        let mut view: Vec<&MutationOfInterest> = all.iter().collect();
        sort_mutations(&mut view, SortKey::Trees, SortDirection::Descending);
        assert_eq!(names(&view), vec!["C2T", "C6T", "C4T"]);
        sort_mutations(&mut view, SortKey::Trees, SortDirection::Ascending);
        assert_eq!(names(&view), vec!["C6T", "C4T", "C2T"]);
    }

    #[test]
    fn parse_sort_options() {
        assert_eq!("tips".parse::<SortKey>(), Ok(SortKey::Tips));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Descending));
        assert!("depth".parse::<SortKey>().is_err());
    }
}
