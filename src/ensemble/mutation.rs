use crate::utils::Allele;
use std::{fmt, str::FromStr};

/// Identity of a substitution: two events are the same mutation when site and
/// alleles agree, whatever their times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MutationKey {
    pub site: u32,
    pub from: Allele,
    pub to: Allele,
}

impl MutationKey {
    pub fn new(site: u32, from: Allele, to: Allele) -> Self {
        Self { site, from, to }
    }

    /// Parses names like `C241T`; the number is the 1-based site label.
    pub fn from_name(name: &str) -> Result<Self, String> {
        let error_msg = || format!("Invalid mutation name: {}", name);
        let name = name.trim();
        let mut chars = name.chars();
        let from = chars.next().ok_or_else(error_msg)?;
        let to = chars.next_back().ok_or_else(error_msg)?;
        let label: u32 = chars.as_str().parse().map_err(|_| error_msg())?;
        if label == 0 {
            return Err(error_msg());
        }
        Ok(Self {
            site: label - 1,
            from: Allele::try_from(from).map_err(|_| error_msg())?,
            to: Allele::try_from(to).map_err(|_| error_msg())?,
        })
    }

    pub fn name(&self) -> String {
        self.to_string()
    }

    /// 1-based site number used in names and reports.
    pub fn label(&self) -> u64 {
        u64::from(self.site) + 1
    }
}

impl fmt::Display for MutationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.from, self.label(), self.to)
    }
}

impl FromStr for MutationKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// A substitution event on the branch above a node. A non-finite `time` marks
/// an event that could not be placed on the time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mutation {
    pub site: u32,
    pub from: Allele,
    pub to: Allele,
    pub time: f64,
}

impl Mutation {
    pub fn new(site: u32, from: Allele, to: Allele, time: f64) -> Self {
        Self {
            site,
            from,
            to,
            time,
        }
    }

    pub fn key(&self) -> MutationKey {
        MutationKey::new(self.site, self.from, self.to)
    }

    pub fn name(&self) -> String {
        self.key().name()
    }

    pub fn is_placed(&self) -> bool {
        self.time.is_finite()
    }
}
