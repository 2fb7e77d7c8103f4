use serde::{Deserialize, Deserializer};
use std::{fmt, str::FromStr};

pub const NUM_ALLELES: usize = 4;

/// A real nucleotide. Ambiguity codes never reach this crate.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Allele {
    A,
    C,
    G,
    T,
}

impl Allele {
    pub const ALL: [Allele; NUM_ALLELES] = [Allele::A, Allele::C, Allele::G, Allele::T];

    /// Row of this allele in per-allele arrays.
    pub fn index(self) -> usize {
        match self {
            Allele::A => 0,
            Allele::C => 1,
            Allele::G => 2,
            Allele::T => 3,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Allele::A => 'A',
            Allele::C => 'C',
            Allele::G => 'G',
            Allele::T => 'T',
        }
    }
}

impl TryFrom<char> for Allele {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Allele::A),
            'C' => Ok(Allele::C),
            'G' => Ok(Allele::G),
            'T' => Ok(Allele::T),
            _ => Err(format!("Invalid allele '{}': must be one of A, C, G, T", c)),
        }
    }
}

impl FromStr for Allele {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Allele::try_from(c),
            _ => Err(format!("Invalid allele '{}': expected a single base", s)),
        }
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl<'de> Deserialize<'de> for Allele {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Decodes a root sequence such as `"ACGT"` into alleles.
pub fn parse_sequence(seq: &str) -> Result<Vec<Allele>, String> {
    seq.chars()
        .enumerate()
        .map(|(pos, c)| Allele::try_from(c).map_err(|e| format!("Position {}: {}", pos + 1, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_allele_ok() {
        assert_eq!("A".parse::<Allele>(), Ok(Allele::A));
        assert_eq!("t".parse::<Allele>(), Ok(Allele::T));
    }

    #[test]
    fn parse_allele_rejects_ambiguity_codes() {
        assert!("N".parse::<Allele>().is_err());
        assert!("AC".parse::<Allele>().is_err());
        assert!("".parse::<Allele>().is_err());
    }

    #[test]
    fn allele_index_matches_all_order() {
        for (i, allele) in Allele::ALL.iter().enumerate() {
            assert_eq!(allele.index(), i);
        }
    }

    #[test]
    fn parse_sequence_reports_position() {
        assert_eq!(
            parse_sequence("ACGT"),
            Ok(vec![Allele::A, Allele::C, Allele::G, Allele::T])
        );
        assert_eq!(
            parse_sequence("ACXT"),
            Err("Position 3: Invalid allele 'X': must be one of A, C, G, T".to_string())
        );
    }
}
