use super::write_provenance;
use crate::interest::MutationOfInterest;
use crate::utils::Result;
use itertools::Itertools;
use std::io::Write;

const COLUMNS: [&str; 9] = [
    "#mutation",
    "site",
    "from",
    "to",
    "trees",
    "confidence",
    "median_tips",
    "apobec",
    "features",
];

/// Writes one row per mutation of interest.
pub struct MutationsWriter<W: Write> {
    writer: W,
    rows: usize,
}

impl<W: Write> MutationsWriter<W> {
    pub fn new(mut writer: W) -> Result<Self> {
        write_provenance(&mut writer)?;
        writeln!(writer, "{}", COLUMNS.join("\t"))
            .map_err(|e| format!("Failed to write header: {}", e))?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write(&mut self, moi: &MutationOfInterest) -> Result<()> {
        let features = if moi.features.is_empty() {
            ".".to_string()
        } else {
            moi.features
                .iter()
                .map(|(feature, data)| format!("{}:{:.4}", feature, data.confidence))
                .join(",")
        };
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}\t{}\t{:.4}\t{:.1}\t{}\t{}",
            moi.name,
            moi.key().label(),
            moi.mutation.from,
            moi.mutation.to,
            moi.tree_count,
            moi.confidence,
            moi.median_tip_count,
            if moi.is_apobec() { "yes" } else { "no" },
            features
        )
        .map_err(|e| format!("Failed to write {}: {}", moi.name, e))?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush().map_err(|e| e.to_string())?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::Mutation;
    use crate::interest::{Feature, InterestData};
    use crate::utils::Allele;
    use crate::writers::body_lines;

    #[test]
    fn writes_header_and_rows() {
        let mut plain = MutationOfInterest::new(Mutation::new(240, Allele::C, Allele::T, 1.0));
        plain.tree_count = 3;
        plain.confidence = 0.3;
        plain.median_tip_count = 5.0;
        plain.apobec_count = 2;

        let mut flagged = MutationOfInterest::new(Mutation::new(0, Allele::A, Allele::G, 1.0));
        flagged.tree_count = 1;
        flagged.confidence = 0.1;
        for feature in [Feature::SameSite, Feature::Reversal] {
            flagged.features.insert(
                feature,
                InterestData {
                    confidence: 0.1,
                    introductions: vec![],
                },
            );
        }

        let mut writer = MutationsWriter::new(Vec::new()).unwrap();
        writer.write(&plain).unwrap();
        writer.write(&flagged).unwrap();
        assert_eq!(writer.rows(), 2);
        let bytes = writer.finish().unwrap();

        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("##mutinterestVersion="));
        assert_eq!(
            body_lines(&bytes),
            vec![
                "#mutation\tsite\tfrom\tto\ttrees\tconfidence\tmedian_tips\tapobec\tfeatures",
                "C241T\t241\tC\tT\t3\t0.3000\t5.0\tyes\t.",
                "A1G\t1\tA\tG\t1\t0.1000\t0.0\tno\treversal:0.1000,same-site:0.1000",
            ]
        );
    }
}
