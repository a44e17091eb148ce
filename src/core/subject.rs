use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::hit::Hit;
use crate::core::serialization::JsonCodec;
use crate::core::types::Strand;

/// Placeholder shown for missing coordinates or strand in display rows
pub const MISSING_VALUE: &str = "-";

/// A subject sequence location referenced by one or more hits.
///
/// One physical sequence can be hit by several queries; all of those hits are
/// collected on a single `Subject` so the sequence is only counted once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subject {
    /// Hits against this sequence (possibly from different queries)
    pub hits: Vec<Hit>,

    /// Sequence name
    #[serde(default)]
    pub name: Option<String>,

    /// NCBI Identical Protein Group id
    #[serde(default)]
    pub ipg: Option<u64>,

    /// Start of the sequence on its scaffold
    #[serde(default)]
    pub start: Option<u64>,

    /// End of the sequence on its scaffold
    #[serde(default)]
    pub end: Option<u64>,

    #[serde(default)]
    pub strand: Option<Strand>,
}

impl Subject {
    pub fn new(hits: Vec<Hit>) -> Self {
        Self {
            hits,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_ipg(mut self, ipg: u64) -> Self {
        self.ipg = Some(ipg);
        self
    }

    /// Attach genomic coordinates from the enrichment step
    #[must_use]
    pub fn with_location(mut self, start: u64, end: u64, strand: Option<Strand>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self.strand = strand;
        self
    }

    /// Add a hit unless an equal one is already present.
    ///
    /// Returns `true` if the hit was added.
    pub fn add_hit(&mut self, hit: Hit) -> bool {
        if self.hits.contains(&hit) {
            return false;
        }
        self.hits.push(hit);
        true
    }

    /// The hit with the highest bitscore; the earliest one wins ties
    pub fn best_hit(&self) -> Option<&Hit> {
        self.hits.iter().fold(None, |best: Option<&Hit>, hit| match best {
            Some(current) if current.bitscore >= hit.bitscore => Some(current),
            _ => Some(hit),
        })
    }

    /// Whether any hit on this subject came from `query`
    pub fn has_query(&self, query: &str) -> bool {
        self.hits.iter().any(|hit| hit.query == query)
    }

    /// Human-readable label: the sequence name, else the first hit's subject id
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.hits.first().map(|hit| hit.subject.as_str()))
            .unwrap_or("<unnamed>")
    }

    /// Display rows, one per hit: the hit values followed by start, end, strand
    #[must_use]
    pub fn values(&self, decimals: u32) -> Vec<Vec<String>> {
        let start = self
            .start
            .map_or_else(|| MISSING_VALUE.to_string(), |v| v.to_string());
        let end = self
            .end
            .map_or_else(|| MISSING_VALUE.to_string(), |v| v.to_string());
        let strand = self
            .strand
            .map_or_else(|| MISSING_VALUE.to_string(), |s| s.to_string());

        self.hits
            .iter()
            .map(|hit| {
                let mut row: Vec<String> = hit.values(decimals).into();
                row.extend([start.clone(), end.clone(), strand.clone()]);
                row
            })
            .collect()
    }
}

impl PartialEq for Subject {
    fn eq(&self, other: &Self) -> bool {
        let ours: HashSet<&Hit> = self.hits.iter().collect();
        let theirs: HashSet<&Hit> = other.hits.iter().collect();
        ours == theirs
            && self.ipg == other.ipg
            && self.start == other.start
            && self.end == other.end
            && self.strand == other.strand
    }
}

impl Eq for Subject {}

impl JsonCodec for Subject {}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(query: &str, bitscore: f64) -> Hit {
        Hit::new(query, "WP_000001.1", 80.0, 95.0, 1e-40, bitscore)
    }

    #[test]
    fn test_best_hit() {
        let subject = Subject::new(vec![hit("q1", 50.0), hit("q2", 80.0), hit("q3", 20.0)]);
        assert_eq!(subject.best_hit().unwrap().query, "q2");
        assert!(Subject::default().best_hit().is_none());
    }

    #[test]
    fn test_best_hit_tie_prefers_first() {
        let subject = Subject::new(vec![hit("q1", 80.0), hit("q2", 80.0)]);
        assert_eq!(subject.best_hit().unwrap().query, "q1");
    }

    #[test]
    fn test_add_hit_skips_duplicates() {
        let mut subject = Subject::new(vec![hit("q1", 50.0)]);
        assert!(!subject.add_hit(hit("q1", 50.0)));
        assert!(subject.add_hit(hit("q2", 50.0)));
        assert_eq!(subject.hits.len(), 2);
    }

    #[test]
    fn test_equality_is_order_insensitive() {
        let a = Subject::new(vec![hit("q1", 50.0), hit("q2", 80.0)]).with_location(
            100,
            400,
            Some(Strand::Forward),
        );
        let b = Subject::new(vec![hit("q2", 80.0), hit("q1", 50.0)])
            .with_location(100, 400, Some(Strand::Forward))
            .with_name("different name");
        assert_eq!(a, b);

        let moved = b.clone().with_location(101, 400, Some(Strand::Forward));
        assert_ne!(a, moved);
        let flipped = b.with_location(100, 400, Some(Strand::Reverse));
        assert_ne!(a, flipped);
    }

    #[test]
    fn test_values_one_row_per_hit() {
        let subject = Subject::new(vec![hit("q1", 50.0), hit("q2", 80.0)]).with_location(
            10,
            910,
            Some(Strand::Reverse),
        );
        let rows = subject.values(4);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "q1");
        assert_eq!(rows[1][0], "q2");
        assert_eq!(&rows[1][6..], ["10", "910", "-"]);
    }

    #[test]
    fn test_values_missing_coordinates() {
        let subject = Subject::new(vec![hit("q1", 50.0)]);
        let rows = subject.values(4);
        assert_eq!(&rows[0][6..], [MISSING_VALUE, MISSING_VALUE, MISSING_VALUE]);
    }

    #[test]
    fn test_label() {
        let subject = Subject::new(vec![hit("q1", 50.0)]);
        assert_eq!(subject.label(), "WP_000001.1");
        assert_eq!(subject.clone().with_name("geneA").label(), "geneA");
        assert_eq!(Subject::default().label(), "<unnamed>");
    }

    #[test]
    fn test_json_keys_and_optional_fields() {
        let subject = Subject::new(vec![hit("q1", 50.0)])
            .with_ipg(42)
            .with_location(1, 300, Some(Strand::Forward));
        let json = subject.to_json().unwrap();
        assert!(json.contains("\"ipg\":42"));
        assert!(json.contains("\"strand\":\"+\""));
        assert!(json.contains("\"name\":null"));

        // Only hits are required when loading
        let minimal = Subject::from_json(
            r#"{"hits":[{"query":"q1","subject":"s","identity":1.0,
                "coverage":2.0,"evalue":3.0,"bitscore":4.0}]}"#,
        )
        .unwrap();
        assert_eq!(minimal.hits.len(), 1);
        assert!(minimal.start.is_none());
        assert!(minimal.strand.is_none());
    }
}
