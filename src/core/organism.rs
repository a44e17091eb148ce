use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::cluster::Cluster;
use crate::core::scaffold::Scaffold;
use crate::core::serialization::JsonCodec;

/// Name shown for hits whose organism could not be determined
pub const UNKNOWN_ORGANISM: &str = "No organism";

/// An organism (name + strain) and the scaffolds carrying its hits.
///
/// Every distinct strain is its own `Organism`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    /// Organism name, typically genus and species
    #[serde(deserialize_with = "string_or_null")]
    pub name: String,

    /// Strain designation, e.g. "CBS 536.65"; may be empty
    #[serde(deserialize_with = "string_or_null")]
    pub strain: String,

    /// Scaffolds keyed by accession, in discovery order
    #[serde(with = "scaffold_list")]
    pub scaffolds: IndexMap<String, Scaffold>,
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Scaffolds are stored as a list; the map is rebuilt from their accessions
mod scaffold_list {
    use indexmap::IndexMap;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::core::scaffold::Scaffold;

    pub fn serialize<S>(
        scaffolds: &IndexMap<String, Scaffold>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(scaffolds.values())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<IndexMap<String, Scaffold>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<Scaffold>::deserialize(deserializer)?;
        let mut scaffolds = IndexMap::with_capacity(list.len());
        for scaffold in list {
            if scaffolds.contains_key(&scaffold.accession) {
                return Err(D::Error::custom(format!(
                    "duplicate scaffold accession: {}",
                    scaffold.accession
                )));
            }
            scaffolds.insert(scaffold.accession.clone(), scaffold);
        }
        Ok(scaffolds)
    }
}

impl Organism {
    pub fn new(name: impl Into<String>, strain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strain: strain.into(),
            scaffolds: IndexMap::new(),
        }
    }

    /// Get the scaffold with `accession`, creating it if needed
    pub fn scaffold_mut(&mut self, accession: &str) -> &mut Scaffold {
        self.scaffolds
            .entry(accession.to_string())
            .or_insert_with(|| Scaffold::new(accession))
    }

    /// Insert a scaffold, returning any scaffold it replaced
    pub fn insert_scaffold(&mut self, scaffold: Scaffold) -> Option<Scaffold> {
        self.scaffolds.insert(scaffold.accession.clone(), scaffold)
    }

    /// All clusters, scaffold by scaffold (not re-sorted across scaffolds)
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.scaffolds
            .values()
            .flat_map(|scaffold| scaffold.clusters().iter())
    }

    pub fn total_hit_clusters(&self) -> usize {
        self.scaffolds.values().map(|s| s.clusters().len()).sum()
    }

    pub fn total_subjects(&self) -> usize {
        self.scaffolds.values().map(|s| s.subjects().len()).sum()
    }

    /// Name including strain, unless the strain is already part of the name
    pub fn full_name(&self) -> String {
        if self.name.is_empty() {
            return if self.strain.is_empty() {
                UNKNOWN_ORGANISM.to_string()
            } else {
                format!("{UNKNOWN_ORGANISM} {}", self.strain)
            };
        }
        if self.strain.is_empty() || self.name.contains(self.strain.as_str()) {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.strain)
        }
    }
}

impl std::fmt::Display for Organism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ORGANISM: {} {} [{} subjects on {} scaffolds]",
            self.name,
            self.strain,
            self.total_subjects(),
            self.scaffolds.len()
        )
    }
}

impl JsonCodec for Organism {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hit::Hit;
    use crate::core::subject::Subject;

    fn subject(bitscore: f64, start: u64) -> Subject {
        Subject::new(vec![Hit::new("q1", "WP_1.1", 80.0, 90.0, 1e-30, bitscore)])
            .with_location(start, start + 500, None)
    }

    fn organism() -> Organism {
        let mut organism = Organism::new("Aspergillus nidulans", "FGSC A4");
        for (accession, bitscores) in [("scaf_1", [10.0, 20.0]), ("scaf_2", [500.0, 600.0])] {
            let scaffold = organism.scaffold_mut(accession);
            scaffold.add_subject(subject(bitscores[0], 0));
            scaffold.add_subject(subject(bitscores[1], 1_000));
            scaffold
                .add_cluster_indices(vec![vec![0], vec![0, 1]], None)
                .unwrap();
        }
        organism
    }

    #[test]
    fn test_full_name() {
        assert_eq!(
            Organism::new("Aspergillus nidulans", "FGSC A4").full_name(),
            "Aspergillus nidulans FGSC A4"
        );
        assert_eq!(
            Organism::new("Aspergillus nidulans FGSC A4", "FGSC A4").full_name(),
            "Aspergillus nidulans FGSC A4"
        );
        assert_eq!(Organism::new("Escherichia coli", "").full_name(), "Escherichia coli");
        assert_eq!(Organism::new("", "").full_name(), UNKNOWN_ORGANISM);
        assert_eq!(Organism::new("", "K-12").full_name(), "No organism K-12");
    }

    #[test]
    fn test_full_name_strain_never_matched_against_placeholder() {
        assert_eq!(Organism::new("", "organism").full_name(), "No organism organism");
        assert_eq!(Organism::new("", "No").full_name(), "No organism No");
    }

    #[test]
    fn test_clusters_follow_scaffold_order() {
        let organism = organism();
        let scores: Vec<f64> = organism.clusters().map(Cluster::score).collect();
        assert_eq!(scores.len(), 4);
        // scaf_1 clusters come first even though scaf_2 scores higher
        assert!(scores[0] < scores[2]);
        assert_eq!(organism.total_hit_clusters(), 4);
        assert_eq!(organism.total_subjects(), 4);
    }

    #[test]
    fn test_scaffold_mut_reuses_existing() {
        let mut organism = organism();
        organism.scaffold_mut("scaf_1").add_subject(subject(1.0, 5_000));
        assert_eq!(organism.scaffolds.len(), 2);
        assert_eq!(organism.scaffolds["scaf_1"].subjects().len(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            organism().to_string(),
            "ORGANISM: Aspergillus nidulans FGSC A4 [4 subjects on 2 scaffolds]"
        );
    }

    #[test]
    fn test_json_round_trip_keeps_scaffold_order() {
        let organism = organism();
        let json = organism.to_json().unwrap();
        assert!(json.starts_with(r#"{"name":"Aspergillus nidulans","strain":"FGSC A4","scaffolds":["#));

        let restored = Organism::from_json(&json).unwrap();
        let keys: Vec<&str> = restored.scaffolds.keys().map(String::as_str).collect();
        assert_eq!(keys, ["scaf_1", "scaf_2"]);
        assert_eq!(restored, organism);
    }

    #[test]
    fn test_duplicate_scaffold_accession_rejected() {
        let json = r#"{"name":"x","strain":"","scaffolds":[
            {"accession":"a","subjects":[],"clusters":[]},
            {"accession":"a","subjects":[],"clusters":[]}]}"#;
        let err = Organism::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate scaffold accession"));
    }

    #[test]
    fn test_null_strain_loads_as_empty() {
        let json = r#"{"name":"x","strain":null,"scaffolds":[]}"#;
        let organism = Organism::from_json(json).unwrap();
        assert!(organism.strain.is_empty());
    }
}
