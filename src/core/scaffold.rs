use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::cluster::{Cluster, ClusterError};
use crate::core::serialization::JsonCodec;
use crate::core::subject::Subject;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Subject '{subject}' is not on scaffold {accession}")]
    SubjectNotFound { accession: String, subject: String },

    #[error("Cluster index {index} is out of range on scaffold {accession} ({len} subjects)")]
    IndexOutOfRange {
        accession: String,
        index: usize,
        len: usize,
    },

    #[error("Invalid cluster on scaffold {accession}: {source}")]
    Cluster {
        accession: String,
        source: ClusterError,
    },
}

/// A genomic scaffold with the subjects found on it and the clusters built
/// from them.
///
/// Subjects form an append-only arena: clusters refer to them by position, so
/// subjects are never removed or reordered. Clusters are kept sorted by
/// descending score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScaffoldRecord")]
pub struct Scaffold {
    /// Scaffold name, typically an NCBI nucleotide accession
    pub accession: String,

    subjects: Vec<Subject>,

    clusters: Vec<Cluster>,
}

/// Persisted shape of a scaffold, validated before it becomes a `Scaffold`
#[derive(Deserialize)]
struct ScaffoldRecord {
    accession: String,
    subjects: Vec<Subject>,
    clusters: Vec<Cluster>,
}

impl TryFrom<ScaffoldRecord> for Scaffold {
    type Error = ScaffoldError;

    fn try_from(record: ScaffoldRecord) -> Result<Self, Self::Error> {
        let len = record.subjects.len();
        for cluster in &record.clusters {
            if let Some(&index) = cluster.indices().iter().find(|&&index| index >= len) {
                return Err(ScaffoldError::IndexOutOfRange {
                    accession: record.accession,
                    index,
                    len,
                });
            }
        }

        Ok(Self {
            accession: record.accession,
            subjects: record.subjects,
            clusters: record.clusters,
        })
    }
}

impl Scaffold {
    pub fn new(accession: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            subjects: Vec::new(),
            clusters: Vec::new(),
        }
    }

    /// Append a subject and return its index
    pub fn add_subject(&mut self, subject: Subject) -> usize {
        self.subjects.push(subject);
        self.subjects.len() - 1
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, index: usize) -> Option<&Subject> {
        self.subjects.get(index)
    }

    /// Mutable access for accumulating hits or attaching coordinates.
    ///
    /// Scores of clusters already built are not updated; call
    /// [`Scaffold::rescore`] afterwards if needed.
    pub fn subject_mut(&mut self, index: usize) -> Option<&mut Subject> {
        self.subjects.get_mut(index)
    }

    /// Index of the first subject equal to `subject`
    pub fn position(&self, subject: &Subject) -> Option<usize> {
        self.subjects.iter().position(|s| s == subject)
    }

    /// Clusters sorted by descending score
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Subjects of `cluster`, in cluster order
    pub fn cluster_subjects(&self, cluster: &Cluster) -> Vec<&Subject> {
        cluster
            .indices()
            .iter()
            .filter_map(|&index| self.subjects.get(index))
            .collect()
    }

    /// Build clusters from groups of subjects already on this scaffold.
    ///
    /// Every subject is resolved to the index of the first equal subject in
    /// this scaffold. Nothing is added unless every group resolves and scores.
    /// The cluster list is re-sorted by descending score afterwards; ties keep
    /// submission order.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::SubjectNotFound` if a subject is not on this
    /// scaffold, or `ScaffoldError::Cluster` if a cluster cannot be built.
    pub fn add_clusters(
        &mut self,
        groups: &[Vec<Subject>],
        query_order: Option<&[String]>,
    ) -> Result<(), ScaffoldError> {
        let index_groups = groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|subject| {
                        self.position(subject)
                            .ok_or_else(|| ScaffoldError::SubjectNotFound {
                                accession: self.accession.clone(),
                                subject: subject.label().to_string(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.add_cluster_indices(index_groups, query_order)
    }

    /// Build clusters from groups of subject indices.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::IndexOutOfRange` for an index past the subject
    /// list, or `ScaffoldError::Cluster` if a cluster cannot be built.
    pub fn add_cluster_indices(
        &mut self,
        groups: Vec<Vec<usize>>,
        query_order: Option<&[String]>,
    ) -> Result<(), ScaffoldError> {
        let built = groups
            .into_iter()
            .map(|indices| self.build_cluster(indices, query_order))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            scaffold = %self.accession,
            added = built.len(),
            "Adding clusters"
        );

        self.clusters.extend(built);
        self.sort_clusters();
        Ok(())
    }

    /// Recompute every cluster's score and bounds from its subjects.
    ///
    /// Used to apply synteny scoring once a query order is known.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::Cluster` if a cluster cannot be rebuilt; the
    /// existing clusters are left untouched in that case.
    pub fn rescore(&mut self, query_order: Option<&[String]>) -> Result<(), ScaffoldError> {
        let rebuilt = self
            .clusters
            .iter()
            .map(|cluster| self.build_cluster(cluster.indices().to_vec(), query_order))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            scaffold = %self.accession,
            clusters = rebuilt.len(),
            synteny = query_order.is_some(),
            "Rescored clusters"
        );

        self.clusters = rebuilt;
        self.sort_clusters();
        Ok(())
    }

    fn build_cluster(
        &self,
        indices: Vec<usize>,
        query_order: Option<&[String]>,
    ) -> Result<Cluster, ScaffoldError> {
        let mut subjects = Vec::with_capacity(indices.len());
        for &index in &indices {
            let subject = self
                .subjects
                .get(index)
                .ok_or_else(|| ScaffoldError::IndexOutOfRange {
                    accession: self.accession.clone(),
                    index,
                    len: self.subjects.len(),
                })?;
            subjects.push(subject);
        }

        Cluster::build(indices, &subjects, query_order).map_err(|source| ScaffoldError::Cluster {
            accession: self.accession.clone(),
            source,
        })
    }

    /// Stable sort, best score first
    fn sort_clusters(&mut self) {
        self.clusters.sort_by(|a, b| b.score().total_cmp(&a.score()));
    }
}

impl std::fmt::Display for Scaffold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SCAFFOLD: {} [{} hits in {} clusters]",
            self.accession,
            self.subjects.len(),
            self.clusters.len()
        )
    }
}

impl JsonCodec for Scaffold {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hit::Hit;

    fn located(query: &str, bitscore: f64, start: u64) -> Subject {
        Subject::new(vec![Hit::new(query, "WP_1.1", 80.0, 90.0, 1e-30, bitscore)])
            .with_location(start, start + 900, None)
    }

    fn scaffold() -> Scaffold {
        let mut scaffold = Scaffold::new("NC_000001.1");
        scaffold.add_subject(located("q1", 100.0, 0));
        scaffold.add_subject(located("q2", 200.0, 1_000));
        scaffold.add_subject(located("q3", 300.0, 2_000));
        scaffold.add_subject(located("q1", 400.0, 3_000));
        scaffold
    }

    #[test]
    fn test_add_subject_returns_index() {
        let mut scaffold = Scaffold::new("s");
        assert_eq!(scaffold.add_subject(located("q1", 1.0, 0)), 0);
        assert_eq!(scaffold.add_subject(located("q2", 1.0, 10)), 1);
    }

    #[test]
    fn test_add_clusters_resolves_indices() {
        let mut scaffold = scaffold();
        let group = vec![scaffold.subjects()[1].clone(), scaffold.subjects()[2].clone()];
        scaffold.add_clusters(&[group], None).unwrap();

        let cluster = &scaffold.clusters()[0];
        assert_eq!(cluster.indices(), &[1, 2]);
        assert_eq!(cluster.start(), 1_000);
        assert_eq!(cluster.end(), 2_900);

        let subjects = scaffold.cluster_subjects(cluster);
        assert_eq!(subjects.len(), 2);
        assert!(std::ptr::eq(subjects[0], &scaffold.subjects()[1]));
    }

    #[test]
    fn test_add_clusters_sorted_descending() {
        let mut scaffold = scaffold();
        scaffold
            .add_cluster_indices(vec![vec![0], vec![1, 2, 3], vec![1, 2]], None)
            .unwrap();
        let scores: Vec<f64> = scaffold.clusters().iter().map(Cluster::score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(scaffold.clusters()[0].indices(), &[1, 2, 3]);
        assert_eq!(scaffold.clusters()[2].indices(), &[0]);
    }

    #[test]
    fn test_add_clusters_ties_keep_submission_order() {
        let mut scaffold = Scaffold::new("s");
        for start in [0, 1_000, 2_000, 3_000] {
            scaffold.add_subject(located("q1", 100.0, start));
        }
        scaffold
            .add_cluster_indices(vec![vec![2], vec![0], vec![3], vec![1]], None)
            .unwrap();
        let order: Vec<usize> = scaffold.clusters().iter().map(|c| c.indices()[0]).collect();
        assert_eq!(order, [2, 0, 3, 1]);
    }

    #[test]
    fn test_add_clusters_unknown_subject() {
        let mut scaffold = scaffold();
        let stranger = located("q9", 1.0, 50_000);
        let err = scaffold.add_clusters(&[vec![stranger]], None).unwrap_err();
        assert!(matches!(err, ScaffoldError::SubjectNotFound { .. }));
        assert!(scaffold.clusters().is_empty());
    }

    #[test]
    fn test_add_clusters_is_all_or_nothing() {
        let mut scaffold = scaffold();
        let err = scaffold
            .add_cluster_indices(vec![vec![0, 1], vec![2, 99]], None)
            .unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::IndexOutOfRange { index: 99, len: 4, .. }
        ));
        assert!(scaffold.clusters().is_empty());
    }

    #[test]
    fn test_rescore_applies_synteny() {
        let mut scaffold = scaffold();
        scaffold
            .add_cluster_indices(vec![vec![0, 1, 2], vec![3]], None)
            .unwrap();
        let before = scaffold.clusters()[0].score();

        let order = vec!["q1".to_string(), "q2".to_string(), "q3".to_string()];
        scaffold.rescore(Some(order.as_slice())).unwrap();
        let after = scaffold.clusters()[0].score();
        assert!((after - before - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        let mut scaffold = scaffold();
        scaffold.add_cluster_indices(vec![vec![0, 1]], None).unwrap();
        assert_eq!(
            scaffold.to_string(),
            "SCAFFOLD: NC_000001.1 [4 hits in 1 clusters]"
        );
    }

    #[test]
    fn test_json_round_trip() {
        let mut scaffold = scaffold();
        scaffold
            .add_cluster_indices(vec![vec![0, 1], vec![2, 3]], None)
            .unwrap();
        let restored = Scaffold::from_json(&scaffold.to_json().unwrap()).unwrap();
        assert_eq!(restored, scaffold);
        for (a, b) in restored.clusters().iter().zip(scaffold.clusters()) {
            assert_eq!(restored.cluster_subjects(a), scaffold.cluster_subjects(b));
        }
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_index() {
        let json = r#"{"accession":"s","subjects":[],
            "clusters":[{"indices":[0],"score":1.0,"start":1,"end":2}]}"#;
        let err = Scaffold::from_json(json).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_deserialize_requires_keys() {
        assert!(Scaffold::from_json(r#"{"accession":"s","subjects":[]}"#).is_err());
    }
}
