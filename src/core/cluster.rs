use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::serialization::JsonCodec;
use crate::core::subject::Subject;
use crate::scoring::ClusterScore;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("Cannot build a cluster without subjects")]
    Empty,

    #[error("Cluster has {indices} indices but {subjects} subjects")]
    LengthMismatch { indices: usize, subjects: usize },

    #[error("Subject at cluster position {position} has no hits")]
    SubjectWithoutHits { position: usize },

    #[error("Subject {index} has no genomic coordinates")]
    MissingCoordinates { index: usize },

    #[error("Query '{0}' is not in the query sequence order")]
    UnknownQuery(String),
}

/// A scored group of co-located subjects on one scaffold.
///
/// A cluster does not own its subjects: `indices` point into the subject list
/// of the parent [`Scaffold`](crate::core::scaffold::Scaffold), which must not
/// be reordered once clusters are built. Only indices, score and bounds are
/// serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    indices: Vec<usize>,
    score: f64,
    start: u64,
    end: u64,
}

impl Cluster {
    /// Build a cluster and compute its score.
    ///
    /// `subjects` are the subjects behind `indices`, in the same order, which
    /// callers keep in scaffold position order: the cluster starts at the first
    /// subject's start and ends at the last subject's end.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::Empty` for an empty group,
    /// `ClusterError::LengthMismatch` if `indices` and `subjects` differ in
    /// length, `ClusterError::MissingCoordinates` if the bounding subjects lack
    /// coordinates, or any scoring error.
    pub fn build(
        indices: Vec<usize>,
        subjects: &[&Subject],
        query_order: Option<&[String]>,
    ) -> Result<Self, ClusterError> {
        let (Some(first), Some(last)) = (subjects.first(), subjects.last()) else {
            return Err(ClusterError::Empty);
        };
        if indices.len() != subjects.len() {
            return Err(ClusterError::LengthMismatch {
                indices: indices.len(),
                subjects: subjects.len(),
            });
        }

        let start = first.start.ok_or(ClusterError::MissingCoordinates {
            index: indices[0],
        })?;
        let end = last.end.ok_or(ClusterError::MissingCoordinates {
            index: indices[indices.len() - 1],
        })?;

        let score = ClusterScore::calculate(subjects, query_order)?;

        Ok(Self {
            indices,
            score: score.composite,
            start,
            end,
        })
    }

    /// Restore a cluster from stored values without recomputing anything
    pub fn from_parts(indices: Vec<usize>, score: f64, start: u64, end: u64) -> Self {
        Self {
            indices,
            score,
            start,
            end,
        }
    }

    /// Positions of this cluster's subjects in the parent scaffold
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl JsonCodec for Cluster {}
