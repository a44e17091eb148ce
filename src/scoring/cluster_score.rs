use std::collections::HashMap;

use crate::core::cluster::ClusterError;
use crate::core::hit::Hit;
use crate::core::subject::Subject;

/// Divisor applied to the summed bitscore before it enters the composite score
pub const BITSCORE_DIVISOR: f64 = 10_000.0;

#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Score components of a candidate cluster
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterScore {
    /// Sum of the best bitscore of every subject
    pub bitscore: f64,

    /// Number of subjects in the cluster
    pub subject_count: usize,

    /// Number of consecutive subject pairs that conserve query order
    pub synteny: usize,

    /// `bitscore / 10000 + subject_count + synteny`
    pub composite: f64,
}

impl ClusterScore {
    /// Score a cluster made of `subjects`, given in scaffold order.
    ///
    /// `query_order` is the canonical order of the query sequences; synteny is
    /// only scored when it is given and non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::SubjectWithoutHits` if a subject has no hits, or
    /// `ClusterError::UnknownQuery` if a best hit's query is missing from
    /// `query_order`.
    pub fn calculate(
        subjects: &[&Subject],
        query_order: Option<&[String]>,
    ) -> Result<Self, ClusterError> {
        let best_hits = best_hits(subjects)?;

        let bitscore: f64 = best_hits.iter().map(|hit| hit.bitscore).sum();
        let synteny = match query_order {
            Some(order) if !order.is_empty() => synteny_score(&best_hits, order)?,
            _ => 0,
        };
        let subject_count = subjects.len();

        let composite =
            bitscore / BITSCORE_DIVISOR + count_to_f64(subject_count) + count_to_f64(synteny);

        Ok(Self {
            bitscore,
            subject_count,
            synteny,
            composite,
        })
    }
}

/// Best-scoring hit of every subject, in subject order
fn best_hits<'a>(subjects: &[&'a Subject]) -> Result<Vec<&'a Hit>, ClusterError> {
    subjects
        .iter()
        .enumerate()
        .map(|(position, &subject)| {
            subject
                .best_hit()
                .ok_or(ClusterError::SubjectWithoutHits { position })
        })
        .collect()
}

/// Count consecutive subjects whose best queries are adjacent in `query_order`.
///
/// Each subject is paired as (query position, subject position). A consecutive
/// pair scores when the query positions differ by less than 2 and by exactly
/// as much as the subject positions.
fn synteny_score(best_hits: &[&Hit], query_order: &[String]) -> Result<usize, ClusterError> {
    let mut query_positions: HashMap<&str, usize> = HashMap::new();
    for (position, query) in query_order.iter().enumerate() {
        query_positions.entry(query.as_str()).or_insert(position);
    }

    let positions: Vec<(usize, usize)> = best_hits
        .iter()
        .enumerate()
        .map(|(subject_position, hit)| {
            query_positions
                .get(hit.query.as_str())
                .map(|&query_position| (query_position, subject_position))
                .ok_or_else(|| ClusterError::UnknownQuery(hit.query.clone()))
        })
        .collect::<Result<_, _>>()?;

    let score = positions
        .windows(2)
        .filter(|pair| {
            let query_step = pair[0].0.abs_diff(pair[1].0);
            let subject_step = pair[0].1.abs_diff(pair[1].1);
            query_step < 2 && query_step == subject_step
        })
        .count();

    Ok(score)
}
