//! Cluster scoring.
//!
//! A candidate cluster is scored from three components:
//!
//! - **Bitscore**: for every subject, the best bitscore among its hits (a subject
//!   hit by several queries counts once), summed and divided by 10,000
//! - **Size**: the number of subjects in the cluster
//! - **Synteny**: when the query sequences have a meaningful order (e.g. they
//!   were taken from an annotated genome), +1 for each pair of consecutive
//!   subjects whose best queries are neighbours in that order
//!
//! The bitscore term stays well below 1 for realistic clusters, so it only breaks
//! ties between clusters with the same size and synteny.

pub mod cluster_score;

pub use cluster_score::ClusterScore;
