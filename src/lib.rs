//! # hit-cluster
//!
//! A library for aggregating homology search hits into scored gene clusters.
//!
//! A search of several query proteins against a set of genomes produces
//! thousands of individual hits. `hit-cluster` organises them by the genome
//! they were found in: hits against the same sequence become a [`Subject`],
//! subjects are placed on their [`Scaffold`], and runs of co-located subjects
//! are grouped into [`Cluster`]s and scored. Everything hangs off a
//! [`Session`], which can be saved, loaded, merged and rendered as tables.
//!
//! ## Features
//!
//! - **Cluster scoring**: summed best bitscores, subject count and an optional
//!   synteny bonus for conserved query order
//! - **Lossless sessions**: JSON round trips preserve every score and index
//! - **Merging**: combine sessions searched with the same queries
//! - **Tables**: per-cluster summaries and presence/absence matrices
//!
//! ## Example
//!
//! ```rust
//! use hit_cluster::{Hit, Organism, Session, Subject};
//! use hit_cluster::output::FormatOptions;
//!
//! let mut organism = Organism::new("Aspergillus nidulans", "FGSC A4");
//! let scaffold = organism.scaffold_mut("ChrII_A_nidulans_FGSC_A4");
//! scaffold.add_subject(
//!     Subject::new(vec![Hit::new("AN1", "gb|EAA59869.1|", 99.0, 100.0, 0.0, 850.0)])
//!         .with_location(1_200, 3_400, None),
//! );
//! scaffold.add_subject(
//!     Subject::new(vec![Hit::new("AN2", "EAA59870.1", 95.0, 98.0, 1e-150, 600.0)])
//!         .with_location(3_900, 5_100, None),
//! );
//! scaffold.add_cluster_indices(vec![vec![0, 1]], None).unwrap();
//!
//! let mut session = Session::new(vec!["AN1".to_string(), "AN2".to_string()]);
//! session.add_organism(organism);
//! session.rescore(true).unwrap();
//!
//! let table = session.format("binary", &FormatOptions::default()).unwrap();
//! assert!(table.contains("ChrII_A_nidulans_FGSC_A4"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Entity types and session I/O
//! - [`scoring`]: Cluster scoring
//! - [`parsing`]: Tabular BLAST/DIAMOND hit parsing
//! - [`output`]: Summary and binary tables
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod output;
pub mod parsing;
pub mod scoring;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::cluster::Cluster;
pub use crate::core::hit::Hit;
pub use crate::core::organism::Organism;
pub use crate::core::scaffold::Scaffold;
pub use crate::core::serialization::JsonCodec;
pub use crate::core::session::{Session, SessionError};
pub use crate::core::subject::Subject;
pub use crate::core::types::*;
pub use crate::scoring::ClusterScore;
