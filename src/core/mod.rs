//! Core data model for aggregated homology search results.
//!
//! Results form a strict hierarchy, each level owning the next:
//!
//! - [`Session`]: query sequences, search parameters and organisms
//! - [`Organism`]: a named strain and its scaffolds
//! - [`Scaffold`]: the [`Subject`]s found on one genomic sequence, plus the
//!   [`Cluster`]s built from them
//! - [`Subject`]: one sequence location and the [`Hit`]s against it
//!
//! ## Subject references
//!
//! A cluster stores the positions of its subjects in the owning scaffold's
//! subject list rather than the subjects themselves:
//!
//! | Field | Persisted as |
//! |-------|--------------|
//! | `Scaffold::subjects` | full subject objects |
//! | `Cluster::indices` | positions into `subjects` |
//!
//! Every entity implements [`JsonCodec`]; a session survives a JSON round
//! trip unchanged, cluster scores included.
//!
//! [`Session`]: session::Session
//! [`Organism`]: organism::Organism
//! [`Scaffold`]: scaffold::Scaffold
//! [`Subject`]: subject::Subject
//! [`Cluster`]: cluster::Cluster
//! [`Hit`]: hit::Hit
//! [`JsonCodec`]: serialization::JsonCodec

pub mod cluster;
pub mod hit;
pub mod organism;
pub mod scaffold;
pub mod serialization;
pub mod session;
pub mod subject;
pub mod types;
