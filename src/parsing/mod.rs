//! Parsers for homology search results.
//!
//! - **Tabular hits**: BLAST/DIAMOND `-outfmt 6` rows with the columns
//!   `qseqid sseqid pident qcovhsp evalue bitscore`
//!
//! ## Example
//!
//! ```rust
//! use hit_cluster::parsing::tabular::{parse_hits_text, HitFilter};
//!
//! let table = "geneA\tref|WP_011.1|\t87.5\t99\t1e-120\t410\n";
//! let hits = parse_hits_text(table, &HitFilter::default()).unwrap();
//! assert_eq!(hits[0].subject, "WP_011.1");
//! ```

use thiserror::Error;

pub mod tabular;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid hit table: {0}")]
    InvalidFormat(String),
}
