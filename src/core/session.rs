use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::ops::Add;
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::organism::Organism;
use crate::core::scaffold::ScaffoldError;
use crate::core::serialization::JsonCodec;
use crate::output::{self, FormatOptions, TableKind};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to read or write session: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse session: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Query sequences do not match: {left:?} vs {right:?}")]
    QueryMismatch {
        left: Vec<String>,
        right: Vec<String>,
    },

    #[error("No session files were given")]
    NoSessions,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),
}

/// Results of one search: the query sequences, the search parameters and
/// every organism with hits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Query names, in the order they were searched
    #[serde(default, deserialize_with = "null_as_default")]
    pub queries: Vec<String>,

    /// Query name to amino acid sequence
    #[serde(default, deserialize_with = "null_as_default")]
    pub sequences: IndexMap<String, String>,

    /// Search parameters, stored verbatim
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Map<String, Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub organisms: Vec<Organism>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

impl Session {
    pub fn new(queries: Vec<String>) -> Self {
        Self {
            queries,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sequences(mut self, sequences: IndexMap<String, String>) -> Self {
        self.sequences = sequences;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = params;
        self
    }

    pub fn add_organism(&mut self, organism: Organism) {
        self.organisms.push(organism);
    }

    /// Combine two sessions searched with the same queries.
    ///
    /// The result keeps this session's queries, sequences and parameters and
    /// lists this session's organisms followed by `other`'s. Neither operand
    /// is modified.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QueryMismatch` unless both sessions have the same
    /// queries in the same order.
    pub fn merge(&self, other: &Session) -> Result<Session, SessionError> {
        let mut merged = self.clone();
        merged.absorb(other)?;
        Ok(merged)
    }

    fn absorb(&mut self, other: &Session) -> Result<(), SessionError> {
        if self.queries != other.queries {
            return Err(SessionError::QueryMismatch {
                left: self.queries.clone(),
                right: other.queries.clone(),
            });
        }

        debug!(
            organisms = self.organisms.len(),
            incoming = other.organisms.len(),
            "Merging sessions"
        );
        self.organisms.extend(other.organisms.iter().cloned());
        Ok(())
    }

    /// Load a session from a JSON file (gzip-compressed if it ends in `.gz`)
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the file cannot be read, or
    /// `SessionError::Json` if it is not a valid session.
    pub fn from_file(path: &Path) -> Result<Self, SessionError> {
        let file = File::open(path)?;
        let session = if is_gzipped(path) {
            Self::from_reader(BufReader::new(GzDecoder::new(file)))?
        } else {
            Self::from_reader(BufReader::new(file))?
        };

        info!(
            path = %path.display(),
            organisms = session.organisms.len(),
            "Loaded session"
        );
        Ok(session)
    }

    /// Load several session files and merge them in order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSessions` for an empty list, any error from
    /// [`Session::from_file`], or `SessionError::QueryMismatch` if the files
    /// were searched with different queries.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, SessionError> {
        let (first, rest) = paths.split_first().ok_or(SessionError::NoSessions)?;
        let mut session = Self::from_file(first.as_ref())?;
        for path in rest {
            session.absorb(&Self::from_file(path.as_ref())?)?;
        }
        Ok(session)
    }

    /// Write the session as JSON, gzip-compressed if `path` ends in `.gz`
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` or `SessionError::Json` if writing fails.
    pub fn to_file(&self, path: &Path) -> Result<(), SessionError> {
        let writer = BufWriter::new(File::create(path)?);
        if is_gzipped(path) {
            let mut encoder = GzEncoder::new(writer, Compression::default());
            self.to_writer(&mut encoder)?;
            encoder.finish()?.flush()?;
        } else {
            let mut writer = writer;
            self.to_writer(&mut writer)?;
            writer.flush()?;
        }

        debug!(path = %path.display(), "Wrote session");
        Ok(())
    }

    /// Render the session as a `"summary"` or `"binary"` table.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidArgument` for any other `kind`.
    pub fn format(&self, kind: &str, options: &FormatOptions) -> Result<String, SessionError> {
        match TableKind::parse(kind) {
            Some(TableKind::Summary) => Ok(output::summary(self, options)),
            Some(TableKind::Binary) => Ok(output::binary(self, options)),
            None => Err(SessionError::InvalidArgument(format!(
                "unknown table kind '{kind}', expected 'summary' or 'binary'"
            ))),
        }
    }

    /// Recompute every cluster score, optionally scoring synteny against the
    /// query order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Scaffold` if a cluster cannot be rebuilt.
    pub fn rescore(&mut self, synteny: bool) -> Result<(), SessionError> {
        let query_order = synteny.then_some(self.queries.as_slice());
        for organism in &mut self.organisms {
            for scaffold in organism.scaffolds.values_mut() {
                scaffold.rescore(query_order)?;
            }
        }
        Ok(())
    }

    pub fn total_hit_clusters(&self) -> usize {
        self.organisms.iter().map(Organism::total_hit_clusters).sum()
    }
}

impl Add<&Session> for &Session {
    type Output = Result<Session, SessionError>;

    fn add(self, other: &Session) -> Self::Output {
        self.merge(other)
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SESSION: {} queries, {} organisms, {} clusters",
            self.queries.len(),
            self.organisms.len(),
            self.total_hit_clusters()
        )
    }
}

impl JsonCodec for Session {}
