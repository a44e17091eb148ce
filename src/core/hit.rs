use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::serialization::JsonCodec;
use crate::utils::format::{format_general, format_rounded};

/// A single match between a query sequence and a subject sequence.
///
/// Equality and hashing only consider the query and the four scores, so two
/// hits reported against differently-named copies of the same sequence are
/// treated as duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    /// Name of the query sequence
    pub query: String,

    /// Accession of the subject sequence, stripped of database header tags
    #[serde(deserialize_with = "deserialize_subject")]
    pub subject: String,

    /// Percentage identity
    pub identity: f64,

    /// Query coverage (%)
    pub coverage: f64,

    pub evalue: f64,

    pub bitscore: f64,
}

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:^|\|)(?:gb|ref|emb|dbj|sp|tr|pdb)\|([A-Za-z0-9._]+)")
            .expect("header pattern is a valid regex")
    })
}

/// Extract the bare accession from a pipe-delimited database header.
///
/// `gb|ABC123.1|description` becomes `ABC123.1`; identifiers without a
/// database tag are returned unchanged.
#[must_use]
pub fn normalize_subject(raw: &str) -> String {
    header_pattern()
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map_or_else(|| raw.to_string(), |m| m.as_str().to_string())
}

fn deserialize_subject<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_subject(&raw))
}

/// Fold negative zero so that equal floats share a bit pattern
fn float_key(value: f64) -> u64 {
    if value == 0.0 {
        0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl Hit {
    /// Create a hit, normalizing the subject id.
    ///
    /// Scores must be finite: JSON has no representation for `inf` or `NaN`,
    /// so a session holding one cannot be loaded back. Parsers reject such
    /// values before they reach this constructor.
    pub fn new(
        query: impl Into<String>,
        subject: impl AsRef<str>,
        identity: f64,
        coverage: f64,
        evalue: f64,
        bitscore: f64,
    ) -> Self {
        Self {
            query: query.into(),
            subject: normalize_subject(subject.as_ref()),
            identity,
            coverage,
            evalue,
            bitscore,
        }
    }

    /// Copy of this hit attributed to another query
    #[must_use]
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self.clone()
        }
    }

    /// Copy of this hit pointing at another subject (normalized like `new`)
    #[must_use]
    pub fn with_subject(&self, subject: impl AsRef<str>) -> Self {
        Self {
            subject: normalize_subject(subject.as_ref()),
            ..self.clone()
        }
    }

    /// Copy of this hit with replaced scores
    #[must_use]
    pub fn with_scores(&self, identity: f64, coverage: f64, evalue: f64, bitscore: f64) -> Self {
        Self {
            identity,
            coverage,
            evalue,
            bitscore,
            ..self.clone()
        }
    }

    /// Display values: query, subject, identity, coverage, e-value, bitscore.
    ///
    /// Percentages and bitscore are rounded to `decimals` places, the e-value is
    /// shown with `decimals` significant digits.
    #[must_use]
    pub fn values(&self, decimals: u32) -> [String; 6] {
        [
            self.query.clone(),
            self.subject.clone(),
            format_rounded(self.identity, decimals),
            format_rounded(self.coverage, decimals),
            format_general(self.evalue, decimals as usize),
            format_rounded(self.bitscore, decimals),
        ]
    }

    fn key(&self) -> (&str, u64, u64, u64, u64) {
        (
            self.query.as_str(),
            float_key(self.bitscore),
            float_key(self.identity),
            float_key(self.coverage),
            float_key(self.evalue),
        )
    }
}

impl PartialEq for Hit {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Hit {}

impl Hash for Hit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl std::fmt::Display for Hit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Hit: {} - {}: {:.2}%/{:.2}%",
            self.query, self.subject, self.identity, self.coverage
        )
    }
}

impl JsonCodec for Hit {}
