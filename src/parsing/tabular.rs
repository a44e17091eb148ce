use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use indexmap::IndexMap;
use tracing::debug;

use crate::core::hit::Hit;
use crate::core::subject::Subject;
use crate::parsing::ParseError;

/// Number of leading columns read from each row
pub const HIT_COLUMNS: usize = 6;

/// Thresholds a hit must meet to be kept; all bounds are inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitFilter {
    /// Minimum percent identity
    pub min_identity: f64,
    /// Minimum percent query coverage
    pub min_coverage: f64,
    /// Maximum e-value
    pub max_evalue: f64,
}

impl Default for HitFilter {
    fn default() -> Self {
        Self {
            min_identity: 30.0,
            min_coverage: 50.0,
            max_evalue: 0.01,
        }
    }
}

impl HitFilter {
    pub fn accepts(&self, hit: &Hit) -> bool {
        hit.identity >= self.min_identity
            && hit.coverage >= self.min_coverage
            && hit.evalue <= self.max_evalue
    }
}

/// Parse a tabular hit file, gzip-compressed if it ends in `.gz`
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` if a row is malformed.
pub fn parse_hits_file(path: &Path, filter: &HitFilter) -> Result<Vec<Hit>, ParseError> {
    let file = File::open(path)?;
    let mut content = String::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        BufReader::new(GzDecoder::new(file)).read_to_string(&mut content)?;
    } else {
        BufReader::new(file).read_to_string(&mut content)?;
    }
    parse_hits_text(&content, filter)
}

/// Parse tab-separated `qseqid sseqid pident qcovhsp evalue bitscore` rows.
///
/// Blank lines, `#` comments and a leading `qseqid` header are skipped. Extra
/// columns after the sixth are ignored. Rows rejected by `filter` are dropped.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row has fewer than six columns or
/// a score that is not a finite number (`inf` and `NaN` included).
pub fn parse_hits_text(text: &str, filter: &HitFilter) -> Result<Vec<Hit>, ParseError> {
    let mut hits = Vec::new();
    let mut rejected = 0usize;
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

        if first_data_line {
            first_data_line = false;
            if fields[0].eq_ignore_ascii_case("qseqid") {
                continue;
            }
        }

        let line_num = i + 1;

        if fields.len() < HIT_COLUMNS {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected at least {HIT_COLUMNS}",
                fields.len()
            )));
        }

        let number = |column: usize, label: &str| -> Result<f64, ParseError> {
            fields[column]
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| {
                    ParseError::InvalidFormat(format!(
                        "Invalid {label} on line {line_num}: '{}'",
                        fields[column]
                    ))
                })
        };

        let hit = Hit::new(
            fields[0],
            fields[1],
            number(2, "identity")?,
            number(3, "coverage")?,
            number(4, "e-value")?,
            number(5, "bitscore")?,
        );

        if filter.accepts(&hit) {
            hits.push(hit);
        } else {
            rejected += 1;
        }
    }

    debug!(kept = hits.len(), rejected, "Parsed tabular hits");
    Ok(hits)
}

/// Group hits by subject id, in order of first appearance.
///
/// Duplicate hits on the same subject are kept once.
pub fn group_by_subject(hits: Vec<Hit>) -> Vec<Subject> {
    let mut subjects: IndexMap<String, Subject> = IndexMap::new();
    for hit in hits {
        subjects
            .entry(hit.subject.clone())
            .or_insert_with(|| Subject::default().with_name(hit.subject.clone()))
            .add_hit(hit);
    }
    subjects.into_values().collect()
}
