use crate::core::organism::Organism;
use crate::core::scaffold::Scaffold;
use crate::core::session::Session;
use crate::output::{render_table, FormatOptions};
use crate::utils::format::format_rounded;

/// Column headers of the per-cluster hit table
pub const SUMMARY_HEADERS: [&str; 9] = [
    "Query", "Subject", "Identity", "Coverage", "E-value", "Bitscore", "Start", "End", "Strand",
];

/// Summary of every organism that has clusters.
///
/// Organisms are separated by a blank line; each one lists its clusters
/// scaffold by scaffold.
pub fn summary(session: &Session, options: &FormatOptions) -> String {
    session
        .organisms
        .iter()
        .filter(|organism| organism.total_hit_clusters() > 0)
        .map(|organism| summarise_organism(organism, options))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn summarise_organism(organism: &Organism, options: &FormatOptions) -> String {
    let name = organism.full_name();
    let mut blocks = vec![format!("{name}\n{}", "=".repeat(name.chars().count()))];
    blocks.extend(
        organism
            .scaffolds
            .values()
            .filter_map(|scaffold| summarise_scaffold(scaffold, options)),
    );
    blocks.join("\n")
}

/// Cluster blocks of one scaffold, or `None` if it has no clusters
pub fn summarise_scaffold(scaffold: &Scaffold, options: &FormatOptions) -> Option<String> {
    if scaffold.clusters().is_empty() {
        return None;
    }

    let blocks: Vec<String> = scaffold
        .clusters()
        .iter()
        .map(|cluster| {
            let mut rows: Vec<Vec<String>> = Vec::new();
            if !options.hide_headers {
                rows.push(SUMMARY_HEADERS.iter().map(|h| (*h).to_string()).collect());
            }
            for subject in scaffold.cluster_subjects(cluster) {
                rows.extend(subject.values(options.decimals));
            }
            format!(
                "{}:{}-{}\nScore: {}\n{}\n",
                scaffold.accession,
                cluster.start(),
                cluster.end(),
                format_rounded(cluster.score(), options.decimals),
                render_table(&rows, options.delimiter.as_deref()),
            )
        })
        .collect();

    Some(blocks.join("\n"))
}
