use crate::core::session::Session;
use crate::output::{render_table, FormatOptions};
use crate::utils::format::format_rounded;

/// Leading columns of the binary table, followed by one column per query
pub const BINARY_HEADERS: [&str; 5] = ["Organism", "Scaffold", "Start", "End", "Score"];

/// Presence/absence table: one row per cluster, one count column per query
pub fn binary(session: &Session, options: &FormatOptions) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();

    if !options.hide_headers {
        let mut header: Vec<String> = BINARY_HEADERS.iter().map(|h| (*h).to_string()).collect();
        header.extend(session.queries.iter().cloned());
        rows.push(header);
    }

    for organism in &session.organisms {
        let name = organism.full_name();
        for scaffold in organism.scaffolds.values() {
            for cluster in scaffold.clusters() {
                let subjects = scaffold.cluster_subjects(cluster);
                let mut row = vec![
                    name.clone(),
                    scaffold.accession.clone(),
                    cluster.start().to_string(),
                    cluster.end().to_string(),
                    format_rounded(cluster.score(), options.decimals),
                ];
                row.extend(session.queries.iter().map(|query| {
                    subjects
                        .iter()
                        .filter(|subject| subject.has_query(query))
                        .count()
                        .to_string()
                }));
                rows.push(row);
            }
        }
    }

    render_table(&rows, options.delimiter.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hit::Hit;
    use crate::core::organism::Organism;
    use crate::core::subject::Subject;

    fn located(hits: Vec<Hit>, start: u64) -> Subject {
        Subject::new(hits).with_location(start, start + 300, None)
    }

    #[test]
    fn test_binary_counts_subjects_per_query() {
        let mut organism = Organism::new("Bacillus subtilis", "168");
        let scaffold = organism.scaffold_mut("NC_000964.3");
        scaffold.add_subject(located(
            vec![
                Hit::new("q1", "A", 90.0, 90.0, 0.0, 100.0),
                Hit::new("q2", "A", 50.0, 90.0, 0.0, 40.0),
            ],
            0,
        ));
        scaffold.add_subject(located(vec![Hit::new("q1", "B", 80.0, 90.0, 0.0, 90.0)], 500));
        scaffold.add_cluster_indices(vec![vec![0, 1]], None).unwrap();

        let mut session = Session::new(vec!["q1".into(), "q2".into(), "q3".into()]);
        session.add_organism(organism);

        let options = FormatOptions {
            delimiter: Some(",".to_string()),
            ..FormatOptions::default()
        };
        let table = binary(&session, &options);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Organism,Scaffold,Start,End,Score,q1,q2,q3");
        assert_eq!(lines[1], "Bacillus subtilis 168,NC_000964.3,0,800,2.019,2,1,0");
    }

    #[test]
    fn test_binary_headers_only_for_empty_session() {
        let session = Session::new(vec!["q1".into()]);
        let table = binary(&session, &FormatOptions::default());
        assert_eq!(table, "Organism  Scaffold  Start  End  Score  q1");
    }
}
