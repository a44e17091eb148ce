//! Session persistence and merge behaviour through the public API.

use hit_cluster::{Cluster, Hit, JsonCodec, Organism, Session, SessionError, Strand, Subject};

const SESSION_JSON: &str = r#"{
  "queries": ["AN1", "AN2", "AN3"],
  "sequences": {"AN1": "MKVLA", "AN2": "MSTLL", "AN3": "MPQRS"},
  "params": {"mode": "remote", "database": "nr", "max_gap": 20000},
  "organisms": [
    {
      "name": "Aspergillus nidulans",
      "strain": "FGSC A4",
      "scaffolds": [
        {
          "accession": "BN001302.1",
          "subjects": [
            {"hits": [{"query": "AN1", "subject": "CBF71234.1", "identity": 100.0,
                       "coverage": 100.0, "evalue": 0.0, "bitscore": 812.4}],
             "name": "CBF71234.1", "ipg": 123, "start": 1000, "end": 2600, "strand": "+"},
            {"hits": [{"query": "AN2", "subject": "CBF71235.1", "identity": 98.2,
                       "coverage": 100.0, "evalue": 1e-180, "bitscore": 640.0},
                      {"query": "AN3", "subject": "CBF71235.1", "identity": 31.0,
                       "coverage": 60.0, "evalue": 1e-5, "bitscore": 48.9}],
             "name": "CBF71235.1", "ipg": null, "start": 3100, "end": 4200, "strand": "-"},
            {"hits": [{"query": "AN3", "subject": "CBF71236.1", "identity": 99.5,
                       "coverage": 97.0, "evalue": 1e-200, "bitscore": 701.3}],
             "name": null, "ipg": null, "start": 4800, "end": 6100, "strand": "+"}
          ],
          "clusters": [
            {"indices": [0, 1, 2], "score": 5.21537, "start": 1000, "end": 6100},
            {"indices": [1], "score": 1.064, "start": 3100, "end": 4200}
          ]
        }
      ]
    }
  ]
}"#;

fn load() -> Session {
    Session::from_json(SESSION_JSON).unwrap()
}

#[test]
fn test_load_keeps_stored_scores() {
    let session = load();
    let scaffold = &session.organisms[0].scaffolds["BN001302.1"];
    let scores: Vec<f64> = scaffold.clusters().iter().map(Cluster::score).collect();
    assert_eq!(scores, [5.21537, 1.064]);
}

#[test]
fn test_indices_resolve_to_same_subjects_after_round_trip() {
    let session = load();
    let restored = Session::from_json(&session.to_json().unwrap()).unwrap();
    assert_eq!(restored, session);

    let before = &session.organisms[0].scaffolds["BN001302.1"];
    let after = &restored.organisms[0].scaffolds["BN001302.1"];
    for (a, b) in before.clusters().iter().zip(after.clusters()) {
        assert_eq!(a.indices(), b.indices());
        assert_eq!(before.cluster_subjects(a), after.cluster_subjects(b));
    }
    assert_eq!(after.subjects()[1].strand, Some(Strand::Reverse));
}

#[test]
fn test_round_trip_preserves_params_order() {
    let json = load().to_json().unwrap();
    let mode = json.find("\"mode\"").unwrap();
    let database = json.find("\"database\"").unwrap();
    let max_gap = json.find("\"max_gap\"").unwrap();
    assert!(mode < database && database < max_gap);
}

#[test]
fn test_rescore_with_synteny() {
    let mut session = load();
    session.rescore(true).unwrap();
    let scaffold = &session.organisms[0].scaffolds["BN001302.1"];
    let best = &scaffold.clusters()[0];

    // Best hits AN1, AN2, AN3 in subject order: two syntenic pairs
    let expected = (812.4 + 640.0 + 701.3) / 10_000.0 + 3.0 + 2.0;
    assert!((best.score() - expected).abs() < 1e-9);
    assert_eq!((best.start(), best.end()), (1000, 6100));
}

#[test]
fn test_merge_with_copy_doubles_organisms() {
    let session = load();
    let merged = (&session + &session.clone()).unwrap();
    assert_eq!(merged.organisms.len(), 2);
    assert_eq!(merged.queries, session.queries);
    assert_eq!(merged.params, session.params);
}

#[test]
fn test_merge_mismatched_queries_leaves_operands_unchanged() {
    let left = load();
    let mut right = Session::new(vec!["AN1".to_string()]);
    right.add_organism(Organism::new("Aspergillus fumigatus", "Af293"));
    let (left_before, right_before) = (left.clone(), right.clone());

    let err = left.merge(&right).unwrap_err();
    assert!(matches!(err, SessionError::QueryMismatch { .. }));
    assert_eq!(left, left_before);
    assert_eq!(right, right_before);
}

#[test]
fn test_structural_errors() {
    // Out-of-range cluster index
    let bad_index = SESSION_JSON.replace("[0, 1, 2]", "[0, 1, 3]");
    assert!(Session::from_json(&bad_index).is_err());

    // Missing required hit field
    let missing_key = SESSION_JSON.replace("\"bitscore\": 812.4", "\"bits\": 812.4");
    assert!(Session::from_json(&missing_key).is_err());

    // Cluster without a score
    let missing_score = SESSION_JSON.replace("\"score\": 1.064, ", "");
    assert!(Session::from_json(&missing_score).is_err());
}

#[test]
fn test_build_session_from_hits() {
    let first = || {
        Subject::new(vec![Hit::new("AN1", "gb|CBF71234.1|desc", 100.0, 100.0, 0.0, 812.4)])
            .with_location(1000, 2600, Some(Strand::Forward))
    };
    let second = Subject::new(vec![Hit::new("AN2", "CBF71235.1", 98.2, 100.0, 1e-180, 640.0)])
        .with_location(3100, 4200, Some(Strand::Reverse));

    let mut organism = Organism::new("Aspergillus nidulans", "FGSC A4");
    let scaffold = organism.scaffold_mut("BN001302.1");
    scaffold.add_subject(first());
    scaffold.add_subject(second.clone());
    scaffold
        .add_clusters(&[vec![first()], vec![first(), second]], None)
        .unwrap();

    let clusters = scaffold.clusters();
    assert_eq!(clusters[0].indices(), [0, 1]);
    assert_eq!(clusters[1].indices(), [0]);
    assert_eq!(scaffold.subjects()[0].hits[0].subject, "CBF71234.1");
}
