use super::*;

fn showing(title: &str) -> NormalizedShowing {
    NormalizedShowing {
        movie_title: title.to_owned(),
        date: "2026-08-30".to_owned(),
        time: "21:30".to_owned(),
        cinema_name: "Milano Bicocca".to_owned(),
    }
}

fn showings(titles: &[&str]) -> Vec<NormalizedShowing> {
    titles.iter().map(|t| showing(t)).collect()
}

fn kinds(parts: &[DiffPart]) -> Vec<DiffKind> {
    parts.iter().map(|p| p.kind).collect()
}

fn titles(part: &DiffPart) -> Vec<&str> {
    part.values.iter().map(|s| s.movie_title.as_str()).collect()
}

// ---------------------------------------------------------------------------
// diff_showings
// ---------------------------------------------------------------------------

#[test]
fn identical_sequences_yield_single_common_part() {
    let s = showings(&["A", "B", "C"]);
    let parts = diff_showings(&s, &s);
    assert_eq!(kinds(&parts), vec![DiffKind::Common]);
    assert_eq!(titles(&parts[0]), vec!["A", "B", "C"]);
    assert!(!has_changes(&parts));
}

#[test]
fn empty_inputs_yield_no_parts() {
    let parts = diff_showings(&[], &[]);
    assert!(parts.is_empty());
    assert!(!has_changes(&parts));
}

#[test]
fn appended_movie_is_a_trailing_added_run() {
    let previous = showings(&["A", "B"]);
    let current = showings(&["A", "B", "C"]);
    let parts = diff_showings(&previous, &current);
    assert_eq!(kinds(&parts), vec![DiffKind::Common, DiffKind::Added]);
    assert_eq!(titles(&parts[0]), vec!["A", "B"]);
    assert_eq!(titles(&parts[1]), vec!["C"]);
    assert!(has_changes(&parts));
}

#[test]
fn dropped_movie_is_a_removed_run() {
    let previous = showings(&["A", "B", "C"]);
    let current = showings(&["A", "C"]);
    let parts = diff_showings(&previous, &current);
    assert_eq!(
        kinds(&parts),
        vec![DiffKind::Common, DiffKind::Removed, DiffKind::Common]
    );
    assert_eq!(titles(&parts[1]), vec!["B"]);
}

#[test]
fn replacement_emits_removed_before_added() {
    let previous = showings(&["A", "B", "D"]);
    let current = showings(&["A", "C", "D"]);
    let parts = diff_showings(&previous, &current);
    assert_eq!(
        kinds(&parts),
        vec![
            DiffKind::Common,
            DiffKind::Removed,
            DiffKind::Added,
            DiffKind::Common
        ]
    );
    assert_eq!(titles(&parts[1]), vec!["B"]);
    assert_eq!(titles(&parts[2]), vec!["C"]);
}

#[test]
fn full_turnover_is_one_removed_then_one_added_run() {
    let previous = showings(&["A", "B"]);
    let current = showings(&["C", "D"]);
    let parts = diff_showings(&previous, &current);
    assert_eq!(kinds(&parts), vec![DiffKind::Removed, DiffKind::Added]);
    assert_eq!(titles(&parts[0]), vec!["A", "B"]);
    assert_eq!(titles(&parts[1]), vec!["C", "D"]);
}

#[test]
fn matching_ignores_date_time_and_cinema() {
    let previous = vec![NormalizedShowing {
        movie_title: "Dune".to_owned(),
        date: "2026-08-29".to_owned(),
        time: "18:00".to_owned(),
        cinema_name: "Roma Est".to_owned(),
    }];
    let current = vec![NormalizedShowing {
        movie_title: "Dune".to_owned(),
        date: "2026-08-30".to_owned(),
        time: "21:30".to_owned(),
        cinema_name: "Milano Bicocca".to_owned(),
    }];
    let parts = diff_showings(&previous, &current);
    assert_eq!(kinds(&parts), vec![DiffKind::Common]);
    assert!(!has_changes(&parts));
}

#[test]
fn duplicate_titles_match_pairwise() {
    // Three screenings of A against two: one removal, no spurious additions.
    let previous = showings(&["A", "A", "A"]);
    let current = showings(&["A", "A"]);
    let parts = diff_showings(&previous, &current);
    let removed: usize = parts
        .iter()
        .filter(|p| p.kind == DiffKind::Removed)
        .map(|p| p.values.len())
        .sum();
    let added: usize = parts
        .iter()
        .filter(|p| p.kind == DiffKind::Added)
        .map(|p| p.values.len())
        .sum();
    assert_eq!(removed, 1);
    assert_eq!(added, 0);
}

#[test]
fn concatenated_values_reconstruct_both_inputs() {
    let previous = showings(&["A", "B", "C", "E"]);
    let current = showings(&["B", "C", "D", "E", "F"]);
    let parts = diff_showings(&previous, &current);

    let from_previous: Vec<&str> = parts
        .iter()
        .filter(|p| p.kind != DiffKind::Added)
        .flat_map(titles)
        .collect();
    let from_current: Vec<&str> = parts
        .iter()
        .filter(|p| p.kind != DiffKind::Removed)
        .flat_map(titles)
        .collect();

    assert_eq!(from_previous, vec!["A", "B", "C", "E"]);
    assert_eq!(from_current, vec!["B", "C", "D", "E", "F"]);
}

#[test]
fn common_parts_carry_current_snapshot_records() {
    let previous = vec![NormalizedShowing {
        movie_title: "Dune".to_owned(),
        date: "2026-08-29".to_owned(),
        time: "18:00".to_owned(),
        cinema_name: "Roma Est".to_owned(),
    }];
    let current = vec![NormalizedShowing {
        movie_title: "Dune".to_owned(),
        date: "2026-08-30".to_owned(),
        time: "21:30".to_owned(),
        cinema_name: "Milano Bicocca".to_owned(),
    }];
    let parts = diff_showings(&previous, &current);
    assert_eq!(parts[0].values[0].date, "2026-08-30");
}

// ---------------------------------------------------------------------------
// non_common_records
// ---------------------------------------------------------------------------

#[test]
fn records_drop_common_parts_and_set_one_flag() {
    let previous = showings(&["A", "B"]);
    let current = showings(&["A", "C"]);
    let records = non_common_records(&diff_showings(&previous, &current));
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].removed, Some(true));
    assert_eq!(records[0].added, None);
    assert_eq!(records[0].count, 1);
    assert_eq!(records[0].value[0].movie_title, "B");

    assert_eq!(records[1].added, Some(true));
    assert_eq!(records[1].removed, None);
    assert_eq!(records[1].value[0].movie_title, "C");
}

#[test]
fn record_json_omits_absent_flags() {
    let previous = showings(&["A"]);
    let current = showings(&["A", "B"]);
    let records = non_common_records(&diff_showings(&previous, &current));
    let json = serde_json::to_value(&records).unwrap();

    let part = &json[0];
    assert_eq!(part["added"], true);
    assert!(part.get("removed").is_none());
    assert_eq!(part["count"], 1);
    assert_eq!(part["value"][0]["movieTitle"], "B");
}

#[test]
fn no_changes_yields_no_records() {
    let s = showings(&["A", "B"]);
    assert!(non_common_records(&diff_showings(&s, &s)).is_empty());
}
