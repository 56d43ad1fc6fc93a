use quoridor::search::SearchConfig;
use quoridor::strategy::StrategyKind;
use quoridor::tournament::{Tournament, TournamentConfig};

#[test]
fn round_robin_writes_one_row_per_pairing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("results.csv");
    let config = TournamentConfig {
        games_per_match: 2,
        max_plies: 40,
        search: SearchConfig::default().with_depth(1).with_seed(9),
        output: output.clone(),
    };

    let mut tournament = Tournament::new(config);
    tournament
        .run_tournament(&[StrategyKind::ShortestPath, StrategyKind::Search])
        .unwrap();
    assert_eq!(tournament.results().len(), 2);
    tournament.save().unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec!["strategy", "opponent", "games", "wins", "losses", "draws", "win %"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "ShortestPath");
    assert_eq!(&rows[0][1], "Search1");
    assert_eq!(&rows[1][0], "Search1");
    for row in &rows {
        assert_eq!(&row[2], "2");
        let tally: usize = (3..6).map(|i| row[i].parse::<usize>().unwrap()).sum();
        assert_eq!(tally, 2);
    }
}
