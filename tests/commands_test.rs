//! Integration tests for command handlers

use std::io::Write;

use hoops_fantasy::{
    cli::LineupArgs,
    commands::{
        lineups::{build_lineup, handle_submit_lineup},
        score::{score_lineup, ScoreParams},
        standings::{history_for, league_table},
        stats_data::{import_stats_file, leaders},
        sync::{sync_gameweek, SyncSummary},
        traits::trait_table_json,
        CommandContext,
    },
    remote::RemoteClient,
    storage::LeagueDatabase,
    CoachCode, FantasyError, Gameweek, GameweekStats, PlayerNumber, PlayerStatRow, ScoringEngine,
    TraitTable,
};
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn create_test_context() -> CommandContext {
    CommandContext {
        db: LeagueDatabase::new_in_memory().unwrap(),
        engine: ScoringEngine::new(TraitTable::builtin()),
        verbose: false,
    }
}

fn lineup_args(ns: &[u32], captain: Option<u32>, coach: Option<&str>) -> LineupArgs {
    LineupArgs {
        players: ns.iter().copied().map(PlayerNumber::new).collect(),
        captain: captain.map(PlayerNumber::new),
        coach: coach.map(CoachCode::new),
    }
}

fn seed_gameweek(ctx: &mut CommandContext, gameweek: u16, pirs: &[(u32, &str, f64)]) {
    let stats = GameweekStats::from_rows(
        Gameweek::new(gameweek),
        pirs.iter()
            .map(|&(n, name, pir)| PlayerStatRow::new(PlayerNumber::new(n), name, Some(pir))),
    );
    ctx.db.import_gameweek(&stats).unwrap();
}

fn write_temp_json(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const PLAIN_ROWS: &[(u32, &str, f64)] = &[
    (1, "Player One", 10.0),
    (2, "Player Two", 5.0),
    (3, "Player Three", 8.0),
    (4, "Player Four", 3.0),
    (5, "Player Five", 12.0),
];

#[test]
fn test_build_lineup_rejects_wrong_size() {
    let result = build_lineup(lineup_args(&[1, 2, 3, 4], None, None));
    assert!(matches!(result, Err(FantasyError::InvalidLineup { .. })));
}

#[test]
fn test_build_lineup_rejects_duplicates() {
    let result = build_lineup(lineup_args(&[1, 2, 3, 4, 4], None, None));
    assert!(matches!(result, Err(FantasyError::InvalidLineup { .. })));
}

#[test]
fn test_build_lineup_accepts_captain_outside_lineup() {
    let lineup = build_lineup(lineup_args(&[1, 2, 3, 4, 5], Some(9), None)).unwrap();
    assert!(!lineup.captain_in_lineup());
}

#[test]
fn test_submit_then_score_stored_lineup() {
    let mut ctx = create_test_context();
    seed_gameweek(&mut ctx, 1, PLAIN_ROWS);

    handle_submit_lineup(
        &mut ctx,
        "  Blue Ballers ",
        Gameweek::new(1),
        lineup_args(&[1, 2, 3, 4, 5], Some(1), None),
    )
    .unwrap();

    let breakdown = score_lineup(
        &ctx,
        ScoreParams {
            team: Some("Blue Ballers".to_string()),
            gameweek: Some(Gameweek::new(1)),
            lineup: lineup_args(&[], None, None),
            stats_path: None,
            as_json: false,
        },
    )
    .unwrap();

    assert_eq!(breakdown.total_final_score, 48.0);
    assert!(breakdown.players[0].is_captain);
}

#[test]
fn test_submit_rejects_blank_team() {
    let mut ctx = create_test_context();
    let result = handle_submit_lineup(
        &mut ctx,
        "   ",
        Gameweek::new(1),
        lineup_args(&[1, 2, 3, 4, 5], None, None),
    );
    assert!(matches!(result, Err(FantasyError::InvalidLineup { .. })));
}

#[test]
fn test_score_missing_stored_lineup() {
    let mut ctx = create_test_context();
    seed_gameweek(&mut ctx, 1, PLAIN_ROWS);

    let result = score_lineup(
        &ctx,
        ScoreParams {
            team: Some("Nobody".to_string()),
            gameweek: Some(Gameweek::new(1)),
            lineup: lineup_args(&[], None, None),
            stats_path: None,
            as_json: false,
        },
    );

    match result {
        Err(FantasyError::LineupNotFound { team, gameweek }) => {
            assert_eq!(team, "Nobody");
            assert_eq!(gameweek, 1);
        }
        other => panic!("Expected LineupNotFound, got {other:?}"),
    }
}

#[test]
fn test_score_adhoc_without_stored_stats() {
    let ctx = create_test_context();

    let result = score_lineup(
        &ctx,
        ScoreParams {
            team: None,
            gameweek: Some(Gameweek::new(7)),
            lineup: lineup_args(&[1, 2, 3, 4, 5], None, None),
            stats_path: None,
            as_json: false,
        },
    );

    assert!(matches!(result, Err(FantasyError::NoStats { gameweek: 7 })));
}

#[test]
fn test_score_adhoc_against_stats_file() {
    let ctx = create_test_context();
    let file = write_temp_json(
        r#"[
            {"number": 7,  "name": "Dimitris Karras", "pir": 14},
            {"number": 8,  "name": "Kostas Karras",   "pir": 6},
            {"number": 10, "name": "Someone Else",    "pir": 4},
            {"number": 11, "name": "Another One",     "pir": 2}
        ]"#,
    );

    let breakdown = score_lineup(
        &ctx,
        ScoreParams {
            team: None,
            gameweek: Some(Gameweek::new(2)),
            lineup: lineup_args(&[7, 8, 10, 11, 99], None, None),
            stats_path: Some(file.path().to_path_buf()),
            as_json: false,
        },
    )
    .unwrap();

    // Both cousins present: 14 * 1.5 + 6 * 1.5 + 4 + 2 + 0
    assert_eq!(breakdown.total_final_score, 36.0);
    assert_eq!(breakdown.players[4].final_score, 0.0);
    assert!(breakdown.players[4].display_name.is_empty());
}

#[test]
fn test_import_stats_file_and_leaders() {
    let mut ctx = create_test_context();
    let file = write_temp_json(
        r#"{
            "gameweek": 3,
            "players": [
                {"playerNumber": 4, "displayName": "Low",    "performanceIndex": 2},
                {"playerNumber": 9, "displayName": "High",   "performanceIndex": "21,5"},
                {"playerNumber": 2, "displayName": "Absent", "performanceIndex": null},
                {"playerNumber": 6, "displayName": "Mid",    "performanceIndex": 11}
            ]
        }"#,
    );

    let (gameweek, written) = import_stats_file(&mut ctx, file.path(), None).unwrap();
    assert_eq!(gameweek, Gameweek::new(3));
    assert_eq!(written, 4);

    let top = leaders(&ctx, Gameweek::new(3), 3).unwrap();
    let names: Vec<&str> = top.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(names, vec!["High", "Mid", "Low"]);
    assert_eq!(top[0].rank, 1);
    assert_eq!(top[0].performance_index, Some(21.5));
}

#[test]
fn test_import_bare_array_needs_gameweek() {
    let mut ctx = create_test_context();
    let file = write_temp_json(r#"[{"number": 1, "name": "Solo", "pir": 3}]"#);

    let result = import_stats_file(&mut ctx, file.path(), None);
    assert!(matches!(result, Err(FantasyError::InvalidStats { .. })));

    let (gameweek, written) = import_stats_file(&mut ctx, file.path(), Some(Gameweek::new(5))).unwrap();
    assert_eq!(gameweek, Gameweek::new(5));
    assert_eq!(written, 1);
}

#[test]
fn test_import_empty_file_is_rejected() {
    let mut ctx = create_test_context();
    let file = write_temp_json(r#"{"gameweek": 1, "players": []}"#);

    let result = import_stats_file(&mut ctx, file.path(), None);
    assert!(matches!(result, Err(FantasyError::InvalidStats { .. })));
}

#[test]
fn test_leaders_for_empty_gameweek() {
    let ctx = create_test_context();
    let result = leaders(&ctx, Gameweek::new(1), 5);
    assert!(matches!(result, Err(FantasyError::NoStats { gameweek: 1 })));
}

#[test]
fn test_league_table_and_history() {
    let mut ctx = create_test_context();
    seed_gameweek(&mut ctx, 1, PLAIN_ROWS);
    seed_gameweek(&mut ctx, 2, PLAIN_ROWS);

    for (team, gameweek, captain) in [("Alpha", 1, 5), ("Alpha", 2, 1), ("Beta", 1, 4)] {
        handle_submit_lineup(
            &mut ctx,
            team,
            Gameweek::new(gameweek),
            lineup_args(&[1, 2, 3, 4, 5], Some(captain), None),
        )
        .unwrap();
    }

    let table = league_table(&ctx).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table[0].team_name, "Alpha");
    assert_eq!(table[0].total_points, 50.0 + 48.0);
    assert_eq!(table[0].gameweeks_played, 2);
    assert_eq!(table[1].team_name, "Beta");
    assert_eq!(table[1].total_points, 41.0);
    assert_eq!(table[1].rank, 2);

    let history = history_for(&ctx, "Alpha").unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].breakdown.total_final_score, 50.0);
    assert_eq!(history[1].cumulative_points, 98.0);

    let missing = history_for(&ctx, "Gamma");
    assert!(matches!(missing, Err(FantasyError::TeamNotFound { .. })));
}

#[test]
fn test_trait_table_json_reloads_to_same_table() {
    let ctx = create_test_context();
    let json = trait_table_json(ctx.engine.table()).unwrap();
    let reloaded = TraitTable::from_json_str(&json).unwrap();

    assert_eq!(&reloaded, ctx.engine.table());
}

#[tokio::test]
async fn test_sync_gameweek_stores_stats_and_lineups() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/player_stats"))
        .and(query_param("gameweek", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "gameweek": 1, "player_number": 1, "display_name": "Player One", "pir": 10 },
            { "id": 2, "gameweek": 1, "player_number": 2, "display_name": "Player Two", "pir": 5 },
            { "id": 3, "gameweek": 1, "player_number": 3, "display_name": "Player Three", "pir": 8 },
            { "id": 4, "gameweek": 1, "player_number": 4, "display_name": "Player Four", "pir": 3 },
            { "id": 5, "gameweek": 1, "player_number": 5, "display_name": "Player Five", "pir": 12 }
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/lineups"))
        .and(query_param("gameweek", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 9,
                "team_name": "Remote Rockets",
                "gameweek": 1,
                "player_numbers": [1, 2, 3, 4, 5],
                "captain_number": 3,
                "coach_code": null
            }
        ])))
        .mount(&mock_server)
        .await;

    let mut ctx = create_test_context();
    let client = RemoteClient::new(&mock_server.uri(), None).unwrap();

    let summary = sync_gameweek(&mut ctx, &client, Gameweek::new(1), false)
        .await
        .unwrap();
    assert_eq!(
        summary,
        SyncSummary {
            stat_rows: 5,
            lineups: 1
        }
    );

    let table = league_table(&ctx).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table[0].team_name, "Remote Rockets");
    assert_eq!(table[0].total_points, 46.0);
}

#[tokio::test]
async fn test_sync_stats_only_skips_lineups() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/player_stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "player_number": 1, "display_name": "Player One", "pir": 10 }
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/lineups"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut ctx = create_test_context();
    let client = RemoteClient::new(&mock_server.uri(), Some("key")).unwrap();

    let summary = sync_gameweek(&mut ctx, &client, Gameweek::new(2), true)
        .await
        .unwrap();
    assert_eq!(summary.stat_rows, 1);
    assert_eq!(summary.lineups, 0);
}

#[tokio::test]
async fn test_sync_surfaces_http_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/player_stats"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let mut ctx = create_test_context();
    let client = RemoteClient::new(&mock_server.uri(), None).unwrap();

    let result = sync_gameweek(&mut ctx, &client, Gameweek::new(1), false).await;
    assert!(matches!(result, Err(FantasyError::Http(_))));
}
