//! Unit tests for the REST client

use super::*;
use crate::cli::types::{CoachCode, PlayerNumber};
use crate::stats::StatLookup;
use crate::FantasyError;
use serde_json::json;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[cfg(test)]
mod remote_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_gameweek_stats_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/player_stats"))
            .and(query_param("gameweek", "eq.3"))
            .and(query_param("select", "*"))
            .and(header("apikey", "test-key"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 101, "gameweek": 3, "player_number": 7, "display_name": "Dimitris Karras", "pir": 14, "points": 22 },
                { "id": 102, "gameweek": 3, "player_number": "8", "display_name": "Kostas Karras", "pir": null }
            ])))
            .mount(&mock_server)
            .await;

        let client = RemoteClient::new(&mock_server.uri(), Some("test-key")).unwrap();
        let stats = client.fetch_gameweek_stats(Gameweek::new(3)).await.unwrap();

        assert_eq!(stats.gameweek(), Gameweek::new(3));
        assert_eq!(stats.len(), 2);

        let karras = StatLookup::get(&stats, PlayerNumber::new(7)).unwrap();
        assert_eq!(karras.display_name, "Dimitris Karras");
        assert_eq!(karras.performance_index, Some(14.0));
        assert_eq!(karras.extra.get("points"), Some(&json!(22)));
        assert!(!karras.extra.contains_key("id"));
        assert!(!karras.extra.contains_key("gameweek"));

        let cousin = StatLookup::get(&stats, PlayerNumber::new(8)).unwrap();
        assert_eq!(cousin.performance_index, None);
    }

    #[tokio::test]
    async fn test_fetch_lineups_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/lineups"))
            .and(query_param("gameweek", "eq.2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 1,
                    "team_name": "Blue Ballers",
                    "gameweek": 2,
                    "player_numbers": [4, 7, 8, 11, 15],
                    "captain_number": 4,
                    "coach_code": "mk"
                },
                {
                    "id": 2,
                    "team_name": "Bench Mob",
                    "gameweek": 2,
                    "player_numbers": ["1", "2", "3", "4", "5"],
                    "captain_number": null,
                    "coach_code": null
                }
            ])))
            .mount(&mock_server)
            .await;

        // Trailing slash on the base URL must not produce `//rest`
        let base = format!("{}/", mock_server.uri());
        let client = RemoteClient::new(&base, None).unwrap();
        let lineups = client.fetch_lineups(Gameweek::new(2)).await.unwrap();

        assert_eq!(lineups.len(), 2);
        assert_eq!(lineups[0].team_name, "Blue Ballers");
        assert_eq!(lineups[0].lineup.captain, Some(PlayerNumber::new(4)));
        assert_eq!(lineups[0].lineup.coach, Some(CoachCode::new("MK")));
        assert_eq!(lineups[1].lineup.player_numbers.len(), 5);
        assert_eq!(lineups[1].lineup.captain, None);
        assert_eq!(lineups[1].lineup.coach, None);
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/player_stats"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = RemoteClient::new(&mock_server.uri(), Some("wrong")).unwrap();
        let result = client.fetch_gameweek_stats(Gameweek::new(1)).await;

        match result {
            Err(FantasyError::Http(e)) => {
                assert_eq!(e.status().map(|s| s.as_u16()), Some(401));
            }
            other => panic!("Expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/lineups"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
            .mount(&mock_server)
            .await;

        let client = RemoteClient::new(&mock_server.uri(), None).unwrap();
        assert!(client.fetch_lineups(Gameweek::new(1)).await.is_err());
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let result = RemoteClient::new("http://localhost", Some("bad\nkey"));
        assert!(matches!(result, Err(FantasyError::InvalidHeader(_))));
    }
}
