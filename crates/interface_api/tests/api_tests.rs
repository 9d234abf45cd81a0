//! HTTP surface tests against an in-memory record store

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_registration::{MockRecordStore, OutcomeStatus};
use interface_api::{config::ApiConfig, create_router, AppState};
use test_utils::*;

fn config() -> ApiConfig {
    ApiConfig {
        pacing_delay_ms: 0,
        ..ApiConfig::default()
    }
}

fn server_with(store: Arc<MockRecordStore>) -> TestServer {
    TestServer::new(create_router(AppState::new(store, config()))).unwrap()
}

// ============================================================================
// POST /api/submit
// ============================================================================

mod submit_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_success() {
        let store = Arc::new(MockRecordStore::new());
        let server = server_with(store.clone());

        let body = RequestFixtures::submit_body(&[ParticipantFixtures::alice(), ParticipantFixtures::bob()]);
        let response = server.post("/api/submit").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let json: Value = response.json();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "2 participants inscrits avec succès.");
        assert_eq!(json["created"], 2);
        assert_eq!(json["failed"], 0);

        let records = store.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].group_id.as_str(), GroupFixtures::group_id());
        assert_eq!(records[0].submitted_by.as_deref(), Some(GroupFixtures::organizer()));
    }

    #[tokio::test]
    async fn test_partial_failure_is_207() {
        let store = Arc::new(MockRecordStore::new().fail_for_email("bob@example.com"));
        let server = server_with(store.clone());

        let body = RequestFixtures::submit_body(&[
            ParticipantFixtures::alice(),
            ParticipantFixtures::bob(),
            ParticipantFixtures::numbered(3),
        ]);
        let response = server.post("/api/submit").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::MULTI_STATUS);
        let json: Value = response.json();
        assert_eq!(json["success"], false);
        assert_eq!(json["created"], 2);
        assert_eq!(json["failed"], 1);
        assert_eq!(json["message"], "2 sur 3 participants inscrits. Certains ont échoué.");
    }

    #[tokio::test]
    async fn test_total_failure_is_500_with_cause() {
        let store = Arc::new(MockRecordStore::new().fail_always().with_failure_message("database archived"));
        let server = server_with(store);

        let body = RequestFixtures::submit_body(&[ParticipantFixtures::alice()]);
        let response = server.post("/api/submit").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = response.json();
        assert_eq!(json["created"], 0);
        assert_eq!(json["message"], "Erreur lors de l'inscription : database archived");
    }

    #[tokio::test]
    async fn test_validation_error_is_400_and_writes_nothing() {
        let store = Arc::new(MockRecordStore::new());
        let server = server_with(store.clone());

        let body = RequestFixtures::submit_body(&[
            ParticipantFixtures::alice(),
            ParticipantFixtures::with_bad_email(),
        ]);
        let response = server.post("/api/submit").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({ "success": false, "message": "Participant 2 : adresse e-mail invalide." })
        );
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_group_and_participants() {
        let server = server_with(Arc::new(MockRecordStore::new()));

        let response = server.post("/api/submit").json(&json!({ "participants": [] })).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "ID du groupe manquant.");

        let response = server.post("/api/submit").json(&json!({ "groupId": "grp-1" })).await;
        assert_eq!(response.json::<Value>()["message"], "Aucun participant fourni.");
    }

    #[tokio::test]
    async fn test_null_field_is_a_validation_error() {
        let store = Arc::new(MockRecordStore::new());
        let server = server_with(store.clone());

        let body = json!({
            "groupId": "grp-1",
            "groupName": "Atelier",
            "participants": [
                { "nom": "Durand", "prenom": "Alice", "email": "alice@example.com", "entreprise": "Acme" },
                { "nom": null, "prenom": "Bob", "email": "bob@example.com", "entreprise": "Globex" }
            ]
        });
        let response = server.post("/api/submit").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["message"],
            "Participant 2 : tous les champs sont obligatoires."
        );
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_string_group_id_is_a_validation_error() {
        let server = server_with(Arc::new(MockRecordStore::new()));

        let mut body = RequestFixtures::submit_body(&[ParticipantFixtures::alice()]);
        body["groupId"] = json!(42);
        let response = server.post("/api/submit").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "ID du groupe manquant.");
    }

    #[tokio::test]
    async fn test_non_array_participants_is_a_validation_error() {
        let server = server_with(Arc::new(MockRecordStore::new()));

        let mut body = RequestFixtures::submit_body(&[]);
        body["participants"] = json!({ "nom": "Durand" });
        let response = server.post("/api/submit").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["message"], "Aucun participant fourni.");
    }

    #[tokio::test]
    async fn test_unreadable_body_is_500() {
        let store = Arc::new(MockRecordStore::new());
        let server = server_with(store.clone());

        let response = server.post("/api/submit").text("{not json").await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({ "success": false, "message": "Erreur serveur inattendue." })
        );
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_service_report_matches_response() {
        let store = Arc::new(MockRecordStore::new().fail_on_call(0));
        let state = AppState::new(store, config());

        let batch = TestBatchBuilder::new().with_participants(3).build();
        let report = state.service.submit(&batch).await.unwrap();

        assert_report(&report, 2, 1, OutcomeStatus::Partial);
        assert_failed_at(&report, &[0]);
    }
}

// ============================================================================
// GET /api/entry
// ============================================================================

mod entry_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_group_id_is_rejected() {
        let server = server_with(Arc::new(MockRecordStore::new()));

        let response = server.get("/api/entry").await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["message"],
            "Lien invalide : le paramètre group_id est requis."
        );
    }

    #[tokio::test]
    async fn test_name_from_link_is_used() {
        let server = server_with(Arc::new(MockRecordStore::new()));

        let response = server
            .get("/api/entry")
            .add_query_param("group_id", "grp-1")
            .add_query_param("group_name", "Atelier du lundi")
            .add_query_param("submitted_by", "org@example.com")
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<Value>(),
            json!({
                "groupId": "grp-1",
                "groupName": "Atelier du lundi",
                "groupNameResolved": true,
                "submittedBy": "org@example.com",
                "submitLabel": "Soumettre l'inscription"
            })
        );
    }

    #[tokio::test]
    async fn test_name_is_resolved_from_store() {
        let store = MockRecordStore::new().with_title("grp-1", "Atelier Rust").await;
        let server = server_with(Arc::new(store));

        let response = server.get("/api/entry").add_query_param("group_id", "grp-1").await;

        let json: Value = response.json();
        assert_eq!(json["groupName"], "Atelier Rust");
        assert_eq!(json["groupNameResolved"], true);
        assert_eq!(json["submittedBy"], "");
    }

    #[tokio::test]
    async fn test_unresolved_name_is_empty() {
        let server = server_with(Arc::new(MockRecordStore::new()));

        let response = server
            .get("/api/entry")
            .add_query_param("group_id", "grp-unknown")
            .add_query_param("group_name", "")
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let json: Value = response.json();
        assert_eq!(json["groupName"], "");
        assert_eq!(json["groupNameResolved"], false);
    }
}

// ============================================================================
// Health and embedding headers
// ============================================================================

mod platform_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let server = server_with(Arc::new(MockRecordStore::new()));
        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_follows_store() {
        let server = server_with(Arc::new(MockRecordStore::new()));
        let response = server.get("/health/ready").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["record_store"], "healthy");

        let server = server_with(Arc::new(MockRecordStore::new().unhealthy()));
        let response = server.get("/health/ready").await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_embedding_headers_on_every_response() {
        let server = server_with(Arc::new(MockRecordStore::new()));

        for response in [server.get("/health").await, server.get("/api/entry").await] {
            assert_eq!(
                response.header("content-security-policy"),
                "frame-ancestors 'self' https://*.softr.app https://*.softr.io"
            );
            assert_eq!(response.header("x-frame-options"), "ALLOWALL");
        }
    }

    #[tokio::test]
    async fn test_frame_ancestors_are_configurable() {
        let config = ApiConfig {
            frame_ancestors: "https://portal.example.org".to_string(),
            ..config()
        };
        let state = AppState::new(Arc::new(MockRecordStore::new()), config);
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server.get("/health").await;
        assert_eq!(
            response.header("content-security-policy"),
            "frame-ancestors https://portal.example.org"
        );
    }
}
