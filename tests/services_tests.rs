//! Resource service tests against a wiremock server.

mod common;

use chrono::{TimeZone, Utc};
use common::client_for;
use integrations_pagerduty::client::EARLY_ACCESS_HEADER;
use integrations_pagerduty::services::{
    Addon, AutomationActionsRunner, ContactMethod, Integration, ListOverridesOptions, Override,
    TeamRole, AUTOMATION_ACTIONS_EARLY_ACCESS,
};
use integrations_pagerduty::{PagerDutyErrorKind, ResourceReference};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_runner() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/automation_actions/runners"))
        .and(header("Authorization", "Token token=abc"))
        .and(header(EARLY_ACCESS_HEADER, AUTOMATION_ACTIONS_EARLY_ACCESS))
        .and(body_json(json!({"runner": {"name": "r1", "type": "runner"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "runner": {"id": "R1", "name": "r1", "type": "runner"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let runner = client_for(&server)
        .automation_actions_runners()
        .create(&AutomationActionsRunner::new("r1", "runner"))
        .await
        .unwrap();

    assert_eq!(runner.id.as_deref(), Some("R1"));
    assert_eq!(runner.name, "r1");
}

#[tokio::test]
async fn test_runner_create_then_get() {
    let server = MockServer::start().await;

    let stored = json!({
        "runner": {
            "id": "R1",
            "name": "r1",
            "type": "runner",
            "runner_type": "sidecar",
            "description": "edge runner",
            "teams": [{"id": "T1", "type": "team_reference"}]
        }
    });

    Mock::given(method("POST"))
        .and(path("/automation_actions/runners"))
        .respond_with(ResponseTemplate::new(201).set_body_json(stored.clone()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/automation_actions/runners/R1"))
        .and(header(EARLY_ACCESS_HEADER, AUTOMATION_ACTIONS_EARLY_ACCESS))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let runners = client.automation_actions_runners();

    let mut draft = AutomationActionsRunner::new("r1", "runner");
    draft.runner_type = Some("sidecar".to_string());
    draft.description = Some("edge runner".to_string());

    let created = runners.create(&draft).await.unwrap();
    let fetched = runners.get(created.id.as_deref().unwrap()).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.runner_type.as_deref(), Some("sidecar"));
    assert_eq!(fetched.teams.unwrap()[0].id(), Some("T1"));
}

#[tokio::test]
async fn test_delete_runner() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/automation_actions/runners/R1"))
        .and(header(EARLY_ACCESS_HEADER, AUTOMATION_ACTIONS_EARLY_ACCESS))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .automation_actions_runners()
        .delete("R1")
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);
}

#[tokio::test]
async fn test_get_missing_runner() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/automation_actions/runners/R404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 2100, "message": "Not Found"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .automation_actions_runners()
        .get("R404")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), PagerDutyErrorKind::NotFound);
}

#[tokio::test]
async fn test_team_membership() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/teams/T1/users/U1"))
        .and(body_json(json!({"role": "manager"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/teams/T1/escalation_policies/EP1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/teams/T1/users/U1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let teams = client.teams();

    teams
        .add_user_with_role("T1", "U1", TeamRole::Manager)
        .await
        .unwrap();
    teams.add_escalation_policy("T1", "EP1").await.unwrap();
    teams.remove_user("T1", "U1").await.unwrap();
}

#[tokio::test]
async fn test_list_overrides_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/schedules/S1/overrides"))
        .and(query_param("since", "2024-01-01T00:00:00Z"))
        .and(query_param("until", "2024-01-08T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "overrides": [{
                "id": "O1",
                "start": "2024-01-02T09:00:00Z",
                "end": "2024-01-02T17:00:00Z",
                "user": {"id": "U1", "type": "user_reference"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = ListOverridesOptions::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap(),
    );
    let response = client_for(&server)
        .schedules()
        .list_overrides("S1", &options)
        .await
        .unwrap();

    assert_eq!(response.overrides.len(), 1);
    assert_eq!(response.overrides[0].id.as_deref(), Some("O1"));
}

#[tokio::test]
async fn test_create_override() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/schedules/S1/overrides"))
        .and(body_json(json!({
            "override": {
                "start": "2024-01-02T09:00:00Z",
                "end": "2024-01-02T17:00:00Z",
                "user": {"id": "U1", "type": "user_reference"}
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "override": {
                "id": "O1",
                "start": "2024-01-02T09:00:00Z",
                "end": "2024-01-02T17:00:00Z",
                "user": {"id": "U1", "type": "user_reference", "summary": "Jane"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .schedules()
        .create_override(
            "S1",
            &Override {
                id: None,
                start: "2024-01-02T09:00:00Z".to_string(),
                end: "2024-01-02T17:00:00Z".to_string(),
                user: Some(ResourceReference::new("U1", "user_reference")),
            },
        )
        .await
        .unwrap();

    assert_eq!(created.id.as_deref(), Some("O1"));
    assert_eq!(
        created.user.and_then(|u| u.summary).as_deref(),
        Some("Jane")
    );
}

#[tokio::test]
async fn test_create_contact_method() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/U1/contact_methods"))
        .and(body_json(json!({
            "contact_method": {
                "type": "email_contact_method",
                "label": "Work",
                "address": "jane@example.com"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "contact_method": {
                "id": "CM1",
                "type": "email_contact_method",
                "label": "Work",
                "address": "jane@example.com",
                "send_short_email": false
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let method_in = ContactMethod {
        contact_type: "email_contact_method".to_string(),
        label: "Work".to_string(),
        address: "jane@example.com".to_string(),
        ..Default::default()
    };
    let created = client_for(&server)
        .users()
        .create_contact_method("U1", &method_in)
        .await
        .unwrap();

    assert_eq!(created.id.as_deref(), Some("CM1"));
    assert_eq!(created.send_short_email, Some(false));
}

#[tokio::test]
async fn test_service_integration_lifecycle() {
    let server = MockServer::start().await;

    let integration = json!({
        "integration": {
            "id": "I1",
            "type": "events_api_v2_inbound_integration",
            "integration_key": "0123456789abcdef",
            "service": {"id": "S1", "type": "service_reference"}
        }
    });

    Mock::given(method("POST"))
        .and(path("/services/S1/integrations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(integration.clone()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/services/S1/integrations/I1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(integration))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/services/S1/integrations/I1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let services = client.services();

    let created = services
        .create_integration(
            "S1",
            &Integration {
                integration_type: "events_api_v2_inbound_integration".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let fetched = services.get_integration("S1", "I1").await.unwrap();

    assert_eq!(created, fetched);
    assert_eq!(fetched.integration_key.as_deref(), Some("0123456789abcdef"));

    services.delete_integration("S1", "I1").await.unwrap();
}

#[tokio::test]
async fn test_ability_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/abilities/teams"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/abilities/sso"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "error": {"code": 5001, "message": "Account does not have the ability"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.abilities().test("teams").await.is_ok());

    let err = client.abilities().test("sso").await.unwrap_err();
    assert_eq!(err.kind(), PagerDutyErrorKind::ApiError);
    assert_eq!(err.status_code(), Some(402));
}

#[tokio::test]
async fn test_update_addon() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/addons/A1"))
        .and(body_json(json!({
            "addon": {
                "name": "Runbook",
                "src": "https://example.com/runbook",
                "type": "full_page_addon"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "addon": {
                "id": "A1",
                "name": "Runbook",
                "src": "https://example.com/runbook",
                "type": "full_page_addon"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let addon = Addon {
        name: "Runbook".to_string(),
        src: "https://example.com/runbook".to_string(),
        addon_type: "full_page_addon".to_string(),
        ..Default::default()
    };
    let updated = client_for(&server)
        .addons()
        .update("A1", &addon)
        .await
        .unwrap();

    assert_eq!(updated.id.as_deref(), Some("A1"));
    assert_eq!(updated.name, "Runbook");
}
