use serde_json::Value;

use super::Endpoint;
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{ListParams, ProjectId};

pub async fn list_projects(client: &ApiClient, params: &ListParams) -> Result<Value> {
    client
        .get(&Endpoint::Projects.path()?, &params.to_query())
        .await
}

pub async fn get_project(client: &ApiClient, id: impl Into<ProjectId>) -> Result<Value> {
    let id = id.into();
    client.get(&Endpoint::Project(&id).path()?, &[]).await
}

pub async fn create_project(client: &ApiClient, project: &Value) -> Result<Value> {
    client.post(&Endpoint::Projects.path()?, project).await
}

/// Full replacement (PUT); the payload must carry every writable field.
pub async fn update_project(
    client: &ApiClient,
    id: impl Into<ProjectId>,
    project: &Value,
) -> Result<Value> {
    let id = id.into();
    client.put(&Endpoint::Project(&id).path()?, project).await
}

pub async fn delete_project(client: &ApiClient, id: impl Into<ProjectId>) -> Result<Value> {
    let id = id.into();
    client.delete(&Endpoint::Project(&id).path()?).await
}

pub async fn projects_by_country(
    client: &ApiClient,
    country_name: &str,
    params: &ListParams,
) -> Result<Value> {
    client
        .get(
            &Endpoint::ProjectsByCountry(country_name).path()?,
            &params.to_query(),
        )
        .await
}

pub async fn projects_by_status(
    client: &ApiClient,
    status: &str,
    params: &ListParams,
) -> Result<Value> {
    client
        .get(
            &Endpoint::ProjectsByStatus(status).path()?,
            &params.to_query(),
        )
        .await
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::api::test_support::server_and_client;
    use crate::error::TrackerError;

    #[tokio::test]
    async fn test_list_projects_forwards_params() {
        let (server, client) = server_and_client().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/"))
            .and(query_param("page", "2"))
            .and(query_param("search", "solar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 0, "next": null, "previous": null, "results": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params = ListParams::new().page(2).search("solar");
        let body = list_projects(&client, &params).await.unwrap();
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_list_projects_without_params_sends_no_query() {
        let (server, client) = server_and_client().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        list_projects(&client, &ListParams::new()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_get_project_returns_body_unchanged() {
        let (server, client) = server_and_client().await;
        let project = json!({
            "id": 42,
            "title": "Mangrove restoration",
            "status": "Approved",
            "country": { "id": 3, "name": "Kenya" },
            "pag_value": "1500000.00"
        });
        Mock::given(method("GET"))
            .and(path("/api/projects/42/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(project.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let body = get_project(&client, 42).await.unwrap();
        assert_eq!(body, project);
    }

    #[tokio::test]
    async fn test_create_project_posts_payload() {
        let (server, client) = server_and_client().await;
        let payload = json!({ "title": "Clean water", "status": "Pending Approval" });
        Mock::given(method("POST"))
            .and(path("/api/projects/"))
            .and(body_json(payload.clone()))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 5 })))
            .expect(1)
            .mount(&server)
            .await;

        let body = create_project(&client, &payload).await.unwrap();
        assert_eq!(body["id"], 5);
    }

    #[tokio::test]
    async fn test_update_project_puts_full_payload() {
        let (server, client) = server_and_client().await;
        let payload = json!({ "title": "Clean water II", "status": "Approved" });
        Mock::given(method("PUT"))
            .and(path("/api/projects/5/"))
            .and(body_json(payload.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let body = update_project(&client, 5, &payload).await.unwrap();
        assert_eq!(body, payload);
    }

    #[tokio::test]
    async fn test_delete_project_with_string_id() {
        let (server, client) = server_and_client().await;
        Mock::given(method("DELETE"))
            .and(path("/api/projects/abc/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let body = delete_project(&client, "abc").await.unwrap();
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_get_project_keeps_id_text_verbatim() {
        let (server, client) = server_and_client().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/007/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "007" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/projects/%2B5/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "+5" })))
            .expect(1)
            .mount(&server)
            .await;

        get_project(&client, ProjectId::parse("007")).await.unwrap();
        get_project(&client, ProjectId::parse("+5")).await.unwrap();
    }

    #[tokio::test]
    async fn test_dot_ids_send_nothing() {
        let (server, client) = server_and_client().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        for id in [".", "..", ""] {
            let err = delete_project(&client, ProjectId::parse(id))
                .await
                .unwrap_err();
            assert!(matches!(err, TrackerError::InvalidSegment { field: "id", .. }));
        }
        let err = projects_by_country(&client, "..", &ListParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidSegment { field: "country", .. }));
    }

    #[tokio::test]
    async fn test_projects_by_country_encodes_name() {
        let (server, client) = server_and_client().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/country/C%C3%B4te%20d'Ivoire/"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        projects_by_country(&client, "Côte d'Ivoire", &ListParams::new().page(1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_projects_by_status_encodes_status() {
        let (server, client) = server_and_client().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/status/Pending%20Approval/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        projects_by_status(&client, "Pending Approval", &ListParams::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_error_is_propagated_untouched() {
        let (server, client) = server_and_client().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/status/Closed/"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"detail":"Invalid status key: 'Closed'."}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let err = projects_by_status(&client, "Closed", &ListParams::new())
            .await
            .unwrap_err();
        match err {
            TrackerError::Status { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, r#"{"detail":"Invalid status key: 'Closed'."}"#);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_repeated_get_is_not_cached() {
        let (server, client) = server_and_client().await;
        Mock::given(method("GET"))
            .and(path("/api/projects/7/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
            .expect(2)
            .mount(&server)
            .await;

        get_project(&client, 7).await.unwrap();
        get_project(&client, 7).await.unwrap();
    }
}
