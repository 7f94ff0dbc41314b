//! Appwrite document API client.
//!
//! Talks to the hosted backend's REST API: document listing with query
//! strings, and document creation for seeding and score submission. Each
//! trait method is one request/response; failures map onto [`StoreError`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use emtprep_core::model::{QuestionRecord, ScenarioRecord, ScoreRecord};
use emtprep_core::traits::{QuestionStore, ScenarioStore, ScoreQuery, ScoreStore};

use crate::config::AppConfig;
use crate::error::StoreError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the hosted document store.
pub struct AppwriteStore {
    config: AppConfig,
    client: reqwest::Client,
}

impl AppwriteStore {
    pub fn new(config: AppConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self { config, client }
    }

    fn documents_url(&self, collection_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint, self.config.database_id, collection_id
        )
    }

    fn apply_headers(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let req = req.header("X-Appwrite-Project", &self.config.project_id);
        match &self.config.api_key {
            Some(key) => req.header("X-Appwrite-Key", key),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> anyhow::Result<T> {
        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Timeout(DEFAULT_TIMEOUT_SECS)
            } else {
                StoreError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                * 1000;
            return Err(StoreError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::AuthenticationFailed(body).into());
        }
        if status == 404 {
            let body = response.text().await.unwrap_or_default();
            let message = parse_api_message(&body).unwrap_or(body);
            return Err(StoreError::NotFound(message).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = parse_api_message(&body).unwrap_or(body);
            return Err(StoreError::Api { status, message }.into());
        }

        let parsed = response.json::<T>().await.map_err(|e| StoreError::Api {
            status: 0,
            message: format!("failed to parse response: {e}"),
        })?;
        Ok(parsed)
    }

    async fn list_documents<T: DeserializeOwned>(
        &self,
        collection_id: &str,
        queries: &[String],
    ) -> anyhow::Result<Vec<Document<T>>> {
        let params: Vec<(&str, &str)> = queries
            .iter()
            .map(|q| ("queries[]", q.as_str()))
            .collect();
        let req = self
            .apply_headers(self.client.get(self.documents_url(collection_id)))
            .query(&params);
        let list: DocumentList<T> = self.send(req).await?;
        Ok(list.documents)
    }

    async fn create_document<T: Serialize>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: &T,
    ) -> anyhow::Result<()> {
        let body = CreateDocument { document_id, data };
        let req = self
            .apply_headers(self.client.post(self.documents_url(collection_id)))
            .json(&body);
        let _created: serde_json::Value = self.send(req).await?;
        Ok(())
    }
}

/// Build the JSON query string for an equality filter.
fn query_equal(attribute: &str, value: &str) -> String {
    serde_json::json!({
        "method": "equal",
        "attribute": attribute,
        "values": [value],
    })
    .to_string()
}

/// Build the JSON query string for a descending sort.
fn query_order_desc(attribute: &str) -> String {
    serde_json::json!({
        "method": "orderDesc",
        "attribute": attribute,
    })
    .to_string()
}

fn parse_api_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ApiError {
        message: String,
    }
    serde_json::from_str::<ApiError>(body).map(|e| e.message).ok()
}

#[derive(Deserialize)]
struct DocumentList<T> {
    #[serde(default)]
    #[allow(dead_code)]
    total: u64,
    documents: Vec<Document<T>>,
}

#[derive(Deserialize)]
struct Document<T> {
    #[serde(rename = "$id")]
    id: String,
    #[serde(flatten)]
    attrs: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocument<'a, T> {
    document_id: &'a str,
    data: &'a T,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioAttrs {
    #[serde(default)]
    title: String,
    steps: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioSeedAttrs<'a> {
    scenario_id: &'a str,
    title: &'a str,
    steps: &'a str,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionAttrs {
    question: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_answer: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreAttrs {
    test_id: String,
    score: f64,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

#[async_trait]
impl ScenarioStore for AppwriteStore {
    #[instrument(skip(self))]
    async fn list_scenarios(&self) -> anyhow::Result<Vec<ScenarioRecord>> {
        let docs: Vec<Document<ScenarioAttrs>> = self
            .list_documents(&self.config.scenarios_collection, &[])
            .await?;
        Ok(docs
            .into_iter()
            .map(|d| ScenarioRecord {
                id: d.id,
                title: d.attrs.title,
                steps: d.attrs.steps,
            })
            .collect())
    }

    #[instrument(skip(self, record), fields(id = %record.id))]
    async fn put_scenario(&self, record: &ScenarioRecord) -> anyhow::Result<()> {
        let attrs = ScenarioSeedAttrs {
            scenario_id: &record.id,
            title: &record.title,
            steps: &record.steps,
        };
        self.create_document(&self.config.scenarios_collection, &record.id, &attrs)
            .await
    }
}

#[async_trait]
impl QuestionStore for AppwriteStore {
    #[instrument(skip(self))]
    async fn list_questions(&self) -> anyhow::Result<Vec<QuestionRecord>> {
        let docs: Vec<Document<QuestionAttrs>> = self
            .list_documents(&self.config.questions_collection, &[])
            .await?;
        Ok(docs
            .into_iter()
            .map(|d| QuestionRecord {
                id: d.id,
                question: d.attrs.question,
                option_a: d.attrs.option_a,
                option_b: d.attrs.option_b,
                option_c: d.attrs.option_c,
                option_d: d.attrs.option_d,
                correct_answer: d.attrs.correct_answer,
            })
            .collect())
    }

    #[instrument(skip(self, record), fields(id = %record.id))]
    async fn put_question(&self, record: &QuestionRecord) -> anyhow::Result<()> {
        let attrs = QuestionAttrs {
            question: record.question.clone(),
            option_a: record.option_a.clone(),
            option_b: record.option_b.clone(),
            option_c: record.option_c.clone(),
            option_d: record.option_d.clone(),
            correct_answer: record.correct_answer.clone(),
        };
        self.create_document(&self.config.questions_collection, &record.id, &attrs)
            .await
    }
}

#[async_trait]
impl ScoreStore for AppwriteStore {
    #[instrument(skip(self, record), fields(test_id = %record.test_id))]
    async fn submit_score(&self, record: &ScoreRecord) -> anyhow::Result<()> {
        let attrs = ScoreAttrs {
            test_id: record.test_id.clone(),
            score: record.score,
            timestamp: record.timestamp,
            username: record.username.clone(),
        };
        let document_id = uuid::Uuid::new_v4().to_string();
        self.create_document(&self.config.scores_collection, &document_id, &attrs)
            .await
    }

    #[instrument(skip(self))]
    async fn list_scores(&self, query: &ScoreQuery) -> anyhow::Result<Vec<ScoreRecord>> {
        let mut queries = Vec::new();
        if let Some(test_id) = &query.test_id {
            queries.push(query_equal("testId", test_id));
        }
        queries.push(query_order_desc("score"));

        let docs: Vec<Document<ScoreAttrs>> = self
            .list_documents(&self.config.scores_collection, &queries)
            .await?;
        Ok(docs
            .into_iter()
            .map(|d| ScoreRecord {
                test_id: d.attrs.test_id,
                score: d.attrs.score,
                timestamp: d.attrs.timestamp,
                username: d.attrs.username,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param_contains};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(endpoint: String) -> AppConfig {
        AppConfig {
            endpoint,
            project_id: "test-project".into(),
            api_key: Some("test-key".into()),
            database_id: "db".into(),
            scenarios_collection: "scenarios".into(),
            questions_collection: "questions".into(),
            scores_collection: "scores".into(),
            bucket_id: "bucket".into(),
        }
    }

    #[tokio::test]
    async fn list_scenarios_maps_documents() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "total": 1,
            "documents": [{
                "$id": "cardiac-arrest",
                "title": "Cardiac Arrest",
                "steps": "[{\"stepId\":\"step1\",\"text\":\"Scene\",\"options\":[]}]"
            }]
        });

        Mock::given(method("GET"))
            .and(path("/databases/db/collections/scenarios/documents"))
            .and(header("X-Appwrite-Project", "test-project"))
            .and(header("X-Appwrite-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let store = AppwriteStore::new(test_config(server.uri()));
        let records = store.list_scenarios().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "cardiac-arrest");
        assert!(records[0].steps.contains("step1"));
    }

    #[tokio::test]
    async fn list_scores_sends_filter_and_order_queries() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "total": 1,
            "documents": [{
                "$id": "abc",
                "testId": "test1",
                "score": 80.0,
                "timestamp": "2025-06-01T12:00:00Z",
                "username": "sam"
            }]
        });

        Mock::given(method("GET"))
            .and(path("/databases/db/collections/scores/documents"))
            .and(query_param_contains("queries[]", "\"method\":\"equal\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let store = AppwriteStore::new(test_config(server.uri()));
        let scores = store
            .list_scores(&ScoreQuery::for_test("test1"))
            .await
            .unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 80.0);
        assert_eq!(scores[0].username.as_deref(), Some("sam"));
    }

    #[tokio::test]
    async fn submit_score_posts_camel_case_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/databases/db/collections/scores/documents"))
            .and(body_partial_json(
                serde_json::json!({"data": {"testId": "test1", "score": 75.0}}),
            ))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"$id": "new"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = AppwriteStore::new(test_config(server.uri()));
        let record = ScoreRecord {
            test_id: "test1".into(),
            score: 75.0,
            timestamp: Utc::now(),
            username: None,
        };
        store.submit_score(&record).await.unwrap();

        // Each submission gets its own generated document ID.
        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body["documentId"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/databases/db/collections/scenarios/documents"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let store = AppwriteStore::new(test_config(server.uri()));
        let err = store.list_scenarios().await.unwrap_err();
        assert!(err.to_string().contains("authentication"));
    }

    #[tokio::test]
    async fn rate_limiting_reports_retry_after() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/databases/db/collections/questions/documents"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let store = AppwriteStore::new(test_config(server.uri()));
        let err = store.list_questions().await.unwrap_err();
        assert!(err.to_string().contains("retry after 7000ms"));
    }

    #[tokio::test]
    async fn api_error_message_is_extracted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/databases/db/collections/scenarios/documents"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "message": "Document with the requested ID already exists.",
                "code": 409
            })))
            .mount(&server)
            .await;

        let store = AppwriteStore::new(test_config(server.uri()));
        let record = ScenarioRecord {
            id: "dup".into(),
            title: "Dup".into(),
            steps: "[]".into(),
        };
        let err = store.put_scenario(&record).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
