use crate::GuessMap;
use crate::api_trait::ApiClientTrait;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://31pwr5t6ij.execute-api.eu-west-2.amazonaws.com";

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    team_id: String,
}

#[derive(Debug, Serialize)]
struct SelectRequest<'a> {
    id: &'a str,
    #[serde(rename = "problemName")]
    problem_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct SelectResponse {
    #[serde(rename = "problemName")]
    problem_name: String,
}

#[derive(Debug, Serialize)]
struct ExploreRequest<'a> {
    id: &'a str,
    plans: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    results: Vec<Vec<u8>>,
    #[serde(rename = "queryCount")]
    query_count: u32,
}

#[derive(Debug, Serialize)]
struct GuessRequest<'a> {
    id: &'a str,
    map: &'a GuessMap,
}

#[derive(Debug, Deserialize)]
struct GuessResponse {
    correct: bool,
}

impl ApiClient {
    pub fn new(base_url: String, team_id: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            team_id,
        }
    }

    async fn post<Req, Resp>(&self, endpoint: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to {}", endpoint, url))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "{} failed with status {}: {}",
                endpoint,
                status,
                text
            ));
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response JSON", endpoint))
    }
}

#[async_trait]
impl ApiClientTrait for ApiClient {
    async fn select_problem(&self, problem_name: &str) -> Result<String> {
        let request = SelectRequest {
            id: &self.team_id,
            problem_name,
        };
        let response: SelectResponse = self.post("select", &request).await?;
        info!(problem = %response.problem_name, "selected problem");
        Ok(response.problem_name)
    }

    async fn explore(&self, plans: Vec<String>) -> Result<(Vec<Vec<u8>>, u32)> {
        debug!(plans = plans.len(), "calling /explore");
        let request = ExploreRequest {
            id: &self.team_id,
            plans: &plans,
        };
        let response: ExploreResponse = self.post("explore", &request).await?;
        debug!(
            results = response.results.len(),
            query_count = response.query_count,
            "explore response"
        );
        Ok((response.results, response.query_count))
    }

    async fn guess(&self, map: &GuessMap) -> Result<bool> {
        debug!(
            rooms = map.rooms.len(),
            connections = map.connections.len(),
            "calling /guess"
        );
        let request = GuessRequest {
            id: &self.team_id,
            map,
        };
        let response: GuessResponse = self.post("guess", &request).await?;
        Ok(response.correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_use_contest_field_names() {
        let select = SelectRequest {
            id: "team",
            problem_name: "primus",
        };
        let value = serde_json::to_value(&select).unwrap();
        assert_eq!(value, serde_json::json!({"id": "team", "problemName": "primus"}));

        let plans = vec!["012".to_string()];
        let explore = ExploreRequest {
            id: "team",
            plans: &plans,
        };
        let value = serde_json::to_value(&explore).unwrap();
        assert_eq!(value, serde_json::json!({"id": "team", "plans": ["012"]}));
    }

    #[test]
    fn explore_response_parses_query_count() {
        let response: ExploreResponse =
            serde_json::from_str(r#"{"results": [[0, 1, 2]], "queryCount": 2}"#).unwrap();
        assert_eq!(response.results, vec![vec![0, 1, 2]]);
        assert_eq!(response.query_count, 2);
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = ApiClient::new("http://localhost:8080/".to_string(), "team".to_string());
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
