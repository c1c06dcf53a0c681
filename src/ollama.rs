use anyhow::{Context, Result};

/// HTTP client for the Ollama generate API.
pub struct OllamaClient {
    pub endpoint: String,
    pub model: String,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(endpoint: String, model: String) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            client: reqwest::Client::new(),
        }
    }

    /// Send a single non-streaming prompt and return the `response` field.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false
        });

        let response = self.client
            .post(format!("{}/api/generate", self.endpoint))
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Ollama")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Ollama API error ({}): {}", status, error_text);
        }

        let response_json: serde_json::Value = response.json().await
            .context("Failed to parse Ollama response")?;

        let content = response_json["response"]
            .as_str()
            .context("No response field in Ollama response")?
            .to_string();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate_returns_response_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({ "model": "gemma:2b-instruct", "stream": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "gemma:2b-instruct",
                "response": "Hello there",
                "done": true
            })))
            .mount(&server)
            .await;

        let client =
            OllamaClient::new(format!("{}/", server.uri()), "gemma:2b-instruct".to_string());
        assert_eq!(client.generate("hi").await.unwrap(), "Hello there");
    }

    #[tokio::test]
    async fn test_generate_reports_status_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri(), "missing".to_string());
        let err = client.generate("hi").await.unwrap_err();
        assert!(err.to_string().contains("model not found"));
    }
}
