use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    conf::settings,
    prelude::{Error, Result},
};

/// Speaks the OpenAI chat-completions protocol, so it works against OpenAI,
/// Gemini's OpenAI-compatible surface, or a local Ollama.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl Client {
    pub fn from_url(api_key: &str, base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Service(e.to_string()))?;
        Ok(Client {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            timeout,
        })
    }

    pub fn from_settings() -> Result<Self> {
        Self::from_url(
            &settings.ai_key,
            &settings.ai_endpoint,
            &settings.ai_model,
            Duration::from_secs(settings.ai_timeout_secs),
        )
    }

    pub async fn chat_completion(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            stream: false,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::ServiceTimeout(self.timeout)
                } else {
                    Error::Service(e.to_string())
                }
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Service(format!(
                "completion endpoint returned {}: {}",
                status, body
            )));
        }
        let decoded: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Service(e.to_string()))?;
        decoded
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| Error::Service("completion response had no content".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[tokio::test]
    #[traced_test]
    async fn unreachable_endpoint_is_a_service_error() -> Result<()> {
        // grab a free port, then close it so nothing is listening there
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        drop(listener);
        let client = Client::from_url(
            "key",
            &format!("http://{}/v1", addr),
            "test-model",
            Duration::from_secs(2),
        )?;
        let err = client.chat_completion("hello").await.unwrap_err();
        assert!(matches!(err, Error::Service(_)));
        Ok(())
    }

    #[test]
    fn trailing_slash_is_trimmed_from_the_base_url() -> Result<()> {
        let client = Client::from_url("key", "http://localhost:11434/v1/", "m", Duration::from_secs(1))?;
        assert_eq!(client.base_url, "http://localhost:11434/v1");
        Ok(())
    }
}
