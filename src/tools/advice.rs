//! Vet Advice MCP Tool
//!
//! Forwards dog nutrition questions to a chat-completions endpoint with the
//! dog's profile as context. Not a veterinarian.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::models::DogProfile;

pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_ADVICE_MODEL: &str = "deepseek/deepseek-r1-0528:free";
pub const ADVICE_TIMEOUT: Duration = Duration::from_secs(30);

/// Reply when no API key is configured
pub const API_KEY_MISSING: &str = "API key missing. Please add your OpenRouter API key.";

/// Advice client errors
#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("API key missing")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Advice service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Advice service returned no answer")]
    EmptyResponse,
}

/// Something that can answer a nutrition question about a dog
#[async_trait]
pub trait AdviceClient: Send + Sync {
    async fn ask(&self, question: &str, profile: &DogProfile) -> Result<String, AdviceError>;
}

/// System prompt with the assistant rules and the dog's profile
pub fn build_system_prompt(profile: &DogProfile) -> String {
    let mut profile_bits = vec![format!("Name: {}", profile.name)];
    if profile.weight_kg > 0.0 {
        profile_bits.push(format!("Weight: {} kg", profile.weight_kg));
    }
    if !profile.breed.trim().is_empty() {
        profile_bits.push(format!("Breed: {}", profile.breed));
    }
    profile_bits.push(format!("Activity level: {}", profile.activity.label()));

    format!(
        "You are a cautious canine nutrition assistant.\n\
         You answer questions about safe/unsafe foods, calories, and general dog nutrition.\n\
         You do NOT provide medical diagnoses. For emergencies or serious symptoms, \
         always tell the user to contact a veterinarian immediately.\n\
         Dog profile: {}\n",
        profile_bits.join("; ")
    )
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenRouter chat-completions client
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>, model: Option<String>) -> Result<Self, AdviceError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(AdviceError::MissingApiKey);
        }
        let http = reqwest::Client::builder().timeout(ADVICE_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_ADVICE_MODEL.to_string()),
            url: OPENROUTER_URL.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AdviceClient for OpenRouterClient {
    async fn ask(&self, question: &str, profile: &DogProfile) -> Result<String, AdviceError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": build_system_prompt(profile)},
                {"role": "user", "content": question},
            ]
        });

        tracing::debug!(model = %self.model, "requesting vet advice");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "vet advice request failed");
            return Err(AdviceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: ChatResponse = response.json().await?;
        extract_answer(data)
    }
}

fn extract_answer(data: ChatResponse) -> Result<String, AdviceError> {
    data.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(AdviceError::EmptyResponse)
}

/// Response for ask_vet
#[derive(Debug, Serialize)]
pub struct AskVetResponse {
    pub question: String,
    pub answer: String,
    pub disclaimer: &'static str,
}

const DISCLAIMER: &str =
    "This is not a real veterinarian. For emergencies or serious concerns, contact a vet immediately.";

/// Ask the advice client a question about the profiled dog
pub async fn ask_vet(
    client: Option<&dyn AdviceClient>,
    question: &str,
    profile: &DogProfile,
) -> Result<AskVetResponse, String> {
    let question = question.trim();
    if question.is_empty() {
        return Err("Question cannot be empty".to_string());
    }

    let answer = match client {
        Some(client) => client
            .ask(question, profile)
            .await
            .map_err(|e| format!("Error contacting vet assistant: {}", e))?,
        None => API_KEY_MISSING.to_string(),
    };

    Ok(AskVetResponse {
        question: question.to_string(),
        answer,
        disclaimer: DISCLAIMER,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityLevel;

    struct CannedClient(Result<&'static str, ()>);

    #[async_trait]
    impl AdviceClient for CannedClient {
        async fn ask(&self, question: &str, profile: &DogProfile) -> Result<String, AdviceError> {
            match self.0 {
                Ok(answer) => Ok(format!("{} / {} / {}", profile.name, question, answer)),
                Err(()) => Err(AdviceError::EmptyResponse),
            }
        }
    }

    #[test]
    fn test_system_prompt_includes_profile() {
        let profile = DogProfile {
            activity: ActivityLevel::Working,
            ..DogProfile::default()
        };
        let prompt = build_system_prompt(&profile);
        assert!(prompt.starts_with("You are a cautious canine nutrition assistant."));
        assert!(prompt.contains("contact a veterinarian immediately"));
        assert!(prompt.contains(
            "Dog profile: Name: Duoduo; Weight: 25 kg; Breed: Golden Retriever; Activity level: Active/Working"
        ));
    }

    #[test]
    fn test_extract_answer() {
        let data: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "  Plain pumpkin is fine.\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_answer(data).unwrap(), "Plain pumpkin is fine.");

        let empty: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(extract_answer(empty), Err(AdviceError::EmptyResponse)));
    }

    #[test]
    fn test_client_defaults_model() {
        let client = OpenRouterClient::new("key", None).unwrap();
        assert_eq!(client.model(), DEFAULT_ADVICE_MODEL);
        let client = OpenRouterClient::new("key", Some("other/model".to_string())).unwrap();
        assert_eq!(client.model(), "other/model");

        assert!(matches!(OpenRouterClient::new("  ", None), Err(AdviceError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_ask_vet_without_client() {
        let response = ask_vet(None, "Can dogs eat carrots?", &DogProfile::default())
            .await
            .unwrap();
        assert_eq!(response.answer, API_KEY_MISSING);
    }

    #[tokio::test]
    async fn test_ask_vet_with_client() {
        let client = CannedClient(Ok("Yes, in moderation."));
        let response = ask_vet(Some(&client as &dyn AdviceClient), "  Can dogs eat carrots? ", &DogProfile::default())
            .await
            .unwrap();
        assert_eq!(response.question, "Can dogs eat carrots?");
        assert_eq!(response.answer, "Duoduo / Can dogs eat carrots? / Yes, in moderation.");
    }

    #[tokio::test]
    async fn test_ask_vet_errors() {
        let profile = DogProfile::default();
        assert!(ask_vet(None, "   ", &profile).await.is_err());

        let failing = CannedClient(Err(()));
        let err = ask_vet(Some(&failing as &dyn AdviceClient), "Is cheese ok?", &profile).await.unwrap_err();
        assert!(err.contains("no answer"));
    }
}
