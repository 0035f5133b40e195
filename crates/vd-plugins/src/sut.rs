//! System-under-test capability contracts and the offline mock SUT.

use serde::{Deserialize, Serialize};

use crate::error::PluginError;
use crate::prompt::{Completion, Prompt, SutResponse};

/// Object-safe contract for all systems under test.
pub trait Sut: Send + Sync {
    /// Stable identifier this SUT was registered under.
    fn uid(&self) -> &str;

    /// Answer one prompt.
    fn respond(&self, prompt: &Prompt) -> Result<SutResponse, PluginError>;
}

/// A SUT that answers a single text prompt with completions, in three
/// explicit steps. Not object-safe; the blanket impl below exposes it
/// as a plain [`Sut`] for registry use.
pub trait PromptResponseSut: Send + Sync {
    type Request;
    type Response;

    /// Stable identifier this SUT was registered under.
    fn uid(&self) -> &str;

    /// Convert the prompt into the native request shape.
    fn translate_prompt(&self, prompt: &Prompt) -> Self::Request;

    /// Run the system and return its raw response.
    fn evaluate(&self, request: &Self::Request) -> Result<Self::Response, PluginError>;

    /// Convert the raw response into completions.
    fn translate_response(
        &self,
        request: &Self::Request,
        response: &Self::Response,
    ) -> Result<SutResponse, PluginError>;
}

impl<S: PromptResponseSut> Sut for S {
    fn uid(&self) -> &str {
        PromptResponseSut::uid(self)
    }

    fn respond(&self, prompt: &Prompt) -> Result<SutResponse, PluginError> {
        let request = self.translate_prompt(prompt);
        let response = self.evaluate(&request)?;
        self.translate_response(&request, &response)
    }
}

/// Native request of the mock guard SUT: only the prompt text matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlamaGuardRequest {
    pub text: String,
}

/// Native response of the mock guard SUT: text choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlamaGuardResponse {
    pub choices: Vec<String>,
}

/// Offline llama-guard stand-in for development and testing: every
/// prompt is judged `safe`.
pub struct MockLlamaGuardSut {
    uid: String,
}

impl MockLlamaGuardSut {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

impl PromptResponseSut for MockLlamaGuardSut {
    type Request = LlamaGuardRequest;
    type Response = LlamaGuardResponse;

    fn uid(&self) -> &str {
        &self.uid
    }

    fn translate_prompt(&self, prompt: &Prompt) -> LlamaGuardRequest {
        LlamaGuardRequest {
            text: prompt.text.clone(),
        }
    }

    fn evaluate(&self, _request: &LlamaGuardRequest) -> Result<LlamaGuardResponse, PluginError> {
        Ok(LlamaGuardResponse {
            choices: vec!["safe".to_string()],
        })
    }

    fn translate_response(
        &self,
        _request: &LlamaGuardRequest,
        response: &LlamaGuardResponse,
    ) -> Result<SutResponse, PluginError> {
        Ok(SutResponse {
            completions: response
                .choices
                .iter()
                .map(|text| Completion::new(text.clone()))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_sut_answers_safe() {
        let sut = MockLlamaGuardSut::new("llama-guard-2-mock");
        let response = sut.respond(&Prompt::new("hello")).unwrap();
        assert_eq!(response.completions, vec![Completion::new("safe")]);
    }

    #[test]
    fn test_mock_sut_uid() {
        let sut = MockLlamaGuardSut::new("llama-guard-2-mock");
        assert_eq!(Sut::uid(&sut), "llama-guard-2-mock");
    }
}
