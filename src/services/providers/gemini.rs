/// Gemini generateContent backend
///
/// Maps [`GenerateRequest`] onto the REST `generateContent` endpoint. Chat state
/// lives on our side: every call carries the full turn history plus the system
/// instruction, and the optional `google_search` tool for grounding.
use crate::{
    error::ModelError,
    models::{
        ApiContent, ApiGenerateRequest, ApiGenerateResponse, ApiPart, ApiTool, CitationFragment,
    },
    services::providers::{GenerateRequest, GenerativeModel, ModelReply},
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_url, self.model)
    }

    fn build_request(request: &GenerateRequest) -> ApiGenerateRequest {
        let contents = request
            .turns
            .iter()
            .map(|turn| ApiContent {
                role: Some(turn.role.as_str().to_string()),
                parts: vec![ApiPart {
                    text: Some(turn.text.clone()),
                }],
            })
            .collect();

        let system_instruction = request.system_instruction.as_ref().map(|text| ApiContent {
            role: None,
            parts: vec![ApiPart {
                text: Some(text.clone()),
            }],
        });

        let tools = if request.web_search {
            vec![ApiTool {
                google_search: serde_json::json!({}),
            }]
        } else {
            Vec::new()
        };

        ApiGenerateRequest {
            contents,
            system_instruction,
            tools,
        }
    }

    fn convert_api_response(response: ApiGenerateResponse) -> Result<ModelReply, ModelError> {
        if let Some(reason) = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(ModelError::SafetyBlocked(format!("prompt blockReason {}", reason)));
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(ModelError::EmptyResponse)?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(ModelError::SafetyBlocked("candidate finishReason".to_string()));
        }

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ModelError::EmptyResponse);
        }

        let citations = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| CitationFragment {
                        uri: web.uri,
                        title: web.title,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(ModelReply { text, citations })
    }
}

#[async_trait::async_trait]
impl GenerativeModel for GeminiProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<ModelReply, ModelError> {
        let body = Self::build_request(request);

        tracing::debug!(
            model = %self.model,
            turns = body.contents.len(),
            web_search = request.web_search,
            "Calling generateContent"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                provider = "gemini",
                "Model request failed"
            );
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let api_response: ApiGenerateResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Decode(e.to_string()))?;
        let reply = Self::convert_api_response(api_response)?;

        tracing::info!(
            model = %self.model,
            chars = reply.text.len(),
            citations = reply.citations.len(),
            provider = "gemini",
            "Model reply received"
        );

        Ok(reply)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::Turn;

    fn parse(json: &str) -> ApiGenerateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_build_request_with_history_and_search() {
        let request = GenerateRequest {
            system_instruction: Some("Be a film buff".to_string()),
            turns: vec![Turn::user("hi"), Turn::model("hello"), Turn::user("thriller")],
            web_search: true,
        };

        let value = serde_json::to_value(GeminiProvider::build_request(&request)).unwrap();

        assert_eq!(value["contents"].as_array().unwrap().len(), 3);
        assert_eq!(value["contents"][1]["role"], "model");
        assert_eq!(value["contents"][2]["parts"][0]["text"], "thriller");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "Be a film buff");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["tools"][0]["google_search"], serde_json::json!({}));
    }

    #[test]
    fn test_build_single_request_has_no_tools() {
        let value =
            serde_json::to_value(GeminiProvider::build_request(&GenerateRequest::single("x")))
                .unwrap();

        assert!(value.get("tools").is_none());
        assert!(value.get("systemInstruction").is_none());
    }

    #[test]
    fn test_convert_joins_parts_and_collects_citations() {
        let response = parse(
            r#"{"candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"summary\":"}, {"text": "\"ok\"}"}]},
                "finishReason": "STOP",
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://imdb.com/a", "title": "imdb.com"}},
                    {"web": {"uri": "https://rt.com/b"}},
                    {}
                ]}
            }]}"#,
        );

        let reply = GeminiProvider::convert_api_response(response).unwrap();

        assert_eq!(reply.text, r#"{"summary":"ok"}"#);
        assert_eq!(reply.citations.len(), 2);
        assert_eq!(reply.citations[1].title, None);
    }

    #[test]
    fn test_convert_prompt_block_is_safety() {
        let response = parse(r#"{"candidates": [], "promptFeedback": {"blockReason": "SAFETY"}}"#);
        let err = GeminiProvider::convert_api_response(response).unwrap_err();

        assert!(matches!(err, ModelError::SafetyBlocked(_)));
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_convert_safety_finish_reason() {
        let response = parse(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#);
        let err = GeminiProvider::convert_api_response(response).unwrap_err();
        assert!(matches!(err, ModelError::SafetyBlocked(_)));
    }

    #[test]
    fn test_convert_empty_candidates() {
        let err = GeminiProvider::convert_api_response(parse(r#"{}"#)).unwrap_err();
        assert_eq!(err, ModelError::EmptyResponse);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = GeminiProvider::new(
            "key".to_string(),
            "http://test.local/".to_string(),
            "gemini-2.5-flash".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            provider.endpoint(),
            "http://test.local/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(provider.name(), "gemini");
    }
}
