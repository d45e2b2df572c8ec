// OpenAI API client
// Author: kelexine (https://github.com/kelexine)

use super::models::{ImageEditResponse, ResponsesRequest, ResponsesResponse};
use crate::config::OpenAiConfig;
use crate::error::{Result, SpriteForgeError};
use crate::utils::logging::sanitize;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error};

/// Client for the OpenAI REST API.
///
/// Handles authentication and request shaping for:
/// - `/responses` text generation (vision → JSON descriptions)
/// - `/responses` with the image generation tool (sprite generation)
/// - `/images/edits` (keyframe sheet edits)
///
/// No retries are performed; upstream failures propagate immediately.
pub struct OpenAiClient {
    http_client: Client,
    api_key: String,
    config: OpenAiConfig,
}

// Manual impl: the credential must never reach logs or panic messages
impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_key", &"[REDACTED_API_KEY]")
            .field("api_base_url", &self.config.api_base_url)
            .field("describe_model", &self.config.describe_model)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Create a new OpenAI client.
    ///
    /// Resolves the API credential (config value or `OPENAI_API_KEY`) and
    /// configures a pooled HTTP client. Fails with a configuration error
    /// when no credential is available.
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| SpriteForgeError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client with connection pooling and keep-alive");

        Ok(Self {
            http_client,
            api_key,
            config: config.clone(),
        })
    }

    /// The configured upstream settings.
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Call the `/responses` endpoint and decode the result.
    pub async fn create_response(&self, request: &ResponsesRequest) -> Result<ResponsesResponse> {
        let url = format!("{}/responses", self.config.api_base_url);
        debug!("Calling responses API for model: {}", request.model);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| SpriteForgeError::Api(format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "OpenAI API error: HTTP {} - Response body: {}",
                status,
                sanitize(&error_text)
            );
            let error_msg = Self::extract_error_message(&error_text).unwrap_or(error_text);
            return Err(SpriteForgeError::Api(format!("HTTP {}: {}", status, error_msg)));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| SpriteForgeError::Api(format!("Failed to read response body: {}", e)))?;

        debug!(
            "Raw OpenAI response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse OpenAI response: {}", e);
            SpriteForgeError::MalformedResponse(format!("Response parsing error: {}", e))
        })
    }

    /// Generate text via `/responses` and return the concatenated output.
    ///
    /// An empty text output is a malformed-response error: the service was
    /// reachable but produced nothing usable.
    pub async fn generate_text(&self, request: &ResponsesRequest) -> Result<String> {
        let response = self.create_response(request).await?;
        let text = response.output_text();

        if text.trim().is_empty() {
            return Err(SpriteForgeError::MalformedResponse(
                "No text returned from the responses request".to_string(),
            ));
        }

        Ok(text)
    }

    /// Generate an image via the `/responses` image generation tool and
    /// return the first base64 payload.
    pub async fn generate_image(&self, request: &ResponsesRequest) -> Result<String> {
        let response = self.create_response(request).await?;

        match response.image_results().first() {
            Some(data) => Ok((*data).to_string()),
            None => Err(SpriteForgeError::MalformedResponse(
                "No image data returned from image generation".to_string(),
            )),
        }
    }

    /// Edit an image via the `/images/edits` multipart endpoint and return
    /// the base64 payload of the first result.
    pub async fn edit_image(
        &self,
        image_bytes: Vec<u8>,
        file_name: &str,
        mime_type: &str,
        prompt: &str,
    ) -> Result<String> {
        let url = format!("{}/images/edits", self.config.api_base_url);
        debug!("Calling images edit API for model: {}", self.config.edit_model);

        let image_part = Part::bytes(image_bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| SpriteForgeError::InvalidRequest(format!("Invalid MIME type: {}", e)))?;

        let form = Form::new()
            .part("image", image_part)
            .text("prompt", prompt.to_string())
            .text("model", self.config.edit_model.clone())
            .text("n", "1")
            .text("size", "1024x1024")
            .text("quality", "auto")
            .text("background", "transparent")
            .text("input_fidelity", "high");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SpriteForgeError::Api(format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "OpenAI API error: HTTP {} - Response body: {}",
                status,
                sanitize(&error_text)
            );
            let error_msg = Self::extract_error_message(&error_text).unwrap_or(error_text);
            return Err(SpriteForgeError::Api(format!("HTTP {}: {}", status, error_msg)));
        }

        let edit_response: ImageEditResponse = response
            .json()
            .await
            .map_err(|e| SpriteForgeError::MalformedResponse(format!("Response parsing error: {}", e)))?;

        edit_response
            .data
            .into_iter()
            .find_map(|datum| datum.b64_json)
            .ok_or_else(|| {
                SpriteForgeError::MalformedResponse(
                    "No image data returned from images edit".to_string(),
                )
            })
    }

    /// Extract error message from an API error response body.
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            code: Option<String>,
        }

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
            if let Some(error) = error_resp.error {
                return error.message.or(error.code);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error": {"message": "Invalid API key", "type": "invalid_request_error"}}"#;
        assert_eq!(
            OpenAiClient::extract_error_message(body),
            Some("Invalid API key".to_string())
        );
    }

    #[test]
    fn test_extract_error_message_not_json() {
        assert_eq!(OpenAiClient::extract_error_message("<html>502</html>"), None);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = crate::config::OpenAiConfig {
            api_key: "sk-secret-test-key-12345".to_string(),
            ..Default::default()
        };
        let client = OpenAiClient::new(&config).unwrap();

        let debug = format!("{:?}", client);
        assert!(!debug.contains("sk-secret-test-key-12345"));
        assert!(debug.contains("[REDACTED_API_KEY]"));
    }
}
