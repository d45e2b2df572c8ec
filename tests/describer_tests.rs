// OpenAI describer tests: prompting, parsing, normalization, pose merge
// Author: kelexine (https://github.com/kelexine)

use spriteforge::config::{OpenAiConfig, ResourceConfig};
use spriteforge::describer::{CharacterDescriber, OpenAiDescriber, PromptLibrary};
use spriteforge::error::SpriteForgeError;
use spriteforge::openai::OpenAiClient;
use std::sync::Arc;

fn describer_for(server_url: String) -> OpenAiDescriber {
    let config = OpenAiConfig {
        api_key: "sk-test".to_string(),
        api_base_url: server_url,
        ..Default::default()
    };
    let client = Arc::new(OpenAiClient::new(&config).unwrap());
    let prompts = PromptLibrary::load(&ResourceConfig::default()).unwrap();
    OpenAiDescriber::new(client, prompts)
}

fn message_body(text: &str) -> String {
    serde_json::json!({
        "output": [
            { "type": "message", "content": [ { "type": "output_text", "text": text } ] }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_partial_model_output_is_normalized() {
    let mut server = mockito::Server::new_async().await;
    // The model answered with only two fields; everything else must be
    // filled with placeholders, never dropped.
    let _mock = server
        .mock("POST", "/responses")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(message_body(
            r#"{"character_id": "c1", "pose": {"overall_pose": "standing"}}"#,
        ))
        .create_async()
        .await;

    let describer = describer_for(server.url());
    let description = describer.describe_from_base64("QUJD").await.unwrap();

    assert_eq!(description.character_id, "c1");
    assert_eq!(description.pose.overall_pose, "standing");
    assert_eq!(description.pose.gaze_direction, "unknown");
    assert_eq!(description.one_line_summary, "unknown");
    assert!(!description.pose.is_airborne);
    assert!(description.color_palette.is_empty());
}

#[tokio::test]
async fn test_fenced_model_output_is_accepted() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/responses")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(message_body(
            "```json\n{\"character_id\": \"c2\"}\n```",
        ))
        .create_async()
        .await;

    let describer = describer_for(server.url());
    let description = describer.describe_from_base64("QUJD").await.unwrap();
    assert_eq!(description.character_id, "c2");
}

#[tokio::test]
async fn test_non_json_output_is_malformed_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/responses")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(message_body("I see a knight but I cannot produce JSON."))
        .create_async()
        .await;

    let describer = describer_for(server.url());
    let err = describer.describe_from_base64("QUJD").await.unwrap_err();
    assert!(matches!(err, SpriteForgeError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_update_pose_merges_only_pose() {
    let mut server = mockito::Server::new_async().await;

    // First call: describe. Second call: pose update.
    let _mock = server
        .mock("POST", "/responses")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(message_body(r#"{"character_id": "c1", "outfit": "teal armor"}"#))
        .expect(1)
        .create_async()
        .await;

    let describer = describer_for(server.url());
    let original = describer.describe_from_base64("QUJD").await.unwrap();
    assert_eq!(original.outfit, "teal armor");

    let _mock = server
        .mock("POST", "/responses")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(message_body(
            r#"{"pose": {"overall_pose": "jumping", "is_airborne": true, "outfit": "red dress"}}"#,
        ))
        .create_async()
        .await;

    let updated = describer.update_pose(&original, "jump").await.unwrap();

    assert_eq!(updated.pose.overall_pose, "jumping");
    assert!(updated.pose.is_airborne);
    // Non-pose fields are byte-identical to the original
    assert_eq!(updated.outfit, original.outfit);
    assert_eq!(updated.character_id, original.character_id);
}
