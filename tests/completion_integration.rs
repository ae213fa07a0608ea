// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the completion client using wiremock.

#![cfg(feature = "http")]

use std::time::Duration;

use voxhome_lib::command::{LightAction, TvAction};
use voxhome_lib::dispatch::{DeviceController, DeviceStatus, SequencerConfig};
use voxhome_lib::error::ControlError;
use voxhome_lib::llm::{CompletionClient, CompletionConfig};
use voxhome_lib::{Assistant, CommandEngine, EngineConfig, Error, ParseError, ProtocolError};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CompletionClient {
    CompletionConfig::new(server.uri())
        .with_system_prompt("Control the lights.")
        .into_client()
        .unwrap()
}

// ============================================================================
// CompletionClient Tests
// ============================================================================

mod completion_client {
    use super::*;

    #[tokio::test]
    async fn posts_generate_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": "gemma3:12b",
                "prompt": "Control the lights.\n\nUser: Lights off\nAssistant:",
                "system": "Control the lights.",
                "max_tokens": 1024,
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "gemma3:12b",
                "response": "Turning it off.\nLIGHT:wiz:OFF",
                "done": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let text = client_for(&mock_server).complete("Lights off").await.unwrap();
        assert_eq!(text, "Turning it off.\nLIGHT:wiz:OFF");
    }

    #[tokio::test]
    async fn custom_model_and_token_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3.1:8b",
                "max_tokens": 64
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "response": "ok" })),
            )
            .mount(&mock_server)
            .await;

        let client = CompletionConfig::new(mock_server.uri())
            .with_model("llama3.1:8b")
            .with_max_tokens(64)
            .into_client()
            .unwrap();

        assert_eq!(client.complete("hi").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn server_error_is_connection_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).complete("hi").await.unwrap_err();
        match err {
            Error::Protocol(ProtocolError::ConnectionFailed(message)) => {
                assert!(message.contains("500"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).complete("hi").await.unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Json(_))));
    }

    #[tokio::test]
    async fn missing_response_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "done": true })),
            )
            .mount(&mock_server)
            .await;

        let err = client_for(&mock_server).complete("hi").await.unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingField(field)) if field == "response"));
    }

    #[tokio::test]
    async fn timeout_is_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "response": "late" }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = CompletionConfig::new(mock_server.uri())
            .with_timeout(Duration::from_millis(50))
            .into_client()
            .unwrap();

        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, Error::Protocol(ProtocolError::Http(_))));
    }
}

// ============================================================================
// Assistant Tests
// ============================================================================

mod assistant {
    use super::*;

    struct Console;

    impl DeviceController for Console {
        async fn set_light(&self, action: &LightAction) -> Result<String, ControlError> {
            Ok(action.describe())
        }

        async fn set_tv(&self, _action: &TvAction) -> Result<String, ControlError> {
            Err(ControlError::UnknownDevice("tv".to_string()))
        }

        async fn status(&self) -> Result<DeviceStatus, ControlError> {
            Ok(DeviceStatus::default())
        }
    }

    fn engine() -> CommandEngine {
        CommandEngine::new(
            EngineConfig::default()
                .with_sequencer(SequencerConfig::default().with_pacing_delay(Duration::ZERO)),
        )
    }

    #[tokio::test]
    async fn handle_round_trip() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "Setting a cozy orange glow and turning on the TV.\n\n\
                             LIGHT:wiz:ON:brightness=40:color=30,100\nTV:ON"
            })))
            .mount(&mock_server)
            .await;

        let assistant = Assistant::new(client_for(&mock_server), engine(), Console);
        let reply = assistant.handle("Make it cozy").await.unwrap();

        assert_eq!(
            reply.spoken_text,
            "Setting a cozy orange glow and turning on the TV."
        );
        assert_eq!(
            reply.action,
            "Turned on wiz at 40% brightness with color (30, 100) | \
             Error controlling TV: unknown device: tv"
        );

        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["action"], serde_json::json!(reply.action));
        assert!(json["text"].as_str().unwrap().contains("TV:ON"));
    }

    #[tokio::test]
    async fn plain_answer_has_no_actions() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "Good evening! How can I help?"
            })))
            .mount(&mock_server)
            .await;

        let assistant = Assistant::new(client_for(&mock_server), engine(), Console);
        let reply = assistant.handle("Hello").await.unwrap();

        assert_eq!(reply.text, reply.spoken_text);
        assert_eq!(
            reply.action,
            "I understand, but I don't see any actions to take."
        );
    }

    #[tokio::test]
    async fn completion_failure_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let assistant = Assistant::new(client_for(&mock_server), engine(), Console);
        assert!(assistant.handle("Lights on").await.is_err());
    }
}
