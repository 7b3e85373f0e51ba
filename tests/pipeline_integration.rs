use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quizgen::config::{Config, OpenAiConfig};
use quizgen::document::DocumentKind;
use quizgen::error::QuizgenError;
use quizgen::providers::OpenAiProvider;
use quizgen::QuizPipeline;

mod common;

fn pipeline_config(server: &MockServer, chunk_size: usize) -> Config {
    let mut config = Config::default();
    config.provider.openai = OpenAiConfig {
        api_base: server.uri(),
        ..OpenAiConfig::default()
    };
    config.generation.chunk_size = chunk_size;
    config.generation.max_concurrent_requests = 2;
    config
}

fn pipeline(config: &Config) -> QuizPipeline {
    let provider = OpenAiProvider::with_api_key(
        config.provider.openai.clone(),
        "sk-test",
        Duration::from_secs(5),
    )
    .unwrap();
    QuizPipeline::new(Arc::new(provider), config).unwrap()
}

#[tokio::test]
async fn test_text_document_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::openai_body(common::TWO_QUESTION_REPLY)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = pipeline_config(&server, 1000);
    let (_dir, doc) = common::temp_file("notes.txt", "Paris is the capital of France.");

    let outcome = pipeline(&config).run_path(&doc).await.unwrap();
    assert_eq!(outcome.chunk_count, 1);
    assert_eq!(outcome.questions.len(), 2);
    assert_eq!(outcome.questions[0].correct_option(), "C) Paris");
    assert!(outcome.failures.is_empty());
    assert!(outcome.skipped.is_empty());
}

#[tokio::test]
async fn test_failed_chunk_keeps_other_questions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("FAILCHUNK"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::openai_body(common::TWO_QUESTION_REPLY)),
        )
        .expect(2)
        .mount(&server)
        .await;

    // Three chunks of ten characters; the middle one fails
    let config = pipeline_config(&server, 10);
    let text = "aaaaaaaaaaFAILCHUNK!bbbbbbbbbb";

    let outcome = pipeline(&config)
        .run_bytes(text.as_bytes(), DocumentKind::Text)
        .await
        .unwrap();

    assert_eq!(outcome.chunk_count, 3);
    assert_eq!(outcome.questions.len(), 4);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].chunk_index, 1);
    assert!(outcome.failures[0].message.contains("upstream exploded"));
}

#[tokio::test]
async fn test_malformed_blocks_are_skipped() {
    let server = MockServer::start().await;

    let reply = format!(
        "{}\n\n3. Broken question\nA) only\nB) two\nCorrect Answer: A",
        common::TWO_QUESTION_REPLY
    );
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::openai_body(&reply)))
        .mount(&server)
        .await;

    let config = pipeline_config(&server, 1000);
    let outcome = pipeline(&config)
        .run_text("Some lecture notes.")
        .await
        .unwrap();

    assert_eq!(outcome.questions.len(), 2);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].question_text, "3. Broken question");
}

#[tokio::test]
async fn test_every_chunk_failing_is_no_questions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = pipeline_config(&server, 1000);
    let err = pipeline(&config)
        .run_text("Some lecture notes.")
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<QuizgenError>(),
        Some(QuizgenError::NoQuestions)
    ));
}

#[tokio::test]
async fn test_empty_document_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = pipeline_config(&server, 1000);
    let (_dir, doc) = common::temp_file("blank.txt", "   \n\n  ");

    let err = pipeline(&config).run_path(&doc).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<QuizgenError>(),
        Some(QuizgenError::Extraction(_))
    ));
}
