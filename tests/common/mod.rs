use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Two well-formed questions in the reply format the prompt asks for
#[allow(dead_code)]
pub const TWO_QUESTION_REPLY: &str = "1. What is the capital of France?
A) Berlin
B) Madrid
C) Paris
D) Rome
Correct Answer: C

2. Which planet is known as the Red Planet?
A) Venus
B) Mars
C) Jupiter
D) Saturn
Correct Answer: B";

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    temp_file("config.yaml", contents)
}

#[allow(dead_code)]
pub fn temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("failed to write temp file");
    (temp_dir, path)
}

/// OpenAI chat completions response body carrying `content`
#[allow(dead_code)]
pub fn openai_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
    })
}

/// Ollama `/api/chat` response body carrying `content`
#[allow(dead_code)]
pub fn ollama_body(content: &str) -> serde_json::Value {
    json!({
        "model": "llama3.2:latest",
        "message": {"role": "assistant", "content": content},
        "done": true,
        "prompt_eval_count": 10,
        "eval_count": 20
    })
}
