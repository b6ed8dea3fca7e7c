use application::assistant_service::AssistantService;
use application::gate::{ExecutionGate, GateDecision, GateState};
use async_trait::async_trait;
use domain::models::{ExecutionResult, GenerationRequest};
use domain::services::{CommandRunner, Confirmer, Transport};
use infrastructure::config::Config;
use shared::error::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

fn test_config(dir: &TempDir) -> Config {
    Config {
        api_url: "http://localhost/unused".to_string(),
        config_dir: dir.path().to_path_buf(),
        history_path: dir.path().join("history.json"),
        request_timeout: Duration::from_secs(30),
        max_attempts: 3,
        backoff_unit: Duration::from_millis(1000),
    }
}

fn service_requests(service: &AssistantService<RecordingTransport>) -> Vec<GenerationRequest> {
    service.transport().requests.lock().unwrap().clone()
}

fn envelope_with(content: &str) -> String {
    serde_json::json!({
        "choices": [{ "message": { "content": content } }]
    })
    .to_string()
}

/// Records every payload it sees and replies from a fixed script.
struct RecordingTransport {
    requests: Mutex<Vec<GenerationRequest>>,
    replies: Mutex<Vec<Result<String>>>,
}

impl RecordingTransport {
    fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(replies),
        }
    }

    fn replying(body: String) -> Self {
        Self::new(vec![Ok(body)])
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn post(&self, request: &GenerationRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            Err(Error::Network("script exhausted".to_string()))
        } else {
            replies.remove(0)
        }
    }
}

struct ScriptedConfirmer {
    answer: bool,
    asked: usize,
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&mut self, _command: &str) -> Result<bool> {
        self.asked += 1;
        Ok(self.answer)
    }
}

struct CountingRunner {
    runs: AtomicUsize,
}

impl CountingRunner {
    fn new() -> Self {
        Self {
            runs: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CommandRunner for CountingRunner {
    async fn run(&self, _command: &str) -> ExecutionResult {
        self.runs.fetch_add(1, Ordering::SeqCst);
        ExecutionResult::succeeded("done")
    }
}

/// The confirm-then-execute tail of the pipeline, as the binary drives it.
async fn gate_and_run<C: Confirmer>(
    command: &str,
    confirmer: &mut C,
    runner: &CountingRunner,
) -> Result<GateState> {
    let mut gate = ExecutionGate::new();
    if gate.resolve(command, confirmer)? == GateDecision::Proceed {
        runner.run(command).await;
    }
    Ok(gate.state())
}

#[tokio::test]
async fn test_generate_command_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let content = "Here you go:\n\
        {\"reasoning\": \"List directory contents briefly.\", \"command\": \"```cmd\\ndir /B\\n```\"}";
    let transport = RecordingTransport::replying(envelope_with(content));

    let mut service = AssistantService::with_transport(transport, &test_config(&dir)).unwrap();
    let response = service.generate_command("show me the files").await.unwrap();

    assert_eq!(response.command, "dir /B");
    assert_eq!(response.reasoning, "List directory contents briefly.");

    // Both turns recorded: the user text and the sanitized command.
    let history = service.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history.recent(2)[0].content, "show me the files");
    assert_eq!(history.recent(2)[1].content, "dir /B");
}

#[tokio::test]
async fn test_prompt_carries_user_text_and_prior_history() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);

    let first = RecordingTransport::replying(envelope_with(
        r#"{"reasoning": "plan", "command": "ls"}"#,
    ));
    let mut service = AssistantService::with_transport(first, &config).unwrap();
    service.generate_command("first request").await.unwrap();
    drop(service);

    let second = RecordingTransport::replying(envelope_with(
        r#"{"reasoning": "plan", "command": "pwd"}"#,
    ));
    let mut service = AssistantService::with_transport(second, &config).unwrap();
    service.generate_command("second request").await.unwrap();

    let requests = service_requests(&service);
    let prompt = &requests[0].prompt;
    assert!(prompt.contains("User request: second request"));
    assert!(prompt.contains("user: first request"));
    assert!(prompt.contains("assistant: ls"));
    assert!(requests[0].mode.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_generation_survives_transient_api_failures() {
    let dir = tempfile::tempdir().unwrap();
    let transport = RecordingTransport::new(vec![
        Err(Error::Api {
            status: 503,
            body: "unavailable".to_string(),
        }),
        Err(Error::Network("connection reset".to_string())),
        Ok(envelope_with(r#"{"reasoning": "plan", "command": "uptime"}"#)),
    ]);

    let mut service = AssistantService::with_transport(transport, &test_config(&dir)).unwrap();
    let response = service.generate_command("how long has this been up").await.unwrap();
    assert_eq!(response.command, "uptime");
}

#[tokio::test(start_paused = true)]
async fn test_generation_fails_after_retry_exhaustion() {
    let dir = tempfile::tempdir().unwrap();
    let transport = RecordingTransport::new(vec![
        Err(Error::Network("refused".to_string())),
        Err(Error::Network("refused".to_string())),
        Err(Error::Network("refused again".to_string())),
    ]);

    let mut service = AssistantService::with_transport(transport, &test_config(&dir)).unwrap();
    let err = service.generate_command("anything").await.unwrap_err();
    assert_eq!(err.code(), "MAX_RETRIES_EXCEEDED");
    assert!(err.to_string().contains("refused again"));

    // Failed generations leave no trace in history.
    assert!(service.history().is_empty());
}

#[tokio::test]
async fn test_malformed_model_output_is_not_retried() {
    let dir = tempfile::tempdir().unwrap();
    let transport = RecordingTransport::replying(envelope_with("no json here, sorry"));

    let mut service = AssistantService::with_transport(transport, &test_config(&dir)).unwrap();
    let err = service.generate_command("anything").await.unwrap_err();

    assert_eq!(err.code(), "NO_JSON_FOUND");
    assert_eq!(service_requests(&service).len(), 1);
}

#[tokio::test]
async fn test_declined_dangerous_command_never_runs() {
    let mut confirmer = ScriptedConfirmer {
        answer: false,
        asked: 0,
    };
    let runner = CountingRunner::new();

    let state = gate_and_run("format C:", &mut confirmer, &runner).await.unwrap();

    assert_eq!(state, GateState::Cancelled);
    assert_eq!(confirmer.asked, 1);
    assert_eq!(runner.runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_confirmed_dangerous_command_runs_exactly_once() {
    let mut confirmer = ScriptedConfirmer {
        answer: true,
        asked: 0,
    };
    let runner = CountingRunner::new();

    let state = gate_and_run("del /f somefile.txt", &mut confirmer, &runner)
        .await
        .unwrap();

    assert_eq!(state, GateState::Approved);
    assert_eq!(runner.runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_safe_command_skips_confirmation_entirely() {
    let mut confirmer = ScriptedConfirmer {
        answer: false,
        asked: 0,
    };
    let runner = CountingRunner::new();

    let state = gate_and_run("dir /B", &mut confirmer, &runner).await.unwrap();

    assert_eq!(state, GateState::AutoApproved);
    assert_eq!(confirmer.asked, 0);
    assert_eq!(runner.runs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_chat_reply_uses_the_chat_mode_payload() {
    let dir = tempfile::tempdir().unwrap();
    let transport = RecordingTransport::replying(envelope_with("**hello** back"));

    let mut service = AssistantService::with_transport(transport, &test_config(&dir)).unwrap();
    let reply = service.chat_reply("hello there").await.unwrap();

    assert_eq!(reply, "**hello** back");
    let requests = service_requests(&service);
    assert_eq!(requests[0].prompt, "hello there");
    assert!(requests[0].mode.is_some());
    assert_eq!(service.history().len(), 2);
}
