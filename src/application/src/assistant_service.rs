use domain::models::{AiResponse, GenerationRequest, Role};
use domain::services::Transport;
use infrastructure::api_client::{ApiClient, HttpTransport};
use infrastructure::config::Config;
use infrastructure::history_store::HistoryStore;
use infrastructure::prompt_builder::{PromptBuilder, HISTORY_CONTEXT_MESSAGES};
use infrastructure::response_parser;
use infrastructure::system_context::SystemContext;
use shared::error::{Error, Result};

/// Explicit pipeline context owned by the process lifetime: the retrying
/// client, the prompt builder and the history store. Built once at startup
/// and passed to each stage; no implicit global state.
pub struct AssistantService<T: Transport> {
    client: ApiClient<T>,
    prompt_builder: PromptBuilder,
    history: HistoryStore,
}

impl AssistantService<HttpTransport> {
    pub fn connect(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.api_url.clone(), config.request_timeout)?;
        Self::with_transport(transport, config)
    }
}

impl<T: Transport> AssistantService<T> {
    pub fn with_transport(transport: T, config: &Config) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(transport, config.max_attempts, config.backoff_unit),
            prompt_builder: PromptBuilder::new(SystemContext::probe()),
            history: HistoryStore::open(&config.history_path)?,
        })
    }

    /// One full generation call: prompt, network exchange, validation,
    /// then history append. The caller owns the gate and the execution.
    pub async fn generate_command(&mut self, user_input: &str) -> Result<AiResponse> {
        let prompt = self
            .prompt_builder
            .build(user_input, self.history.recent(HISTORY_CONTEXT_MESSAGES))?;

        let body = self.client.send(&GenerationRequest::command(prompt)).await?;
        let content = response_parser::extract_content(&body)?;
        let response = response_parser::parse_ai_response(&content)?;

        self.history.append(Role::User, user_input.trim())?;
        // The generated command, not the reasoning, is what later prompts
        // need as assistant context.
        self.history.append(Role::Assistant, response.command.clone())?;

        Ok(response)
    }

    /// Free-chat exchange: same resilient client, `{prompt, mode}` payload,
    /// envelope content returned verbatim for the presentation layer.
    pub async fn chat_reply(&mut self, user_input: &str) -> Result<String> {
        let input = user_input.trim();
        if input.is_empty() {
            return Err(Error::InvalidInput("message is required".to_string()));
        }

        let body = self.client.send(&GenerationRequest::chat(input)).await?;
        let content = response_parser::extract_content(&body)?;

        self.history.append(Role::User, input)?;
        self.history.append(Role::Assistant, content.clone())?;

        Ok(content)
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// The underlying transport; lets tests inspect recorded exchanges.
    pub fn transport(&self) -> &T {
        self.client.transport()
    }
}
