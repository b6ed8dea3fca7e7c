use crate::system_context::SystemContext;
use domain::models::ConversationMessage;
use shared::error::{Error, Result};

/// How many trailing history messages are rendered into the prompt.
pub const HISTORY_CONTEXT_MESSAGES: usize = 5;

/// Composes the deterministic generation prompt from user input, recent
/// history and local environment facts. Pure; only the interpolated fields
/// vary between calls.
pub struct PromptBuilder {
    context: SystemContext,
}

impl PromptBuilder {
    pub fn new(context: SystemContext) -> Self {
        Self { context }
    }

    pub fn build(&self, user_input: &str, history: &[ConversationMessage]) -> Result<String> {
        let input = user_input.trim();
        if input.is_empty() {
            return Err(Error::InvalidInput("user input is required".to_string()));
        }

        let recent = &history[history.len().saturating_sub(HISTORY_CONTEXT_MESSAGES)..];
        let history_context = recent
            .iter()
            .map(|message| format!("{}: {}", message.role, message.content))
            .collect::<Vec<_>>()
            .join("\n");
        let history_section = if history_context.is_empty() {
            String::new()
        } else {
            format!("Recent conversation:\n{history_context}\n\n")
        };

        Ok(format!(
            "Task: Analyze the user's request, formulate a step-by-step reasoning plan, \
and then generate a single, valid shell command to accomplish it.\n\
\n\
System Information:\n\
Current directory: {current_dir}\n\
Username: {username}\n\
Hostname: {hostname}\n\
OS: {platform} {os_version}\n\
\n\
{history_section}\
User request: {input}\n\
\n\
Requirements:\n\
1.  **Reasoning:** First, provide a brief, step-by-step plan (as a string) \
explaining how you'll achieve the user's request.\n\
2.  **Command:** Second, provide ONLY ONE single-line, executable shell command.\n\
3.  **Safety:** Avoid destructive commands unless explicitly asked. Use relative paths.\n\
4.  **Format:** Your response MUST be in this exact JSON format:\n\
    {{\n\
      \"reasoning\": \"Your step-by-step plan here.\",\n\
      \"command\": \"Your single-line command here.\"\n\
    }}\n\
\n\
Your JSON response:",
            current_dir = self.context.current_dir,
            username = self.context.username,
            hostname = self.context.hostname,
            platform = self.context.platform,
            os_version = self.context.os_version,
        ))
    }
}
