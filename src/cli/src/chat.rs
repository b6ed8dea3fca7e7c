use application::assistant_service::AssistantService;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use infrastructure::config::Config;
use presentation::{banner, markdown, output, spinner};
use std::process::ExitCode;

/// Interactive REPL. Reserved keywords: exit/quit, clear, banner.
pub async fn run(config: &Config, new_conversation: bool) -> anyhow::Result<ExitCode> {
    banner::display();
    output::chat_help();

    let mut service = AssistantService::connect(config)?;
    if new_conversation {
        service.clear_history()?;
        output::new_conversation();
    }

    let theme = ColorfulTheme::default();
    loop {
        let line: String = Input::with_theme(&theme)
            .with_prompt("❯")
            .allow_empty(true)
            .interact_text()?;

        match line.trim().to_lowercase().as_str() {
            "exit" | "quit" => {
                output::goodbye();
                return Ok(ExitCode::SUCCESS);
            }
            "clear" => {
                service.clear_history()?;
                output::history_cleared();
                continue;
            }
            "banner" => {
                banner::display();
                continue;
            }
            "" => continue,
            _ => {}
        }

        let progress = spinner::start("T-AI is thinking...");
        let reply = service.chat_reply(line.trim()).await;
        progress.finish_and_clear();

        match reply {
            Ok(text) => output::chat_frame(&markdown::render(&text)),
            // Chat errors are per-turn, not fatal; the loop continues.
            Err(err) => output::error_line(&err.to_string()),
        }
    }
}
