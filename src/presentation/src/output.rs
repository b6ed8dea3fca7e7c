use chrono::Local;
use colored::Colorize;
use domain::models::ExecutionResult;

pub fn analysis_panel(reasoning: &str) {
    println!(
        "{}{}{}",
        "┌─ ".cyan(),
        "AI Analysis".cyan().bold(),
        " ─".cyan()
    );
    for line in reasoning.lines() {
        println!("{}{}", "│ ".cyan(), line.dimmed());
    }
    println!("{}\n", "└─".cyan());
}

pub fn command_panel(command: &str) {
    println!(
        "{}{}{}",
        "┌─ ".yellow(),
        "Generated Command".yellow().bold(),
        " ─".yellow()
    );
    println!("{}{}", "│ ".yellow(), command.white().bold());
    println!("{}\n", "└─".yellow());
}

pub fn danger_warning() {
    println!("{}", "┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┓".red());
    println!(
        "{}{}{}",
        "┃".red(),
        "  ⚠  WARNING: POTENTIALLY DANGEROUS  ".red().bold(),
        "┃".red()
    );
    println!("{}\n", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".red());
}

pub fn cancelled() {
    println!("{}\n", "✗ Execution cancelled".red());
}

pub fn execution_result(result: &ExecutionResult) {
    if result.success {
        println!("{}\n", "✓ Command completed successfully".green());
        if let Some(output) = result.output.as_deref().filter(|o| !o.is_empty()) {
            println!("{}", "┌─ Output ─".dimmed());
            for line in output.lines() {
                println!("{}{}", "│ ".dimmed(), line);
            }
            println!("{}\n", "└─".dimmed());
        }
    } else {
        println!("{}\n", "✗ Command failed".red());
        println!("{}", "┌─ Error ─".red());
        println!(
            "{}{}",
            "│ ".red(),
            result.error.as_deref().unwrap_or("unknown error")
        );
        println!("{}\n", "└─".red());
    }
}

pub fn fatal_error(message: &str) {
    eprintln!(
        "\n{}{}\n",
        "✗ Fatal Error: ".red().bold(),
        message.red()
    );
}

pub fn error_line(message: &str) {
    eprintln!("\n{}{}\n", "✗ Error: ".red(), message.red());
}

/// Frames an already-rendered chat reply with a left border and timestamp.
pub fn chat_frame(rendered: &str) {
    println!("{}", "\n╭─ T-AI".magenta().bold());
    println!("{}", "│".magenta());
    for line in rendered.lines() {
        if line.trim().is_empty() {
            continue;
        }
        println!("{}{}", "│ ".magenta(), line);
    }
    println!(
        "{}{}\n",
        "╰─".magenta(),
        format!(" {}", Local::now().format("%H:%M:%S")).dimmed()
    );
}

pub fn chat_help() {
    let rule = "━".repeat(67);
    println!("{}", rule.dimmed());
    println!("{}", "  ✓ Chat mode activated".green());
    println!("{}", "  • Type your message and press Enter".dimmed());
    println!(
        "{}{}{}{}{}",
        "  • Type ".dimmed(),
        "'exit'".cyan(),
        " or ".dimmed(),
        "'quit'".cyan(),
        " to end session".dimmed()
    );
    println!(
        "{}{}{}",
        "  • Type ".dimmed(),
        "'clear'".cyan(),
        " to clear conversation history".dimmed()
    );
    println!(
        "{}{}{}",
        "  • Type ".dimmed(),
        "'banner'".cyan(),
        " to show banner again".dimmed()
    );
    println!("{}\n", rule.dimmed());
}

pub fn goodbye() {
    println!("{}", "\n╭─────────────────────╮".cyan());
    println!(
        "{}{}{}",
        "│".cyan(),
        "  Goodbye! 👋        ".bold(),
        "│".cyan()
    );
    println!("{}\n", "╰─────────────────────╯".cyan());
}

pub fn history_cleared() {
    println!("{}\n", "✨ Conversation history cleared".green());
}

pub fn new_conversation() {
    println!("{}\n", "✨ Started a new conversation".green());
}

pub fn usage_hint() {
    println!(
        "{}{}{}",
        "Use".dimmed(),
        " tai chat ".cyan(),
        "to start interactive mode".dimmed()
    );
    println!(
        "{}{}{}\n",
        "Use".dimmed(),
        " tai --help ".cyan(),
        "to see all options".dimmed()
    );
}
