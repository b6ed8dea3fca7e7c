use colored::Colorize;
use dialoguer::console::Term;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Clears the screen and prints the startup banner.
pub fn display() {
    let _ = Term::stdout().clear_screen();
    println!("{}", render());
}

pub fn render() -> String {
    let rows = [
        ("████████╗", "  █████╗ ", " ██╗"),
        ("╚══██╔══╝", " ██╔══██╗", " ██║"),
        ("   ██║   ", " ███████║", " ██║"),
        ("   ██║   ", " ██╔══██║", " ██║"),
        ("   ██║   ", " ██║  ██║", " ██║"),
        ("   ╚═╝   ", " ╚═╝  ╚═╝", " ╚═╝"),
    ];

    let mut art = String::from("\n");
    for (t, a, i) in rows {
        art.push_str(&format!(
            "     {}{}{}\n",
            t.magenta().bold(),
            a.blue().bold(),
            i.green().bold()
        ));
    }

    art.push('\n');
    art.push_str(&format!(
        "     {}\n     {} {}  {}  {}  {}  {}\n",
        "━━━━━━━━━━━━━━━━━━━━━━".dimmed(),
        "●".green(),
        "Online".white(),
        "│".dimmed(),
        format!("v{VERSION}").yellow(),
        "│".dimmed(),
        "AI-Powered".cyan(),
    ));
    art
}
