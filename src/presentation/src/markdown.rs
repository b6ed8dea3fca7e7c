use colored::Colorize;
use markdown::mdast::Node;
use markdown::ParseOptions;

/// Renders markdown as styled terminal text. Unparseable input falls back
/// to the raw source rather than failing the chat turn.
pub fn render(source: &str) -> String {
    match markdown::to_mdast(source, &ParseOptions::gfm()) {
        Ok(tree) => {
            let mut out = String::new();
            render_blocks(&tree, &mut out);
            out
        }
        Err(_) => source.to_string(),
    }
}

fn render_blocks(node: &Node, out: &mut String) {
    match node {
        Node::Root(root) => {
            for child in &root.children {
                render_blocks(child, out);
            }
        }
        Node::Heading(heading) => {
            let text = inline_text(&heading.children);
            let styled = match heading.depth {
                1 => format!("\n▓▓ {text} ▓▓\n\n").magenta().bold().to_string(),
                2 => format!("\n▒▒ {text}\n\n").cyan().bold().to_string(),
                3 => format!("\n░░ {text}\n").blue().bold().to_string(),
                depth => format!("\n{} {text}\n", "▪".repeat(depth as usize))
                    .white()
                    .bold()
                    .to_string(),
            };
            out.push_str(&styled);
        }
        Node::Paragraph(paragraph) => {
            out.push_str(&inline_text(&paragraph.children));
            out.push_str("\n\n");
        }
        Node::Code(code) => {
            let lang = code.lang.as_deref().unwrap_or("code");
            out.push_str(&format!("\n{}\n", format!("┌─ {lang} ─").dimmed()));
            for line in code.value.lines() {
                out.push_str(&format!("{}\n", format!("│ {line}").yellow()));
            }
            out.push_str(&format!("{}\n\n", "└─".dimmed()));
        }
        Node::List(list) => {
            out.push('\n');
            let start = list.start.unwrap_or(1);
            for (index, item) in list.children.iter().enumerate() {
                let prefix = if list.ordered {
                    format!("{}.", start as usize + index).cyan().to_string()
                } else {
                    "●".magenta().to_string()
                };
                out.push_str(&format!("  {prefix} {}\n", item_text(item)));
            }
            out.push('\n');
        }
        Node::Blockquote(quote) => {
            let mut inner = String::new();
            for child in &quote.children {
                render_blocks(child, &mut inner);
            }
            out.push('\n');
            for line in inner.lines().filter(|l| !l.trim().is_empty()) {
                out.push_str(&format!("{} {}\n", "┃".blue(), line.italic().dimmed()));
            }
            out.push('\n');
        }
        Node::ThematicBreak(_) => {
            out.push_str(&format!("\n{}\n\n", "─".repeat(60).dimmed()));
        }
        Node::Table(table) => {
            out.push('\n');
            for (row_index, row) in table.children.iter().enumerate() {
                if let Node::TableRow(row) = row {
                    let cells: Vec<String> = row
                        .children
                        .iter()
                        .map(|cell| match cell {
                            Node::TableCell(cell) => inline_text(&cell.children),
                            other => inline_text(std::slice::from_ref(other)),
                        })
                        .collect();
                    let line = cells.join(" │ ");
                    if row_index == 0 {
                        out.push_str(&format!("{}\n", line.cyan().bold()));
                        out.push_str(&format!(
                            "{}\n",
                            "─".repeat(line.chars().count().min(60)).dimmed()
                        ));
                    } else {
                        out.push_str(&line);
                        out.push('\n');
                    }
                }
            }
            out.push('\n');
        }
        other => {
            // Inline node at block level, or something exotic: render as text.
            out.push_str(&inline_text(std::slice::from_ref(other)));
        }
    }
}

/// List items hold paragraphs; flatten them to one line per item.
fn item_text(item: &Node) -> String {
    match item {
        Node::ListItem(item) => item
            .children
            .iter()
            .map(|child| match child {
                Node::Paragraph(paragraph) => inline_text(&paragraph.children),
                other => inline_text(std::slice::from_ref(other)),
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string(),
        other => inline_text(std::slice::from_ref(other)),
    }
}

fn inline_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&text.value),
            Node::InlineCode(code) => {
                out.push_str(&format!(" {} ", code.value).yellow().on_black().to_string());
            }
            Node::Strong(strong) => {
                out.push_str(&inline_text(&strong.children).white().bold().to_string());
            }
            Node::Emphasis(emphasis) => {
                out.push_str(&inline_text(&emphasis.children).italic().to_string());
            }
            Node::Delete(delete) => {
                out.push_str(
                    &inline_text(&delete.children)
                        .strikethrough()
                        .dimmed()
                        .to_string(),
                );
            }
            Node::Link(link) => {
                out.push_str(&format!(
                    "{} {}",
                    inline_text(&link.children).cyan().underline(),
                    format!("({})", link.url).dimmed()
                ));
            }
            Node::Image(image) => {
                out.push_str(&format!("[image: {}]", image.alt).dimmed().to_string());
            }
            Node::Break(_) => out.push('\n'),
            Node::Html(html) => out.push_str(&strip_tags(&html.value)),
            other => {
                if let Some(children) = other.children() {
                    out.push_str(&inline_text(children));
                }
            }
        }
    }
    out
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
