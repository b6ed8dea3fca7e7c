use domain::models::AiResponse;
use serde::Deserialize;
use serde_json::Value;
use shared::error::{Error, Result};

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: ChoiceMessage,
}

#[derive(Deserialize, Default)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Pulls the model output text out of the provider envelope
/// (`choices[0].message.content`, empty string when absent).
pub fn extract_content(body: &str) -> Result<String> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|err| Error::MalformedJson(err.to_string()))?;
    Ok(envelope
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .unwrap_or_default())
}

/// Extracts and validates the `{reasoning, command}` pair from free-form
/// model output, sanitizing the command on the way out.
pub fn parse_ai_response(content: &str) -> Result<AiResponse> {
    let block = find_json_block(content).ok_or(Error::NoJsonFound)?;
    let value: Value =
        serde_json::from_str(block).map_err(|err| Error::MalformedJson(err.to_string()))?;

    let reasoning = required_field(&value, "reasoning")?;
    let command_raw = required_field(&value, "command")?;
    let command = sanitize_command(&command_raw)?;

    Ok(AiResponse {
        reasoning: reasoning.trim().to_string(),
        command,
    })
}

fn required_field(value: &Value, name: &'static str) -> Result<String> {
    match value.get(name).and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(Error::MissingField(name)),
    }
}

/// First balanced `{...}` substring in free text. A bounded, string-aware
/// brace scan, not a parser; takes the first greedy match even when later
/// blocks exist.
fn find_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &byte) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Deterministic textual cleanup turning raw model output into one
/// executable command line. Fails rather than guessing when the result is
/// empty or carries runaway redirections.
pub fn sanitize_command(raw: &str) -> Result<String> {
    let unfenced = strip_code_fences(raw);

    // Fold to a single line with single spaces.
    let mut command = unfenced
        .replace(['\r', '\n'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    // Leading shell-prompt characters the model sometimes echoes back.
    while let Some(rest) = command
        .strip_prefix('>')
        .or_else(|| command.strip_prefix('$'))
    {
        command = rest.trim_start().to_string();
    }

    if command.len() >= 6
        && command.is_char_boundary(6)
        && command[..6].eq_ignore_ascii_case("cmd /c")
    {
        command = command[6..].trim_start().to_string();
    }

    let command = collapse_repetition(&command);

    if command.is_empty() {
        return Err(Error::EmptyCommand);
    }
    if single_redirection_count(&command) > 1 {
        return Err(Error::InvalidRedirection);
    }
    Ok(command)
}

fn strip_code_fences(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the language tag on the opening fence line, if any.
        text = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest,
        };
    }
    text = text.trim();
    text = text.strip_suffix("```").unwrap_or(text);

    text.trim_matches('`').trim().to_string()
}

/// Bounded lexical collapse for a model that repeated itself, e.g.
/// `color 2color 2` or `dir /B dir /B`. Only exact whole-line doubling is
/// collapsed so legitimate repeated arguments survive.
fn collapse_repetition(command: &str) -> String {
    let mut current = command.trim().to_string();

    for _ in 0..4 {
        let n = current.len();

        // "abcabc" -> "abc"
        if n >= 2
            && n % 2 == 0
            && current.is_char_boundary(n / 2)
            && current[..n / 2] == current[n / 2..]
        {
            current.truncate(n / 2);
            current = current.trim().to_string();
            continue;
        }

        // "abc abc" -> "abc" (doubling around a separating space)
        if n >= 3
            && n % 2 == 1
            && current.is_char_boundary(n / 2)
            && current.is_char_boundary(n / 2 + 1)
            && current.as_bytes()[n / 2] == b' '
            && current[..n / 2] == current[n / 2 + 1..]
        {
            current.truncate(n / 2);
            continue;
        }

        break;
    }
    current
}

/// Counts unescaped single-`>` redirections. `>>` is one append operator
/// and does not count; `^>` and `\>` are treated as escaped.
fn single_redirection_count(command: &str) -> usize {
    let bytes = command.as_bytes();
    let mut count = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'>' {
            if i + 1 < bytes.len() && bytes[i + 1] == b'>' {
                i += 2;
                continue;
            }
            let escaped = i > 0 && (bytes[i - 1] == b'^' || bytes[i - 1] == b'\\');
            if !escaped {
                count += 1;
            }
        }
        i += 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope_with(content: &str) -> String {
        serde_json::json!({
            "choices": [{ "message": { "content": content } }]
        })
        .to_string()
    }

    #[test]
    fn test_extract_content_follows_the_envelope_path() {
        let body = envelope_with("hello there");
        assert_eq!(extract_content(&body).unwrap(), "hello there");
    }

    #[test]
    fn test_extract_content_defaults_to_empty_when_absent() {
        assert_eq!(extract_content("{}").unwrap(), "");
        assert_eq!(extract_content(r#"{"choices":[{}]}"#).unwrap(), "");
    }

    #[test]
    fn test_extract_content_rejects_non_json_bodies() {
        let err = extract_content("<html>502</html>").unwrap_err();
        assert_eq!(err.code(), "MALFORMED_JSON");
    }

    #[test]
    fn test_parse_accepts_json_wrapped_in_prose() {
        let content = "Sure! Here is the plan:\n\
            {\"reasoning\": \"List the directory.\", \"command\": \"ls -la\"}\n\
            Let me know if you need more.";
        let parsed = parse_ai_response(content).unwrap();
        assert_eq!(parsed.reasoning, "List the directory.");
        assert_eq!(parsed.command, "ls -la");
    }

    #[test]
    fn test_parse_is_not_confused_by_braces_in_strings() {
        let content = r#"{"reasoning": "use {braces} carefully", "command": "echo ok"}"#;
        let parsed = parse_ai_response(content).unwrap();
        assert_eq!(parsed.command, "echo ok");
    }

    #[test]
    fn test_parse_without_json_fails() {
        let err = parse_ai_response("no structured output here").unwrap_err();
        assert_eq!(err.code(), "NO_JSON_FOUND");
    }

    #[test]
    fn test_parse_unbalanced_braces_fail() {
        let err = parse_ai_response("{\"command\": \"ls\"").unwrap_err();
        assert_eq!(err.code(), "NO_JSON_FOUND");
    }

    #[test]
    fn test_parse_invalid_json_block_fails() {
        let err = parse_ai_response("{not json}").unwrap_err();
        assert_eq!(err.code(), "MALFORMED_JSON");
    }

    #[test]
    fn test_missing_fields_fail_by_name() {
        let err = parse_ai_response(r#"{"reasoning": "plan"}"#).unwrap_err();
        assert!(matches!(err, Error::MissingField("command")));

        let err = parse_ai_response(r#"{"command": "ls"}"#).unwrap_err();
        assert!(matches!(err, Error::MissingField("reasoning")));

        let err = parse_ai_response(r#"{"reasoning": "plan", "command": "  "}"#).unwrap_err();
        assert!(matches!(err, Error::MissingField("command")));
    }

    #[test]
    fn test_sanitize_strips_code_fences() {
        assert_eq!(sanitize_command("```cmd\ndir /B\n```").unwrap(), "dir /B");
        assert_eq!(sanitize_command("```\nls -la\n```").unwrap(), "ls -la");
        assert_eq!(sanitize_command("`ls`").unwrap(), "ls");
    }

    #[test]
    fn test_sanitize_folds_newlines_and_whitespace() {
        assert_eq!(sanitize_command("ls\n  -la").unwrap(), "ls -la");
        assert_eq!(sanitize_command("ls    -la").unwrap(), "ls -la");
    }

    #[test]
    fn test_sanitize_strips_prompt_characters_and_cmd_prefix() {
        assert_eq!(sanitize_command("$ ls -la").unwrap(), "ls -la");
        assert_eq!(sanitize_command("> dir").unwrap(), "dir");
        assert_eq!(sanitize_command("CMD /C dir").unwrap(), "dir");
        assert_eq!(sanitize_command("cmd /c echo hi").unwrap(), "echo hi");
    }

    #[test]
    fn test_sanitize_collapses_model_self_repetition() {
        assert_eq!(sanitize_command("color 2color 2").unwrap(), "color 2");
        assert_eq!(sanitize_command("dir /B dir /B").unwrap(), "dir /B");
    }

    #[test]
    fn test_sanitize_keeps_legitimate_repeated_arguments() {
        assert_eq!(sanitize_command("echo test test2").unwrap(), "echo test test2");
        assert_eq!(sanitize_command("cp a.txt a.txt.bak").unwrap(), "cp a.txt a.txt.bak");
    }

    #[test]
    fn test_sanitize_rejects_empty_commands() {
        assert_eq!(sanitize_command("``` ```").unwrap_err().code(), "EMPTY_COMMAND");
        assert_eq!(sanitize_command("   ").unwrap_err().code(), "EMPTY_COMMAND");
    }

    #[test]
    fn test_sanitize_rejects_multiple_redirections() {
        let err = sanitize_command("echo a > b > c").unwrap_err();
        assert_eq!(err.code(), "INVALID_REDIRECTION");
    }

    #[test]
    fn test_sanitize_allows_one_redirection_and_appends() {
        assert_eq!(sanitize_command("echo a > b").unwrap(), "echo a > b");
        assert_eq!(sanitize_command("echo a >> b").unwrap(), "echo a >> b");
        assert_eq!(sanitize_command("echo a >> b >> c").unwrap(), "echo a >> b >> c");
    }

    #[test]
    fn test_escaped_redirections_do_not_count() {
        assert_eq!(
            sanitize_command("echo 1^>2 > out.txt").unwrap(),
            "echo 1^>2 > out.txt"
        );
    }
}
