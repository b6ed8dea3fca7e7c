/// Administrative or destructive command tokens, matched case-insensitively
/// as substrings. Network/service/registry/partition/permission-altering
/// tools plus forced deletes. Kept as data, not code, so the table can be
/// substituted in tests.
const ADMIN_TOKENS: &[&str] = &[
    "netsh", "net", "sc", "reg", "bcdedit", "diskpart", "dism", "sfc", "format", "chkdsk",
    "taskkill", "rd /s", "rmdir /s", "del /f", "takeown", "icacls", "attrib", "runas",
];

/// Bare delete / remove-directory invocations caught by prefix.
const DELETE_PREFIXES: &[&str] = &["del ", "rd ", "rmdir ", "rm "];

/// Lexical danger classification. Deterministic, no I/O. Biased toward
/// false positives; cannot see through pipes, variable expansion or other
/// obfuscation.
pub fn is_dangerous(command: &str) -> bool {
    classify(command, ADMIN_TOKENS, DELETE_PREFIXES)
}

fn classify(command: &str, tokens: &[&str], prefixes: &[&str]) -> bool {
    let lower = command.to_lowercase();
    if tokens.iter().any(|token| lower.contains(token)) {
        return true;
    }
    prefixes.iter().any(|prefix| lower.starts_with(prefix))
}
