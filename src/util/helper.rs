// src/util/helper.rs
use std::io::{self, BufRead, IsTerminal, Write};

/// Interactive y/N confirmation; the prompt goes to stderr so stdout stays clean for scripts.
/// Anything but "y"/"yes" declines.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    confirm_with(prompt, &mut io::stdin().lock(), &mut io::stderr())
}

fn confirm_with<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{} (y/N): ", prompt)?;
    output.flush()?;

    let mut user_input = String::new();
    input.read_line(&mut user_input)?;

    Ok(is_affirmative(&user_input))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn is_stdout_piped() -> bool {
    !io::stdout().is_terminal()
}

pub fn is_stderr_piped() -> bool {
    !io::stderr().is_terminal()
}

/// Shorten `text` to at most `max_chars` characters, marking the cut with "..."
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    format!("{}...", text.chars().take(keep).collect::<String>())
}
