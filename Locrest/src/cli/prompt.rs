//! Interactive y/N confirmation

use console::{Term, style};

/// Ask a yes/no question on stderr; anything but `y`/`yes` declines
///
/// Returns `false` without asking when stderr is not a terminal.
pub fn confirm(question: &str) -> std::io::Result<bool> {
    let term = Term::stderr();
    if !term.is_term() {
        tracing::warn!("Not a terminal, declining: {question}");
        return Ok(false);
    }

    term.write_str(&format!("{} [y/N] ", style(question).yellow()))?;
    let answer = term.read_line()?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES\n"));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }
}
