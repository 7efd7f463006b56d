//! Launch option tokenizing and parsing.
//!
//! The hosting platform hands the application a single option string; this
//! module splits it into tokens and interprets the forms the runtime
//! understands: `-Dname=value` cvar assignments and bare word commands.

use tracing::warn;

/// Splits an option line on whitespace runs, treating double-quoted runs as
/// single tokens. Quote characters remain part of their token.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Parsed launch options.
///
/// Malformed assignments and unknown flags are logged and skipped; parsing
/// itself never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLineOptions {
    cvar_assignments: Vec<(String, String)>,
    commands: Vec<String>,
}

impl CommandLineOptions {
    /// Parses a raw option line as passed by the launcher.
    pub fn from_line(line: &str) -> Self {
        Self::from_tokens(tokenize(line))
    }

    /// Parses an already-tokenized argument sequence, e.g. `std::env::args`
    /// minus the program name.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = Self::default();
        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                continue;
            }
            if let Some(flag) = token.strip_prefix('-') {
                opts.parse_flag(flag);
            } else if token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
                opts.commands.push(token.to_string());
            } else {
                warn!("unexpected launch option token `{token}`");
            }
        }
        opts
    }

    fn parse_flag(&mut self, flag: &str) {
        match flag.chars().next() {
            Some('D') => self.parse_cvar_assignment(&flag[1..]),
            Some(other) => warn!("unknown launch flag `-{other}`"),
            None => warn!("empty launch flag"),
        }
    }

    fn parse_cvar_assignment(&mut self, statement: &str) {
        match statement.split_once('=') {
            Some((name, value)) if !name.is_empty() && !value.is_empty() => {
                self.cvar_assignments
                    .push((name.to_string(), value.to_string()));
            }
            _ => warn!("cvar assignment must be in the form `name=value`, got `{statement}`"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cvar_assignments.is_empty() && self.commands.is_empty()
    }

    /// `-Dname=value` assignments, in launch order.
    pub fn cvar_assignments(&self) -> &[(String, String)] {
        &self.cvar_assignments
    }

    /// Bare word commands, in launch order.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_whitespace_is_not_a_separator() {
        let tokens = tokenize("--foo \"bar baz\" --qux");
        assert_eq!(tokens, vec!["--foo", "\"bar baz\"", "--qux"]);
    }

    #[test]
    fn blank_line_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(tokenize("a   b\tc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn cvar_assignments_are_split_on_first_equals() {
        let opts = CommandLineOptions::from_line("-Dwindow_mode=fullscreen -Daudio_rate=48000");
        assert_eq!(
            opts.cvar_assignments(),
            &[
                ("window_mode".to_string(), "fullscreen".to_string()),
                ("audio_rate".to_string(), "48000".to_string()),
            ]
        );
        assert!(opts.commands().is_empty());
    }

    #[test]
    fn bare_words_become_commands() {
        let opts = CommandLineOptions::from_line("-Dlog_level=debug benchmark");
        assert_eq!(opts.commands(), &["benchmark".to_string()]);
    }

    #[test]
    fn malformed_assignment_is_skipped() {
        let opts = CommandLineOptions::from_line("-Dnovalue -D=orphan -Dok=1");
        assert_eq!(
            opts.cvar_assignments(),
            &[("ok".to_string(), "1".to_string())]
        );
    }

    #[test]
    fn empty_line_parses_to_empty_options() {
        assert!(CommandLineOptions::from_line("").is_empty());
    }
}
