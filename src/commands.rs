use crate::error::PlaygroundError;
use crate::vibe::Vibe;

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Prompt(String),
    Vibe(Vibe),
    Submit,
    /// 1-based position in the visible history.
    Pick(usize),
    Copy,
    Show,
    Vibes,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  prompt <text>   replace the prompt (may be empty)
  vibe <name>     pick a vibe
  submit          generate a preview
  pick <n>        show history entry n
  copy            copy the prompt
  show            print the session
  vibes           list vibes
  help            this text
  quit            exit";

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Playground(#[from] PlaygroundError),
}

impl Command {
    /// Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match trimmed.split_once(' ') {
            Some((w, r)) => (w, r),
            None => (trimmed, ""),
        };
        let cmd = match word.to_ascii_lowercase().as_str() {
            // Prompt text is kept as typed after the first space.
            "prompt" => Command::Prompt(rest.to_string()),
            "vibe" => {
                if rest.trim().is_empty() {
                    return Err(ParseError::Usage("vibe <name>"));
                }
                Command::Vibe(rest.parse()?)
            }
            "submit" | "generate" => Command::Submit,
            "pick" => {
                let n: usize = rest.trim().parse().map_err(|_| ParseError::Usage("pick <n>"))?;
                if n == 0 {
                    return Err(ParseError::Usage("pick <n> (n starts at 1)"));
                }
                Command::Pick(n)
            }
            "copy" => Command::Copy,
            "show" => Command::Show,
            "vibes" => Command::Vibes,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(cmd))
    }
}
