//! Interactive API URL prompt

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use console::style;

use crate::error::ScaffoldError;

/// Question shown to the operator
pub const API_URL_QUESTION: &str = "Please enter API url from development tab in editor:";

/// Ask for the API URL until a non-empty answer arrives
///
/// End of input (Ctrl-D, closed pipe) aborts with `PromptCancelled`.
pub fn prompt_api_url<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    loop {
        write!(output, "{} {} ", style("?").green().bold(), style(API_URL_QUESTION).bold())
            .context("Failed to write prompt")?;
        output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("Failed to read answer")?;
        if read == 0 {
            writeln!(output).ok();
            return Err(ScaffoldError::PromptCancelled {
                question: API_URL_QUESTION.to_string(),
            }
            .into());
        }

        let answer = line.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }

        writeln!(output, "{}", style("An API url is required.").yellow())
            .context("Failed to write prompt")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_trimmed_answer() {
        let mut input = Cursor::new("  https://api.cntrl.site/project/abc \n");
        let mut output = Vec::new();
        let url = prompt_api_url(&mut input, &mut output).unwrap();

        assert_eq!(url, "https://api.cntrl.site/project/abc");
        assert!(String::from_utf8(output).unwrap().contains(API_URL_QUESTION));
    }

    #[test]
    fn test_empty_answer_asks_again() {
        let mut input = Cursor::new("\n   \nhttps://x\n");
        let mut output = Vec::new();
        let url = prompt_api_url(&mut input, &mut output).unwrap();

        assert_eq!(url, "https://x");
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches(API_URL_QUESTION).count(), 3);
    }

    #[test]
    fn test_answer_without_newline() {
        let mut input = Cursor::new("https://x");
        let mut output = Vec::new();
        assert_eq!(prompt_api_url(&mut input, &mut output).unwrap(), "https://x");
    }

    #[test]
    fn test_eof_cancels() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let err = prompt_api_url(&mut input, &mut output).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::PromptCancelled { .. })
        ));
    }
}
