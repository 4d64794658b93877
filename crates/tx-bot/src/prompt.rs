use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{anyhow, Result};
use inquire::InquireError;
use thiserror::Error;

/// The operator gave up answering (Ctrl-C or Esc at a prompt, or the end of piped input).
#[derive(Copy, Clone, Debug, Error)]
#[error("Prompt was interrupted")]
pub struct Interrupted;

/// Source of line-based answers from the operator.
pub trait Prompter {
    /// Asks `question` and returns the trimmed answer. Fails with [`Interrupted`] when the
    /// operator aborts the prompt.
    fn ask(&mut self, question: &str) -> Result<String>;
}

impl<P: Prompter + ?Sized> Prompter for Box<P> {
    fn ask(&mut self, question: &str) -> Result<String> {
        (**self).ask(question)
    }
}

/// Prompter for the process' stdin: interactive when it is a terminal, plain line reading
/// otherwise (e.g. `echo 2 | tx-bot`).
pub fn stdin_prompter() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() {
        Box::new(InquirePrompter)
    } else {
        Box::new(LinePrompter::new(io::stdin().lock(), io::stdout()))
    }
}

/// Reads answers from the terminal.
#[derive(Copy, Clone, Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        match inquire::Text::new(question).prompt() {
            Ok(answer) => Ok(answer.trim().to_string()),
            Err(InquireError::OperationInterrupted | InquireError::OperationCanceled) => {
                Err(Interrupted.into())
            }
            Err(e) => Err(anyhow!(e)),
        }
    }
}

/// Writes each question to `output` and reads one line of `input` as the answer. Running out of
/// input counts as an interruption.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question} ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(Interrupted.into());
        }
        Ok(answer.trim().to_string())
    }
}
