//! Line-oriented prompting over any reader/writer pair

use crate::error::Result;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Where prompts, hints and menus are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptSink {
    Output,
    Stderr,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
    prompts: PromptSink,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            prompts: PromptSink::Output,
        }
    }

    /// Keep the output stream for results only; prompts go to stderr
    pub fn prompts_to_stderr(mut self) -> Self {
        self.prompts = PromptSink::Stderr;
        self
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Write one line of prompt-side text (menus, hints)
    pub fn say(&mut self, line: &str) -> Result<()> {
        self.write_prompt(line)?;
        self.write_prompt("\n")
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    ///
    /// Bytes that are not UTF-8 are replaced rather than rejected, so they
    /// reach the caller's parser as an ordinary bad answer.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.write_prompt(prompt)?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Ask until `parse` accepts the answer, printing `hint` after each miss
    pub fn ask_parsed<T, F>(&mut self, prompt: &str, hint: &str, parse: F) -> Result<Option<T>>
    where
        F: Fn(&str) -> Result<T>,
    {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    debug!(error = %e, "re-prompting");
                    self.say(hint)?;
                }
            }
        }
    }

    fn write_prompt(&mut self, text: &str) -> Result<()> {
        match self.prompts {
            PromptSink::Output => {
                self.output.write_all(text.as_bytes())?;
                self.output.flush()?;
            }
            PromptSink::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(text.as_bytes())?;
                err.flush()?;
            }
        }
        Ok(())
    }
}
