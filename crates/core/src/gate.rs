//! Confirmation before mutating actions.
//!
//! A [`Gate`] decides whether an action runs. [`WhatIf`] simulates and reports
//! what would happen, [`Prompt`] asks a yes/no question, and [`Proceed`]
//! always allows the action.

use std::io::{self, BufRead, StdinLock, Stdout, Write, stdin, stdout};

pub trait Gate {
    /// Returns `true` when `action` may be performed on `target`.
    fn should_process(&mut self, target: &str, action: &str) -> io::Result<bool>;

    /// Whether this gate only simulates and never allows mutation.
    fn is_simulation(&self) -> bool {
        false
    }
}

/// Allows every action.
#[derive(Debug, Clone, Copy, Default)]
pub struct Proceed;

impl Gate for Proceed {
    fn should_process(&mut self, _target: &str, _action: &str) -> io::Result<bool> {
        Ok(true)
    }
}

/// Reports each action and allows none.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatIf;

impl Gate for WhatIf {
    fn should_process(&mut self, target: &str, action: &str) -> io::Result<bool> {
        println!("What if: Performing the operation \"{action}\" on target \"{target}\".");
        Ok(false)
    }

    fn is_simulation(&self) -> bool {
        true
    }
}

/// Asks a yes/no question for each action.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<StdinLock<'static>, Stdout> {
    pub fn stdin() -> Self {
        Self::new(stdin().lock(), stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Gate for Prompt<R, W> {
    fn should_process(&mut self, target: &str, action: &str) -> io::Result<bool> {
        write!(self.output, "{action} on \"{target}\"? [Y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        // End of input counts as "no".
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(false);
        }
        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }
}
