use anyhow::{Context, Result};
use dialoguer::console::Term;
use dialoguer::Input;
use std::io::{BufRead, Write};

/// Source of yes/no answers for destructive or mutating actions.
pub trait Prompter {
    /// Ask `question`; true only if the user answers "yes".
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Only a literal "yes" (any case, surrounding whitespace ignored) agrees.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Reads answers from the terminal, or line by line from piped stdin.
pub struct ConsolePrompter;

impl ConsolePrompter {
    /// Print the question and read one line. End of input counts as "no".
    fn read_line_answer<R: BufRead, W: Write>(
        input: &mut R,
        output: &mut W,
        question: &str,
    ) -> Result<bool> {
        write!(output, "{} (yes/no): ", question)?;
        output.flush()?;

        let mut answer = String::new();
        input
            .read_line(&mut answer)
            .context("Failed to read answer from stdin")?;

        Ok(is_affirmative(&answer))
    }
}

impl Prompter for ConsolePrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        if !Term::stderr().is_term() {
            let stdin = std::io::stdin();
            return Self::read_line_answer(&mut stdin.lock(), &mut std::io::stdout(), question);
        }

        let answer: String = Input::new()
            .with_prompt(format!("{} (yes/no)", question))
            .allow_empty(true)
            .interact_text()
            .context("Failed to read answer from terminal")?;

        Ok(is_affirmative(&answer))
    }
}
