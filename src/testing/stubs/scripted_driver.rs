use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::{Result, anyhow, bail};

use crate::ui::cli::drivers::PromptDriver;

#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Pick(usize),
    Number(f64),
    Integer(i64),
}

/// Replays canned answers in order. Running out, or an answer of the wrong
/// kind, is an error.
#[derive(Default)]
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<Answer>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedDriver {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.borrow().is_empty()
    }

    /// Titles of every prompt shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    fn next(&self, title: &str) -> Result<Answer> {
        self.prompts.borrow_mut().push(title.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("script exhausted at prompt '{title}'"))
    }
}

impl PromptDriver for ScriptedDriver {
    fn select(&self, title: &str, _help: &str, options: &[String]) -> Result<usize> {
        match self.next(title)? {
            Answer::Pick(i) if i < options.len() => Ok(i),
            Answer::Pick(i) => bail!("'{title}' has no option {i}"),
            other => bail!("'{title}' expected a pick, got {other:?}"),
        }
    }

    fn ask_f64(&self, title: &str, _help: &str, _default: Option<f64>) -> Result<f64> {
        match self.next(title)? {
            Answer::Number(x) => Ok(x),
            Answer::Integer(n) => Ok(n as f64),
            other => bail!("'{title}' expected a number, got {other:?}"),
        }
    }

    fn ask_i64(&self, title: &str, _help: &str) -> Result<i64> {
        match self.next(title)? {
            Answer::Integer(n) => Ok(n),
            other => bail!("'{title}' expected an integer, got {other:?}"),
        }
    }
}
