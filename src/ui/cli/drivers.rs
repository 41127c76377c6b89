use anyhow::Result;
use inquire::{CustomType, Select};

/// The prompts the console needs. Kept behind a trait so the menu loop can be
/// driven by a script in tests.
pub trait PromptDriver {
    /// Returns the index of the picked option.
    fn select(&self, title: &str, help: &str, options: &[String]) -> Result<usize>;

    fn ask_f64(&self, title: &str, help: &str, default: Option<f64>) -> Result<f64>;

    fn ask_i64(&self, title: &str, help: &str) -> Result<i64>;
}

pub struct InquireDriver;

impl PromptDriver for InquireDriver {
    fn select(&self, title: &str, help: &str, options: &[String]) -> Result<usize> {
        let mut select = Select::new(title, options.to_vec());
        if !help.is_empty() {
            select = select.with_help_message(help);
        }
        Ok(select.raw_prompt()?.index)
    }

    fn ask_f64(&self, title: &str, help: &str, default: Option<f64>) -> Result<f64> {
        let mut prompt = CustomType::<f64>::new(title)
            .with_help_message(help)
            .with_error_message("Please type a number");
        if let Some(d) = default {
            prompt = prompt.with_default(d);
        }
        Ok(prompt.prompt()?)
    }

    fn ask_i64(&self, title: &str, help: &str) -> Result<i64> {
        Ok(CustomType::<i64>::new(title)
            .with_help_message(help)
            .with_error_message("Please type a whole number")
            .prompt()?)
    }
}
