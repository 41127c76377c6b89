use std::io::Write;

use anyhow::{Result, anyhow};
use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{EnumIter, EnumMessage, IntoStaticStr};
use tracing::error;

use crate::classifiers::FeatureProjection;
use crate::core::sample::Features;
use crate::service::{MaterialClassifierApi, ServiceError};
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::cli::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumMessage, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum MenuAction {
    #[strum(message = "Add sample", detailed_message = "record a labeled measurement")]
    AddSample,
    #[strum(message = "Classify", detailed_message = "predict the material of a measurement")]
    Classify,
    #[strum(message = "Show data table")]
    ShowSamples,
    #[strum(message = "Show statistics")]
    ShowStatistics,
    #[strum(message = "Exit")]
    Exit,
}

const FIELD_PROMPTS: [(&str, &str); 4] = [
    ("Length", "cm"),
    ("Width", "cm"),
    ("Weight", "g"),
    ("Conductivity", "measured value"),
];

fn menu_labels(actions: &[MenuAction]) -> Vec<String> {
    actions
        .iter()
        .enumerate()
        .map(|(i, &a)| {
            let label = a.get_message().unwrap_or_else(|| a.into());
            match a.get_detailed_message() {
                Some(desc) => format!("{}. {label}  ({desc})", i + 1),
                None => format!("{}. {label}", i + 1),
            }
        })
        .collect()
}

/// Runs the menu until the operator picks Exit. Service errors are printed and
/// the loop carries on; prompt failures end it.
pub fn run_console<D, A, W>(
    driver: &D,
    api: &mut A,
    projection: FeatureProjection,
    out: &mut W,
) -> Result<()>
where
    D: PromptDriver,
    A: MaterialClassifierApi,
    W: Write,
{
    let actions: Vec<MenuAction> = MenuAction::iter().collect();
    let labels = menu_labels(&actions);

    loop {
        let idx = driver.select("Choose an action", "", &labels)?;
        let action = actions
            .get(idx)
            .copied()
            .ok_or_else(|| anyhow!("menu index {idx} out of range"))?;

        match action {
            MenuAction::AddSample => add_sample(driver, api, out)?,
            MenuAction::Classify => classify(driver, api, projection, out)?,
            MenuAction::ShowSamples => write!(out, "{}", render::sample_table(&api.get_samples()))?,
            MenuAction::ShowStatistics => {
                write!(out, "{}", render::statistics(&api.get_statistics()))?
            }
            MenuAction::Exit => {
                writeln!(out, "Goodbye.")?;
                return Ok(());
            }
        }
    }
}

fn add_sample<D, A, W>(driver: &D, api: &mut A, out: &mut W) -> Result<()>
where
    D: PromptDriver,
    A: MaterialClassifierApi,
    W: Write,
{
    let f = ask_features(driver, FeatureProjection::Full)?;
    let class_id = driver.ask_i64("Class id", &render::class_table())?;

    match api.submit_sample(f.length, f.width, f.weight, f.conductivity, class_id) {
        Ok(outcome) => {
            writeln!(out, "✓ Sample added, model retrained.")?;
            write!(out, "{}", render::statistics(&outcome.updated_counts))?;
        }
        Err(e) => report(out, &e)?,
    }
    Ok(())
}

fn classify<D, A, W>(driver: &D, api: &A, projection: FeatureProjection, out: &mut W) -> Result<()>
where
    D: PromptDriver,
    A: MaterialClassifierApi,
    W: Write,
{
    let f = ask_features(driver, projection)?;
    match api.classify(f.length, f.width, f.weight, f.conductivity) {
        Ok(label) => writeln!(out, "Result: {}", label.display_name())?,
        Err(e) => report(out, &e)?,
    }
    Ok(())
}

/// Prompts only for the fields the projection reads; the rest stay 0.
fn ask_features<D: PromptDriver>(driver: &D, projection: FeatureProjection) -> Result<Features> {
    let used = projection.attribute_names();
    let mut values = [0.0; 4];
    for ((slot, name), (title, unit)) in values
        .iter_mut()
        .zip(Features::NAMES)
        .zip(FIELD_PROMPTS)
    {
        if used.contains(&name) {
            *slot = driver.ask_f64(title, unit, None)?;
        }
    }
    let [length, width, weight, conductivity] = values;
    Ok(Features::new(length, width, weight, conductivity))
}

fn report<W: Write>(out: &mut W, e: &ServiceError) -> Result<()> {
    if !e.is_recoverable() {
        error!(error = %e, "sample was not stored");
    }
    writeln!(out, "✗ {e}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::material_class::MaterialClass;
    use crate::service::ClassificationService;
    use crate::testing::fixtures::TempWorkspace;
    use crate::testing::spies::{ApiCall, ApiSpy};
    use crate::testing::stubs::{Answer, ScriptedDriver};

    fn run_scripted<A: MaterialClassifierApi>(
        api: &mut A,
        projection: FeatureProjection,
        answers: Vec<Answer>,
    ) -> (Result<()>, String, ScriptedDriver) {
        let driver = ScriptedDriver::new(answers);
        let mut out = Vec::new();
        let res = run_console(&driver, api, projection, &mut out);
        (res, String::from_utf8(out).unwrap(), driver)
    }

    #[test]
    fn menu_lists_five_numbered_actions() {
        let labels = menu_labels(&MenuAction::iter().collect::<Vec<_>>());
        assert_eq!(labels.len(), 5);
        assert!(labels[0].starts_with("1. Add sample"));
        assert_eq!(labels[4], "5. Exit");
    }

    #[test]
    fn add_classify_and_exit() {
        let ws = TempWorkspace::new();
        let mut svc = ClassificationService::open(ws.config()).unwrap();

        let (res, out, driver) = run_scripted(
            &mut svc,
            FeatureProjection::Full,
            vec![
                Answer::Pick(0),
                Answer::Number(12.0),
                Answer::Number(6.0),
                Answer::Number(80.0),
                Answer::Number(0.7),
                Answer::Integer(3),
                Answer::Pick(1),
                Answer::Number(12.0),
                Answer::Number(6.0),
                Answer::Number(80.0),
                Answer::Number(0.7),
                Answer::Pick(4),
            ],
        );

        res.unwrap();
        assert!(driver.is_exhausted());
        assert!(out.contains("✓ Sample added"));
        assert!(out.contains("Result: Metal"));
        assert!(out.ends_with("Goodbye.\n"));
        assert_eq!(svc.list_samples().len(), 6);
        assert_eq!(svc.list_statistics()[&MaterialClass::Metal], 1);
    }

    #[test]
    fn invalid_class_is_reported_and_loop_continues() {
        let mut spy = ApiSpy::default();
        let (res, out, _) = run_scripted(
            &mut spy,
            FeatureProjection::Full,
            vec![
                Answer::Pick(0),
                Answer::Number(1.0),
                Answer::Number(1.0),
                Answer::Number(1.0),
                Answer::Number(0.1),
                Answer::Integer(9),
                Answer::Pick(3),
                Answer::Pick(4),
            ],
        );

        res.unwrap();
        assert!(out.contains("✗ class id 9"));
        assert!(out.contains("Glass"));
        assert_eq!(
            spy.calls(),
            &[
                ApiCall::Submit {
                    features: Features::new(1.0, 1.0, 1.0, 0.1),
                    class_id: 9
                },
                ApiCall::Statistics,
            ]
        );
    }

    #[test]
    fn conductivity_only_asks_a_single_field() {
        let mut spy = ApiSpy::default();
        let (res, _, driver) = run_scripted(
            &mut spy,
            FeatureProjection::ConductivityOnly,
            vec![Answer::Pick(1), Answer::Number(0.05), Answer::Pick(4)],
        );

        res.unwrap();
        assert_eq!(driver.prompts(), vec!["Choose an action", "Conductivity", "Choose an action"]);
        assert_eq!(
            spy.calls(),
            &[ApiCall::Classify {
                features: Features::new(0.0, 0.0, 0.0, 0.05)
            }]
        );
    }

    #[test]
    fn show_table_prints_every_row() {
        let ws = TempWorkspace::new();
        let mut svc = ClassificationService::open(ws.config()).unwrap();
        let (res, out, _) = run_scripted(
            &mut svc,
            FeatureProjection::Full,
            vec![Answer::Pick(2), Answer::Pick(4)],
        );
        res.unwrap();
        assert!(out.contains("5 sample(s)"));
        assert!(out.contains("Organic (4)"));
    }

    #[test]
    fn exhausted_script_ends_the_loop_with_an_error() {
        let mut spy = ApiSpy::default();
        let (res, _, _) = run_scripted(&mut spy, FeatureProjection::Full, vec![Answer::Pick(2)]);
        assert!(res.is_err());
    }
}
