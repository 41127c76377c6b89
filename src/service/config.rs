use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

use crate::classifiers::FeatureProjection;
use crate::classifiers::decision_tree::TreeOptions;

fn default_data_file() -> PathBuf {
    PathBuf::from("materials_data.txt")
}

fn default_stats_file() -> PathBuf {
    PathBuf::from("material_stats.txt")
}

/// Where per-class statistics come from when the service opens.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StatsMode {
    #[default]
    #[strum(
        message = "Ledger",
        detailed_message = "Independently persisted counts; bootstrap rows are not counted."
    )]
    Ledger,
    #[strum(
        message = "Derived",
        detailed_message = "Counts rebuilt from the stored samples on open."
    )]
    Derived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(title = "matsort configuration")]
pub struct ServiceConfig {
    #[serde(default = "default_data_file")]
    #[schemars(
        title = "Data File",
        description = "Sample rows, one `length,width,weight,conductivity,classId` per line"
    )]
    pub data_file: PathBuf,

    #[serde(default = "default_stats_file")]
    #[schemars(
        title = "Stats File",
        description = "Per-class counts, one `classId:count` per line"
    )]
    pub stats_file: PathBuf,

    #[serde(default)]
    #[schemars(title = "Projection", description = "full / conductivity-only")]
    pub projection: FeatureProjection,

    #[serde(default)]
    #[schemars(title = "Stats Mode", description = "ledger / derived")]
    pub stats_mode: StatsMode,

    #[serde(default)]
    #[schemars(title = "Tree", description = "Decision tree growth limits")]
    pub tree: TreeOptions,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            stats_file: default_stats_file(),
            projection: FeatureProjection::default(),
            stats_mode: StatsMode::default(),
            tree: TreeOptions::default(),
        }
    }
}

impl ServiceConfig {
    /// Builds a config from an optional JSON file, then applies dotted-key
    /// overrides on top.
    pub fn load(file: Option<&Path>, overrides: &[KeyValue]) -> Result<Self> {
        let mut value = match file {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("config {} is not valid JSON", path.display()))?
            }
            None => Value::Object(Map::new()),
        };
        apply_overrides(&mut value, overrides)?;
        serde_json::from_value(value).context("invalid configuration")
    }

    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(ServiceConfig);
        serde_json::to_string_pretty(&schema).context("failed to render config schema")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyValue {
    key: String,
    value: Value,
}

impl KeyValue {
    pub fn key(&self) -> &str {
        &self.key
    }
}

pub fn apply_overrides(target: &mut Value, overrides: &[KeyValue]) -> Result<()> {
    for kv in overrides {
        set_path(target, &kv.key, kv.value.clone())
            .with_context(|| format!("failed to set '{}'", kv.key))?;
    }
    Ok(())
}

fn set_path(target: &mut Value, path: &str, new_value: Value) -> Result<()> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        bail!("empty key is not allowed");
    };

    let mut current = target;
    for seg in parents {
        current = ensure_object(current)?
            .entry((*seg).to_string())
            .or_insert(Value::Null);
    }
    ensure_object(current)?.insert((*last).to_string(), new_value);
    Ok(())
}

fn ensure_object(value: &mut Value) -> Result<&mut Map<String, Value>> {
    if value.is_null() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("cannot set nested field on non-object value: {other:?}"),
    }
}

/// `clap` value parser for `KEY=VALUE`. Values are read as JSON literals,
/// falling back to a plain string.
pub fn parse_key_value(raw: &str) -> Result<KeyValue, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| "expected KEY=VALUE".to_string())?;
    let key = key.trim();
    if key.is_empty() {
        return Err("key cannot be empty".to_string());
    }

    Ok(KeyValue {
        key: key.to_string(),
        value: parse_literal(value.trim()),
    })
}

fn parse_literal(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
