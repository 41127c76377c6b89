use crate::core::material_class::MaterialClass;
use crate::core::sample::{Features, Sample, bootstrap_samples};
use crate::storage::atomic_file::{StagedFile, write_atomic};
use crate::storage::error::StorageError;
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

const FIELDS_PER_ROW: usize = 5;

/// Ordered, append-only collection of labeled samples backed by a text file.
///
/// One row per line, `length,width,weight,conductivity,classId`.
#[derive(Debug, Clone)]
pub struct SampleStore {
    path: PathBuf,
    samples: Vec<Sample>,
}

impl SampleStore {
    /// Reads every row from `path`. A missing file yields the bootstrap set.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let samples = match fs::read_to_string(&path) {
            Ok(text) => parse_rows(&path, &text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no sample file, using bootstrap samples");
                bootstrap_samples()
            }
            Err(e) => return Err(StorageError::unavailable(&path, e)),
        };
        info!(path = %path.display(), samples = samples.len(), "samples loaded");
        Ok(Self { path, samples })
    }

    pub fn append(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn persist(&self) -> Result<(), StorageError> {
        write_atomic(&self.path, self.serialize().as_bytes())?;
        info!(path = %self.path.display(), samples = self.samples.len(), "samples persisted");
        Ok(())
    }

    /// Writes the current rows to a temp file beside the target without
    /// replacing it.
    pub fn stage(&self) -> Result<StagedFile, StorageError> {
        StagedFile::stage(&self.path, self.serialize().as_bytes())
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.samples.len() * 24);
        for s in &self.samples {
            let f = &s.features;
            let _ = writeln!(
                out,
                "{},{},{},{},{}",
                f.length,
                f.width,
                f.weight,
                f.conductivity,
                s.label.id()
            );
        }
        out
    }
}

fn parse_rows(path: &Path, text: &str) -> Result<Vec<Sample>, StorageError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_row(line).map_err(|reason| StorageError::malformed(path, i + 1, reason)))
        .collect()
}

fn parse_row(line: &str) -> Result<Sample, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELDS_PER_ROW {
        return Err(format!(
            "expected {FIELDS_PER_ROW} fields, found {}",
            fields.len()
        ));
    }

    let mut values = [0.0; 4];
    for (slot, (raw, name)) in values.iter_mut().zip(fields.iter().zip(Features::NAMES)) {
        let v: f64 = raw
            .parse()
            .map_err(|_| format!("{name}: '{raw}' is not a number"))?;
        if !v.is_finite() {
            return Err(format!("{name}: '{raw}' is not finite"));
        }
        *slot = v;
    }

    let label = parse_class_id(fields[4])?;
    let [length, width, weight, conductivity] = values;
    Ok(Sample::new(
        Features::new(length, width, weight, conductivity),
        label,
    ))
}

/// Accepts `3` as well as `3.0`; older files stored the id as a float.
fn parse_class_id(raw: &str) -> Result<MaterialClass, String> {
    let id = match raw.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            let f: f64 = raw
                .parse()
                .map_err(|_| format!("class id '{raw}' is not a number"))?;
            if !f.is_finite() || f.fract() != 0.0 {
                return Err(format!("class id '{raw}' is not an integer"));
            }
            f as i64
        }
    };
    MaterialClass::try_from(id).map_err(|e| e.to_string())
}
