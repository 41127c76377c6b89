use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::core::material_class::MaterialClass;
use crate::core::sample::Sample;

/// The class table on a single line, e.g. `0 = Glass, 1 = Paper, ...`.
pub fn class_table() -> String {
    MaterialClass::ALL
        .iter()
        .map(|c| format!("{} = {}", c.id(), c.display_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn sample_table(samples: &[Sample]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:>10}  {:>10}  {:>10}  {:>12}  {}",
        "#", "length", "width", "weight", "conductivity", "class"
    );
    for (i, s) in samples.iter().enumerate() {
        let f = &s.features;
        let _ = writeln!(
            out,
            "{:>4}  {:>10}  {:>10}  {:>10}  {:>12}  {} ({})",
            i + 1,
            f.length,
            f.width,
            f.weight,
            f.conductivity,
            s.label.display_name(),
            s.label.id()
        );
    }
    let _ = writeln!(out, "{} sample(s)", samples.len());
    out
}

pub fn statistics(counts: &BTreeMap<MaterialClass, u64>) -> String {
    let mut out = String::new();
    for (class, count) in counts {
        let _ = writeln!(out, "{:<8} {:>6} object(s)", class.display_name(), count);
    }
    out
}
