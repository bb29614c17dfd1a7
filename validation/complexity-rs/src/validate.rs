use complexity_rs::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Largest absolute difference accepted against an expected score.
const TOLERANCE: f64 = 1e-6;

#[derive(Debug, Deserialize, Serialize)]
struct ValidationData {
    name: String,
    notes: String,
    input: InputData,
    params: Params,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected: Option<ResultData>,
    #[serde(skip_deserializing)]
    result: ResultData,
}

#[derive(Debug, Deserialize, Serialize)]
struct InputData {
    regions: Vec<String>,
    sectors: Vec<String>,
    values: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize, Serialize)]
struct Params {
    n_iters: usize,
    threshold: f64,
    #[serde(flatten)]
    extra: Option<Value>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
struct ResultData {
    eci: BTreeMap<String, f64>,
    pci: BTreeMap<String, f64>,
    fitness: BTreeMap<String, f64>,
    fit_p: BTreeMap<String, f64>,
    skipped: Option<String>,
}

impl ResultData {
    /// Every expected score missing from `self` or further than `TOLERANCE` away.
    fn mismatches(&self, expected: &ResultData) -> Vec<String> {
        let pairs = [
            ("eci", &self.eci, &expected.eci),
            ("pci", &self.pci, &expected.pci),
            ("fitness", &self.fitness, &expected.fitness),
            ("fit_p", &self.fit_p, &expected.fit_p),
        ];

        let mut out = Vec::new();
        for (metric, got, want) in pairs {
            for (label, &w) in want {
                match got.get(label) {
                    Some(&g) if (g - w).abs() <= TOLERANCE => {}
                    Some(&g) => out.push(format!("{} {}: got {}, expected {}", metric, label, g, w)),
                    None => out.push(format!("{} {}: missing, expected {}", metric, label, w)),
                }
            }
        }
        out
    }
}

/// Usage: `validate [INPUT_DIR] [OUTPUT_DIR]`.
///
/// Defaults to the fixtures shipped in `fixtures/`. Any other directory of
/// fixtures in the same format works, e.g. exported from a reference
/// implementation with an `expected` block per file.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let input_dir = args.next().map_or_else(|| PathBuf::from("fixtures"), PathBuf::from);
    let output_dir = args.next().map_or_else(|| PathBuf::from("output"), PathBuf::from);

    if !input_dir.exists() {
        eprintln!(
            "Input directory {:?} does not exist. Run from validation/complexity-rs, or pass a fixture directory.",
            input_dir
        );
        return Ok(());
    }

    fs::create_dir_all(&output_dir)?;

    let mut failures = 0;
    for entry in fs::read_dir(&input_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            println!("Processing {:?}", path.file_name().unwrap_or_default());
            failures += process_file(&path, &output_dir)?;
        }
    }

    if failures > 0 {
        return Err(format!("{} scores differ from the expected values", failures).into());
    }
    Ok(())
}

/// Run one fixture, write its scores and return the number of mismatches.
fn process_file(input_path: &Path, output_dir: &Path) -> Result<usize, Box<dyn Error>> {
    let file = fs::File::open(input_path)?;
    let mut data: ValidationData = serde_json::from_reader(file)?;

    let extra = data.params.extra.as_ref();
    let flag = |key: &str| extra.and_then(|e| e.get(key)).and_then(Value::as_bool);
    let text = |key: &str| extra.and_then(|e| e.get(key)).and_then(Value::as_str);

    let input = |key: &str| match text(key) {
        Some("raw") => MatrixInput::Raw,
        _ => MatrixInput::Rca,
    };

    let mut builder = Complexity::new()
        .n_iters(data.params.n_iters)
        .threshold(data.params.threshold)
        .correction(flag("correction").unwrap_or(true))
        .metrics(&[Metric::Eci, Metric::Pci, Metric::Fitness, Metric::FitnessPlus])
        .eci_input(input("eci_input"))
        .fitness_input(input("fitness_input"));

    builder = match text("sign_statistic") {
        Some("mean") => builder.sign_statistic(SignStatistic::Mean),
        Some("correlation") => builder.sign_statistic(SignStatistic::Correlation),
        Some("none") => builder.no_sign_correction(),
        _ => builder.sign_statistic(SignStatistic::Sum),
    };

    let pipeline = builder.build()?;

    let x = ActivityMatrix::from_rows(
        data.input.regions.clone(),
        data.input.sectors.clone(),
        data.input.values.clone(),
    )?;

    match pipeline.compute(&x) {
        Ok(indices) => {
            for index in indices {
                let target = match index.metric() {
                    Metric::Eci => &mut data.result.eci,
                    Metric::Pci => &mut data.result.pci,
                    Metric::Fitness => &mut data.result.fitness,
                    Metric::FitnessPlus => &mut data.result.fit_p,
                };
                target.extend(index.iter().map(|(label, v)| (label.to_string(), v)));
            }
        }
        Err(err) => data.result.skipped = Some(err.to_string()),
    }

    let mismatches = match &data.expected {
        Some(expected) => data.result.mismatches(expected),
        None => Vec::new(),
    };
    for line in &mismatches {
        eprintln!("  {}: {}", data.name, line);
    }

    let file_name = input_path.file_name().ok_or("input path has no file name")?;
    let output_path = output_dir.join(file_name);
    let output_json = serde_json::to_string_pretty(&data)?;
    fs::write(output_path, output_json)?;

    Ok(mismatches.len())
}
