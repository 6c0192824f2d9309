use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseClass {
    /// The call completes normally.
    Returns,
    /// The call (or driving its result) raises an exception instance.
    Raises,
    /// The call fails with a runtime error that is not an exception instance.
    Fails,
}

/// How the harness consumes the call's result.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Drive {
    /// Compare the result's repr; generators are drained into a list first.
    #[default]
    Value,
    /// Call `next` on the result until it raises, recording each value.
    Resume,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ExpectedOutcome {
    pub result: Option<String>,
    pub values: Vec<String>,
    pub output: Vec<String>,
    pub raises: Option<String>,
    pub error_contains: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaseSpec {
    pub class: CaseClass,
    pub call: String,
    #[serde(default)]
    pub args: Vec<serde_yaml::Value>,
    #[serde(default)]
    pub drive: Drive,
    #[serde(default)]
    pub expected: ExpectedOutcome,
}

#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub dir: PathBuf,
    pub spec: CaseSpec,
}

pub fn load_cases(cases_dir: &Path) -> Result<Vec<Case>> {
    let mut cases = Vec::new();

    for entry in
        fs::read_dir(cases_dir).with_context(|| format!("Reading {}", cases_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }

        let case_path = path.join("case.yaml");
        if !case_path.exists() {
            continue;
        }

        let case_name = path
            .file_name()
            .and_then(|value| value.to_str())
            .map(str::to_string)
            .with_context(|| format!("Invalid case directory name {}", path.display()))?;
        let case_raw = fs::read_to_string(&case_path)
            .with_context(|| format!("Reading {}", case_path.display()))?;
        let spec: CaseSpec = serde_yaml::from_str(&case_raw)
            .with_context(|| format!("Parsing {}", case_path.display()))?;
        validate_spec(&case_name, &spec)?;

        cases.push(Case {
            name: case_name,
            dir: path,
            spec,
        });
    }

    ensure!(
        !cases.is_empty(),
        "No test cases found in {}",
        cases_dir.display()
    );
    cases.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(cases)
}

fn validate_spec(name: &str, spec: &CaseSpec) -> Result<()> {
    match spec.class {
        CaseClass::Returns => ensure!(
            spec.expected.raises.is_none() && spec.expected.error_contains.is_none(),
            "Case {name} returns but declares an error expectation"
        ),
        CaseClass::Raises => ensure!(
            spec.expected.raises.is_some(),
            "Case {name} raises but names no exception type"
        ),
        CaseClass::Fails => ensure!(
            spec.expected.error_contains.is_some(),
            "Case {name} fails but has no error_contains"
        ),
    }
    Ok(())
}

pub fn normalize_output(output: &str) -> String {
    output.replace("\r\n", "\n").trim_end().to_string()
}
