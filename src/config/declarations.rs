//! Declaration file loading.
//!
//! A declaration file is a YAML sequence of batches; each batch maps a
//! manager-kind tag to the package names listed under it:
//!
//! ```yaml
//! - rpm: [git, "@development-tools"]
//!   pip: [numpy]
//! - pip: [scipy]
//! ```
//!
//! YAML flow syntax makes plain JSON input valid too:
//! `[{"rpm": ["foo", "bar"]}, {"pip": ["numpy"]}]`. Mapping order within
//! a batch is preserved.

use crate::core::types::{DeclarationBatch, DependencyDeclaration};
use crate::error::{DepstrapError, Result};
use serde_yml::Value;
use std::fs;
use std::path::Path;

pub fn load_batches(path: &Path) -> Result<Vec<DeclarationBatch>> {
    let content = fs::read_to_string(path).map_err(|e| DepstrapError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_batches(&content, &path.display().to_string())
}

pub fn parse_batches(source: &str, origin: &str) -> Result<Vec<DeclarationBatch>> {
    let parse_error = |message: String| DepstrapError::ParseError {
        file: origin.to_string(),
        message,
    };

    let value: Value = serde_yml::from_str(source)
        .map_err(|e| parse_error(e.to_string()))?;

    let batches = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(seq) => seq,
        _ => {
            return Err(parse_error(
                "expected a sequence of declaration batches".to_string(),
            ));
        }
    };

    let mut result = Vec::with_capacity(batches.len());
    for (index, batch) in batches.into_iter().enumerate() {
        let Value::Mapping(mapping) = batch else {
            return Err(parse_error(format!(
                "batch {} is not a tag-to-names mapping",
                index + 1
            )));
        };

        let mut declarations = Vec::with_capacity(mapping.len());
        for (key, value) in &mapping {
            let tag = key.as_str().ok_or_else(|| {
                parse_error(format!("batch {} has a non-string tag", index + 1))
            })?;

            declarations.push(DependencyDeclaration {
                tag: tag.to_string(),
                names: parse_names(tag, value, index, &parse_error)?,
            });
        }

        result.push(DeclarationBatch { declarations });
    }

    Ok(result)
}

// A tag may carry either a list of names or a single bare name.
fn parse_names(
    tag: &str,
    value: &Value,
    index: usize,
    parse_error: &impl Fn(String) -> DepstrapError,
) -> Result<Vec<String>> {
    match value {
        Value::String(name) => Ok(vec![name.clone()]),
        Value::Sequence(seq) => seq
            .iter()
            .map(|entry| {
                entry.as_str().map(str::to_string).ok_or_else(|| {
                    parse_error(format!(
                        "batch {}, tag '{}': package names must be strings",
                        index + 1,
                        tag
                    ))
                })
            })
            .collect(),
        _ => Err(parse_error(format!(
            "batch {}, tag '{}': expected a name or a list of names",
            index + 1,
            tag
        ))),
    }
}
