//! proto-linter: naming-convention checks for protobuf service definitions
//!
//! This crate lints already-parsed schema documents, focusing on:
//! - Service names ending in `Service`
//! - Request/response message names derived from the RPC name

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod naming;
pub mod rules;
pub mod visitor;

use error::LintError;
use models::{Failure, LintReport, RuleOutcome, SchemaDocument};
use rayon::prelude::*;
use rules::base::LintRule;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name suffix of schema descriptors; other JSON files are not ours
pub const DESCRIPTOR_SUFFIX: &str = ".proto.json";

/// Read and decode one JSON schema descriptor
pub fn load_document(file_path: &Path) -> Result<SchemaDocument, LintError> {
    let path_str = file_path.to_string_lossy().to_string();

    let json = std::fs::read_to_string(file_path).map_err(|source| LintError::Io {
        path: path_str.clone(),
        source,
    })?;

    SchemaDocument::from_json(&path_str, &json)
}

/// Load descriptors in parallel, keeping the order of `files`
pub fn load_documents(files: &[PathBuf]) -> Result<Vec<SchemaDocument>, LintError> {
    files.par_iter().map(|file| load_document(file)).collect()
}

/// Run every rule over the documents.
///
/// Rules run in parallel, each with its own failure sink. Outcomes come
/// back in the order of `rules`, and one rule's infrastructure error does
/// not stop the others.
pub fn lint_documents(
    documents: &[SchemaDocument],
    rules: &[&dyn LintRule],
    dir_path: &Path,
) -> LintReport {
    let outcomes = rules
        .par_iter()
        .map(|rule| run_rule(*rule, documents, dir_path))
        .collect();

    LintReport {
        outcomes,
        files_scanned: documents.len(),
    }
}

fn run_rule(rule: &dyn LintRule, documents: &[SchemaDocument], dir_path: &Path) -> RuleOutcome {
    let mut failures = Vec::new();
    let result = rule.check(&mut |f: Failure| failures.push(f), dir_path, documents);

    RuleOutcome {
        rule_id: rule.rule_id().to_string(),
        failures,
        error: result.err(),
    }
}

/// Collect `*.proto.json` schema descriptors from paths
pub fn collect_descriptor_files(paths: &[String], exclude_patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        let p = Path::new(path);
        if p.is_file() {
            if is_descriptor(p) {
                files.push(p.to_path_buf());
            }
        } else if p.is_dir() {
            for entry in WalkDir::new(p)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| !should_exclude(e.path(), exclude_patterns))
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && is_descriptor(path) {
                    files.push(path.to_path_buf());
                }
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

fn is_descriptor(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.len() > DESCRIPTOR_SUFFIX.len() && n.ends_with(DESCRIPTOR_SUFFIX))
}

fn should_exclude(path: &Path, patterns: &[String]) -> bool {
    for pattern in patterns {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name == pattern || name.contains(pattern.as_str()) {
                return true;
            }
        }
        // Check if any path component matches
        for component in path.components() {
            if component.as_os_str().to_str() == Some(pattern.as_str()) {
                return true;
            }
        }
    }
    false
}
