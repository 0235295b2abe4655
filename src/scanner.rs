use indexmap::IndexSet;
use rayon::prelude::*;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::errors::{FluidError, Result};

/// `fluid-<prefix>-<name>` or `fluid-<prefix>-[<value>]`, delimited by
/// whitespace, quotes or the start of input.
static CANDIDATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[\s"'`])(fluid-[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*(?:-\[[^\s"'`\[\]]+\])?)"#)
        .expect("candidate pattern is valid")
});

/// Extract unique fluid class candidates from arbitrary source text
pub fn extract_candidates_from_content(content: &str) -> Vec<String> {
    let mut candidates = IndexSet::new();
    for captures in CANDIDATE_PATTERN.captures_iter(content) {
        candidates.insert(captures[1].to_string());
    }
    candidates.into_iter().collect()
}

/// Read a file and extract its candidates
pub fn extract_candidates_from_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(extract_candidates_from_content(&content))
}

/// Extract candidates from many files in parallel, deduplicated in file order
pub fn extract_candidates_parallel(files: &[PathBuf], jobs: Option<usize>) -> Result<Vec<String>> {
    let per_file: Vec<Vec<String>> = match jobs {
        Some(num_jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_jobs)
                .build()
                .map_err(|e| FluidError::InvalidInput(e.to_string()))?;
            pool.install(|| read_all(files))
        }
        None => read_all(files),
    };

    let mut all = IndexSet::new();
    for candidates in per_file {
        all.extend(candidates);
    }
    Ok(all.into_iter().collect())
}

/// Unreadable and non-UTF-8 files are skipped with a warning.
fn read_all(files: &[PathBuf]) -> Vec<Vec<String>> {
    files
        .par_iter()
        .map(|path| {
            tracing::trace!(path = %path.display(), "scanning file");
            extract_candidates_from_file(path).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), "Skipping file - {}", e);
                Vec::new()
            })
        })
        .collect()
}

/// Collect files matching the given patterns, minus excluded ones
pub fn collect_files(patterns: &[String], exclude_patterns: &[String]) -> Result<Vec<PathBuf>> {
    let excludes = exclude_patterns
        .iter()
        .map(|pattern| glob::Pattern::new(pattern))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut files = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for pattern in patterns {
        for entry in glob::glob(pattern)? {
            let path = entry?;

            if path.is_dir() || excludes.iter().any(|exclude| exclude.matches_path(&path)) {
                continue;
            }

            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}
