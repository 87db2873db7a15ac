/// Orchestration: ties classification, probing, export and fixture
/// writing together for single files and directory batches.
use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::export::{export, SuccessPolicy};
use crate::mapping::MappingTables;
use crate::media_kind::{file_extension, MediaKindClassifier};
use crate::probe::MetadataProber;
use crate::raw_store::RawMetadataStore;

/// What happened to one input file. Skips are normal batch outcomes, not
/// errors; only filesystem problems writing a fixture abort a batch.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOutcome {
    Written(PathBuf),
    Skipped,
}

/// Everything needed to process files, built once at startup.
pub struct ExpectationGenerator {
    classifier: MediaKindClassifier,
    tables: MappingTables,
    prober: MetadataProber,
    policy: SuccessPolicy,
}

impl ExpectationGenerator {
    pub fn new(config: &Config, policy: SuccessPolicy) -> Self {
        Self {
            classifier: MediaKindClassifier::new(config),
            tables: MappingTables::new(),
            prober: MetadataProber::new(config),
            policy,
        }
    }

    /// Process one media file: classify, probe, export, write fixture.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        let Some(kind) = self.classifier.classify(filename) else {
            warn!("Skipping {:?}: unrecognized file kind", path);
            return Ok(FileOutcome::Skipped);
        };

        let raw_text = match self.prober.probe(path, kind) {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping {:?}: {}", path, e);
                return Ok(FileOutcome::Skipped);
            }
        };
        let store = RawMetadataStore::parse(&raw_text);

        let table = self.tables.for_kind(kind);
        let extension = file_extension(filename).unwrap_or_default();
        let exported = match export(&store, table, &extension, self.policy) {
            Ok(exported) => exported,
            Err(e) => {
                warn!("Skipping {:?}: {}", path, e);
                return Ok(FileOutcome::Skipped);
            }
        };

        if !exported.success {
            warn!("Skipping {:?}: not all fields exported", path);
            return Ok(FileOutcome::Skipped);
        }

        let out_path = expectation_path(path);
        let mut file = File::create(&out_path)
            .with_context(|| format!("Failed to create {:?}", out_path))?;
        exported
            .document
            .write_to(&mut file)
            .with_context(|| format!("Failed to write {:?}", out_path))?;

        info!("Writing to: {}", out_path.display());
        Ok(FileOutcome::Written(out_path))
    }

    /// Recurse over a directory, processing every non-hidden file that is
    /// not already a fixture. Returns (written, skipped) counts.
    pub fn process_directory(&self, dir: &Path) -> Result<(usize, usize)> {
        let mut written = 0;
        let mut skipped = 0;

        for entry in WalkDir::new(dir)
            .into_iter()
            .filter_entry(|e| !is_hidden_dir(e))
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "expected")
            {
                continue;
            }
            match self.process_file(path)? {
                FileOutcome::Written(_) => written += 1,
                FileOutcome::Skipped => skipped += 1,
            }
        }

        info!("Wrote {} expectation files, skipped {}", written, skipped);
        Ok((written, skipped))
    }
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Input path with its final extension replaced by `.expected`; an
/// extensionless input gets `.expected` appended.
fn expectation_path(path: &Path) -> PathBuf {
    path.with_extension("expected")
}
