//! Part-file orchestration.
//!
//! One invocation processes one logical document: list its part files
//! under the raw prefix, flatten each part, and write one output object
//! per part under the processed prefix. Parts are independent and are
//! processed strictly in listing order; the first failure aborts the
//! remaining parts and leaves earlier outputs in place.

use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::error::{Error, Result};
use crate::extract::flatten_blocks;
use crate::model::{AnalysisResult, JsonFormat, PartOutput};
use crate::store::BlobStore;

/// Storage prefixes for a pipeline run.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Prefix the analysis service writes part files under
    pub raw_prefix: String,

    /// Prefix output objects are written under
    pub processed_prefix: String,
}

impl ProcessOptions {
    /// Create options with the standard prefixes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw prefix.
    pub fn with_raw_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.raw_prefix = prefix.into();
        self
    }

    /// Set the processed prefix.
    pub fn with_processed_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.processed_prefix = prefix.into();
        self
    }
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            raw_prefix: "raw".to_string(),
            processed_prefix: "processed".to_string(),
        }
    }
}

/// Runs the flattening pipeline against a blob store.
pub struct Processor<'a> {
    store: &'a dyn BlobStore,
    options: ProcessOptions,
}

impl<'a> Processor<'a> {
    /// Create a processor with default options.
    pub fn new(store: &'a dyn BlobStore) -> Self {
        Self::with_options(store, ProcessOptions::default())
    }

    /// Create a processor with explicit options.
    pub fn with_options(store: &'a dyn BlobStore, options: ProcessOptions) -> Self {
        Self { store, options }
    }

    /// Process every part file of one logical document.
    ///
    /// Returns the keys written under the processed prefix, in part
    /// order. Fails fast: a part with no blocks, or any store or JSON
    /// error, aborts the run with outputs for earlier parts already
    /// written.
    pub fn process_document(&self, file_name: &str, classification: &str) -> Result<Vec<String>> {
        let prefix = format!(
            "{}/{}/{}/",
            self.options.raw_prefix, classification, file_name
        );
        let part_keys: Vec<String> = self
            .store
            .list(&prefix)?
            .into_iter()
            .filter(|key| !is_placeholder(key))
            .collect();
        log::info!("processing {} part file(s) under {}", part_keys.len(), prefix);

        let mut written = Vec::with_capacity(part_keys.len());
        for key in &part_keys {
            let output = self.process_part(key, file_name)?;
            let stamp = Utc::now().format("%Y%m%dT%H%M%SZ");
            let out_key = format!(
                "{}/{}/{}/output_{}.json",
                self.options.processed_prefix, classification, file_name, stamp
            );
            let body = output.to_json(JsonFormat::Compact)?;
            self.store.put(&out_key, body.as_bytes(), "application/json")?;
            log::info!("saved processed output to {}", out_key);
            written.push(out_key);
        }
        Ok(written)
    }

    /// Flatten a single part object into its output record.
    pub fn process_part(&self, key: &str, file_name: &str) -> Result<PartOutput> {
        log::info!("processing part {}", key);
        let bytes = self.store.get(key)?;
        let result: AnalysisResult = serde_json::from_slice(&bytes)?;
        if result.is_empty() {
            return Err(Error::EmptyPart(key.to_string()));
        }

        let flattened = flatten_blocks(&result.blocks);
        Ok(PartOutput {
            fields: flattened.fields,
            document_ref: document_ref(file_name),
            lineitems: flattened.line_items,
        })
    }
}

/// Marker objects a storage listing may contain that are not part
/// files: directory placeholders and access-check probes.
fn is_placeholder(key: &str) -> bool {
    key.ends_with('/') || key.ends_with(".s3_access_check")
}

/// Correlation id for the output object: the file name's segment before
/// the first `-`, or a random 10-character identifier when the name
/// carries none. The random branch is not stable across re-runs of the
/// same input.
pub fn document_ref(file_name: &str) -> String {
    match file_name.split_once('-') {
        Some((prefix, _)) => prefix.to_string(),
        None => random_ref(),
    }
}

fn random_ref() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect()
}
