use crate::registry::BankRegistry;
use crate::swift::BicResult;
use crate::validation::BicError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub total_records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    pub enriched_records: usize,
    pub error_counts: BTreeMap<BicError, usize>,
}

impl BatchSummary {
    fn record(&mut self, bic: &BicResult) {
        self.total_records += 1;
        if bic.valid() {
            self.valid_records += 1;
        } else {
            self.invalid_records += 1;
        }
        if bic.enriched() {
            self.enriched_records += 1;
        }
        for error in bic.errors() {
            *self.error_counts.entry(*error).or_insert(0) += 1;
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BicRow<'a> {
    pub original: &'a str,
    pub valid: bool,
    pub formatted: Option<&'a str>,
    pub bank_code: Option<&'a str>,
    pub country_code: Option<&'a str>,
    pub location_code: Option<&'a str>,
    pub branch_code: Option<&'a str>,
    pub country_name: Option<&'a str>,
    pub bank_name: Option<&'a str>,
    pub location_name: Option<&'a str>,
    pub branch_name: Option<&'a str>,
    pub errors: String,
}

impl<'a> From<&'a BicResult> for BicRow<'a> {
    fn from(bic: &'a BicResult) -> Self {
        Self {
            original: bic.original(),
            valid: bic.valid(),
            formatted: bic.formatted(),
            bank_code: bic.bank_code(),
            country_code: bic.country_code(),
            location_code: bic.location_code(),
            branch_code: bic.branch_code(),
            country_name: bic.country_name(),
            bank_name: bic.bank_name(),
            location_name: bic.location_name(),
            branch_name: bic.branch_name(),
            errors: bic
                .errors()
                .iter()
                .map(|error| error.as_str())
                .collect::<Vec<_>>()
                .join(";"),
        }
    }
}

/// Reads raw codes from the first column of `input` (header `bic`) and writes
/// one decomposed row per code to `output`.
pub fn process_csv(
    input: &Path,
    output: &Path,
    registry: &dyn BankRegistry,
) -> Result<BatchSummary, String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(input)
        .map_err(|err| err.to_string())?;
    let mut writer = csv::Writer::from_path(output).map_err(|err| err.to_string())?;
    let mut summary = BatchSummary::default();

    for result in reader.records() {
        let record = result.map_err(|err| err.to_string())?;
        let raw = record.get(0).unwrap_or("");
        let bic = BicResult::with_registry(raw, registry);
        summary.record(&bic);
        writer
            .serialize(BicRow::from(&bic))
            .map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())?;

    log::info!(
        "processed {} codes from {}: valid={} invalid={} enriched={}",
        summary.total_records,
        input.display(),
        summary.valid_records,
        summary.invalid_records,
        summary.enriched_records
    );
    Ok(summary)
}

/// Writes codes as a one-column CSV with a `bic` header.
pub fn write_codes(output: &Path, codes: &[String]) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(output).map_err(|err| err.to_string())?;
    writer.write_record(["bic"]).map_err(|err| err.to_string())?;
    for code in codes {
        writer.write_record([code]).map_err(|err| err.to_string())?;
    }
    writer.flush().map_err(|err| err.to_string())
}
