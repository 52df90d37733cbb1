use crate::reference::country_name;
use crate::registry::{default_registry, BankRegistry};
use crate::validation::{normalize, validate, BicError};
use std::fmt;

/// A parsed SWIFT/BIC code.
///
/// Built once from the raw input and never changed afterwards. Structural
/// fields are set only when `errors()` is empty; enrichment fields are set
/// only when, in addition, the code was found in a bank dataset. An unknown
/// country segment invalidates the whole result and clears every field but
/// `original`.
///
/// ```
/// use bic_lookup::{BicResult, NoRegistry};
///
/// let bic = BicResult::with_registry("PSST FR PP SCE", &NoRegistry);
/// assert!(bic.valid());
/// assert_eq!(bic.formatted(), Some("PSSTFRPPSCE"));
/// assert_eq!(bic.country_name(), Some("France"));
/// assert_eq!(bic.branch_code(), Some("SCE"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BicResult {
    original: String,
    parts: Option<Parts>,
    errors: Vec<BicError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Parts {
    formatted: String,
    bank_code: String,
    country_code: String,
    country_name: String,
    location_code: String,
    branch_code: Option<String>,
    bank_name: Option<String>,
    location_name: Option<String>,
    branch_name: Option<String>,
}

impl BicResult {
    /// Parses against the process-wide registry over `$BIC_DATA_DIR` or `./data`
    /// (see [`default_registry`]).
    pub fn new(raw: &str) -> Self {
        Self::with_registry(raw, default_registry())
    }

    pub fn with_registry(raw: &str, registry: &dyn BankRegistry) -> Self {
        let formatted = normalize(raw);
        let errors = validate(&formatted);
        if !errors.is_empty() {
            return Self::invalid(raw, errors);
        }

        let mut parts = match decompose(&formatted) {
            Some(parts) => parts,
            None => return Self::invalid(raw, vec![BicError::BadCountryCode]),
        };

        if let Some(record) = registry.lookup(&parts.country_code.to_lowercase(), &formatted) {
            parts.bank_name = record.institution;
            parts.location_name = record.city;
            parts.branch_name = record.branch;
        }

        Self {
            original: raw.to_string(),
            parts: Some(parts),
            errors,
        }
    }

    fn invalid(raw: &str, errors: Vec<BicError>) -> Self {
        log::debug!("rejected BIC '{}': {:?}", raw, errors);
        Self {
            original: raw.to_string(),
            parts: None,
            errors,
        }
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[BicError] {
        &self.errors
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn formatted(&self) -> Option<&str> {
        self.parts.as_ref().map(|parts| parts.formatted.as_str())
    }

    pub fn bank_code(&self) -> Option<&str> {
        self.parts.as_ref().map(|parts| parts.bank_code.as_str())
    }

    pub fn country_code(&self) -> Option<&str> {
        self.parts.as_ref().map(|parts| parts.country_code.as_str())
    }

    pub fn location_code(&self) -> Option<&str> {
        self.parts.as_ref().map(|parts| parts.location_code.as_str())
    }

    /// `None` for the 8 character form.
    pub fn branch_code(&self) -> Option<&str> {
        self.parts.as_ref().and_then(|parts| parts.branch_code.as_deref())
    }

    pub fn country_name(&self) -> Option<&str> {
        self.parts.as_ref().map(|parts| parts.country_name.as_str())
    }

    pub fn bank_name(&self) -> Option<&str> {
        self.parts.as_ref().and_then(|parts| parts.bank_name.as_deref())
    }

    pub fn location_name(&self) -> Option<&str> {
        self.parts.as_ref().and_then(|parts| parts.location_name.as_deref())
    }

    pub fn branch_name(&self) -> Option<&str> {
        self.parts.as_ref().and_then(|parts| parts.branch_name.as_deref())
    }

    /// True when a bank dataset entry was found for the code.
    pub fn enriched(&self) -> bool {
        self.parts.as_ref().is_some_and(|parts| {
            parts.bank_name.is_some() || parts.location_name.is_some() || parts.branch_name.is_some()
        })
    }
}

impl fmt::Display for BicResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formatted().unwrap_or(&self.original))
    }
}

// Slices a structurally valid code. `None` when the country does not resolve.
fn decompose(code: &str) -> Option<Parts> {
    let country_code = &code[4..6];
    let country_name = country_name(country_code)?;
    Some(Parts {
        formatted: code.to_string(),
        bank_code: code[0..4].to_string(),
        country_code: country_code.to_string(),
        country_name: country_name.to_string(),
        location_code: code[6..8].to_string(),
        branch_code: code.get(8..11).map(str::to_string),
        bank_name: None,
        location_name: None,
        branch_name: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BankRecord, MemoryRegistry, NoRegistry};

    fn fixtures() -> MemoryRegistry {
        let mut registry = MemoryRegistry::new();
        registry.insert(
            "fr",
            "PSSTFRPPSCE",
            BankRecord {
                institution: Some("LA BANQUE POSTALE".to_string()),
                city: Some("ORLEANS".to_string()),
                branch: Some("CENTRE FINANCIER DORLEANS LA SOURCE".to_string()),
            },
        );
        registry.insert(
            "de",
            "DEUTDEFF",
            BankRecord {
                institution: Some("DEUTSCHE BANK AG".to_string()),
                city: Some("FRANKFURT AM MAIN".to_string()),
                branch: None,
            },
        );
        registry
    }

    #[test]
    fn decomposes_and_enriches_long_form() {
        let bic = BicResult::with_registry("PSST FR PP SCE", &fixtures());
        assert!(bic.valid());
        assert!(bic.errors().is_empty());
        assert_eq!(bic.original(), "PSST FR PP SCE");
        assert_eq!(bic.formatted(), Some("PSSTFRPPSCE"));
        assert_eq!(bic.bank_code(), Some("PSST"));
        assert_eq!(bic.country_code(), Some("FR"));
        assert_eq!(bic.country_name(), Some("France"));
        assert_eq!(bic.location_code(), Some("PP"));
        assert_eq!(bic.branch_code(), Some("SCE"));
        assert_eq!(bic.bank_name(), Some("LA BANQUE POSTALE"));
        assert_eq!(bic.location_name(), Some("ORLEANS"));
        assert_eq!(bic.branch_name(), Some("CENTRE FINANCIER DORLEANS LA SOURCE"));
        assert!(bic.enriched());
    }

    #[test]
    fn short_form_has_no_branch() {
        let bic = BicResult::with_registry("deut-de-ff", &fixtures());
        assert!(bic.valid());
        assert_eq!(bic.formatted(), Some("DEUTDEFF"));
        assert_eq!(bic.branch_code(), None);
        assert_eq!(bic.bank_name(), Some("DEUTSCHE BANK AG"));
        assert_eq!(bic.branch_name(), None);
    }

    #[test]
    fn structural_errors_leave_every_field_unset() {
        let bic = BicResult::with_registry("PSSTFRPPS", &fixtures());
        assert!(!bic.valid());
        assert_eq!(bic.errors(), &[BicError::BadFormat]);
        assert_eq!(bic.original(), "PSSTFRPPS");
        assert_eq!(bic.formatted(), None);
        assert_eq!(bic.bank_code(), None);
        assert_eq!(bic.country_code(), None);
        assert_eq!(bic.country_name(), None);
        assert_eq!(bic.location_code(), None);
        assert_eq!(bic.branch_code(), None);
        assert_eq!(bic.bank_name(), None);
        assert!(!bic.enriched());
    }

    #[test]
    fn unknown_country_invalidates_and_clears() {
        let mut registry = fixtures();
        registry.insert(
            "fa",
            "PSSTFAPPSCE",
            BankRecord {
                institution: Some("NOWHERE BANK".to_string()),
                ..BankRecord::default()
            },
        );

        let bic = BicResult::with_registry("PSSTFAPPSCE", &registry);
        assert!(!bic.valid());
        assert_eq!(bic.errors(), &[BicError::BadCountryCode]);
        assert_eq!(bic.country_name(), None);
        assert_eq!(bic.formatted(), None);
        assert_eq!(bic.bank_code(), None);
        assert_eq!(bic.bank_name(), None);
    }

    #[test]
    fn unlisted_code_is_valid_without_enrichment() {
        let bic = BicResult::with_registry("PSSTFIPPSCE", &fixtures());
        assert!(bic.valid());
        assert_eq!(bic.country_name(), Some("Finland"));
        assert_eq!(bic.bank_name(), None);
        assert_eq!(bic.location_name(), None);
        assert_eq!(bic.branch_name(), None);
        assert!(!bic.enriched());
    }

    #[test]
    fn enrichment_needs_the_exact_code() {
        let bic = BicResult::with_registry("PSSTFRPP", &fixtures());
        assert!(bic.valid());
        assert_eq!(bic.bank_name(), None);
    }

    #[test]
    fn empty_input_keeps_original() {
        let bic = BicResult::with_registry("", &NoRegistry);
        assert_eq!(bic.original(), "");
        assert_eq!(bic.errors(), &[BicError::TooShort, BicError::BadFormat]);
        assert_eq!(bic.formatted(), None);
    }

    #[test]
    fn segments_rebuild_the_formatted_code() {
        for raw in ["PSSTFRPPSCE", "DEUTDEFF", "abcd gb 2l xxx"] {
            let bic = BicResult::with_registry(raw, &NoRegistry);
            assert!(bic.valid(), "{raw}");
            let rebuilt = format!(
                "{}{}{}{}",
                bic.bank_code().unwrap(),
                bic.country_code().unwrap(),
                bic.location_code().unwrap(),
                bic.branch_code().unwrap_or_default()
            );
            assert_eq!(Some(rebuilt.as_str()), bic.formatted());
        }
    }

    #[test]
    fn separators_do_not_change_the_result() {
        let spaced = BicResult::with_registry("PSST FR PP SCE", &fixtures());
        let compact = BicResult::with_registry("PSSTFRPPSCE", &fixtures());
        assert_ne!(spaced, compact);
        assert_eq!(spaced.formatted(), compact.formatted());
        assert_eq!(spaced.errors(), compact.errors());
        assert_eq!(spaced.bank_name(), compact.bank_name());

        let respaced = BicResult::with_registry("PSSTFRPPSCE", &fixtures());
        assert_eq!(compact, respaced);
    }

    #[test]
    fn display_prefers_formatted_code() {
        assert_eq!(BicResult::with_registry("psst-fr-pp", &NoRegistry).to_string(), "PSSTFRPP");
        assert_eq!(BicResult::with_registry("bad", &NoRegistry).to_string(), "bad");
    }
}
