use bic_lookup::registry::DirectoryRegistry;
use bic_lookup::{BicError, BicResult};
use std::path::PathBuf;

fn bundled() -> DirectoryRegistry {
    DirectoryRegistry::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
}

#[test]
fn test_valid_code_with_dataset_entry() {
    let bic = BicResult::with_registry("PSST FR PP SCE", &bundled());

    assert!(bic.valid());
    assert!(bic.errors().is_empty());
    assert_eq!(bic.original(), "PSST FR PP SCE");
    assert_eq!(bic.formatted(), Some("PSSTFRPPSCE"));
    assert_eq!(bic.bank_code(), Some("PSST"));
    assert_eq!(bic.bank_name(), Some("LA BANQUE POSTALE"));
    assert_eq!(bic.country_code(), Some("FR"));
    assert_eq!(bic.country_name(), Some("France"));
    assert_eq!(bic.location_code(), Some("PP"));
    assert_eq!(bic.location_name(), Some("ORLEANS"));
    assert_eq!(bic.branch_code(), Some("SCE"));
    assert_eq!(bic.branch_name(), Some("CENTRE FINANCIER DORLEANS LA SOURCE"));
}

#[test]
fn test_ill_formed_code() {
    let bic = BicResult::with_registry("PSSTFRPPS", &bundled());

    assert!(!bic.valid());
    assert!(bic.errors().contains(&BicError::BadFormat));
    assert_eq!(bic.original(), "PSSTFRPPS");
    assert_eq!(bic.formatted(), None);
    assert_eq!(bic.bank_code(), None);
    assert_eq!(bic.bank_name(), None);
    assert_eq!(bic.country_code(), None);
    assert_eq!(bic.country_name(), None);
    assert_eq!(bic.location_code(), None);
    assert_eq!(bic.location_name(), None);
    assert_eq!(bic.branch_code(), None);
    assert_eq!(bic.branch_name(), None);
}

#[test]
fn test_unknown_country_code() {
    let bic = BicResult::with_registry("PSSTFAPPSCE", &bundled());

    assert!(!bic.valid());
    assert!(bic.errors().contains(&BicError::BadCountryCode));
    assert_eq!(bic.country_name(), None);
}

#[test]
fn test_code_missing_from_datasets() {
    let bic = BicResult::with_registry("PSSTFIPPSCE", &bundled());

    assert!(bic.valid());
    assert!(bic.errors().is_empty());
    assert_eq!(bic.bank_name(), None);
    assert_eq!(bic.location_name(), None);
    assert_eq!(bic.branch_name(), None);
}

#[test]
fn test_empty_input() {
    let bic = BicResult::with_registry("", &bundled());

    assert!(!bic.valid());
    assert!(bic.errors().contains(&BicError::TooShort));
    assert!(bic.errors().contains(&BicError::BadFormat));
    assert_eq!(bic.original(), "");
}

#[test]
fn test_valid_iff_no_errors_and_formatted() {
    let registry = bundled();
    let inputs = [
        "",
        "   ",
        "PSST FR PP SCE",
        "psst-fr-pp",
        "PSSTFRPPS",
        "PSSTFAPPSCE",
        "PSSTFIPPSCE",
        "DEUT DE FF XXX",
        "BARCGB22",
        "1234GB22",
        "ABCDEFGHIJKLMNOP",
        "PSST\tFR\nPP\rSCE",
        "ÉCUYFRPP",
    ];
    for raw in inputs {
        let bic = BicResult::with_registry(raw, &registry);
        assert_eq!(bic.valid(), bic.errors().is_empty(), "{raw:?}");
        assert_eq!(
            bic.valid(),
            bic.formatted().is_some_and(|code| !code.is_empty()),
            "{raw:?}"
        );
        assert_eq!(bic.original(), raw);
    }
}

#[test]
fn test_separator_insensitivity() {
    let registry = bundled();
    let spaced = BicResult::with_registry("PSST FR PP SCE", &registry);
    let compact = BicResult::with_registry("PSSTFRPPSCE", &registry);

    assert_eq!(spaced.formatted(), compact.formatted());
    assert_eq!(spaced.bank_code(), compact.bank_code());
    assert_eq!(spaced.country_code(), compact.country_code());
    assert_eq!(spaced.country_name(), compact.country_name());
    assert_eq!(spaced.location_code(), compact.location_code());
    assert_eq!(spaced.branch_code(), compact.branch_code());
    assert_eq!(spaced.bank_name(), compact.bank_name());
    assert_eq!(spaced.location_name(), compact.location_name());
    assert_eq!(spaced.branch_name(), compact.branch_name());
    assert_eq!(spaced.errors(), compact.errors());
}

#[test]
fn test_other_bundled_countries() {
    let registry = bundled();

    let deutsche = BicResult::with_registry("DEUTDEFF", &registry);
    assert_eq!(deutsche.country_name(), Some("Germany"));
    assert_eq!(deutsche.bank_name(), Some("DEUTSCHE BANK AG"));
    assert_eq!(deutsche.branch_code(), None);

    let barclays = BicResult::with_registry("barc gb 22", &registry);
    assert_eq!(
        barclays.country_name(),
        Some("United Kingdom of Great Britain and Northern Ireland")
    );
    assert_eq!(barclays.location_name(), Some("LONDON"));
}

#[test]
fn test_default_registry_constructor() {
    // Test binaries run from the package root, so ./data is the bundled data.
    if std::env::var("BIC_DATA_DIR").is_ok() {
        return;
    }
    let bic = BicResult::new("PSSTFRPPSCE");
    assert_eq!(bic.bank_name(), Some("LA BANQUE POSTALE"));
}
