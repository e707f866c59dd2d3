//! Integration tests for smsprep.

use std::fs;
use std::io::Write;
use std::time::{Duration, Instant};

use tempfile::{NamedTempFile, TempDir};

use smsprep::validation::Reason;
use smsprep::{
    CharacterNormalizer, CheckStage, ExportSettings, RunState, Session, SmsPrepError,
    ValidationOutcome, ValidationReport,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn expect_failure(outcome: ValidationOutcome) -> ValidationReport {
    match outcome {
        ValidationOutcome::Failed(report) => report,
        ValidationOutcome::Passed(_) => panic!("expected validation to fail"),
    }
}

// =============================================================================
// Validation Scenarios
// =============================================================================

#[test]
fn test_clean_row_passes() {
    let file = create_test_file("Phone,Name,Date\n639123456789,Jane Doe,2024-01-01\n");

    let outcome = smsprep::validate(file.path()).expect("Validation failed to run");
    let pass = outcome.pass().expect("Clean row should pass");

    assert_eq!(pass.statistics.row_count, 1);
    assert_eq!(pass.roles.name.as_ref().map(|c| c.index), Some(1));
    assert_eq!(pass.roles.date.as_ref().map(|c| c.index), Some(2));
}

#[test]
fn test_empty_phone_cites_row_number() {
    let file = create_test_file(
        "Phone,Name\n\
         639123456789,Ana\n\
         ,Ben\n\
         639123456780,Cy\n",
    );

    let report = expect_failure(smsprep::validate(file.path()).unwrap());

    assert_eq!(report.stage, CheckStage::EmptyPhone);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].display_row, 3);
    assert_eq!(report.findings[0].label.as_deref(), Some("Ben"));
}

#[test]
fn test_placeholder_phone_is_empty() {
    let file = create_test_file("Phone,Name\n0,Ana\n639123456789.0,Ben\n");

    let report = expect_failure(smsprep::validate(file.path()).unwrap());

    assert_eq!(report.stage, CheckStage::EmptyPhone);
    let rows: Vec<usize> = report.findings.iter().map(|f| f.display_row).collect();
    assert_eq!(rows, vec![2]);
}

#[test]
fn test_letters_reported_not_format() {
    let file = create_test_file("Phone,Name\n09CALLME12,Ana\n");

    let report = expect_failure(smsprep::validate(file.path()).unwrap());

    assert_eq!(report.stage, CheckStage::Letters);
    assert_eq!(report.findings[0].raw, "09CALLME12");
    assert_eq!(report.findings[0].reason, Reason::ContainsLetters);
}

#[test]
fn test_wrong_length_reported() {
    let file = create_test_file("Phone,Name\n0912345678,Ana\n639123456789,Ben\n");

    let report = expect_failure(smsprep::validate(file.path()).unwrap());

    assert_eq!(report.stage, CheckStage::Format);
    assert_eq!(report.findings.len(), 1);
    // A ten-digit number that started with 0 gains another zero.
    assert_eq!(report.findings[0].canonical.as_deref(), Some("00912345678"));
}

#[test]
fn test_duplicates_form_one_group() {
    let file = create_test_file(
        "Phone,Name\n\
         09123456789,Ana\n\
         639123456780,Ben\n\
         0912-345-6789,Cy\n",
    );

    let report = expect_failure(smsprep::validate(file.path()).unwrap());

    assert_eq!(report.stage, CheckStage::Duplicates);
    let groups = report.duplicate_groups();
    assert_eq!(groups.len(), 1);
    let rows: Vec<usize> = groups["09123456789"].iter().map(|f| f.display_row).collect();
    assert_eq!(rows, vec![2, 4]);
}

#[test]
fn test_required_name_enforced_only_when_used() {
    let used = create_test_file("Phone,Name\n639123456789,Ana\n639123456780,\n");
    let report = expect_failure(smsprep::validate(used.path()).unwrap());
    assert_eq!(report.stage, CheckStage::RequiredFields);
    assert_eq!(report.findings[0].display_row, 3);

    let unused = create_test_file("Phone,Name\n639123456789,\n639123456780,-\n");
    assert!(smsprep::validate(unused.path()).unwrap().is_passed());
}

#[test]
fn test_placeholder_like_name_is_a_value() {
    let file = create_test_file(
        "Phone,Name\n\
         639123456789,Na\n\
         639123456780,Nil\n\
         639123456781,Ana\n",
    );

    assert!(smsprep::validate(file.path()).unwrap().is_passed());
}

#[test]
fn test_contact_date_column_is_not_the_name() {
    let file = create_test_file(
        "Phone,Contact Date,Full Name\n\
         639123456789,2024-01-01,Ana\n\
         639123456780,2024-01-02,\n",
    );

    let report = expect_failure(smsprep::validate(file.path()).unwrap());

    assert_eq!(report.stage, CheckStage::RequiredFields);
    assert_eq!(report.findings[0].display_row, 3);
    assert_eq!(report.findings[0].columns, vec!["Full Name"]);
}

#[test]
fn test_header_only_file_is_structural_error() {
    let file = create_test_file("Phone,Name\n");

    let result = smsprep::validate(file.path());

    assert!(matches!(result, Err(SmsPrepError::EmptyData(_))));
}

#[test]
fn test_tsv_auto_detect() {
    let file = create_test_file("Phone\tName\n639123456789\tAna\n09123456789\tBen\n");

    let mut session = Session::new(file.path()).unwrap();
    assert!(session.validate().unwrap().is_passed());
    assert_eq!(session.validated_source().unwrap().format, "tsv");
}

// =============================================================================
// Transform and Export
// =============================================================================

#[test]
fn test_transliteration_scenario() {
    let file = create_test_file("Phone,Name\n639123456789,José Ñandú\n");
    let out = TempDir::new().unwrap();

    let output = smsprep::transform(file.path(), &ExportSettings::new(out.path(), "clean"))
        .expect("Transform failed");

    let stats = &output.replacements;
    assert_eq!(stats.total_replacements(), 3);
    assert_eq!(stats.affected_columns(), 1);
    for c in ['é', 'Ñ', 'ú'] {
        assert_eq!(stats.by_char[&c].count, 1);
    }
    assert_eq!(
        fs::read_to_string(&output.path).unwrap(),
        "Phone,Name\n639123456789,Jose Nandu\n"
    );
}

#[test]
fn test_custom_character_map() {
    let file = create_test_file("Phone,Name\n639123456789,Zoë Ødegård\n");
    let out = TempDir::new().unwrap();
    let normalizer = CharacterNormalizer::with_table([('ë', "e"), ('Ø', "Oe"), ('å', "aa")]);

    let output =
        smsprep::transform_with(file.path(), normalizer, &ExportSettings::new(out.path(), "x"))
            .unwrap();

    assert_eq!(output.replacements.total_replacements(), 3);
    assert_eq!(
        fs::read_to_string(&output.path).unwrap(),
        "Phone,Name\n639123456789,Zoe Oedegaard\n"
    );
}

#[test]
fn test_clean_dataset_round_trips_unchanged() {
    let content = "Phone,Name,Date\n\
                   639123456789,Jane Doe,2024-01-01\n\
                   09123456789,John Roe,2024-02-02\n";
    let file = create_test_file(content);
    let out = TempDir::new().unwrap();

    let settings = ExportSettings::new(out.path(), "clean");
    let output = smsprep::transform(file.path(), &settings).unwrap();

    assert_eq!(output.phones_changed, 0);
    assert!(output.replacements.is_empty());
    assert_eq!(fs::read_to_string(&output.path).unwrap(), content);
}

#[test]
fn test_spreadsheet_damage_is_repaired() {
    let file = create_test_file(
        "Phone,Name\n\
         639123456789.0,Ana\n\
         \"+63 (917) 123-4567\",Ben\n\
         6.39171234568E+11,Cy\n",
    );
    let out = TempDir::new().unwrap();

    let output = smsprep::transform(file.path(), &ExportSettings::new(out.path(), "x")).unwrap();

    assert_eq!(output.phones_changed, 3);
    assert_eq!(
        fs::read_to_string(&output.path).unwrap(),
        "Phone,Name\n639123456789,Ana\n639171234567,Ben\n639171234568,Cy\n"
    );
}

#[test]
fn test_output_name_collision_adds_counter() {
    let file = create_test_file("Phone\n639123456789\n");
    let out = TempDir::new().unwrap();
    let settings = ExportSettings::new(out.path(), "blast.csv");

    let first = smsprep::transform(file.path(), &settings).unwrap();
    let second = smsprep::transform(file.path(), &settings).unwrap();
    let third = smsprep::transform(file.path(), &settings).unwrap();

    assert_eq!(first.path, out.path().join("blast.csv"));
    assert_eq!(second.path, out.path().join("blast_1.csv"));
    assert_eq!(third.path, out.path().join("blast_2.csv"));
}

#[test]
fn test_failing_file_is_not_exported() {
    let file = create_test_file("Phone\n12345\n");
    let out = TempDir::new().unwrap();

    let result = smsprep::transform(file.path(), &ExportSettings::new(out.path(), "x"));

    assert!(matches!(result, Err(SmsPrepError::NotValidated)));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_transform_reads_source_fresh() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("contacts.csv");
    fs::write(&source, "Phone,Name\n639123456789,Ana\n").unwrap();

    let mut session = Session::new(&source).unwrap();
    assert!(session.validate().unwrap().is_passed());

    fs::write(&source, "Phone,Name\n639123456789,Zoë\n").unwrap();
    let output = session
        .transform(&ExportSettings::new(dir.path().join("out"), "x"))
        .unwrap();

    assert_eq!(
        fs::read_to_string(&output.path).unwrap(),
        "Phone,Name\n639123456789,Zoe\n"
    );
    assert_eq!(session.state(), &RunState::Idle);
}

// =============================================================================
// Performance
// =============================================================================

#[test]
fn test_thousand_rows_well_under_a_second() {
    let mut content = String::from("Phone,Name,Date\n");
    for i in 0..1000 {
        content.push_str(&format!("+63 917 {:07},Núñez {},2024-01-01\n", i, i));
    }
    let file = create_test_file(&content);
    let out = TempDir::new().unwrap();

    let start = Instant::now();
    let output = smsprep::transform(file.path(), &ExportSettings::new(out.path(), "x")).unwrap();
    let elapsed = start.elapsed();

    assert_eq!(output.row_count, 1000);
    assert_eq!(output.replacements.total_replacements(), 2000);
    assert!(elapsed < Duration::from_secs(1), "took {:?}", elapsed);
}
