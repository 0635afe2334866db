use assert_cmd::{cargo, prelude::*};
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn fincalc() -> Command {
    Command::new(cargo::cargo_bin!("fincalc"))
}

#[test]
fn version_prints_package_version() {
    fincalc()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "fincalc {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn compare_example_ranks_prefixed_first() {
    fincalc()
        .args(["compare", "--example"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"best\": \"Tesouro Prefixado 14.50%\"",
        ))
        .stdout(predicate::str::contains("Poupança (IR exempt)"))
        .stdout(predicate::str::contains("taxable_equivalents"));
}

#[test]
fn compare_minimal_prints_only_the_winner() {
    fincalc()
        .args(["--output", "minimal", "compare", "--example"])
        .assert()
        .success()
        .stdout("Tesouro Prefixado 14.50%\n");
}

#[test]
fn compare_flags_change_the_winner() {
    fincalc()
        .args([
            "compare",
            "--cdb-pct",
            "130",
            "--prefixed-rate",
            "10",
            "--output",
            "minimal",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("CDB 130% CDI"));
}

#[test]
fn compare_table_formats_money_as_reais() {
    fincalc()
        .args(["compare", "--example", "--output", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 10.000,00"))
        .stdout(predicate::str::contains("ranking:"));
}

#[test]
fn compare_reads_yaml_input_file() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("shelf.yaml");
    fs::write(
        &path,
        "investments:\n\
         \x20 - investment_type: cdb\n\
         \x20   principal: 1000\n\
         \x20   term_days: 365\n\
         \x20   annual_rate: 0.12\n\
         \x20   label: Banco A\n\
         \x20 - investment_type: lci\n\
         \x20   principal: 1000\n\
         \x20   term_days: 365\n\
         \x20   annual_rate: 0.095\n\
         \x20   label: Banco B\n",
    )
    .expect("failed to write input");

    // 12% taxed at 17.5% nets 9.9%, above the exempt 9.5%
    fincalc()
        .args(["--output", "minimal", "compare", "--input"])
        .arg(&path)
        .assert()
        .success()
        .stdout("Banco A\n");
}

#[test]
fn compare_rejects_invalid_investment_in_file() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("shelf.json");
    fs::write(
        &path,
        r#"{"investments":[{"investment_type":"cdb","principal":"0","term_days":30,"annual_rate":"0.1"}]}"#,
    )
    .expect("failed to write input");

    fincalc()
        .args(["compare", "--input"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("principal"));
}

#[test]
fn compare_reports_missing_field_in_file() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("shelf.json");
    fs::write(
        &path,
        r#"{"investments":[{"investment_type":"cdb","principal":"1000","term_days":30}]}"#,
    )
    .expect("failed to write input");

    fincalc()
        .args(["compare", "--input"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("annual_rate"));
}

#[test]
fn yield_with_absurd_rate_reports_overflow() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("inv.json");
    fs::write(
        &path,
        r#"{"investment_type":"cdb","principal":"1","term_days":10,"annual_rate":"1000000000000000000000000000"}"#,
    )
    .expect("failed to write input");

    fincalc()
        .args(["yield", "--input"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Arithmetic overflow"));
}

#[test]
fn yield_selic_plus_spread() {
    fincalc()
        .args([
            "yield",
            "--type",
            "tesouro-selic",
            "--principal",
            "1000",
            "--days",
            "365",
            "--selic",
            "10",
            "--selic-spread",
            "2",
            "--output",
            "minimal",
        ])
        .assert()
        .success()
        // 1000 * 1.122 = 1122 gross, 122 taxed at 17.5%
        .stdout(predicate::str::starts_with("1100.65"));
}

#[test]
fn compare_missing_input_file_fails() {
    fincalc()
        .args(["compare", "--input", "no/such/file.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn yield_short_term_warns_about_iof() {
    fincalc()
        .args([
            "yield",
            "--type",
            "cdb",
            "--principal",
            "1000",
            "--days",
            "15",
            "--rate",
            "10.65",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("IOF applies to the yield"))
        .stdout(predicate::str::contains("\"tax_exempt\": false"));
}

#[test]
fn yield_from_percent_of_cdi_between_dates() {
    fincalc()
        .args([
            "yield",
            "--type",
            "lci",
            "--principal",
            "5000",
            "--start",
            "2024-01-01",
            "--end",
            "2024-07-01",
            "--pct-of-cdi",
            "95",
            "--cdi",
            "10.65",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"term_days\": 182"))
        .stdout(predicate::str::contains("\"tax_exempt\": true"));
}

#[test]
fn yield_without_rate_fails() {
    fincalc()
        .args(["yield", "--type", "cdb", "--principal", "1000", "--days", "90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("a rate is required"));
}

#[test]
fn yield_rejects_dates_out_of_order() {
    fincalc()
        .args([
            "yield",
            "--type",
            "cdb",
            "--principal",
            "1000",
            "--start",
            "2024-06-01",
            "--end",
            "2024-01-01",
            "--rate",
            "10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be after"));
}

#[test]
fn tax_rates_for_fifteen_days() {
    fincalc()
        .args(["--output", "minimal", "tax-rates", "--days", "15"])
        .assert()
        .success()
        .stdout("0.50\n");
}

#[test]
fn tax_rates_exempt_has_no_income_tax() {
    fincalc()
        .args(["tax-rates", "--days", "100", "--exempt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"income_tax_rate\": \"0\""))
        .stdout(predicate::str::contains("\"iof_free\": true"));
}

#[test]
fn tax_rates_schedule_lists_both_tables() {
    fincalc()
        .args(["tax-rates", "--schedule"])
        .assert()
        .success()
        .stdout(predicate::str::contains("withholding"))
        .stdout(predicate::str::contains("\"income_tax\""));
}

#[test]
fn amortization_price_csv_has_installments() {
    fincalc()
        .args([
            "amortization",
            "--principal",
            "1000",
            "--rate",
            "1",
            "--periods",
            "12",
            "--system",
            "price",
            "--output",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("number"))
        .stdout(predicate::str::contains("88.85"));
}

#[test]
fn roi_minimal() {
    fincalc()
        .args(["--output", "minimal", "roi", "--gain", "1500", "--cost", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("50"));
}

#[test]
fn break_even_zero_margin_fails() {
    fincalc()
        .args([
            "break-even",
            "--fixed-costs",
            "1000",
            "--price",
            "10",
            "--variable-cost",
            "10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Division by zero"));
}

#[test]
fn calc_multiplies_with_comma_decimals() {
    fincalc()
        .args(["--output", "minimal", "calc", "12,5", "x", "3"])
        .assert()
        .success()
        .stdout("37.5\n");
}

#[test]
fn calc_division_by_zero_fails() {
    fincalc()
        .args(["calc", "1", "/", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Division by zero"));
}

#[test]
fn logs_stay_off_stdout() {
    fincalc()
        .args(["-vv", "--output", "minimal", "compare", "--example"])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout("Tesouro Prefixado 14.50%\n");
}
