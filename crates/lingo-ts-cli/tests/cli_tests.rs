use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::path::Path;

const BROKEN_SK: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="sk">
<context>
    <name>PWQ</name>
    <message>
        <source>The password contains less than %1 digits</source>
        <translation>Heslo obsahuje menej ako% 1 číslic</translation>
    </message>
</context>
</TS>
"#;

fn setup_test_env() -> TempDir {
    let temp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project");
    temp.copy_from(fixtures, &["**/*"]).unwrap();
    temp
}

fn lingo(temp: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("lingo-ts");
    cmd.current_dir(temp.path()).arg("--e2e");
    cmd
}

#[test]
fn test_check_complete_catalog() {
    let temp = setup_test_env();
    lingo(&temp)
        .args(["check", "-l", "de"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked de: 0 error(s), 0 warning(s)"))
        .stdout(predicate::str::contains("No issues found!"));
}

#[test]
fn test_check_warnings_do_not_fail() {
    let temp = setup_test_env();
    lingo(&temp)
        .args(["check", "-l", "sk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Passed with 1 warning(s)"))
        .stderr(predicate::str::contains("unfinished translation of MainWindow: \"Quit\""));
}

#[test]
fn test_check_deny_unfinished() {
    let temp = setup_test_env();
    lingo(&temp)
        .args(["check", "--deny-unfinished"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "validation found 1 error(s) and 0 warning(s)",
        ));
}

#[test]
fn test_check_reports_malformed_placeholder() {
    let temp = setup_test_env();
    let broken = temp.child("broken_sk.ts");
    broken.write_str(BROKEN_SK).unwrap();

    lingo(&temp)
        .args(["check", "broken_sk.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed placeholder '% 1'"))
        .stderr(predicate::str::contains("validation found 2 error(s)"));
}

#[test]
fn test_check_unknown_locale() {
    let temp = setup_test_env();
    lingo(&temp)
        .args(["check", "-l", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locale 'fr' not found"))
        .stderr(predicate::str::contains("de, sk"));
}

#[test]
fn test_check_without_config() {
    let temp = TempDir::new().unwrap();
    lingo(&temp)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lingo.toml configuration file not found"));
}

#[test]
fn test_stats() {
    let temp = setup_test_env();
    lingo(&temp)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "de 100.0% 4/4 finished, 0 unfinished, 0 obsolete, 2 context(s)",
        ))
        .stdout(predicate::str::contains(
            "sk 66.7% 2/3 finished, 1 unfinished, 0 obsolete, 1 context(s)",
        ));
}

#[test]
fn test_fmt_dry_run() {
    let temp = setup_test_env();
    let sk = temp.child("lang/app_sk.ts");
    let compact = BROKEN_SK.replace("\n    ", "").replace("\n", "");
    sk.write_str(&compact).unwrap();

    lingo(&temp)
        .args(["fmt", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would format:"))
        .stdout(predicate::str::contains("+ <!DOCTYPE TS>"));
    sk.assert(compact.as_str());
}

#[test]
fn test_fmt_is_idempotent() {
    let temp = setup_test_env();
    lingo(&temp).arg("fmt").assert().success();
    lingo(&temp)
        .arg("fmt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Done: 0 formatted, 2 unchanged"));
}

#[test]
fn test_sync_requires_locales() {
    let temp = setup_test_env();
    lingo(&temp)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("No locales specified"));
}

#[test]
fn test_sync_dry_run() {
    let temp = setup_test_env();
    let original = std::fs::read_to_string(temp.path().join("lang/app_sk.ts")).unwrap();

    lingo(&temp)
        .args(["sync", "-l", "sk", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would update sk (1 added, 0 vanished, 0 revived)"))
        .stdout(predicate::str::contains("+ Settings: \"Language\""));
    temp.child("lang/app_sk.ts").assert(original.as_str());
}

#[test]
fn test_sync_all() {
    let temp = setup_test_env();
    lingo(&temp)
        .args(["sync", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated sk"));

    let catalog = lingo_ts::parse_file(temp.path().join("lang/app_sk.ts")).unwrap();
    let language = catalog.find("Settings", "Language", None).unwrap();
    assert_eq!(
        language.translation.status,
        lingo_ts::TranslationStatus::Unfinished
    );
    assert_eq!(
        catalog
            .find("MainWindow", "Open %1", None)
            .unwrap()
            .translation
            .forms(),
        ["Otvoriť %1"]
    );

    lingo(&temp)
        .args(["sync", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All catalogs are in sync!"));
}

#[test]
fn test_sync_creates_new_locale() {
    let temp = setup_test_env();
    lingo(&temp)
        .args(["sync", "-l", "pt_BR"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating catalog for pt_BR"));

    let catalog = lingo_ts::parse_file(temp.path().join("lang/app_pt_BR.ts")).unwrap();
    assert_eq!(catalog.language.as_deref(), Some("pt_BR"));
    assert_eq!(catalog.message_count(), 4);
}

#[test]
fn test_lookup_plural() {
    let temp = setup_test_env();
    lingo(&temp)
        .args(["lookup", "-l", "sk", "-c", "MainWindow", "-n", "3", "%n file(s) selected"])
        .assert()
        .success()
        .stdout("Vybrané 3 súbory\n");
}

#[test]
fn test_lookup_arguments() {
    let temp = setup_test_env();
    lingo(&temp)
        .args(["lookup", "-l", "de-AT", "-c", "MainWindow", "-a", "notes.txt", "Open %1"])
        .assert()
        .success()
        .stdout("notes.txt öffnen\n");
}

#[test]
fn test_lookup_falls_back_to_source() {
    let temp = setup_test_env();
    lingo(&temp)
        .args(["lookup", "-l", "sk", "-c", "MainWindow", "Quit"])
        .assert()
        .success()
        .stdout("Quit\n")
        .stderr(predicate::str::contains("No translation for MainWindow"));
}

#[test]
fn test_lookup_unknown_language_shows_source() {
    let temp = setup_test_env();
    lingo(&temp)
        .args(["lookup", "-l", "fr", "-c", "MainWindow", "-a", "notes.txt", "Open %1"])
        .assert()
        .success()
        .stdout("Open notes.txt\n")
        .stderr(predicate::str::contains("No catalog for 'fr'"))
        .stderr(predicate::str::contains("No translation for MainWindow"));
}
