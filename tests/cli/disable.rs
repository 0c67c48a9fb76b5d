use anyhow::Result;
use predicates::prelude::*;

use crate::CliTest;

#[test]
fn test_usage_error_without_files() -> Result<()> {
    let test = CliTest::new()?;

    test.command()
        .arg("color-*")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "You must provide one or more files",
        ));

    Ok(())
}

#[test]
fn test_same_line_violation_gets_inline_comment() -> Result<()> {
    let test = CliTest::with_file("a.css", "a { color: #00; }\n")?;

    test.command()
        .args(["color-no-invalid-hex", "--", "a.css"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Writing 1 disable(s) to a.css"))
        .stderr(predicate::str::contains(
            "+ disabling violation of color-no-invalid-hex on a.css:1",
        ));

    assert_eq!(
        test.read_file("a.css")?,
        "a { color: #00; /* stylelint-disable-line color-no-invalid-hex */ }\n"
    );
    Ok(())
}

#[test]
fn test_own_line_violation_gets_next_line_comment() -> Result<()> {
    let test = CliTest::with_file("a.css", "a {\n  color: #00;\n}\n")?;

    test.command()
        .args(["color-no-invalid-hex", "--", "a.css"])
        .assert()
        .success();

    assert_eq!(
        test.read_file("a.css")?,
        "a {\n  /* stylelint-disable-next-line color-no-invalid-hex */\n  color: #00;\n}\n"
    );
    Ok(())
}

#[test]
fn test_filter_skips_other_rules() -> Result<()> {
    let test = CliTest::with_file("a.css", "a { color: #00; }\n")?;

    test.command()
        .args(["indentation", "--", "a.css"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no violations to disable"))
        .stderr(predicate::str::contains(
            "- skipping violation of color-no-invalid-hex on a.css:1",
        ));

    // Nothing matched, so the file is never written back
    assert_eq!(test.read_file("a.css")?, "a { color: #00; }\n");
    Ok(())
}

#[test]
fn test_dry_run_leaves_file_untouched() -> Result<()> {
    let test = CliTest::with_file("a.css", "a { color: #00; }\n")?;

    test.command()
        .args(["--dry-run", "color-*", "--", "a.css"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Would write 1 disable(s) to a.css"))
        .stdout(predicate::str::contains(
            "Run without --dry-run to write these comments.",
        ));

    assert_eq!(test.read_file("a.css")?, "a { color: #00; }\n");
    Ok(())
}

#[test]
fn test_rerun_converges() -> Result<()> {
    let test = CliTest::with_file("a.css", "a { color: #00; }\n")?;

    test.command()
        .args(["color-*", "--", "a.css"])
        .assert()
        .success();
    let annotated = test.read_file("a.css")?;

    // The inserted directive silences the violation, so a second run
    // finds nothing and the file stays byte-identical.
    test.command()
        .args(["color-*", "--", "a.css"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no violations to disable"));

    assert_eq!(test.read_file("a.css")?, annotated);
    Ok(())
}

#[test]
fn test_no_rules_defaults_to_everything() -> Result<()> {
    let test = CliTest::with_file("a.css", "a {}\n")?;

    test.command()
        .args(["--", "a.css"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "No rules provided; disabling all rules!",
        ));

    assert_eq!(
        test.read_file("a.css")?,
        "/* stylelint-disable-next-line block-no-empty */\na {}\n"
    );
    Ok(())
}

#[test]
fn test_parse_error_is_reported_and_skipped() -> Result<()> {
    let test = CliTest::with_file("broken.css", "a { color: red;\n")?;
    test.write_file("ok.css", "b {}\n")?;

    test.command()
        .args(["*", "--", "broken.css", "ok.css"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("skipping broken.css"))
        .stderr(predicate::str::contains("Unclosed block"));

    // The broken file is excluded, the rest of the run still happens
    assert_eq!(test.read_file("broken.css")?, "a { color: red;\n");
    assert_eq!(
        test.read_file("ok.css")?,
        "/* stylelint-disable-next-line block-no-empty */\nb {}\n"
    );
    Ok(())
}

#[test]
fn test_merges_into_existing_disable_comment() -> Result<()> {
    let test = CliTest::with_file(
        "a.css",
        "a {\n  /* stylelint-disable-next-line block-no-empty */\n  margin: 0px;\n}\n",
    )?;

    test.command()
        .args(["length-zero-no-unit", "--", "a.css"])
        .assert()
        .success();

    assert_eq!(
        test.read_file("a.css")?,
        "a {\n  /* stylelint-disable-next-line block-no-empty, length-zero-no-unit */\n  margin: 0px;\n}\n"
    );
    Ok(())
}

#[test]
fn test_directory_walk_honors_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".stylehushrc.json", r#"{ "ignores": ["**/dist/**"] }"#)?;
    test.write_file("styles/a.css", "a {}\n")?;
    test.write_file("dist/bundle.css", "b {}\n")?;

    test.command().args(["*", "--", "."]).assert().success();

    assert_eq!(
        test.read_file("styles/a.css")?,
        "/* stylelint-disable-next-line block-no-empty */\na {}\n"
    );
    assert_eq!(test.read_file("dist/bundle.css")?, "b {}\n");
    Ok(())
}

#[test]
fn test_scss_inline_comments_survive() -> Result<()> {
    let test = CliTest::with_file(
        "a.scss",
        "// header\n.card {\n  .title {\n    color: #00; // eh\n  }\n}\n",
    )?;

    test.command()
        .args(["color-*", "--", "a.scss"])
        .assert()
        .success();

    assert_eq!(
        test.read_file("a.scss")?,
        "// header\n.card {\n  .title {\n    /* stylelint-disable-next-line color-no-invalid-hex */\n    color: #00; // eh\n  }\n}\n"
    );
    Ok(())
}
