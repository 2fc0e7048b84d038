use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created ./.gtaarc.json

    ----- stderr -----
    ");

    let content = test.read_file(".gtaarc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["maxMethodLines"], 50);
    assert_eq!(parsed["namingMinWords"], 2);
    assert!(parsed.get("pageDirs").is_some());
    assert!(parsed.get("testFrameworkImports").is_some());
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".gtaarc.json", "{}")?;

    let out = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    assert_eq!(out.code, Some(2));
    assert!(out.stderr.starts_with("Error: "));
    assert!(out.stderr.contains(".gtaarc.json already exists"));
    assert_eq!(test.read_file(".gtaarc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_picked_up_by_scan() -> Result<()> {
    let test = CliTest::new()?;
    run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;
    test.write_file(
        "tests/CartTest.java",
        "class CartTest {\n    @Test\n    void addsItemToEmptyCart() {\n        cart.add(item);\n    }\n}\n",
    )?;

    let out = run(test.scan_command())?;
    assert_eq!(out.code, Some(0), "stdout: {}\nstderr: {}", out.stdout, out.stderr);
    assert_eq!(out.stdout, "✓ Scanned 1 file(s) - no violations found\n");

    Ok(())
}
