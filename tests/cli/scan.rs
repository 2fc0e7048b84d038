use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

const LOGIN_PAGE: &str = r#"package com.shop.pages;

import org.junit.jupiter.api.Assertions;
import org.openqa.selenium.WebDriver;

public class LoginPage {
    private WebDriver driver;

    public void verifyTitle() {
        Assertions.assertTrue(driver.getTitle().contains("Login"));
    }
}
"#;

const LOGIN_TEST: &str = r#"package com.shop.tests;

import org.junit.jupiter.api.Test;

public class LoginTest {
    @Test
    public void test1() {
        driver.get(baseUrl);
        driver.findElement(By.id("user")).click();
    }
}
"#;

fn long_test() -> String {
    let steps: Vec<String> = (1..=36)
        .map(|i| format!("        checkout.step{}();", i))
        .collect();
    format!(
        "package com.shop.tests;\n\npublic class CheckoutTest {{\n    @Test\n    public void completesCheckoutWithSavedCard() {{\n{}\n    }}\n}}\n",
        steps.join("\n")
    )
}

#[test]
fn test_page_object_with_test_framework() -> Result<()> {
    let test = CliTest::with_file("src/pages/LoginPage.java", LOGIN_PAGE)?;

    let out = run(test.scan_command())?;
    assert_eq!(out.code, Some(1));
    assert_eq!(
        out.lines_with("FORBIDDEN_IMPORT"),
        vec![
            "src/pages/LoginPage.java:3: [error] FORBIDDEN_IMPORT — Page Object imports test framework 'org.junit.jupiter.api.Assertions'; test frameworks belong in the test definition layer"
        ]
    );
    let assertions = out.lines_with("ASSERTION_IN_POM");
    assert!(!assertions.is_empty());
    assert!(assertions.iter().all(|l| l.contains("[error]")));
    assert!(assertions[0].starts_with("src/pages/LoginPage.java:10:"));

    Ok(())
}

#[test]
fn test_generic_name_and_driver_calls() -> Result<()> {
    let test = CliTest::with_file("src/tests/LoginTest.java", LOGIN_TEST)?;

    let out = run(test.scan_command())?;
    // Warnings and info only.
    assert_eq!(out.code, Some(0));

    let naming = out.lines_with("POOR_TEST_NAMING");
    assert_eq!(naming.len(), 1);
    assert!(naming[0].starts_with("src/tests/LoginTest.java:7: [info]"));

    let adaptation = out.lines_with("ADAPTATION_IN_DEFINITION");
    assert!(!adaptation.is_empty());
    assert!(adaptation.iter().all(|l| l.contains("[warning]")));
    assert!(adaptation[0].starts_with("src/tests/LoginTest.java:8:"));

    Ok(())
}

#[test]
fn test_hardcoded_email() -> Result<()> {
    let test = CliTest::with_file(
        "tests/ContactTest.java",
        r#"public class ContactTest {
    @Test
    public void submitsContactFormWithEmail() {
        contactPage.fillEmail("test@example.com");
        contactPage.submit();
    }
}
"#,
    )?;

    let out = run(test.scan_command())?;
    assert_eq!(
        out.lines_with("HARDCODED_TEST_DATA"),
        vec![
            "tests/ContactTest.java:4: [warning] HARDCODED_TEST_DATA — Hardcoded test data 'test@example.com' passed to 'fillEmail'; move test data out of the test definition"
        ]
    );

    Ok(())
}

#[test]
fn test_long_test_threshold() -> Result<()> {
    let test = CliTest::with_file("tests/CheckoutTest.java", &long_test())?;

    let mut cmd = test.scan_command();
    cmd.arg("--max-method-lines=30");
    let out = run(cmd)?;
    assert_eq!(
        out.lines_with("LONG_TEST_FUNCTION"),
        vec![
            "tests/CheckoutTest.java:5: [warning] LONG_TEST_FUNCTION — Test method 'completesCheckoutWithSavedCard' has 36 lines (limit: 30); long tests are hard to read and maintain"
        ]
    );

    let out = run(test.scan_command())?;
    assert!(out.lines_with("LONG_TEST_FUNCTION").is_empty());
    assert_eq!(out.code, Some(0));

    Ok(())
}

#[test]
fn test_parse_error_next_to_clean_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "tests/Broken.java",
        "public class Broken {\n    @Test\n    public void opensCart() {\n        cart.open(\"unterminated);\n    }\n}\n",
    )?;
    test.write_file(
        "tests/CartTest.java",
        "public class CartTest {\n    @Test\n    public void opensEmptyCart() {\n        cartPage.open();\n    }\n}\n",
    )?;

    let out = run(test.scan_command())?;
    assert_eq!(out.code, Some(1));
    let parse_errors = out.lines_with("PARSE_ERROR");
    assert_eq!(parse_errors.len(), 1);
    assert!(parse_errors[0].starts_with("tests/Broken.java:"));
    assert!(parse_errors[0].contains("[error] PARSE_ERROR"));
    assert!(!out.stdout.contains("tests/CartTest.java:"));
    assert!(out.stdout.contains("(2 files scanned)"));

    Ok(())
}

#[test]
fn test_missing_root_is_fatal() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.args(["scan", "does-not-exist"]);
    let out = run(cmd)?;
    assert_eq!(out.code, Some(2));
    assert_eq!(out.stdout, "");
    assert!(out.stderr.contains("Error: scan root does not exist: does-not-exist"));

    let mut cmd = test.command();
    cmd.args(["scan", ""]);
    let out = run(cmd)?;
    assert_eq!(out.code, Some(2));
    assert_eq!(out.stdout, "");

    Ok(())
}

#[test]
fn test_clean_scan() -> Result<()> {
    let test = CliTest::with_file(
        "tests/CartTest.java",
        "public class CartTest {\n    @Test\n    public void addsItemToEmptyCart() {\n        cartPage.add(item);\n    }\n}\n",
    )?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Scanned 1 file(s) - no violations found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_rules_subset() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/pages/LoginPage.java", LOGIN_PAGE)?;
    test.write_file("src/tests/LoginTest.java", LOGIN_TEST)?;

    let mut cmd = test.scan_command();
    cmd.arg("--rules=poor-test-naming");
    let out = run(cmd)?;
    assert_eq!(out.code, Some(0));
    assert_eq!(out.lines_with("POOR_TEST_NAMING").len(), 1);
    assert!(out.lines_with("FORBIDDEN_IMPORT").is_empty());
    assert!(out.lines_with("ADAPTATION_IN_DEFINITION").is_empty());

    Ok(())
}

#[test]
fn test_unknown_rule_is_usage_error() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.scan_command();
    cmd.arg("--rules=NOT_A_RULE");
    let out = run(cmd)?;
    assert_eq!(out.code, Some(2));
    assert_eq!(out.stdout, "");

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let test = CliTest::with_file("src/tests/CheckoutTest.java", &long_test())?;

    let mut cmd = test.scan_command();
    cmd.args(["--format=json", "--max-method-lines=30"]);
    let out = run(cmd)?;
    assert_eq!(out.code, Some(0));

    let report: Value = serde_json::from_str(&out.stdout)?;
    assert_eq!(
        report,
        serde_json::json!({
            "violations": [{
                "file": "src/tests/CheckoutTest.java",
                "line": 5,
                "ruleId": "LONG_TEST_FUNCTION",
                "severity": "warning",
                "message": "Test method 'completesCheckoutWithSavedCard' has 36 lines (limit: 30); long tests are hard to read and maintain"
            }],
            "summary": { "LONG_TEST_FUNCTION": 1 }
        })
    );

    Ok(())
}

#[test]
fn test_config_file_disables_rules() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/tests/LoginTest.java", LOGIN_TEST)?;
    test.write_file(
        ".gtaarc.json",
        r#"{ "disabledRules": ["POOR_TEST_NAMING", "ADAPTATION_IN_DEFINITION"] }"#,
    )?;

    let out = run(test.scan_command())?;
    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, "✓ Scanned 1 file(s) - no violations found\n");

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("tests/A.java", "class A {}\n")?;
    test.write_file(".gtaarc.json", r#"{ "maxMethodLines": 0 }"#)?;

    let out = run(test.scan_command())?;
    assert_eq!(out.code, Some(2));
    assert_eq!(out.stdout, "");
    assert!(out.stderr.contains("'maxMethodLines' must be greater than 0"));

    Ok(())
}

#[test]
fn test_excluded_and_ignored_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("build/pages/Generated.java", LOGIN_PAGE)?;
    test.write_file("src/generated/pages/Stub.java", LOGIN_PAGE)?;
    test.write_file(".gtaarc.json", r#"{ "ignores": ["**/generated/**"] }"#)?;

    let out = run(test.scan_command())?;
    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, "✓ Scanned 0 file(s) - no violations found\n");

    Ok(())
}

#[test]
fn test_csharp_page_object() -> Result<()> {
    let test = CliTest::with_file(
        "Pages/HomePage.cs",
        r#"using NUnit.Framework;
using OpenQA.Selenium;

namespace Shop.Pages
{
    public class HomePage
    {
        public void CheckBanner()
        {
            Assert.IsTrue(_driver.FindElement(By.Id("banner")).Displayed);
        }
    }
}
"#,
    )?;

    let out = run(test.scan_command())?;
    assert_eq!(out.code, Some(1));
    assert_eq!(out.lines_with("FORBIDDEN_IMPORT").len(), 1);
    assert!(out.lines_with("FORBIDDEN_IMPORT")[0].starts_with("Pages/HomePage.cs:1:"));
    assert!(out.lines_with("ASSERTION_IN_POM")[0].starts_with("Pages/HomePage.cs:10:"));

    Ok(())
}

#[test]
fn test_opt_in_rule_through_cli() -> Result<()> {
    let test = CliTest::with_file(
        "pages/CartPage.java",
        "public class CartPage {\n    public void removeAll() {\n        for (WebElement row : rows) {\n            row.click();\n        }\n    }\n}\n",
    )?;

    let out = run(test.scan_command())?;
    assert!(out.lines_with("BUSINESS_LOGIC_IN_POM").is_empty());

    let mut cmd = test.scan_command();
    cmd.arg("--rules=business-logic-in-pom");
    let out = run(cmd)?;
    assert_eq!(out.code, Some(0));
    assert_eq!(
        out.lines_with("BUSINESS_LOGIC_IN_POM"),
        vec![
            "pages/CartPage.java:3: [warning] BUSINESS_LOGIC_IN_POM — Page Object method 'removeAll' contains for loop; move the logic to a separate service layer"
        ]
    );

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("--help");
    let out = run(cmd)?;
    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("scan"));
    assert!(out.stdout.contains("init"));

    Ok(())
}
