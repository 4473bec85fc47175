//! End-to-end conversions of small GitBook trees.

mod common;

use std::sync::Arc;

use assert_fs::prelude::*;
use serial_test::serial;

use bookwiki::{BookwikiError, ConvertConfig, ConvertError, Converter};
use common::{TestHarness, WIKI_BASE};

const SUMMARY: &str = "# Table of contents

* [What is Iris](README.md)

## Getting started

* [Installation](getting-started/installation.md)
* [Quick start](getting-started/quick-start.md)

## Responses

* [JSON](responses/json.md)
  * [Other](responses/sub/other.md)
";

const README: &str = "# What is Iris

Iris is fast \\(really fast\\).

![Logo](.gitbook/assets/logo.png)

{% page-ref page=\"getting-started/installation.md\" %}
{% page-ref page=\"responses/json.md\" %}

See [the website](https://iris-go.com).
";

const INSTALLATION: &str = "# Installation

```sh
$ go get github.com/kataras/iris/v12@latest # [not](a.md) \\(rewritten\\)
```

Continue with [Quick start](quick-start.md) or read about [JSON](../responses/json.md).
";

fn iris_book() -> TestHarness {
    let harness = TestHarness::new();
    harness
        .add_file("SUMMARY.md", SUMMARY)
        .add_file("README.md", README)
        .add_file("getting-started/installation.md", INSTALLATION)
        .add_file("getting-started/quick-start.md", "# Quick start\n")
        .add_file("responses/json.md", "# JSON\n")
        .add_file("responses/sub/other.md", "# Other\n")
        .add_file(".gitbook/assets/logo.png", [0x89u8, b'P', b'N', b'G', 0x0d, 0x0a])
        .add_file(".git/HEAD", "ref: refs/heads/master\n");
    harness
}

#[test]
fn test_converts_whole_book() {
    let harness = iris_book();
    let report = harness.run().unwrap();

    assert_eq!(report.files_parsed, 6);
    assert_eq!(report.files_copied, 1);

    assert!(harness.wiki_path("Home.md").exists());
    assert!(harness.wiki_path("_Sidebar.md").exists());
    assert!(harness
        .wiki_path("getting-started/getting-started-installation.md")
        .exists());
    assert!(harness
        .wiki_path("responses/sub/responses-sub-other.md")
        .exists());
    assert!(!harness.wiki_path(".git").exists());
    assert!(!harness.wiki_path("README.md").exists());
}

#[test]
fn test_sidebar() {
    let harness = iris_book();
    harness.run().unwrap();

    assert_eq!(
        harness.read_wiki("_Sidebar.md"),
        "* [[What is Iris|Home]]
* Getting started
  * [[Installation|getting-started-installation]]
  * [[Quick start|getting-started-quick-start]]
* Responses
  * [[JSON|responses-json]]
  * [[Other|responses-sub-other]]
"
    );
}

#[test]
fn test_home_page() {
    let harness = iris_book();
    harness.run().unwrap();

    let expected = format!(
        "# What is Iris

Iris is fast (really fast).

![Logo]({}/_assets/logo.png)

> Reference: [[Installation|getting-started-installation]]

> Reference: [[Json|responses-json]]

See [the website](https://iris-go.com).
",
        WIKI_BASE
    );
    assert_eq!(harness.read_wiki("Home.md"), expected);
}

#[test]
fn test_nested_page_keeps_code_block() {
    let harness = iris_book();
    harness.run().unwrap();

    assert_eq!(
        harness.read_wiki("getting-started/getting-started-installation.md"),
        "# Installation

```sh
$ go get github.com/kataras/iris/v12@latest # [not](a.md) \\(rewritten\\)
```

Continue with [[Quick start|quick-start]] or read about [[JSON|responses-json]].
"
    );
}

#[test]
fn test_assets_are_copied_byte_for_byte() {
    let harness = iris_book();
    harness.run().unwrap();

    assert_eq!(
        std::fs::read(harness.wiki_path("_assets/logo.png")).unwrap(),
        vec![0x89u8, b'P', b'N', b'G', 0x0d, 0x0a]
    );
}

#[test]
fn test_keep_links_mirrors_tree() {
    let harness = iris_book().keeping_links();
    let report = harness.run().unwrap();

    assert_eq!(report.files_parsed, 6);
    assert!(harness.wiki_path("README.md").exists());
    assert!(harness.wiki_path("getting-started/installation.md").exists());
    assert!(harness.wiki_path(".gitbook/assets/logo.png").exists());

    let installation = harness.read_wiki("getting-started/installation.md");
    assert!(installation.contains("[Quick start](quick-start.md)"));
}

#[test]
fn test_missing_title_aborts_run() {
    let harness = TestHarness::new();
    harness
        .add_file("a.md", "fine\n")
        .add_file("b.md", "Broken [](a.md) link\n")
        .add_file("c.md", "never reached\n");

    let err = harness.run().unwrap_err();
    match err {
        BookwikiError::Convert(ConvertError::Document { path, source }) => {
            assert!(path.ends_with("b.md"));
            assert_eq!(source.to_string(), "Title is missing from: [](a.md)");
        }
        other => panic!("Expected document error, got {:?}", other),
    }
    assert!(harness.wiki_path("a.md").exists());
    assert!(!harness.wiki_path("c.md").exists());
}

#[test]
fn test_destination_inside_source_is_not_rescanned() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("book/README.md").write_str("# Home\n").unwrap();
    temp.child("book/wiki/Home.md").write_str("stale\n").unwrap();

    let config = ConvertConfig {
        source_directory: temp.path().join("book"),
        destination_directory: temp.path().join("book/wiki"),
        ..ConvertConfig::default()
    };
    let report = Converter::from_config(Arc::new(config)).run().unwrap();

    assert_eq!(report.files_parsed, 1);
    temp.child("book/wiki/Home.md").assert("# Home\n");
}

#[test]
#[serial]
fn test_relative_destination_inside_dotted_source_is_not_rescanned() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("book/README.md").write_str("# Home\n").unwrap();
    temp.child("book/wiki/stale.md").write_str("stale\n").unwrap();

    let previous_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp.path()).unwrap();

    let config = ConvertConfig {
        source_directory: "./book".into(),
        destination_directory: "book/wiki".into(),
        ..ConvertConfig::default()
    };
    let result = Converter::from_config(Arc::new(config)).run();

    std::env::set_current_dir(previous_dir).unwrap();

    let report = result.unwrap();
    assert_eq!(report.files_parsed, 1);
    temp.child("book/wiki/Home.md").assert("# Home\n");
    assert!(!temp.path().join("book/wiki/wiki").exists());
}
