use clap::Parser;
use gootstrap::cli::Args;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("gootstrap")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["--project", "demo", "--docker-registry", "hub.example.com"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.project, "demo");
    assert_eq!(parsed.docker_registry, "hub.example.com");
    assert_eq!(parsed.output, None);
    assert_eq!(parsed.templates, None);
    assert!(parsed.set.is_empty());
    assert!(!parsed.verbose);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--project",
        "demo",
        "--docker-registry",
        "hub.example.com",
        "--output",
        "/tmp/work",
        "--templates",
        "./templates",
        "--values",
        "values.yml",
        "--set",
        "CILintVersion=v1.0.0",
        "--set",
        "Extra=x",
        "--verbose",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.output, Some(PathBuf::from("/tmp/work")));
    assert_eq!(parsed.templates, Some(PathBuf::from("./templates")));
    assert_eq!(parsed.values, Some(PathBuf::from("values.yml")));
    assert_eq!(parsed.set, vec!["CILintVersion=v1.0.0", "Extra=x"]);
    assert!(parsed.verbose);
}

#[test]
fn test_short_flags() {
    let args = make_args(&["--project", "demo", "--docker-registry", "r", "-o", "out", "-v"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.output, Some(PathBuf::from("out")));
    assert!(parsed.verbose);
}

#[test]
fn test_missing_project() {
    let args = make_args(&["--docker-registry", "r"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_missing_docker_registry() {
    let args = make_args(&["--project", "demo"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_unexpected_positional() {
    let args = make_args(&["--project", "demo", "--docker-registry", "r", "extra"]);
    assert!(Args::try_parse_from(args).is_err());
}
