// ==============================================
// PAGESIM ARGUMENT TESTS (integration)
// ==============================================

use std::path::Path;

use clap::Parser;
use clap::error::ErrorKind;
use log::LevelFilter;
use pagecache::builder::CachePolicy;
use pagecache::cli::Args;

fn parse(args: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_from(std::iter::once("pagesim").chain(args.iter().copied()))
}

#[test]
fn positional_args_build_the_named_policy() {
    let args = parse(&["arc", "trace.txt", "128", "8"]).unwrap();
    assert_eq!(args.policy, CachePolicy::Arc);
    assert_eq!(args.trace, Path::new("trace.txt"));
    assert!(!args.metrics);
    assert_eq!(args.log_level(), LevelFilter::Warn);

    let cache = args.build_cache().unwrap();
    assert_eq!(cache.policy(), CachePolicy::Arc);
    assert!(cache.as_arc().is_some());
    assert_eq!(cache.max_pages(), 8);
    assert_eq!(cache.page_size(), 16);
}

#[test]
fn policy_name_is_case_insensitive() {
    let args = parse(&["LRU", "t", "64", "4"]).unwrap();
    assert_eq!(args.policy, CachePolicy::Lru);
    assert!(args.build_cache().unwrap().as_lru().is_some());
}

#[test]
fn unknown_policy_is_a_parse_error() {
    let err = parse(&["fifo", "t", "64", "4"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn missing_geometry_is_a_parse_error() {
    let err = parse(&["arc", "t", "64"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn unusable_geometry_parses_but_fails_to_build() {
    let zero_pages = parse(&["lru", "t", "64", "0"]).unwrap();
    assert!(zero_pages.build_cache().is_err());

    let zero_page_size = parse(&["arc", "t", "7", "8"]).unwrap();
    assert!(zero_page_size.build_cache().is_err());
}

#[test]
fn flags_set_metrics_and_verbosity() {
    let args = parse(&["--metrics", "-vv", "arc", "t", "128", "8"]).unwrap();
    assert!(args.metrics);
    assert_eq!(args.verbose, 2);
    assert_eq!(args.log_level(), LevelFilter::Trace);

    let args = parse(&["lru", "t", "128", "8", "--verbose"]).unwrap();
    assert_eq!(args.log_level(), LevelFilter::Debug);
}
