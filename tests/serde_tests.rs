#![cfg(feature = "serde")]

//! Integration tests for serde support in lazy-optional.
//!
//! Serialization forces the chain and writes an `Option<T>`; deserialization
//! reads an `Option<T>` and builds a node from it.

use lazy_optional::LazyOptional;
use rstest::rstest;
use std::cell::Cell;
use std::fmt;

#[derive(Debug)]
struct Rejected;

impl fmt::Display for Rejected {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("rejected")
    }
}

impl std::error::Error for Rejected {}

#[rstest]
fn test_serialize_present_chain() {
    let chain = LazyOptional::of(20).map(|value| value + 1);
    assert_eq!(serde_json::to_string(&chain).unwrap(), "21");
}

#[rstest]
fn test_serialize_absent_chain() {
    let chain = LazyOptional::of(3).filter(|value| value % 2 == 0);
    assert_eq!(serde_json::to_string(&chain).unwrap(), "null");
}

#[rstest]
fn test_serialize_forces_every_time() {
    let calls = Cell::new(0);
    let chain = LazyOptional::of(1).map(|value| {
        calls.set(calls.get() + 1);
        value
    });

    let _ = serde_json::to_string(&chain).unwrap();
    let _ = serde_json::to_string(&chain).unwrap();
    assert_eq!(calls.get(), 2);
}

#[rstest]
fn test_serialize_reports_raised_error() {
    let chain = LazyOptional::of(1).throw_if(|_| true, || Rejected);
    let error = serde_json::to_string(&chain).unwrap_err();
    assert!(error.to_string().contains("rejected"));
}

#[rstest]
#[case("5", Some(5))]
#[case("null", None)]
fn test_deserialize(#[case] json: &str, #[case] expected: Option<i32>) {
    let chain: LazyOptional<'static, i32> = serde_json::from_str(json).unwrap();
    assert_eq!(chain.optional().unwrap(), expected);
}

#[rstest]
fn test_json_roundtrip() {
    let chain = LazyOptional::of("hello".to_string());
    let json = serde_json::to_string(&chain).unwrap();
    let restored: LazyOptional<'static, String> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.get().unwrap(), "hello");
}
