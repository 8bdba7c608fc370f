//! Tests for record-type resolution against raw records

use super::{compile, tokens};
use crate::app::models::UNMATCHED_RECORD_TYPE;
use crate::constants::{UNMATCHED_FIELD_NAME, UNMATCHED_RECORD_NAME};

#[test]
fn test_single_type_resolves_to_the_one_metadata() {
    let set = compile(Some("firstname,lastname")).unwrap();

    let metadata = set.resolve(&tokens(&["Tom", "Fennelly"]));
    assert_eq!(metadata.name(), "record");

    // Any token list resolves to the same metadata
    let metadata = set.resolve(&tokens(&["anything"]));
    assert_eq!(metadata.name(), "record");
}

#[test]
fn test_multi_type_dispatches_on_leading_token() {
    let set = compile(Some("book[name,author]|magazine[name,issue]")).unwrap();

    let metadata = set.resolve(&tokens(&["book", "Dune", "Herbert"]));
    assert_eq!(metadata.name(), "book");

    let metadata = set.resolve(&tokens(&["magazine", "Wired", "42"]));
    assert_eq!(metadata.name(), "magazine");
}

#[test]
fn test_leading_token_is_trimmed_before_dispatch() {
    let set = compile(Some("book[name,author]")).unwrap();

    let metadata = set.resolve(&tokens(&["  book  ", "Dune", "Herbert"]));
    assert_eq!(metadata.name(), "book");
}

#[test]
fn test_unknown_type_resolves_to_unmatched_sentinel() {
    let set = compile(Some("book[name,author]")).unwrap();

    let metadata = set.resolve(&tokens(&["video", "Alien"]));
    assert!(metadata.is_unmatched());
    assert_eq!(metadata.name(), UNMATCHED_RECORD_NAME);
    assert_eq!(metadata.fields().len(), 1);
    assert_eq!(metadata.fields()[0].name(), UNMATCHED_FIELD_NAME);

    // The sentinel is shared, not rebuilt per record
    let again = set.resolve(&tokens(&["audio", "Blah"]));
    assert!(std::sync::Arc::ptr_eq(&metadata, &again));
    assert!(std::sync::Arc::ptr_eq(&metadata, &UNMATCHED_RECORD_TYPE));
}

#[test]
fn test_empty_token_list_resolves_to_unmatched() {
    let set = compile(Some("book[name,author]")).unwrap();
    let metadata = set.resolve(&[]);
    assert!(metadata.is_unmatched());
}
