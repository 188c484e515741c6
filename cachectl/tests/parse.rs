use cachectl::{
    Category, DirectiveKind, DirectiveValue, ErrorKind, ValidationError, explain_header, parse,
    parse_lenient,
};
use pretty_assertions::assert_eq;

#[test]
fn test_blank_headers_state_no_policy() {
    for header in ["", "   ", "\t"] {
        let parsed = parse(header).expect("blank header is valid");
        assert!(parsed.is_empty());
    }
}

#[test]
fn test_one_directive_per_segment_in_order() {
    let header = "no-cache, no-transform, s-maxage=600, stale-if-error=30, only-if-cached";
    let parsed = parse(header).expect("valid header");
    let names: Vec<_> = parsed.iter().map(|d| d.name()).collect();
    assert_eq!(
        names,
        vec!["no-cache", "no-transform", "s-maxage", "stale-if-error", "only-if-cached"]
    );
}

#[test]
fn test_public_max_age() {
    let parsed = parse("public, max-age=3600").expect("valid header");
    let directives = parsed.directives();
    assert_eq!(directives.len(), 2);
    assert_eq!(directives[0].name(), "public");
    assert_eq!(directives[0].value(), None);
    assert_eq!(directives[1].name(), "max-age");
    assert_eq!(directives[1].value(), Some(&DirectiveValue::Seconds(3600)));
    assert_eq!(directives[1].category(), Category::Expiration);
}

#[test]
fn test_missing_max_age_value() {
    let errors = parse("public, max-age=").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].kind(), ErrorKind::MalformedValue);
    assert_eq!(errors.errors()[0].directive(), Some(DirectiveKind::MaxAge));
}

#[test]
fn test_bare_garbage_token_is_one_error() {
    let errors = parse("AAAAAAAAA").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.errors()[0],
        ValidationError::MalformedDirective("AAAAAAAAA".into())
    );
}

#[test]
fn test_vendor_extension_with_value_is_accepted() {
    let parsed = parse("public, x-vendor-ttl=30").expect("extensions are preserved");
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed.directives()[1].description(), "Unknown directive");
}

#[test]
fn test_single_conflicts() {
    for header in ["no-store, public", "public, private", "private, no-store"] {
        let errors = parse(header).unwrap_err();
        assert_eq!(errors.len(), 1, "{header}");
        assert_eq!(errors.errors()[0].kind(), ErrorKind::ConflictingDirectives);
    }
}

#[test]
fn test_lenient_parse_keeps_understood_tokens() {
    let parsed = parse_lenient("public, private, max-age=abc, immutable");
    let kinds: Vec<_> = parsed.iter().filter_map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            DirectiveKind::Public,
            DirectiveKind::Private,
            DirectiveKind::MaxAge,
            DirectiveKind::Immutable,
        ]
    );
    assert_eq!(parsed.validate().unwrap_err().len(), 2);
}

#[test]
fn test_case_insensitive_names_keep_spelling() {
    let parsed = parse("Public, MAX-AGE=5").expect("valid header");
    assert_eq!(parsed.directives()[0].name(), "Public");
    assert_eq!(parsed.seconds(DirectiveKind::MaxAge), Some(5));
}

#[test]
fn test_explain_full_header() {
    let text = explain_header("public, max-age=3600");
    assert_eq!(
        text,
        "public: The response may be stored by any cache, including shared caches\n\
         max-age=3600: Maximum time the response is considered fresh (1 hour)\n\
         \n\
         Summary: The response may be cached and reused without revalidation for 1 hour until it becomes stale."
    );
}

#[test]
fn test_no_store_summary_beats_max_age() {
    let text = parse_lenient("no-store, max-age=3600").explain();
    assert!(text.contains("Summary: Caching is disabled entirely"));
    assert!(!text.contains("until it becomes stale"));
}

#[test]
fn test_explain_invalid_header_prefix() {
    assert_eq!(
        explain_header("no-store, public"),
        "Invalid header: no-store cannot be combined with public or private"
    );
}

#[test]
fn test_oversized_whole_number_is_valid() {
    let parsed = parse("public, max-age=99999999999999999999").expect("whole numbers are well formed");
    assert_eq!(parsed.seconds(DirectiveKind::MaxAge), Some(i64::MAX));
    assert_eq!(parsed.to_string(), "public, max-age=99999999999999999999");

    let errors = parse("public, max-age=99999999999999999999.5").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors.errors()[0],
        ValidationError::InvalidNumber { .. }
    ));
}
