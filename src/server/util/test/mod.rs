use chrono::{Duration, Utc};

use crate::server::util::{
    code::{code_matches, generate_code},
    markdown::render_markdown,
};

/// Tests that generated codes are six ASCII digits.
///
/// Expected: every code has length 6 and only digits
#[test]
fn generates_six_digit_codes() {
    for _ in 0..100 {
        let code = generate_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}

/// Tests code comparison with expiry.
///
/// Expected: matches only when equal and unexpired
#[test]
fn matches_unexpired_code_only() {
    let now = Utc::now();
    let later = Some(now + Duration::minutes(5));
    let earlier = Some(now - Duration::minutes(5));

    assert!(code_matches(Some("123456"), later, "123456", now));
    assert!(code_matches(Some("123456"), later, " 123456 ", now));
    assert!(!code_matches(Some("123456"), later, "654321", now));
    assert!(!code_matches(Some("123456"), earlier, "123456", now));
    assert!(!code_matches(None, later, "123456", now));
}

#[test]
fn renders_headings_and_lists() {
    let html = render_markdown("# Title\n\n- one\n- two");

    assert!(html.contains("<h1>Title</h1>"));
    assert!(html.contains("<li>one</li>"));
}
