use super::*;

/// Tests round-tripping every status through its stored string.
///
/// Expected: each status parses back to itself
#[test]
fn status_strings_round_trip() {
    for status in BookingStatus::ALL {
        assert_eq!(status.as_str().parse::<BookingStatus>(), Ok(status));
    }
}

/// Tests that an unknown status string is rejected.
///
/// Expected: Err
#[test]
fn rejects_unknown_status() {
    assert!("finished".parse::<BookingStatus>().is_err());
}

/// Tests accepted and rejected clock formats.
///
/// Expected: HH:MM and HH:MM:SS parse, anything else is a bad request
#[test]
fn parses_scheduled_time() {
    assert_eq!(
        parse_scheduled_time("09:30").unwrap().format("%H:%M").to_string(),
        "09:30"
    );
    assert!(parse_scheduled_time("14:05:00").is_ok());
    assert!(parse_scheduled_time("25:00").is_err());
    assert!(parse_scheduled_time("nine").is_err());
}
