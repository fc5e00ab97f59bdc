use super::*;

#[test]
fn accepts_bounds() {
    assert!(validate_ratings(1, &CategoryRatings::default()).is_ok());
    assert!(validate_ratings(5, &CategoryRatings::max()).is_ok());
}

#[test]
fn rejects_out_of_range_overall() {
    assert!(validate_ratings(0, &CategoryRatings::default()).is_err());
    assert!(validate_ratings(6, &CategoryRatings::default()).is_err());
}

/// Tests that a single bad category rating fails validation.
///
/// Expected: Err(AppError::BadRequest)
#[test]
fn rejects_out_of_range_category() {
    let categories = CategoryRatings {
        punctuality: Some(7),
        ..Default::default()
    };

    assert!(validate_ratings(4, &categories).is_err());
}
