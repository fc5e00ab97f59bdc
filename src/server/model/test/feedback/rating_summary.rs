use super::*;

/// Tests the summary of a technician with no feedback.
///
/// Expected: zero reviews, zero average, no category averages
#[test]
fn empty_summary() {
    let summary = RatingSummary::from_feedback(2, &[]);

    assert_eq!(summary.total_reviews, 0);
    assert_eq!(summary.average_rating, 0.0);
    assert_eq!(summary.quality, None);
}

/// Tests averaging with partially rated categories.
///
/// Expected: overall average over all, category average only over rated entries
#[test]
fn averages_rated_categories_only() {
    let entries = [
        feedback(
            5,
            CategoryRatings {
                quality: Some(4),
                ..Default::default()
            },
        ),
        feedback(4, CategoryRatings::default()),
        feedback(
            3,
            CategoryRatings {
                quality: Some(2),
                value: Some(5),
                ..Default::default()
            },
        ),
    ];

    let summary = RatingSummary::from_feedback(2, &entries);

    assert_eq!(summary.total_reviews, 3);
    assert_eq!(summary.average_rating, 4.0);
    assert_eq!(summary.quality, Some(3.0));
    assert_eq!(summary.value, Some(5.0));
    assert_eq!(summary.punctuality, None);
}

/// Tests rounding of the overall average to one decimal place.
///
/// Expected: (5 + 4 + 4) / 3 = 4.333.. rounds to 4.3
#[test]
fn rounds_to_one_decimal() {
    let entries = [
        feedback(5, CategoryRatings::default()),
        feedback(4, CategoryRatings::default()),
        feedback(4, CategoryRatings::default()),
    ];

    let summary = RatingSummary::from_feedback(2, &entries);

    assert_eq!(summary.average_rating, 4.3);
}
