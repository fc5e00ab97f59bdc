use super::*;

fn announcement() -> Announcement {
    Announcement {
        id: 1,
        title: "Maintenance".to_string(),
        content: "Scheduled **downtime**".to_string(),
        audience: Audience::All,
        priority: Priority::Normal,
        starts_at: None,
        ends_at: None,
        is_active: true,
        is_read: false,
        created_by: 1,
        created_at: Utc::now(),
    }
}

#[test]
fn live_without_window() {
    assert!(announcement().is_live(Utc::now()));
}

#[test]
fn inactive_is_not_live() {
    let mut a = announcement();
    a.is_active = false;

    assert!(!a.is_live(Utc::now()));
}

/// Tests the optional start and end dates.
///
/// Expected: not live before start or after end
#[test]
fn respects_window() {
    let now = Utc::now();

    let mut future = announcement();
    future.starts_at = Some(now + Duration::hours(1));
    assert!(!future.is_live(now));

    let mut expired = announcement();
    expired.ends_at = Some(now - Duration::hours(1));
    assert!(!expired.is_live(now));
}

/// Tests that markdown content is rendered for the response.
///
/// Expected: content_html contains a strong tag
#[test]
fn renders_html() {
    let dto = announcement().into_dto();

    assert!(dto.content_html.contains("<strong>downtime</strong>"));
}
