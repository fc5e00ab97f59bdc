use crate::{
    model::announcement::UpdateAnnouncementDto,
    server::model::announcement::UpdateAnnouncementParams,
};

fn parse(json: &str) -> UpdateAnnouncementParams {
    let dto: UpdateAnnouncementDto = serde_json::from_str(json).unwrap();
    UpdateAnnouncementParams::from_dto(dto).unwrap()
}

/// Tests an update body that leaves the date window out.
///
/// Expected: both bounds untouched
#[test]
fn absent_window_is_kept() {
    let params = parse(r#"{"title": "Holiday hours"}"#);

    assert_eq!(params.starts_at, None);
    assert_eq!(params.ends_at, None);
}

/// Tests an update body with explicit nulls and a new value.
///
/// Expected: start cleared, end set
#[test]
fn null_clears_and_value_sets() {
    let params = parse(r#"{"starts_at": null, "ends_at": "2026-12-31T00:00:00Z"}"#);

    assert_eq!(params.starts_at, Some(None));
    assert!(matches!(params.ends_at, Some(Some(_))));
}
