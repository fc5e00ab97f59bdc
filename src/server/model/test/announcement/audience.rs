use super::*;

/// Tests audience matching for each role.
///
/// Expected: admins see everything, other roles see `all` plus their own audience
#[test]
fn matches_roles() {
    assert!(Audience::Technicians.includes(Role::Admin));
    assert!(Audience::All.includes(Role::HouseOwner));
    assert!(Audience::Technicians.includes(Role::Technician));
    assert!(!Audience::Technicians.includes(Role::HouseOwner));
    assert!(!Audience::HouseOwners.includes(Role::Technician));
}

#[test]
fn visible_values_for_house_owner() {
    assert_eq!(
        Audience::visible_to(Role::HouseOwner),
        vec!["all", "house_owners"]
    );
}
