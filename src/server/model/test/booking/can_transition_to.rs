use super::*;

use BookingStatus::*;

/// Tests every pair of statuses against the allowed lifecycle.
///
/// Expected: only the seven listed edges are permitted
#[test]
fn permits_only_lifecycle_edges() {
    let allowed = [
        (Pending, Accepted),
        (Pending, Rejected),
        (Pending, Cancelled),
        (Accepted, InProgress),
        (Accepted, Cancelled),
        (InProgress, Completed),
        (InProgress, Cancelled),
    ];

    for from in BookingStatus::ALL {
        for to in BookingStatus::ALL {
            assert_eq!(
                from.can_transition_to(to),
                allowed.contains(&(from, to)),
                "{} -> {}",
                from,
                to
            );
        }
    }
}

/// Tests that terminal statuses have no outgoing edges.
///
/// Expected: completed, rejected and cancelled are terminal and go nowhere
#[test]
fn terminal_statuses_are_final() {
    for from in [Completed, Rejected, Cancelled] {
        assert!(from.is_terminal());
        assert!(BookingStatus::ALL
            .into_iter()
            .all(|to| !from.can_transition_to(to)));
    }
}

/// Tests that a booking cannot skip straight from pending to completed.
///
/// Expected: false
#[test]
fn cannot_skip_steps() {
    assert!(!Pending.can_transition_to(InProgress));
    assert!(!Pending.can_transition_to(Completed));
    assert!(!Accepted.can_transition_to(Completed));
}
