//! Change classification between consecutive snapshots.

use super::entities::{ChangeEvent, ChangeKind, Snapshot};

/// Classifies `next` against the previously stored snapshot.
///
/// - No previous snapshot: [`ChangeKind::Initial`]
/// - Same observation (timestamp ignored): [`ChangeKind::Unchanged`]
/// - Anything else: [`ChangeKind::Changed`]
///
/// The returned event never carries a redirect discovery; the cycle fills it
/// in after consulting the registry.
pub fn classify(previous: Option<&Snapshot>, next: Snapshot) -> ChangeEvent {
    let kind = match previous {
        None => ChangeKind::Initial,
        Some(previous) if previous.same_observation(&next) => ChangeKind::Unchanged,
        Some(_) => ChangeKind::Changed,
    };

    ChangeEvent {
        domain: next.original_domain.clone(),
        kind,
        previous: previous.cloned(),
        current: next,
        redirect: None,
    }
}

/// Returns the redirect target when the event should trigger a registry update.
///
/// Only events that are not `unchanged` and whose snapshot ended on another
/// host qualify.
pub fn redirect_target(event: &ChangeEvent) -> Option<&str> {
    if event.kind == ChangeKind::Unchanged || !event.current.is_redirected() {
        return None;
    }
    Some(event.current.current_domain.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn live(domain: &str) -> Snapshot {
        Snapshot::reachable(domain, domain, 200, None)
    }

    #[test]
    fn test_initial_when_no_previous() {
        let event = classify(None, live("a.example"));

        assert_eq!(event.kind, ChangeKind::Initial);
        assert!(event.previous.is_none());
        assert_eq!(event.domain, "a.example");
    }

    #[test]
    fn test_initial_regardless_of_contents() {
        let snapshots = [
            live("a.example"),
            Snapshot::unreachable("a.example", "timeout"),
            Snapshot::reachable("a.example", "b.example", 301, None),
            Snapshot::reachable("a.example", "a.example", 500, None),
        ];

        for snapshot in snapshots {
            assert_eq!(classify(None, snapshot).kind, ChangeKind::Initial);
        }
    }

    #[test]
    fn test_unchanged_when_only_timestamp_differs() {
        let previous = live("a.example");
        let next = previous.clone().at(previous.timestamp + Duration::minutes(5));

        let event = classify(Some(&previous), next);

        assert_eq!(event.kind, ChangeKind::Unchanged);
        assert_eq!(event.previous.as_ref(), Some(&previous));
    }

    #[test]
    fn test_changed_when_status_differs() {
        let previous = live("a.example");
        let next = Snapshot::reachable("a.example", "a.example", 503, None);

        assert_eq!(classify(Some(&previous), next).kind, ChangeKind::Changed);
    }

    #[test]
    fn test_changed_when_liveness_flips() {
        let previous = live("a.example");
        let next = Snapshot::unreachable("a.example", "connection failed");

        assert_eq!(classify(Some(&previous), next).kind, ChangeKind::Changed);
    }

    #[test]
    fn test_changed_when_error_message_differs() {
        let previous = Snapshot::unreachable("a.example", "timeout");
        let next = Snapshot::unreachable("a.example", "connection failed");

        assert_eq!(classify(Some(&previous), next).kind, ChangeKind::Changed);
    }

    #[test]
    fn test_redirect_target_on_changed_redirect() {
        let previous = live("a.example");
        let next = Snapshot::reachable(
            "a.example",
            "b.example",
            200,
            Some("https://b.example/".to_string()),
        );

        let event = classify(Some(&previous), next);

        assert_eq!(redirect_target(&event), Some("b.example"));
    }

    #[test]
    fn test_redirect_target_on_initial_redirect() {
        let next = Snapshot::reachable("a.example", "b.example", 200, None);

        assert_eq!(redirect_target(&classify(None, next)), Some("b.example"));
    }

    #[test]
    fn test_no_redirect_target_when_unchanged() {
        let previous = Snapshot::reachable("a.example", "b.example", 200, None);
        let next = previous.clone();

        assert_eq!(redirect_target(&classify(Some(&previous), next)), None);
    }

    #[test]
    fn test_no_redirect_target_without_redirect() {
        let event = classify(Some(&live("a.example")), Snapshot::unreachable("a.example", "x"));

        assert_eq!(redirect_target(&event), None);
    }
}
