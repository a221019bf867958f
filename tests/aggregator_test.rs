//! Integration tests for the aggregation pass.

use chrono::{Duration, NaiveDateTime, Utc};
use serde_json::json;
use signing_stats::models::SigningLogRecord;
use signing_stats::services::aggregate;

fn record(requester: &str, revoked: bool, expires: NaiveDateTime) -> SigningLogRecord {
    SigningLogRecord {
        requester: requester.to_string(),
        revoked,
        expires,
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn future() -> NaiveDateTime {
    now() + Duration::days(90)
}

fn past() -> NaiveDateTime {
    now() - Duration::days(90)
}

/// A mixed dataset: two organisations, repeated requesters, every
/// classification represented.
fn mixed_input() -> Vec<SigningLogRecord> {
    vec![
        record("alice@example.org", false, future()),
        record("alice@example.org", true, future()),
        record("alice@example.org", false, past()),
        record("bob@example.org", true, future()),
        record("carol@example.org", false, past()),
        record("dave@other.net", false, future()),
    ]
}

#[test]
fn every_record_lands_in_exactly_one_profile_bucket() {
    let out = aggregate(mixed_input(), now());

    let example = &out["example.org"];
    assert_eq!(
        example.profiles.active + example.profiles.revoked + example.profiles.expired,
        5
    );
    let other = &out["other.net"];
    assert_eq!(
        other.profiles.active + other.profiles.revoked + other.profiles.expired,
        1
    );
}

#[test]
fn every_distinct_requester_lands_in_exactly_one_user_set() {
    let out = aggregate(mixed_input(), now());

    // example.org has three distinct requesters: alice (active, sticky),
    // bob (revoked only), carol (expired only).
    let example = &out["example.org"];
    assert_eq!(example.users.active, 1);
    assert_eq!(example.users.inactive, 2);
    assert_eq!(example.users.active + example.users.inactive, 3);
}

#[test]
fn aggregation_is_order_independent() {
    let forward = aggregate(mixed_input(), now());
    let mut reversed_input = mixed_input();
    reversed_input.reverse();
    let reversed = aggregate(reversed_input, now());

    assert_eq!(forward, reversed);
}

#[test]
fn reaggregation_is_idempotent() {
    assert_eq!(aggregate(mixed_input(), now()), aggregate(mixed_input(), now()));
}

#[test]
fn sticky_active_survives_later_revocation_and_expiry() {
    let input = vec![
        record("eve@org.example", true, future()),
        record("eve@org.example", false, past()),
        record("eve@org.example", false, future()),
        record("eve@org.example", true, past()),
    ];
    let out = aggregate(input, now());

    let summary = &out["org.example"];
    assert_eq!(summary.profiles.active, 1);
    assert_eq!(summary.profiles.revoked, 2);
    assert_eq!(summary.profiles.expired, 1);
    assert_eq!(summary.users.active, 1);
    assert_eq!(summary.users.inactive, 0);
}

#[test]
fn inactive_requester_is_counted_once_across_records() {
    let input = vec![
        record("frank@org.example", true, future()),
        record("frank@org.example", false, past()),
    ];
    let out = aggregate(input, now());

    let summary = &out["org.example"];
    assert_eq!(summary.users.inactive, 1);
    assert_eq!(summary.users.active, 0);
}

#[test]
fn summary_serializes_to_the_output_contract() {
    let out = aggregate(
        vec![
            record("alice@example.org", false, future()),
            record("bob@example.org", false, past()),
        ],
        now(),
    );

    assert_eq!(
        serde_json::to_value(&out).unwrap(),
        json!({
            "example.org": {
                "profiles": {"active": 1, "revoked": 0, "expired": 0},
                "users": {"active": 1, "inactive": 1}
            }
        })
    );
}

#[test]
fn empty_input_serializes_to_empty_document() {
    let out = aggregate(vec![], now());
    assert_eq!(serde_json::to_string(&out).unwrap(), "{}");
}
