//! Single-pass aggregation of signing-log records into per-organisation summaries.

use crate::models::{
    Classification, OrganizationProfile, OrganizationSummary, OrganizationUsers, SigningLogRecord,
    UserCounts,
};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Classify a record. Revocation wins over expiry when both hold.
pub fn classify(record: &SigningLogRecord, now: NaiveDateTime) -> Classification {
    if record.revoked {
        Classification::Revoked
    } else if now > record.expires {
        Classification::Expired
    } else {
        Classification::Active
    }
}

/// Aggregate a full record set into one summary per organisation.
///
/// `now` is captured once by the caller and applied to every record, so a
/// record cannot expire halfway through the pass.
///
/// Requester membership is sticky-active: one active record anywhere in the
/// input keeps the requester in the active set no matter how many revoked or
/// expired records it has, and independent of input order. This is why the
/// inactive branch checks the active set first instead of overwriting.
pub fn aggregate(
    records: Vec<SigningLogRecord>,
    now: NaiveDateTime,
) -> BTreeMap<String, OrganizationSummary> {
    let mut profiles: BTreeMap<String, OrganizationProfile> = BTreeMap::new();
    let mut users: BTreeMap<String, OrganizationUsers> = BTreeMap::new();

    for record in records {
        let org = record.organisation().to_string();
        let profile = profiles.entry(org.clone()).or_default();
        let members = users.entry(org).or_default();

        let classification = classify(&record, now);
        match classification {
            Classification::Revoked => profile.revoked += 1,
            Classification::Expired => profile.expired += 1,
            Classification::Active => profile.active += 1,
        }

        if classification == Classification::Active {
            members.active.insert(record.requester.clone());
            members.inactive.remove(&record.requester);
        } else if !members.active.contains(&record.requester) {
            members.inactive.insert(record.requester);
        }
    }

    profiles
        .into_iter()
        .map(|(org, profile)| {
            let members = users.remove(&org).unwrap_or_default();
            let summary = OrganizationSummary {
                profiles: profile,
                users: UserCounts {
                    active: members.active.len() as u64,
                    inactive: members.inactive.len() as u64,
                },
            };
            (org, summary)
        })
        .collect()
}
