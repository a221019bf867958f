//! Domain models for signing-stats.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use std::collections::HashSet;

/// One row of the `realm_signing_log` table.
///
/// The organisation a record belongs to is derived from `requester`, the part
/// after the first `@`. A requester without an `@` forms a single-member
/// organisation keyed by the full requester string.
#[derive(Debug, Clone, FromRow)]
pub struct SigningLogRecord {
    pub requester: String,
    pub revoked: bool,
    pub expires: NaiveDateTime,
}

impl SigningLogRecord {
    pub fn organisation(&self) -> &str {
        match self.requester.split_once('@') {
            Some((_, org)) => org,
            None => &self.requester,
        }
    }
}

/// Per-record classification. Every record lands in exactly one bucket;
/// revocation takes priority over expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Active,
    Revoked,
    Expired,
}

/// Profile counters for one organisation, one increment per record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrganizationProfile {
    pub active: u64,
    pub revoked: u64,
    pub expired: u64,
}

/// Requester membership sets for one organisation.
///
/// A requester is in at most one set: a single active record anywhere in the
/// input marks the requester active for the whole run.
#[derive(Debug, Clone, Default)]
pub struct OrganizationUsers {
    pub active: HashSet<String>,
    pub inactive: HashSet<String>,
}

/// Distinct-requester counts derived from [`OrganizationUsers`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserCounts {
    pub active: u64,
    pub inactive: u64,
}

/// Final per-organisation aggregate: profile counters plus requester-set
/// cardinalities. Serializes to the JSON document printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrganizationSummary {
    pub profiles: OrganizationProfile,
    pub users: UserCounts,
}
