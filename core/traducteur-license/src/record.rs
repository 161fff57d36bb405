//! The persisted activation record.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Validity granted when the service does not send an expiry.
pub const DEFAULT_ACTIVATION_DAYS: i64 = 365;

/// Proof that this installation was activated.
///
/// Serialized as `{userId, expiresAt, activatedAt}` with RFC 3339 timestamps.
/// `activated_at <= expires_at` is expected but not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRecord {
    /// Opaque identifier returned by the activation service.
    pub user_id: String,
    /// Absolute expiry; the record is invalid once `now >= expires_at`.
    pub expires_at: DateTime<Utc>,
    /// When the record was created locally.
    pub activated_at: DateTime<Utc>,
}

impl ActivationRecord {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        activated_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            expires_at,
            activated_at,
        }
    }

    /// Builds the record for a successful activation at `now`.
    ///
    /// Uses the server's `expires_at` when present and parseable, otherwise
    /// `now + DEFAULT_ACTIVATION_DAYS`. ISO 8601 values without an offset
    /// are read as UTC; a bare date means midnight UTC.
    #[must_use]
    pub fn from_grant(
        user_id: impl Into<String>,
        server_expires_at: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        let fallback = now + Duration::days(DEFAULT_ACTIVATION_DAYS);
        let expires_at = match server_expires_at.map(str::trim).filter(|s| !s.is_empty()) {
            None => fallback,
            Some(raw) => parse_server_expiry(raw).unwrap_or_else(|| {
                warn!("Ignoring unparseable server expiry {:?}", raw);
                fallback
            }),
        };

        Self::new(user_id, now, expires_at)
    }

    /// Returns true once `now` has reached the expiry.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Time left before expiry, or `None` if already expired.
    #[must_use]
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        if self.is_expired_at(now) {
            None
        } else {
            Some(self.expires_at - now)
        }
    }
}

/// RFC 3339, then offset-less date-time, then bare date.
fn parse_server_expiry(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
