use std::time::Duration;

use chrono::{DateTime, Utc};
use url::Url;
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

#[derive(Clone, Debug, Default)]
pub struct DietCoachConfig {
    pub webhook: WebhookConfig,
}

#[derive(Clone, Debug, Default)]
pub struct WebhookConfig {
    /// `None` is a valid deployment state; relays then fail with `Misconfigured`.
    pub url: Option<Url>,
    /// No timeout unless set, the transport decides when to give up.
    pub timeout: Option<Duration>,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let nanos = now.timestamp_subsec_nanos();
    let timestamp = Timestamp::from_unix(NoContext, seconds, nanos);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
