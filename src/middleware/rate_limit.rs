//! Per-client rate limiting for submission routes

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;
use crate::error::AppError;

type KeyedLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Token bucket per client IP
pub struct SubmissionLimiter {
    limiter: KeyedLimiter,
}

impl SubmissionLimiter {
    /// Build a limiter from configuration; `None` when disabled
    pub fn from_config(config: &RateLimitConfig) -> Option<Arc<Self>> {
        if !config.enabled {
            return None;
        }

        let per_minute = NonZeroU32::new(config.requests_per_minute)?;
        let burst = NonZeroU32::new(config.burst_size)?;
        let quota = Quota::per_minute(per_minute).allow_burst(burst);

        Some(Arc::new(Self {
            limiter: RateLimiter::keyed(quota),
        }))
    }

    pub fn check(&self, client: IpAddr) -> bool {
        self.limiter.check_key(&client).is_ok()
    }

    /// Number of clients currently tracked
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }

    /// Drop buckets that have fully refilled
    pub fn prune(&self) {
        let before = self.limiter.len();
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        debug!(
            before = before,
            after = self.limiter.len(),
            "Pruned rate limiter state"
        );
    }

    /// Prune on a fixed interval until the limiter is dropped
    pub fn spawn_pruner(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let limiter: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match limiter.upgrade() {
                    Some(limiter) => limiter.prune(),
                    None => break,
                }
            }
        })
    }
}

/// Axum middleware rejecting clients over their quota with 429
pub async fn rate_limit(
    State(limiter): State<Arc<SubmissionLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    // In-process callers (tests) have no peer address and share one bucket.
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if !limiter.check(client) {
        warn!(client = %client, path = %request.uri().path(), "Rate limit exceeded");
        return AppError::RateLimited.into_response();
    }

    next.run(request).await
}
