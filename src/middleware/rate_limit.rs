use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::state::AppState;

const THROTTLE_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Fixed-window request counter per client address. Addresses that stay
/// quiet for a full window are swept from the map, so memory is bounded by
/// the number of clients active within one window.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    buckets: Mutex<Buckets>,
}

struct Buckets {
    map: HashMap<IpAddr, Bucket>,
    last_sweep: Instant,
}

struct Bucket {
    window_start: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            buckets: Mutex::new(Buckets {
                map: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    /// Record one request from `addr`; false once the window is exhausted.
    pub fn allow(&self, addr: IpAddr) -> bool {
        let now = Instant::now();
        let mut buckets = self.buckets.lock().expect("rate limiter lock poisoned");

        if now.duration_since(buckets.last_sweep) >= self.window {
            let window = self.window;
            buckets
                .map
                .retain(|_, b| now.duration_since(b.window_start) < window);
            buckets.last_sweep = now;
        }

        let bucket = buckets.map.entry(addr).or_insert(Bucket {
            window_start: now,
            count: 0,
        });

        if now.duration_since(bucket.window_start) >= self.window {
            bucket.window_start = now;
            bucket.count = 0;
        }

        bucket.count += 1;
        bucket.count <= self.max_requests
    }

    #[cfg(test)]
    fn tracked_addresses(&self) -> usize {
        self.buckets
            .lock()
            .expect("rate limiter lock poisoned")
            .map
            .len()
    }
}

/// Throttling middleware for the versioned API surface. Responds with a
/// plain-text 429 once a client exceeds the configured ceiling.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.api.enable_rate_limiting {
        return next.run(request).await;
    }

    // ConnectInfo is absent when the router is driven directly (tests);
    // those requests share one bucket.
    let addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if !state.limiter.allow(addr) {
        return (StatusCode::TOO_MANY_REQUESTS, THROTTLE_MESSAGE).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_is_enforced_per_address() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let a = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let b = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

        assert!(limiter.allow(a));
        assert!(limiter.allow(a));
        assert!(limiter.allow(a));
        assert!(!limiter.allow(a));

        // A different client still has its own budget.
        assert!(limiter.allow(b));
    }

    #[test]
    fn window_resets_after_it_elapses() {
        let limiter = RateLimiter::new(1, Duration::from_millis(10));
        let a = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));

        assert!(limiter.allow(a));
        assert!(!limiter.allow(a));

        std::thread::sleep(Duration::from_millis(15));
        assert!(limiter.allow(a));
    }

    #[test]
    fn idle_addresses_are_swept_after_a_window() {
        let limiter = RateLimiter::new(5, Duration::from_millis(10));
        let a = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let b = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

        assert!(limiter.allow(a));
        assert_eq!(limiter.tracked_addresses(), 1);

        // A full window of silence later, the next request evicts `a`.
        std::thread::sleep(Duration::from_millis(15));
        assert!(limiter.allow(b));
        assert_eq!(limiter.tracked_addresses(), 1);
    }
}
