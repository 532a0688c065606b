pub mod auth;
pub mod authorize;
pub mod rate_limit;
pub mod response;
