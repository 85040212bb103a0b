//! Integration tests for the disk adapter
//!
//! All tests run against a wiremock-based mock of the disk REST API; no
//! real network access is required.

mod common;

mod test_credentials;
mod test_listing;
mod test_transfer;
