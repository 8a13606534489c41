//! Shared constants for end-to-end tests

#![allow(dead_code)]

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

pub const TECHNO_TRACK_ID: &str = "trk-techno";
pub const POP_TRACK_ID: &str = "trk-pop";
pub const UA_TRACK_ID: &str = "trk-ua";
