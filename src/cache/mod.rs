//! Cache module for memoized request responses
//!
//! This module provides an in-memory store mapping request fingerprints to
//! cached values with absolute expiry timestamps. Entries past their expiry
//! are never served as hits and are removed by a lazy sweep pass; the store
//! itself holds no background timers.

mod store;

pub use store::{CacheEntry, CacheStore};
