//! Integration scenarios for the salted Bloom filter

pub mod scenarios;
pub mod sharing;
