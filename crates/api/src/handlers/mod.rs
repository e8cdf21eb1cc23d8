pub mod airdrops;
pub mod cache;
