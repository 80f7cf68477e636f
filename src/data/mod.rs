//! Input loading and preprocessing

pub mod adjlist;
pub mod preprocessing;
