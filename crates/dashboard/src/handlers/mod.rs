//! API handlers module

pub mod explore;
pub mod health;
pub mod options;
pub mod page;
