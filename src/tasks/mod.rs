//! Background Tasks Module
//!
//! Optional tasks an application can run next to a shared cache.
//!
//! # Tasks
//! - Purge: removes expired entries at a fixed interval

mod purge;

pub use purge::spawn_purge_task;
