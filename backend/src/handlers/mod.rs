//! HTTP handlers for the Warehouse Management API

pub mod inventory;
pub mod message;
pub mod task;
pub mod transaction;

pub use inventory::*;
pub use message::*;
pub use task::*;
pub use transaction::*;
