//! Business logic services for the Warehouse Management backend

pub mod inventory;
pub mod message;
pub mod task;
pub mod transaction;

pub use inventory::InventoryService;
pub use task::TaskService;
pub use transaction::TransactionService;
