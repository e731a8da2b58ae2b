//! Store gateways: the narrow persistence boundary view-models depend on.
//!
//! # Responsibility
//! - Define the `EntityStore` contract (get-all, get-by-id, create, update,
//!   delete) and the catalog uniqueness query.
//! - Keep SQL details inside SQLite implementations.
//!
//! # Invariants
//! - Write paths call `Entity::validate()` before SQL mutations.
//! - Every write runs in its own immediate transaction.
//! - Missing rows surface as `StoreError::NotFound`, never as silent no-ops.

pub mod catalog_repo;
pub mod event_repo;
pub mod store;
pub mod work_request_repo;
