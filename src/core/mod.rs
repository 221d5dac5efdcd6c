//! Core library components.
//!
//! This module contains the reusable vault logic: secret storage,
//! session encryption, credential management, and the staged login
//! transaction.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod gate;
pub mod jar;
pub mod keyvault;
pub mod probe;
pub mod store;
pub mod txn;
pub mod types;
