//! Core domain concepts shared across all subdomains.
//!
//! - [`identity`]: participants, groups, transport addresses and credentials
//! - [`scope::Scope`]: which members of a group a message is addressed to
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod identity;
pub mod scope;
