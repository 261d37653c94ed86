//! Application layer containing the authorization use cases.
//!
//! `AuthorizationFactory` turns raw requests into stored authorizations, and
//! `PaymentGateway` is the primary entry point that resolves identifiers and drives
//! captures, refunds and voids against the shared instances held in storage.

pub mod factory;
pub mod gateway;
