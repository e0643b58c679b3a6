//! Domain types and pure logic for the travel wishlist.
//!
//! Nothing in this crate touches storage or HTTP; the `db` and `api` crates
//! build on these types and validation helpers.

pub mod destination;
pub mod error;
pub mod ranking;
pub mod types;
