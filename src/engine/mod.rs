//! Reference query engine.
//!
//! [`simulate`] defines what correct search, filtering, sorting and
//! pagination mean over an in-memory collection. It backs
//! [`InMemorySource`](crate::InMemorySource) and is the yardstick a real
//! backend is validated against.
//!
//! Records expose their fields through [`Queryable`]. It is implemented for
//! `serde_json::Value` objects, for the record types in
//! [`models`](crate::models), and can be derived with
//! `#[derive(Queryable)]` (feature `derive`).

mod record;
mod simulate;

pub use record::Queryable;
pub use simulate::simulate;
