//! Shared helpers.

mod plural;

pub use plural::plural_count;
