//! Value objects shared by pools, rules and results.

mod range;
mod role;

pub use range::RangeKind;
pub use role::RoleMode;
