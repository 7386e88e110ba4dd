//! Grammar productions, split by area. All productions are methods on
//! [`Parser`](super::core::Parser); the split is purely organizational.

mod constructors;
mod exprs;
mod module;
mod names;
mod types;
