//! Statically linked controller modules.

mod builtin;

pub use builtin::BuiltinControllers;
