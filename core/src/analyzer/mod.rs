pub mod checker;
pub mod error;

#[cfg(test)]
mod checker_test;

pub use checker::{Checker, analyze};
pub use error::{TypeError, TypeErrorKind};
