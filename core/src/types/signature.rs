//! Call signatures for registered callables.

use core::fmt;

use super::Type;
use crate::Vec;

/// What a call to a signature evaluates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Returns {
    /// The declared return type, used as-is.
    Declared(Type),
    /// The basic type underlying the argument at this position.
    UnderlyingOf(usize),
}

/// Parameter and return types of a callable.
///
/// A variadic signature repeats its last parameter for every trailing
/// argument. A parameter of the `interface` kind accepts any argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Type>,
    pub variadic: bool,
    pub returns: Returns,
}

impl Signature {
    pub fn new(params: Vec<Type>, ret: Type) -> Self {
        Self {
            params,
            variadic: false,
            returns: Returns::Declared(ret),
        }
    }

    pub fn variadic(params: Vec<Type>, ret: Type) -> Self {
        Self {
            params,
            variadic: true,
            returns: Returns::Declared(ret),
        }
    }

    pub fn with_returns(mut self, returns: Returns) -> Self {
        self.returns = returns;
        self
    }

    /// Number of parameters that must always be supplied.
    pub fn required(&self) -> usize {
        if self.variadic {
            self.params.len().saturating_sub(1)
        } else {
            self.params.len()
        }
    }

    /// Declared type of the parameter receiving argument `index`.
    pub fn param_for(&self, index: usize) -> Option<&Type> {
        match self.params.get(index) {
            Some(param) if !self.variadic || index < self.required() => Some(param),
            _ if self.variadic => self.params.last(),
            _ => None,
        }
    }

    pub fn accepts(param: &Type, arg: &Type) -> bool {
        param.is_any() || param == arg
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if self.variadic && i + 1 == self.params.len() {
                write!(f, "...")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")?;
        match &self.returns {
            Returns::Declared(ret) => write!(f, " {}", ret),
            Returns::UnderlyingOf(index) => write!(f, " underlying(${})", index),
        }
    }
}
