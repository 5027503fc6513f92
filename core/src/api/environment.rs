//! Environment builder for registering global names.

use ecow::EcoString;
use hashbrown::HashMap;

use super::Error;
use crate::types::{Signature, Type};
use crate::values::{NativeFn, NativeFunction, Value};
use crate::{String, format};

/// A global variable: its declared type and its value.
#[derive(Debug, Clone)]
pub struct Binding {
    pub ty: Type,
    pub value: Value,
}

/// The global environment: variables and functions visible to every
/// expression compiled with an engine.
///
/// Variables and functions share one namespace.
#[derive(Debug, Default)]
pub struct Environment {
    variables: HashMap<EcoString, Binding>,
    functions: HashMap<EcoString, NativeFunction>,
}

impl Environment {
    pub fn variable(&self, name: &str) -> Option<&Binding> {
        self.variables.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&NativeFunction> {
        self.functions.get(name)
    }

    /// Signature of the function registered under `name`.
    pub fn signature_of(&self, name: &str) -> Option<&Signature> {
        self.functions.get(name).map(NativeFunction::signature)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name) || self.functions.contains_key(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.variables.len() + self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builder for constructing the global environment.
///
/// # Example
///
/// ```
/// use graft_core::api::{Engine, EngineOptions};
/// use graft_core::types::{Kind, Type};
/// use graft_core::values::Value;
///
/// let engine = Engine::new(EngineOptions::default(), |env| {
///     let celsius = Type::named("Celsius", Kind::Float64);
///     env.variable("temp", celsius.clone(), Value::named(celsius, Value::Float(21.5)))?;
///     Ok(())
/// })
/// .unwrap();
/// assert!(engine.environment().contains("temp"));
/// ```
#[derive(Debug, Default)]
pub struct EnvironmentBuilder {
    env: Environment,
}

impl EnvironmentBuilder {
    /// Create a new environment builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a global variable of declared type `ty`.
    ///
    /// Returns an error if the name is already taken.
    pub fn variable(&mut self, name: &str, ty: Type, value: Value) -> Result<(), Error> {
        self.check_free(name)?;
        self.env
            .variables
            .insert(EcoString::from(name), Binding { ty, value });
        Ok(())
    }

    /// Register a host function under `name`.
    ///
    /// Returns an error if the name is already taken.
    pub fn function(&mut self, name: &str, signature: Signature, func: NativeFn) -> Result<(), Error> {
        self.check_free(name)?;
        self.env
            .functions
            .insert(EcoString::from(name), NativeFunction::new(signature, func));
        Ok(())
    }

    fn check_free(&self, name: &str) -> Result<(), Error> {
        if self.env.contains(name) {
            return Err(Error::Api(format!("Duplicate registration of '{}'", name)));
        }
        if name.is_empty() {
            return Err(Error::Api(String::from("Empty name in registration")));
        }
        Ok(())
    }

    /// Build the final environment.
    ///
    /// This is called internally by Engine::new().
    pub(crate) fn build(self) -> Environment {
        self.env
    }
}
