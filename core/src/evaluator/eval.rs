//! Core evaluation logic.

use crate::{
    ToString, Vec,
    api::{ExecutionOptions, environment::Environment},
    ast::{Literal, MapEntry, Node, NodeKind},
    evaluator::{
        ExecutionError, ExecutionErrorKind,
        ResourceExceededError::*,
        RuntimeError::{self, *},
        operators,
    },
    parser::{BinaryOp, UnaryOp},
    stdlib,
    values::Value,
};

/// Tree-walking evaluator over a typed (and possibly rewritten) tree.
pub struct Evaluator<'env> {
    env: &'env Environment,
    options: ExecutionOptions,
    depth: usize,
}

impl<'env> Evaluator<'env> {
    pub fn new(env: &'env Environment, options: ExecutionOptions) -> Self {
        Self {
            env,
            options,
            depth: 0,
        }
    }

    fn error(&self, node: &Node, kind: ExecutionErrorKind) -> ExecutionError {
        ExecutionError::new(kind, node.span.clone())
    }

    /// Evaluate `node`, tracking recursion depth.
    pub fn eval(&mut self, node: &Node) -> Result<Value, ExecutionError> {
        // Check depth before recursing
        if self.depth >= self.options.max_depth {
            return Err(self.error(
                node,
                StackOverflow {
                    depth: self.depth,
                    max_depth: self.options.max_depth,
                }
                .into(),
            ));
        }

        self.depth += 1;
        let result = self.eval_inner(node);
        self.depth -= 1;

        result
    }

    /// Inner evaluation logic (no depth tracking).
    fn eval_inner(&mut self, node: &Node) -> Result<Value, ExecutionError> {
        match &node.kind {
            NodeKind::Identifier(name) => {
                if let Some(binding) = self.env.variable(name) {
                    Ok(binding.value.clone())
                } else if self.env.function(name).is_some() {
                    Ok(Value::Function(name.clone()))
                } else {
                    Err(self.error(
                        node,
                        UndefinedVariable {
                            name: name.to_string(),
                        }
                        .into(),
                    ))
                }
            }

            NodeKind::Literal(literal) => Ok(match literal {
                Literal::Int(i) => Value::Int(*i),
                Literal::Float(x) => Value::Float(*x),
                Literal::Str(s) => Value::Str(s.clone()),
                Literal::Bool(b) => Value::Bool(*b),
                Literal::Nil => Value::Nil,
            }),

            NodeKind::Unary { op, operand } => {
                let value = self.eval(operand)?;
                self.unary(node, *op, value)
            }

            NodeKind::Binary { op, left, right } => self.binary(node, *op, left, right),

            NodeKind::Call { callee, args } => {
                let callee_value = self.eval(callee)?;
                let Value::Function(name) = callee_value else {
                    return Err(self.error(
                        node,
                        InvalidOperand {
                            op: "()",
                            operand: callee_value.type_name().to_string(),
                        }
                        .into(),
                    ));
                };
                let Some(function) = self.env.function(&name) else {
                    return Err(self.error(
                        node,
                        UnknownFunction {
                            name: name.to_string(),
                        }
                        .into(),
                    ));
                };
                let args = self.eval_all(args)?;
                tracing::trace!(callee = %name, argc = args.len(), "calling host function");
                function
                    .call(&args)
                    .map_err(|e| self.error(node, e.into()))
            }

            NodeKind::BuiltinCall { name, args } => {
                let args = self.eval_all(args)?;
                stdlib::call_builtin(name, &args).map_err(|e| self.error(node, e.into()))
            }

            NodeKind::Member { object, property } => {
                match self.eval(object)?.into_basic() {
                    Value::Map(entries) => Ok(entries
                        .into_iter()
                        .find(|(key, _)| key.as_str() == Some(property.as_str()))
                        .map(|(_, value)| value)
                        .unwrap_or(Value::Nil)),
                    other => Err(self.error(
                        node,
                        InvalidOperand {
                            op: ".",
                            operand: other.type_name().to_string(),
                        }
                        .into(),
                    )),
                }
            }

            NodeKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond_value = self.eval(cond)?;
                match cond_value.as_bool() {
                    Some(true) => self.eval(then_branch),
                    Some(false) => match else_branch {
                        Some(else_branch) => self.eval(else_branch),
                        None => Ok(Value::Nil),
                    },
                    None => Err(self.error(
                        cond,
                        ConditionNotBool {
                            found: cond_value.type_name().to_string(),
                        }
                        .into(),
                    )),
                }
            }

            NodeKind::Sequence(items) => Ok(Value::Array(self.eval_all(items)?)),

            NodeKind::Map(entries) => {
                let mut pairs = Vec::with_capacity(entries.len());
                for MapEntry { key, value } in entries {
                    pairs.push((self.eval(key)?, self.eval(value)?));
                }
                Ok(Value::Map(pairs))
            }
        }
    }

    fn eval_all(&mut self, nodes: &[Node]) -> Result<Vec<Value>, ExecutionError> {
        nodes.iter().map(|node| self.eval(node)).collect()
    }

    fn unary(&self, node: &Node, op: UnaryOp, value: Value) -> Result<Value, ExecutionError> {
        let result = match (op, &value) {
            (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (UnaryOp::Neg, Value::Int(i)) => i
                .checked_neg()
                .map(Value::Int)
                .ok_or(IntegerOverflow { op: "-" }),
            (UnaryOp::Neg, Value::Uint(u)) => i64::try_from(*u)
                .map(|i| Value::Int(-i))
                .map_err(|_| IntegerOverflow { op: "-" }),
            (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
            _ => Err(InvalidOperand {
                op: op.as_str(),
                operand: value.type_name().to_string(),
            }),
        };
        result.map_err(|e| self.error(node, e.into()))
    }

    fn binary(
        &mut self,
        node: &Node,
        op: BinaryOp,
        left: &Node,
        right: &Node,
    ) -> Result<Value, ExecutionError> {
        if op.is_logical() {
            return self.logical(node, op, left, right);
        }

        let left = self.eval(left)?;
        let right = self.eval(right)?;
        let result = if op.is_equality() {
            let equal = left.loose_eq(&right);
            Ok(Value::Bool(if op == BinaryOp::Eq { equal } else { !equal }))
        } else if op.is_ordering() {
            operators::ordering(op, &left, &right)
        } else {
            operators::arithmetic(op, &left, &right)
        };
        result.map_err(|e| self.error(node, e.into()))
    }

    /// `&&` and `||`, short-circuiting on the left operand.
    fn logical(
        &mut self,
        node: &Node,
        op: BinaryOp,
        left: &Node,
        right: &Node,
    ) -> Result<Value, ExecutionError> {
        let lhs = self.eval(left)?;
        let Some(lhs_bool) = lhs.as_bool() else {
            return Err(self.logical_error(node, op, &lhs, None));
        };
        // false && _ = false, true || _ = true
        if lhs_bool == (op == BinaryOp::Or) {
            return Ok(Value::Bool(lhs_bool));
        }

        let rhs = self.eval(right)?;
        match rhs.as_bool() {
            Some(b) => Ok(Value::Bool(b)),
            None => Err(self.logical_error(node, op, &lhs, Some(&rhs))),
        }
    }

    fn logical_error(
        &self,
        node: &Node,
        op: BinaryOp,
        lhs: &Value,
        rhs: Option<&Value>,
    ) -> ExecutionError {
        let error: RuntimeError = operators::operands(op, lhs, rhs.unwrap_or(&Value::Bool(false)));
        self.error(node, error.into())
    }
}
