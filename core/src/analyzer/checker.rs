use crate::analyzer::{TypeError, TypeErrorKind};
use crate::api::environment::Environment;
use crate::ast::{Node, NodeKind};
use crate::parser::{BinaryOp, UnaryOp};
use crate::stdlib;
use crate::types::{Kind, Signature, Type, TypeResolver, resolve_tree};
use crate::{ToString, Vec};

/// Resolve every node of the tree rooted at `root` against `env`.
///
/// This is the initial typing pass run on a freshly parsed tree, before
/// any rewrite rule sees it.
pub fn analyze(env: &Environment, root: &mut Node) -> Result<Type, TypeError> {
    resolve_tree(&Checker::new(env), root)
}

/// Types nodes against a global environment.
///
/// Identifier types come from the environment; call results from the
/// signatures registered there; builtin results from the builtin table;
/// operators are typed by kind family.
pub struct Checker<'env> {
    env: &'env Environment,
}

impl<'env> Checker<'env> {
    pub fn new(env: &'env Environment) -> Self {
        Self { env }
    }

    fn identifier(&self, node: &Node, name: &str) -> Result<Type, TypeError> {
        if let Some(binding) = self.env.variable(name) {
            Ok(binding.ty.clone())
        } else if self.env.function(name).is_some() {
            Ok(Type::basic(Kind::Func))
        } else {
            Err(error(
                node,
                TypeErrorKind::UnboundVariable {
                    name: name.to_string(),
                },
            ))
        }
    }

    fn call(&self, node: &Node, callee: &Node, args: &[Node]) -> Result<Type, TypeError> {
        let Some(name) = node.callee_name() else {
            let ty = child_type(callee)?;
            return Err(error(node, TypeErrorKind::NotCallable { ty: ty.to_string() }));
        };

        let Some(signature) = self.env.signature_of(name) else {
            let kind = match self.env.variable(name) {
                Some(binding) => TypeErrorKind::NotCallable {
                    ty: binding.ty.to_string(),
                },
                None => TypeErrorKind::UnknownCallable {
                    name: name.to_string(),
                },
            };
            return Err(error(node, kind));
        };

        let arg_types = child_types(args)?;
        self.resolve_call_result(name, signature, &arg_types, node.span.as_ref())
    }
}

impl TypeResolver for Checker<'_> {
    fn resolve(&self, node: &Node) -> Result<Type, TypeError> {
        match &node.kind {
            NodeKind::Identifier(name) => self.identifier(node, name),
            NodeKind::Literal(literal) => Ok(literal.ty()),
            NodeKind::Unary { op, operand } => unary(node, *op, &child_type(operand)?),
            NodeKind::Binary { op, left, right } => {
                binary(node, *op, &child_type(left)?, &child_type(right)?)
            }
            NodeKind::Call { callee, args } => self.call(node, callee, args),
            NodeKind::BuiltinCall { name, args } => {
                stdlib::builtin_result(name, &child_types(args)?, node.span.as_ref())
            }
            NodeKind::Member { object, property } => {
                let ty = child_type(object)?;
                match ty.kind() {
                    Kind::Map | Kind::Struct | Kind::Interface => Ok(Type::any()),
                    _ => Err(error(
                        node,
                        TypeErrorKind::NoMembers {
                            ty: ty.to_string(),
                            property: property.to_string(),
                        },
                    )),
                }
            }
            NodeKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond_ty = child_type(cond)?;
                if cond_ty.kind() != Kind::Bool && !cond_ty.is_any() {
                    return Err(error(
                        node,
                        TypeErrorKind::ConditionNotBool {
                            found: cond_ty.to_string(),
                        },
                    ));
                }
                let then_ty = child_type(then_branch)?;
                match else_branch {
                    Some(else_branch) if child_type(else_branch)? == then_ty => Ok(then_ty),
                    _ => Ok(Type::any()),
                }
            }
            NodeKind::Sequence(_) => Ok(Type::basic(Kind::Array)),
            NodeKind::Map(_) => Ok(Type::basic(Kind::Map)),
        }
    }

    fn signature_of(&self, name: &str) -> Option<&Signature> {
        self.env.signature_of(name)
    }
}

fn unary(node: &Node, op: UnaryOp, operand: &Type) -> Result<Type, TypeError> {
    let ok = match op {
        UnaryOp::Not => operand.kind() == Kind::Bool,
        UnaryOp::Neg => operand.kind().is_numeric(),
    };
    if ok || operand.is_any() {
        return Ok(match op {
            UnaryOp::Not => Type::bool(),
            UnaryOp::Neg => operand.clone(),
        });
    }
    Err(error(
        node,
        TypeErrorKind::InvalidOperand {
            op: op.as_str(),
            operand: operand.to_string(),
        },
    ))
}

fn binary(node: &Node, op: BinaryOp, left: &Type, right: &Type) -> Result<Type, TypeError> {
    let (l, r) = (left.kind(), right.kind());
    let dynamic = left.is_any() || right.is_any();

    let result = match op {
        BinaryOp::Eq | BinaryOp::Ne => Some(Type::bool()),
        BinaryOp::And | BinaryOp::Or => {
            let is_bool = |ty: &Type| ty.kind() == Kind::Bool || ty.is_any();
            (is_bool(left) && is_bool(right)).then(Type::bool)
        }
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let comparable = (l.is_numeric() && r.is_numeric())
                || (l == Kind::String && r == Kind::String)
                || dynamic;
            comparable.then(Type::bool)
        }
        BinaryOp::Add if l == Kind::String && r == Kind::String => Some(Type::string()),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            if dynamic {
                Some(Type::any())
            } else if l.is_integer() && r.is_integer() {
                Some(Type::int())
            } else if l.is_numeric() && r.is_numeric() {
                Some(Type::float())
            } else {
                None
            }
        }
    };

    result.ok_or_else(|| {
        error(
            node,
            TypeErrorKind::InvalidOperands {
                op: op.as_str(),
                left: left.to_string(),
                right: right.to_string(),
            },
        )
    })
}

fn child_type(child: &Node) -> Result<Type, TypeError> {
    child
        .ty
        .clone()
        .ok_or_else(|| TypeError::new(TypeErrorKind::UnresolvedChild, child.span.clone()))
}

fn child_types(children: &[Node]) -> Result<Vec<Type>, TypeError> {
    children.iter().map(child_type).collect()
}

fn error(node: &Node, kind: TypeErrorKind) -> TypeError {
    TypeError::new(kind, node.span.clone())
}
