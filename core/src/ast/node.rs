use ecow::EcoString;
use smallvec::{SmallVec, smallvec};

use super::slot::Slot;
use crate::parser::{BinaryOp, Span, UnaryOp};
use crate::types::{Kind, Type};
use crate::{Box, Vec};

/// One node of the typed syntax tree.
///
/// A node owns its children. `ty` is `None` until type resolution has run
/// over the node, and again after the node has been patched.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub ty: Option<Type>,
    pub span: Option<Span>,
    /// Pass number of the last walk that visited this node (0 = never).
    pub(crate) visited: u32,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.ty == other.ty && self.span == other.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Identifier(EcoString),
    Literal(Literal),
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    BuiltinCall {
        name: EcoString,
        args: Vec<Node>,
    },
    Member {
        object: Box<Node>,
        property: EcoString,
    },
    Conditional {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Option<Box<Node>>,
    },
    Sequence(Vec<Node>),
    Map(Vec<MapEntry>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: Node,
    pub value: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(EcoString),
    Bool(bool),
    Nil,
}

impl Literal {
    pub fn ty(&self) -> Type {
        match self {
            Literal::Int(_) => Type::int(),
            Literal::Float(_) => Type::float(),
            Literal::Str(_) => Type::string(),
            Literal::Bool(_) => Type::bool(),
            Literal::Nil => Type::nil(),
        }
    }
}

impl NodeKind {
    /// Name of the variant, for logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Literal(_) => "Literal",
            NodeKind::Unary { .. } => "UnaryOp",
            NodeKind::Binary { .. } => "BinaryOp",
            NodeKind::Call { .. } => "Call",
            NodeKind::BuiltinCall { .. } => "BuiltinCall",
            NodeKind::Member { .. } => "MemberAccess",
            NodeKind::Conditional { .. } => "Conditional",
            NodeKind::Sequence(_) => "SequenceLiteral",
            NodeKind::Map(_) => "MapLiteral",
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            ty: None,
            span: None,
            visited: 0,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_type(mut self, ty: Type) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn ident(name: impl Into<EcoString>) -> Self {
        Self::new(NodeKind::Identifier(name.into()))
    }

    pub fn literal(literal: Literal) -> Self {
        Self::new(NodeKind::Literal(literal))
    }

    pub fn int(value: i64) -> Self {
        Self::literal(Literal::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Self::literal(Literal::Float(value))
    }

    pub fn str(value: impl Into<EcoString>) -> Self {
        Self::literal(Literal::Str(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        Self::literal(Literal::Bool(value))
    }

    pub fn nil() -> Self {
        Self::literal(Literal::Nil)
    }

    pub fn unary(op: UnaryOp, operand: Node) -> Self {
        Self::new(NodeKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Self::new(NodeKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Call to the callable registered under `name`.
    pub fn call(name: impl Into<EcoString>, args: Vec<Node>) -> Self {
        Self::new(NodeKind::Call {
            callee: Box::new(Self::ident(name)),
            args,
        })
    }

    pub fn builtin(name: impl Into<EcoString>, args: Vec<Node>) -> Self {
        Self::new(NodeKind::BuiltinCall {
            name: name.into(),
            args,
        })
    }

    pub fn member(object: Node, property: impl Into<EcoString>) -> Self {
        Self::new(NodeKind::Member {
            object: Box::new(object),
            property: property.into(),
        })
    }

    pub fn conditional(cond: Node, then_branch: Node, else_branch: Option<Node>) -> Self {
        Self::new(NodeKind::Conditional {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        })
    }

    pub fn sequence(elements: Vec<Node>) -> Self {
        Self::new(NodeKind::Sequence(elements))
    }

    pub fn map(entries: Vec<(Node, Node)>) -> Self {
        Self::new(NodeKind::Map(
            entries
                .into_iter()
                .map(|(key, value)| MapEntry { key, value })
                .collect(),
        ))
    }

    /// Kind of the resolved type, if resolved.
    pub fn type_kind(&self) -> Option<Kind> {
        self.ty.as_ref().map(Type::kind)
    }

    /// Name of the callable when this is a call through a plain identifier.
    pub fn callee_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Call { callee, .. } => match &callee.kind {
                NodeKind::Identifier(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    /// Drop the cached type so that it is recomputed on next lookup.
    pub fn invalidate(&mut self) {
        self.ty = None;
    }

    /// Mutable access to every child position, in evaluation order.
    pub fn slots(&mut self) -> SmallVec<[Slot<'_>; 4]> {
        match &mut self.kind {
            NodeKind::Identifier(_) | NodeKind::Literal(_) => SmallVec::new(),
            NodeKind::Unary { operand, .. } => smallvec![Slot::Field(&mut **operand)],
            NodeKind::Binary { left, right, .. } => {
                smallvec![Slot::Field(&mut **left), Slot::Field(&mut **right)]
            }
            NodeKind::Call { callee, args } => {
                let mut slots: SmallVec<[Slot<'_>; 4]> = smallvec![Slot::Field(&mut **callee)];
                slots.extend(elements(args));
                slots
            }
            NodeKind::BuiltinCall { args, .. } => elements(args).collect(),
            NodeKind::Member { object, .. } => smallvec![Slot::Field(&mut **object)],
            NodeKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => smallvec![
                Slot::Field(&mut **cond),
                Slot::Field(&mut **then_branch),
                Slot::Optional(else_branch),
            ],
            NodeKind::Sequence(items) => elements(items).collect(),
            NodeKind::Map(entries) => entries
                .iter_mut()
                .enumerate()
                .flat_map(|(i, MapEntry { key, value })| {
                    [
                        Slot::Element {
                            index: 2 * i,
                            node: key,
                        },
                        Slot::Element {
                            index: 2 * i + 1,
                            node: value,
                        },
                    ]
                })
                .collect(),
        }
    }

    /// Shared access to every present child, in evaluation order.
    pub fn children(&self) -> SmallVec<[&Node; 4]> {
        match &self.kind {
            NodeKind::Identifier(_) | NodeKind::Literal(_) => SmallVec::new(),
            NodeKind::Unary { operand, .. } => smallvec![&**operand],
            NodeKind::Binary { left, right, .. } => smallvec![&**left, &**right],
            NodeKind::Call { callee, args } => {
                let mut children: SmallVec<[&Node; 4]> = smallvec![&**callee];
                children.extend(args.iter());
                children
            }
            NodeKind::BuiltinCall { args, .. } => args.iter().collect(),
            NodeKind::Member { object, .. } => smallvec![&**object],
            NodeKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => {
                let mut children: SmallVec<[&Node; 4]> = smallvec![&**cond, &**then_branch];
                children.extend(else_branch.as_deref());
                children
            }
            NodeKind::Sequence(items) => items.iter().collect(),
            NodeKind::Map(entries) => entries
                .iter()
                .flat_map(|entry| [&entry.key, &entry.value])
                .collect(),
        }
    }

    /// Number of nodes in this subtree, this one included.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(|child| child.size()).sum::<usize>()
    }

    /// Count the nodes of this subtree matching `pred`.
    pub fn count(&self, pred: &impl Fn(&Node) -> bool) -> usize {
        let own = usize::from(pred(self));
        own + self
            .children()
            .iter()
            .map(|child| child.count(pred))
            .sum::<usize>()
    }

    /// Whether this node and all of its descendants carry a resolved type.
    pub fn is_fully_typed(&self) -> bool {
        self.ty.is_some() && self.children().iter().all(|child| child.is_fully_typed())
    }

    pub(crate) fn clear_marks(&mut self) {
        self.visited = 0;
        for mut slot in self.slots() {
            if let Some(child) = slot.get_mut() {
                child.clear_marks();
            }
        }
    }
}

fn elements(nodes: &mut [Node]) -> impl Iterator<Item = Slot<'_>> {
    nodes
        .iter_mut()
        .enumerate()
        .map(|(index, node)| Slot::Element { index, node })
}
