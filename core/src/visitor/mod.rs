//! Tree rewriting: visitors, the post-order walker and the pass pipeline.
//!
//! A [`Visitor`] is handed a [`Cursor`] for every node of the tree, children
//! before parents. Through the cursor it can read the node and its resolved
//! type, and replace the node in its slot. After a replacement the walker
//! visits the fresh parts of the new node, re-resolves its type and offers
//! it to the same visitor again, so a rule sees a consistent tree at all
//! times. Types of every ancestor of a replaced node are recomputed before
//! the ancestor is visited.
//!
//! ```
//! use graft_core::ast::{Node, NodeKind};
//! use graft_core::visitor::{Cursor, Visitor};
//!
//! /// Rewrites every `x` identifier into the literal `0`.
//! struct Zero;
//!
//! impl Visitor for Zero {
//!     fn visit(&mut self, cursor: &mut Cursor<'_>) {
//!         if matches!(&cursor.node().kind, NodeKind::Identifier(name) if name == "x") {
//!             cursor.patch(Node::int(0));
//!         }
//!     }
//! }
//! ```

mod cursor;
mod error;
mod patch;
mod pipeline;
mod walker;

pub use cursor::Cursor;
pub use error::{RewriteError, Violation};
pub use patch::patch;
pub use pipeline::{Pipeline, RewriteOptions, run, walk};

/// A rewrite rule, applied to each node of a tree in post-order.
pub trait Visitor {
    fn visit(&mut self, cursor: &mut Cursor<'_>);

    /// Rule name used in logs and patch violations.
    fn name(&self) -> &str {
        let full = core::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}
