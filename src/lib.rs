//! A reduced, ordered, complement-edge binary decision diagram package.
//!
//! A [`Manager`](manager::Manager) owns a hash-consed node table, an
//! operation cache, a variable ordering, and the set of live root
//! handles; every Boolean function is represented as an
//! [`Edge`](edge::Edge) into that manager. Edges are cheap, `Copy`
//! values — the manager, not the edge, owns the graph, and garbage
//! collection reclaims nodes no root transitively holds.
//!
//! ```text
//! let mut mgr = Manager::new("classic", "demo", "");
//! mgr.new_var(VarId::new(0));
//! mgr.new_var(VarId::new(1));
//! let a = mgr.literal(VarId::new(0), true);
//! let b = mgr.literal(VarId::new(1), true);
//! let f = ops::and(&mut mgr, a, b);
//! ```
//!
//! See [`ops`] for the recursive Boolean operators and structural
//! analyses, [`collections`] for multi-edge aggregates, and [`dump`]
//! for the binary interchange format.

#![deny(unsafe_code)]
#![doc = document_features::document_features!()]

pub mod apply_cache;
pub mod collections;
pub mod dump;
pub mod edge;
pub mod error;
pub mod expr;
pub mod handle;
pub mod manager;
pub mod node;
pub mod ops;
pub mod root;
pub mod unique_table;
pub mod var;
pub mod varmap;

pub use collections::{BddList, BddVector};
pub use edge::Edge;
pub use error::{DumpError, RestoreError};
pub use expr::{Cover, Cube, Expr, Substitution};
pub use manager::{Manager, ManagerConfig, ManagerKind, ManagerStats};
pub use node::{Node, NodeId};
pub use root::{Bdd, ManagerRef};
pub use var::{Level, Literal, VarId};
