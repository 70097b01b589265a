//! Binary dump/restore of a set of rooted edges.
//!
//! Grounded on `original_source/Bdd.cc`'s `dump()`/`restore()` stream
//! format, translated into an explicit byte layout since this crate has
//! no equivalent of the original's `ostream`/`istream` operator
//! overloading to lean on:
//!
//! ```text
//! node record   := varid:u32 edge:token edge:token      (repeated)
//! end-of-nodes  := SENTINEL:u32                          (varid == u32::MAX)
//! root section  := root_count:u32 (edge:token){root_count}
//!
//! edge:token    := tag:u8 [index:u32]
//!   tag 0 = Zero        (no index)
//!   tag 1 = One         (no index)
//!   tag 2 = Error       (no index)
//!   tag 3 = Overflow    (no index)
//!   tag 4 = positive-polarity reference to node-sequence index
//!   tag 5 = negative-polarity reference to node-sequence index
//! ```
//!
//! All multi-byte integers are little-endian. Node records appear in
//! post-order (a node's children are always written, and thus indexed,
//! before the node itself), so `index` in a tag-4/5 token always refers
//! backward into records already read. Restoring into a manager that
//! has not registered every referenced variable is a malformed-stream
//! error rather than an implicit re-ordering: variable/level
//! assignment is an explicit, caller-driven act, and
//! guessing an order from dump order alone cannot be done soundly from
//! post-order data (children, which sit at deeper levels, are written
//! before their shallower parents).

use std::io::{Read, Write};

use rustc_hash::FxHashMap;

use crate::edge::Edge;
use crate::error::{DumpError, RestoreError};
use crate::manager::Manager;
use crate::node::NodeId;
use crate::var::{VarId, LEVEL_SENTINEL};

/// Write every node reachable from `roots` plus the roots themselves
/// to `writer`, returning the number of internal node records written.
pub fn dump<W: Write>(mgr: &mut Manager, roots: &[Edge], writer: &mut W) -> Result<usize, DumpError> {
    let mut index: FxHashMap<NodeId, u32> = FxHashMap::default();
    let mut order: Vec<NodeId> = Vec::new();
    for &root in roots {
        collect_postorder(mgr, root, &mut index, &mut order);
    }

    for &id in &order {
        let (level, e0, e1) = {
            let node = mgr.table.node(id);
            (node.level(), node.child(0), node.child(1))
        };
        let varid = mgr.varid(level);
        writer.write_all(&varid.get().to_le_bytes())?;
        write_edge_token(writer, e0, &index)?;
        write_edge_token(writer, e1, &index)?;
    }
    writer.write_all(&LEVEL_SENTINEL.to_le_bytes())?;

    writer.write_all(&(roots.len() as u32).to_le_bytes())?;
    for &root in roots {
        write_edge_token(writer, root, &index)?;
    }
    Ok(order.len())
}

fn collect_postorder(
    mgr: &Manager,
    e: Edge,
    index: &mut FxHashMap<NodeId, u32>,
    order: &mut Vec<NodeId>,
) {
    let Some(id) = e.target_node() else { return };
    if index.contains_key(&id) {
        return;
    }
    let (c0, c1) = mgr.table.node(id).children();
    collect_postorder(mgr, c0, index, order);
    collect_postorder(mgr, c1, index, order);
    index.insert(id, order.len() as u32);
    order.push(id);
}

fn write_edge_token<W: Write>(
    writer: &mut W,
    e: Edge,
    index: &FxHashMap<NodeId, u32>,
) -> Result<(), DumpError> {
    match e {
        Edge::Zero => writer.write_all(&[0])?,
        Edge::One => writer.write_all(&[1])?,
        Edge::Error => writer.write_all(&[2])?,
        Edge::Overflow => writer.write_all(&[3])?,
        Edge::Internal(id, polarity) => {
            writer.write_all(&[if polarity { 5 } else { 4 }])?;
            let seq = index[&id];
            writer.write_all(&seq.to_le_bytes())?;
        }
    }
    Ok(())
}

/// Read a dump stream back, building nodes into `mgr` via
/// [`Manager::build_node`] (so hash-consing and reduction apply exactly
/// as they would to freshly computed nodes), and return the restored
/// roots in the order they were dumped.
pub fn restore<R: Read>(mgr: &mut Manager, reader: &mut R) -> Result<Vec<Edge>, RestoreError> {
    let mut built: Vec<Edge> = Vec::new();
    loop {
        let varid_raw = read_u32(reader)?;
        if varid_raw == LEVEL_SENTINEL {
            break;
        }
        let var = VarId::new(varid_raw);
        if mgr.try_level(var).is_none() {
            return Err(RestoreError::Malformed(
                "node record referenced a variable not registered in this manager",
            ));
        }
        let e0 = read_edge_token(reader, &built)?;
        let e1 = read_edge_token(reader, &built)?;
        let edge = mgr.build_node(var, e0, e1);
        built.push(edge);
    }

    let root_count = read_u32(reader)?;
    let mut roots = Vec::with_capacity(root_count as usize);
    for _ in 0..root_count {
        roots.push(read_edge_token(reader, &built)?);
    }
    Ok(roots)
}

fn read_edge_token<R: Read>(reader: &mut R, built: &[Edge]) -> Result<Edge, RestoreError> {
    let mut tag = [0u8; 1];
    reader.read_exact(&mut tag)?;
    match tag[0] {
        0 => Ok(Edge::zero()),
        1 => Ok(Edge::one()),
        2 => Ok(Edge::error()),
        3 => Ok(Edge::overflow()),
        4 | 5 => {
            let idx = read_u32(reader)? as usize;
            let base = built
                .get(idx)
                .copied()
                .ok_or(RestoreError::DanglingReference { index: idx as u32 })?;
            Ok(if tag[0] == 5 { base.negate() } else { base })
        }
        _ => Err(RestoreError::Malformed("unrecognized edge token tag")),
    }
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, RestoreError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops;
    use crate::var::VarId;

    #[test]
    fn round_trip_across_two_managers() {
        let mut src = Manager::new("classic", "src", "");
        src.new_var(VarId(0));
        src.new_var(VarId(1));
        let a = src.literal(VarId(0), true);
        let b = src.literal(VarId(1), true);
        let f = ops::and(&mut src, a, b);

        let mut bytes = Vec::new();
        let written = dump(&mut src, &[f], &mut bytes).unwrap();
        assert!(written > 0);

        let mut dst = Manager::new("classic", "dst", "");
        dst.new_var(VarId(0));
        dst.new_var(VarId(1));
        let mut cursor = std::io::Cursor::new(bytes);
        let roots = restore(&mut dst, &mut cursor).unwrap();
        assert_eq!(roots.len(), 1);

        let a2 = dst.literal(VarId(0), true);
        let b2 = dst.literal(VarId(1), true);
        let expected = ops::and(&mut dst, a2, b2);
        assert_eq!(roots[0], expected);
    }

    #[test]
    fn complemented_internal_edge_round_trips_with_correct_polarity() {
        // A regression pin for the tag<->polarity mapping: dumping a
        // complemented internal edge and restoring it must produce the
        // negation of the node, not the node itself.
        let mut src = Manager::new("classic", "src", "");
        src.new_var(VarId(0));
        src.new_var(VarId(1));
        let a = src.literal(VarId(0), true);
        let b = src.literal(VarId(1), true);
        let f = ops::and(&mut src, a, b);
        let not_f = f.negate();

        let mut bytes = Vec::new();
        dump(&mut src, &[f, not_f], &mut bytes).unwrap();

        let mut dst = Manager::new("classic", "dst", "");
        dst.new_var(VarId(0));
        dst.new_var(VarId(1));
        let mut cursor = std::io::Cursor::new(bytes);
        let roots = restore(&mut dst, &mut cursor).unwrap();

        let a2 = dst.literal(VarId(0), true);
        let b2 = dst.literal(VarId(1), true);
        let expected = ops::and(&mut dst, a2, b2);
        assert_eq!(roots[0], expected);
        assert_eq!(roots[1], expected.negate());
        assert_ne!(roots[0], roots[1]);
    }

    #[test]
    fn restore_rejects_unregistered_variable() {
        let mut src = Manager::new("classic", "src", "");
        src.new_var(VarId(5));
        let a = src.literal(VarId(5), true);
        let mut bytes = Vec::new();
        dump(&mut src, &[a], &mut bytes).unwrap();

        let mut dst = Manager::new("classic", "dst", "");
        let mut cursor = std::io::Cursor::new(bytes);
        assert!(matches!(
            restore(&mut dst, &mut cursor),
            Err(RestoreError::Malformed(_))
        ));
    }

    #[test]
    fn terminal_only_root_round_trips() {
        let mut src = Manager::new("classic", "src", "");
        let mut bytes = Vec::new();
        dump(&mut src, &[Edge::one(), Edge::zero()], &mut bytes).unwrap();

        let mut dst = Manager::new("classic", "dst", "");
        let mut cursor = std::io::Cursor::new(bytes);
        let roots = restore(&mut dst, &mut cursor).unwrap();
        assert_eq!(roots, vec![Edge::one(), Edge::zero()]);
    }
}
