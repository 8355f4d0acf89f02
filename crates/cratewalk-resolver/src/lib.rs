//! Dependency graph engine: depth-bounded, filter-aware traversal with cycle
//! detection, an incrementally built reverse-dependency index, and a
//! cycle-tolerant installation order.

pub mod builder;
pub mod graph;
pub mod visit;
