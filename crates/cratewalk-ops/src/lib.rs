pub mod ops_fixtures;
pub mod ops_graph;
pub mod report;
