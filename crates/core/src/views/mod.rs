pub mod force;
pub mod sunburst;
pub mod tree;
pub mod treemap;
