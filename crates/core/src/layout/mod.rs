pub mod force;
pub mod partition;
pub mod tree;
pub mod treemap;
