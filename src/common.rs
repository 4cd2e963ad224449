pub mod escape;
pub mod node_compare;
