mod node;
mod tour;
mod vertex_set;

pub use node::Node;
pub use tour::Tour;
pub use vertex_set::{VertexIter, VertexSet, MAX_VERTICES};
