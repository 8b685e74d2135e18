pub mod rules;
pub mod transform;

pub use transform::RowTransformer;
