//! Clinical natural language processing layer.

pub mod ner;
pub mod normalize;
