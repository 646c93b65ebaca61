//! Heuristic CV text parsing

pub mod normalize;
pub mod patterns;
pub mod document;
pub mod fields;
pub mod sections;
pub mod experience;
pub mod education;
pub mod projects;
pub mod certificates;
pub mod summary;
pub mod parser;
