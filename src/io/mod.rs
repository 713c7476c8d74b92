pub mod fit;
pub mod triplets;
