pub mod check;
pub mod tokens;
pub mod tree;
