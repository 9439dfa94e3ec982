pub mod eigen;
pub mod error;
pub mod matrix;
pub mod operator;

pub use eigen::{eigh, eigvalsh, Eigh};
pub use error::LinalgError;
pub use matrix::{Matrix, Scalar, C64};
pub use operator::Operator;
