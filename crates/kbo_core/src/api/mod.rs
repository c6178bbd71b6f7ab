pub mod matrix_json;

pub use matrix_json::{compute_matrix_json, MatrixRequest, MatrixResponse};
