mod bytes_ops;
mod file_ops;

pub use bytes_ops::*;
pub use file_ops::*;
