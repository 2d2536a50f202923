//! 工具模块

pub mod references;
pub mod response;
pub mod validation;

pub use references::*;
pub use response::*;
pub use validation::*;
