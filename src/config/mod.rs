pub mod types;
pub mod loader;
pub mod validator;
pub mod catalog;

pub use types::*;
pub use loader::*;
pub use validator::*;
pub use catalog::*;
