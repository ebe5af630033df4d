pub mod appointment;
pub mod enums;
pub mod filters;
pub mod slot;

pub use appointment::*;
pub use filters::*;
pub use slot::*;
