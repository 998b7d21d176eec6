//! Command implementations.

pub mod check;
pub mod dev;
pub mod generate;

pub use check::execute as check_execute;
pub use dev::execute as dev_execute;
pub use generate::execute as generate_execute;
