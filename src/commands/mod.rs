pub mod generate;
pub mod import;
pub mod list;
pub mod show;

pub use generate::*;
pub use import::*;
pub use list::*;
pub use show::*;
