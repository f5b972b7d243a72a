pub mod analysis;
pub mod form;
pub mod machine;
pub mod test_case;
pub mod yaml_data;

pub use analysis::*;
pub use form::*;
pub use machine::*;
pub use test_case::*;
pub use yaml_data::*;
