pub mod category;
pub mod product;
pub mod query;

pub use category::*;
pub use product::*;
pub use query::*;
