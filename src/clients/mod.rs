#[macro_use]
mod macros;
pub mod category_client;
pub mod product_client;

pub use category_client::CategoryStoreClient;
pub use product_client::ProductStoreClient;
