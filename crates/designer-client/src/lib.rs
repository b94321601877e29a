pub mod traits;

pub use traits::{DesignClient, DesignRequest};
