//! External service integrations.

pub mod airlift_client {
    pub use crate::airlift_client::*;
}

pub mod models {
    pub use crate::models::*;
}
