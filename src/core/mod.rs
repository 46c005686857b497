// Domain-layer modules and shared errors/models
pub mod aggregator {
    pub use crate::aggregator::*;
}

pub mod normalizers {
    pub use crate::normalizers::*;
}

pub mod reducer {
    pub use crate::reducer::*;
}

pub mod view {
    pub use crate::view::*;
}

pub mod errors {
    pub use crate::errors::*;
}
