pub mod model;
pub mod session;
pub mod worker;
