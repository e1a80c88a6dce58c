pub mod model;
pub mod reference;
