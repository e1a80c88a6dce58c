pub mod comparator;
pub mod model;
pub mod projection;
pub mod report;
