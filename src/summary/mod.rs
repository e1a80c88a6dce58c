pub mod legend;
pub mod narrative;
