pub mod race;
pub mod stats;
pub mod chart;
pub mod simulation;
