pub mod system_order;

pub use system_order::{ScoringSet, SimulationSet, TransportSet};
