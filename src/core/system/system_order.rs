//! Fixed-step ordering labels.
//! 1. SimulationSet (grain integration; stand-in for the physics engine)
//! 2. TransportSet (teleporters reposition grains after the step)
//! 3. ScoringSet (buckets catch grains)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SimulationSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct TransportSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ScoringSet;
