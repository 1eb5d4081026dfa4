pub mod assets;
pub mod components;
pub mod config;
pub mod coords;
pub mod level;
pub mod system;
