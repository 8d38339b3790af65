pub mod aggregator;
pub mod controller;
pub mod events;
pub mod settings;
