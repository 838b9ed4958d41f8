//! Domain entities

mod pokemon;

pub use pokemon::{Pokemon, STARTING_LEVEL};
