pub mod linear;

pub use linear::{LinearSvm, TrainReport};
