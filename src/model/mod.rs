pub mod constants;
pub mod decay;
pub mod error;
pub mod rating_tracker;
pub mod rating_utils;
pub mod snapshot;
pub mod structures;
pub mod tsr_model;
