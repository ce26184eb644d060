pub mod match_status;
pub mod surface;
