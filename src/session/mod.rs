pub mod mode;
pub mod state;
pub mod surface;
