pub mod grader;
pub mod normalize;
pub mod shuffle;
pub mod stats;
