//! Helpers shared by the backend's integration tests: logging bootstrap,
//! Problem Details assertions and collision-free test data.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
