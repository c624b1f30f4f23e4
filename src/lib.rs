pub mod api;
pub mod blueprint;
pub mod errors;
pub mod materialize;
pub mod preview;
