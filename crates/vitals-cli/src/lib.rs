//! Library side of the vital-signs export CLI.

pub mod logging;
pub mod pipeline;
pub mod types;
