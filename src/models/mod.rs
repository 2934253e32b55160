mod plant;
mod recommendation;
mod weather;

pub use plant::*;
pub use recommendation::*;
pub use weather::*;
