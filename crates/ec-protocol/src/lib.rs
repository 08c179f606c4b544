pub mod entities;
pub mod geo;
pub mod intent;
pub mod resolution;
pub mod scores;

pub use entities::*;
pub use intent::*;
pub use resolution::*;
pub use scores::*;
