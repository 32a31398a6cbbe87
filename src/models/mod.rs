pub mod affiliation;
pub mod author;
pub mod matching;
pub mod table;

pub use affiliation::*;
pub use author::*;
pub use matching::*;
pub use table::*;
