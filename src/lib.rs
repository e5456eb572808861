pub mod error;
pub mod program;
pub mod memory;
pub mod instruction;
pub mod io;
pub mod computer;
pub mod hull;
pub mod arcade;
pub mod batch;
