pub mod barcode;
pub mod enums;
pub mod job;
pub mod stock;
pub mod task;

pub use barcode::*;
pub use enums::*;
pub use job::*;
pub use stock::*;
pub use task::*;
