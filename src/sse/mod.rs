pub mod models;
pub use models::*;

mod sse_broadcaster;
pub use sse_broadcaster::*;

mod tally_sse;

pub use tally_sse::tally_sse;
