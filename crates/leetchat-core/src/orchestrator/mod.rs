//! Orchestration loop
//!
//! One request runs through at most two model passes:
//!
//! ```text
//! Start -> FirstPass -> DirectAnswer                          -> End
//!                    -> ToolDispatch -> SecondPass -> FinalAnswer -> End
//!                    -> Empty (fallback)                      -> End
//! ```
//!
//! No state is revisited. Tool requests in the second pass are not executed.

mod handler;

pub use handler::{Orchestrator, TOOL_TIMEOUT_MESSAGE};
