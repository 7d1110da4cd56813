//! Tools the model may call
//!
//! - [`ToolRegistry`] holds the declarations sent to the model
//! - [`ToolExecutor`] turns one intent into one downstream call
//! - [`args`] coerces loosely typed model arguments

pub mod args;
mod executor;
mod registry;

pub use executor::{BackendToolExecutor, ToolExecutor, MISSING_CREDENTIALS, UNRECOGNIZED_TOOL};
pub use registry::{
    ToolRegistry, ADD_PROBLEMS_TO_TODO, GET_ALL_PROBLEMS, GET_TODO_LIST, REMOVE_PROBLEM_FROM_TODO,
};
