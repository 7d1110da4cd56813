//! Tool execution against the Leetbase API
//!
//! `execute` never fails: unknown names, bad arguments, missing credentials
//! and downstream errors all come back as `ToolResult::Failure`.

use async_trait::async_trait;
use serde_json::Value;

use crate::backend::{BackendClient, BackendError};
use crate::logging::SharedLogger;
use crate::log_info;
use crate::types::{CredentialContext, ToolCallIntent, ToolResult};

use super::args;
use super::registry::{ADD_PROBLEMS_TO_TODO, GET_ALL_PROBLEMS, GET_TODO_LIST, REMOVE_PROBLEM_FROM_TODO};

pub const UNRECOGNIZED_TOOL: &str = "unrecognized tool";
pub const MISSING_CREDENTIALS: &str = "missing credentials";

/// Maps a tool-call intent to a concrete side-effecting call
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Run one intent. Implementations issue at most one downstream call.
    async fn execute(&self, intent: &ToolCallIntent, credentials: Option<&CredentialContext>) -> ToolResult;
}

/// Executor for the tools declared by `ToolRegistry::leetbase()`
pub struct BackendToolExecutor {
    client: BackendClient,
    logger: SharedLogger,
}

impl BackendToolExecutor {
    pub fn new(client: BackendClient, logger: SharedLogger) -> Self {
        Self { client, logger }
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    async fn get_all_problems(&self, arguments: &Value) -> Result<Value, String> {
        let args = args::as_object(arguments)?;
        let limit = args::optional_positive_int(&args, "limit")?;
        let page = args::optional_positive_int(&args, "page")?;
        let body = self
            .client
            .list_problems(limit, page)
            .await
            .map_err(describe_backend_error)?;
        Ok(unwrap_data(body))
    }

    async fn add_problems_to_todo(&self, arguments: &Value, credentials: &CredentialContext) -> Result<Value, String> {
        let args = args::as_object(arguments)?;
        let problems = args::required_string_list(&args, "problems")?;
        self.client
            .add_todos(credentials, &problems)
            .await
            .map_err(describe_backend_error)
    }

    async fn get_todo_list(&self, arguments: &Value, credentials: &CredentialContext) -> Result<Value, String> {
        let args = args::as_object(arguments)?;
        let limit = args::optional_positive_int(&args, "limit")?;
        let page = args::optional_positive_int(&args, "page")?;
        self.client
            .list_todos(credentials, limit, page)
            .await
            .map_err(describe_backend_error)
    }

    async fn remove_problem_from_todo(&self, arguments: &Value, credentials: &CredentialContext) -> Result<Value, String> {
        let args = args::as_object(arguments)?;
        let problem = args::required_string(&args, "problem")?;
        self.client
            .remove_todo(credentials, &problem)
            .await
            .map_err(describe_backend_error)
    }
}

#[async_trait]
impl ToolExecutor for BackendToolExecutor {
    async fn execute(&self, intent: &ToolCallIntent, credentials: Option<&CredentialContext>) -> ToolResult {
        let name = intent.name.as_str();
        let arguments = &intent.arguments;

        let result = match name {
            GET_ALL_PROBLEMS => self.get_all_problems(arguments).await,
            ADD_PROBLEMS_TO_TODO | GET_TODO_LIST | REMOVE_PROBLEM_FROM_TODO => match credentials {
                None => Err(MISSING_CREDENTIALS.to_string()),
                Some(creds) => match name {
                    ADD_PROBLEMS_TO_TODO => self.add_problems_to_todo(arguments, creds).await,
                    GET_TODO_LIST => self.get_todo_list(arguments, creds).await,
                    _ => self.remove_problem_from_todo(arguments, creds).await,
                },
            },
            _ => Err(UNRECOGNIZED_TOOL.to_string()),
        };

        match result {
            Ok(payload) => {
                log_info!(self.logger, "[ToolExecutor] {} succeeded", name);
                ToolResult::Success(payload)
            }
            Err(message) => {
                log_info!(self.logger, "[ToolExecutor] {} failed: {}", name, message);
                ToolResult::Failure(message)
            }
        }
    }
}

/// `{data: X, ...}` becomes `X`; anything else is returned whole
fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}

fn describe_backend_error(err: BackendError) -> String {
    match err {
        BackendError::Status { status, message } => format!("request failed with status {}: {}", status, message),
        BackendError::Timeout => "tool call timed out".to_string(),
        BackendError::InvalidBody(detail) => format!("response could not be serialized: {}", detail),
        BackendError::Http(e) => format!("request failed: {}", e),
    }
}
