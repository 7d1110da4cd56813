//! Tool registry: the fixed set of tools the model may call
//!
//! Declarations are built once at startup and never change afterwards.
//! Every schema here must accept what `BackendToolExecutor` accepts for the
//! same name; the tests at the bottom of `executor.rs` exercise each pair.

use serde_json::json;

use crate::types::ToolDeclaration;

pub const GET_ALL_PROBLEMS: &str = "get_all_problems";
pub const ADD_PROBLEMS_TO_TODO: &str = "add_problems_to_todo";
pub const GET_TODO_LIST: &str = "get_todo_list";
pub const REMOVE_PROBLEM_FROM_TODO: &str = "remove_problem_from_todo";

/// Immutable list of tool declarations
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDeclaration>,
}

impl ToolRegistry {
    /// Registry with the Leetbase problem and todo tools
    pub fn leetbase() -> Self {
        Self::from_declarations(leetbase_declarations())
    }

    /// Registry from explicit declarations. Later duplicates of a name are dropped.
    pub fn from_declarations(declarations: Vec<ToolDeclaration>) -> Self {
        let mut tools: Vec<ToolDeclaration> = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            if !tools.iter().any(|t| t.name == declaration.name) {
                tools.push(declaration);
            }
        }
        Self { tools }
    }

    /// All declarations, in registration order
    pub fn list_tools(&self) -> &[ToolDeclaration] {
        &self.tools
    }

    /// Look up a declaration by name
    pub fn get(&self, name: &str) -> Option<&ToolDeclaration> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::leetbase()
    }
}

fn paging_properties() -> serde_json::Value {
    json!({
        "limit": {
            "type": "integer",
            "minimum": 1,
            "description": "Maximum number of items to return (default 10)"
        },
        "page": {
            "type": "integer",
            "minimum": 1,
            "description": "1-based page number (default 1)"
        }
    })
}

fn leetbase_declarations() -> Vec<ToolDeclaration> {
    vec![
        ToolDeclaration::new(
            GET_ALL_PROBLEMS,
            "Get problems from the Leetbase problem catalog, including their ids, titles and difficulty.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": paging_properties()
        })),
        ToolDeclaration::new(
            ADD_PROBLEMS_TO_TODO,
            "Add one or more problems to the signed-in user's todo list.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "problems": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Ids of the problems to add"
                }
            },
            "required": ["problems"]
        })),
        ToolDeclaration::new(
            GET_TODO_LIST,
            "Get the problems currently on the signed-in user's todo list.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": paging_properties()
        })),
        ToolDeclaration::new(
            REMOVE_PROBLEM_FROM_TODO,
            "Remove a problem from the signed-in user's todo list.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "problem": {
                    "type": "string",
                    "description": "Id of the problem to remove"
                }
            },
            "required": ["problem"]
        })),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_leetbase_registry_contents() {
        let registry = ToolRegistry::leetbase();
        let names: Vec<&str> = registry.list_tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![GET_ALL_PROBLEMS, ADD_PROBLEMS_TO_TODO, GET_TODO_LIST, REMOVE_PROBLEM_FROM_TODO]
        );
    }

    #[test]
    fn test_names_are_unique() {
        let registry = ToolRegistry::leetbase();
        let unique: HashSet<&str> = registry.list_tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(unique.len(), registry.len());
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let registry = ToolRegistry::from_declarations(vec![
            ToolDeclaration::new("a", "first"),
            ToolDeclaration::new("a", "second"),
            ToolDeclaration::new("b", "third"),
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("a").map(|t| t.description.as_str()), Some("first"));
    }

    #[test]
    fn test_required_fields() {
        let registry = ToolRegistry::leetbase();
        assert_eq!(registry.get(ADD_PROBLEMS_TO_TODO).unwrap().required_arguments(), vec!["problems"]);
        assert_eq!(registry.get(REMOVE_PROBLEM_FROM_TODO).unwrap().required_arguments(), vec!["problem"]);
        assert!(registry.get(GET_ALL_PROBLEMS).unwrap().required_arguments().is_empty());
        assert!(!registry.contains("delete_everything"));
        assert!(ToolRegistry::from_declarations(Vec::new()).is_empty());
    }
}
