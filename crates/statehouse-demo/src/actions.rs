use statehouse::Action;

use crate::state::Filter;

/// Actions represent all possible state changes in the todo list.
/// Action types are prefixed by the slice of state they affect.
#[derive(Debug, Clone, PartialEq)]
pub enum TodoAction {
    /// Append a todo with the given title
    Add(String),
    /// Flip the done flag of the todo with this id
    Toggle(u32),
    /// Drop every finished todo
    ClearCompleted,
    SetFilter(Filter),
}

impl Action for TodoAction {
    fn action_type(&self) -> &str {
        match self {
            TodoAction::Add(_) => "todos/add",
            TodoAction::Toggle(_) => "todos/toggle",
            TodoAction::ClearCompleted => "todos/clear_completed",
            TodoAction::SetFilter(_) => "filter/set",
        }
    }
}
