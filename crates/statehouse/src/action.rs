use std::fmt::Debug;

/// Actions describe an intended state change.
///
/// The action type is the discriminant reducers built with
/// [`reducer_from_handlers`](crate::reducer_from_handlers) dispatch on. For an
/// enum it is usually the variant name.
///
/// ```
/// use statehouse::Action;
///
/// #[derive(Debug)]
/// enum CounterAction {
///     Increment,
///     Add(i32),
/// }
///
/// impl Action for CounterAction {
///     fn action_type(&self) -> &str {
///         match self {
///             CounterAction::Increment => "increment",
///             CounterAction::Add(_) => "add",
///         }
///     }
/// }
///
/// assert_eq!(CounterAction::Add(2).action_type(), "add");
/// ```
pub trait Action: Debug {
    fn action_type(&self) -> &str;
}
