//! Literal-or-function state updates

/// New value for a piece of table state: either the value itself or a
/// function of the previous value.
///
/// # Example
///
/// ```
/// use runway_table::Updater;
/// use runway_table::state::PaginationState;
///
/// let next_page = Updater::update(|old: &PaginationState| PaginationState {
///     page_index: old.page_index + 1,
///     ..*old
/// });
/// let result = next_page.apply(&PaginationState::new(0, 10));
/// assert_eq!(result.page_index, 1);
/// ```
pub enum Updater<'a, T> {
    /// Replace the previous value.
    Value(T),
    /// Compute the new value from the previous one.
    Update(Box<dyn FnOnce(&T) -> T + 'a>),
}

impl<'a, T> Updater<'a, T> {
    /// Creates a functional update.
    pub fn update(f: impl FnOnce(&T) -> T + 'a) -> Self {
        Updater::Update(Box::new(f))
    }

    /// Resolves the update against the previous value.
    pub fn apply(self, old: &T) -> T {
        match self {
            Updater::Value(value) => value,
            Updater::Update(f) => f(old),
        }
    }
}

impl<T> From<T> for Updater<'_, T> {
    fn from(value: T) -> Self {
        Updater::Value(value)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Updater<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Updater::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Updater::Update(_) => f.write_str("Update(..)"),
        }
    }
}
