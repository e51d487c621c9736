/// A new value for a field, given outright or computed from the current one.
///
/// Derive closures are boxed, so they must be `'static` (capture owned values,
/// not references) and `Send` so an `Update` can be held across an `.await`.
pub enum Update<T> {
    Replace(T),
    Derive(Box<dyn FnOnce(T) -> T + Send>),
}

impl<T> Update<T> {
    pub fn derive(f: impl FnOnce(T) -> T + Send + 'static) -> Self {
        Update::Derive(Box::new(f))
    }

    pub fn apply(self, previous: T) -> T {
        match self {
            Update::Replace(value) => value,
            Update::Derive(f) => f(previous),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Update::Replace(value)
    }
}
