//! Handler results.

/// What a handler decided about a request it was offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Outcome<T> {
    /// Decline: the next handler, then the next candidate, is tried.
    Continue,
    /// Finish dispatch with this value.
    Stop(T),
}

impl<T> Outcome<T> {
    pub fn is_continue(&self) -> bool {
        matches!(self, Outcome::Continue)
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Outcome::Stop(_))
    }

    /// The terminal value, if any.
    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Stop(value) => Some(value),
            Outcome::Continue => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Stop(value) => Outcome::Stop(f(value)),
            Outcome::Continue => Outcome::Continue,
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Outcome::Stop(value),
            None => Outcome::Continue,
        }
    }
}

/// Conversion from the return values handlers are written with.
///
/// `Option<T>` maps `None` to a decline. A `bool` handler (for routers whose
/// result type is `()`) declines with `false`.
pub trait IntoOutcome<T> {
    fn into_outcome(self) -> Outcome<T>;
}

impl<T> IntoOutcome<T> for Outcome<T> {
    fn into_outcome(self) -> Outcome<T> {
        self
    }
}

impl<T> IntoOutcome<T> for Option<T> {
    fn into_outcome(self) -> Outcome<T> {
        self.into()
    }
}

impl IntoOutcome<()> for bool {
    fn into_outcome(self) -> Outcome<()> {
        if self {
            Outcome::Stop(())
        } else {
            Outcome::Continue
        }
    }
}
