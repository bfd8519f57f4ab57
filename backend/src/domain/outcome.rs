//! Uniform operation outcome envelope.
//!
//! Every operation boundary in this crate reduces to an [`Outcome`]: a
//! success carrying a typed payload, or a failure carrying one or more
//! human-readable error messages in the order they were detected. Store
//! faults are not outcomes; they travel as errors so transactional write
//! paths can roll back and re-raise them.

/// Discriminated success/failure envelope.
///
/// A `Success` carries exactly one value and no errors; a `Failure` carries
/// at least one message and no value. Immutable once constructed.
///
/// # Examples
/// ```
/// use backend::domain::Outcome;
///
/// let granted = Outcome::success(7);
/// assert!(granted.is_success());
/// assert_eq!(granted.value(), Some(&7));
///
/// let rejected: Outcome<i32> = Outcome::failure("too small");
/// assert!(!rejected.is_success());
/// assert_eq!(rejected.errors(), ["too small"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation produced a value.
    Success(T),
    /// The operation was rejected; messages list every violated rule in
    /// the order it was detected.
    Failure(Vec<String>),
}

impl<T> Outcome<T> {
    /// Wrap a successful payload.
    #[must_use]
    pub const fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Reject with a single message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(vec![message.into()])
    }

    /// Reject with an ordered list of messages.
    ///
    /// # Panics
    /// Panics if `messages` is empty; a failure must explain itself.
    #[must_use]
    pub fn failures(messages: Vec<String>) -> Self {
        assert!(
            !messages.is_empty(),
            "a failure outcome requires at least one message"
        );
        Self::Failure(messages)
    }

    /// Whether this outcome carries a value.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Borrow the payload, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Take the payload, if any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The rule violations, in detection order. Empty for a success.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(messages) => messages,
        }
    }

    /// Convert the success payload, preserving failures verbatim.
    #[must_use]
    pub fn map<U>(self, convert: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(convert(value)),
            Self::Failure(messages) => Outcome::Failure(messages),
        }
    }
}
