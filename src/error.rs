use std::sync::Arc;

/// Creates an ad hoc [`Error`] from `format!`-style arguments.
macro_rules! err {
    ($($tt:tt)*) => {
        crate::error::Error::adhoc(format!($($tt)*))
    }
}

/// An error that can occur in this crate.
///
/// Errors come from a small number of places:
///
/// * A time zone lookup failed because the name isn't in the loaded
/// database.
/// * An instant (or a calendar field) is outside the supported range.
/// * A piece of the rule database failed to parse. Note that the database
/// loader itself recovers from these and reports them as
/// [`Diagnostic`](crate::tz::Diagnostic)s; an `Error` is only what an
/// individual sub-parser produces.
/// * An internal consistency failure during rule evaluation, e.g., a zone
/// period referring to a rule set that doesn't exist. These indicate a
/// corrupt data model and are never silently ignored.
///
/// # Design
///
/// This crate uses a single error type for all of its operations, with
/// limited introspection via predicates like [`Error::is_zone_lookup`].
/// Finer grained error types tend to compose poorly across the parser and
/// the resolution engine, which share most of their failure modes.
#[derive(Clone)]
pub struct Error {
    /// The `Arc` makes an `Error` cloneable and cheap to pass around. It
    /// also keeps the size of `Error` itself to one word, which matters
    /// because the resolution path returns `Result<_, Error>` everywhere.
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

/// The underlying kind of an [`Error`].
#[derive(Debug)]
enum ErrorKind {
    /// An ad hoc error message, used for parse failures and internal
    /// consistency failures.
    Adhoc(String),
    /// A value was outside its allowed range.
    Range { what: &'static str, given: i64, min: i64, max: i64 },
    /// A time zone name was not found in the database.
    ZoneLookup(String),
}

impl Error {
    /// Creates a new ad hoc error with the message given.
    ///
    /// Most callers should use the `err!` macro instead of calling this
    /// directly.
    #[inline(never)]
    #[cold]
    pub(crate) fn adhoc(message: String) -> Error {
        Error::from(ErrorKind::Adhoc(message))
    }

    /// Creates a new error indicating that `given` is out of the
    /// `min..=max` range. The `what` label is a human readable description
    /// of what exactly is out of range. (e.g., "day".)
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i64>,
        min: impl Into<i64>,
        max: impl Into<i64>,
    ) -> Error {
        Error::from(ErrorKind::Range {
            what,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        })
    }

    /// Creates a new error indicating that a time zone name could not be
    /// found.
    #[inline(never)]
    #[cold]
    pub(crate) fn zone_lookup(name: &str) -> Error {
        Error::from(ErrorKind::ZoneLookup(String::from(name)))
    }

    /// Contextualizes this error with the consequent error given.
    ///
    /// The `consequent` error becomes the outermost error in the chain
    /// reported by `Display`, with `self` as its cause.
    pub(crate) fn context(self, consequent: Error) -> Error {
        let mut err = consequent;
        // OK because the consequent was just created, so its Arc has
        // exactly one reference.
        let inner = Arc::get_mut(&mut err.inner)
            .expect("consequent error must be freshly created");
        debug_assert!(inner.cause.is_none(), "cause of consequent is `None`");
        inner.cause = Some(self);
        err
    }

    /// Returns true when this error is due to a time zone name not being
    /// found in the database.
    pub fn is_zone_lookup(&self) -> bool {
        matches!(self.root().inner.kind, ErrorKind::ZoneLookup(_))
    }

    /// Returns true when this error is due to a value being out of its
    /// supported range.
    pub fn is_range(&self) -> bool {
        matches!(self.root().inner.kind, ErrorKind::Range { .. })
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        // OK because `Error::chain` always yields at least one error.
        self.chain().last().unwrap()
    }

    /// Returns a chain of error values, starting with the highest level
    /// context and ending with the root cause.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        std::iter::once(err).chain(std::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            std::fmt::Display::fmt(&err.inner.kind, f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if !f.alternate() {
            std::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ErrorKind::Adhoc(ref message) => f.write_str(message),
            ErrorKind::Range { what, given, min, max } => {
                write!(
                    f,
                    "parameter '{what}' with value {given} is not \
                     in the required range of {min}..={max}",
                )
            }
            ErrorKind::ZoneLookup(ref name) => {
                write!(
                    f,
                    "failed to find time zone `{name}` in the \
                     time zone database",
                )
            }
        }
    }
}
