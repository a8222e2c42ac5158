use std::borrow::Cow;
use std::fmt::{self, Display};
use std::ops::Deref;

use interner::global::{GlobalString, StringPool};
use rand::distr::Alphanumeric;
use rand::Rng;

static NAMES: StringPool = StringPool::new();

/// The number of characters in a generated identifier.
const IDENTIFIER_LENGTH: usize = 4;

/// A smart-string type that is used as a widget's name.
///
/// This type ensures that globally only one instance of any unique wrapped
/// string exists, so comparing two names never compares their contents.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Name(GlobalString);

impl Name {
    /// Returns a name for the given string.
    pub fn new<'a>(name: impl Into<Cow<'a, str>>) -> Self {
        Self(NAMES.get(name))
    }

    /// Returns a random alphanumeric name.
    ///
    /// Generated names are short and not globally unique; the widget tree
    /// regenerates them until they do not collide with an existing name.
    #[must_use]
    pub fn generate() -> Self {
        Self::new(generate_identifier(IDENTIFIER_LENGTH))
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl<'a> From<&'a str> for Name {
    fn from(value: &'a str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Returns `length` random characters drawn from `[0-9A-Za-z]`.
pub(crate) fn generate_identifier(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
