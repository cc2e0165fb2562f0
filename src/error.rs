// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;

use thiserror::Error;

/// The option that caused a parse error.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Offender {
    /// A short option character (`-x`).
    Short(char),
    /// A long option token, without its leading dashes.
    ///
    /// For unknown options this is the whole token (including any `=value`
    /// part); for all other errors it is the option name only.
    Long(String),
}

impl fmt::Display for Offender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Offender::Short(c) => write!(f, "-{}", c),
            Offender::Long(name) => write!(f, "--{}", name),
        }
    }
}

/// The error type.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    //------------------------------
    // Runtime errors (user error)
    //------------------------------
    /// User specified an option that is not in the short specification
    /// or the long option table.
    #[error("unknown option {0}")]
    UnknownOption(Offender),

    /// A long option abbreviation matches more than one distinct option.
    #[error("ambiguous option {0}")]
    AmbiguousOption(Offender),

    /// A value was attached (`--name=value`) to a long option that does not
    /// accept one.
    #[error("option {0} doesn't allow an argument")]
    UnexpectedArgument(Offender),

    /// Option argument was not specified.
    #[error("option {0} requires an argument")]
    MissingArgument(Offender),

    //------------------------------
    // Handler errors
    //------------------------------
    /// Failure raised by a [Handler](crate::Handler).
    #[error("handler error: {0}")]
    Handler(String),
}

impl Error {
    /// Returns the option that caused the error (if any).
    pub fn offender(&self) -> Option<&Offender> {
        match self {
            Error::UnknownOption(o)
            | Error::AmbiguousOption(o)
            | Error::UnexpectedArgument(o)
            | Error::MissingArgument(o) => Some(o),
            Error::Handler(_) => None,
        }
    }
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        #[derive(Debug)]
        struct TestData<'a> {
            error: Error,
            display: &'a str,
        }

        let tests = &[
            TestData {
                error: Error::UnknownOption(Offender::Short('x')),
                display: "unknown option -x",
            },
            TestData {
                error: Error::UnknownOption(Offender::Long("nope=1".into())),
                display: "unknown option --nope=1",
            },
            TestData {
                error: Error::AmbiguousOption(Offender::Long("foo".into())),
                display: "ambiguous option --foo",
            },
            TestData {
                error: Error::UnexpectedArgument(Offender::Long("verbose".into())),
                display: "option --verbose doesn't allow an argument",
            },
            TestData {
                error: Error::MissingArgument(Offender::Short('b')),
                display: "option -b requires an argument",
            },
            TestData {
                error: Error::Handler("dang".into()),
                display: "handler error: dang",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(d.error.to_string(), d.display, "{}", msg);
        }
    }

    #[test]
    fn test_offender() {
        assert_eq!(
            Error::MissingArgument(Offender::Short('a')).offender(),
            Some(&Offender::Short('a'))
        );
        assert_eq!(Error::Handler("x".into()).offender(), None);
    }
}
