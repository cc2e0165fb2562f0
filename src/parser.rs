// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;

use crate::diag::{Diagnostics, Log};
use crate::error::Result;
use crate::getopt::{getopt_internal, Opt};
use crate::spec::LongOpt;
use crate::state::ScanState;

/// How operands (non-option arguments) are treated.
///
/// A leading `-` or `+` in the short option specification overrides the
/// value in [Settings].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Ordering {
    /// Skip operands, moving them after the options as parsing proceeds.
    Permute,
    /// Return each operand in turn as [Opt::Operand] (spec prefix `-`).
    ReturnInOrder,
    /// Stop at the first operand (spec prefix `+`; POSIX behaviour).
    RequireOrder,
}

impl Default for Ordering {
    fn default() -> Self {
        Ordering::Permute
    }
}

/// Used to modify the parsing behaviour.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Settings {
    /// Operand handling.
    pub(crate) ordering: Ordering,

    /// If set, long options may also be introduced with a single dash
    /// (`-name`), as `getopt_long_only(3)` does.
    pub(crate) long_only: bool,
}

impl Settings {
    /// Create a new settings object.
    pub fn new() -> Self {
        Settings::default()
    }

    /// Specify how operands are handled.
    pub fn ordering(self, ordering: Ordering) -> Self {
        Settings { ordering, ..self }
    }

    /// Allow long options to start with a single dash.
    ///
    /// A single dash argument that does not match a long option is still
    /// parsed as short options if its first character is one.
    pub fn long_only(self) -> Self {
        Settings {
            long_only: true,
            ..self
        }
    }
}

/// Trait that an option handler must implement.
pub trait Handler {
    /// Function that will handle every item the parser returns.
    ///
    /// # Return value
    ///
    /// - If the handler logic succeeds, return `Ok(())`.
    /// - If the handler needs to fail, it should return
    ///   [Error::Handler](crate::Error::Handler). Parsing stops and the
    ///   error is returned to the caller of [Parser::run()].
    fn handle(&mut self, opt: Opt<'_>) -> Result<()>;
}

impl<'a> fmt::Debug for dyn Handler + 'a {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handler: {:p}", self)
    }
}

/// A parse session: a specification plus the cursor that walks one
/// argument vector.
///
/// # Example
///
/// ```rust
/// use getoptr::Parser;
///
/// let mut args = vec!["prog", "-v", "file", "-o", "out"];
///
/// let mut parser = Parser::new("vo:");
///
/// let mut seen = Vec::new();
///
/// while let Some(opt) = parser.next(&mut args).unwrap() {
///     seen.push((opt.short(), opt.value().map(String::from)));
/// }
///
/// assert_eq!(seen, vec![(Some('v'), None), (Some('o'), Some("out".into()))]);
///
/// // Operands are moved to the end.
/// assert_eq!(&args[parser.state().index()..], &["file"]);
/// ```
#[derive(Debug)]
pub struct Parser<'o> {
    options: &'o str,
    long_options: Option<&'o [LongOpt<'o>]>,
    settings: Settings,
    state: ScanState,
    diagnostics: Box<dyn Diagnostics + 'o>,
}

impl<'o> Parser<'o> {
    /// Create a parser for the specified short option specification
    /// (`getopt(3)` `optstring` syntax).
    pub fn new(options: &'o str) -> Self {
        Parser {
            options,
            long_options: None,
            settings: Settings::default(),
            state: ScanState::default(),
            diagnostics: Box::new(Log),
        }
    }

    /// Enable long options.
    pub fn long_options(self, long_options: &'o [LongOpt<'o>]) -> Self {
        Parser {
            long_options: Some(long_options),
            ..self
        }
    }

    /// Specify any settings for the parser.
    pub fn settings(self, settings: Settings) -> Self {
        Parser { settings, ..self }
    }

    /// Allow long options to start with a single dash.
    ///
    /// # Note
    ///
    /// This is an alternative to calling the `settings()` method.
    pub fn long_only(self) -> Self {
        Parser {
            settings: self.settings.long_only(),
            ..self
        }
    }

    /// Specify how operands are handled.
    ///
    /// # Note
    ///
    /// This is an alternative to calling the `settings()` method.
    pub fn ordering(self, ordering: Ordering) -> Self {
        Parser {
            settings: self.settings.ordering(ordering),
            ..self
        }
    }

    /// Don't emit diagnostics (errors are still returned).
    pub fn quiet(mut self) -> Self {
        self.state.set_print_errors(false);
        self
    }

    /// Send diagnostics to the specified sink rather than logging them.
    pub fn diagnostics<D: Diagnostics + 'o>(self, diagnostics: D) -> Self {
        Parser {
            diagnostics: Box::new(diagnostics),
            ..self
        }
    }

    /// The session state (for example, to find the first operand once
    /// parsing has finished).
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Mutable access to the session state.
    pub fn state_mut(&mut self) -> &mut ScanState {
        &mut self.state
    }

    /// Start a new session, for example to parse another argument vector.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Parse the next item.
    ///
    /// `args` must be the same vector on every call of a session: it is
    /// reordered as parsing proceeds. Returns `Ok(None)` once all options
    /// have been seen.
    pub fn next<'a, S: AsRef<str>>(&mut self, args: &'a mut [S]) -> Result<Option<Opt<'a>>> {
        getopt_internal(
            args,
            self.options,
            self.long_options,
            &mut self.state,
            self.settings,
            self.diagnostics.as_mut(),
        )
    }

    /// Parse all of `args`, calling the handler for every item.
    ///
    /// Parsing stops at the first error, whether it comes from the parser
    /// or the handler.
    ///
    /// # Return value
    ///
    /// The index of the first operand.
    pub fn run<S, H>(&mut self, args: &mut [S], handler: &mut H) -> Result<usize>
    where
        S: AsRef<str>,
        H: Handler + ?Sized,
    {
        while let Some(opt) = self.next(args)? {
            handler.handle(opt)?;
        }

        Ok(self.state.index())
    }
}
