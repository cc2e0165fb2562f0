// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::cell::RefCell;

use crate::diag::Log;
use crate::error::Result;
use crate::getopt::{getopt_internal, Opt};
use crate::parser::Settings;
use crate::spec::LongOpt;
use crate::state::ScanState;

thread_local! {
    /// The implicit session used by [getopt()], [getopt_long()] and
    /// [getopt_long_only()].
    static STATE: RefCell<ScanState> = RefCell::new(ScanState::new());
}

/// Parse the next short option of `args`, using an explicit session.
///
/// `options` uses the `getopt(3)` `optstring` syntax. Diagnostics are
/// logged (see [Log]).
pub fn getopt_r<'a, S: AsRef<str>>(
    args: &'a mut [S],
    options: &str,
    state: &mut ScanState,
) -> Result<Option<Opt<'a>>> {
    getopt_internal(args, options, None, state, Settings::new(), &mut Log)
}

/// Parse the next short or `--long` option of `args`, using an explicit
/// session.
pub fn getopt_long_r<'a, S: AsRef<str>>(
    args: &'a mut [S],
    options: &str,
    long_options: &[LongOpt],
    state: &mut ScanState,
) -> Result<Option<Opt<'a>>> {
    getopt_internal(
        args,
        options,
        Some(long_options),
        state,
        Settings::new(),
        &mut Log,
    )
}

/// Like [getopt_long_r()], but long options may also start with a single
/// dash.
pub fn getopt_long_only_r<'a, S: AsRef<str>>(
    args: &'a mut [S],
    options: &str,
    long_options: &[LongOpt],
    state: &mut ScanState,
) -> Result<Option<Opt<'a>>> {
    getopt_internal(
        args,
        options,
        Some(long_options),
        state,
        Settings::new().long_only(),
        &mut Log,
    )
}

/// Parse the next short option of `args` using the calling thread's
/// implicit session.
///
/// # Panics
///
/// If called from within a [with_global_state()] closure.
pub fn getopt<'a, S: AsRef<str>>(args: &'a mut [S], options: &str) -> Result<Option<Opt<'a>>> {
    STATE.with(move |state| getopt_r(args, options, &mut state.borrow_mut()))
}

/// [getopt_long_r()] using the calling thread's implicit session.
///
/// # Panics
///
/// If called from within a [with_global_state()] closure.
pub fn getopt_long<'a, S: AsRef<str>>(
    args: &'a mut [S],
    options: &str,
    long_options: &[LongOpt],
) -> Result<Option<Opt<'a>>> {
    STATE.with(move |state| getopt_long_r(args, options, long_options, &mut state.borrow_mut()))
}

/// [getopt_long_only_r()] using the calling thread's implicit session.
///
/// # Panics
///
/// If called from within a [with_global_state()] closure.
pub fn getopt_long_only<'a, S: AsRef<str>>(
    args: &'a mut [S],
    options: &str,
    long_options: &[LongOpt],
) -> Result<Option<Opt<'a>>> {
    STATE.with(move |state| getopt_long_only_r(args, options, long_options, &mut state.borrow_mut()))
}

/// Access the calling thread's implicit session, for example to read the
/// index of the first operand, to start a new session or to disable
/// diagnostics.
///
/// ```rust
/// use getoptr::{getopt, with_global_state};
///
/// let mut args = vec!["prog", "-x", "file"];
///
/// with_global_state(|state| state.set_print_errors(false));
///
/// assert!(getopt(&mut args, "x").unwrap().is_some());
/// assert!(getopt(&mut args, "x").unwrap().is_none());
///
/// assert_eq!(with_global_state(|state| state.index()), 2);
/// ```
pub fn with_global_state<F, T>(f: F) -> T
where
    F: FnOnce(&mut ScanState) -> T,
{
    STATE.with(|state| f(&mut state.borrow_mut()))
}
