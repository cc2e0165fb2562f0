// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use crate::diag::DashPrefix;

/// Index of the first argument to scan (the program name is skipped).
pub const FIRST_INDEX: usize = 1;

/// Cursor shared by successive calls of a single parse session.
///
/// This is the explicit-state equivalent of the `optind`, `opterr`,
/// `optopt` and scanning pointer globals of `getopt(3)`. Each session
/// (for example, one per thread) needs its own `ScanState`, and must
/// always be used with the same argument vector until it is reset.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScanState {
    /// Index of the next argument to scan (`optind`).
    pub(crate) index: usize,
    /// Byte offset of the next option character within the current
    /// argument. `None` between arguments.
    pub(crate) place: Option<usize>,
    /// First argument of a run of skipped non-options.
    pub(crate) nonopt_start: Option<usize>,
    /// End of the run of skipped non-options, once options follow it.
    pub(crate) nonopt_end: Option<usize>,
    /// Option code that caused the last error (`optopt`).
    pub(crate) optopt: i32,
    /// Table index of the last long option matched.
    pub(crate) long_index: Option<usize>,
    /// Prefix of the long option being resolved.
    pub(crate) dash_prefix: DashPrefix,
    /// Set once end-of-input has been reported.
    pub(crate) finished: bool,
    /// Whether diagnostics are emitted (`opterr`).
    pub(crate) print_errors: bool,
}

impl Default for ScanState {
    fn default() -> Self {
        ScanState {
            index: FIRST_INDEX,
            place: None,
            nonopt_start: None,
            nonopt_end: None,
            optopt: 0,
            long_index: None,
            dash_prefix: DashPrefix::None,
            finished: false,
            print_errors: true,
        }
    }
}

impl ScanState {
    /// Create the state for a new parse session.
    pub fn new() -> Self {
        ScanState::default()
    }

    /// Start a new parse session.
    ///
    /// The diagnostics setting is preserved.
    pub fn reset(&mut self) {
        *self = ScanState {
            print_errors: self.print_errors,
            ..ScanState::default()
        }
    }

    /// Index of the next argument to scan (`optind`).
    ///
    /// Once end-of-input has been reported this is the index of the first
    /// operand (or the number of arguments if there are none).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the cursor to the start of the argument at `index`.
    ///
    /// Any partially scanned option cluster and pending permutation are
    /// dropped. As with `getopt(3)`, an index of `0` means `1`.
    pub fn set_index(&mut self, index: usize) {
        self.index = index.max(FIRST_INDEX);
        self.place = None;
        self.nonopt_start = None;
        self.nonopt_end = None;
        self.finished = false;
    }

    /// Code of the option that caused the last error (`optopt`).
    ///
    /// For short options this is the option character. For long options it
    /// is the option's value, or `0` if it has a flag target or was not
    /// recognised.
    pub fn optopt(&self) -> i32 {
        self.optopt
    }

    /// Index into the long option table of the last long option matched.
    pub fn long_index(&self) -> Option<usize> {
        self.long_index
    }

    /// Whether diagnostics are emitted (`opterr`).
    pub fn print_errors(&self) -> bool {
        self.print_errors
    }

    /// Enable or disable diagnostics.
    pub fn set_print_errors(&mut self, print_errors: bool) {
        self.print_errors = print_errors;
    }

    /// Determine if end-of-input has been reported.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// The current argument and scan offset, if an option cluster is being
    /// scanned. An offset at the end of the argument counts as no offset.
    pub(crate) fn place_in<'a, S: AsRef<str>>(&self, args: &'a [S]) -> Option<(&'a str, usize)> {
        let offset = self.place?;
        let arg = args.get(self.index)?.as_ref();

        if offset < arg.len() {
            Some((arg, offset))
        } else {
            None
        }
    }

    /// Forget any pending run of non-options.
    pub(crate) fn clear_nonopts(&mut self) {
        self.nonopt_start = None;
        self.nonopt_end = None;
    }
}
