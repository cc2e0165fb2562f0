// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use crate::diag::{DashPrefix, Diagnostics, Message, Reporter};
use crate::error::{Error, Offender, Result};
use crate::long;
use crate::parser::{Ordering, Settings};
use crate::permute::permute;
use crate::spec::{LongOpt, Need, ShortSpec};
use crate::state::ScanState;

const OPT_PREFIX: char = '-';

/// Special argument that is silently consumed and used to denote the end of
/// all options; all arguments that follow are considered to be operands
/// (even if they start with `-`!)
///
/// See: `getopt(3)`.
const END_OF_OPTIONS: &str = "--";

/// Character that may never be an option.
const BAD_OPTION: char = ':';

/// Code reported for operands in "return in order" mode (see
/// [Opt::code()]).
pub const OPERAND_CODE: i32 = 1;

/// The result of successfully scanning one item.
///
/// Values borrow from the argument vector: they are never copied.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Opt<'a> {
    /// A recognised option.
    Found {
        /// The option character (as an integer) for short options, or the
        /// [LongOpt::val] of a long option.
        code: i32,
        /// Option argument (`getopt(3)`'s `optarg`).
        value: Option<&'a str>,
    },
    /// A long option matched and stored its value in its flag target.
    FlagSet,
    /// A non-option argument (only returned in
    /// [Ordering::ReturnInOrder] mode).
    Operand(&'a str),
}

impl<'a> Opt<'a> {
    /// Returns the `getopt(3)` style return code: the option code,
    /// `0` for [Opt::FlagSet] and [OPERAND_CODE] for operands.
    pub fn code(&self) -> i32 {
        match self {
            Opt::Found { code, .. } => *code,
            Opt::FlagSet => 0,
            Opt::Operand(_) => OPERAND_CODE,
        }
    }

    /// Returns the option code as a character, if it is one.
    pub fn short(&self) -> Option<char> {
        match self {
            Opt::Found { code, .. } => u32::try_from(*code).ok().and_then(char::from_u32),
            _ => None,
        }
    }

    /// Returns the option argument, or the operand.
    pub fn value(&self) -> Option<&'a str> {
        match self {
            Opt::Found { value, .. } => *value,
            Opt::FlagSet => None,
            Opt::Operand(value) => Some(*value),
        }
    }
}

/// Location of a value: the rest of `args[index]` from byte `offset`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Span {
    pub(crate) index: usize,
    pub(crate) offset: usize,
}

/// Result of one scan, with values recorded as positions so the argument
/// vector can be permuted while scanning.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    Found { code: i32, value: Option<Span> },
    FlagSet,
    Operand(usize),
    End,
}

/// Scan the next item of `args`.
///
/// This is the engine behind all the entry points. `Ok(None)` means there
/// are no more options: [ScanState::index()] is then the index of the first
/// operand.
pub(crate) fn getopt_internal<'a, S: AsRef<str>>(
    args: &'a mut [S],
    options: &str,
    long_options: Option<&[LongOpt]>,
    state: &mut ScanState,
    settings: Settings,
    diagnostics: &mut dyn Diagnostics,
) -> Result<Option<Opt<'a>>> {
    let spec = ShortSpec::new(options);

    let ordering = spec.ordering().unwrap_or(settings.ordering);

    let mut reporter = Reporter::new(diagnostics, state.print_errors && !spec.quiet());

    let step = scan(
        args,
        &spec,
        long_options,
        state,
        ordering,
        settings.long_only,
        &mut reporter,
    )?;

    // No more reordering: values can now be handed out.
    let args: &'a [S] = args;

    let opt = match step {
        Step::Found { code, value } => Opt::Found {
            code,
            value: value.map(|span| span_str(args, span)),
        },
        Step::FlagSet => Opt::FlagSet,
        Step::Operand(index) => Opt::Operand(args[index].as_ref()),
        Step::End => return Ok(None),
    };

    Ok(Some(opt))
}

fn span_str<S: AsRef<str>>(args: &[S], span: Span) -> &str {
    &args[span.index].as_ref()[span.offset..]
}

/// Report end-of-input (until the session is reset).
fn finish(state: &mut ScanState) -> Step {
    state.place = None;
    state.clear_nonopts();
    state.finished = true;

    Step::End
}

/// Options have ended just before `state.index`: move any skipped
/// non-options after the options seen since, leaving the cursor on the
/// first of them.
fn end_of_options<S>(args: &mut [S], state: &mut ScanState) -> Step {
    if let (Some(start), Some(end)) = (state.nonopt_start, state.nonopt_end) {
        permute(args, start, end, state.index);
        state.index -= end - start;
    }

    finish(state)
}

fn scan<S: AsRef<str>>(
    args: &mut [S],
    spec: &ShortSpec,
    long_options: Option<&[LongOpt]>,
    state: &mut ScanState,
    ordering: Ordering,
    long_only: bool,
    reporter: &mut Reporter,
) -> Result<Step> {
    if state.finished {
        return Ok(Step::End);
    }

    // Find the next option character, skipping (and recording) operands.
    let offset = loop {
        if let Some((_, offset)) = state.place_in(args) {
            break offset;
        }

        state.place = None;

        if state.index >= args.len() {
            if state.nonopt_end.is_none() {
                if let Some(start) = state.nonopt_start {
                    state.index = start;
                }
            }

            return Ok(end_of_options(args, state));
        }

        let arg = args[state.index].as_ref();

        let is_operand =
            !arg.starts_with(OPT_PREFIX) || (arg.len() == 1 && !spec.contains(OPT_PREFIX));

        if is_operand {
            match ordering {
                Ordering::ReturnInOrder => {
                    let index = state.index;
                    state.index += 1;

                    return Ok(Step::Operand(index));
                }
                Ordering::RequireOrder => return Ok(finish(state)),
                Ordering::Permute => (),
            }

            match (state.nonopt_start, state.nonopt_end) {
                (None, _) => state.nonopt_start = Some(state.index),
                (Some(start), Some(end)) => {
                    // Options were found after the last run of non-options:
                    // move those options in front of the run.
                    permute(args, start, end, state.index);

                    state.nonopt_start = Some(state.index - (end - start));
                    state.nonopt_end = None;
                }
                (Some(_), None) => (),
            }

            state.index += 1;

            continue;
        }

        if state.nonopt_start.is_some() && state.nonopt_end.is_none() {
            state.nonopt_end = Some(state.index);
        }

        if arg == END_OF_OPTIONS {
            state.index += 1;

            return Ok(end_of_options(args, state));
        }

        // A lone dash is only seen here if it is a valid option.
        let offset = if arg.len() == 1 { 0 } else { 1 };

        state.place = Some(offset);

        break offset;
    };

    let arg = args[state.index].as_ref();
    let rest = &arg[offset..];

    if let Some(long_options) = long_options {
        if offset > 0 && (rest.starts_with(OPT_PREFIX) || long_only) {
            let mut short_too = false;

            let start = if rest.starts_with(OPT_PREFIX) {
                state.dash_prefix = DashPrefix::Double;

                offset + OPT_PREFIX.len_utf8()
            } else {
                state.dash_prefix = DashPrefix::Single;

                if let Some(c) = rest.chars().next() {
                    short_too = c != BAD_OPTION && spec.contains(c);
                }

                offset
            };

            match long::resolve(
                args,
                state,
                start,
                long_options,
                short_too,
                long_only,
                reporter,
            ) {
                Ok(None) => (),
                Ok(Some(step)) => {
                    state.place = None;

                    return Ok(step);
                }
                Err(e) => {
                    state.place = None;

                    return Err(e);
                }
            }
        }
    }

    let optchar = match rest.chars().next() {
        Some(c) => c,
        None => return Ok(finish(state)),
    };

    let offset = offset + optchar.len_utf8();
    let at_end = offset >= arg.len();

    state.place = Some(offset);

    let need = match spec.lookup(optchar) {
        Some(need) if !(optchar == OPT_PREFIX && !at_end) => need,
        _ => {
            // "-" at the end of a cluster and not wanted: POSIX says that is
            // the end of the options.
            if optchar == OPT_PREFIX && at_end {
                state.index += 1;

                return Ok(end_of_options(args, state));
            }

            if at_end {
                state.index += 1;
                state.place = None;
            }

            let message = match long_options {
                Some(_) => Message::InvalidOption(optchar),
                None => Message::IllegalOption(optchar),
            };

            reporter.report(args, message);
            state.optopt = optchar as i32;

            return Err(Error::UnknownOption(Offender::Short(optchar)));
        }
    };

    if let Some(long_options) = long_options {
        if spec.redirects_to_long(optchar) {
            // "-W foo" or "-Wfoo" means "--foo".
            let start = if at_end {
                state.index += 1;

                if state.index >= args.len() {
                    state.place = None;

                    reporter.report(args, Message::RequiresArgument(optchar));
                    state.optopt = optchar as i32;

                    return Err(Error::MissingArgument(Offender::Short(optchar)));
                }

                0
            } else {
                offset
            };

            state.dash_prefix = DashPrefix::W;

            let result = long::resolve(
                args,
                state,
                start,
                long_options,
                false,
                long_only,
                reporter,
            );

            state.place = None;

            // Without `short_too` the resolver never declines.
            return result.map(|step| step.unwrap_or(Step::End));
        }
    }

    let code = optchar as i32;

    if need == Need::Nothing {
        if at_end {
            state.index += 1;
            state.place = None;
        }

        return Ok(Step::Found { code, value: None });
    }

    let value = if !at_end {
        Some(Span {
            index: state.index,
            offset,
        })
    } else if need == Need::Argument {
        state.index += 1;

        if state.index >= args.len() {
            state.place = None;

            reporter.report(args, Message::RequiresArgument(optchar));
            state.optopt = code;

            return Err(Error::MissingArgument(Offender::Short(optchar)));
        }

        Some(Span {
            index: state.index,
            offset: 0,
        })
    } else {
        None
    };

    state.place = None;
    state.index += 1;

    Ok(Step::Found { code, value })
}
