// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use crate::diag::{Message, Reporter};
use crate::error::{Error, Offender, Result};
use crate::getopt::{Span, Step};
use crate::spec::{LongOpt, Need};
use crate::state::ScanState;

/// Separates a long option name from an attached value.
const VALUE_SEPARATOR: char = '=';

/// Resolve the long option that starts at byte `start` of the current
/// argument (leading dashes already skipped).
///
/// On return the cursor has been moved past the option (and past its
/// value, if the value was the next argument).
///
/// # Parameters
///
/// - `short_too`: The option could also be a short option. An unknown
///   option is then not an error: `Ok(None)` is returned and the cursor is
///   left alone so the short option path can have a go. A single character
///   abbreviation is not allowed either.
/// - `long_only`: Any two abbreviation matches are ambiguous, even if they
///   behave the same.
pub(crate) fn resolve<S: AsRef<str>>(
    args: &[S],
    state: &mut ScanState,
    start: usize,
    long_options: &[LongOpt],
    short_too: bool,
    long_only: bool,
    reporter: &mut Reporter,
) -> Result<Option<Step>> {
    let arg_index = state.index;
    let current = &args[arg_index].as_ref()[start..];
    let dash = state.dash_prefix;

    state.index += 1;

    let (name, mut value) = match current.find(VALUE_SEPARATOR) {
        Some(pos) => (
            &current[..pos],
            Some(Span {
                index: arg_index,
                offset: start + pos + VALUE_SEPARATOR.len_utf8(),
            }),
        ),
        None => (current, None),
    };

    let mut found: Option<usize> = None;
    let mut exact = false;
    let mut ambiguous = false;

    for (i, opt) in long_options.iter().enumerate() {
        if !opt.name.starts_with(name) {
            continue;
        }

        if opt.name.len() == name.len() {
            found = Some(i);
            exact = true;
            break;
        }

        // Don't let "-x" abbreviate "--xylophone" if it is also a short
        // option.
        if short_too && name.chars().count() == 1 {
            continue;
        }

        match found {
            None => found = Some(i),
            Some(first) => {
                if long_only || !opt.same_behaviour(&long_options[first]) {
                    ambiguous = true;
                }
            }
        }
    }

    if !exact && ambiguous {
        reporter.report(args, Message::Ambiguous(dash, name));
        state.optopt = 0;

        return Err(Error::AmbiguousOption(Offender::Long(name.into())));
    }

    let i = match found {
        Some(i) => i,
        None if short_too => {
            state.index = arg_index;

            return Ok(None);
        }
        None => {
            reporter.report(args, Message::Unrecognized(dash, current));
            state.optopt = 0;

            return Err(Error::UnknownOption(Offender::Long(current.into())));
        }
    };

    let opt = &long_options[i];

    // Like GNU, only expose the value when it isn't stored in a flag.
    let code = match opt.flag {
        Some(_) => 0,
        None => opt.val,
    };

    match opt.needs {
        Need::Nothing if value.is_some() => {
            reporter.report(args, Message::NoArgumentAllowed(dash, name));
            state.optopt = code;

            return Err(Error::UnexpectedArgument(Offender::Long(name.into())));
        }
        Need::Argument if value.is_none() => {
            if state.index >= args.len() {
                reporter.report(args, Message::LongRequiresArgument(dash, current));
                state.optopt = code;

                return Err(Error::MissingArgument(Offender::Long(name.into())));
            }

            value = Some(Span {
                index: state.index,
                offset: 0,
            });

            state.index += 1;
        }
        _ => (),
    }

    state.long_index = Some(i);

    match opt.flag {
        Some(flag) => {
            flag.set(opt.val);

            Ok(Some(Step::FlagSet))
        }
        None => Ok(Some(Step::Found {
            code: opt.val,
            value,
        })),
    }
}
