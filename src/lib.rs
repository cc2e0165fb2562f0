// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Re-entrant `getopt(3)` / `getopt_long(3)` style command-line scanner.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Examples](#examples)
//! * [Details](#details)
//! * [Diagnostics](#diagnostics)
//! * [Summary of features and behaviour](#summary-of-features-and-behaviour)
//!
//! ---
//!
//! # Overview
//!
//! This crate scans a program's arguments one item at a time, the way the
//! C library `getopt` family does, including:
//!
//! - Clustered short options (`-abc`) with attached (`-ofile`) or
//!   separate (`-o file`) values.
//! - Long options (`--name`, `--name=value`, `--name value`) with
//!   unambiguous abbreviations (`--verb` for `--verbose`).
//! - Long options with a single dash (`-name`) in "long only" mode.
//! - `-W name` as a synonym for `--name` (if `W;` is specified).
//! - Argument permutation: options and operands may be intermingled, and
//!   the operands are moved after the options as the scan proceeds.
//!
//! Unlike `getopt(3)`, all the scanning state lives in a [ScanState] value
//! owned by the caller, so independent sessions (and threads) never
//! interfere. The classic entry points ([getopt()], [getopt_long()] and
//! [getopt_long_only()]) are also provided: they use a session per thread.
//!
//! # Quickstart
//!
//! 1. Specify the short options using the `getopt(3)` syntax:
//!
//!    - `a`: option `-a` is a flag.
//!    - `b:`: option `-b` requires an argument.
//!    - `c::`: option `-c` accepts an optional (attached) argument.
//!
//! 1. Optionally, create a table of [LongOpt]'s.
//!
//! 1. Call [Parser::next()] (or one of the `getopt*` functions) until it
//!    returns `Ok(None)`.
//!
//!    ```rust
//!    use getoptr::Parser;
//!
//!    let mut args = vec!["prog", "-a", "file1", "-b", "val", "file2"];
//!
//!    let mut parser = Parser::new("ab:");
//!
//!    while let Some(opt) = parser.next(&mut args).unwrap() {
//!        match opt.short() {
//!            Some('a') => println!("flag a"),
//!            Some('b') => println!("option b: {:?}", opt.value()),
//!            _ => unreachable!(),
//!        }
//!    }
//!
//!    // The operands are now at the end.
//!    let first_operand = parser.state().index();
//!
//!    assert_eq!(args, vec!["prog", "-a", "-b", "val", "file1", "file2"]);
//!    assert_eq!(&args[first_operand..], &["file1", "file2"]);
//!    ```
//!
//! # Examples
//!
//! Using a [Handler] and long options:
//!
//! ```rust
//! use getoptr::{Error, Handler, LongOpt, Need, Opt, Parser, Result};
//! use std::cell::Cell;
//!
//! #[derive(Debug, Default)]
//! struct MyHandler {
//!     width: usize,
//!     files: Vec<String>,
//! }
//!
//! impl Handler for MyHandler {
//!     fn handle(&mut self, opt: Opt) -> Result<()> {
//!         match opt.short() {
//!             Some('w') => {
//!                 let value = opt.value().unwrap_or_default();
//!
//!                 self.width = value
//!                     .parse()
//!                     .map_err(|_| Error::Handler(format!("bad width: {:?}", value)))?;
//!             }
//!             Some('f') => self.files.push(opt.value().unwrap_or_default().into()),
//!             _ => (),
//!         }
//!
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let verbose = Cell::new(0);
//!
//!     let long_options = [
//!         LongOpt::new("verbose", Need::Nothing, 1).flag(&verbose),
//!         LongOpt::new("width", Need::Argument, 'w' as i32),
//!         LongOpt::new("file", Need::Argument, 'f' as i32),
//!     ];
//!
//!     let mut args = vec!["prog", "--verb", "in.txt", "--width=80", "-f", "a", "--file", "b"];
//!
//!     let mut handler = MyHandler::default();
//!
//!     let index = Parser::new("w:f:")
//!         .long_options(&long_options)
//!         .run(&mut args, &mut handler)?;
//!
//!     assert_eq!(verbose.get(), 1);
//!     assert_eq!(handler.width, 80);
//!     assert_eq!(handler.files, vec!["a", "b"]);
//!     assert_eq!(&args[index..], &["in.txt"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! For further examples, try out the programs in the `demos/` directory:
//!
//! ```bash
//! $ cargo run --example simple -- -a one -d two -b foo three
//! $ cargo run --example long-options -- --verb --width=80 -W colour=red file
//! $ cargo run --example return-in-order -- one -v two -o out three
//! $ cargo run --example threads
//! ```
//!
//! # Details
//!
//! ## Specification modifiers
//!
//! The first character of the short option specification may be:
//!
//! - `+`: stop at the first operand ([Ordering::RequireOrder]).
//! - `-`: return operands in order as [Opt::Operand]
//!   ([Ordering::ReturnInOrder]).
//!
//! Either of which may be followed by `:` to disable diagnostics. These
//! modifiers override the [Settings] of the [Parser].
//!
//! ## Return values
//!
//! Every call returns one of:
//!
//! - `Ok(Some(Opt::Found { code, value }))`: an option. For short options
//!   `code` is the option character; for long options it is
//!   [LongOpt::val].
//! - `Ok(Some(Opt::FlagSet))`: a long option with a flag target was found
//!   (the flag has been set).
//! - `Ok(Some(Opt::Operand(..)))`: an operand ([Ordering::ReturnInOrder]
//!   only).
//! - `Ok(None)`: there are no more options. [ScanState::index()] is the
//!   index of the first operand.
//! - `Err(..)`: an unknown or ambiguous option, or a problem with an option
//!   argument. The scan can be continued.
//!
//! ## Special arguments
//!
//! - `--` ends the options: it is skipped and all following arguments are
//!   operands.
//! - `-` on its own is an operand, unless `-` is in the specification.
//!
//! # Diagnostics
//!
//! Errors are also reported, in the classic `getopt(3)` wording, to a
//! [Diagnostics] sink. By default these are logged as warnings with the
//! `tracing` crate (see [Log]). Use [Writer] to write them to `stderr`
//! instead.
//!
//! # Summary of features and behaviour
//!
//! - Re-entrant: no global state (other than for the `getopt*` functions,
//!   where it is per thread).
//! - Zero copy: option values borrow from the argument vector.
//! - Arguments are reordered in place, without allocating.
//! - Options and operands keep their relative order.
//! - Non-ASCII option characters are supported.

mod api;
mod diag;
mod error;
mod getopt;
mod long;
mod parser;
mod permute;
mod spec;
mod state;

pub use api::{
    getopt, getopt_long, getopt_long_only, getopt_long_only_r, getopt_long_r, getopt_r,
    with_global_state,
};
pub use diag::{Diagnostics, Log, Writer, LOG_TARGET};
pub use error::{Error, Offender, Result};
pub use getopt::{Opt, OPERAND_CODE};
pub use parser::{Handler, Ordering, Parser, Settings};
pub use spec::{LongOpt, Need};
pub use state::{ScanState, FIRST_INDEX};
