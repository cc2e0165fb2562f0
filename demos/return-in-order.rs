// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// Operands returned in order, intermingled with the options.
use getoptr::{Opt, Ordering, Parser, Result, Writer};
use std::env;
use std::io;

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();

    // Same as specifying "-vo:".
    let mut parser = Parser::new("vo:")
        .ordering(Ordering::ReturnInOrder)
        .diagnostics(Writer(io::stderr()));

    let mut output = String::from("-");

    while let Some(opt) = parser.next(&mut args)? {
        match opt {
            Opt::Operand(file) => println!("INFO: file {:?} -> {:?}", file, output),
            Opt::Found { value: Some(value), .. } => output = value.into(),
            Opt::Found { .. } => println!("INFO: verbose"),
            Opt::FlagSet => (),
        }
    }

    // Anything after "--".
    for operand in &args[parser.state().index()..] {
        println!("INFO: trailing operand: {:?}", operand);
    }

    Ok(())
}
