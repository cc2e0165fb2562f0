// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// Long options, flag targets and `-W` redirection, handled with a
/// [Handler].
use getoptr::{Handler, LongOpt, Need, Opt, Parser, Result, Writer};
use std::cell::Cell;
use std::env;
use std::io;

const COLOUR: i32 = 300;

#[derive(Clone, Debug, Default)]
struct MyHandler {
    width: Option<String>,
    colour: Option<String>,
    flags_set: usize,
}

impl Handler for MyHandler {
    fn handle(&mut self, opt: Opt) -> Result<()> {
        println!("INFO: MyHandler: opt: {:?}", opt);

        match opt {
            Opt::FlagSet => self.flags_set += 1,
            Opt::Found { code, value } if code == 'w' as i32 => self.width = value.map(String::from),
            Opt::Found { code, value } if code == COLOUR => {
                self.colour = Some(value.unwrap_or("default").into())
            }
            _ => (),
        }

        Ok(())
    }
}

fn main() -> Result<()> {
    let verbose = Cell::new(0);

    let long_options = [
        LongOpt::new("verbose", Need::Nothing, 1).flag(&verbose),
        LongOpt::new("brief", Need::Nothing, 0).flag(&verbose),
        LongOpt::new("width", Need::Argument, 'w' as i32),
        LongOpt::new("colour", Need::Optional, COLOUR),
        LongOpt::new("color", Need::Optional, COLOUR),
    ];

    let mut args: Vec<String> = env::args().collect();

    let mut handler = MyHandler::default();

    let mut parser = Parser::new("w:W;")
        .long_options(&long_options)
        .diagnostics(Writer(io::stderr()));

    let index = parser.run(&mut args, &mut handler)?;

    println!("INFO: handler: {:?}", handler);
    println!("INFO: verbose: {}", verbose.get());
    println!("INFO: operands: {:?}", &args[index..]);

    Ok(())
}
