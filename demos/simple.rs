// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// A simple example showing how to handle short options that need
/// arguments, using the classic `getopt()` interface.
use getoptr::{getopt, with_global_state, Result};
use std::env;

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();

    // Disable the default logged diagnostics: we report errors ourselves.
    with_global_state(|state| state.set_print_errors(false));

    let mut a_values = Vec::<String>::new();
    let mut b_value: Option<String> = None;
    let mut d_count = 0;

    // Support "-a <value>", "-b <value>" and the "-d" flag.
    loop {
        let opt = match getopt(&mut args, "a:b:d") {
            Ok(Some(opt)) => opt,
            Ok(None) => break,
            Err(e) => {
                eprintln!("ERROR: {}", e);
                return Err(e);
            }
        };

        match opt.short() {
            Some('a') => a_values.push(opt.value().unwrap_or_default().into()),
            Some('b') => b_value = opt.value().map(String::from),
            Some('d') => d_count += 1,
            _ => (),
        }
    }

    let index = with_global_state(|state| state.index());

    println!("INFO: -a values: {:?}", a_values);
    println!("INFO: -b value: {:?}", b_value);
    println!("INFO: -d count: {}", d_count);
    println!("INFO: operands: {:?}", &args[index..]);

    Ok(())
}
