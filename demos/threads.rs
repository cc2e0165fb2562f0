// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// Independent parse sessions on several threads.
use getoptr::{getopt, getopt_long_r, with_global_state, LongOpt, Need, ScanState};
use std::iter;
use std::thread;

fn main() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let long_options = [
                    LongOpt::new("name", Need::Argument, 'n' as i32),
                    LongOpt::new("count", Need::Argument, 'c' as i32),
                ];

                // Explicit session.
                let mut args: Vec<String> = vec![
                    "prog".into(),
                    "op".into(),
                    "--name".into(),
                    format!("thread-{}", i),
                    format!("--count={}", i),
                ];

                let mut state = ScanState::new();
                let mut found = Vec::<String>::new();

                while let Ok(Some(opt)) = getopt_long_r(&mut args, "", &long_options, &mut state) {
                    found.push(opt.value().unwrap_or_default().into());
                }

                // Implicit (per thread) session.
                let mut other: Vec<String> = iter::once("prog".to_string())
                    .chain(iter::repeat("-x".to_string()).take(i + 1))
                    .collect();

                let mut count = 0;

                while let Ok(Some(_)) = getopt(&mut other, "x") {
                    count += 1;
                }

                (i, found, state.index(), count, with_global_state(|s| s.index()))
            })
        })
        .collect();

    for handle in handles {
        match handle.join() {
            Ok((i, found, index, count, global_index)) => println!(
                "INFO: thread {}: found {:?}, first operand {}, -x count {}, global index {}",
                i, found, index, count, global_index
            ),
            Err(_) => eprintln!("ERROR: thread panicked"),
        }
    }
}
