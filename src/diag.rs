// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;
use std::io::Write;

use tracing::warn;

/// Target used for all log records emitted by [Log].
pub const LOG_TARGET: &str = "getopt";

/// Destination for human readable parse diagnostics.
///
/// The parser reports every error it returns to a sink (unless
/// diagnostics are disabled). The sink is write-only: nothing it does
/// affects parsing.
pub trait Diagnostics {
    /// Report a diagnostic.
    ///
    /// # Parameters
    ///
    /// - `program` - The program name (the first argument, or `""`).
    /// - `message` - The message, in classic `getopt(3)` wording.
    fn report(&mut self, program: &str, message: &str);
}

impl<'a> fmt::Debug for dyn Diagnostics + 'a {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Diagnostics: {:p}", self)
    }
}

/// Sink that logs diagnostics as warnings via `tracing`.
///
/// This is the sink used by the free-standing `getopt*` functions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Log;

impl Diagnostics for Log {
    fn report(&mut self, program: &str, message: &str) {
        warn!(target: LOG_TARGET, program, "{}", message);
    }
}

/// Sink that writes `<program>: <message>` lines, the way `getopt(3)`
/// writes to stderr.
#[derive(Clone, Debug, Default)]
pub struct Writer<W>(pub W);

impl<W: Write> Diagnostics for Writer<W> {
    fn report(&mut self, program: &str, message: &str) {
        // Diagnostics are best effort: a failed write is deliberately
        // ignored and never affects parsing.
        let _ = writeln!(self.0, "{}: {}", program, message);
    }
}

/// Collects the messages (without the program name).
impl Diagnostics for Vec<String> {
    fn report(&mut self, _program: &str, message: &str) {
        self.push(message.into());
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn report(&mut self, program: &str, message: &str) {
        (**self).report(program, message);
    }
}

/// Dash prefix of the long option currently being resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DashPrefix {
    /// No long option seen yet.
    None,
    /// `-name` (long-only mode).
    Single,
    /// `--name`.
    Double,
    /// `-W name`.
    W,
}

impl DashPrefix {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            DashPrefix::None => "",
            DashPrefix::Single => "-",
            DashPrefix::Double => "--",
            DashPrefix::W => "-W ",
        }
    }
}

/// A diagnostic message. The text of each variant matches the
/// traditional BSD/GNU `getopt` wording so scripts scraping stderr keep
/// working.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Message<'a> {
    /// Unknown short option (short options only).
    IllegalOption(char),
    /// Unknown short option (long options enabled).
    InvalidOption(char),
    /// Short option with a missing argument.
    RequiresArgument(char),
    /// Long option with a missing argument.
    LongRequiresArgument(DashPrefix, &'a str),
    /// Abbreviation matching several long options.
    Ambiguous(DashPrefix, &'a str),
    /// Value attached to a long option that takes none.
    NoArgumentAllowed(DashPrefix, &'a str),
    /// Unknown long option.
    Unrecognized(DashPrefix, &'a str),
}

impl fmt::Display for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Message::IllegalOption(c) => write!(f, "illegal option -- {}", c),
            Message::InvalidOption(c) => write!(f, "invalid option -- {}", c),
            Message::RequiresArgument(c) => write!(f, "option requires an argument -- {}", c),
            Message::LongRequiresArgument(dash, name) => {
                write!(f, "option `{}{}' requires an argument", dash.as_str(), name)
            }
            Message::Ambiguous(dash, name) => {
                write!(f, "option `{}{}' is ambiguous", dash.as_str(), name)
            }
            Message::NoArgumentAllowed(dash, name) => {
                write!(f, "option `{}{}' doesn't allow an argument", dash.as_str(), name)
            }
            Message::Unrecognized(dash, name) => {
                write!(f, "unrecognized option `{}{}'", dash.as_str(), name)
            }
        }
    }
}

/// Routes messages to a sink, honouring the session's error switch.
pub(crate) struct Reporter<'d> {
    sink: &'d mut dyn Diagnostics,
    enabled: bool,
}

impl<'d> Reporter<'d> {
    pub(crate) fn new(sink: &'d mut dyn Diagnostics, enabled: bool) -> Self {
        Reporter { sink, enabled }
    }

    pub(crate) fn report<S: AsRef<str>>(&mut self, args: &[S], message: Message) {
        if !self.enabled {
            return;
        }

        let program = args.first().map(|a| a.as_ref()).unwrap_or("");

        self.sink.report(program, &message.to_string());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use regex::Regex;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Metadata, Subscriber};

    /// A log event seen by [LogCapture].
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub(crate) struct LogEvent {
        pub(crate) level: Level,
        pub(crate) target: String,
        pub(crate) program: Option<String>,
        pub(crate) message: String,
    }

    impl LogEvent {
        pub(crate) fn warning(program: &str, message: &str) -> Self {
            LogEvent {
                level: Level::WARN,
                target: LOG_TARGET.into(),
                program: Some(program.into()),
                message: message.into(),
            }
        }
    }

    struct EventVisitor<'a>(&'a mut LogEvent);

    impl Visit for EventVisitor<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            match field.name() {
                "message" => self.0.message = value.into(),
                "program" => self.0.program = Some(value.into()),
                _ => (),
            }
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            match field.name() {
                "message" => self.0.message = format!("{:?}", value),
                "program" => self.0.program = Some(format!("{:?}", value)),
                _ => (),
            }
        }
    }

    /// Subscriber that records every event.
    #[derive(Clone, Default)]
    struct LogCapture(Arc<Mutex<Vec<LogEvent>>>);

    impl Subscriber for LogCapture {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _span: &Attributes<'_>) -> Id {
            Id::from_u64(1)
        }

        fn record(&self, _span: &Id, _values: &Record<'_>) {}

        fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

        fn event(&self, event: &Event<'_>) {
            let metadata = event.metadata();

            let mut log_event = LogEvent {
                level: *metadata.level(),
                target: metadata.target().into(),
                program: None,
                message: String::new(),
            };

            event.record(&mut EventVisitor(&mut log_event));

            self.0.lock().unwrap().push(log_event);
        }

        fn enter(&self, _span: &Id) {}

        fn exit(&self, _span: &Id) {}
    }

    /// Run `f` and return the events it logged on this thread.
    pub(crate) fn capture_logs<F: FnOnce()>(f: F) -> Vec<LogEvent> {
        let capture = LogCapture::default();

        tracing::subscriber::with_default(capture.clone(), f);

        let events = capture.0.lock().unwrap();

        events.clone()
    }

    /// Writer that stores all data written to it.
    #[derive(Default, Clone)]
    struct BufWriter(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for BufWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.0.lock().unwrap().flush()
        }
    }

    impl ToString for BufWriter {
        fn to_string(&self) -> String {
            let output = self.0.lock().unwrap();

            String::from_utf8(output.clone()).unwrap()
        }
    }

    #[test]
    fn test_message_display() {
        #[derive(Debug)]
        struct TestData<'a> {
            message: Message<'a>,
            display: &'a str,
        }

        let tests = &[
            TestData {
                message: Message::IllegalOption('x'),
                display: "illegal option -- x",
            },
            TestData {
                message: Message::InvalidOption('x'),
                display: "invalid option -- x",
            },
            TestData {
                message: Message::RequiresArgument('b'),
                display: "option requires an argument -- b",
            },
            TestData {
                message: Message::LongRequiresArgument(DashPrefix::Double, "width"),
                display: "option `--width' requires an argument",
            },
            TestData {
                message: Message::LongRequiresArgument(DashPrefix::W, "width"),
                display: "option `-W width' requires an argument",
            },
            TestData {
                message: Message::Ambiguous(DashPrefix::Double, "foo"),
                display: "option `--foo' is ambiguous",
            },
            TestData {
                message: Message::Ambiguous(DashPrefix::Single, "fo"),
                display: "option `-fo' is ambiguous",
            },
            TestData {
                message: Message::NoArgumentAllowed(DashPrefix::Double, "verbose"),
                display: "option `--verbose' doesn't allow an argument",
            },
            TestData {
                message: Message::Unrecognized(DashPrefix::Double, "nope=1"),
                display: "unrecognized option `--nope=1'",
            },
            TestData {
                message: Message::Unrecognized(DashPrefix::None, "nope"),
                display: "unrecognized option `nope'",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            assert_eq!(d.message.to_string(), d.display, "{}", msg);
        }
    }

    #[test]
    fn test_writer_sink() {
        let buf = BufWriter::default();
        let mut sink = Writer(buf.clone());

        let args = vec!["prog", "-x"];

        let mut reporter = Reporter::new(&mut sink, true);
        reporter.report(&args, Message::InvalidOption('x'));
        reporter.report(&args, Message::Unrecognized(DashPrefix::Double, "foo"));

        let value = buf.to_string();

        let re = Regex::new(r"^prog: invalid option -- x\nprog: unrecognized option `--foo'\n$")
            .unwrap();
        assert!(re.is_match(&value), "value: {:?}", value);
    }

    #[test]
    fn test_reporter_disabled() {
        let mut sink: Vec<String> = Vec::new();

        let mut reporter = Reporter::new(&mut sink, false);
        reporter.report(&["prog"], Message::IllegalOption('x'));

        assert!(sink.is_empty());
    }

    #[test]
    fn test_reporter_empty_args() {
        let buf = BufWriter::default();
        let mut sink = Writer(buf.clone());

        let args: Vec<String> = Vec::new();

        Reporter::new(&mut sink, true).report(&args, Message::IllegalOption('q'));

        assert_eq!(buf.to_string(), ": illegal option -- q\n");
    }

    #[test]
    fn test_log_sink() {
        #[derive(Debug)]
        struct TestData<'a> {
            message: Message<'a>,
            enabled: bool,
            events: Vec<LogEvent>,
        }

        let tests = &[
            TestData {
                message: Message::IllegalOption('x'),
                enabled: true,
                events: vec![LogEvent::warning("prog", "illegal option -- x")],
            },
            TestData {
                message: Message::Ambiguous(DashPrefix::Double, "foo"),
                enabled: true,
                events: vec![LogEvent::warning("prog", "option `--foo' is ambiguous")],
            },
            TestData {
                message: Message::IllegalOption('x'),
                enabled: false,
                events: vec![],
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let events = capture_logs(|| {
                let mut sink = Log;

                Reporter::new(&mut sink, d.enabled).report(&["prog", "-x"], d.message);
            });

            assert_eq!(events, d.events, "{}", msg);
        }
    }

    #[test]
    fn test_diagnostics_display() {
        let mut sinks: Vec<Box<dyn Diagnostics>> = Vec::new();
        sinks.push(Box::new(Log));
        sinks.push(Box::new(Vec::<String>::new()));
        sinks.push(Box::new(Writer(Vec::<u8>::new())));

        for (i, sink) in sinks.iter().enumerate() {
            let value = format!("{:?}", sink);

            assert!(value.starts_with("Diagnostics: "), "test[{}]: {:?}", i, value);
        }
    }
}
