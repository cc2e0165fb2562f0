// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::cell::Cell;
use std::ptr;

use crate::parser::Ordering;

/// Prefix that makes the parser return operands in order.
const RETURN_IN_ORDER_PREFIX: char = '-';

/// Prefix that makes the parser stop at the first operand.
const REQUIRE_ORDER_PREFIX: char = '+';

/// Prefix that disables diagnostics.
const QUIET_PREFIX: char = ':';

/// Marks an option as needing an argument ('::' for an optional one).
const ARG_MARKER: char = ':';

/// `W;` turns `-W foo` into `--foo`.
const LONG_REDIRECT_MARKER: char = ';';

/// Option letter that may be redirected to the long option table.
pub(crate) const LONG_REDIRECT_OPT: char = 'W';

/// Used to specify whether an option is a "stand-alone" flag option
/// (needs no value), requires an option argument, or accepts an
/// optional one.
#[derive(Debug, PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Hash)]
pub enum Need {
    /// Option is stand-alone (no argument required).
    Nothing,
    /// Option needs an argument.
    Argument,
    /// Option accepts an argument, but only when attached to the option
    /// (`-ovalue` or `--opt=value`).
    Optional,
}

impl Default for Need {
    fn default() -> Self {
        Need::Nothing
    }
}

impl Need {
    /// Create a new default requirement.
    pub fn new() -> Self {
        Need::default()
    }
}

/// Parsed short option specification (the `getopt(3)` `optstring`).
///
/// Grammar: an optional leading `+`, `-` or `:` modifier followed by any
/// number of `<letter>`, `<letter>:` or `<letter>::` clauses.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct ShortSpec<'a> {
    /// Option letters, with the ordering modifier removed.
    raw: &'a str,
    /// Ordering forced by a leading `+` or `-`.
    ordering: Option<Ordering>,
}

impl<'a> ShortSpec<'a> {
    pub(crate) fn new(spec: &'a str) -> Self {
        let mut chars = spec.chars();

        let ordering = match chars.next() {
            Some(RETURN_IN_ORDER_PREFIX) => Some(Ordering::ReturnInOrder),
            Some(REQUIRE_ORDER_PREFIX) => Some(Ordering::RequireOrder),
            _ => None,
        };

        let raw = match ordering {
            Some(_) => chars.as_str(),
            None => spec,
        };

        ShortSpec { raw, ordering }
    }

    /// Ordering requested by the specification, if any.
    pub(crate) fn ordering(&self) -> Option<Ordering> {
        self.ordering
    }

    /// A leading colon (after any ordering modifier) silences diagnostics.
    pub(crate) fn quiet(&self) -> bool {
        self.raw.starts_with(QUIET_PREFIX)
    }

    /// Determine if the character appears in the specification at all.
    ///
    /// Like `strchr(3)`, this also finds the modifier characters.
    pub(crate) fn contains(&self, option: char) -> bool {
        self.raw.contains(option)
    }

    /// Returns the requirement for the option, or `None` if the option
    /// is not listed.
    ///
    /// `:` is never a valid option.
    pub(crate) fn lookup(&self, option: char) -> Option<Need> {
        if option == ARG_MARKER {
            return None;
        }

        let pos = self.raw.find(option)?;
        let mut rest = self.raw[pos + option.len_utf8()..].chars();

        let need = match (rest.next(), rest.next()) {
            (Some(ARG_MARKER), Some(ARG_MARKER)) => Need::Optional,
            (Some(ARG_MARKER), _) => Need::Argument,
            _ => Need::Nothing,
        };

        Some(need)
    }

    /// Determine if `-W foo` should be handled as the long option `foo`.
    pub(crate) fn redirects_to_long(&self, option: char) -> bool {
        if option != LONG_REDIRECT_OPT {
            return false;
        }

        self.raw
            .find(option)
            .map(|pos| self.raw[pos + option.len_utf8()..].starts_with(LONG_REDIRECT_MARKER))
            .unwrap_or(false)
    }
}

/// A long option descriptor (`struct option` in `getopt_long(3)`).
///
/// # Notes
///
/// - If `flag` is set, a match stores `val` into it and the parser
///   reports [Opt::FlagSet](crate::Opt::FlagSet). Otherwise `val` is
///   returned as the option code.
#[derive(Debug, Clone, Copy)]
pub struct LongOpt<'a> {
    /// Option name, without the leading dashes.
    pub name: &'a str,
    /// Argument requirement.
    pub needs: Need,
    /// Caller-owned location written on a match.
    pub flag: Option<&'a Cell<i32>>,
    /// Code returned (or stored into `flag`) on a match.
    pub val: i32,
}

impl<'a> LongOpt<'a> {
    /// Create a new long option that returns `val` when matched.
    pub fn new(name: &'a str, needs: Need, val: i32) -> Self {
        LongOpt {
            name,
            needs,
            flag: None,
            val,
        }
    }

    /// Specify the requirement for the option.
    pub fn needs(self, needs: Need) -> Self {
        LongOpt { needs, ..self }
    }

    /// Store `val` into `flag` rather than returning it.
    pub fn flag(self, flag: &'a Cell<i32>) -> Self {
        LongOpt {
            flag: Some(flag),
            ..self
        }
    }

    /// Two descriptors behave the same if they need the same argument,
    /// target the same flag location and carry the same value.
    pub(crate) fn same_behaviour(&self, other: &LongOpt) -> bool {
        let same_flag = match (self.flag, other.flag) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        };

        self.needs == other.needs && same_flag && self.val == other.val
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_need() {
        let n1 = Need::new();
        let n2 = Need::default();

        assert_eq!(n1, Need::Nothing);
        assert_eq!(n1, n2);
    }

    #[test]
    fn test_short_spec_modifiers() {
        #[derive(Debug)]
        struct TestData<'a> {
            spec: &'a str,
            ordering: Option<Ordering>,
            quiet: bool,
        }

        let tests = &[
            TestData {
                spec: "",
                ordering: None,
                quiet: false,
            },
            TestData {
                spec: "ab:",
                ordering: None,
                quiet: false,
            },
            TestData {
                spec: ":ab:",
                ordering: None,
                quiet: true,
            },
            TestData {
                spec: "-ab",
                ordering: Some(Ordering::ReturnInOrder),
                quiet: false,
            },
            TestData {
                spec: "+ab",
                ordering: Some(Ordering::RequireOrder),
                quiet: false,
            },
            TestData {
                spec: "+:ab",
                ordering: Some(Ordering::RequireOrder),
                quiet: true,
            },
            TestData {
                spec: "-:",
                ordering: Some(Ordering::ReturnInOrder),
                quiet: true,
            },
            TestData {
                // Only the first character is a modifier.
                spec: ":-ab",
                ordering: None,
                quiet: true,
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let spec = ShortSpec::new(d.spec);

            assert_eq!(spec.ordering(), d.ordering, "{}", msg);
            assert_eq!(spec.quiet(), d.quiet, "{}", msg);
        }
    }

    #[test]
    fn test_short_spec_lookup() {
        #[derive(Debug)]
        struct TestData<'a> {
            spec: &'a str,
            option: char,
            result: Option<Need>,
        }

        let tests = &[
            TestData {
                spec: "",
                option: 'a',
                result: None,
            },
            TestData {
                spec: "a",
                option: 'a',
                result: Some(Need::Nothing),
            },
            TestData {
                spec: "a",
                option: 'b',
                result: None,
            },
            TestData {
                spec: "a:",
                option: 'a',
                result: Some(Need::Argument),
            },
            TestData {
                spec: "a::",
                option: 'a',
                result: Some(Need::Optional),
            },
            TestData {
                spec: "xa::y",
                option: 'y',
                result: Some(Need::Nothing),
            },
            TestData {
                spec: ":a:",
                option: ':',
                result: None,
            },
            TestData {
                spec: "-a",
                option: '-',
                result: None,
            },
            TestData {
                spec: "a-",
                option: '-',
                result: Some(Need::Nothing),
            },
            TestData {
                spec: "人:",
                option: '人',
                result: Some(Need::Argument),
            },
            TestData {
                spec: "W;",
                option: 'W',
                result: Some(Need::Nothing),
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let spec = ShortSpec::new(d.spec);

            assert_eq!(spec.lookup(d.option), d.result, "{}", msg);
        }
    }

    #[test]
    fn test_short_spec_redirect() {
        assert!(ShortSpec::new("W;").redirects_to_long('W'));
        assert!(ShortSpec::new("abW;c:").redirects_to_long('W'));
        assert!(!ShortSpec::new("W").redirects_to_long('W'));
        assert!(!ShortSpec::new("W:").redirects_to_long('W'));
        assert!(!ShortSpec::new("a;").redirects_to_long('a'));
        assert!(!ShortSpec::new("").redirects_to_long('W'));
    }

    #[test]
    fn test_long_opt() {
        let flag = Cell::new(0);
        let other_flag = Cell::new(0);

        let opt = LongOpt::new("verbose", Need::Nothing, 'v' as i32);

        assert_eq!(opt.name, "verbose");
        assert_eq!(opt.needs, Need::Nothing);
        assert!(opt.flag.is_none());
        assert_eq!(opt.val, 'v' as i32);

        let opt = opt.needs(Need::Optional);
        assert_eq!(opt.needs, Need::Optional);

        let flagged = LongOpt::new("brief", Need::Nothing, 1).flag(&flag);
        assert!(flagged.flag.is_some());

        assert!(flagged.same_behaviour(&LongOpt::new("bri", Need::Nothing, 1).flag(&flag)));
        assert!(!flagged.same_behaviour(&LongOpt::new("bri", Need::Nothing, 1)));
        assert!(!flagged.same_behaviour(&LongOpt::new("bri", Need::Nothing, 1).flag(&other_flag)));
        assert!(!flagged.same_behaviour(&LongOpt::new("bri", Need::Nothing, 2).flag(&flag)));
        assert!(!flagged.same_behaviour(&LongOpt::new("bri", Need::Argument, 1).flag(&flag)));
    }
}
