//! Regular expressions recognizing the statements of a CPT file.
//!
//! Interval lines come in many shapes because each of the two colors
//! may be written in any of several [`Notation`]s.  One pattern is
//! compiled per meaningful pair of notations; they are tried in the
//! order of [`INTERVAL_FORMATS`].

use lazy_static::lazy_static;
use regex::Regex;

/// The ways a color may be written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Notation {
    /// Three numbers, RGB or HSV depending on the color model.
    Triple,
    /// Four numbers, always CMYK.
    Cmyk,
    /// One number, a gray level in \[0, 255\].
    Gray,
    /// `#RRGGBB`
    Hex,
    /// A color name.
    Name,
}

const FLOAT: &str = r"[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?";

impl Notation {
    /// Regular expression (without capture groups) matching a color in
    /// this notation.
    pub fn pattern(self) -> String {
        match self {
            Notation::Triple => format!(r"{FLOAT}\s+{FLOAT}\s+{FLOAT}"),
            Notation::Cmyk => format!(r"{FLOAT}\s+{FLOAT}\s+{FLOAT}\s+{FLOAT}"),
            Notation::Gray => FLOAT.to_string(),
            Notation::Hex => r"#[0-9A-Fa-f]{6}".to_string(),
            Notation::Name => r"[A-Za-z]\w+".to_string(),
        }
    }
}

use Notation::*;

/// Pairs of notations accepted for the (lower, upper) colors of an
/// interval, by decreasing priority.
pub const INTERVAL_FORMATS: [(Notation, Notation); 18] = [
    (Triple, Triple), (Triple, Hex), (Triple, Gray),
    (Cmyk, Cmyk), (Cmyk, Hex), (Cmyk, Name),
    (Gray, Gray), (Gray, Hex), (Gray, Name),
    (Hex, Hex), (Hex, Cmyk), (Hex, Name), (Hex, Gray),
    (Name, Name), (Name, Hex), (Name, Triple), (Name, Cmyk), (Name, Gray),
];

/// Notations accepted for the color of a category line.
pub const CATEGORY_FORMATS: [Notation; 5] = [Triple, Cmyk, Gray, Hex, Name];

fn interval_regex(n1: Notation, n2: Notation) -> Regex {
    let re = format!(
        r"^\s*(?P<value1>{FLOAT})\s+(?P<color1>{})\s+(?P<value2>{FLOAT})\s+(?P<color2>{})(?:\s+(?P<annotation>[ULB]))?(?:\s*;\s*(?P<label>.*))?\s*$",
        n1.pattern(), n2.pattern());
    Regex::new(&re).expect("valid interval regex")
}

fn category_regex(n: Notation) -> Regex {
    let re = format!(r"^\s*(?P<category>[FBN])\s+(?P<color>{})\s*$",
                     n.pattern());
    Regex::new(&re).expect("valid category regex")
}

lazy_static! {
    pub(crate) static ref COLOR_MODEL: Regex = Regex::new(
        r"^\s*#\s*COLOR_MODEL\s*=\s*(?P<plus>\+?)\s*(?P<model>\S+)\s*$")
        .expect("valid color model regex");

    pub(crate) static ref COMMENT: Regex = Regex::new(r"^\s*#\s*(?P<text>.*)")
        .expect("valid comment regex");

    pub(crate) static ref INTERVALS: Vec<((Notation, Notation), Regex)> =
        INTERVAL_FORMATS.iter()
        .map(|&(n1, n2)| ((n1, n2), interval_regex(n1, n2)))
        .collect();

    pub(crate) static ref CATEGORIES: Vec<(Notation, Regex)> =
        CATEGORY_FORMATS.iter().map(|&n| (n, category_regex(n))).collect();
}
