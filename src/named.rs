//! Named colors.
//!
//! CPT files may write a color as a bare name (`red`,
//! `DarkSlateGray`,…).  Names are resolved through a [`ColorLookup`]
//! given to the reader; [`X11Colors::standard`] is the dictionary
//! used by default.

use std::{collections::HashMap,
          hash::BuildHasher,
          io::BufRead};
use lazy_static::lazy_static;
use rgb::RGB8;

/// A dictionary mapping color names to RGB triplets.
pub trait ColorLookup {
    /// Return the color named `name`.  Implementations must ignore
    /// case and spaces (see [`normalize_name`]).
    fn lookup(&self, name: &str) -> Option<RGB8>;
}

/// Normalize a color name: remove spaces and lowercase it.
///
/// # Example
///
/// ```
/// use color_cpt::normalize_name;
/// assert_eq!(normalize_name("Dark Slate Gray"), "darkslategray");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// The keys of the map must already be normalized (see
/// [`normalize_name`]); other keys are never found.
impl<S: BuildHasher> ColorLookup for HashMap<String, RGB8, S> {
    fn lookup(&self, name: &str) -> Option<RGB8> {
        self.get(&normalize_name(name)).copied()
    }
}

/// Color dictionary in the format of X11 `rgb.txt`.
#[derive(Debug, Clone, Default)]
pub struct X11Colors {
    colors: HashMap<String, RGB8>,
}

lazy_static! {
    static ref STANDARD: X11Colors = X11Colors::parse(
        include_str!("named/rgb.txt"));
}

impl X11Colors {
    /// The built-in X11 color names.
    pub fn standard() -> &'static X11Colors { &STANDARD }

    /// Parse a dictionary in `rgb.txt` format: one color per line
    /// given as `red green blue name` where the name may contain
    /// spaces.  Lines starting with `!` and lines that do not start
    /// with three integers are skipped.
    pub fn parse(s: &str) -> Self {
        let mut colors = Self::default();
        for line in s.lines() {
            colors.add_line(line);
        }
        colors
    }

    /// Same as [`X11Colors::parse`] but read from `r`.
    pub fn from_reader(r: impl BufRead) -> std::io::Result<Self> {
        let mut colors = Self::default();
        for line in r.lines() {
            colors.add_line(&line?);
        }
        Ok(colors)
    }

    fn add_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('!') { return }
        let mut fields = line.split_whitespace();
        let mut rgb = [0u8; 3];
        for c in &mut rgb {
            match fields.next().map(str::parse::<u8>) {
                Some(Ok(x)) => *c = x,
                _ => {
                    log::warn!("Could not read valid color from {line:?}");
                    return
                }
            }
        }
        let name: String = fields.collect();
        if name.is_empty() {
            log::warn!("Color without a name: {line:?}");
            return
        }
        let [r, g, b] = rgb;
        self.insert(&name, RGB8 { r, g, b });
    }

    /// Add the color `name`, replacing any color with the same
    /// normalized name.
    pub fn insert(&mut self, name: &str, color: RGB8) {
        let key = normalize_name(name);
        if let Some(old) = self.colors.insert(key, color) {
            if old != color {
                log::warn!("Duplicate color {name} ({old:?} replaced by {color:?})");
            }
        }
    }

    /// Number of (normalized) names in the dictionary.
    pub fn len(&self) -> usize { self.colors.len() }

    pub fn is_empty(&self) -> bool { self.colors.is_empty() }
}

impl ColorLookup for X11Colors {
    fn lookup(&self, name: &str) -> Option<RGB8> {
        self.colors.get(&normalize_name(name)).copied()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_and_space_insensitive() {
        let x11 = X11Colors::standard();
        let c = x11.lookup("darkslategray");
        assert_eq!(c, Some(RGB8 { r: 47, g: 79, b: 79 }));
        assert_eq!(x11.lookup("Dark Slate Gray"), c);
        assert_eq!(x11.lookup("DARKSLATEGRAY"), c);
        assert_eq!(x11.lookup("DarkSlateGrey"), c);
        assert_eq!(x11.lookup("no such color"), None);
    }

    #[test]
    fn numbered_variants() {
        let x11 = X11Colors::standard();
        assert_eq!(x11.lookup("gray50"), Some(RGB8 { r: 127, g: 127, b: 127 }));
        assert_eq!(x11.lookup("grey0"), Some(RGB8 { r: 0, g: 0, b: 0 }));
        assert_eq!(x11.lookup("gray100"), Some(RGB8 { r: 255, g: 255, b: 255 }));
        assert_eq!(x11.lookup("red3"), Some(RGB8 { r: 205, g: 0, b: 0 }));
        assert_eq!(x11.lookup("SeaGreen4"), Some(RGB8 { r: 46, g: 139, b: 87 }));
    }

    #[test]
    fn parse_rgb_txt() {
        let x = X11Colors::parse("! comment\n\
                                  255 0 0\t\tred\n\
                                  1 2 3 navy blue\n\
                                  300 0 0 bad\n\
                                  \n\
                                  4 5 6\n");
        assert_eq!(x.len(), 2);
        assert_eq!(x.lookup("Red"), Some(RGB8 { r: 255, g: 0, b: 0 }));
        assert_eq!(x.lookup("NavyBlue"), Some(RGB8 { r: 1, g: 2, b: 3 }));
        assert_eq!(x.lookup("bad"), None);
    }

    #[test]
    fn from_reader() {
        let x = X11Colors::from_reader("0 0 255 blue\n".as_bytes()).unwrap();
        assert_eq!(x.lookup("BLUE"), Some(RGB8 { r: 0, g: 0, b: 255 }));
    }

    #[test]
    fn hash_map_lookup() {
        let mut m = HashMap::new();
        m.insert("seagreen".to_string(), RGB8 { r: 46, g: 139, b: 87 });
        assert_eq!(m.lookup("Sea Green"), Some(RGB8 { r: 46, g: 139, b: 87 }));
        assert_eq!(m.lookup("seagreen"), Some(RGB8 { r: 46, g: 139, b: 87 }));
        // Keys are not normalized by the map.
        m.insert("Dark Red".to_string(), RGB8 { r: 139, g: 0, b: 0 });
        assert_eq!(m.lookup("Dark Red"), None);
        assert_eq!(m.lookup("darkred"), None);
    }
}
