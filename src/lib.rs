//! Color Palette Tables (CPT files).
//!
//! A CPT file, as used by the [Generic Mapping
//! Tools](https://docs.generic-mapping-tools.org/latest/reference/features.html#cpt-files),
//! maps values to colors through a list of intervals:
//!
//! ```text
//! # COLOR_MODEL = RGB
//! 0     black   10    #0000ff  L ; deep
//! 10    0 0 255 20    255 255 255
//! B     black
//! F     white
//! N     128
//! ```
//!
//! - [`CptReader`] reads such a source into [`Statement`]s,
//! - [`build`] folds the statements into a [`ColorPaletteTable`],
//! - [`ColorPaletteTable::evaluate`] interpolates the color of a
//!   value.
//!
//! Colors are [`Color`] values in the RGB, HSV or CMYK model.

use std::{fs::File,
          io::{BufRead, BufReader},
          path::Path,
          str::FromStr};

mod color;
mod error;
mod named;
pub mod build;
pub mod reader;

pub use color::{Cmyk, Color, ColorModel, Hsv};
pub use error::{Error, Result};
pub use named::{normalize_name, ColorLookup, X11Colors};
pub use reader::{CptReader, Statement};

/// Which bounds of an interval should be annotated on a color bar.
/// Not used for evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Annotation {
    #[default]
    None,
    Lower,
    Upper,
    Both,
}

/// One end of an interval: a value and its color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    pub value: f64,
    pub color: Color,
}

impl Boundary {
    #[inline]
    pub fn new(value: f64, color: Color) -> Self { Boundary { value, color } }
}

/// A colored interval, defined by two values with their colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    lower: Boundary,
    upper: Boundary, // Invariant: lower.value <= upper.value
    annotation: Annotation,
    label: Option<String>,
    model: ColorModel, // model of both boundary colors
}

impl Interval {
    /// Return the interval from `lower` to `upper` whose colors are
    /// interpolated in the `model` color space.  Both boundary colors
    /// are converted to `model`.
    ///
    /// Fails with [`Error::Domain`] unless `lower.value <= upper.value`.
    pub fn new(lower: Boundary, upper: Boundary, annotation: Annotation,
               label: Option<String>, model: ColorModel) -> Result<Self> {
        if !(lower.value <= upper.value) {
            return Err(Error::Domain { lower: lower.value,
                                       upper: upper.value })
        }
        let lower = Boundary::new(lower.value, lower.color.convert(model));
        let upper = Boundary::new(upper.value, upper.color.convert(model));
        Ok(Interval { lower, upper, annotation, label, model })
    }

    #[inline]
    pub fn lower(&self) -> &Boundary { &self.lower }

    #[inline]
    pub fn upper(&self) -> &Boundary { &self.upper }

    pub fn annotation(&self) -> Annotation { self.annotation }

    pub fn label(&self) -> Option<&str> { self.label.as_deref() }

    /// The color model in which the interpolation is performed.
    pub fn interpolation_model(&self) -> ColorModel { self.model }

    /// Says whether `value` belongs to the closed interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower.value <= value && value <= self.upper.value
    }

    /// Return the color of `value`, interpolated linearly between the
    /// boundary colors, or [`Error::OutOfRange`] if `value` is not in
    /// the interval.
    pub fn interpolate(&self, value: f64) -> Result<Color> {
        if self.contains(value) {
            Ok(self.color_at(value))
        } else {
            Err(Error::OutOfRange { value, lower: self.lower.value,
                                    upper: self.upper.value })
        }
    }

    /// Same as [`Interval::interpolate`] without checking that
    /// `value` is in the interval.
    fn color_at(&self, x: f64) -> Color {
        let Interval { lower, upper, .. } = self;
        if lower.value == upper.value || x == lower.value { lower.color }
        else if x == upper.value { upper.color }
        else {
            let t = (x - lower.value) / (upper.value - lower.value);
            lower.color.lerp(&upper.color, t)
        }
    }
}

/// A function from values to colors.
///
/// The function is defined through closed intervals.  Intervals may
/// overlap, in which case the first one (in insertion order)
/// containing a value determines its color.
#[derive(Clone, Debug)]
pub struct ColorPaletteTable {
    intervals: Vec<Interval>,
    background: Color,
    foreground: Color,
    nan_color: Color,
    color_model: ColorModel,
    description: String,
}

impl Default for ColorPaletteTable {
    fn default() -> Self {
        ColorPaletteTable { intervals: vec![],
                            background: Color::BLACK,
                            foreground: Color::WHITE,
                            nan_color: Color::GRAY,
                            color_model: ColorModel::Rgb,
                            description: String::new() }
    }
}

impl ColorPaletteTable {
    /// An empty table with a black background, a white foreground,
    /// a gray color for NaN and returning RGB colors.
    pub fn new() -> Self { Self::default() }

    /// Read a table from the CPT source `r`, resolving color names
    /// with the X11 dictionary.
    pub fn from_reader(r: impl BufRead) -> Result<Self> {
        let mut reader = CptReader::default();
        reader.read(r)?;
        reader.build()
    }

    /// Read a table from the CPT file `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Number of intervals.
    pub fn len(&self) -> usize { self.intervals.len() }

    pub fn is_empty(&self) -> bool { self.intervals.is_empty() }

    /// The intervals in insertion order.
    pub fn intervals(&self) -> &[Interval] { &self.intervals }

    /// Add `interval` after all the existing ones (it thus has the
    /// lowest priority).
    pub fn push(&mut self, interval: Interval) { self.intervals.push(interval) }

    /// The comments of the source, one per line.
    pub fn description(&self) -> &str { &self.description }

    pub fn set_description(&mut self, d: impl Into<String>) {
        self.description = d.into()
    }

    /// Color of values below all intervals.
    pub fn background(&self) -> Color { self.background }

    pub fn set_background(&mut self, c: Color) { self.background = c }

    /// Color of values above all intervals.
    pub fn foreground(&self) -> Color { self.foreground }

    pub fn set_foreground(&mut self, c: Color) { self.foreground = c }

    /// Color of NaN.
    pub fn nan_color(&self) -> Color { self.nan_color }

    pub fn set_nan_color(&mut self, c: Color) { self.nan_color = c }

    /// The color model of the colors returned by [`Self::eval`].
    pub fn color_model(&self) -> ColorModel { self.color_model }

    pub fn set_color_model(&mut self, m: ColorModel) { self.color_model = m }

    /// The smallest lower bound and the largest upper bound of the
    /// intervals, or `None` if the table is empty.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.intervals.iter();
        let first = iter.next()?;
        Some(iter.fold((first.lower.value, first.upper.value),
                       |(a, b), i| (a.min(i.lower.value),
                                    b.max(i.upper.value))))
    }

    /// Return the color of `value` expressed in `model` (by default
    /// [`Self::color_model`]).
    ///
    /// NaN gets [`Self::nan_color`].  Otherwise the first interval
    /// containing `value` interpolates its color.  Values above every
    /// interval get [`Self::foreground`] and all other values (below
    /// the intervals, in a gap between them, or any value if the
    /// table is empty) get [`Self::background`].
    ///
    /// # Example
    ///
    /// ```
    /// use color_cpt::{Color, ColorModel, ColorPaletteTable};
    /// let cpt: ColorPaletteTable = "0 red 1 blue".parse()?;
    /// assert_eq!(cpt.evaluate(0., Some(ColorModel::Hsv)),
    ///            Color::hsv(0., 1., 1.));
    /// assert_eq!(cpt.evaluate(f64::NAN, None), Color::GRAY);
    /// # Ok::<(), color_cpt::Error>(())
    /// ```
    pub fn evaluate(&self, value: f64, model: Option<ColorModel>) -> Color {
        self.raw_color(value).convert(model.unwrap_or(self.color_model))
    }

    /// Return the color of `value` in the table's color model.
    #[inline]
    pub fn eval(&self, value: f64) -> Color { self.evaluate(value, None) }

    fn raw_color(&self, value: f64) -> Color {
        if value.is_nan() { return self.nan_color }
        let mut max = f64::NEG_INFINITY;
        for interval in &self.intervals {
            if interval.contains(value) {
                return interval.color_at(value)
            }
            max = max.max(interval.upper.value);
        }
        if !self.intervals.is_empty() && value > max { self.foreground }
        else { self.background }
    }

    /// Return an iterator yielding uniform sampling of `n` points
    /// between `a` and `b` (with the bounds `a` and `b` included in
    /// the list of points) together with their colors.  It is not
    /// required that `a <= b`.
    pub fn range(&self, mut a: f64, mut b: f64, n: usize) -> Range<'_> {
        if a == f64::INFINITY { a = f64::MAX; }
        else if a == f64::NEG_INFINITY { a = f64::MIN };
        if b == f64::NEG_INFINITY { b = f64::MIN; }
        else if b == f64::INFINITY { b = f64::MAX };
        // `a` or `b` NaN will give an iterator yielding NaN.
        if n == 0 {
            Range { table: self, a, b, flast: 0., last: 0,
                    i: 1, j: 0 } // Empty iterator
        } else {
            Range { table: self, a, b, flast: (n - 1) as f64,
                    last: n - 1, i: 0, j: n - 1 }
        }
    }
}

impl FromStr for ColorPaletteTable {
    type Err = Error;

    /// Read a table from a CPT source, resolving color names with the
    /// X11 dictionary.
    fn from_str(s: &str) -> Result<Self> {
        let mut reader = CptReader::default();
        reader.read_str(s)?;
        reader.build()
    }
}

/// An iterator yielding `f64` in a given range together with their
/// colors.  Created by [`ColorPaletteTable::range`].
pub struct Range<'a> {
    table: &'a ColorPaletteTable,
    a: f64, // finite or NaN
    b: f64, // finite or NaN
    flast: f64,
    last: usize,
    i: usize, // first position to be consumed
    j: usize, // last position to be consumed
}

impl<'a> Range<'a> {
    /// Return the value and color of the position `k` (assuming it is
    /// in the range `0 ..= self.last`).
    fn color(&self, k: usize) -> (f64, Color) {
        let x = {
            if k == 0 { self.a }
            else if k == self.last { self.b }
            else {
                let alpha = (self.last - k) as f64;
                let beta = k as f64;
                let x = (alpha * self.a + beta * self.b) / self.flast;
                if x.is_infinite() {
                    let t = beta / self.flast;
                    (1. - t) * self.a + t * self.b
                } else { x }
            } };
        (x, self.table.eval(x))
    }
}

impl<'a> Iterator for Range<'a> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.color(self.i);
            self.i += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a> ExactSizeIterator for Range<'a> {
    fn len(&self) -> usize {
        if self.i <= self.j { self.j - self.i + 1 } else { 0 }
    }
}

impl<'a> DoubleEndedIterator for Range<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.color(self.j);
            if self.j == 0 {
                self.i = 1
            } else {
                self.j -= 1;
            }
            Some(item)
        } else {
            None
        }
    }
}
