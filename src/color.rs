//! Colors in the three models a CPT file may use and the conversions
//! between them.
//!
//! Components are not clamped.  By convention RGB components are in
//! \[0, 255\], the HSV hue is in degrees (\[0, 360\]) with saturation
//! and value in \[0, 1\], and CMYK components are in \[0, 1\].

use std::{fmt, str::FromStr};
use rgb::{RGB, RGB8};

/// The color models (color spaces) understood by CPT files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorModel {
    #[default]
    Rgb,
    Hsv,
    Cmyk,
}

impl FromStr for ColorModel {
    type Err = String;

    /// Parse a model name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("rgb") { Ok(ColorModel::Rgb) }
        else if s.eq_ignore_ascii_case("hsv") { Ok(ColorModel::Hsv) }
        else if s.eq_ignore_ascii_case("cmyk") { Ok(ColorModel::Cmyk) }
        else { Err(s.to_string()) }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorModel::Rgb => "rgb",
            ColorModel::Hsv => "hsv",
            ColorModel::Cmyk => "cmyk",
        })
    }
}

/// A color in the HSV model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hsv {
    /// Hue in degrees.
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

/// A color in the CMYK model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cmyk {
    pub cyan: f64,
    pub magenta: f64,
    pub yellow: f64,
    /// Black.
    pub key: f64,
}

/// A color value, tagged with its model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgb(RGB<f64>),
    Hsv(Hsv),
    Cmyk(Cmyk),
}

impl Color {
    pub const BLACK: Color = Color::Rgb(RGB { r: 0., g: 0., b: 0. });
    pub const WHITE: Color = Color::Rgb(RGB { r: 255., g: 255., b: 255. });
    pub const GRAY: Color = Color::Rgb(RGB { r: 127., g: 127., b: 127. });

    #[inline]
    pub fn rgb(r: f64, g: f64, b: f64) -> Self { Color::Rgb(RGB { r, g, b }) }

    #[inline]
    pub fn hsv(hue: f64, saturation: f64, value: f64) -> Self {
        Color::Hsv(Hsv { hue, saturation, value })
    }

    #[inline]
    pub fn cmyk(cyan: f64, magenta: f64, yellow: f64, key: f64) -> Self {
        Color::Cmyk(Cmyk { cyan, magenta, yellow, key })
    }

    /// The model in which the color is expressed.
    pub fn model(&self) -> ColorModel {
        match self {
            Color::Rgb(_) => ColorModel::Rgb,
            Color::Hsv(_) => ColorModel::Hsv,
            Color::Cmyk(_) => ColorModel::Cmyk,
        }
    }

    /// The components of the color, in declaration order.
    pub fn channels(&self) -> Vec<f64> {
        match *self {
            Color::Rgb(RGB { r, g, b }) => vec![r, g, b],
            Color::Hsv(Hsv { hue, saturation, value }) =>
                vec![hue, saturation, value],
            Color::Cmyk(Cmyk { cyan, magenta, yellow, key }) =>
                vec![cyan, magenta, yellow, key],
        }
    }

    /// Express the color in `model`.  Converting to the color's own
    /// model returns it unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use color_cpt::{Color, ColorModel};
    /// let red = Color::rgb(255., 0., 0.);
    /// assert_eq!(red.convert(ColorModel::Hsv), Color::hsv(0., 1., 1.));
    /// assert_eq!(red.convert(ColorModel::Rgb), red);
    /// ```
    pub fn convert(self, model: ColorModel) -> Color {
        match (self, model) {
            (Color::Rgb(_), ColorModel::Rgb)
            | (Color::Hsv(_), ColorModel::Hsv)
            | (Color::Cmyk(_), ColorModel::Cmyk) => self,
            (Color::Rgb(c), ColorModel::Hsv) => Color::Hsv(rgb_to_hsv(c)),
            (Color::Rgb(c), ColorModel::Cmyk) => Color::Cmyk(rgb_to_cmyk(c)),
            (Color::Hsv(c), ColorModel::Rgb) => Color::Rgb(hsv_to_rgb(c)),
            (Color::Cmyk(c), ColorModel::Rgb) => Color::Rgb(cmyk_to_rgb(c)),
            (Color::Hsv(c), ColorModel::Cmyk) =>
                Color::Cmyk(rgb_to_cmyk(hsv_to_rgb(c))),
            (Color::Cmyk(c), ColorModel::Hsv) =>
                Color::Hsv(rgb_to_hsv(cmyk_to_rgb(c))),
        }
    }

    /// Linear interpolation from `self` (`t == 0.`) to `c1` (`t ==
    /// 1.`), channel by channel, in the model of `self`.  `t` is not
    /// clamped.
    pub fn lerp(&self, c1: &Color, t: f64) -> Color {
        #[inline]
        fn mix(y0: f64, y1: f64, t: f64) -> f64 { y0 + (y1 - y0) * t }
        match (*self, c1.convert(self.model())) {
            (Color::Rgb(a), Color::Rgb(b)) =>
                Color::rgb(mix(a.r, b.r, t), mix(a.g, b.g, t),
                           mix(a.b, b.b, t)),
            (Color::Hsv(a), Color::Hsv(b)) =>
                Color::hsv(mix(a.hue, b.hue, t),
                           mix(a.saturation, b.saturation, t),
                           mix(a.value, b.value, t)),
            (Color::Cmyk(a), Color::Cmyk(b)) =>
                Color::cmyk(mix(a.cyan, b.cyan, t),
                            mix(a.magenta, b.magenta, t),
                            mix(a.yellow, b.yellow, t),
                            mix(a.key, b.key, t)),
            _ => unreachable!("`convert` returns the requested model"),
        }
    }

    /// Return the color as 8 bits RGB, rounding and clamping each
    /// component to \[0, 255\].
    pub fn to_rgb8(&self) -> RGB8 {
        #[inline]
        fn byte(x: f64) -> u8 { x.round().clamp(0., 255.) as u8 }
        match self.convert(ColorModel::Rgb) {
            Color::Rgb(c) => RGB8 { r: byte(c.r), g: byte(c.g), b: byte(c.b) },
            _ => unreachable!(),
        }
    }
}

impl From<RGB8> for Color {
    fn from(c: RGB8) -> Self {
        Color::rgb(c.r as f64, c.g as f64, c.b as f64)
    }
}

impl From<RGB<f64>> for Color {
    #[inline]
    fn from(c: RGB<f64>) -> Self { Color::Rgb(c) }
}

impl From<Hsv> for Color {
    #[inline]
    fn from(c: Hsv) -> Self { Color::Hsv(c) }
}

impl From<Cmyk> for Color {
    #[inline]
    fn from(c: Cmyk) -> Self { Color::Cmyk(c) }
}

fn rgb_to_hsv(c: RGB<f64>) -> Hsv {
    let (r, g, b) = (c.r / 255., c.g / 255., c.b / 255.);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let saturation = if max > 0. { delta / max } else { 0. };
    let hue = {
        if delta == 0. { 0. }
        else if max == r { 60. * ((g - b) / delta).rem_euclid(6.) }
        else if max == g { 60. * ((b - r) / delta + 2.) }
        else { 60. * ((r - g) / delta + 4.) } };
    Hsv { hue, saturation, value: max }
}

fn hsv_to_rgb(c: Hsv) -> RGB<f64> {
    let Hsv { hue, saturation: s, value: v } = c;
    let h = hue.rem_euclid(360.) / 60.;
    let f = h.fract();
    let p = v * (1. - s);
    let q = v * (1. - f * s);
    let t = v * (1. - (1. - f) * s);
    let (r, g, b) = match h.trunc() as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    RGB { r: 255. * r, g: 255. * g, b: 255. * b }
}

fn rgb_to_cmyk(c: RGB<f64>) -> Cmyk {
    let (r, g, b) = (c.r / 255., c.g / 255., c.b / 255.);
    let max = r.max(g).max(b);
    if max <= 0. {
        return Cmyk { cyan: 0., magenta: 0., yellow: 0., key: 1. }
    }
    Cmyk { cyan: (max - r) / max, magenta: (max - g) / max,
           yellow: (max - b) / max, key: 1. - max }
}

fn cmyk_to_rgb(c: Cmyk) -> RGB<f64> {
    let w = 255. * (1. - c.key);
    RGB { r: w * (1. - c.cyan), g: w * (1. - c.magenta),
          b: w * (1. - c.yellow) }
}
