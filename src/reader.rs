//! Reading CPT sources into [`Statement`]s.

use std::io::BufRead;
use regex::Captures;
use crate::{build, Annotation, Color, ColorModel, ColorPaletteTable,
            error::{Error, Result},
            named::{ColorLookup, X11Colors}};

pub mod ast;
pub mod grammar;
pub use ast::{Category, IntervalSpec, Statement};
use grammar::Notation;

/// Line by line reader of a CPT source.
///
/// The reader keeps the color model declared by the last
/// `# COLOR_MODEL` directive; it determines how the numeric notations
/// of the following lines are understood.
///
/// # Example
///
/// ```
/// use color_cpt::{Color, CptReader};
/// let mut reader = CptReader::default();
/// reader.read_str("0 black 10 white\nB red")?;
/// let cpt = reader.build()?;
/// assert_eq!(cpt.len(), 1);
/// assert_eq!(cpt.eval(5.), Color::rgb(127.5, 127.5, 127.5));
/// assert_eq!(cpt.eval(-1.), Color::rgb(255., 0., 0.));
/// # Ok::<(), color_cpt::Error>(())
/// ```
pub struct CptReader<'a> {
    lookup: &'a dyn ColorLookup,
    color_model: ColorModel,
    interpolation_model: ColorModel,
    statements: Vec<Statement>,
    line: usize, // number of lines read
}

impl Default for CptReader<'static> {
    /// A reader resolving color names with [`X11Colors::standard`].
    fn default() -> Self { CptReader::new(X11Colors::standard()) }
}

impl<'a> CptReader<'a> {
    /// Return a reader resolving color names with `lookup`.
    pub fn new(lookup: &'a dyn ColorLookup) -> Self {
        CptReader { lookup,
                    color_model: ColorModel::Rgb,
                    interpolation_model: ColorModel::Rgb,
                    statements: vec![],
                    line: 0 }
    }

    /// Set the color model (both for decoding colors and for
    /// interpolation) in force before any directive is read.
    pub fn with_color_model(mut self, model: ColorModel) -> Self {
        self.color_model = model;
        self.interpolation_model = model;
        self
    }

    /// The color model currently used to decode colors.
    pub fn color_model(&self) -> ColorModel { self.color_model }

    /// The color model currently used for interpolation.
    pub fn interpolation_model(&self) -> ColorModel {
        self.interpolation_model
    }

    /// The statements read so far, in order.
    pub fn statements(&self) -> &[Statement] { &self.statements }

    pub fn into_statements(self) -> Vec<Statement> { self.statements }

    /// Read every line of `r`.  Stops at the first error.
    pub fn read(&mut self, r: impl BufRead) -> Result<()> {
        for line in r.lines() {
            self.read_line(&line?)?;
        }
        Ok(())
    }

    /// Read every line of `s`.  Stops at the first error.
    pub fn read_str(&mut self, s: &str) -> Result<()> {
        for line in s.lines() {
            self.read_line(line)?;
        }
        Ok(())
    }

    /// Read the next line of the source and return the statement it
    /// holds.
    pub fn read_line(&mut self, line: &str) -> Result<&Statement> {
        self.line += 1;
        let statement = match self.classify(line) {
            Ok(Some(s)) => s,
            Ok(None) => {
                log::error!("Syntax error in CPT file at line {}", self.line);
                return Err(Error::Syntax { line: self.line })
            }
            Err(e) => {
                log::error!("{e}");
                return Err(e)
            }
        };
        self.statements.push(statement);
        Ok(&self.statements[self.statements.len() - 1])
    }

    /// Build the table described by the statements read so far.
    pub fn build(&self) -> Result<ColorPaletteTable> {
        build::build(&self.statements)
    }

    fn classify(&mut self, line: &str) -> Result<Option<Statement>> {
        if let Some(s) = self.read_color_model(line)? { return Ok(Some(s)) }
        if let Some(s) = read_comment(line) { return Ok(Some(s)) }
        if let Some(s) = self.read_interval(line)? { return Ok(Some(s)) }
        self.read_category(line)
    }

    fn read_color_model(&mut self, line: &str) -> Result<Option<Statement>> {
        let Some(caps) = grammar::COLOR_MODEL.captures(line)
        else { return Ok(None) };
        let model: ColorModel = caps["model"].parse()
            .map_err(|model| Error::UnknownColorModel { line: self.line,
                                                        model })?;
        let interpolation = &caps["plus"] == "+";
        self.color_model = model;
        if interpolation {
            self.interpolation_model = model;
        }
        log::debug!("line {}: color model {model}, interpolation in {}",
                    self.line, self.interpolation_model);
        Ok(Some(Statement::ColorModel { model, interpolation }))
    }

    fn read_interval(&self, line: &str) -> Result<Option<Statement>> {
        for ((n1, n2), re) in grammar::INTERVALS.iter() {
            let Some(caps) = re.captures(line) else { continue };
            let annotation = match caps.name("annotation").map(|m| m.as_str()) {
                Some("L") => Annotation::Lower,
                Some("U") => Annotation::Upper,
                Some("B") => Annotation::Both,
                _ => Annotation::None,
            };
            let label = caps.name("label").map(|m| m.as_str().trim())
                .filter(|l| !l.is_empty())
                .map(String::from);
            let spec = IntervalSpec {
                lower_value: self.float(&caps["value1"])?,
                lower_color: self.decode(*n1, &caps["color1"])?,
                upper_value: self.float(&caps["value2"])?,
                upper_color: self.decode(*n2, &caps["color2"])?,
                annotation,
                label,
                interpolation_model: self.interpolation_model,
            };
            return Ok(Some(Statement::Interval(spec)))
        }
        Ok(None)
    }

    fn read_category(&self, line: &str) -> Result<Option<Statement>> {
        for (n, re) in grammar::CATEGORIES.iter() {
            let Some(caps) = re.captures(line) else { continue };
            let Some(category) = category_of(&caps) else { continue };
            let color = self.decode(*n, &caps["color"])?;
            return Ok(Some(Statement::Category { category, color }))
        }
        Ok(None)
    }

    /// Decode the color `s`, written in notation `n`, according to the
    /// current color model.
    fn decode(&self, n: Notation, s: &str) -> Result<Color> {
        match n {
            Notation::Triple => {
                let [a, b, c] = self.floats(s)?;
                match self.color_model {
                    ColorModel::Rgb => Ok(Color::rgb(a, b, c)),
                    ColorModel::Hsv => Ok(Color::hsv(a, b, c)),
                    ColorModel::Cmyk => {
                        log::warn!("line {}: interpreting number triplet as \
                                    RGB whilst {} color model in force",
                                   self.line, self.color_model);
                        Ok(Color::rgb(a, b, c))
                    }
                }
            }
            Notation::Cmyk => {
                let [c, m, y, k] = self.floats(s)?;
                if self.color_model != ColorModel::Cmyk {
                    log::warn!("line {}: interpreting number quadruplet as \
                                CMYK whilst {} color model in force",
                               self.line, self.color_model);
                }
                Ok(Color::cmyk(c, m, y, k))
            }
            Notation::Gray => {
                let a = self.float(s)?;
                Ok(match self.color_model {
                    ColorModel::Rgb => Color::rgb(a, a, a),
                    ColorModel::Hsv => Color::hsv(0., 0., a / 255.),
                    ColorModel::Cmyk => Color::cmyk(0., 0., 0., a / 255.),
                })
            }
            Notation::Hex => {
                let hex = s.trim_start_matches('#');
                let byte = |i: usize| {
                    hex.get(i .. i + 2)
                        .and_then(|h| u8::from_str_radix(h, 16).ok())
                        .map(f64::from)
                        .ok_or(Error::Syntax { line: self.line })
                };
                Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?))
            }
            Notation::Name => match self.lookup.lookup(s) {
                Some(c) => Ok(Color::from(c)),
                None => Err(Error::UnresolvedName { line: self.line,
                                                    name: s.to_string() }),
            },
        }
    }

    fn float(&self, s: &str) -> Result<f64> {
        s.parse().map_err(|_| Error::Syntax { line: self.line })
    }

    fn floats<const N: usize>(&self, s: &str) -> Result<[f64; N]> {
        let mut x = [0.; N];
        let mut fields = s.split_whitespace();
        for xi in &mut x {
            *xi = self.float(fields.next().unwrap_or_default())?;
        }
        Ok(x)
    }
}

fn read_comment(line: &str) -> Option<Statement> {
    let caps = grammar::COMMENT.captures(line)?;
    Some(Statement::Comment(caps["text"].trim_end().to_string()))
}

fn category_of(caps: &Captures) -> Option<Category> {
    caps["category"].chars().next().and_then(Category::from_code)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use rgb::RGB8;

    fn read(s: &str) -> Result<Vec<Statement>> {
        let mut r = CptReader::default();
        r.read_str(s)?;
        Ok(r.into_statements())
    }

    fn interval(s: &Statement) -> &IntervalSpec {
        match s {
            Statement::Interval(i) => i,
            _ => panic!("not an interval: {s:?}"),
        }
    }

    #[test]
    fn comments() {
        let st = read("# hello world  \n#\n").unwrap();
        assert_eq!(st, vec![Statement::Comment("hello world".into()),
                            Statement::Comment("".into())]);
    }

    #[test]
    fn triple_interval() {
        let st = read("0 0 0 0  50 255 255 255").unwrap();
        let i = interval(&st[0]);
        assert_eq!(i.lower_value, 0.);
        assert_eq!(i.lower_color, Color::rgb(0., 0., 0.));
        assert_eq!(i.upper_value, 50.);
        assert_eq!(i.upper_color, Color::rgb(255., 255., 255.));
        assert_eq!(i.annotation, Annotation::None);
        assert_eq!(i.label, None);
        assert_eq!(i.interpolation_model, ColorModel::Rgb);
    }

    #[test]
    fn annotation_and_label() {
        let st = read("-1e2 red 1.5 #0000ff L ;  deep water \n\
                       1.5 blue 3 blue U\n\
                       3 10 4 20 B").unwrap();
        let i = interval(&st[0]);
        assert_eq!(i.lower_value, -100.);
        assert_eq!(i.upper_value, 1.5);
        assert_eq!(i.upper_color, Color::rgb(0., 0., 255.));
        assert_eq!(i.annotation, Annotation::Lower);
        assert_eq!(i.label.as_deref(), Some("deep water"));
        assert_eq!(interval(&st[1]).annotation, Annotation::Upper);
        assert_eq!(interval(&st[2]).annotation, Annotation::Both);
        assert_eq!(interval(&st[2]).lower_color, Color::rgb(10., 10., 10.));
    }

    #[test]
    fn hex() {
        let st = read("0 #FF0000 1 #00ff00").unwrap();
        assert_eq!(interval(&st[0]).lower_color, Color::rgb(255., 0., 0.));
        assert_eq!(interval(&st[0]).upper_color, Color::rgb(0., 255., 0.));
    }

    #[test]
    fn hsv_directive() {
        let mut r = CptReader::default();
        r.read_str("# COLOR_MODEL = +HSV\n0 120 1 1 1 0 0 0\n2 128 3 255")
            .unwrap();
        assert_eq!(r.color_model(), ColorModel::Hsv);
        assert_eq!(r.interpolation_model(), ColorModel::Hsv);
        let st = r.statements();
        assert_eq!(st[0], Statement::ColorModel { model: ColorModel::Hsv,
                                                  interpolation: true });
        let i = interval(&st[1]);
        assert_eq!(i.lower_color, Color::hsv(120., 1., 1.));
        assert_eq!(i.interpolation_model, ColorModel::Hsv);
        let i = interval(&st[2]);
        assert_eq!(i.lower_color, Color::hsv(0., 0., 128. / 255.));
        assert_eq!(i.upper_color, Color::hsv(0., 0., 1.));
    }

    #[test]
    fn later_directive_changes_decoding_only() {
        let mut r = CptReader::default();
        r.read_str("# COLOR_MODEL = +HSV\n\
                    0 0 1 1 1 120 1 1\n\
                    # COLOR_MODEL = RGB\n\
                    1 255 0 0 2 0 0 255").unwrap();
        assert_eq!(r.color_model(), ColorModel::Rgb);
        assert_eq!(r.interpolation_model(), ColorModel::Hsv);
        let st = r.statements();
        let i = interval(&st[1]);
        assert_eq!(i.lower_color, Color::hsv(0., 1., 1.));
        assert_eq!(i.interpolation_model, ColorModel::Hsv);
        let i = interval(&st[3]);
        assert_eq!(i.lower_color, Color::rgb(255., 0., 0.));
        assert_eq!(i.upper_color, Color::rgb(0., 0., 255.));
        assert_eq!(i.interpolation_model, ColorModel::Hsv);
        let cpt = r.build().unwrap();
        assert_eq!(cpt.intervals()[1].lower().color, Color::hsv(0., 1., 1.));
        assert_eq!(cpt.evaluate(1.5, Some(ColorModel::Hsv)),
                   Color::hsv(120., 1., 1.));
    }

    #[test]
    fn directive_without_plus_keeps_interpolation() {
        let mut r = CptReader::default();
        r.read_str("# COLOR_MODEL = hsv\n0 0 1 1 1 0 1 1").unwrap();
        assert_eq!(r.color_model(), ColorModel::Hsv);
        assert_eq!(r.interpolation_model(), ColorModel::Rgb);
        let i = interval(&r.statements()[1]);
        assert_eq!(i.lower_color, Color::hsv(0., 1., 1.));
        assert_eq!(i.interpolation_model, ColorModel::Rgb);
    }

    #[test]
    fn cmyk() {
        let st = read("# COLOR_MODEL = CMYK\n\
                       0 0 0 0 1 1 0 1 0 0\n\
                       1 51 2 102\n\
                       2 1 2 3 3 4 5 6\n\
                       N 255").unwrap();
        let i = interval(&st[1]);
        assert_eq!(i.lower_color, Color::cmyk(0., 0., 0., 1.));
        assert_eq!(i.upper_color, Color::cmyk(0., 1., 0., 0.));
        let i = interval(&st[2]);
        assert_eq!(i.lower_color, Color::cmyk(0., 0., 0., 0.2));
        assert_eq!(i.upper_color, Color::cmyk(0., 0., 0., 0.4));
        // A triplet is RGB even in the CMYK model.
        let i = interval(&st[3]);
        assert_eq!(i.lower_color, Color::rgb(1., 2., 3.));
        assert_eq!(st[4], Statement::Category {
            category: Category::Nan, color: Color::cmyk(0., 0., 0., 1.) });
    }

    #[test]
    fn quadruplet_outside_cmyk_model() {
        let st = read("0 0 0 0 0 1 1 1 1 1").unwrap();
        assert_eq!(interval(&st[0]).upper_color, Color::cmyk(1., 1., 1., 1.));
    }

    #[test]
    fn categories() {
        let st = read("F 0 0 0\nB #FFFFFF\nN gray").unwrap();
        assert_eq!(st, vec![
            Statement::Category { category: Category::Foreground,
                                  color: Color::rgb(0., 0., 0.) },
            Statement::Category { category: Category::Background,
                                  color: Color::rgb(255., 255., 255.) },
            Statement::Category { category: Category::Nan,
                                  color: Color::rgb(190., 190., 190.) }]);
    }

    #[test]
    fn syntax_error_line() {
        let mut r = CptReader::default();
        match r.read_str("# ok\n0 0 1 1\nX 1 2 3\n0 0 1 1") {
            Err(Error::Syntax { line }) => assert_eq!(line, 3),
            e => panic!("{e:?}"),
        }
        assert_eq!(r.statements().len(), 2);
        assert!(matches!(read("\n"), Err(Error::Syntax { line: 1 })));
    }

    #[test]
    fn unknown_color_model() {
        match read("# COLOR_MODEL = LAB") {
            Err(Error::UnknownColorModel { line, model }) => {
                assert_eq!(line, 1);
                assert_eq!(model, "LAB");
            }
            e => panic!("{e:?}"),
        }
    }

    #[test]
    fn unresolved_name() {
        match read("0 0 0 0 1 1 1 1\n0 red 1 nosuchcolor") {
            Err(Error::UnresolvedName { line, name }) => {
                assert_eq!(line, 2);
                assert_eq!(name, "nosuchcolor");
            }
            e => panic!("{e:?}"),
        }
    }

    #[test]
    fn injected_lookup() {
        let mut names = HashMap::new();
        names.insert("sea".to_string(), RGB8 { r: 0, g: 0, b: 128 });
        let mut r = CptReader::new(&names);
        r.read_str("0 SEA 1 Sea").unwrap();
        assert_eq!(interval(&r.statements()[0]).lower_color,
                   Color::rgb(0., 0., 128.));
        let mut r = CptReader::new(&names);
        assert!(matches!(r.read_str("0 red 1 sea"),
                         Err(Error::UnresolvedName { .. })));
    }

    #[test]
    fn initial_color_model() {
        let mut r = CptReader::default().with_color_model(ColorModel::Hsv);
        r.read_str("0 0 1 1 1 0 1 1").unwrap();
        let i = interval(&r.statements()[0]);
        assert_eq!(i.lower_color, Color::hsv(0., 1., 1.));
        assert_eq!(i.interpolation_model, ColorModel::Hsv);
    }
}
