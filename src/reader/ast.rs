use crate::{Annotation, Color, ColorModel};

/// One statement (line) of a CPT file.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// `# text`
    Comment(String),
    /// `# COLOR_MODEL = [+]MODEL`.  `interpolation` is set when the
    /// model also applies to interpolation (`+` prefix).
    ColorModel { model: ColorModel, interpolation: bool },
    /// `value1 color1 value2 color2 [U|L|B] [; label]`
    Interval(IntervalSpec),
    /// `F|B|N color`
    Category { category: Category, color: Color },
}

/// The fields of an interval line, colors decoded according to the
/// color model in force when the line was read.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalSpec {
    pub lower_value: f64,
    pub lower_color: Color,
    pub upper_value: f64,
    pub upper_color: Color,
    pub annotation: Annotation,
    pub label: Option<String>,
    pub interpolation_model: ColorModel,
}

/// The fallback colors that a category line may set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Code `F`: values above every interval.
    Foreground,
    /// Code `B`: values below every interval.
    Background,
    /// Code `N`: NaN.
    Nan,
}

impl Category {
    pub fn from_code(code: char) -> Option<Category> {
        match code {
            'F' => Some(Category::Foreground),
            'B' => Some(Category::Background),
            'N' => Some(Category::Nan),
            _ => None,
        }
    }
}
