//! Folding statements into a [`ColorPaletteTable`].

use crate::{Boundary, ColorPaletteTable, Interval,
            error::Result,
            reader::{Category, Statement}};

/// Accumulates statements, in source order, into a table.
#[derive(Default)]
pub struct TableBuilder {
    table: ColorPaletteTable,
    description: Vec<String>,
}

impl TableBuilder {
    pub fn new() -> Self { Self::default() }

    /// Add the effect of `statement` to the table under construction.
    /// Fails if the statement describes an invalid interval.
    pub fn visit(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Comment(text) => {
                log::debug!("comment {text:?}");
                self.description.push(text.clone());
            }
            Statement::ColorModel { model, .. } => {
                log::debug!("color model {model} (used while reading only)");
            }
            Statement::Interval(spec) => {
                log::debug!("interval [{}, {}]", spec.lower_value,
                            spec.upper_value);
                let interval = Interval::new(
                    Boundary::new(spec.lower_value, spec.lower_color),
                    Boundary::new(spec.upper_value, spec.upper_color),
                    spec.annotation,
                    spec.label.clone(),
                    spec.interpolation_model)?;
                self.table.push(interval);
            }
            Statement::Category { category, color } => {
                log::debug!("category {category:?}");
                match category {
                    Category::Foreground => self.table.set_foreground(*color),
                    Category::Background => self.table.set_background(*color),
                    Category::Nan => self.table.set_nan_color(*color),
                }
            }
        }
        Ok(())
    }

    /// Return the table, its description being the comments joined
    /// by newlines.
    pub fn finish(mut self) -> ColorPaletteTable {
        self.table.set_description(self.description.join("\n"));
        self.table
    }
}

/// Build a table from `statements`.
pub fn build<'a>(statements: impl IntoIterator<Item = &'a Statement>)
                 -> Result<ColorPaletteTable> {
    let mut builder = TableBuilder::new();
    for s in statements {
        builder.visit(s)?;
    }
    Ok(builder.finish())
}
