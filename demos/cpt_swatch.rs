//! Load a CPT file, report its number of intervals and write an HTML
//! page showing its colors.
//!
//! Usage: `cargo run --example cpt_swatch -- FILE.cpt [OUT.html]`

use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB8;
use color_cpt::{Color, ColorPaletteTable};

type Err = Box<dyn Error>;

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn table_of_colors(fh: &mut impl Write, colors: &[Color],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>",
                 css_string(c.to_rgb8()))?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td></tr>\
                  </table><br/>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        return Err("usage: cpt_swatch FILE.cpt [OUT.html]".into())
    };
    let out = args.next().unwrap_or_else(|| "swatch.html".to_string());
    let cpt = ColorPaletteTable::from_path(&path)?;
    println!("{path}: {} intervals", cpt.len());

    let mut fh = BufWriter::new(File::create(&out)?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>{path}</title>\n\
                  </head>\n\
                  <body>")?;
    if !cpt.description().is_empty() {
        writeln!(fh, "<pre>{}</pre>", cpt.description())?;
    }
    if let Some((a, b)) = cpt.value_range() {
        writeln!(fh, "<h3>Interpolated</h3>")?;
        let colors: Vec<_> = cpt.range(a, b, 256).map(|(_, c)| c).collect();
        table_of_colors(&mut fh, &colors, 2, &format!("{a} … {b}"))?;
    }
    writeln!(fh, "<h3>Intervals</h3>")?;
    for i in cpt.intervals() {
        let comment = format!("{} … {} {}", i.lower().value, i.upper().value,
                              i.label().unwrap_or(""));
        table_of_colors(&mut fh, &[i.lower().color, i.upper().color], 40,
                        &comment)?;
    }
    writeln!(fh, "<h3>Background, foreground, NaN</h3>")?;
    table_of_colors(&mut fh, &[cpt.background(), cpt.foreground(),
                               cpt.nan_color()], 40, "")?;
    writeln!(fh, "</body>\n\
                  </html>")?;
    println!("Wrote {out}");
    Ok(())
}
