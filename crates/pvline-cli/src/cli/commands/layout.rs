//! `pvline layout` – show how a format string compiles.

use anyhow::Result;
use pvline_core::format::{compile, Layout, Segment};
use std::io::{self, Write};

pub fn run_layout(format: &str, name: Option<&str>) -> Result<()> {
    let layout = compile(format, name);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_layout(&mut out, &layout)?;
    Ok(())
}

fn write_layout<W: Write>(out: &mut W, layout: &Layout) -> io::Result<()> {
    writeln!(out, "{:<4} {:<9} {}", "#", "KIND", "CONTENT")?;
    for (i, segment) in layout.segments().iter().enumerate() {
        let (kind, content) = match segment {
            Segment::Literal(text) => ("literal", format!("{text:?}")),
            Segment::Fixed(field) => ("fixed", field.to_string()),
            Segment::Variable(field) => ("variable", field.to_string()),
        };
        writeln!(out, "{:<4} {:<9} {}", i, kind, content)?;
    }

    let fields: Vec<String> = layout.fields().iter().map(|f| f.to_string()).collect();
    let fields = if fields.is_empty() {
        "-".to_string()
    } else {
        fields.join(", ")
    };
    writeln!(out, "fields: {fields}")?;
    if layout.last_output_len() > 0 {
        writeln!(out, "last-output width: {}", layout.last_output_len())?;
    }
    Ok(())
}
