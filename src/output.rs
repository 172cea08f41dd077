//! Console output of extracted lines.

use crate::tail::TailOutput;
use std::io::{self, Write};

/// Write each line followed by `\n`, numbered from 1 when requested
pub fn write_lines<W: Write>(out: &mut W, output: &TailOutput) -> io::Result<()> {
    for (index, line) in output.lines.iter().enumerate() {
        if output.number_lines {
            writeln!(out, "{:>6}\t{}", index + 1, line)?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()
}
