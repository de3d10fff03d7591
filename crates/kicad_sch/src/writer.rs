use std::io::{self, Write};

/// Line-oriented S-expression writer. Blocks open with `(head` on their own
/// line and close with a lone `)` at the enclosing indentation.
pub struct SexprWriter<W: Write> {
    writer: W,
    indent_level: usize,
    indent_str: String,
}

impl<W: Write> SexprWriter<W> {
    pub fn new(writer: W) -> Self {
        SexprWriter {
            writer,
            indent_level: 0,
            indent_str: "  ".to_string(),
        }
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.write_indentation()?;
        writeln!(self.writer, "{}", line)
    }

    pub fn start_block(&mut self, head: &str) -> io::Result<()> {
        self.write_line(&format!("({}", head))?;
        self.indent_level += 1;
        Ok(())
    }

    pub fn end_block(&mut self) -> io::Result<()> {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.write_line(")")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_indentation(&mut self) -> io::Result<()> {
        for _ in 0..self.indent_level {
            write!(self.writer, "{}", self.indent_str)?;
        }
        Ok(())
    }
}
