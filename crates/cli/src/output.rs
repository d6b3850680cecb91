use std::io::{self, Write};

pub fn line(message: impl AsRef<str>) {
    block([message]);
}

/// Writes `lines` to stdout under one lock so a report is never interleaved.
pub fn block<I>(lines: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    write_all(&mut io::stdout().lock(), lines);
}

pub fn error_block<I>(lines: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    write_all(&mut io::stderr().lock(), lines);
}

// Broken pipes are not worth failing a migration run over.
fn write_all<W, I>(out: &mut W, lines: I)
where
    W: Write,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    for line in lines {
        if writeln!(out, "{}", line.as_ref()).is_err() {
            return;
        }
    }
}
