use std::io::IsTerminal;

#[derive(Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Red,
    Dim,
}

#[derive(Clone, Copy)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Terminal coloring, disabled for pipes and when `NO_COLOR` is set.
#[derive(Clone, Copy)]
pub struct Style {
    use_color_stdout: bool,
    use_color_stderr: bool,
}

impl Style {
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some();

        Self {
            use_color_stdout: !no_color && std::io::stdout().is_terminal(),
            use_color_stderr: !no_color && std::io::stderr().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self {
            use_color_stdout: false,
            use_color_stderr: false,
        }
    }

    pub fn ok(&self) -> String {
        self.paint(Stream::Stdout, Color::Green, "✔")
    }

    pub fn arrow(&self) -> String {
        self.paint(Stream::Stdout, Color::Yellow, "→")
    }

    pub fn undo(&self) -> String {
        self.paint(Stream::Stdout, Color::Yellow, "↺")
    }

    pub fn paint(&self, stream: Stream, color: Color, text: &str) -> String {
        let enabled = match stream {
            Stream::Stdout => self.use_color_stdout,
            Stream::Stderr => self.use_color_stderr,
        };
        if !enabled {
            return text.to_string();
        }

        let code = match color {
            Color::Green => "32",
            Color::Yellow => "33",
            Color::Red => "31",
            Color::Dim => "2",
        };
        format!("\u{1b}[{code}m{text}\u{1b}[0m")
    }
}
