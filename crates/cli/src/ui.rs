use crate::style::{Color, Stream, Style};

pub struct Ui {
    style: Style,
    width: usize,
}

impl Ui {
    pub fn new(style: Style) -> Self {
        Self { style, width: 40 }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn rule(&self) -> String {
        "-".repeat(self.width)
    }

    pub fn header(&self, title: &str) -> Vec<String> {
        vec![self.rule(), title.to_string(), self.rule()]
    }

    pub fn kv(&self, key: &str, value: &str) -> String {
        let key_pad = 12usize;
        format!("{key:<key_pad$}: {value}")
    }

    pub fn ok_line(&self, message: &str) -> String {
        format!("{} {}", self.style.ok(), message)
    }

    pub fn apply_line(&self, id: i64, name: &str) -> String {
        format!("{} apply    {id:>4} {name}", self.style.arrow())
    }

    pub fn revert_line(&self, id: i64, name: &str) -> String {
        format!("{} revert   {id:>4} {name}", self.style.undo())
    }

    /// `  0003 add_users ................ applied`
    pub fn migration_row(&self, id: i64, name: &str, state: &str, color: Color) -> String {
        let label = format!("{id:04} {name}");
        let label_width = 32usize;
        let dots = if label.chars().count() >= label_width {
            String::new()
        } else {
            ".".repeat(label_width - label.chars().count())
        };
        let state = self.style.paint(Stream::Stdout, color, state);
        format!("  {label} {dots} {state}")
    }
}
