use crate::error::CliError;
use crate::output;
use crate::style::{Color, Stream, Style};
use crate::ui::Ui;

/// The boxed error block: title, then whichever of reason, meaning and action are set.
pub fn render(err: &CliError, style: Style) -> Vec<String> {
    let ui = Ui::new(style);
    let mut lines = vec![
        ui.rule(),
        "strata error".to_string(),
        ui.rule(),
        style.paint(Stream::Stderr, Color::Red, err.title()),
        String::new(),
    ];

    let sections = [
        ("Reason:", err.reason()),
        ("What this means:", err.meaning()),
        ("Suggested action:", err.action()),
    ];
    for (label, text) in sections {
        if let Some(text) = text {
            lines.extend([label.to_string(), text.to_string(), String::new()]);
        }
    }

    lines.push(ui.rule());
    lines
}

pub fn print(err: &CliError) {
    output::error_block(render(err, Style::detect()));
}
