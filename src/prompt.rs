use std::{
    borrow::Cow,
    io::{self, IsTerminal, Write},
};

use nu_ansi_term::{Color, Style};

use crate::config::Config;

pub struct Prompt {
    text: String,
    style: Option<Style>,
}

impl Prompt {
    /// Colour is only used when it is enabled and stdout is a terminal.
    pub fn new(config: &Config) -> Self {
        let style = (config.color && io::stdout().is_terminal())
            .then(|| Style::new().bold().fg(Color::Green));
        Self::with_style(config.prompt.clone(), style)
    }

    pub fn with_style(text: String, style: Option<Style>) -> Self {
        Self { text, style }
    }

    pub fn render(&self) -> Cow<'_, str> {
        match self.style {
            Some(style) => Cow::Owned(style.paint(&self.text).to_string()),
            None => Cow::Borrowed(&self.text),
        }
    }

    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(self.render().as_bytes())?;
        out.flush()
    }
}
