use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color switch per output stream. Status lines go to stdout, errors and
/// warnings to stderr, and either may be redirected on its own.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    stdout: bool,
    stderr: bool,
}

impl Theme {
    pub fn detect() -> Self {
        Self {
            stdout: console::colors_enabled() && console::Term::stdout().is_term(),
            stderr: console::colors_enabled_stderr() && console::Term::stderr().is_term(),
        }
    }

    pub fn plain() -> Self {
        Self {
            stdout: false,
            stderr: false,
        }
    }

    fn on(enabled: bool, style: Style) -> Style {
        if enabled { style } else { Style::new() }
    }

    pub fn header(&self) -> Style {
        Self::on(self.stdout, Style::new().cyan().bold())
    }

    pub fn success(&self) -> Style {
        Self::on(self.stdout, Style::new().green().bold())
    }

    pub fn info(&self) -> Style {
        Self::on(self.stdout, Style::new().magenta())
    }

    pub fn label(&self) -> Style {
        Self::on(self.stdout, Style::new().dimmed())
    }

    pub fn error(&self) -> Style {
        Self::on(self.stderr, Style::new().red().bold())
    }

    pub fn warn(&self) -> Style {
        Self::on(self.stderr, Style::new().yellow().bold())
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
