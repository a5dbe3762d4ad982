use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for each kind of line the CLI prints
#[derive(Debug, Clone)]
pub struct Theme {
    /// Command banners and section titles
    pub heading: Style,
    pub ok: Style,
    pub failure: Style,
    pub caution: Style,
    /// Icons in front of info lines
    pub accent: Style,
    /// Labels, timings and other secondary text
    pub label: Style,
}

impl Theme {
    /// Every style is a no-op unless `colors` is set
    pub fn new(colors: bool) -> Self {
        let pick = |style: Style| if colors { style } else { Style::new() };
        Self {
            heading: pick(Style::new().cyan().bold()),
            ok: pick(Style::new().green().bold()),
            failure: pick(Style::new().red().bold()),
            caution: pick(Style::new().yellow().bold()),
            accent: pick(Style::new().magenta()),
            label: pick(Style::new().white().dimmed()),
        }
    }

    /// Colors only when stdout is a terminal and `CLICOLOR`/`CLICOLOR_FORCE`
    /// do not turn them off
    pub fn detect() -> Self {
        Self::new(console::colors_enabled() && console::Term::stdout().is_term())
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
