// Output styling and behavior for a Spec
//
// Config is an immutable value handed to a Spec at construction; nothing here
// is process-wide, so sessions in parallel tests never see each other's
// settings.

/// ANSI escape sequences used for failure messages and stack lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub error: &'static str,
    pub highlight: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub const fn ansi() -> Self {
        Self {
            error: "\x1b[31;1m",
            highlight: "\x1b[31;1m",
            dim: "\x1b[33m",
            reset: "\x1b[0m",
        }
    }

    /// No escape codes at all.
    pub const fn plain() -> Self {
        Self {
            error: "",
            highlight: "",
            dim: "",
            reset: "",
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::plain()
    }

    pub fn paint_error(&self, text: &str) -> String {
        self.paint(self.error, text)
    }

    pub fn paint_highlight(&self, text: &str) -> String {
        self.paint(self.highlight, text)
    }

    pub fn paint_dim(&self, text: &str) -> String {
        self.paint(self.dim, text)
    }

    fn paint(&self, start: &str, text: &str) -> String {
        if start.is_empty() {
            return text.to_string();
        }
        format!("{}{}{}", start, text, self.reset)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ansi()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub palette: Palette,
    /// Write the filtered call stack to the output on every failure.
    pub print_stack: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: Palette::ansi(),
            print_stack: true,
        }
    }
}

impl Config {
    pub const NO_COLOR: &'static str = "NO_COLOR";
    pub const STACK: &'static str = "PLUMB_STACK";

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_print_stack(mut self, print_stack: bool) -> Self {
        self.print_stack = print_stack;
        self
    }

    /// Defaults adjusted by `NO_COLOR` and `PLUMB_STACK`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        // https://no-color.org: any non-empty value disables color
        if lookup(Self::NO_COLOR).is_some_and(|value| !value.is_empty()) {
            config.palette = Palette::plain();
        }

        if let Some(value) = lookup(Self::STACK) {
            let value = value.trim().to_ascii_lowercase();
            if matches!(value.as_str(), "0" | "false" | "off" | "no") {
                config.print_stack = false;
            }
        }

        config
    }
}
