use std::io::Write;

use weather_core::{ResultView, SearchQuery, SearchSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    /// Result and error panels as JSON; the loading panel stays silent.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Hidden,
    Loading,
    Result,
    Error,
}

/// Terminal rendering of the search panels.
pub struct TerminalSurface<W: Write> {
    out: W,
    mode: OutputMode,
    panel: Panel,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self {
            out,
            mode,
            panel: Panel::Hidden,
        }
    }

    pub fn showing_error(&self) -> bool {
        self.panel == Panel::Error
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        let res = writeln!(self.out, "{text}").and_then(|_| self.out.flush());
        if let Err(e) = res {
            tracing::warn!("Failed to write to terminal: {e}");
        }
    }
}

impl<W: Write> SearchSurface for TerminalSurface<W> {
    fn show_loading(&mut self, query: &SearchQuery) {
        self.panel = Panel::Loading;
        if self.mode == OutputMode::Text {
            self.emit(&format!("Searching for {query}..."));
        }
    }

    fn hide_loading(&mut self) {
        self.panel = Panel::Hidden;
    }

    fn show_result(&mut self, view: &ResultView) {
        self.panel = Panel::Result;
        let text = match self.mode {
            OutputMode::Text => format_result(view),
            OutputMode::Json => match serde_json::to_string_pretty(view) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!("Failed to serialize result: {e}");
                    return;
                }
            },
        };
        self.emit(&text);
    }

    fn show_error(&mut self, message: &str) {
        self.panel = Panel::Error;
        let text = match self.mode {
            OutputMode::Text => format!("Error: {message}"),
            OutputMode::Json => serde_json::json!({ "error": message }).to_string(),
        };
        self.emit(&text);
    }
}

fn format_result(view: &ResultView) -> String {
    format!(
        "\n{location}\n{date}\n\n  [{icon}] {description}\n  Temperature  {temp}°C (feels like {feels}°C)\n  Humidity     {humidity}\n  Wind         {wind}\n",
        location = view.location(),
        date = view.date,
        icon = view.icon,
        description = view.description,
        temp = view.temperature,
        feels = view.feels_like,
        humidity = view.humidity,
        wind = view.wind_speed,
    )
}
