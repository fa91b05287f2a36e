//! Renders exchanges as text for logs and traces.

use std::collections::BTreeMap;

use internals::{Exchange, Value};

use crate::exception::{exception, exception_stacktrace};

pub const DEFAULT_MAX_CHARS: i32 = 10_000;

const FIXED_LABEL_WIDTH: usize = 20;

pub trait ExchangeFormatter: Send + Sync {
    fn format(&self, exchange: &Exchange) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// `Label: value`, comma separated on a single line.
    #[default]
    Default,
    /// Every label prefixed with a tab.
    Tab,
    /// Labels padded to a fixed-width column.
    Fixed,
}

/// Formatter with switchable sections.
///
/// Sections are rendered in the order Id, Headers, Properties, BodyType,
/// Body, Exception, StackTrace. Bodies longer than `max_chars` are clipped;
/// a `max_chars` of zero or less disables clipping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultExchangeFormatter {
    show_exchange_id: bool,
    show_headers: bool,
    show_properties: bool,
    show_body_type: bool,
    show_body: bool,
    show_exception: bool,
    show_stack_trace: bool,
    multiline: bool,
    style: OutputStyle,
    max_chars: i32,
}

impl Default for DefaultExchangeFormatter {
    fn default() -> Self {
        Self {
            show_exchange_id: false,
            show_headers: false,
            show_properties: false,
            show_body_type: true,
            show_body: true,
            show_exception: true,
            show_stack_trace: false,
            multiline: false,
            style: OutputStyle::Default,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl DefaultExchangeFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show_exchange_id(mut self, show: bool) -> Self {
        self.show_exchange_id = show;
        self
    }

    pub fn with_show_headers(mut self, show: bool) -> Self {
        self.show_headers = show;
        self
    }

    pub fn with_show_properties(mut self, show: bool) -> Self {
        self.show_properties = show;
        self
    }

    pub fn with_show_body_type(mut self, show: bool) -> Self {
        self.show_body_type = show;
        self
    }

    pub fn with_show_body(mut self, show: bool) -> Self {
        self.show_body = show;
        self
    }

    pub fn with_show_exception(mut self, show: bool) -> Self {
        self.show_exception = show;
        self
    }

    pub fn with_show_stack_trace(mut self, show: bool) -> Self {
        self.show_stack_trace = show;
        self
    }

    pub fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_max_chars(mut self, max_chars: i32) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn show_exchange_id(&self) -> bool {
        self.show_exchange_id
    }

    pub fn show_headers(&self) -> bool {
        self.show_headers
    }

    pub fn multiline(&self) -> bool {
        self.multiline
    }

    pub fn style(&self) -> OutputStyle {
        self.style
    }

    pub fn max_chars(&self) -> i32 {
        self.max_chars
    }

    fn label(&self, label: &str) -> String {
        match self.style {
            OutputStyle::Default if self.multiline => format!("  {}: ", label),
            OutputStyle::Default => format!("{}: ", label),
            OutputStyle::Tab => format!("\t{}: ", label),
            OutputStyle::Fixed => format!("{:<width$}", label, width = FIXED_LABEL_WIDTH),
        }
    }

    fn separator(&self) -> &'static str {
        if self.multiline {
            return "\n";
        }
        match self.style {
            OutputStyle::Default => ", ",
            OutputStyle::Tab => "",
            OutputStyle::Fixed => " ",
        }
    }

    fn render_value(exchange: &Exchange, value: &Value) -> String {
        if value.is_null() {
            return "null".to_string();
        }
        exchange
            .context()
            .type_converter()
            .to_text(value)
            .unwrap_or_else(|| format!("[{}]", value.type_name()))
    }

    fn render_map<'a, I>(exchange: &Exchange, entries: I) -> String
    where
        I: Iterator<Item = (&'a str, &'a Value)>,
    {
        let rendered: Vec<String> = entries
            .map(|(k, v)| format!("{}={}", k, Self::render_value(exchange, v)))
            .collect();
        format!("{{{}}}", rendered.join(", "))
    }

    fn render_body(&self, exchange: &Exchange) -> String {
        let body = &exchange.message().body;
        if body.is_null() {
            return "[Body is null]".to_string();
        }
        let text = match exchange.context().type_converter().to_text(body) {
            Some(text) => text,
            None => return format!("[Body is instance of {}]", body.type_name()),
        };

        let limit = match usize::try_from(self.max_chars) {
            Ok(limit) if limit > 0 => limit,
            _ => return text,
        };
        let total = text.chars().count();
        if total <= limit {
            return text;
        }
        let clipped: String = text.chars().take(limit).collect();
        format!(
            "{}... [Body clipped after {} chars, total length is {}]",
            clipped, limit, total
        )
    }
}

impl ExchangeFormatter for DefaultExchangeFormatter {
    fn format(&self, exchange: &Exchange) -> String {
        let mut sections = Vec::new();

        if self.show_exchange_id {
            sections.push(self.label("Id") + &exchange.id().to_string());
        }
        if self.show_headers {
            let headers = Self::render_map(exchange, exchange.message().headers.iter());
            sections.push(self.label("Headers") + &headers);
        }
        if self.show_properties {
            let sorted: BTreeMap<&str, &Value> = exchange
                .properties()
                .iter()
                .map(|(k, v)| (k.as_str(), v))
                .collect();
            let properties = Self::render_map(exchange, sorted.into_iter());
            sections.push(self.label("Properties") + &properties);
        }
        if self.show_body_type {
            sections.push(self.label("BodyType") + exchange.message().body.type_name());
        }
        if self.show_body {
            sections.push(self.label("Body") + &self.render_body(exchange));
        }
        if self.show_exception {
            if let Some(failure) = exception(exchange) {
                sections.push(self.label("Exception") + &failure.to_string());
            }
        }
        if self.show_stack_trace {
            if let Some(trace) = exception_stacktrace(exchange) {
                sections.push(self.label("StackTrace") + trace.trim_end());
            }
        }

        let joined = sections.join(self.separator());
        if self.multiline {
            format!("Exchange[\n{}\n]", joined)
        } else {
            format!("Exchange[{}]", joined)
        }
    }
}
