//! Single-line message representation shared by the bundled backends.

use commonlog_types::{keys, Message, Value};
use std::fmt;

/// Callback invoked once when a [`LinearMessage`] is sent.
pub type SendLinearMessage = Box<dyn FnOnce(LinearMessage) + Send>;

/// A [`Message`] optimized for rendering as a single line of text.
///
/// The special keys (`_message`, `_scope`, `_file`, `_line`) are stored in
/// dedicated slots; everything else is kept as rendered strings in the
/// order it was set.
pub struct LinearMessage {
    /// Scope of the message
    pub scope: String,
    /// Base text
    pub message: String,
    /// Additional key-value pairs
    pub values: Vec<(String, String)>,
    /// Source file, empty if unknown
    pub file: String,
    /// Source line
    pub line: Option<i64>,
    send: Option<SendLinearMessage>,
}

impl LinearMessage {
    /// Create a message that hands itself to `send` when sent.
    pub fn new(send: impl FnOnce(LinearMessage) + Send + 'static) -> Self {
        Self {
            scope: String::new(),
            message: String::new(),
            values: Vec::new(),
            file: String::new(),
            line: None,
            send: Some(Box::new(send)),
        }
    }

    /// Bracketed name and scope prefix, e.g. `[server.http:request]`.
    ///
    /// Empty when there is neither a name nor a scope.
    pub fn prefix<S: AsRef<str>>(&self, name: &[S]) -> String {
        if name.is_empty() && self.scope.is_empty() {
            return String::new();
        }

        let mut prefix = String::from("[");
        for (index, segment) in name.iter().enumerate() {
            if index > 0 {
                prefix.push('.');
            }
            prefix.push_str(segment.as_ref());
        }
        if !self.scope.is_empty() {
            prefix.push(':');
            prefix.push_str(&self.scope);
        }
        prefix.push(']');
        prefix
    }

    /// The message rendered with its name prefix.
    pub fn to_string_with_prefix<S: AsRef<str>>(&self, name: &[S]) -> String {
        let prefix = self.prefix(name);
        if prefix.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", prefix, self)
        }
    }

    /// The additional values as `{key="value" ...}`, empty if there are none.
    ///
    /// With `with_location`, `_file` and `_line` are appended when known.
    pub fn values_string(&self, with_location: bool) -> String {
        if self.values.is_empty() {
            return String::new();
        }

        let mut pairs: Vec<(&str, String)> = self
            .values
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();

        if with_location && !self.file.is_empty() {
            pairs.push((keys::FILE, self.file.clone()));
            if let Some(line) = self.line {
                pairs.push((keys::LINE, line.to_string()));
            }
        }

        let rendered: Vec<String> = pairs
            .iter()
            .map(|(k, v)| format!("{}={:?}", k, v))
            .collect();
        format!("{{{}}}", rendered.join(" "))
    }

    /// `file:line` of the call site, empty if unknown.
    pub fn location_string(&self) -> String {
        match (self.file.is_empty(), self.line) {
            (true, _) => String::new(),
            (false, Some(line)) => format!("{}:{}", self.file, line),
            (false, None) => self.file.clone(),
        }
    }
}

impl Message for LinearMessage {
    fn set(&mut self, key: &str, value: Value) {
        match key {
            keys::MESSAGE => self.message = value.to_string(),
            keys::SCOPE => self.scope = value.to_string(),
            keys::FILE => self.file = value.to_string(),
            keys::LINE => self.line = value.as_int(),
            _ => self.values.push((key.to_string(), value.to_string())),
        }
    }

    fn send(mut self: Box<Self>) {
        if let Some(send) = self.send.take() {
            send(*self);
        }
    }
}

impl fmt::Display for LinearMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut line = self.message.clone();

        let values = self.values_string(true);
        if !values.is_empty() {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&values);
        }

        write!(f, "{}", line.replace('\n', "¶"))
    }
}

impl fmt::Debug for LinearMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearMessage")
            .field("scope", &self.scope)
            .field("message", &self.message)
            .field("values", &self.values)
            .field("file", &self.file)
            .field("line", &self.line)
            .finish()
    }
}
