use crate::ArmorError;

/// Name of the armor header carrying the producing software version.
pub const VERSION_HEADER: &str = "Version";

/// Name of the armor header carrying a free text comment.
pub const COMMENT_HEADER: &str = "Comment";

const HEADER_SEPARATOR: char = ':';

/// Ordered armor header fields (`Key: Value` lines).
///
/// Insertion order is preserved and duplicate keys are allowed, as in RFC 4880
/// where e.g. multiple `Comment` lines may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ArmorHeaders(Vec<(String, String)>);

impl ArmorHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header after the already present ones.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Appends a header, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Builds the `Version` and `Comment` headers, omitting absent or empty values.
    pub fn from_version_and_comment(version: Option<&str>, comment: Option<&str>) -> Self {
        [(VERSION_HEADER, version), (COMMENT_HEADER, comment)]
            .into_iter()
            .filter_map(|(key, value)| value.filter(|value| !value.is_empty()).map(|v| (key, v)))
            .collect()
    }

    /// Returns the value of the first header with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(header_key, _)| header_key == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that every header can be written as a single `Key: Value` line.
    pub fn validate(&self) -> Result<(), ArmorError> {
        for (key, value) in &self.0 {
            let reason = if key.is_empty() {
                Some("key is empty")
            } else if key.contains(HEADER_SEPARATOR) {
                Some("key contains a colon")
            } else if key.starts_with(char::is_whitespace) {
                Some("key starts with whitespace")
            } else if contains_line_break(key) || contains_line_break(value) {
                Some("contains a line break")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ArmorError::InvalidHeader {
                    key: key.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }

    /// Formats the header lines, each followed by `line_ending`.
    pub(crate) fn write_lines(&self, out: &mut String, line_ending: &str) {
        for (key, value) in &self.0 {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(line_ending);
        }
    }

    /// Parses a single header line and appends it.
    pub(crate) fn push_line(&mut self, line: &str) -> Result<(), ArmorError> {
        let (key, value) = line
            .split_once(HEADER_SEPARATOR)
            .filter(|(key, _)| !key.is_empty() && !key.starts_with(char::is_whitespace))
            .ok_or_else(|| ArmorError::MalformedHeader(line.to_owned()))?;
        let value = value.strip_prefix(' ').unwrap_or(value);
        self.push(key, value);
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ArmorHeaders {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a ArmorHeaders {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

fn contains_line_break(text: &str) -> bool {
    text.contains(['\r', '\n'])
}
