//! Naming templates with `[name]`, `[hash]` and `[ext]` placeholders.

/// One parsed piece of a naming template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    Hash,
    Ext,
}

/// A parsed output-file naming template such as `assets/[name]-[hash].js`.
///
/// Parsing is total: the three known placeholders are recognised anywhere in
/// the string and everything else, including unknown bracketed text, is kept
/// as literal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNameTemplate {
    raw: String,
    segments: Vec<Segment>,
}

/// Values substituted into a template during rendering.
///
/// `ext` is substituted without a leading dot; the template supplies its own
/// punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderValues<'a> {
    /// Logical artifact name substituted for `[name]`.
    pub name: &'a str,
    /// Content hash substituted for `[hash]`.
    pub hash: &'a str,
    /// Original file extension substituted for `[ext]`.
    pub ext: &'a str,
}

impl FileNameTemplate {
    /// Parse a template string.
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = raw;

        while let Some(open) = rest.find('[') {
            literal.push_str(&rest[..open]);
            rest = &rest[open..];

            let placeholder = [
                ("[name]", Segment::Name),
                ("[hash]", Segment::Hash),
                ("[ext]", Segment::Ext),
            ]
            .into_iter()
            .find(|(token, _)| rest.starts_with(token));

            match placeholder {
                Some((token, segment)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                    rest = &rest[token.len()..];
                }
                None => {
                    literal.push('[');
                    rest = &rest[1..];
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// The template string this value was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Substitute every placeholder and return the rendered output name.
    pub fn render(&self, values: RenderValues<'_>) -> String {
        let mut rendered = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Name => rendered.push_str(values.name),
                Segment::Hash => rendered.push_str(values.hash),
                Segment::Ext => rendered.push_str(values.ext),
            }
        }
        rendered
    }
}

impl From<&str> for FileNameTemplate {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}
