//! Tag-per-field markup writer used by every request entity.
//!
//! Documents are UTF-8, carry no declaration and no whitespace between tags.
//! Text is entity-escaped, booleans render as `1`/`0` and numbers always use
//! a decimal point whatever the host locale.

use crate::error::{Error, Result};
use crate::validation::Validate;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt::Display;
use tracing::warn;

/// Numbers the writer knows how to render.
pub trait WireNumber: Copy {
    /// Locale-independent rendering.
    fn render(self) -> String;
}

macro_rules! integer_wire_number {
    ($($ty:ty),*) => {
        $(
            impl WireNumber for $ty {
                fn render(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_wire_number!(u8, u16, u32, u64, i32, i64);

impl WireNumber for f64 {
    // Display for f64 is locale free and never switches to exponent notation.
    // Adding zero folds -0.0 into 0.0.
    fn render(self) -> String {
        (self + 0.0).to_string()
    }
}

/// Whether `c` may appear in a markup document, escaped or not.
///
/// Covers the XML 1.0 `Char` production. Rust strings cannot hold
/// surrogates, so only the C0 controls and U+FFFE/U+FFFF are excluded.
pub fn is_markup_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => false,
        _ => true,
    }
}

/// Append-only builder for a wire fragment.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: String,
}

impl WireWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    fn open(&mut self, tag: &str) {
        self.buf.push('<');
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    fn close(&mut self, tag: &str) {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
    }

    fn raw(&mut self, tag: &str, value: &str) -> &mut Self {
        self.open(tag);
        self.buf.push_str(value);
        self.close(tag);
        self
    }

    /// Write a nested element whose children are produced by `body`.
    pub fn element(&mut self, tag: &str, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.open(tag);
        body(self);
        self.close(tag);
        self
    }

    /// Write escaped text.
    pub fn text(&mut self, tag: &str, value: &str) -> &mut Self {
        let escaped = escape(value);
        self.raw(tag, &escaped)
    }

    /// Write escaped text, omitting absent or blank values.
    pub fn opt_text(&mut self, tag: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) if !value.trim().is_empty() => self.text(tag, value),
            _ => self,
        }
    }

    /// Write a value through its `Display` implementation.
    pub fn display(&mut self, tag: &str, value: impl Display) -> &mut Self {
        self.text(tag, &value.to_string())
    }

    /// Write an optional value through its `Display` implementation.
    pub fn opt_display(&mut self, tag: &str, value: Option<impl Display>) -> &mut Self {
        match value {
            Some(value) => self.display(tag, value),
            None => self,
        }
    }

    /// Write a boolean as `1` or `0`.
    pub fn flag(&mut self, tag: &str, value: bool) -> &mut Self {
        self.raw(tag, if value { "1" } else { "0" })
    }

    /// Write a number.
    pub fn number(&mut self, tag: &str, value: impl WireNumber) -> &mut Self {
        let rendered = value.render();
        self.raw(tag, &rendered)
    }

    /// Write an optional number.
    pub fn opt_number(&mut self, tag: &str, value: Option<impl WireNumber>) -> &mut Self {
        match value {
            Some(value) => self.number(tag, value),
            None => self,
        }
    }

    /// Write a monetary amount with exactly two decimals.
    pub fn money(&mut self, tag: &str, value: f64) -> &mut Self {
        let rendered = format!("{:.2}", value + 0.0);
        self.raw(tag, &rendered)
    }

    /// Write an optional monetary amount.
    pub fn opt_money(&mut self, tag: &str, value: Option<f64>) -> &mut Self {
        match value {
            Some(value) => self.money(tag, value),
            None => self,
        }
    }

    /// Write a sub-entity's fragment.
    pub fn fragment(&mut self, entity: &impl WireEntity) -> &mut Self {
        entity.write_wire(self);
        self
    }

    /// Write an optional sub-entity's fragment.
    pub fn opt_fragment<E: WireEntity>(&mut self, entity: Option<&E>) -> &mut Self {
        if let Some(entity) = entity {
            entity.write_wire(self);
        }
        self
    }

    /// Write a list of fragments inside `tag`, omitting the wrapper when empty.
    pub fn list<E: WireEntity>(&mut self, tag: &str, entities: &[E]) -> &mut Self {
        if entities.is_empty() {
            return self;
        }
        self.element(tag, |w| {
            for entity in entities {
                entity.write_wire(w);
            }
        })
    }

    /// The finished fragment.
    pub fn finish(self) -> String {
        self.buf
    }
}

/// An entity that renders itself to the wire format once valid.
pub trait WireEntity: Validate {
    /// Name used in the "is not valid" error.
    const ENTITY_NAME: &'static str;

    /// Append this entity's fragment. Callers must have checked validity.
    fn write_wire(&self, writer: &mut WireWriter);

    /// Serialize the entity, refusing when any rule is violated.
    fn to_wire_format(&self) -> Result<String> {
        let violations = self.violations();
        if !violations.is_empty() {
            warn!(
                entity = Self::ENTITY_NAME,
                violations = violations.len(),
                "refusing to serialize invalid entity"
            );
            return Err(Error::InvalidEntity(Self::ENTITY_NAME));
        }
        let mut writer = WireWriter::new();
        self.write_wire(&mut writer);
        Ok(writer.finish())
    }
}

/// Whether `document` is a single well-formed markup element.
pub fn is_well_formed(document: &str) -> bool {
    let mut reader = Reader::from_str(document);
    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Ok(Event::Empty(_)) if depth == 0 => roots += 1,
            Ok(Event::End(_)) => match depth.checked_sub(1) {
                Some(next) => depth = next,
                None => return false,
            },
            Ok(Event::Text(text)) => match text.unescape() {
                Ok(text) if text.chars().all(is_markup_char) => {}
                _ => return false,
            },
            Ok(Event::Eof) => return depth == 0 && roots == 1,
            Ok(_) => {}
            Err(_) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{RuleViolation, Rules};
    use pretty_assertions::assert_eq;

    struct Labelled {
        label: String,
    }

    impl Validate for Labelled {
        fn violations(&self) -> Vec<RuleViolation> {
            Rules::new().required("label", &self.label).finish()
        }
    }

    impl WireEntity for Labelled {
        const ENTITY_NAME: &'static str = "Labelled";

        fn write_wire(&self, writer: &mut WireWriter) {
            writer.element("labelled", |w| {
                w.text("label", &self.label);
            });
        }
    }

    #[test]
    fn test_escapes_markup_characters() {
        let mut writer = WireWriter::new();
        writer.text("name", r#"Tom & "Jerry" <'s>"#);
        let out = writer.finish();
        assert_eq!(
            out,
            "<name>Tom &amp; &quot;Jerry&quot; &lt;&apos;s&gt;</name>"
        );
        assert!(is_well_formed(&out));
    }

    #[test]
    fn test_scalars() {
        let mut writer = WireWriter::new();
        writer
            .flag("yes", true)
            .flag("no", false)
            .number("int", 42u32)
            .number("float", 1.5f64)
            .number("whole", 2.0f64)
            .number("tiny", 0.0001f64)
            .money("price", 12.5)
            .opt_text("blank", Some("   "))
            .opt_text("absent", None)
            .opt_number("missing", None::<u32>);
        assert_eq!(
            writer.finish(),
            "<yes>1</yes><no>0</no><int>42</int><float>1.5</float><whole>2</whole>\
             <tiny>0.0001</tiny><price>12.50</price>"
        );
    }

    #[test]
    fn test_invalid_entity_is_refused() {
        let labelled = Labelled {
            label: String::new(),
        };
        let err = labelled.to_wire_format().unwrap_err();
        assert_eq!(err.to_string(), "Labelled is not valid");
    }

    #[test]
    fn test_valid_entity_serializes() {
        let labelled = Labelled {
            label: "a<b".to_string(),
        };
        assert_eq!(
            labelled.to_wire_format().unwrap(),
            "<labelled><label>a&lt;b</label></labelled>"
        );
    }

    #[test]
    fn test_empty_list_is_omitted() {
        let mut writer = WireWriter::new();
        writer.list::<Labelled>("labels", &[]);
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_well_formed_check() {
        assert!(is_well_formed("<a><b>1</b></a>"));
        assert!(!is_well_formed("<a><b>1</a></b>"));
        assert!(!is_well_formed("<a>"));
        assert!(!is_well_formed("<a/><b/>"));
        assert!(!is_well_formed("<a>&bogus;</a>"));
        assert!(!is_well_formed(""));
    }

    #[test]
    fn test_control_characters_are_not_well_formed() {
        assert!(!is_well_formed("<name>Mug\u{1}\u{8}</name>"));
        assert!(!is_well_formed("<name>\u{FFFF}</name>"));
        assert!(is_well_formed("<name>a\tb\r\nc</name>"));
        assert!(!is_markup_char('\u{0}'));
        assert!(!is_markup_char('\u{B}'));
        assert!(!is_markup_char('\u{1F}'));
        assert!(is_markup_char('\n'));
        assert!(is_markup_char('ž'));
    }

    #[test]
    fn test_negative_zero_renders_unsigned() {
        let mut writer = WireWriter::new();
        writer.number("n", -0.0f64).money("m", -0.0);
        assert_eq!(writer.finish(), "<n>0</n><m>0.00</m>");
    }
}
