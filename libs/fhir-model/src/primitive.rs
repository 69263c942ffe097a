//! Leaf values
//!
//! [`Primitive`] is the raw value carried by the `value` element of a FHIR
//! primitive type (and by the few `System.String` attributes such as
//! `Element.id` and `Extension.url`). The lexical checks in this module are
//! applied at build time according to the primitive type's [`Lexical`] rule.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use base64::{engine::general_purpose, Engine};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use roxmltree::Document;
use rust_decimal::Decimal;

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::schema::{
    Lexical, SYSTEM_BOOLEAN, SYSTEM_DATE, SYSTEM_DATE_TIME, SYSTEM_DECIMAL, SYSTEM_INTEGER,
    SYSTEM_LONG, SYSTEM_STRING, SYSTEM_TIME,
};

/// Date with year, year-month or full precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartialDate {
    Year(i32),
    YearMonth(i32, u32),
    Date(NaiveDate),
}

impl FromStr for PartialDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || invalid_value("date", format!("'{s}' is not a valid date"));
        if !s.is_ascii() {
            return Err(invalid());
        }

        match s.len() {
            4 => parse_year(s).map(PartialDate::Year).ok_or_else(invalid),
            7 => {
                let (year, month) = s.split_once('-').ok_or_else(invalid)?;
                match (parse_year(year), parse_month(month)) {
                    (Some(year), Some(month)) => Ok(PartialDate::YearMonth(year, month)),
                    _ => Err(invalid()),
                }
            }
            10 => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .filter(|date| parse_year(&s[..4]).is_some() && date.format("%Y-%m-%d").to_string() == s)
                .map(PartialDate::Date)
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialDate::Year(year) => write!(f, "{year:04}"),
            PartialDate::YearMonth(year, month) => write!(f, "{year:04}-{month:02}"),
            PartialDate::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().filter(|year| *year >= 1)
}

fn parse_month(s: &str) -> Option<u32> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().filter(|month| (1..=12).contains(month))
}

/// A full timestamp with a zone offset, kept together with the text it was
/// parsed from. Equality, hashing and display use that text, so
/// `10:00:00Z`, `10:00:00+00:00` and `11:00:00+01:00` are different values.
#[derive(Debug, Clone)]
pub struct Timestamp {
    value: DateTime<FixedOffset>,
    text: Box<str>,
}

impl Timestamp {
    pub fn value(&self) -> DateTime<FixedOffset> {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = DateTime::parse_from_rfc3339(s)
            .map_err(|e| invalid_value("dateTime", format!("'{s}' is not a valid dateTime: {e}")))?;
        Ok(Timestamp {
            value,
            text: s.into(),
        })
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A partial date, or a full timestamp with a zone offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartialDateTime {
    Date(PartialDate),
    DateTime(Timestamp),
}

impl PartialDateTime {
    /// True when the value carries a time and offset (required for `instant`)
    pub fn is_full(&self) -> bool {
        matches!(self, PartialDateTime::DateTime(_))
    }
}

impl FromStr for PartialDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.contains('T') {
            s.parse::<Timestamp>().map(PartialDateTime::DateTime)
        } else {
            s.parse::<PartialDate>()
                .map(PartialDateTime::Date)
                .map_err(|_| invalid_value("dateTime", format!("'{s}' is not a valid dateTime")))
        }
    }
}

impl fmt::Display for PartialDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialDateTime::Date(date) => date.fmt(f),
            PartialDateTime::DateTime(timestamp) => timestamp.fmt(f),
        }
    }
}

/// Raw leaf value
///
/// Equality and hashing are exact: decimals compare by digits and scale
/// (`1.0 != 1.00`), timestamps by their lexical form.
#[derive(Debug, Clone)]
pub enum Primitive {
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Decimal(Decimal),
    String(String),
    Date(PartialDate),
    DateTime(PartialDateTime),
    Time(NaiveTime),
}

impl Primitive {
    /// The `System.*` type of this value
    pub fn system_type(&self) -> &'static str {
        match self {
            Primitive::Boolean(_) => SYSTEM_BOOLEAN,
            Primitive::Integer(_) => SYSTEM_INTEGER,
            Primitive::Long(_) => SYSTEM_LONG,
            Primitive::Decimal(_) => SYSTEM_DECIMAL,
            Primitive::String(_) => SYSTEM_STRING,
            Primitive::Date(_) => SYSTEM_DATE,
            Primitive::DateTime(_) => SYSTEM_DATE_TIME,
            Primitive::Time(_) => SYSTEM_TIME,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Primitive::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Primitive::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Primitive::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Primitive::Decimal(d) => Some(*d),
            _ => None,
        }
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Primitive::Boolean(a), Primitive::Boolean(b)) => a == b,
            (Primitive::Integer(a), Primitive::Integer(b)) => a == b,
            (Primitive::Long(a), Primitive::Long(b)) => a == b,
            (Primitive::Decimal(a), Primitive::Decimal(b)) => a.serialize() == b.serialize(),
            (Primitive::String(a), Primitive::String(b)) => a == b,
            (Primitive::Date(a), Primitive::Date(b)) => a == b,
            (Primitive::DateTime(a), Primitive::DateTime(b)) => a == b,
            (Primitive::Time(a), Primitive::Time(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Primitive {}

impl Hash for Primitive {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Primitive::Boolean(b) => b.hash(state),
            Primitive::Integer(i) => i.hash(state),
            Primitive::Long(l) => l.hash(state),
            Primitive::Decimal(d) => d.serialize().hash(state),
            Primitive::String(s) => s.hash(state),
            Primitive::Date(d) => d.hash(state),
            Primitive::DateTime(dt) => dt.hash(state),
            Primitive::Time(t) => t.hash(state),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Boolean(b) => b.fmt(f),
            Primitive::Integer(i) => i.fmt(f),
            Primitive::Long(l) => l.fmt(f),
            Primitive::Decimal(d) => d.fmt(f),
            Primitive::String(s) => f.write_str(s),
            Primitive::Date(d) => d.fmt(f),
            Primitive::DateTime(dt) => dt.fmt(f),
            Primitive::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
        }
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Boolean(value)
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Primitive::Integer(value)
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Primitive::Long(value)
    }
}

impl From<Decimal> for Primitive {
    fn from(value: Decimal) -> Self {
        Primitive::Decimal(value)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::String(value.to_string())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::String(value)
    }
}

impl From<PartialDate> for Primitive {
    fn from(value: PartialDate) -> Self {
        Primitive::Date(value)
    }
}

impl From<PartialDateTime> for Primitive {
    fn from(value: PartialDateTime) -> Self {
        Primitive::DateTime(value)
    }
}

impl From<NaiveTime> for Primitive {
    fn from(value: NaiveTime) -> Self {
        Primitive::Time(value)
    }
}

fn invalid_value(type_name: &str, message: String) -> Error {
    Error::InvalidValue {
        type_name: type_name.to_string(),
        message,
    }
}

/// Apply the lexical rule of primitive type `type_name` to its value.
pub(crate) fn check_lexical(
    type_name: &str,
    lexical: Lexical,
    value: &Primitive,
    config: &ModelConfig,
) -> Result<()> {
    match (lexical, value) {
        (Lexical::String, Primitive::String(s)) => check_string(type_name, s, config),
        (Lexical::Code, Primitive::String(s)) => check_code(type_name, s, config),
        (Lexical::Id, Primitive::String(s)) => check_id(type_name, s),
        (Lexical::Uri, Primitive::String(s)) => check_uri(type_name, s, config),
        (Lexical::Base64, Primitive::String(s)) => check_base64(type_name, s),
        (Lexical::Xhtml, Primitive::String(s)) => check_xhtml(type_name, s),
        (Lexical::PositiveInt, Primitive::Integer(i)) if *i < 1 => Err(invalid_value(
            type_name,
            format!("Integer value: {i} is less than minimum required value: 1"),
        )),
        (Lexical::UnsignedInt, Primitive::Integer(i)) if *i < 0 => Err(invalid_value(
            type_name,
            format!("Integer value: {i} is less than minimum required value: 0"),
        )),
        (Lexical::Instant, Primitive::DateTime(dt)) if !dt.is_full() => Err(invalid_value(
            type_name,
            format!("'{dt}' must include a time and a zone offset"),
        )),
        // leaf type mismatches are reported by the element type check
        _ => Ok(()),
    }
}

/// Whitespace as `\s` in the FHIR patterns: Unicode white space without the
/// non-breaking spaces and NEL, plus the information separators U+001C..U+001F.
fn is_fhir_whitespace(ch: char) -> bool {
    match ch {
        '\u{a0}' | '\u{2007}' | '\u{202f}' | '\u{85}' => false,
        '\u{1c}'..='\u{1f}' => true,
        _ => ch.is_whitespace(),
    }
}

fn is_unsupported_control_char(ch: char) -> bool {
    matches!(ch as u32, 0..=8 | 11 | 12 | 14..=31)
}

fn check_max_length(type_name: &str, s: &str, config: &ModelConfig) -> Result<()> {
    let length = s.chars().count();
    if length > config.max_string_length {
        return Err(invalid_value(
            type_name,
            format!(
                "String value length: {length} is greater than maximum allowed length: {}",
                config.max_string_length
            ),
        ));
    }
    Ok(())
}

fn check_control_chars(type_name: &str, s: &str, config: &ModelConfig) -> Result<()> {
    if config.check_control_chars && s.chars().any(is_unsupported_control_char) {
        return Err(invalid_value(
            type_name,
            format!("String value contains unsupported control characters: [{}]", s.escape_default()),
        ));
    }
    Ok(())
}

/// Pattern `[ \r\n\t\S]+`
pub fn check_string(type_name: &str, s: &str, config: &ModelConfig) -> Result<()> {
    check_max_length(type_name, s, config)?;
    check_control_chars(type_name, s, config)?;

    let mut count = 0;
    for ch in s.chars() {
        if !is_fhir_whitespace(ch) {
            count += 1;
        } else if !matches!(ch, ' ' | '\t' | '\r' | '\n') {
            return Err(invalid_value(
                type_name,
                format!("String value: '{}' is not valid with respect to pattern: [ \\r\\n\\t\\S]+", s.escape_default()),
            ));
        }
    }
    if count == 0 {
        return Err(invalid_value(
            type_name,
            "Trimmed String value length: 0 is less than minimum required length: 1".to_string(),
        ));
    }
    Ok(())
}

/// Pattern `[^\s]+(\s[^\s]+)*`
pub fn check_code(type_name: &str, s: &str, config: &ModelConfig) -> Result<()> {
    check_control_chars(type_name, s, config)?;

    if s.chars().next().map_or(true, is_fhir_whitespace) {
        return Err(invalid_value(
            type_name,
            format!("Code value: '{s}' must begin with a non-whitespace character"),
        ));
    }
    if s.chars().last().is_some_and(is_fhir_whitespace) {
        return Err(invalid_value(
            type_name,
            format!("Code value: '{s}' must end with a non-whitespace character"),
        ));
    }

    let mut previous_is_space = false;
    for ch in s.chars() {
        if is_fhir_whitespace(ch) {
            if ch != ' ' {
                return Err(invalid_value(
                    type_name,
                    format!("Code value: '{}' must not contain whitespace other than a single space", s.escape_default()),
                ));
            }
            if previous_is_space {
                return Err(invalid_value(
                    type_name,
                    format!("Code value: '{s}' must not contain consecutive spaces"),
                ));
            }
            previous_is_space = true;
        } else {
            previous_is_space = false;
        }
    }
    Ok(())
}

/// Pattern `[A-Za-z0-9\-\.]{1,64}`
pub fn check_id(type_name: &str, s: &str) -> Result<()> {
    if s.is_empty() {
        return Err(invalid_value(type_name, "Id value must not be empty".to_string()));
    }
    if s.len() > 64 {
        return Err(invalid_value(
            type_name,
            format!("Id value length: {} is greater than maximum allowed length: 64", s.len()),
        ));
    }
    if let Some(ch) = s
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '.'))
    {
        return Err(invalid_value(
            type_name,
            format!("Id value: '{s}' contain invalid character '{}'", ch.escape_default()),
        ));
    }
    Ok(())
}

/// Pattern `\S*`
pub fn check_uri(type_name: &str, s: &str, config: &ModelConfig) -> Result<()> {
    check_max_length(type_name, s, config)?;
    check_control_chars(type_name, s, config)?;

    if s.chars().any(is_fhir_whitespace) {
        return Err(invalid_value(
            type_name,
            format!("Uri value: '{}' must not contain whitespace", s.escape_default()),
        ));
    }
    Ok(())
}

/// Standard alphabet with canonical padding and zero trailing bits
pub fn check_base64(type_name: &str, s: &str) -> Result<()> {
    general_purpose::STANDARD
        .decode(s)
        .map(|_| ())
        .map_err(|e| invalid_value(type_name, format!("Invalid base64 string: {e}")))
}

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Well-formed XML whose root is a `div` in the XHTML namespace
pub fn check_xhtml(type_name: &str, s: &str) -> Result<()> {
    let document = Document::parse(s)
        .map_err(|e| invalid_value(type_name, format!("Invalid XHTML content: {e}")))?;
    let root = document.root_element().tag_name();
    if root.name() != "div" || root.namespace() != Some(XHTML_NS) {
        return Err(invalid_value(
            type_name,
            format!("XHTML content must have a root 'div' element in namespace: {XHTML_NS}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ModelConfig {
        ModelConfig::default()
    }

    #[test]
    fn partial_dates_parse_at_every_precision() {
        assert_eq!("2021".parse::<PartialDate>().unwrap(), PartialDate::Year(2021));
        assert_eq!(
            "2021-03".parse::<PartialDate>().unwrap(),
            PartialDate::YearMonth(2021, 3)
        );
        assert_eq!(
            "2021-03-15".parse::<PartialDate>().unwrap().to_string(),
            "2021-03-15"
        );
        assert!("2021-13".parse::<PartialDate>().is_err());
        assert!("2021-02-30".parse::<PartialDate>().is_err());
        assert!("0000".parse::<PartialDate>().is_err());
        assert!("21-03-15".parse::<PartialDate>().is_err());
    }

    #[test]
    fn date_times_require_offset_with_time() {
        let full: PartialDateTime = "2015-02-07T13:28:17-05:00".parse().unwrap();
        assert!(full.is_full());

        let partial: PartialDateTime = "2015-02".parse().unwrap();
        assert!(!partial.is_full());
        assert_eq!(partial.to_string(), "2015-02");

        assert!("2015-02-07T13:28".parse::<PartialDateTime>().is_err());
        assert!("2015-02-07T13:28:17".parse::<PartialDateTime>().is_err());
    }

    #[test]
    fn string_rules() {
        assert!(check_string("string", "hello world", &config()).is_ok());
        assert!(check_string("string", "line\nbreak\ttab", &config()).is_ok());
        assert!(check_string("string", "   ", &config()).is_err());
        assert!(check_string("string", "", &config()).is_err());
        assert!(check_string("string", "bell\u{7}", &config()).is_err());
        assert!(check_string("string", "10\u{a0}mg", &config()).is_ok());
        assert!(check_string("string", "\u{a0}", &config()).is_ok());
        assert!(check_string("string", "vertical\u{b}tab", &ModelConfig::lenient()).is_err());

        let lenient = ModelConfig::lenient();
        assert!(check_string("string", "bell\u{7}", &lenient).is_ok());

        let short = ModelConfig::builder().max_string_length(3).build();
        assert!(check_string("string", "abcd", &short).is_err());
    }

    #[test]
    fn code_rules() {
        assert!(check_code("code", "entered-in-error", &config()).is_ok());
        assert!(check_code("code", "two words", &config()).is_ok());
        assert!(check_code("code", " leading", &config()).is_err());
        assert!(check_code("code", "trailing ", &config()).is_err());
        assert!(check_code("code", "double  space", &config()).is_err());
        assert!(check_code("code", "tab\tinside", &config()).is_err());
        assert!(check_code("code", "", &config()).is_err());
        assert!(check_code("code", "a\u{a0}b", &config()).is_ok());
        assert!(check_code("code", "a\u{2028}b", &config()).is_err());
    }

    #[test]
    fn id_rules() {
        assert!(check_id("id", "example-1.2").is_ok());
        assert!(check_id("id", "").is_err());
        assert!(check_id("id", "has_underscore").is_err());
        assert!(check_id("id", &"a".repeat(65)).is_err());
    }

    #[test]
    fn uri_rules() {
        assert!(check_uri("uri", "http://hl7.org/fhir", &config()).is_ok());
        assert!(check_uri("uri", "urn:uuid:53fefa32-fcbb-4ff8-8a92-55ee120877b7", &config()).is_ok());
        assert!(check_uri("uri", "http://has space", &config()).is_err());
    }

    #[test]
    fn base64_rules() {
        assert!(check_base64("base64Binary", "aGVsbG8=").is_ok());
        assert!(check_base64("base64Binary", "aGVsbA==").is_ok());
        assert!(check_base64("base64Binary", "aGVsbG8").is_err());
        assert!(check_base64("base64Binary", "aGVsbG9=").is_err());
        assert!(check_base64("base64Binary", "aGV$bG8=").is_err());
        assert!(check_base64("base64Binary", "a===").is_err());
        assert!(check_base64("base64Binary", "").is_ok());
    }

    #[test]
    fn xhtml_rules() {
        let div = r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>Penicillin <b>allergy</b></p></div>"#;
        assert!(check_xhtml("xhtml", div).is_ok());
        assert!(check_xhtml("xhtml", "not xml").is_err());
        assert!(check_xhtml("xhtml", "<div>no namespace</div>").is_err());
        assert!(check_xhtml("xhtml", r#"<p xmlns="http://www.w3.org/1999/xhtml">x</p>"#).is_err());
        assert!(check_xhtml("xhtml", r#"<div xmlns="http://www.w3.org/1999/xhtml"><p></div>"#).is_err());
    }

    #[test]
    fn exact_equality_keeps_scale_and_offset() {
        let a = Primitive::Decimal(Decimal::new(10, 1));
        let b = Primitive::Decimal(Decimal::new(100, 2));
        assert_ne!(a, b);
        assert_eq!(a, Primitive::Decimal(Decimal::new(10, 1)));
        assert_eq!(a.to_string(), "1.0");
        assert_eq!(b.to_string(), "1.00");

        let utc: PartialDateTime = "2020-01-01T10:00:00Z".parse().unwrap();
        let shifted: PartialDateTime = "2020-01-01T11:00:00+01:00".parse().unwrap();
        let zero: PartialDateTime = "2020-01-01T10:00:00+00:00".parse().unwrap();
        assert_ne!(utc, shifted);
        assert_ne!(utc, zero);
        assert_eq!(zero.to_string(), "2020-01-01T10:00:00+00:00");

        let fraction: PartialDateTime = "2020-01-01T10:00:00.1Z".parse().unwrap();
        assert_eq!(fraction.to_string(), "2020-01-01T10:00:00.1Z");
    }

    #[test]
    fn lexical_dispatch() {
        let cfg = config();
        assert!(check_lexical("positiveInt", Lexical::PositiveInt, &Primitive::Integer(0), &cfg).is_err());
        assert!(check_lexical("unsignedInt", Lexical::UnsignedInt, &Primitive::Integer(0), &cfg).is_ok());

        let date_only = Primitive::DateTime("2020-01-01".parse().unwrap());
        assert!(check_lexical("instant", Lexical::Instant, &date_only, &cfg).is_err());
    }
}
