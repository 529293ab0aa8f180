//! The frontmatter schema and the gate that enforces it.
//!
//! Every post must carry `title`, `subtitle`, `date` and `tags`. `author`,
//! `cover` and `series` are optional and only checked when present.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_yaml::Value;

use crate::error::{SchemaError, ValidationError};
use crate::frontmatter::{describe_value, RawFrontmatter};

const EXPECTED_STRING: &str = "string";
const EXPECTED_OPTIONAL_STRING: &str = "string or null";
const EXPECTED_TAGS: &str = "array of strings";
const EXPECTED_DATE: &str = "date (YYYY-MM-DD or YAML timestamp)";
const EXPECTED_SERIES: &str = "mapping with part, prev and next";
const EXPECTED_PART: &str = "non-negative integer";

/// A post title. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// # Errors
    ///
    /// Returns [`SchemaError::ConstraintViolated`] if `title` is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, SchemaError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(SchemaError::ConstraintViolated {
                field: "title".to_string(),
                expected: "non-empty string".to_string(),
                actual: describe_value(&Value::String(title)),
            });
        }
        Ok(Self(title))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of a post within its series, counted from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PartNumber(u64);

impl PartNumber {
    /// # Errors
    ///
    /// Returns [`SchemaError::ConstraintViolated`] if `part` is negative.
    pub fn new(part: i64) -> Result<Self, SchemaError> {
        u64::try_from(part)
            .map(Self)
            .map_err(|_| part_violation(&Value::Number(part.into())))
    }

    /// Accept a YAML number, which may arrive as an integral float (`2.0`).
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ConstraintViolated`] if the number is negative
    /// or has a fractional part.
    pub fn from_number(number: &serde_yaml::Number) -> Result<Self, SchemaError> {
        if let Some(part) = number.as_u64() {
            return Ok(Self(part));
        }
        if let Some(part) = number.as_i64() {
            return Self::new(part);
        }
        match number.as_f64() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(f) if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 => {
                Ok(Self(f as u64))
            }
            _ => Err(part_violation(&Value::Number(number.clone()))),
        }
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

fn part_violation(actual: &Value) -> SchemaError {
    SchemaError::ConstraintViolated {
        field: "series.part".to_string(),
        expected: EXPECTED_PART.to_string(),
        actual: describe_value(actual),
    }
}

/// Membership of a post in a multi-part series.
///
/// `prev` and `next` hold the identifiers of the neighbouring posts; `None`
/// means the frontmatter said `null` explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub part: PartNumber,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Schema-conformant frontmatter. Never mutated after validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedFrontmatter {
    pub title: Title,
    pub subtitle: String,
    #[serde(serialize_with = "serialize_date")]
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Series>,
}

fn serialize_date<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}

/// The Frontmatter Gate: checks raw metadata against the post schema.
///
/// Rules enforced:
/// - `title`, `subtitle`, `date`, `tags` are present and well typed
/// - `title` is non-empty
/// - `date` decodes to a calendar date
/// - `author`, `cover` are strings when present
/// - `series` has `part` (integer ≥ 0), `prev` and `next` (string or null)
pub struct FrontmatterGate;

impl FrontmatterGate {
    /// Validate raw frontmatter and produce a [`ValidatedFrontmatter`].
    ///
    /// All violations are collected, so one run reports every broken field.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing each violated field with its
    /// expected shape and the value found.
    pub fn validate(raw: &RawFrontmatter) -> Result<ValidatedFrontmatter, ValidationError> {
        let mut check = Checker::default();

        let title = check
            .required(raw.get("title"), "title", EXPECTED_STRING)
            .and_then(|v| check.string(v, "title", EXPECTED_STRING))
            .and_then(|t| check.refine(Title::new(t)));
        let subtitle = check
            .required(raw.get("subtitle"), "subtitle", EXPECTED_STRING)
            .and_then(|v| check.string(v, "subtitle", EXPECTED_STRING));
        let date = check
            .required(raw.get("date"), "date", EXPECTED_DATE)
            .and_then(|v| check.date(v));
        let tags = check
            .required(raw.get("tags"), "tags", EXPECTED_TAGS)
            .and_then(|v| check.tags(v));
        let author = check.optional_string(raw.get("author"), "author");
        let cover = check.optional_string(raw.get("cover"), "cover");
        let series = check.series(raw.get("series"));

        match (title, subtitle, date, tags) {
            (Some(title), Some(subtitle), Some(date), Some(tags)) if check.errors.is_empty() => {
                Ok(ValidatedFrontmatter {
                    title,
                    subtitle,
                    date,
                    tags,
                    author,
                    cover,
                    series,
                })
            }
            _ => Err(ValidationError::new(check.errors)),
        }
    }
}

/// Accumulates violations while walking the raw map.
#[derive(Default)]
struct Checker {
    errors: Vec<SchemaError>,
}

impl Checker {
    fn required<'a>(
        &mut self,
        value: Option<&'a Value>,
        field: &str,
        expected: &str,
    ) -> Option<&'a Value> {
        if value.is_none() {
            self.errors.push(SchemaError::MissingRequiredField {
                field: field.to_string(),
                expected: expected.to_string(),
            });
        }
        value
    }

    fn mismatch(&mut self, field: &str, expected: &str, actual: &Value) {
        self.errors.push(SchemaError::InvalidFieldType {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: describe_value(actual),
        });
    }

    fn refine<T>(&mut self, result: Result<T, SchemaError>) -> Option<T> {
        result.map_err(|e| self.errors.push(e)).ok()
    }

    fn string(&mut self, value: &Value, field: &str, expected: &str) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.mismatch(field, expected, other);
                None
            }
        }
    }

    /// Absent and explicit `null` are both `None`.
    fn optional_string(&mut self, value: Option<&Value>, field: &str) -> Option<String> {
        match value {
            None | Some(Value::Null) => None,
            Some(v) => self.string(v, field, EXPECTED_OPTIONAL_STRING),
        }
    }

    fn date(&mut self, value: &Value) -> Option<DateTime<Utc>> {
        let decoded = match value {
            Value::String(s) => parse_date(s),
            Value::Tagged(tagged) => match &tagged.value {
                Value::String(s) => parse_date(s),
                _ => None,
            },
            _ => None,
        };
        if decoded.is_none() {
            self.errors.push(SchemaError::DecodeFailure {
                field: "date".to_string(),
                expected: EXPECTED_DATE.to_string(),
                actual: describe_value(value),
            });
        }
        decoded
    }

    fn tags(&mut self, value: &Value) -> Option<Vec<String>> {
        let Value::Sequence(items) = value else {
            self.mismatch("tags", EXPECTED_TAGS, value);
            return None;
        };
        let before = self.errors.len();
        let tags: Vec<String> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.string(item, &format!("tags[{i}]"), EXPECTED_STRING))
            .collect();
        (self.errors.len() == before).then_some(tags)
    }

    fn series(&mut self, value: Option<&Value>) -> Option<Series> {
        let map = match value {
            None | Some(Value::Null) => return None,
            Some(Value::Mapping(map)) => map,
            Some(other) => {
                self.mismatch("series", EXPECTED_SERIES, other);
                return None;
            }
        };

        let part = self
            .required(map.get("part"), "series.part", EXPECTED_PART)
            .and_then(|v| match v {
                Value::Number(n) => self.refine(PartNumber::from_number(n)),
                other => {
                    self.mismatch("series.part", EXPECTED_PART, other);
                    None
                }
            });
        let prev = self.nullable_link(map.get("prev"), "series.prev");
        let next = self.nullable_link(map.get("next"), "series.next");

        Some(Series {
            part: part?,
            prev: prev?,
            next: next?,
        })
    }

    /// The key must be present; its value is a string or an explicit `null`.
    fn nullable_link(&mut self, value: Option<&Value>, field: &str) -> Option<Option<String>> {
        match self.required(value, field, EXPECTED_OPTIONAL_STRING)? {
            Value::Null => Some(None),
            v => self.string(v, field, EXPECTED_OPTIONAL_STRING).map(Some),
        }
    }
}

/// `YYYY-MM-DD`, always two-digit month and day.
static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").unwrap());

/// YAML 1.1 timestamp: `T`, `t` or blanks between date and time, optional
/// fraction, optional zone (`Z` or `±h[h][[:]mm]`, blanks allowed before it).
static RE_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})",
        r"(?:[Tt]|[ \t]+)([0-9]{1,2}):([0-9]{2}):([0-9]{2})",
        r"(?:\.([0-9]*))?",
        r"(?:[ \t]*([Zz]|([-+])([0-9]{1,2})(?::?([0-9]{2}))?))?$",
    ))
    .unwrap()
});

/// Decode a frontmatter date. Date-only values and timestamps without a
/// zone land in UTC.
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Some(caps) = RE_DATE.captures(s) {
        let date = NaiveDate::from_ymd_opt(num(&caps[1])?, num(&caps[2])?, num(&caps[3])?)?;
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    let caps = RE_TIMESTAMP.captures(s)?;
    let date = NaiveDate::from_ymd_opt(num(&caps[1])?, num(&caps[2])?, num(&caps[3])?)?;
    let nanos = match caps.get(7) {
        Some(fraction) => fraction_nanos(fraction.as_str())?,
        None => 0,
    };
    let local = date.and_hms_nano_opt(num(&caps[4])?, num(&caps[5])?, num(&caps[6])?, nanos)?;

    let offset_secs = match caps.get(9) {
        None => 0,
        Some(sign) => {
            let hours: i32 = num(&caps[10])?;
            let minutes: i32 = match caps.get(11) {
                Some(m) => num(m.as_str())?,
                None => 0,
            };
            let secs = hours * 3600 + minutes * 60;
            if sign.as_str() == "-" {
                -secs
            } else {
                secs
            }
        }
    };
    FixedOffset::east_opt(offset_secs)?
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

fn num<T: FromStr>(digits: &str) -> Option<T> {
    digits.parse().ok()
}

/// Fractional seconds to nanoseconds, keeping at most nine digits.
fn fraction_nanos(digits: &str) -> Option<u32> {
    let digits = &digits[..digits.len().min(9)];
    format!("{digits:0<9}").parse().ok()
}
