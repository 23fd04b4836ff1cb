//! Numeric format patterns.
//!
//! A pattern holds exactly one replacement field in the familiar
//! `{:[[fill]align][sign][0][width][,|_][.precision][type]}` notation,
//! optionally surrounded by literal text:
//!
//! | Pattern      | Value    | Output      |
//! |--------------|----------|-------------|
//! | `{:,.0f}`    | 1000     | `1,000`     |
//! | `{:,.2f}`    | 1234.5   | `1,234.50`  |
//! | `{:.1%}`     | 0.256    | `25.6%`     |
//! | `{:+d}`      | 42       | `+42`       |
//! | `{:.2e}`     | 1500     | `1.50e+03`  |
//! | `£{:,.0f}`   | 1500     | `£1,500`    |
//!
//! Supported types are `f`/`F`, `e`/`E`, `%`, `d` and none. `{{` and `}}`
//! are literal braces outside the field.

use std::str::FromStr;

use sheet2tex_data::Cell;

use crate::error::FormatError;

const DEFAULT_PRECISION: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    /// Padding goes between the sign and the digits
    AfterSign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Minus,
    Plus,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Fixed { upper: bool },
    Exponent { upper: bool },
    Percent,
    Integer,
}

#[derive(Debug, Clone, PartialEq)]
struct FieldSpec {
    fill: char,
    align: Align,
    sign: Sign,
    width: usize,
    grouping: Option<char>,
    precision: Option<usize>,
    kind: Option<Kind>,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: Align::Right,
            sign: Sign::Minus,
            width: 0,
            grouping: None,
            precision: None,
            kind: None,
        }
    }
}

/// A parsed numeric format pattern
#[derive(Debug, Clone, PartialEq)]
pub struct NumberFormat {
    pattern: String,
    prefix: String,
    suffix: String,
    spec: FieldSpec,
}

impl NumberFormat {
    /// Parse a pattern such as `{:,.0f}`
    pub fn parse(pattern: &str) -> Result<Self, FormatError> {
        let invalid = |reason: &str| FormatError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut field: Option<String> = None;
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            let literal = match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    '{'
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    '}'
                }
                '{' => {
                    if field.is_some() {
                        return Err(invalid("more than one replacement field"));
                    }
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') => return Err(invalid("nested replacement field")),
                            Some(ch) => body.push(ch),
                            None => return Err(invalid("unclosed '{'")),
                        }
                    }
                    field = Some(body);
                    continue;
                }
                '}' => return Err(invalid("single '}' encountered")),
                other => other,
            };

            if field.is_some() {
                suffix.push(literal);
            } else {
                prefix.push(literal);
            }
        }

        let field = field.ok_or_else(|| invalid("no replacement field"))?;
        let spec_text = match field.split_once(':') {
            Some(("" | "0", spec)) => spec,
            None if field.is_empty() || field == "0" => "",
            _ => return Err(invalid("only an empty or `0` field name is supported")),
        };

        Ok(Self {
            pattern: pattern.to_string(),
            prefix,
            suffix,
            spec: Self::parse_spec(pattern, spec_text)?,
        })
    }

    fn parse_spec(pattern: &str, text: &str) -> Result<FieldSpec, FormatError> {
        let invalid = |reason: &str| FormatError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };
        let align_of = |c: char| match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            '=' => Some(Align::AfterSign),
            _ => None,
        };

        let chars: Vec<char> = text.chars().collect();
        let mut spec = FieldSpec::default();
        let mut explicit_align = false;
        let mut i = 0;

        if let Some(align) = chars.get(1).and_then(|&c| align_of(c)) {
            spec.fill = chars[0];
            spec.align = align;
            explicit_align = true;
            i = 2;
        } else if let Some(align) = chars.first().and_then(|&c| align_of(c)) {
            spec.align = align;
            explicit_align = true;
            i = 1;
        }

        let sign = match chars.get(i) {
            Some('+') => Some(Sign::Plus),
            Some(' ') => Some(Sign::Space),
            Some('-') => Some(Sign::Minus),
            _ => None,
        };
        if let Some(sign) = sign {
            spec.sign = sign;
            i += 1;
        }

        // `z` and `#` change nothing for the supported types
        if chars.get(i) == Some(&'z') {
            i += 1;
        }
        if chars.get(i) == Some(&'#') {
            i += 1;
        }

        if chars.get(i) == Some(&'0') {
            if !explicit_align {
                spec.fill = '0';
                spec.align = Align::AfterSign;
            }
            i += 1;
        }

        let (width, next) = Self::read_digits(&chars, i);
        spec.width = width.unwrap_or(0);
        i = next;

        if let Some(&sep @ (',' | '_')) = chars.get(i) {
            spec.grouping = Some(sep);
            i += 1;
        }

        if chars.get(i) == Some(&'.') {
            let (precision, next) = Self::read_digits(&chars, i + 1);
            spec.precision = Some(precision.ok_or_else(|| invalid("missing precision"))?);
            i = next;
        }

        spec.kind = match &chars[i..] {
            [] => None,
            ['f'] => Some(Kind::Fixed { upper: false }),
            ['F'] => Some(Kind::Fixed { upper: true }),
            ['e'] => Some(Kind::Exponent { upper: false }),
            ['E'] => Some(Kind::Exponent { upper: true }),
            ['%'] => Some(Kind::Percent),
            ['d'] => Some(Kind::Integer),
            [c] => {
                return Err(FormatError::UnsupportedType {
                    pattern: pattern.to_string(),
                    kind: *c,
                })
            }
            _ => return Err(invalid("unexpected characters in format spec")),
        };

        if spec.precision.is_some() && matches!(spec.kind, None | Some(Kind::Integer)) {
            return Err(FormatError::PrecisionNotAllowed {
                pattern: pattern.to_string(),
            });
        }

        Ok(spec)
    }

    /// Read a run of ASCII digits starting at `start`
    fn read_digits(chars: &[char], start: usize) -> (Option<usize>, usize) {
        let end = chars[start.min(chars.len())..]
            .iter()
            .position(|c| !c.is_ascii_digit())
            .map_or(chars.len(), |p| start + p);

        if end <= start {
            return (None, start);
        }
        let digits: String = chars[start..end].iter().collect();
        (digits.parse().ok(), end)
    }

    /// The pattern text this format was parsed from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Format one cell of a numeric column; missing values stay empty and
    /// non-numeric cells are stringified unchanged
    pub fn format_cell(&self, cell: &Cell) -> Result<String, FormatError> {
        match cell {
            Cell::Empty => Ok(String::new()),
            Cell::Int(i) => Ok(self.format_int(*i)),
            Cell::Float(x) => self.format_float(*x),
            other => Ok(other.to_string()),
        }
    }

    pub fn format_int(&self, value: i64) -> String {
        let digits = match self.spec.kind {
            None | Some(Kind::Integer) => value.unsigned_abs().to_string(),
            Some(_) => return self.render_float(value as f64),
        };
        self.finish(value < 0, &digits)
    }

    pub fn format_float(&self, value: f64) -> Result<String, FormatError> {
        match self.spec.kind {
            Some(Kind::Integer) => Err(FormatError::IntegerRequired {
                pattern: self.pattern.clone(),
                value,
            }),
            _ => Ok(self.render_float(value)),
        }
    }

    fn render_float(&self, value: f64) -> String {
        let negative = value.is_sign_negative() && !value.is_nan();
        let magnitude = value.abs();

        let digits = if !magnitude.is_finite() {
            let text = if magnitude.is_nan() { "nan" } else { "inf" };
            let text = match self.spec.kind {
                Some(Kind::Fixed { upper: true } | Kind::Exponent { upper: true }) => {
                    text.to_uppercase()
                }
                _ => text.to_string(),
            };
            if self.spec.kind == Some(Kind::Percent) {
                format!("{}%", text)
            } else {
                text
            }
        } else {
            let precision = self.spec.precision.unwrap_or(DEFAULT_PRECISION);
            match self.spec.kind {
                Some(Kind::Fixed { .. }) => format!("{:.*}", precision, magnitude),
                Some(Kind::Percent) => format!("{:.*}%", precision, magnitude * 100.0),
                Some(Kind::Exponent { upper }) => exponent(magnitude, precision, upper),
                Some(Kind::Integer) | None => Cell::Float(magnitude).to_string(),
            }
        };

        self.finish(negative, &digits)
    }

    /// Apply grouping, sign, padding and the literal prefix/suffix
    fn finish(&self, negative: bool, digits: &str) -> String {
        let spec = &self.spec;

        let sign = match (negative, spec.sign) {
            (true, _) => "-",
            (false, Sign::Plus) => "+",
            (false, Sign::Space) => " ",
            (false, Sign::Minus) => "",
        };

        // Zero padding is grouped along with the digits: `00,001,234`
        let digits = match spec.grouping {
            Some(sep) if spec.fill == '0' && spec.align == Align::AfterSign => {
                zero_pad_grouped(digits, sep, spec.width.saturating_sub(sign.len()))
            }
            Some(sep) => group_integer_part(digits, sep),
            None => digits.to_string(),
        };

        let len = sign.chars().count() + digits.chars().count();
        let pad = spec.width.saturating_sub(len);
        let fill = |n: usize| spec.fill.to_string().repeat(n);

        let body = match spec.align {
            Align::Left => format!("{}{}{}", sign, digits, fill(pad)),
            Align::Right => format!("{}{}{}", fill(pad), sign, digits),
            Align::Center => format!("{}{}{}{}", fill(pad / 2), sign, digits, fill(pad - pad / 2)),
            Align::AfterSign => format!("{}{}{}", sign, fill(pad), digits),
        };

        format!("{}{}{}", self.prefix, body, self.suffix)
    }
}

impl FromStr for NumberFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Scientific notation with a signed, at least two digit exponent
fn exponent(magnitude: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision, magnitude);
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };

    format!("{}{}{}{:02}", mantissa, marker, sign, exp.abs())
}

/// Left-pad the integer part with zeros until the grouped text is at
/// least `width` wide, then group it
fn zero_pad_grouped(digits: &str, sep: char, width: usize) -> String {
    let split = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if split == 0 {
        return digits.to_string();
    }

    let (int_part, rest) = digits.split_at(split);
    let min_int = width.saturating_sub(rest.chars().count());
    let mut len = int_part.len();
    while len + (len - 1) / 3 < min_int {
        len += 1;
    }

    let padded = format!("{}{}{}", "0".repeat(len - int_part.len()), int_part, rest);
    group_integer_part(&padded, sep)
}

/// Insert `sep` every three digits of the leading run of digits
fn group_integer_part(digits: &str, sep: char) -> String {
    let split = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let (int_part, rest) = digits.split_at(split);

    let mut grouped = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(c);
    }
    grouped.push_str(rest);
    grouped
}
