//! The command language parser.
//!
//! A command line is a command name followed by any number of arguments,
//! separated by runs of spaces or tabs:
//!
//! - `42`, `-2.5`, `hello`, `"hello world"` are primitives
//! - `[1, -2.5, "hi there"]` is a list of primitives
//! - `{x=integer, "y z"=4}` is a key-value list, keys are text
//!
//! A bare token is a number only if the whole of it reads as one, anything
//! else falls back to text. A leading zero ends the integral part, so `0123`
//! is the text `"0123"`, and exponents are never accepted.

use crate::error::{Error, Result};
use crate::persistence::Value;

/// A scalar argument. Shares its representation with stored cells.
pub type Primitive = Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Integer(i64),
    Decimal(f64),
    Text(String),
    List(Vec<Primitive>),
    KeyValueList(Vec<(String, Primitive)>),
}

const WHITESPACE: &[char] = &[' ', '\t'];
const ARGUMENT_DELIMITERS: &[char] = &[' ', '\t'];
const LIST_DELIMITERS: &[char] = &[',', ']'];
const KEY_VALUE_DELIMITERS: &[char] = &[',', '}'];
const KEY_DELIMITERS: &[char] = &['='];

/// Outcome of reading a bare token as a number.
#[derive(Debug, PartialEq)]
enum Number {
    Integer(i64),
    Decimal(f64),
    NotANumber,
}

impl From<Primitive> for Argument {
    fn from(value: Primitive) -> Self {
        match value {
            Value::Integer(value) => Argument::Integer(value),
            Value::Decimal(value) => Argument::Decimal(value),
            Value::Text(value) => Argument::Text(value),
        }
    }
}

impl Argument {
    pub fn kind(&self) -> &'static str {
        match self {
            Argument::Integer(_) => "integer",
            Argument::Decimal(_) => "decimal",
            Argument::Text(_) => "text",
            Argument::List(_) => "list",
            Argument::KeyValueList(_) => "key-value list",
        }
    }

    pub fn into_primitive(self) -> Option<Primitive> {
        match self {
            Argument::Integer(value) => Some(Value::Integer(value)),
            Argument::Decimal(value) => Some(Value::Decimal(value)),
            Argument::Text(value) => Some(Value::Text(value)),
            Argument::List(_) | Argument::KeyValueList(_) => None,
        }
    }
}

pub fn parse_command(line: &str) -> Result<(String, Vec<Argument>)> {
    //! Split one line into its command name and typed arguments.
    //!
    //! Fails with [`Error::Syntax`] on an unterminated quote or a missing
    //! `,`, `]`, `}` or `=`.

    let mut cursor = Cursor { rest: line };

    cursor.skip_whitespace();
    let command = cursor.command();
    cursor.skip_whitespace();

    let mut arguments = Vec::new();
    while let Some(next) = cursor.peek() {
        let argument = match next {
            '[' => Argument::List(cursor.list()?),
            '{' => Argument::KeyValueList(cursor.key_value_list()?),
            _ => cursor.primitive(ARGUMENT_DELIMITERS)?.into(),
        };
        arguments.push(argument);
        cursor.skip_whitespace();
    }

    Ok((command.to_string(), arguments))
}

/// The unconsumed tail of the line being parsed.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self, n_bytes: usize) -> &'a str {
        let (consumed, rest) = self.rest.split_at(n_bytes);
        self.rest = rest;
        consumed
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start_matches(WHITESPACE);
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            None => Err(Error::syntax(
                format!("no remaining input when expecting '{}'", expected),
                "",
            )),
            Some(found) if found != expected => Err(Error::syntax(
                format!("found '{}' where '{}' was expected", found, expected),
                self.rest,
            )),
            Some(_) => {
                self.advance(expected.len_utf8());
                Ok(())
            }
        }
    }

    fn command(&mut self) -> &'a str {
        let end = self.rest.find(WHITESPACE).unwrap_or(self.rest.len());
        self.advance(end)
    }

    fn bare(&mut self, delimiters: &[char]) -> &'a str {
        //! Everything up to the next delimiter, not consuming it.

        let end = self.rest.find(delimiters).unwrap_or(self.rest.len());
        self.advance(end)
    }

    fn text(&mut self, delimiters: &[char]) -> Result<&'a str> {
        if self.peek() != Some('"') {
            return Ok(self.bare(delimiters).trim_end_matches(WHITESPACE));
        }

        let end = self.rest[1..]
            .find('"')
            .ok_or_else(|| Error::syntax("input ends before the closing quote", self.rest))?;
        self.advance(1);
        let text = self.advance(end);
        self.advance(1);
        self.skip_whitespace();

        Ok(text)
    }

    fn primitive(&mut self, delimiters: &[char]) -> Result<Primitive> {
        if self.peek() == Some('"') {
            return Ok(Value::Text(self.text(delimiters)?.to_string()));
        }

        let token = self.bare(delimiters);
        Ok(match parse_number(token) {
            Number::Integer(value) => Value::Integer(value),
            Number::Decimal(value) => Value::Decimal(value),
            Number::NotANumber => Value::Text(token.trim_end_matches(WHITESPACE).to_string()),
        })
    }

    fn list(&mut self) -> Result<Vec<Primitive>> {
        let mut items = Vec::new();

        self.expect('[')?;
        self.skip_whitespace();

        let mut first = true;
        while let Some(next) = self.peek() {
            if next == ']' || (!first && next != ',') {
                break;
            }
            if !first {
                self.expect(',')?;
                self.skip_whitespace();
            }
            first = false;

            items.push(self.primitive(LIST_DELIMITERS)?);
            self.skip_whitespace();
        }

        self.expect(']')?;
        Ok(items)
    }

    fn key_value_list(&mut self) -> Result<Vec<(String, Primitive)>> {
        let mut pairs = Vec::new();

        self.expect('{')?;
        self.skip_whitespace();

        let mut first = true;
        while let Some(next) = self.peek() {
            if next == '}' || (!first && next != ',') {
                break;
            }
            if !first {
                self.expect(',')?;
                self.skip_whitespace();
            }
            first = false;

            let key = self.text(KEY_DELIMITERS)?.to_string();
            self.expect('=')?;
            self.skip_whitespace();
            let value = self.primitive(KEY_VALUE_DELIMITERS)?;
            pairs.push((key, value));
            self.skip_whitespace();
        }

        self.expect('}')?;
        Ok(pairs)
    }
}

fn parse_number(token: &str) -> Number {
    //! Read `-?digits(.digits)?` off the front of `token`. Anything but
    //! trailing whitespace left over means the token is not a number.

    let (sign, unsigned) = match token.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", token),
    };

    let integral_len = if unsigned.starts_with('0') {
        1
    } else {
        leading_digits(unsigned)
    };
    let (integral, rest) = unsigned.split_at(integral_len);

    let (fraction, rest) = match rest.strip_prefix('.') {
        Some(after_point) => {
            let (fraction, rest) = after_point.split_at(leading_digits(after_point));
            (Some(fraction), rest)
        }
        None => (None, rest),
    };

    // also rejects exponents such as `1.5e3`
    if !rest.trim_start_matches(WHITESPACE).is_empty() {
        return Number::NotANumber;
    }

    match fraction {
        None if integral.is_empty() => Number::NotANumber,
        None => format!("{}{}", sign, integral)
            .parse::<i64>()
            .map_or(Number::NotANumber, Number::Integer),
        Some(fraction) => format!(
            "{}{}.{}",
            sign,
            if integral.is_empty() { "0" } else { integral },
            if fraction.is_empty() { "0" } else { fraction },
        )
        .parse::<f64>()
        .map_or(Number::NotANumber, Number::Decimal),
    }
}

fn leading_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}
