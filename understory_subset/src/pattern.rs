// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `printf`-style name templates with a single integer placeholder.
//!
//! A template such as `"dom%04d.silo"` is split once into a literal prefix, one
//! integer conversion and a literal suffix. [`NamePattern::format`] renders a
//! name and [`NamePattern::parse`] recovers the integer from a rendered name;
//! `parse` only accepts names that `format` would produce byte for byte.
//!
//! Supported conversions are `d`, `i` and `u` with the `-`, `0`, `+` and space
//! flags, a field width, a precision and any of the C length modifiers (which
//! have no effect). `%%` is a literal percent sign. As in C, a precision of
//! zero renders the value zero with no digits.

use alloc::string::{String, ToString};
use core::fmt;

/// Ways a name template can be malformed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PatternError {
    /// The template has no integer placeholder.
    NoPlaceholder,
    /// The template has more than one placeholder.
    MultiplePlaceholders,
    /// The placeholder uses a conversion other than `d`, `i` or `u`.
    UnsupportedConversion(char),
    /// The template ends in the middle of a placeholder.
    Incomplete,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPlaceholder => f.write_str("name template has no integer placeholder"),
            Self::MultiplePlaceholders => {
                f.write_str("name template has more than one placeholder")
            }
            Self::UnsupportedConversion(c) => {
                write!(f, "name template uses unsupported conversion `%{c}`")
            }
            Self::Incomplete => f.write_str("name template ends inside a placeholder"),
        }
    }
}

impl core::error::Error for PatternError {}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct IntSpec {
    left_align: bool,
    zero_pad: bool,
    plus: bool,
    space: bool,
    width: usize,
    precision: Option<usize>,
}

/// A parsed name template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamePattern {
    prefix: String,
    suffix: String,
    conv: IntSpec,
}

impl NamePattern {
    /// Parses a template containing exactly one integer placeholder.
    pub fn new(template: &str) -> Result<Self, PatternError> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut conv = None;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            let literal = if conv.is_some() { &mut suffix } else { &mut prefix };
            if c != '%' {
                literal.push(c);
                continue;
            }
            if chars.next_if_eq(&'%').is_some() {
                literal.push('%');
                continue;
            }
            if conv.is_some() {
                return Err(PatternError::MultiplePlaceholders);
            }

            let mut parsed = IntSpec::default();
            while let Some(flag) = chars.next_if(|&c| matches!(c, '-' | '0' | '+' | ' ')) {
                match flag {
                    '-' => parsed.left_align = true,
                    '0' => parsed.zero_pad = true,
                    '+' => parsed.plus = true,
                    _ => parsed.space = true,
                }
            }
            parsed.width = take_number(&mut chars);
            if chars.next_if_eq(&'.').is_some() {
                parsed.precision = Some(take_number(&mut chars));
            }
            while chars
                .next_if(|&c| matches!(c, 'h' | 'l' | 'j' | 'z' | 't' | 'q'))
                .is_some()
            {}
            match chars.next() {
                Some('d' | 'i' | 'u') => conv = Some(parsed),
                Some(other) => return Err(PatternError::UnsupportedConversion(other)),
                None => return Err(PatternError::Incomplete),
            }
        }

        Ok(Self {
            prefix,
            suffix,
            conv: conv.ok_or(PatternError::NoPlaceholder)?,
        })
    }

    /// Renders the name for `value`.
    #[must_use]
    pub fn format(&self, value: i64) -> String {
        let mut out = String::with_capacity(self.prefix.len() + self.suffix.len() + 8);
        out.push_str(&self.prefix);
        self.push_field(&mut out, value);
        out.push_str(&self.suffix);
        out
    }

    /// Recovers the integer a name was rendered from.
    ///
    /// Returns `None` unless `name` is exactly `self.format(value)` for some `value`.
    #[must_use]
    pub fn parse(&self, name: &str) -> Option<i64> {
        let field = name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;
        let value = match field.trim_matches(' ').parse::<i64>() {
            Ok(value) => value,
            Err(_) if self.conv.precision == Some(0) => 0,
            Err(_) => return None,
        };

        let mut rendered = String::with_capacity(field.len());
        self.push_field(&mut rendered, value);
        (rendered == field).then_some(value)
    }

    fn push_field(&self, out: &mut String, value: i64) {
        let conv = &self.conv;
        // C prints no digits for zero at precision zero.
        let magnitude = if value == 0 && conv.precision == Some(0) {
            String::new()
        } else {
            value.unsigned_abs().to_string()
        };
        let sign = if value < 0 {
            "-"
        } else if conv.plus {
            "+"
        } else if conv.space {
            " "
        } else {
            ""
        };
        let digits = conv.precision.unwrap_or(0).max(magnitude.len());
        let pad = conv.width.saturating_sub(sign.len() + digits);

        if conv.left_align {
            out.push_str(sign);
            push_repeated(out, '0', digits - magnitude.len());
            out.push_str(&magnitude);
            push_repeated(out, ' ', pad);
        } else if conv.zero_pad && conv.precision.is_none() {
            out.push_str(sign);
            push_repeated(out, '0', pad + digits - magnitude.len());
            out.push_str(&magnitude);
        } else {
            push_repeated(out, ' ', pad);
            out.push_str(sign);
            push_repeated(out, '0', digits - magnitude.len());
            out.push_str(&magnitude);
        }
    }
}

fn take_number(chars: &mut core::iter::Peekable<core::str::Chars<'_>>) -> usize {
    let mut n = 0_usize;
    while let Some(d) = chars.next_if(char::is_ascii_digit) {
        let digit = d.to_digit(10).unwrap_or(0) as usize;
        n = n.saturating_mul(10).saturating_add(digit);
    }
    n
}

fn push_repeated(out: &mut String, c: char, n: usize) {
    out.extend(core::iter::repeat_n(c, n));
}
