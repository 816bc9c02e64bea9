//! Table-literal text decoding
//!
//! Parses the subset of Lua that mission archives are written in: a series
//! of top-level `name = <value>` assignments whose values are scalars or
//! nested table constructors.

use winnow::Parser;
use winnow::ascii::{digit0, digit1, hex_digit1, multispace1};
use winnow::combinator::{alt, cut_err, fail, not, opt, preceded, repeat, terminated};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::token::{any, one_of, take_till, take_until, take_while};

use super::value::{Key, Table, Value};
use crate::error::{Error, Result};

type WResult<T> = std::result::Result<T, ErrMode<ContextError>>;

/// Deepest table nesting accepted before decoding gives up.
pub const MAX_DEPTH: usize = 128;

/// Decode table-literal text into a table of its top-level assignments.
///
/// `mission = { ... }` decodes to a table with one `"mission"` entry.
///
/// # Errors
/// Returns [`Error::LuaSyntax`] with the line and column of the first
/// token that does not fit the grammar, including tables nested deeper
/// than [`MAX_DEPTH`].
pub fn decode(text: &str) -> Result<Table> {
    assignments.parse(text).map_err(|err| {
        let message = err.inner().to_string().replace('\n', "; ");
        syntax_error(text, err.offset(), message)
    })
}

fn syntax_error(text: &str, offset: usize, message: String) -> Error {
    let consumed = &text[..offset.min(text.len())];
    let line = consumed.matches('\n').count() + 1;
    let column = consumed.chars().rev().take_while(|&c| c != '\n').count() + 1;
    Error::LuaSyntax {
        line,
        column,
        message: if message.is_empty() {
            String::from("unexpected input")
        } else {
            message
        },
    }
}

fn assignments(input: &mut &str) -> WResult<Table> {
    let mut root = Table::new();
    trivia(input)?;
    while !input.is_empty() {
        let name = identifier
            .context(StrContext::Label("assignment"))
            .parse_next(input)?;
        trivia(input)?;
        expect(input, '=')?;
        if let Some(value) = value(input, 0)? {
            root.insert(name, value);
        }
        trivia(input)?;
        opt(';').parse_next(input)?;
        trivia(input)?;
    }
    Ok(root)
}

/// Whitespace, `--` line comments and `--[[ ]]` block comments.
fn trivia(input: &mut &str) -> WResult<()> {
    repeat(
        0..,
        alt((
            multispace1.void(),
            preceded("--[[", cut_err(terminated(take_until(0.., "]]"), "]]")))
                .context(StrContext::Label("block comment"))
                .void(),
            preceded("--", take_till(0.., '\n')).void(),
        )),
    )
    .parse_next(input)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn identifier<'s>(input: &mut &'s str) -> WResult<&'s str> {
    (one_of(is_ident_start), take_while(0.., is_ident_char))
        .take()
        .parse_next(input)
}

fn keyword<'s>(word: &'static str) -> impl Parser<&'s str, &'s str, ErrMode<ContextError>> {
    terminated(word, not(one_of(is_ident_char)))
}

fn expect(input: &mut &str, token: char) -> WResult<char> {
    cut_err(token)
        .context(StrContext::Expected(StrContextValue::CharLiteral(token)))
        .parse_next(input)
}

/// Fail without backtracking, labelling the failure with `what`.
fn reject<O>(input: &mut &str, what: &'static str) -> WResult<O> {
    cut_err(fail::<_, O, _>)
        .context(StrContext::Label(what))
        .parse_next(input)
}

/// One value at nesting level `depth`. `nil` yields `None`.
fn value(input: &mut &str, depth: usize) -> WResult<Option<Value>> {
    trivia(input)?;
    match input.chars().next() {
        Some('{') if depth >= MAX_DEPTH => reject(input, "nesting depth"),
        Some('{') => table(input, depth + 1).map(|t| Some(Value::Table(t))),
        Some('"' | '\'') => string(input).map(|s| Some(Value::Str(s))),
        Some(c) if c == '-' || c == '.' || c.is_ascii_digit() => number(input).map(Some),
        Some(c) if is_ident_start(c) => cut_err(alt((
            keyword("true").value(Some(Value::Bool(true))),
            keyword("false").value(Some(Value::Bool(false))),
            keyword("nil").value(None),
        )))
        .context(StrContext::Label("value"))
        .parse_next(input),
        _ => reject(input, "value"),
    }
}

fn table(input: &mut &str, depth: usize) -> WResult<Table> {
    '{'.parse_next(input)?;
    let mut table = Table::new();
    let mut next_positional: i64 = 1;

    loop {
        trivia(input)?;
        if opt('}').parse_next(input)?.is_some() {
            return Ok(table);
        }

        if opt('[').parse_next(input)?.is_some() {
            let key = match value(input, depth)? {
                Some(Value::Str(s)) => Key::Str(s),
                Some(other) => match other.as_i64() {
                    Some(i) => Key::Int(i),
                    None => return reject(input, "table key"),
                },
                None => return reject(input, "table key"),
            };
            trivia(input)?;
            expect(input, ']')?;
            trivia(input)?;
            expect(input, '=')?;
            if let Some(value) = value(input, depth)? {
                table.insert(key, value);
            }
        } else if let Some(name) = opt(terminated(identifier, (trivia, '='))).parse_next(input)? {
            if let Some(value) = value(input, depth)? {
                table.insert(name, value);
            }
        } else {
            if let Some(value) = value(input, depth)? {
                table.insert(next_positional, value);
            }
            next_positional += 1;
        }

        trivia(input)?;
        if opt(one_of([',', ';'])).parse_next(input)?.is_none() {
            trivia(input)?;
            expect(input, '}')?;
            return Ok(table);
        }
    }
}

fn number(input: &mut &str) -> WResult<Value> {
    let negative = opt(terminated('-', trivia)).parse_next(input)?.is_some();
    let parsed = cut_err(alt((hex_literal, nan_literal, decimal_literal)))
        .context(StrContext::Label("number"))
        .parse_next(input)?;
    Ok(match parsed {
        Value::Int(i) if negative => Value::Int(-i),
        Value::Float(f) if negative => Value::Float(-f),
        other => other,
    })
}

fn hex_literal(input: &mut &str) -> WResult<Value> {
    preceded(alt(("0x", "0X")), hex_digit1)
        .try_map(|digits| i64::from_str_radix(digits, 16))
        .map(Value::Int)
        .parse_next(input)
}

// NaN is written as 0/0
fn nan_literal(input: &mut &str) -> WResult<Value> {
    "0/0".value(Value::Float(f64::NAN)).parse_next(input)
}

fn decimal_literal(input: &mut &str) -> WResult<Value> {
    let text = (
        digit0,
        opt(('.', digit0)),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)?;

    let is_float = text.contains(|c: char| matches!(c, '.' | 'e' | 'E'));
    if !is_float && let Ok(i) = text.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    match text.parse::<f64>() {
        Ok(f) => Ok(Value::Float(f)),
        Err(_) => fail(input),
    }
}

fn string(input: &mut &str) -> WResult<String> {
    let quote = one_of(['"', '\'']).parse_next(input)?;
    // Decimal escapes produce raw bytes, so collect bytes and validate once
    let mut bytes = Vec::new();

    loop {
        let chunk = take_till(0.., |c: char| c == quote || c == '\\' || c == '\n')
            .parse_next(input)?;
        bytes.extend_from_slice(chunk.as_bytes());
        match opt(any).parse_next(input)? {
            Some(c) if c == quote => break,
            Some('\\') => escape(input, &mut bytes)?,
            _ => return reject(input, "string"),
        }
    }

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(_) => reject(input, "string"),
    }
}

fn escape(input: &mut &str, bytes: &mut Vec<u8>) -> WResult<()> {
    let c = cut_err(any)
        .context(StrContext::Label("escape"))
        .parse_next(input)?;
    let byte = match c {
        'n' | '\n' => b'\n',
        'r' => b'\r',
        't' => b'\t',
        'a' => 0x07,
        'b' => 0x08,
        'f' => 0x0c,
        'v' => 0x0b,
        '\\' => b'\\',
        '"' => b'"',
        '\'' => b'\'',
        d if d.is_ascii_digit() => {
            let rest = take_while(0..=2, |c: char| c.is_ascii_digit()).parse_next(input)?;
            let code = rest
                .chars()
                .fold(u32::from(d) - u32::from('0'), |code, c| {
                    code * 10 + (u32::from(c) - u32::from('0'))
                });
            match u8::try_from(code) {
                Ok(byte) => byte,
                Err(_) => return reject(input, "escape"),
            }
        }
        _ => return reject(input, "escape"),
    };
    bytes.push(byte);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_nested_tables() {
        let text = r#"
mission =
{
    ["version"] = 9,
    ["coalition"] =
    {
        ["blue"] =
        {
            ["country"] =
            {
                [1] =
                {
                    ["id"] = 2,
                    ["name"] = "USA",
                }, -- end of [1]
            }, -- end of ["country"]
        }, -- end of ["blue"]
    }, -- end of ["coalition"]
} -- end of mission
"#;
        let root = decode(text).unwrap();
        let mission = root.get("mission").and_then(Value::as_table).unwrap();
        assert_eq!(mission.get("version"), Some(&Value::Int(9)));

        let country = mission
            .get("coalition")
            .and_then(Value::as_table)
            .and_then(|t| t.get("blue"))
            .and_then(Value::as_table)
            .and_then(|t| t.get("country"))
            .and_then(Value::as_table)
            .and_then(|t| t.get(1))
            .and_then(Value::as_table)
            .unwrap();
        assert_eq!(country.get("name"), Some(&Value::from("USA")));
    }

    #[test]
    fn test_decode_scalars() {
        let root = decode("a = -12.5 b = 0x10; c = true d = 'it\\'s' e = 1e3 f = nil").unwrap();
        assert_eq!(root.get("a"), Some(&Value::Float(-12.5)));
        assert_eq!(root.get("b"), Some(&Value::Int(16)));
        assert_eq!(root.get("c"), Some(&Value::Bool(true)));
        assert_eq!(root.get("d"), Some(&Value::from("it's")));
        assert_eq!(root.get("e"), Some(&Value::Float(1000.0)));
        assert!(root.get("f").is_none());
    }

    #[test]
    fn test_decode_nan_and_negative_integers() {
        let root = decode("n = 0/0 m = - 7 z = 0").unwrap();
        assert!(root.get("n").and_then(Value::as_f64).is_some_and(f64::is_nan));
        assert_eq!(root.get("m"), Some(&Value::Int(-7)));
        assert_eq!(root.get("z"), Some(&Value::Int(0)));
    }

    #[test]
    fn test_decode_positional_and_named_fields() {
        let root = decode("t = { 10, 20, x = 1, [5] = 'five', nil, 40 }").unwrap();
        let t = root.get("t").and_then(Value::as_table).unwrap();
        assert_eq!(t.get(1), Some(&Value::Int(10)));
        assert_eq!(t.get(2), Some(&Value::Int(20)));
        assert_eq!(t.get(3), None);
        assert_eq!(t.get(4), Some(&Value::Int(40)));
        assert_eq!(t.get(5), Some(&Value::from("five")));
        assert_eq!(t.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_decode_keyword_values_in_sequences() {
        let root = decode("t = { true, false, truthy = 1 }").unwrap();
        let t = root.get("t").and_then(Value::as_table).unwrap();
        assert_eq!(t.get(1), Some(&Value::Bool(true)));
        assert_eq!(t.get(2), Some(&Value::Bool(false)));
        assert_eq!(t.get("truthy"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_decode_string_escapes() {
        let root = decode("s = \"line one\\\nline two\\t\\65\\\\\"").unwrap();
        assert_eq!(root.get("s"), Some(&Value::from("line one\nline two\tA\\")));
    }

    #[test]
    fn test_decode_block_comment() {
        let root = decode("--[[ header\nstill comment ]]\nx = 1 -- trailing").unwrap();
        assert_eq!(root.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_decode_reports_position() {
        let err = decode("x = {\n  [1] = ,\n}").unwrap_err();
        match err {
            Error::LuaSyntax { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_rejects_unterminated_string() {
        assert!(matches!(decode("s = \"open"), Err(Error::LuaSyntax { .. })));
        assert!(matches!(decode("s = 'a\nb'"), Err(Error::LuaSyntax { .. })));
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let depth = 200_000;
        let text = format!("t = {}{}", "{".repeat(depth), "}".repeat(depth));
        let err = decode(&text).unwrap_err();
        assert!(matches!(err, Error::LuaSyntax { line: 1, .. }));

        let ok_depth = MAX_DEPTH;
        let text = format!("t = {}{}", "{".repeat(ok_depth), "}".repeat(ok_depth));
        assert!(decode(&text).is_ok());
    }
}
