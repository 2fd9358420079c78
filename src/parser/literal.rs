//! Assignment detection and literal value recovery for single source lines.
//!
//! Values are recovered with a literal-only parser: numbers, `True`/`False`/
//! `None`, quoted strings, lists and tuples (nested freely). Nothing is ever
//! evaluated. Anything the parser does not accept degrades to the raw text.

use crate::model::Value;

use super::ExtractOptions;

/// Extract a `key = value` pair from one source line.
///
/// Returns `None` for blank lines, comments, magics (when enabled), lines that
/// mention an export operation, and lines without a top-level `=`.
pub fn extract_assignment(line: &str, options: &ExtractOptions) -> Option<(String, Value)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    if options.skip_magics && (line.starts_with('%') || line.starts_with('!')) {
        return None;
    }
    if options.is_guarded(line) {
        return None;
    }

    let idx = find_assignment(line)?;
    let key = assignment_target(&line[..idx])?;
    let value = parse_value(&line[idx + 1..]);
    Some((key.to_string(), value))
}

/// Find the byte offset of the first top-level assignment `=` in a line.
///
/// `=` inside quotes or brackets does not count. If the first top-level `=`
/// belongs to a comparison or augmented operator (`==`, `<=`, `+=`, `:=`, ...)
/// the line is not an assignment.
pub fn find_assignment(line: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev: Option<char> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            prev = Some(c);
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '#' => return None,
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            '=' if depth == 0 => {
                let next = chars.peek().map(|&(_, n)| n);
                let compound = prev.is_some_and(|p| "=!<>+-*/%&|^:@~".contains(p));
                if compound || next == Some('=') {
                    return None;
                }
                return Some(idx);
            }
            _ => {}
        }
        prev = Some(c);
    }

    None
}

/// Key for the left-hand side, dropping a `name: Type` annotation.
fn assignment_target(lhs: &str) -> Option<&str> {
    let key = lhs.trim();
    if key.is_empty() {
        return None;
    }
    if let Some((name, _)) = key.split_once(':') {
        let name = name.trim();
        if !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            return Some(name);
        }
    }
    Some(key)
}

/// Recover a typed value from the right-hand side of an assignment.
///
/// Text wrapped in one matching pair of quotes is returned verbatim without
/// escape processing. Otherwise the text is parsed as a literal, and when
/// that fails the trimmed text itself becomes a string value.
pub fn parse_value(text: &str) -> Value {
    let text = text.trim();
    if let Some(inner) = unwrap_quoted(text) {
        return Value::String(inner.to_string());
    }
    parse_literal(text).unwrap_or_else(|| Value::String(text.to_string()))
}

fn unwrap_quoted(text: &str) -> Option<&str> {
    ['"', '\'']
        .into_iter()
        .find(|&q| text.len() >= 2 && text.starts_with(q) && text.ends_with(q))
        .map(|_| &text[1..text.len() - 1])
}

/// Parse a literal expression, or `None` if it is not one.
///
/// A bare comma-separated sequence (`1, 2`) is a tuple, as are `()` and
/// `(x,)`. Trailing `#` comments are ignored.
pub fn parse_literal(text: &str) -> Option<Value> {
    LiteralParser::new(text).parse()
}

struct LiteralParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn parse(mut self) -> Option<Value> {
        let (mut items, trailing_comma) = self.parse_sequence(None)?;
        self.skip_trivia();
        if self.peek().is_some() {
            return None;
        }
        match (items.len(), trailing_comma) {
            (0, _) => None,
            (1, false) => items.pop(),
            _ => Some(Value::Tuple(items)),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c == '#' {
                self.pos = self.src.len();
            } else if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Comma-separated expressions up to `close` (left unconsumed).
    fn parse_sequence(&mut self, close: Option<char>) -> Option<(Vec<Value>, bool)> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_trivia();
            if self.peek() == close {
                break;
            }
            items.push(self.parse_expr()?);
            self.skip_trivia();
            trailing_comma = self.eat(',');
            if !trailing_comma {
                break;
            }
        }
        Some((items, trailing_comma))
    }

    fn parse_expr(&mut self) -> Option<Value> {
        if let Some(raw) = self.string_prefix() {
            return self.parse_strings(raw);
        }

        match self.peek()? {
            '[' => {
                self.bump();
                let (items, _) = self.parse_sequence(Some(']'))?;
                self.eat(']').then_some(Value::List(items))
            }
            '(' => {
                self.bump();
                let (mut items, trailing_comma) = self.parse_sequence(Some(')'))?;
                if !self.eat(')') {
                    return None;
                }
                if items.len() == 1 && !trailing_comma {
                    items.pop()
                } else {
                    Some(Value::Tuple(items))
                }
            }
            sign @ ('-' | '+') => {
                self.bump();
                self.skip_trivia();
                match self.peek()? {
                    c if c.is_ascii_digit() || c == '.' => self.parse_number(sign == '-'),
                    _ => None,
                }
            }
            c if c.is_ascii_digit() => self.parse_number(false),
            '.' if self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.parse_number(false)
            }
            c if c.is_alphabetic() || c == '_' => self.parse_name(),
            _ => None,
        }
    }

    fn parse_name(&mut self) -> Option<Value> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "True" => Some(Value::Bool(true)),
            "False" => Some(Value::Bool(false)),
            "None" => Some(Value::Null),
            _ => None,
        }
    }

    /// If a string literal starts here, consume its prefix and report rawness.
    fn string_prefix(&mut self) -> Option<bool> {
        let quote_next = matches!(self.peek_nth(1), Some('"' | '\''));
        match self.peek()? {
            '"' | '\'' => Some(false),
            'r' | 'R' if quote_next => {
                self.bump();
                Some(true)
            }
            'u' | 'U' if quote_next => {
                self.bump();
                Some(false)
            }
            _ => None,
        }
    }

    /// One or more adjacent string literals, concatenated.
    fn parse_strings(&mut self, raw: bool) -> Option<Value> {
        let mut out = String::new();
        self.parse_string_body(raw, &mut out)?;
        loop {
            let save = self.pos;
            self.skip_trivia();
            match self.string_prefix() {
                Some(raw) => self.parse_string_body(raw, &mut out)?,
                None => {
                    self.pos = save;
                    break;
                }
            }
        }
        Some(Value::String(out))
    }

    fn parse_string_body(&mut self, raw: bool, out: &mut String) -> Option<()> {
        let quote = self.bump()?;
        loop {
            match self.bump()? {
                c if c == quote => return Some(()),
                '\\' if raw => {
                    out.push('\\');
                    out.push(self.bump()?);
                }
                '\\' => self.parse_escape(out)?,
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Option<()> {
        let c = self.bump()?;
        let decoded = match c {
            '\\' | '\'' | '"' => c,
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'v' => '\x0b',
            '0'..='7' => {
                let mut code = c.to_digit(8)?;
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            self.bump();
                        }
                        None => break,
                    }
                }
                char::from_u32(code)?
            }
            'x' => self.parse_hex_escape(2)?,
            'u' => self.parse_hex_escape(4)?,
            'U' => self.parse_hex_escape(8)?,
            // Named escapes need the Unicode name table.
            'N' => return None,
            other => {
                out.push('\\');
                other
            }
        };
        out.push(decoded);
        Some(())
    }

    fn parse_hex_escape(&mut self, digits: usize) -> Option<char> {
        let start = self.pos;
        for _ in 0..digits {
            if !self.bump()?.is_ascii_hexdigit() {
                return None;
            }
        }
        let code = u32::from_str_radix(&self.src[start..self.pos], 16).ok()?;
        char::from_u32(code)
    }

    fn parse_number(&mut self, negative: bool) -> Option<Value> {
        let start = self.pos;
        let mut prev = '\0';
        while let Some(c) = self.peek() {
            let exponent_sign = matches!(c, '+' | '-')
                && matches!(prev, 'e' | 'E')
                && radix_of(&self.src[start..self.pos]).is_none();
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                prev = c;
                self.bump();
            } else {
                break;
            }
        }
        number_from_token(&self.src[start..self.pos], negative)
    }
}

fn radix_of(token: &str) -> Option<(u32, &str)> {
    let bytes = token.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    Some((radix, &token[2..]))
}

/// Remove digit-group underscores, rejecting misplaced ones.
fn strip_underscores(digits: &str) -> Option<String> {
    let chars: Vec<char> = digits.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let before = i.checked_sub(1).and_then(|j| chars.get(j));
            let after = chars.get(i + 1);
            let ok = before.is_some_and(|b| b.is_ascii_alphanumeric())
                && after.is_some_and(|a| a.is_ascii_alphanumeric());
            if !ok {
                return None;
            }
        }
    }
    Some(digits.replace('_', ""))
}

fn number_from_token(token: &str, negative: bool) -> Option<Value> {
    let sign = if negative { "-" } else { "" };

    if let Some((radix, digits)) = radix_of(token) {
        let digits = digits.strip_prefix('_').unwrap_or(digits);
        let clean = strip_underscores(digits)?;
        if clean.is_empty() {
            return None;
        }
        return i128::from_str_radix(&format!("{sign}{clean}"), radix)
            .ok()
            .map(Value::Integer);
    }

    // Complex literals have no counterpart in the value model.
    if token.ends_with(['j', 'J']) {
        return None;
    }

    let clean = strip_underscores(token)?;
    if clean.contains(['.', 'e', 'E']) {
        let n: f64 = clean.parse().ok()?;
        return Some(Value::Float(if negative { -n } else { n }));
    }

    if clean.is_empty() || !clean.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if clean.len() > 1 && clean.starts_with('0') && clean.chars().any(|c| c != '0') {
        return None;
    }
    format!("{sign}{clean}").parse::<i128>().ok().map(Value::Integer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(line: &str) -> Option<(String, Value)> {
        extract_assignment(line, &ExtractOptions::default())
    }

    fn strs(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::string(*s)).collect()
    }

    #[test]
    fn test_quoted_strings_verbatim() {
        assert_eq!(
            extract(r#"path = "data.csv""#),
            Some(("path".to_string(), Value::string("data.csv")))
        );
        assert_eq!(
            extract("name = 'it'"),
            Some(("name".to_string(), Value::string("it")))
        );
        // No escape decoding for whole-line quoted values.
        assert_eq!(parse_value(r#""a\nb""#), Value::string(r"a\nb"));
        assert_eq!(parse_value(r#""x" + "y""#), Value::string(r#"x" + "y"#));
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse_value("3"), Value::Integer(3));
        assert_eq!(parse_value("-42"), Value::Integer(-42));
        assert_eq!(parse_value("1_000"), Value::Integer(1000));
        assert_eq!(parse_value("0x1F"), Value::Integer(31));
        assert_eq!(parse_value("0b101"), Value::Integer(5));
        assert_eq!(parse_value("0o17"), Value::Integer(15));
        assert_eq!(
            parse_value("12345678901234567890"),
            Value::Integer(12_345_678_901_234_567_890)
        );
        assert_eq!(
            parse_value("-0xFFFF_FFFF_FFFF_FFFF_FF"),
            Value::Integer(-0xFF_FFFF_FFFF_FFFF_FFFF)
        );
        assert_eq!(parse_value("0.5"), Value::Float(0.5));
        assert_eq!(parse_value(".5"), Value::Float(0.5));
        assert_eq!(parse_value("1e-3"), Value::Float(0.001));
        assert_eq!(parse_value("-2.5E2"), Value::Float(-250.0));
        assert_eq!(parse_value("True"), Value::Bool(true));
        assert_eq!(parse_value("False"), Value::Bool(false));
        assert_eq!(parse_value("None"), Value::Null);
    }

    #[test]
    fn test_containers() {
        assert_eq!(
            parse_value("[1, 'a', 2.0]"),
            Value::List(vec![1i64.into(), "a".into(), 2.0.into()])
        );
        assert_eq!(parse_value("[]"), Value::List(vec![]));
        assert_eq!(parse_value("[1, 2,]"), Value::List(vec![1i64.into(), 2i64.into()]));
        assert_eq!(parse_value("()"), Value::Tuple(vec![]));
        assert_eq!(parse_value("(1,)"), Value::Tuple(vec![1i64.into()]));
        assert_eq!(parse_value("(1)"), Value::Integer(1));
        assert_eq!(
            parse_value("1, 2"),
            Value::Tuple(vec![1i64.into(), 2i64.into()])
        );
        assert_eq!(
            parse_value(r###"[("#", "Header 1"), ("##", "Header 2")]"###),
            Value::List(vec![
                Value::Tuple(strs(&["#", "Header 1"])),
                Value::Tuple(strs(&["##", "Header 2"])),
            ])
        );
        assert_eq!(
            parse_value("[[1, [2]], (None,)]"),
            Value::List(vec![
                Value::List(vec![1i64.into(), Value::List(vec![2i64.into()])]),
                Value::Tuple(vec![Value::Null]),
            ])
        );
    }

    #[test]
    fn test_nested_string_escapes() {
        assert_eq!(
            parse_value(r#"["a\tb", 'it\'s', r"c:\dir", "\x41\u00e9"]"#),
            Value::List(strs(&["a\tb", "it's", r"c:\dir", "Aé"]))
        );
        assert_eq!(parse_value(r#"("ab" "cd",)"#), Value::Tuple(strs(&["abcd"])));
    }

    #[test]
    fn test_trailing_comment_ignored() {
        assert_eq!(parse_value("3  # retries"), Value::Integer(3));
        assert_eq!(parse_value("[1, 2]  # pair"), Value::List(vec![1i64.into(), 2i64.into()]));
    }

    #[test]
    fn test_fallback_to_raw_text() {
        assert_eq!(parse_value("np.arange(10)"), Value::string("np.arange(10)"));
        assert_eq!(parse_value("{'a': 1}"), Value::string("{'a': 1}"));
        assert_eq!(parse_value("true"), Value::string("true"));
        assert_eq!(parse_value("1 + 2"), Value::string("1 + 2"));
        assert_eq!(parse_value("007"), Value::string("007"));
        assert_eq!(parse_value("1j"), Value::string("1j"));
        assert_eq!(parse_value("[1, 2"), Value::string("[1, 2"));
        let huge = format!("1{}", "0".repeat(40));
        assert_eq!(parse_value(&huge), Value::string(huge.as_str()));
        assert_eq!(parse_value("b'bytes'"), Value::string("b'bytes'"));
        assert_eq!(parse_value("1__0"), Value::string("1__0"));
        assert_eq!(parse_value(""), Value::string(""));
        assert_eq!(parse_value("\""), Value::string("\""));
    }

    #[test]
    fn test_rejected_lines() {
        assert_eq!(extract(""), None);
        assert_eq!(extract("   "), None);
        assert_eq!(extract("# x = 1"), None);
        assert_eq!(extract("print('hello')"), None);
        assert_eq!(extract("x == 1"), None);
        assert_eq!(extract("x <= 1"), None);
        assert_eq!(extract("x += 1"), None);
        assert_eq!(extract("f(a=1)"), None);
        assert_eq!(extract("%env FOO=bar"), None);
        assert_eq!(extract("!pip install pkg==1.0"), None);
        assert_eq!(extract("= 5"), None);
    }

    #[test]
    fn test_self_reference_guard() {
        assert_eq!(extract("_ = export_ipynb_yaml()"), None);
        assert_eq!(extract("out = export_ipynb_toml(nb_path='x.ipynb')"), None);
    }

    #[test]
    fn test_key_forms() {
        assert_eq!(
            extract("batch_size: int = 32"),
            Some(("batch_size".to_string(), Value::Integer(32)))
        );
        assert_eq!(
            extract("cfg['a:b'] = 1"),
            Some(("cfg['a:b']".to_string(), Value::Integer(1)))
        );
        assert_eq!(
            extract("x = y == 1"),
            Some(("x".to_string(), Value::string("y == 1")))
        );
        assert_eq!(
            extract("url = 'http://h/?a=1'"),
            Some(("url".to_string(), Value::string("http://h/?a=1")))
        );
    }

    #[test]
    fn test_find_assignment() {
        assert_eq!(find_assignment("a = 1"), Some(2));
        assert_eq!(find_assignment("a='='"), Some(1));
        assert_eq!(find_assignment("d[k] = v"), Some(5));
        assert_eq!(find_assignment("'a=b'"), None);
        assert_eq!(find_assignment("x  # a = 1"), None);
        assert_eq!(find_assignment("(y := 5)"), None);
        assert_eq!(find_assignment("a != b"), None);
    }
}
