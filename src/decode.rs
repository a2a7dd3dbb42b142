//! TOON decoding: text to value tree.
//!
//! The decoder splits the input into lines, classifies each line by its
//! indentation depth, and walks the line array with an explicit cursor. The
//! cursor only ever moves forward, which keeps error line numbers exact and
//! makes backtracking impossible by construction.
//!
//! In strict mode (the default) every quantitative and structural check is
//! fatal: declared array counts must match, indentation must be an exact
//! multiple of the indent size, tabs may not appear in indentation, and
//! blank lines may not interrupt array bodies. Lax mode downgrades those
//! checks to best-effort acceptance; true lexical errors (unterminated
//! strings, malformed headers) stay fatal either way.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{decode, toon, ToonOptions};
//!
//! let value = decode("id: 123\nname: Ada", &ToonOptions::new()).unwrap();
//! assert_eq!(value, toon!({ "id": 123, "name": "Ada" }));
//! ```

use crate::lexical::{self, EscapeError};
use crate::options::{Delimiter, ToonOptions};
use crate::value::Value;
use crate::{Error, Result, ToonMap};

/// Decodes TOON text into a value tree.
///
/// # Errors
///
/// Returns an error naming the rule that failed, carrying the 1-based line
/// number and, where known, the column.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(input: &str, options: &ToonOptions) -> Result<Value> {
    let lines = split_lines(input, options)?;
    let mut decoder = Decoder {
        lines,
        pos: 0,
        options,
    };
    decoder.parse_document()
}

/// One input line: 1-based number, structural depth, and the text after the
/// indentation. CRLF input is normalized by stripping the trailing CR.
#[derive(Clone, Copy)]
struct Line<'a> {
    number: usize,
    depth: usize,
    content: &'a str,
    blank: bool,
}

fn split_lines<'a>(input: &'a str, options: &ToonOptions) -> Result<Vec<Line<'a>>> {
    // the builder clamps to 1..=8, but the field is public
    let unit = options.indent.max(1);
    let mut lines = Vec::new();
    for (index, raw) in input.split('\n').enumerate() {
        let number = index + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let mut spaces = 0usize;
        let mut tabs = 0usize;
        let mut offset = 0usize;
        for byte in raw.bytes() {
            match byte {
                b' ' => spaces += 1,
                b'\t' => {
                    tabs += 1;
                    spaces += unit;
                }
                _ => break,
            }
            offset += 1;
        }
        let content = &raw[offset..];
        let blank = content.trim().is_empty();
        let mut depth = 0;
        if !blank {
            if tabs > 0 && options.strict {
                return Err(Error::syntax(number, 1, "tab in indentation"));
            }
            depth = match lexical::indent_depth(spaces, unit) {
                Some(depth) => depth,
                None if options.strict => {
                    return Err(Error::Indentation {
                        line: number,
                        unit,
                        found: spaces,
                    });
                }
                None => spaces / unit,
            };
        }
        lines.push(Line {
            number,
            depth,
            content,
            blank,
        });
    }
    Ok(lines)
}

/// Transient record for one parsed array header.
struct Header {
    count: usize,
    delimiter: Delimiter,
    fields: Option<Vec<String>>,
}

struct Decoder<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
    options: &'a ToonOptions,
}

impl<'a> Decoder<'a> {
    fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(line) if line.blank) {
            self.pos += 1;
        }
    }

    fn parse_document(&mut self) -> Result<Value> {
        self.skip_blanks();
        let first = match self.peek() {
            Some(line) => line,
            None => {
                if self.options.strict {
                    return Err(Error::syntax(1, 1, "empty input"));
                }
                return Ok(Value::Object(ToonMap::new()));
            }
        };
        if first.depth > 0 {
            return Err(Error::syntax(first.number, 1, "first line must be at depth 0"));
        }
        if first.content.starts_with('[') && is_array_header_line(first.content) {
            let value = self.parse_root_array(first)?;
            self.expect_end()?;
            return Ok(value);
        }
        let rest_blank = self.lines[self.pos + 1..].iter().all(|line| line.blank);
        if rest_blank && find_unquoted(first.content, ':').is_none() {
            self.advance();
            return self.parse_primitive(first.content, first.number);
        }
        let value = self.parse_object(0)?;
        self.expect_end()?;
        Ok(value)
    }

    /// After a root value, only blank lines may remain.
    fn expect_end(&mut self) -> Result<()> {
        self.skip_blanks();
        if self.options.strict {
            if let Some(line) = self.peek() {
                return Err(Error::syntax(
                    line.number,
                    1,
                    "unexpected content after root value",
                ));
            }
        }
        Ok(())
    }

    fn parse_root_array(&mut self, line: Line<'a>) -> Result<Value> {
        let colon = match find_unquoted(line.content, ':') {
            Some(at) => at,
            None => return Err(Error::syntax(line.number, 1, "malformed array header")),
        };
        let key_part = line.content[..colon].trim_end();
        let tail = line.content[colon + 1..].trim();
        let (key, header) = self.parse_header_intro(key_part, line.number)?;
        if key.is_some() {
            return Err(Error::syntax(line.number, 1, "malformed array header"));
        }
        self.advance();
        self.parse_array_body(&header, tail, 0, line.number)
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value> {
        let mut map = ToonMap::new();
        loop {
            self.skip_blanks();
            let line = match self.peek() {
                Some(line) => line,
                None => break,
            };
            if line.depth < depth {
                break;
            }
            if line.depth > depth {
                if self.options.strict {
                    return Err(Error::syntax(line.number, 1, "unexpected indentation"));
                }
                self.advance();
                continue;
            }
            self.advance();
            self.parse_entry(&mut map, line.content, line.number, depth)?;
        }
        Ok(Value::Object(map))
    }

    /// Parses one `key: value` group whose first line (already consumed) had
    /// the given content. Nested bodies are read from the cursor.
    fn parse_entry(
        &mut self,
        map: &mut ToonMap,
        content: &'a str,
        number: usize,
        depth: usize,
    ) -> Result<()> {
        let (key, value) = match find_unquoted(content, ':') {
            None => {
                if self.options.strict {
                    return Err(Error::syntax(number, 1, "missing ':' after key"));
                }
                (content.trim().to_string(), Value::String(String::new()))
            }
            Some(colon) => {
                let key_part = content[..colon].trim();
                let tail = content[colon + 1..].trim();
                if has_array_header(key_part) {
                    let (key, header) = self.parse_header_intro(key_part, number)?;
                    let key = match key {
                        Some(key) => key,
                        None => {
                            return Err(Error::syntax(number, 1, "array header requires a key"));
                        }
                    };
                    let value = self.parse_array_body(&header, tail, depth, number)?;
                    (key, value)
                } else {
                    let key = self.parse_key(key_part, number)?;
                    let value = if tail.is_empty() {
                        self.parse_nested_value(depth)?
                    } else {
                        self.parse_primitive(tail, number)?
                    };
                    (key, value)
                }
            }
        };
        if map.contains_key(&key) {
            return Err(Error::DuplicateKey { line: number, key });
        }
        map.insert(key, value);
        Ok(())
    }

    /// A key with nothing after the colon introduces a nested object, or the
    /// empty object when no deeper line follows.
    fn parse_nested_value(&mut self, parent_depth: usize) -> Result<Value> {
        self.skip_blanks();
        match self.peek() {
            Some(line) if line.depth > parent_depth => {
                if line.depth != parent_depth + 1 && self.options.strict {
                    return Err(Error::syntax(line.number, 1, "unexpected indentation"));
                }
                let depth = if self.options.strict {
                    parent_depth + 1
                } else {
                    line.depth
                };
                self.parse_object(depth)
            }
            _ => Ok(Value::Object(ToonMap::new())),
        }
    }

    fn parse_key(&self, raw: &str, number: usize) -> Result<String> {
        if raw.starts_with('"') {
            let inner = match wrapped_inner(raw) {
                Some(inner) => inner,
                None => return Err(Error::syntax(number, 1, "unterminated quoted string")),
            };
            return self.unescape(inner, number);
        }
        if raw.is_empty() {
            return Err(Error::syntax(number, 1, "empty key"));
        }
        if self.options.strict && !lexical::is_identifier_key(raw) {
            return Err(Error::syntax(number, 1, "invalid unquoted key"));
        }
        Ok(raw.to_string())
    }

    /// Splits `key[count<delim>]{fields}` into the key (if any) and the
    /// header record.
    fn parse_header_intro(
        &self,
        key_part: &str,
        number: usize,
    ) -> Result<(Option<String>, Header)> {
        let open = match find_unquoted(key_part, '[') {
            Some(at) => at,
            None => return Err(Error::syntax(number, 1, "malformed array header")),
        };
        let close = match find_unquoted(key_part, ']') {
            Some(at) if at > open => at,
            _ => return Err(Error::syntax(number, 1, "malformed array header")),
        };
        let prefix = key_part[..open].trim_end();
        let key = if prefix.is_empty() {
            None
        } else {
            Some(self.parse_key(prefix, number)?)
        };

        let body = &key_part[open + 1..close];
        let digits_part = body.strip_prefix('#').unwrap_or(body);
        let digit_len = digits_part
            .bytes()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        let (digits, rest) = digits_part.split_at(digit_len);
        let count: usize = digits
            .parse()
            .map_err(|_| Error::syntax(number, open + 2, "invalid array length"))?;
        let delimiter = match rest {
            "" => self.options.delimiter,
            "," => Delimiter::Comma,
            "\t" => Delimiter::Tab,
            "|" => Delimiter::Pipe,
            _ => return Err(Error::syntax(number, open + 2, "malformed array header")),
        };

        let after = &key_part[close + 1..];
        let fields = if after.is_empty() {
            None
        } else {
            let inner = match after.strip_prefix('{') {
                Some(inner) => inner,
                None => return Err(Error::syntax(number, close + 2, "malformed array header")),
            };
            let brace = match find_unquoted(inner, '}') {
                Some(at) => at,
                None => return Err(Error::syntax(number, close + 2, "malformed array header")),
            };
            if !inner[brace + 1..].is_empty() {
                return Err(Error::syntax(number, close + 2, "malformed array header"));
            }
            let list = &inner[..brace];
            if list.trim().is_empty() {
                return Err(Error::syntax(number, close + 2, "empty tabular field list"));
            }
            let mut fields = Vec::new();
            for token in split_delimited(list, delimiter.as_char()) {
                let field = self.parse_field_name(token.trim(), number)?;
                if fields.contains(&field) {
                    return Err(Error::DuplicateKey {
                        line: number,
                        key: field,
                    });
                }
                fields.push(field);
            }
            Some(fields)
        };

        Ok((
            key,
            Header {
                count,
                delimiter,
                fields,
            },
        ))
    }

    fn parse_field_name(&self, token: &str, number: usize) -> Result<String> {
        if token.is_empty() {
            return Err(Error::syntax(number, 1, "empty tabular field"));
        }
        if token.starts_with('"') {
            let inner = match wrapped_inner(token) {
                Some(inner) => inner,
                None => return Err(Error::syntax(number, 1, "unterminated quoted string")),
            };
            return self.unescape(inner, number);
        }
        Ok(token.to_string())
    }

    /// Reads the body of an array whose header line was already consumed.
    /// `depth` is the header line's depth; bodies sit one level deeper.
    fn parse_array_body(
        &mut self,
        header: &Header,
        tail: &str,
        depth: usize,
        header_line: usize,
    ) -> Result<Value> {
        if let Some(fields) = &header.fields {
            if !tail.is_empty() {
                return Err(Error::syntax(header_line, 1, "malformed array header"));
            }
            return self.parse_tabular(fields, header, depth + 1, header_line);
        }
        if !tail.is_empty() {
            let mut items = Vec::new();
            for token in split_delimited(tail, header.delimiter.as_char()) {
                items.push(self.parse_primitive(token, header_line)?);
            }
            if self.options.strict && items.len() != header.count {
                return Err(Error::LengthMismatch {
                    line: header_line,
                    declared: header.count,
                    found: items.len(),
                });
            }
            return Ok(Value::Array(items));
        }
        self.parse_expanded(header, depth + 1, header_line)
    }

    /// Blank-line handling inside an array body: a blank run ends the body
    /// unless more body lines follow beneath it, which is a strict error.
    /// Returns `true` when the body continues (lax), `false` when it ends.
    fn blank_in_body(&mut self, at: Line<'a>, body_depth: usize) -> Result<bool> {
        let mut look = self.pos + 1;
        while matches!(self.lines.get(look), Some(line) if line.blank) {
            look += 1;
        }
        match self.lines.get(look) {
            Some(line) if line.depth >= body_depth => {
                if self.options.strict {
                    return Err(Error::syntax(at.number, 1, "blank line inside array"));
                }
                self.pos = look;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn parse_expanded(
        &mut self,
        header: &Header,
        body_depth: usize,
        header_line: usize,
    ) -> Result<Value> {
        let mut items = Vec::new();
        loop {
            let line = match self.peek() {
                Some(line) => line,
                None => break,
            };
            if line.blank {
                if self.blank_in_body(line, body_depth)? {
                    continue;
                }
                break;
            }
            if line.depth != body_depth {
                break;
            }
            if line.content != "-" && !line.content.starts_with("- ") {
                break;
            }
            items.push(self.parse_list_item(line, body_depth)?);
        }
        if self.options.strict && items.len() != header.count {
            return Err(Error::LengthMismatch {
                line: header_line,
                declared: header.count,
                found: items.len(),
            });
        }
        Ok(Value::Array(items))
    }

    fn parse_tabular(
        &mut self,
        fields: &[String],
        header: &Header,
        row_depth: usize,
        header_line: usize,
    ) -> Result<Value> {
        let mut rows = Vec::new();
        loop {
            let line = match self.peek() {
                Some(line) => line,
                None => break,
            };
            if line.blank {
                if self.blank_in_body(line, row_depth)? {
                    continue;
                }
                break;
            }
            if line.depth != row_depth {
                break;
            }
            // a row is a line whose first unquoted delimiter comes before
            // its first unquoted ':' (or that has no unquoted ':' at all)
            let delim_at = find_unquoted(line.content, header.delimiter.as_char());
            let colon_at = find_unquoted(line.content, ':');
            let is_row = match (delim_at, colon_at) {
                (_, None) => true,
                (Some(delim), Some(colon)) => delim < colon,
                (None, Some(_)) => false,
            };
            if !is_row {
                break;
            }
            self.advance();
            let cells = split_delimited(line.content, header.delimiter.as_char());
            if self.options.strict && cells.len() != fields.len() {
                return Err(Error::RowWidth {
                    line: line.number,
                    expected: fields.len(),
                    found: cells.len(),
                });
            }
            let mut row = ToonMap::new();
            for (index, field) in fields.iter().enumerate() {
                let value = match cells.get(index) {
                    Some(cell) => self.parse_primitive(cell, line.number)?,
                    None => Value::Null,
                };
                row.insert(field.clone(), value);
            }
            rows.push(Value::Object(row));
        }
        if self.options.strict && rows.len() != header.count {
            return Err(Error::LengthMismatch {
                line: header_line,
                declared: header.count,
                found: rows.len(),
            });
        }
        Ok(Value::Array(rows))
    }

    fn parse_list_item(&mut self, line: Line<'a>, item_depth: usize) -> Result<Value> {
        let text = if line.content == "-" {
            ""
        } else {
            line.content[2..].trim()
        };
        self.advance();

        if text.is_empty() {
            // bare hyphen: empty object, or fields nested beneath it
            return match self.peek() {
                Some(next) if !next.blank && next.depth > item_depth => {
                    if next.depth != item_depth + 1 && self.options.strict {
                        return Err(Error::syntax(next.number, 1, "unexpected indentation"));
                    }
                    let depth = if self.options.strict {
                        item_depth + 1
                    } else {
                        next.depth
                    };
                    self.parse_object(depth)
                }
                _ => Ok(Value::Object(ToonMap::new())),
            };
        }

        if text.starts_with('[') && is_array_header_line(text) {
            let colon = match find_unquoted(text, ':') {
                Some(at) => at,
                None => return Err(Error::syntax(line.number, 1, "malformed array header")),
            };
            let key_part = text[..colon].trim_end();
            let tail = text[colon + 1..].trim();
            let (_, header) = self.parse_header_intro(key_part, line.number)?;
            return self.parse_array_body(&header, tail, item_depth, line.number);
        }

        match find_unquoted(text, ':') {
            None => self.parse_primitive(text, line.number),
            Some(_) => {
                // object item: first field on the hyphen line, further
                // fields on following lines at the same depth
                let mut map = ToonMap::new();
                self.parse_entry(&mut map, text, line.number, item_depth)?;
                loop {
                    let next = match self.peek() {
                        Some(next) => next,
                        None => break,
                    };
                    if next.blank {
                        if self.blank_in_body(next, item_depth)? {
                            continue;
                        }
                        break;
                    }
                    if next.depth != item_depth {
                        break;
                    }
                    if next.content == "-" || next.content.starts_with("- ") {
                        break;
                    }
                    self.advance();
                    self.parse_entry(&mut map, next.content, next.number, item_depth)?;
                }
                Ok(Value::Object(map))
            }
        }
    }

    fn parse_primitive(&self, text: &str, number: usize) -> Result<Value> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Value::String(String::new()));
        }
        if text.starts_with('"') {
            let inner = match wrapped_inner(text) {
                Some(inner) => inner,
                None => return Err(Error::syntax(number, 1, "unterminated quoted string")),
            };
            return Ok(Value::String(self.unescape(inner, number)?));
        }
        match text {
            "null" => return Ok(Value::Null),
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }
        if lexical::is_numeric_like(text) {
            // a forbidden leading zero keeps the text a string; the decoder
            // never silently reinterprets it
            if lexical::has_leading_zero(text) {
                return Ok(Value::String(text.to_string()));
            }
            let n: f64 = text
                .parse()
                .map_err(|_| Error::syntax(number, 1, "invalid number"))?;
            return Ok(Value::number(n));
        }
        Ok(Value::String(text.to_string()))
    }

    fn unescape(&self, inner: &str, number: usize) -> Result<String> {
        lexical::unescape(inner, self.options.strict).map_err(|err| match err {
            EscapeError::Invalid(at) => Error::syntax(number, at + 1, "invalid escape sequence"),
            EscapeError::Dangling(at) => {
                Error::syntax(number, at + 1, "unterminated escape sequence")
            }
            EscapeError::UnescapedQuote(at) => {
                Error::syntax(number, at + 1, "unexpected quote in string")
            }
        })
    }
}

/// `true` when the key part of a line carries an array header: a `[` ... `]`
/// pair outside any quoted region.
fn has_array_header(key_part: &str) -> bool {
    matches!(
        (find_unquoted(key_part, '['), find_unquoted(key_part, ']')),
        (Some(open), Some(close)) if open < close
    )
}

/// `true` when a whole line is an array-header line: an unquoted `[` ... `]`
/// pair in the text before the first unquoted `:`. Bracket-leading text
/// without the closing `]:` is not a header and falls through to the
/// primitive and object branches.
fn is_array_header_line(content: &str) -> bool {
    match find_unquoted(content, ':') {
        Some(colon) => has_array_header(content[..colon].trim_end()),
        None => false,
    }
}

/// If `token` is a complete double-quoted token, returns the text between
/// the quotes.
fn wrapped_inner(token: &str) -> Option<&str> {
    let bytes = token.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'"' {
        return None;
    }
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => {
                return if i == bytes.len() - 1 {
                    Some(&token[1..i])
                } else {
                    None
                };
            }
            _ => i += 1,
        }
    }
    None
}

/// Finds the first occurrence of an ASCII character outside any quoted
/// region. Inside quotes a backslash escapes the next character.
pub(crate) fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let bytes = s.as_bytes();
    let target = target as u8;
    let mut in_quotes = false;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if in_quotes {
            match byte {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'"' => in_quotes = false,
                _ => {}
            }
        } else if byte == b'"' {
            in_quotes = true;
        } else if byte == target {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Splits a line by a delimiter character, respecting double-quoted regions.
/// Escapes are kept verbatim in this pass; unescaping happens in primitive
/// parsing.
pub(crate) fn split_delimited(s: &str, delimiter: char) -> Vec<&str> {
    let bytes = s.as_bytes();
    let delimiter = delimiter as u8;
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if in_quotes {
            match byte {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'"' => in_quotes = false,
                _ => {}
            }
        } else if byte == b'"' {
            in_quotes = true;
        } else if byte == delimiter {
            parts.push(&s[start..i]);
            start = i + 1;
        }
        i += 1;
    }
    parts.push(&s[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquoted_locator_respects_quotes() {
        assert_eq!(find_unquoted("a: b", ':'), Some(1));
        assert_eq!(find_unquoted("\"a:b\": c", ':'), Some(5));
        assert_eq!(find_unquoted("\"a:b\"", ':'), None);
        assert_eq!(find_unquoted("\"a\\\":b\" x", ':'), None);
    }

    #[test]
    fn splitter_respects_quotes() {
        assert_eq!(split_delimited("a,b,c", ','), vec!["a", "b", "c"]);
        assert_eq!(split_delimited("\"a,b\",c", ','), vec!["\"a,b\"", "c"]);
        assert_eq!(split_delimited("a,,b", ','), vec!["a", "", "b"]);
        assert_eq!(split_delimited("solo", ','), vec!["solo"]);
    }

    #[test]
    fn wrapped_tokens() {
        assert_eq!(wrapped_inner("\"abc\""), Some("abc"));
        assert_eq!(wrapped_inner("\"\""), Some(""));
        assert_eq!(wrapped_inner("\"a\\\"b\""), Some("a\\\"b"));
        assert_eq!(wrapped_inner("\"abc"), None);
        assert_eq!(wrapped_inner("\"a\" b"), None);
        assert_eq!(wrapped_inner("abc"), None);
    }

    #[test]
    fn array_header_detection() {
        assert!(has_array_header("tags[3]"));
        assert!(has_array_header("items[2]{a,b}"));
        assert!(has_array_header("[0]"));
        assert!(!has_array_header("plain"));
        assert!(!has_array_header("\"a[0]\""));
    }

    #[test]
    fn header_line_detection() {
        assert!(is_array_header_line("[3]: 1,2,3"));
        assert!(is_array_header_line("[2]{a,b}:"));
        assert!(is_array_header_line("tags[0]:"));
        assert!(!is_array_header_line("[abc]"));
        assert!(!is_array_header_line("[abc"));
        assert!(!is_array_header_line("\"[3]\": x"));
        assert!(!is_array_header_line("plain: value"));
    }
}
