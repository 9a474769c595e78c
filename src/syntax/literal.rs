//! Go string literal quoting and import path validation.

/// Characters that may not appear in an import path.
const ILLEGAL_IMPORT_CHARS: &str = "!\"#$%&'()*,:;<=>?[\\]^{|}`\u{FFFD}";

/// Interpret a Go string literal (interpreted or raw), returning its value.
///
/// Returns `None` if the literal is malformed or its value is not valid UTF-8.
pub fn unquote(lit: &str) -> Option<String> {
	let quote = lit.chars().next()?;
	if lit.len() < 2 || !lit.ends_with(quote) {
		return None;
	}
	let body = &lit[1..lit.len() - 1];

	match quote {
		'`' => {
			if body.contains('`') {
				return None;
			}
			Some(body.replace('\r', ""))
		}
		'"' => unquote_interpreted(body),
		_ => None,
	}
}

fn unquote_interpreted(body: &str) -> Option<String> {
	let mut out: Vec<u8> = Vec::with_capacity(body.len());
	let mut chars = body.chars();

	while let Some(c) = chars.next() {
		match c {
			'"' | '\n' => return None,
			'\\' => {
				let escape = chars.next()?;
				match escape {
					'a' => out.push(0x07),
					'b' => out.push(0x08),
					'f' => out.push(0x0C),
					'n' => out.push(b'\n'),
					'r' => out.push(b'\r'),
					't' => out.push(b'\t'),
					'v' => out.push(0x0B),
					'\\' => out.push(b'\\'),
					'"' => out.push(b'"'),
					'x' => out.push(u8::try_from(read_digits(&mut chars, 2, 16)?).ok()?),
					'0'..='7' => {
						let rest = read_digits(&mut chars, 2, 8)?;
						let value = escape.to_digit(8)? * 64 + rest;
						out.push(u8::try_from(value).ok()?);
					}
					'u' => push_char(&mut out, char::from_u32(read_digits(&mut chars, 4, 16)?)?),
					'U' => push_char(&mut out, char::from_u32(read_digits(&mut chars, 8, 16)?)?),
					_ => return None,
				}
			}
			c => push_char(&mut out, c),
		}
	}

	String::from_utf8(out).ok()
}

fn read_digits(chars: &mut std::str::Chars<'_>, count: usize, radix: u32) -> Option<u32> {
	let mut value = 0u32;
	for _ in 0..count {
		value = value * radix + chars.next()?.to_digit(radix)?;
	}
	Some(value)
}

fn push_char(out: &mut Vec<u8>, c: char) {
	let mut buf = [0u8; 4];
	out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

/// Produce a double-quoted Go string literal for `value`.
pub fn quote(value: &str) -> String {
	let mut out = String::with_capacity(value.len() + 2);
	out.push('"');
	for c in value.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\u{07}' => out.push_str("\\a"),
			'\u{08}' => out.push_str("\\b"),
			'\u{0C}' => out.push_str("\\f"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			'\u{0B}' => out.push_str("\\v"),
			c if (c as u32) < 0x20 || c == '\u{7F}' => {
				out.push_str(&format!("\\x{:02x}", c as u32));
			}
			c if c.is_control() || c == '\u{FEFF}' => {
				if (c as u32) < 0x10000 {
					out.push_str(&format!("\\u{:04x}", c as u32));
				} else {
					out.push_str(&format!("\\U{:08x}", c as u32));
				}
			}
			c => out.push(c),
		}
	}
	out.push('"');
	out
}

/// Whether a literal, as written in source, names a valid import path.
pub fn is_valid_import(lit: &str) -> bool {
	let Some(path) = unquote(lit) else {
		return false;
	};
	!path.is_empty()
		&& path
			.chars()
			.all(|c| !c.is_control() && !c.is_whitespace() && !ILLEGAL_IMPORT_CHARS.contains(c))
}
