use crate::error::ParseError;
use memchr::memchr;

/// Split at the first `delim`, skipping `offset` bytes of the delimiter in the remainder
pub fn split_once(input: &str, delim: u8, offset: usize) -> Result<(&str, &str), ParseError> {
    debug_assert!(delim < 128); // only basic ascii
    debug_assert!(offset <= 1);
    let end = memchr(delim, input.as_bytes()).ok_or(ParseError::Incomplete)?;
    // splitting on an ascii byte always lands on a char boundary
    Ok((&input[..end], &input[end + offset..]))
}

/// Returns `(rest, head)` where `head` runs up to (not including) the first `delim`
pub fn take_until(input: &str, delim: u8) -> (&str, &str) {
    debug_assert!(delim < 128); // only basic ascii
    match memchr(delim, input.as_bytes()) {
        Some(end) => (&input[end..], &input[..end]),
        None => ("", input),
    }
}

/// Returns `(rest, head)` where `head` is the longest prefix matching `pred`
pub fn take_while(input: &str, pred: impl Fn(u8) -> bool) -> (&str, &str) {
    let end = input
        .as_bytes()
        .iter()
        .position(|b| !pred(*b))
        .unwrap_or(input.len());
    // `pred` only accepts ascii so `end` is a char boundary
    (&input[end..], &input[..end])
}

pub fn skip_matches<'a>(input: &'a str, expected: &str) -> Result<&'a str, ParseError> {
    input
        .strip_prefix(expected)
        .ok_or(ParseError::Malformed)
}

pub fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[test]
fn test_split_once() {
    assert_eq!(Ok(("2", "3 22")), split_once("2 3 22", b' ', 1));
    assert_eq!(Ok(("2", " 3 22")), split_once("2 3 22", b' ', 0));
    assert_eq!(Err(ParseError::Incomplete), split_once("22", b' ', 1));
}

#[test]
fn test_take_while() {
    assert_eq!(
        (":34 ClientConnect: 2", "20"),
        take_while("20:34 ClientConnect: 2", |b| b.is_ascii_digit())
    );
    assert_eq!(("", "InitGame"), take_while("InitGame", is_word));
    assert_eq!((": x", ""), take_while(": x", is_word));
}

#[test]
fn test_take_until() {
    assert_eq!((r"\t\0", "Dono da Bola"), take_until(r"Dono da Bola\t\0", b'\\'));
    assert_eq!(("", "Mocinha"), take_until("Mocinha", b'\\'));
}
