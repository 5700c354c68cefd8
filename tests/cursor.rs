use rdjson::{Cursor, JsonValue, Parser};

#[test]
fn should_handle_empty_input() {
    let cursor = Cursor::new("");
    assert_eq!(cursor.peek(), None);
    assert!(cursor.is_eof());
    assert_eq!(cursor.len(), 0);
}

#[test]
fn should_walk_every_byte() {
    let text = "{   } [  ]+  - : ,   ";
    let mut cursor = Cursor::new(text);
    let mut bytes: Vec<u8> = vec![];
    while let Some(b) = cursor.peek() {
        bytes.push(b);
        cursor.advance();
    }
    assert_eq!(bytes, text.as_bytes());
    assert_eq!(cursor.position(), text.len());
}

#[test]
fn should_skip_whitespace_between_tokens() {
    let mut cursor = Cursor::new(" {  }   \n[]\t\r\n");
    let mut tokens: Vec<u8> = vec![];
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            Some(b) => {
                tokens.push(b);
                cursor.advance();
            }
            None => break,
        }
    }
    assert_eq!(tokens, b"{}[]".to_vec());
}

#[test]
fn should_slice_recorded_ranges() {
    let mut cursor = Cursor::new("abc-123-def");
    let start = cursor.position();
    cursor.read_n(3);
    assert_eq!(cursor.slice(start, cursor.position()), "abc");
    cursor.advance();
    let start = cursor.position();
    cursor.read_n(3);
    assert_eq!(cursor.slice(start, cursor.position()), "123");
}

#[should_panic]
#[test]
fn advancing_past_the_end_is_a_contract_violation() {
    let mut cursor = Cursor::new("");
    cursor.advance();
}

#[test]
fn cursors_should_drive_the_parser_value_by_value() {
    let parser = Parser::default();
    let mut cursor = Cursor::new("1 \"two\" [3] {\"four\": 4}");
    let mut values: Vec<JsonValue> = vec![];
    while let Some(value) = parser.parse(&mut cursor).unwrap() {
        values.push(value);
    }
    assert_eq!(values.len(), 4);
    assert_eq!(values[1].as_str(), Some("two"));
    assert_eq!(values[3].get("four"), Some(&JsonValue::Integer(4)));
}

#[test]
fn coords_should_track_lines() {
    let mut cursor = Cursor::new("[\n1,\n2]");
    while cursor.peek() != Some(b'2') {
        cursor.advance();
    }
    let coords = cursor.coords();
    assert_eq!(coords.absolute, 5);
    assert_eq!(coords.line, 3);
    assert_eq!(coords.column, 1);
}
