use super::*;

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
    assert_eq!(decode(b"i-42e").unwrap(), Value::Integer(-42));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
}

#[test]
fn test_decode_integer_invalid() {
    assert!(matches!(decode(b"i-0e"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i03e"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"ie"), Err(BencodeError::InvalidInteger(_))));
    assert!(matches!(decode(b"i12"), Err(BencodeError::UnexpectedEof)));
}

#[test]
fn test_decode_bytes() {
    assert_eq!(decode(b"4:spam").unwrap(), Value::Bytes(b"spam"));
    assert_eq!(decode(b"0:").unwrap(), Value::Bytes(b""));
}

#[test]
fn test_decode_bytes_truncated() {
    assert_eq!(decode(b"10:short"), Err(BencodeError::UnexpectedEof));
    assert_eq!(decode(b"4x:spam"), Err(BencodeError::InvalidStringLength(0)));
    assert_eq!(decode(b"4spam"), Err(BencodeError::UnexpectedEof));
}

#[test]
fn test_decode_list() {
    let value = decode(b"l4:spami42ee").unwrap();
    let list = value.as_list().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].as_str(), Some("spam"));
    assert_eq!(list[1].as_integer(), Some(42));
}

#[test]
fn test_decode_dict_keeps_raw_span() {
    let input = b"d4:infod4:name4:Showee";
    let value = decode(input).unwrap();
    let info = value.get(b"info").and_then(Value::as_dict).unwrap();
    assert_eq!(info.raw(), b"d4:name4:Showe");
    assert_eq!(info.get(b"name").and_then(Value::as_str), Some("Show"));
    assert_eq!(value.as_dict().unwrap().raw(), input);
}

#[test]
fn test_dict_iterates_in_key_order() {
    let value = decode(b"d1:ai1e1:bi2ee").unwrap();
    let dict = value.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert!(!dict.is_empty());
    let entries: Vec<_> = dict
        .iter()
        .map(|(key, value)| (key, value.as_integer()))
        .collect();
    assert_eq!(entries, [(&b"a"[..], Some(1)), (&b"b"[..], Some(2))]);

    let empty = decode(b"de").unwrap();
    assert!(empty.as_dict().unwrap().is_empty());
}

#[test]
fn test_dict_key_must_be_string() {
    assert_eq!(decode(b"di1e3:fooe"), Err(BencodeError::NonStringKey(1)));
}

#[test]
fn test_trailing_data_rejected() {
    assert_eq!(decode(b"i1ei2e"), Err(BencodeError::TrailingData(3)));
}

#[test]
fn test_unterminated_containers() {
    assert_eq!(decode(b"l4:spam"), Err(BencodeError::UnexpectedEof));
    assert_eq!(decode(b"d3:foo"), Err(BencodeError::UnexpectedEof));
    assert_eq!(decode(b""), Err(BencodeError::UnexpectedEof));
}

#[test]
fn test_unexpected_byte() {
    assert_eq!(
        decode(b"x"),
        Err(BencodeError::UnexpectedByte {
            byte: b'x',
            offset: 0
        })
    );
}

#[test]
fn test_nesting_limit() {
    let mut deep = vec![b'l'; MAX_DEPTH + 2];
    deep.extend(vec![b'e'; MAX_DEPTH + 2]);
    assert_eq!(decode(&deep), Err(BencodeError::NestingTooDeep));

    let mut ok = vec![b'l'; MAX_DEPTH];
    ok.extend(vec![b'e'; MAX_DEPTH]);
    assert!(decode(&ok).is_ok());
}
