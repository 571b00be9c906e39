//! Excel's `_xHHHH_` escapes for characters XML text cannot carry

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format for characters XML cannot carry directly:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// Encode text so that [`decode_excel_escapes`] gives it back unchanged
///
/// Control characters other than tab and line feed become `_xHHHH_`. An
/// underscore that would otherwise start an escape is written as `_x005F_`.
pub(crate) fn encode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for (pos, c) in s.char_indices() {
        match c {
            '_' if starts_escape(&s[pos..]) => result.push_str("_x005F_"),
            '\t' | '\n' => result.push(c),
            c if (c as u32) < 0x20 => {
                result.push_str(&format!("_x{:04X}_", c as u32))
            }
            c => result.push(c),
        }
    }
    result
}

fn starts_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 7
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}
