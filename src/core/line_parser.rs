use crate::domain::model::{LineRejection, ParsedRecord, RejectionReason};

const MIN_FIELDS: usize = 4;

/// 解析單一資料列。
///
/// `index` 是檔案內容中從 0 開始的行索引（標題列為 0）。
/// 空白行回傳 `Ok(None)`，不算被拒絕。欄位以逗號直接切割，不處理引號。
/// 第 0 欄（檔名欄）不檢查。
pub fn parse_line(
    file: &str,
    index: usize,
    line: &str,
) -> Result<Option<ParsedRecord>, LineRejection> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let reject = |reason| LineRejection {
        file: file.to_string(),
        line_number: index + 1,
        line: line.to_string(),
        reason,
    };

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < MIN_FIELDS {
        return Err(reject(RejectionReason::InsufficientData {
            fields: fields.len(),
        }));
    }

    let text = fields[1].trim();
    let number_str = fields[2].trim();
    let hex = fields[3].trim();

    if text.is_empty() {
        return Err(reject(RejectionReason::InvalidLine));
    }

    let number =
        parse_leading_integer(number_str).ok_or_else(|| reject(RejectionReason::InvalidLine))?;

    Ok(Some(ParsedRecord {
        text: text.to_string(),
        number,
        hex: hex.to_string(),
    }))
}

/// 取字串開頭的十進位整數："000123" -> 123，"12abc" -> 12，"abc" -> None。
/// 溢位視為無法解析。
pub fn parse_leading_integer(s: &str) -> Option<i64> {
    let (negative, rest) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for digit in rest[..digits_len].bytes() {
        let d = i64::from(digit - b'0');
        value = value.checked_mul(10)?;
        value = if negative {
            value.checked_sub(d)?
        } else {
            value.checked_add(d)?
        };
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let record = parse_line("test.csv", 1, "test.csv,Hello,123,abc123")
            .unwrap()
            .unwrap();
        assert_eq!(
            record,
            ParsedRecord {
                text: "Hello".to_string(),
                number: 123,
                hex: "abc123".to_string(),
            }
        );
    }

    #[test]
    fn test_blank_line_is_skipped_without_rejection() {
        assert_eq!(parse_line("test.csv", 3, ""), Ok(None));
        assert_eq!(parse_line("test.csv", 3, "   \t"), Ok(None));
    }

    #[test]
    fn test_fewer_than_four_fields_rejected() {
        let rejection = parse_line("test.csv", 2, "test.csv,Incomplete").unwrap_err();
        assert_eq!(rejection.reason, RejectionReason::InsufficientData { fields: 2 });
        assert_eq!(rejection.line_number, 3);
        assert_eq!(rejection.file, "test.csv");
    }

    #[test]
    fn test_empty_text_rejected() {
        let rejection = parse_line("test.csv", 1, "test.csv,  ,456,def456").unwrap_err();
        assert_eq!(rejection.reason, RejectionReason::InvalidLine);
    }

    #[test]
    fn test_non_numeric_number_rejected() {
        let rejection =
            parse_line("test.csv", 1, "test.csv,Invalid,notanumber,def456").unwrap_err();
        assert_eq!(rejection.reason, RejectionReason::InvalidLine);
        assert!(parse_line("test.csv", 1, "test.csv,Invalid,,def456").is_err());
    }

    #[test]
    fn test_empty_hex_kept_as_empty_string() {
        let record = parse_line("test.csv", 1, "test.csv,Hello,123,").unwrap().unwrap();
        assert_eq!(record.hex, "");
        assert_eq!(record.number, 123);
    }

    #[test]
    fn test_fields_are_trimmed_and_extra_fields_ignored() {
        let record = parse_line("test.csv", 1, "x, Hello , 42 , ff ,extra,more\r")
            .unwrap()
            .unwrap();
        assert_eq!(record.text, "Hello");
        assert_eq!(record.number, 42);
        assert_eq!(record.hex, "ff");
    }

    #[test]
    fn test_comma_inside_text_shifts_fields() {
        // 不處理引號："Hello" 與 " world" 被切成兩欄
        let rejection = parse_line("test.csv", 1, "f,\"Hello, world\",7,aa").unwrap_err();
        assert_eq!(rejection.reason, RejectionReason::InvalidLine);
    }

    #[test]
    fn test_parse_leading_integer() {
        assert_eq!(parse_leading_integer("000123"), Some(123));
        assert_eq!(parse_leading_integer("12abc"), Some(12));
        assert_eq!(parse_leading_integer("-45"), Some(-45));
        assert_eq!(parse_leading_integer("+7"), Some(7));
        assert_eq!(parse_leading_integer("3.9"), Some(3));
        assert_eq!(parse_leading_integer("abc"), None);
        assert_eq!(parse_leading_integer(""), None);
        assert_eq!(parse_leading_integer("-"), None);
        assert_eq!(parse_leading_integer("99999999999999999999"), None);
        assert_eq!(parse_leading_integer("-9223372036854775808"), Some(i64::MIN));
    }

    #[test]
    fn test_rejection_display() {
        let rejection = parse_line("a.csv", 4, "a.csv,x").unwrap_err();
        assert_eq!(rejection.to_string(), "insufficient data in a.csv (line 5): a.csv,x");
    }
}
