// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

use std::io::BufRead;

use crate::exception::ParseError;

/// 从流中读取一行，去掉结尾的 `\r\n` 或 `\n`。
///
/// 流已结束时返回 `Ok(None)`；读到非 UTF-8 字节时返回 `ParseError::Io`。
pub fn read_line<R: BufRead + ?Sized>(reader: &mut R) -> Result<Option<String>, ParseError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}
