// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # HTTP 头部解析
//!
//! 逐行读取 `Name: value` 形式的头部，直到遇到空行或流结束。
//! 字段名大小写敏感，按收到的原样保存；同名头部出现多次时以最后一次为准。

use std::{collections::HashMap, io::BufRead};

use log::debug;

use crate::{exception::ParseError, util::read_line};

/// 头部字段名到值的映射
pub type Headers = HashMap<String, String>;

/// 读取整个头部块。
///
/// 遇到空行或流结束即停止，缺少结尾空行不会导致阻塞或报错。
pub fn parse_headers<R: BufRead + ?Sized>(reader: &mut R) -> Result<Headers, ParseError> {
    let mut headers = HashMap::new();
    while let Some(line) = read_line(reader)? {
        if line.is_empty() {
            break;
        }
        let (name, value) = parse_header_line(&line)?;
        if headers.contains_key(&name) {
            debug!("重复的头部字段，以最后一次为准：{}", name);
        }
        headers.insert(name, value);
    }
    Ok(headers)
}

/// 解析单行头部。
///
/// 冒号之后固定跳过一个字符（约定为一个空格，按字符而非字节计），其余部分原样作为值。
/// 没有冒号，或冒号已是行尾时，返回 `ParseError::HeaderLine`。
pub fn parse_header_line(line: &str) -> Result<(String, String), ParseError> {
    let malformed = || ParseError::HeaderLine(line.to_string());
    let index = line.find(':').ok_or_else(malformed)?;
    let mut rest = line[index + 1..].chars();
    rest.next().ok_or_else(malformed)?;
    Ok((line[..index].to_string(), rest.as_str().to_string()))
}
