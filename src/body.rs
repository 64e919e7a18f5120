// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 请求体解析
//!
//! 只处理 `application/x-www-form-urlencoded` 风格的表单：`key=value` 对以 `&` 连接。
//! 不做百分号解码。

use std::{
    collections::HashMap,
    io::{BufRead, Read},
};

use log::debug;

use crate::{exception::ParseError, header::Headers, param::*};

/// 表单字段名到值的映射
pub type FormFields = HashMap<String, String>;

/// 按方法与 `Content-Length` 决定是否读取请求体，并解析为表单字段。
///
/// 方法不携带请求体或缺少 `Content-Length` 时返回空映射；
/// 流提前结束、一个字节都没读到时同样返回空映射。
pub fn parse_body<R: BufRead + ?Sized>(
    reader: &mut R,
    headers: &Headers,
    method: HttpRequestMethod,
) -> Result<FormFields, ParseError> {
    if !method.has_body() {
        return Ok(HashMap::new());
    }
    let Some(raw_length) = headers.get(CONTENT_LENGTH) else {
        return Ok(HashMap::new());
    };
    let length: u64 = raw_length
        .parse()
        .map_err(|_| ParseError::ContentLength(raw_length.clone()))?;

    let mut buffer = Vec::new();
    let read = Read::take(&mut *reader, length).read_to_end(&mut buffer)?;
    if read == 0 {
        return Ok(HashMap::new());
    }
    if (read as u64) < length {
        debug!("请求体不足：期望{}字节，实际读到{}字节", length, read);
    }

    let payload = String::from_utf8(buffer).map_err(|_| ParseError::BodyEncoding)?;
    parse_form(&payload)
}

/// 把 `a=1&b=2` 解析为字段映射，每一对按第一个 `=` 切分。
///
/// 空的字段对（如结尾多出的 `&`）直接跳过。
pub fn parse_form(payload: &str) -> Result<FormFields, ParseError> {
    payload
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => Ok((key.to_string(), value.to_string())),
            None => Err(ParseError::FormField(pair.to_string())),
        })
        .collect()
}
