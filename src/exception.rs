// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 错误分为两层：
//! - `ParseError`：流水线内部各阶段（请求行、头部、请求体、Cookie）各自返回的底层错误，
//!   保留了具体的失败原因，仅用于日志诊断。
//! - `Exception`：对外暴露的错误。所有解析期错误在组装边界被统一映射为
//!   `Exception::MalformedRequest`，调用方不会看到底层错误类型。

use std::{fmt, io};

use thiserror::Error;

/// 对外暴露的异常类型。
///
/// 上层的响应模块通常把 `MalformedRequest` 翻译为 `400 Bad Request`。
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exception {
    /// 请求报文无法按预期的线路格式解析（任意阶段失败）。对应 `400 Bad Request`。
    MalformedRequest,
    /// 找不到指定的配置文件。
    ConfigNotFound,
    /// 配置文件存在但无法读取。
    ConfigUnreadable,
}

use Exception::*;

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedRequest => write!(f, "Malformed request (400)"),
            ConfigNotFound => write!(f, "Config file not found"),
            ConfigUnreadable => write!(f, "Config file can't be read"),
        }
    }
}

impl std::error::Error for Exception {}

/// 解析流水线内部的错误，每个变体对应一个阶段。
#[derive(Debug, Error)]
pub enum ParseError {
    /// 流在请求行之前就已结束
    #[error("stream ended before the request line")]
    EmptyRequest,

    #[error("request line must have exactly three tokens: {0:?}")]
    RequestLine(String),

    #[error("unknown request method: {0:?}")]
    UnknownMethod(String),

    /// 头部行缺少冒号，或冒号后不足一个字符
    #[error("malformed header line: {0:?}")]
    HeaderLine(String),

    #[error("unparsable Content-Length: {0:?}")]
    ContentLength(String),

    #[error("request body is not valid UTF-8")]
    BodyEncoding,

    #[error("malformed form field: {0:?}")]
    FormField(String),

    #[error("malformed cookie segment: {0:?}")]
    CookieSegment(String),

    #[error("io error while reading request: {0}")]
    Io(#[from] io::Error),
}

impl From<ParseError> for Exception {
    fn from(_: ParseError) -> Self {
        MalformedRequest
    }
}
