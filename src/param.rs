// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 协议参数与常量模块
//!
//! 该模块定义了请求解析流水线所依赖的线路格式常量以及 HTTP 方法的强类型枚举：
//! - 头部字段名、Cookie 名等字面量常量。
//! - 可携带请求体的方法列表。
//! - `HttpRequestMethod` 及其与请求行 token 之间的转换。

use lazy_static::lazy_static;

use std::{fmt, str::FromStr};

use crate::exception::ParseError;

/// HTTP 协议规定的换行符（Carriage Return Line Feed）
pub const CRLF: &str = "\r\n";

/// 标识请求体长度的头部字段名（大小写敏感，按收到的原样匹配）
pub const CONTENT_LENGTH: &str = "Content-Length";

/// 携带 Cookie 的头部字段名
pub const COOKIE: &str = "Cookie";

/// 用于标识会话的 Cookie 名
pub const SESSION_COOKIE_NAME: &str = "JSESSIONID";

/// 服务端唯一支持的协议版本
pub const HTTP_VERSION: &str = "HTTP/1.1";

lazy_static! {
    /// 会携带请求体的方法列表。
    ///
    /// 仅当方法位于该列表且请求带有 `Content-Length` 时，才会读取并解析请求体。
    pub static ref BODY_METHODS: Vec<HttpRequestMethod> = {
        vec![
            HttpRequestMethod::Post,
            HttpRequestMethod::Put,
            HttpRequestMethod::Patch,
        ]
    };
}

/// 标准 HTTP 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpRequestMethod {
    /// 获取资源
    Get,
    /// 获取资源的元数据（不包含响应体）
    Head,
    /// 提交表单数据
    Post,
    /// 整体替换资源
    Put,
    /// 局部更新资源
    Patch,
    /// 删除资源
    Delete,
    /// 查询服务器支持的选项
    Options,
    /// 回显请求，用于诊断
    Trace,
    /// 建立隧道
    Connect,
}

impl HttpRequestMethod {
    /// 该方法是否会携带请求体
    pub fn has_body(&self) -> bool {
        BODY_METHODS.contains(self)
    }
}

impl FromStr for HttpRequestMethod {
    type Err = ParseError;

    /// 请求行中的方法 token 区分大小写，未知 token 视为非法请求。
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "GET" => Ok(HttpRequestMethod::Get),
            "HEAD" => Ok(HttpRequestMethod::Head),
            "POST" => Ok(HttpRequestMethod::Post),
            "PUT" => Ok(HttpRequestMethod::Put),
            "PATCH" => Ok(HttpRequestMethod::Patch),
            "DELETE" => Ok(HttpRequestMethod::Delete),
            "OPTIONS" => Ok(HttpRequestMethod::Options),
            "TRACE" => Ok(HttpRequestMethod::Trace),
            "CONNECT" => Ok(HttpRequestMethod::Connect),
            _ => Err(ParseError::UnknownMethod(token.to_string())),
        }
    }
}

impl fmt::Display for HttpRequestMethod {
    /// 将枚举格式化为 HTTP 标准大写方法名
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            HttpRequestMethod::Get => write!(f, "GET"),
            HttpRequestMethod::Head => write!(f, "HEAD"),
            HttpRequestMethod::Post => write!(f, "POST"),
            HttpRequestMethod::Put => write!(f, "PUT"),
            HttpRequestMethod::Patch => write!(f, "PATCH"),
            HttpRequestMethod::Delete => write!(f, "DELETE"),
            HttpRequestMethod::Options => write!(f, "OPTIONS"),
            HttpRequestMethod::Trace => write!(f, "TRACE"),
            HttpRequestMethod::Connect => write!(f, "CONNECT"),
        }
    }
}
