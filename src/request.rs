// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # HTTP 请求处理模块
//!
//! 该模块把可读的字节流解析为不可变的 `Request`。解析严格按顺序进行，不回退：
//! 1. 请求行（方法、URI、版本）。
//! 2. 头部，直到空行或流结束。
//! 3. 请求体（仅限携带请求体的方法且存在 `Content-Length`）。
//! 4. `Cookie` 头部。
//! 5. 根据 `JSESSIONID` 确定会话。
//!
//! 任一阶段失败都在 `Request::parse` 这一层统一记录日志，并以 `Exception::MalformedRequest` 返回。

use std::{io::BufRead, sync::Arc};

use log::{debug, error, warn};

use crate::{
    body::{parse_body, FormFields},
    cookie::HttpCookie,
    exception::{Exception, ParseError},
    header::{parse_headers, Headers},
    param::*,
    resolver::resolve_session,
    session::{Session, SessionRepository},
    util::read_line,
};

/// 一个完整解析后的 HTTP 请求。构建之后不再修改。
#[derive(Debug, Clone)]
pub struct Request {
    method: HttpRequestMethod,
    /// 请求目标，包含查询字符串
    uri: String,
    version: String,
    headers: Headers,
    body: FormFields,
    cookies: HttpCookie,
    /// 与会话仓库共享的会话对象
    session: Arc<Session>,
}

impl Request {
    pub fn new(
        method: HttpRequestMethod,
        uri: impl Into<String>,
        version: impl Into<String>,
        headers: Headers,
        body: FormFields,
        cookies: HttpCookie,
        session: Arc<Session>,
    ) -> Self {
        Self {
            method,
            uri: uri.into(),
            version: version.into(),
            headers,
            body,
            cookies,
            session,
        }
    }

    /// 从流中解析一个请求。
    ///
    /// # 参数
    /// * `reader` - 位于请求行开头的可读流。
    /// * `store` - 会话仓库，新会话会被写入其中。
    /// * `id` - 请求 ID，只用于日志追踪。
    ///
    /// # 错误处理
    /// 任一阶段失败都返回 `Exception::MalformedRequest`，具体原因只写入日志。
    pub fn parse<R, S>(reader: &mut R, store: &S, id: u128) -> Result<Self, Exception>
    where
        R: BufRead + ?Sized,
        S: SessionRepository + ?Sized,
    {
        Self::assemble(reader, store, id).map_err(|e| {
            error!("[ID{}]解析HTTP请求失败：{}", id, e);
            Exception::from(e)
        })
    }

    fn assemble<R, S>(reader: &mut R, store: &S, id: u128) -> Result<Self, ParseError>
    where
        R: BufRead + ?Sized,
        S: SessionRepository + ?Sized,
    {
        let line = read_line(reader)?.ok_or(ParseError::EmptyRequest)?;
        let (method, uri, version) = parse_request_line(&line)?;
        if version != HTTP_VERSION {
            warn!("[ID{}]非预期的HTTP协议版本：{}", id, version);
        }
        debug!("[ID{}]请求行：{} {} {}", id, method, uri, version);

        let headers = parse_headers(reader)?;
        let body = parse_body(reader, &headers, method)?;
        let cookies = HttpCookie::parse(headers.get(COOKIE).map(String::as_str))?;
        let session = resolve_session(&cookies, store, id);

        Ok(Self {
            method,
            uri,
            version,
            headers,
            body,
            cookies,
            session,
        })
    }
}

/// 请求行必须恰好由单个空格分隔成三个非空 token。
fn parse_request_line(line: &str) -> Result<(HttpRequestMethod, String, String), ParseError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    match tokens.as_slice() {
        [method, uri, version] if !uri.is_empty() && !version.is_empty() => {
            Ok((method.parse()?, uri.to_string(), version.to_string()))
        }
        _ => Err(ParseError::RequestLine(line.to_string())),
    }
}

// --- Getter 访问器实现 ---

impl Request {
    pub fn method(&self) -> HttpRequestMethod {
        self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// URI 中 `?` 之前的部分
    pub fn path(&self) -> &str {
        match self.uri.split_once('?') {
            Some((path, _)) => path,
            None => &self.uri,
        }
    }

    /// URI 中 `?` 之后的部分，未做解码
    pub fn query(&self) -> Option<&str> {
        self.uri.split_once('?').map(|(_, query)| query)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn body(&self) -> &FormFields {
        &self.body
    }

    pub fn body_field(&self, name: &str) -> Option<&str> {
        self.body.get(name).map(String::as_str)
    }

    pub fn cookies(&self) -> &HttpCookie {
        &self.cookies
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}
