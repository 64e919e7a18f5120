// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Cookie 解析
//!
//! 解析 `Cookie` 头部的值：`name=value` 对以 `;` 分隔，名与值两侧的空白会被去掉。

use std::collections::{hash_map, HashMap};

use crate::{exception::ParseError, param::SESSION_COOKIE_NAME};

/// 单个请求携带的 Cookie 集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpCookie {
    cookies: HashMap<String, String>,
}

impl HttpCookie {
    pub fn new(cookies: HashMap<String, String>) -> Self {
        Self { cookies }
    }

    /// 从 `Cookie` 头部的原始值构建。
    ///
    /// 头部缺失时得到空集合。每段按第一个 `=` 切分；只含空白的段（例如结尾多余的 `; `）
    /// 被跳过，其余缺少 `=` 的段返回 `ParseError::CookieSegment`。
    pub fn parse(raw: Option<&str>) -> Result<Self, ParseError> {
        let mut cookies = HashMap::new();
        let Some(raw) = raw else {
            return Ok(Self { cookies });
        };
        for segment in raw.split(';') {
            if segment.trim().is_empty() {
                continue;
            }
            let (name, value) = segment
                .split_once('=')
                .ok_or_else(|| ParseError::CookieSegment(segment.to_string()))?;
            cookies.insert(name.trim().to_string(), value.trim().to_string());
        }
        Ok(Self { cookies })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// 会话 Cookie（`JSESSIONID`）的值
    pub fn session_id(&self) -> Option<&str> {
        self.get(SESSION_COOKIE_NAME)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.cookies.iter()
    }
}
