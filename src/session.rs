// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 会话与会话仓库
//!
//! `SessionStore` 是进程内唯一跨请求共享的状态：会话 ID 到会话对象的映射。
//! 它在进程启动时为空，没有过期或淘汰策略，只有外部显式调用 `remove` 才会删除会话。
//! 存储由调用方创建并注入解析流程，而不是全局变量，因此每个测试都可以使用独立的实例。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

#[cfg(test)]
use mockall::automock;

/// 服务端会话
#[derive(Debug)]
pub struct Session {
    id: String,
    created_at: DateTime<Utc>,
    /// 控制器写入的会话属性（例如已登录的用户名）
    attributes: DashMap<String, String>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            attributes: DashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).map(|entry| entry.value().clone())
    }

    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.attributes.remove(name).map(|(_, value)| value)
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}

/// 会话仓库的契约。
///
/// 所有方法都可能被多个连接同时调用，实现必须是线程安全的。
#[cfg_attr(test, automock)]
pub trait SessionRepository: Send + Sync {
    fn get(&self, id: &str) -> Option<Arc<Session>>;

    /// 写入会话，已有同 ID 的会话时覆盖
    fn put(&self, id: &str, session: Arc<Session>);

    /// 显式失效一个会话
    fn remove(&self, id: &str) -> Option<Arc<Session>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 返回 `id` 对应的规范会话：已存在则返回已存在的，否则写入 `session` 并返回它。
    ///
    /// 默认实现由 `get` 与 `put` 组合而成，两次调用之间存在竞争窗口（后写者胜）。
    fn get_or_insert(&self, id: &str, session: Arc<Session>) -> Arc<Session> {
        match self.get(id) {
            Some(existing) => existing,
            None => {
                self.put(id, Arc::clone(&session));
                session
            }
        }
    }
}

/// 基于 `DashMap` 的进程内会话仓库，克隆后共享同一份数据。
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for SessionStore {
    fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    fn put(&self, id: &str, session: Arc<Session>) {
        self.sessions.insert(id.to_string(), session);
    }

    fn remove(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.remove(id).map(|(_, session)| session)
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }

    /// 在分片锁内完成查找与插入，并发创建同一 ID 时只有一个会话胜出。
    fn get_or_insert(&self, id: &str, session: Arc<Session>) -> Arc<Session> {
        let entry = self.sessions.entry(id.to_string()).or_insert(session);
        Arc::clone(entry.value())
    }
}
