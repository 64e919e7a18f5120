// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use crate::{
    cookie::HttpCookie,
    session::{Session, SessionRepository},
};

/// 根据请求的 Cookie 确定本次请求使用的会话。
///
/// 没有 `JSESSIONID`，或其值为空时，生成一个随机的 UUID v4 作为新 ID。仓库中已有该 ID 则复用同一个会话对象，
/// 否则新建会话并立即写入仓库，使同一 ID 的并发请求最终共享一个规范实例。
pub fn resolve_session<S: SessionRepository + ?Sized>(
    cookies: &HttpCookie,
    store: &S,
    id: u128,
) -> Arc<Session> {
    let session_id = match cookies.session_id().filter(|s| !s.is_empty()) {
        Some(session_id) => session_id.to_string(),
        None => Uuid::new_v4().to_string(),
    };

    if let Some(session) = store.get(&session_id) {
        debug!("[ID{}]复用会话：{}", id, session_id);
        return session;
    }

    debug!("[ID{}]创建会话：{}", id, session_id);
    store.get_or_insert(&session_id, Arc::new(Session::new(session_id.clone())))
}
