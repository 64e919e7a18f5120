// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 演示服务器
//!
//! 充当解析核心外部的传输层：
//! - 基于 Tokio 多线程运行时接受 TCP 连接。
//! - 每个连接转换为阻塞式流，设置读超时后交给阻塞线程池解析。
//! - 所有连接共享同一个 `SessionStore`。
//! - 后台管理控制台（CLI 指令交互）。
//!
//! 响应只是最简单的纯文本回显，真正的响应构建由控制器层负责。

use jwp_session::{
    param::{CRLF, HTTP_VERSION, SESSION_COOKIE_NAME},
    Config, Request, SessionRepository, SessionStore,
};

use log::{debug, error, info, warn};
use tokio::{
    io::{AsyncBufReadExt, BufReader as TokioBufReader},
    net::TcpListener,
    runtime::Builder,
    sync::Notify,
};

use std::{
    io::{BufReader, Write},
    net::{Ipv4Addr, SocketAddrV4, TcpStream},
    sync::{
        atomic::{AtomicBool, AtomicU32, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

const BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request\r\nContent-Length: 11\r\n\r\nBad Request";

fn main() {
    // 1. 初始化日志系统：通过外部 YAML 配置级别与输出目的地
    if let Err(e) = log4rs::init_file("config/log4rs.yaml", Default::default()) {
        eprintln!("无法初始化日志系统：{}", e);
    }

    // 2. 环境配置加载
    let config = match Config::from_toml("config/development.toml") {
        Ok(config) => {
            info!("配置文件已载入");
            config
        }
        Err(e) => {
            warn!("{}，使用默认配置", e);
            Config::new()
        }
    };

    // 3. 根据配置文件分配工作线程数
    let runtime = match Builder::new_multi_thread()
        .worker_threads(config.worker_threads())
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("无法构建Tokio运行时：{}", e);
            return;
        }
    };

    runtime.block_on(serve(config));
}

async fn serve(config: Config) {
    let port = config.port();
    let address = match config.local() {
        true => Ipv4Addr::new(127, 0, 0, 1),
        false => Ipv4Addr::new(0, 0, 0, 0),
    };
    info!("服务端将在{}:{}上监听Socket连接", address, port);

    let listener = match TcpListener::bind(SocketAddrV4::new(address, port)).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("无法绑定端口：{}，错误：{}", port, e);
            return;
        }
    };
    info!("端口{}绑定完成", port);

    let store = SessionStore::new();
    let read_timeout = config.read_timeout();
    let shutdown = Arc::new(Notify::new());
    let shutdown_flag = Arc::new(AtomicBool::new(false));
    let active_connection = Arc::new(AtomicU32::new(0));

    tokio::spawn(console(
        Arc::clone(&shutdown),
        Arc::clone(&shutdown_flag),
        Arc::clone(&active_connection),
        store.clone(),
    ));

    let mut id: u128 = 0;

    // 主事件循环 (Accept Loop)
    while !shutdown_flag.load(Ordering::SeqCst) {
        let accepted = tokio::select! {
            accepted = listener.accept() => accepted,
            _ = shutdown.notified() => break,
        };
        let (stream, addr) = match accepted {
            Ok(pair) => pair,
            Err(e) => {
                warn!("接受连接失败：{}", e);
                continue;
            }
        };
        debug!("[ID{}]新的连接：{}", id, addr);

        let stream = match stream.into_std() {
            Ok(stream) => stream,
            Err(e) => {
                error!("[ID{}]无法转换为阻塞式流：{}", id, e);
                continue;
            }
        };

        let store = store.clone();
        let active_connection = Arc::clone(&active_connection);
        tokio::task::spawn_blocking(move || {
            active_connection.fetch_add(1, Ordering::SeqCst);
            handle_connection(stream, id, &store, read_timeout);
            active_connection.fetch_sub(1, Ordering::SeqCst);
        });
        id += 1;
    }
    info!("主循环接收到停机指令，正在退出...");
}

/// 后台管理控制台，从标准输入读取指令
async fn console(
    shutdown: Arc<Notify>,
    shutdown_flag: Arc<AtomicBool>,
    active_connection: Arc<AtomicU32>,
    store: SessionStore,
) {
    let mut reader = TokioBufReader::new(tokio::io::stdin());
    let mut input = String::new();
    loop {
        input.clear();
        match reader.read_line(&mut input).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        match input.trim() {
            "stop" => {
                shutdown_flag.store(true, Ordering::SeqCst);
                shutdown.notify_one();
                println!("停机指令已激活，服务器即将关闭...");
                break;
            }
            "help" => {
                println!("== Session Server Help ==");
                println!("stop   - 发出停机信号");
                println!("status - 查看活跃连接数与会话数");
                println!("help   - 显示此帮助信息");
                println!("=========================");
            }
            "status" => {
                println!("== Session Server 状态 ==");
                println!("当前活跃连接数: {}", active_connection.load(Ordering::SeqCst));
                println!("当前会话数: {}", store.len());
                println!("=========================");
            }
            cmd => println!("无效的命令：{}", cmd),
        }
    }
}

/// 阻塞式地解析单个连接上的请求并写回响应
fn handle_connection(
    stream: std::net::TcpStream,
    id: u128,
    store: &SessionStore,
    read_timeout: Option<Duration>,
) {
    if let Err(e) = prepare_stream(&stream, read_timeout) {
        error!("[ID{}]设置TCPStream失败: {}", id, e);
        return;
    }
    let read_half = match stream.try_clone() {
        Ok(s) => s,
        Err(e) => {
            error!("[ID{}]无法复制TCPStream: {}", id, e);
            return;
        }
    };

    let start_time = Instant::now();
    let mut reader = BufReader::new(read_half);
    let response = match Request::parse(&mut reader, store, id) {
        Ok(request) => {
            info!(
                "[ID{}] {}, {}, {}, session={}",
                id,
                request.version(),
                request.uri(),
                request.method(),
                request.session().id(),
            );
            render(&request)
        }
        Err(e) => {
            warn!("[ID{}]{}，返回400", id, e);
            BAD_REQUEST.to_string()
        }
    };
    debug!(
        "[ID{}]请求处理完成，服务端用时{}ms。",
        id,
        start_time.elapsed().as_millis()
    );

    let mut writer = stream;
    if let Err(e) = writer
        .write_all(response.as_bytes())
        .and_then(|_| writer.flush())
    {
        error!("[ID{}]发送响应失败: {}", id, e);
    }
}

fn prepare_stream(stream: &TcpStream, read_timeout: Option<Duration>) -> std::io::Result<()> {
    stream.set_nonblocking(false)?;
    stream.set_read_timeout(read_timeout)
}

/// 纯文本回显；客户端携带的会话 Cookie 与实际会话不一致（缺失或为空）时下发 `Set-Cookie`
fn render(request: &Request) -> String {
    let body = format!("{} {}\n", request.method(), request.uri());
    let mut response = format!("{} 200 OK{}", HTTP_VERSION, CRLF);
    response.push_str(&format!("Content-Type: text/plain;charset=utf-8{}", CRLF));
    response.push_str(&format!("Content-Length: {}{}", body.len(), CRLF));
    if request.cookies().session_id() != Some(request.session().id()) {
        response.push_str(&format!(
            "Set-Cookie: {}={}{}",
            SESSION_COOKIE_NAME,
            request.session().id(),
            CRLF
        ));
    }
    response.push_str(CRLF);
    response.push_str(&body);
    response
}
