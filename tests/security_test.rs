// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

#[cfg(test)]
mod security_tests {
    //! # 畸形报文回归测试套件
    //!
    //! 模拟常见的恶意或损坏的输入，验证解析器只会返回 `MalformedRequest`，不会崩溃或挂起。
    //! 覆盖范围包括：
    //! - 请求行结构破坏
    //! - 头部注入与截断
    //! - 非法的 `Content-Length`
    //! - 损坏的 Cookie

    use std::io::{self, BufRead, BufReader, Cursor, Read};

    use jwp_session::{Exception, Request, SessionRepository, SessionStore};

    fn parse_bytes(raw: &[u8], store: &SessionStore) -> Result<Request, Exception> {
        let mut reader = Cursor::new(raw.to_vec());
        Request::parse(&mut reader, store, 0)
    }

    fn assert_malformed(raw: &[u8]) {
        let store = SessionStore::new();
        let result = parse_bytes(raw, &store);
        assert_eq!(
            result.unwrap_err(),
            Exception::MalformedRequest,
            "应被判定为非法请求: {:?}",
            String::from_utf8_lossy(raw)
        );
        assert!(store.is_empty(), "失败的解析不应创建会话");
    }

    /// ## 请求行结构
    #[test]
    fn test_broken_request_lines() {
        let attacks: Vec<&[u8]> = vec![
            b"GET\r\n\r\n",
            b"GET /\r\n\r\n",
            b"GET / HTTP/1.1 extra\r\n\r\n",
            b" / HTTP/1.1\r\n\r\n",
            b"GET / \r\n\r\n",
            b"\r\n\r\n",
            b"",
        ];
        for attack in attacks {
            assert_malformed(attack);
        }
    }

    /// ## 非 UTF-8 字节
    #[test]
    fn test_non_utf8_request_line() {
        assert_malformed(&[0xFF, 0xFE, 0xFD, b'\r', b'\n']);
    }

    #[test]
    fn test_non_utf8_body() {
        let mut raw = b"POST / HTTP/1.1\r\nContent-Length: 3\r\n\r\n".to_vec();
        raw.extend_from_slice(&[0xC3, 0x28, 0xFF]);
        assert_malformed(&raw);
    }

    /// ## 头部行缺少分隔符
    #[test]
    fn test_header_without_colon() {
        assert_malformed(b"GET / HTTP/1.1\r\nHost localhost\r\n\r\n");
        assert_malformed(b"GET / HTTP/1.1\r\nHost:\r\n\r\n");
    }

    /// ## 非法 Content-Length
    #[test]
    fn test_bad_content_length_values() {
        for value in ["abc", "-5", "1.5", "", " 3", "99999999999999999999999"] {
            let raw = format!("POST / HTTP/1.1\r\nContent-Length: {}\r\n\r\na=1", value);
            assert_malformed(raw.as_bytes());
        }
    }

    /// 巨大的 Content-Length 配合很短的流：只读到流结束，不会预分配或挂起
    #[test]
    fn test_huge_content_length_with_short_stream() {
        let store = SessionStore::new();
        let raw = b"POST / HTTP/1.1\r\nContent-Length: 18446744073709551615\r\n\r\na=1";
        let request = parse_bytes(raw, &store).unwrap();
        assert_eq!(request.body_field("a"), Some("1"));
    }

    /// ## 损坏的 Cookie 与表单
    #[test]
    fn test_broken_cookie_and_form() {
        assert_malformed(b"GET / HTTP/1.1\r\nCookie: JSESSIONID\r\n\r\n");
        assert_malformed(b"GET / HTTP/1.1\r\nCookie: a=1; ;b\r\n\r\n");
        assert_malformed(b"POST / HTTP/1.1\r\nContent-Length: 5\r\n\r\nnoeq!");
    }

    /// ## CRLF 注入：值中夹带的 `\r` 不会生成新的头部
    #[test]
    fn test_bare_cr_stays_in_value() {
        let store = SessionStore::new();
        let raw = b"GET / HTTP/1.1\r\nX-Note: a\rInjected: b\r\n\r\n";
        let request = parse_bytes(raw, &store).unwrap();
        assert_eq!(request.header("X-Note"), Some("a\rInjected: b"));
        assert!(request.header("Injected").is_none());
    }

    /// ## 读取过程中的 I/O 错误
    #[test]
    fn test_io_error_mid_headers() {
        struct Broken {
            served: bool,
        }

        impl Read for Broken {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if self.served {
                    return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
                }
                self.served = true;
                let head = b"GET / HTTP/1.1\r\nHost: local";
                buf[..head.len()].copy_from_slice(head);
                Ok(head.len())
            }
        }

        let store = SessionStore::new();
        let mut reader = BufReader::new(Broken { served: false });
        let result = Request::parse(&mut reader as &mut dyn BufRead, &store, 0);
        assert_eq!(result.unwrap_err(), Exception::MalformedRequest);
    }

    /// 客户端伪造的会话 ID 不会读取到其他会话
    #[test]
    fn test_forged_session_id_is_isolated() {
        let store = SessionStore::new();
        let victim = parse_bytes(b"GET / HTTP/1.1\r\n\r\n", &store).unwrap();
        victim.session().set_attribute("user", "admin");

        let forged = parse_bytes(b"GET / HTTP/1.1\r\nCookie: JSESSIONID=guess\r\n\r\n", &store).unwrap();
        assert!(forged.session().attribute("user").is_none());
        assert_eq!(store.len(), 2);
    }

    /// 空的会话 Cookie 不会让不同客户端落入同一个会话
    #[test]
    fn test_empty_session_cookie_is_not_shared() {
        let store = SessionStore::new();
        let first = parse_bytes(b"GET / HTTP/1.1\r\nCookie: JSESSIONID=\r\n\r\n", &store).unwrap();
        first.session().set_attribute("user", "alice");

        let second =
            parse_bytes(b"GET / HTTP/1.1\r\nCookie: JSESSIONID=  \r\n\r\n", &store).unwrap();
        assert!(second.session().attribute("user").is_none());
        assert_ne!(first.session().id(), second.session().id());
        assert!(!first.session().id().is_empty());
        assert!(!second.session().id().is_empty());
        assert!(store.get("").is_none());
        assert_eq!(store.len(), 2);
    }
}
