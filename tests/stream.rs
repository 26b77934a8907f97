//! Incremental feeding: the parser must give the same answers however
//! the request is fragmented, and never rescan consumed bytes.

extern crate netbuf;
extern crate reqparse;

use netbuf::Buf;
use reqparse::{Connection, Discard, Error, HeaderId, Method, ParseStatus,
               Parser, Request};


const PIPELINED: &'static [u8] =
    b"GET /first HTTP/1.1\r\nHost: a\r\n\r\nGET /second HTTP/1.1\r\n\r\n";

fn one_shot(input: &[u8]) -> (Parser, Request, Result<ParseStatus, Error>) {
    let mut parser = Parser::new();
    let mut req = Request::new();
    let result = parser.parse(&mut req, input, &mut Discard);
    (parser, req, result)
}

#[test]
fn byte_by_byte_feed_completes_once() {
    let input = &b"GET /a?b=1 HTTP/1.1\r\nHost: example.com:8080\r\n\
                   Connection: Keep-Alive\r\n\r\n"[..];
    let mut buf = Buf::new();
    let mut parser = Parser::new();
    let mut req = Request::new();
    for (n, b) in input.iter().enumerate() {
        buf.extend(&[*b]);
        let status = parser.parse(&mut req, &buf[..], &mut Discard)
            .expect("prefix of a valid request must not error");
        if n + 1 < input.len() {
            assert_eq!(status, ParseStatus::Partial, "byte {}", n);
        } else {
            assert_eq!(status, ParseStatus::Complete(input.len()));
        }
    }
    assert_eq!(req.method(), Method::Get);
    assert_eq!(req.uri(&buf[..]), &b"/a"[..]);
    assert_eq!(req.query_string(&buf[..]), Some(&b"b=1"[..]));
    assert_eq!(parser.header_value(HeaderId::Host, &buf[..]),
               Some(&b"example.com"[..]));
    assert_eq!(parser.host_port(), Some(8080));
    assert_eq!(parser.connection(), Connection::KeepAlive);
}

#[test]
fn any_split_point_gives_the_same_answer() {
    let input = &b"POST /up?x=y HTTP/1.1\r\nHost: h.example:81\r\n\
                   Content-Length: 4\r\nX-Trace: on\r\n\r\nwxyz"[..];
    let (ref_parser, ref_req, ref_result) = one_shot(input);
    assert_eq!(ref_result, Ok(ParseStatus::Complete(input.len())));

    for k in 0..input.len() + 1 {
        let mut parser = Parser::new();
        let mut req = Request::new();
        let first = parser.parse(&mut req, &input[..k], &mut Discard);
        if k < input.len() {
            assert_eq!(first, Ok(ParseStatus::Partial), "split at {}", k);
        }
        let second = parser.parse(&mut req, input, &mut Discard);
        assert_eq!(second, Ok(ParseStatus::Complete(input.len())),
            "split at {}", k);

        assert_eq!(parser.pos(), ref_parser.pos());
        assert_eq!(req.method(), ref_req.method());
        assert_eq!(req.uri(input), ref_req.uri(input));
        assert_eq!(req.query_string(input), ref_req.query_string(input));
        assert_eq!(req.version(), ref_req.version());
        assert_eq!(parser.content_length(), ref_parser.content_length());
        assert_eq!(parser.host_port(), ref_parser.host_port());
        assert_eq!(parser.header_value(HeaderId::Host, input),
                   ref_parser.header_value(HeaderId::Host, input));
        assert_eq!(parser.extra_headers().len(),
                   ref_parser.extra_headers().len());
    }
}

#[test]
fn splits_inside_errors_report_the_same_error() {
    let input = &b"GET / HTTP/1.1\r\nHost: x:123456\r\n\r\n"[..];
    let (_parser, _req, ref_result) = one_shot(input);
    assert_eq!(ref_result, Err(Error::BadHostPort));

    for k in 0..input.len() + 1 {
        let mut parser = Parser::new();
        let mut req = Request::new();
        let mut verdicts = Vec::new();
        verdicts.push(parser.parse(&mut req, &input[..k], &mut Discard));
        if verdicts[0].is_ok() {
            verdicts.push(parser.parse(&mut req, input, &mut Discard));
        }
        assert_eq!(verdicts.pop().unwrap(), Err(Error::BadHostPort),
            "split at {}", k);
    }
}

#[test]
fn no_byte_is_examined_twice() {
    // feeding in three uneven chunks must leave the resume point exactly
    // at the end of the request, with every position visited once
    let input = &b"GET /p HTTP/1.1\r\nUser-Agent: probe\r\n\r\n"[..];
    let mut parser = Parser::new();
    let mut req = Request::new();
    let mut last_pos = 0;
    for end in [3, 17, input.len()].iter() {
        let status = parser.parse(&mut req, &input[..*end], &mut Discard)
            .unwrap();
        assert!(parser.pos() >= last_pos);
        assert!(parser.pos() <= *end);
        last_pos = parser.pos();
        if *end == input.len() {
            assert_eq!(status, ParseStatus::Complete(input.len()));
        }
    }
    assert_eq!(parser.pos(), input.len());
}

#[test]
fn fragmented_body_is_credited_incrementally() {
    let head = &b"POST /u HTTP/1.1\r\nContent-Length: 10\r\n\r\n"[..];
    let mut buf = Buf::new();
    buf.extend(head);
    let mut parser = Parser::new();
    let mut req = Request::new();
    assert_eq!(parser.parse(&mut req, &buf[..], &mut Discard),
               Ok(ParseStatus::Partial));
    assert_eq!(parser.body_received(), 0);

    buf.extend(b"01234");
    assert_eq!(parser.parse(&mut req, &buf[..], &mut Discard),
               Ok(ParseStatus::Partial));
    assert_eq!(parser.body_received(), 5);

    buf.extend(b"56789");
    assert_eq!(parser.parse(&mut req, &buf[..], &mut Discard),
               Ok(ParseStatus::Complete(buf.len())));
    assert_eq!(parser.body_received(), 10);
    assert_eq!(parser.content_length(), 10);
}

#[test]
fn pipelined_request_leaves_the_tail_in_the_buffer() {
    let mut buf = Buf::new();
    buf.extend(PIPELINED);
    let mut parser = Parser::new();
    let mut req = Request::new();
    let status = parser.parse(&mut req, &buf[..], &mut Discard).unwrap();
    let consumed = match status {
        ParseStatus::Complete(n) => n,
        ParseStatus::Partial => panic!("first request must complete"),
    };
    assert_eq!(req.uri(&buf[..]), &b"/first"[..]);
    assert!(consumed < buf.len());

    // drain the first request and run a fresh parser over the rest
    buf.consume(consumed);
    let mut parser = Parser::new();
    let mut req = Request::new();
    let status = parser.parse(&mut req, &buf[..], &mut Discard).unwrap();
    assert_eq!(status, ParseStatus::Complete(buf.len()));
    assert_eq!(req.uri(&buf[..]), &b"/second"[..]);
}
