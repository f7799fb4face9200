use std::{
    io::{BufRead, BufReader, Read, Write},
    net::{SocketAddr, TcpListener},
    thread::{self, JoinHandle},
};

/// A request as it arrived at the loopback listener.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Minimal HTTP/1.1 listener answering `connections` requests, one per
/// connection, with the same status and body.
pub struct LoopbackServer {
    pub addr: SocketAddr,
    handle: JoinHandle<Vec<CapturedRequest>>,
}

impl LoopbackServer {
    pub fn serve(connections: usize, status_line: &'static str, reply: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let handle = thread::spawn(move || {
            (0..connections)
                .map(|_| {
                    let (stream, _) = listener.accept().expect("accept");
                    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

                    let mut request_line = String::new();
                    reader.read_line(&mut request_line).expect("request line");
                    let mut parts = request_line.split_whitespace();
                    let method = parts.next().unwrap_or_default().to_string();
                    let path = parts.next().unwrap_or_default().to_string();

                    let mut headers = Vec::new();
                    loop {
                        let mut line = String::new();
                        reader.read_line(&mut line).expect("header line");
                        let line = line.trim_end();
                        if line.is_empty() {
                            break;
                        }
                        if let Some((name, value)) = line.split_once(':') {
                            headers.push((name.trim().to_string(), value.trim().to_string()));
                        }
                    }

                    let length = headers
                        .iter()
                        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, v)| v.parse::<usize>().ok())
                        .unwrap_or(0);
                    let mut body = vec![0; length];
                    reader.read_exact(&mut body).expect("request body");

                    let mut stream = stream;
                    write!(
                        stream,
                        "HTTP/1.1 {status_line}\r\n\
                         Content-Type: text/plain\r\n\
                         Content-Length: {}\r\n\
                         Connection: close\r\n\r\n{reply}",
                        reply.len()
                    )
                    .expect("write response");
                    stream.flush().expect("flush response");

                    CapturedRequest {
                        method,
                        path,
                        headers,
                        body: String::from_utf8(body).expect("utf-8 body"),
                    }
                })
                .collect()
        });
        Self { addr, handle }
    }

    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    pub fn finish(self) -> Vec<CapturedRequest> {
        self.handle.join().expect("loopback thread")
    }
}
