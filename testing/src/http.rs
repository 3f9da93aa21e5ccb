use std::{
    io::{
        BufRead,
        BufReader,
        Write,
    },
    net::TcpListener,
    thread::{
        self,
        JoinHandle,
    },
};

/// Accept a single connection on a loopback port and answer it with a
/// 404, handing back the head of the request that was received.
///
/// Returns the base url of the listener along with the handle of the
/// serving thread.
pub fn capture_request() -> anyhow::Result<(String, JoinHandle<anyhow::Result<String>>)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let base = format!("http://{}", listener.local_addr()?);
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept()?;
        let mut reader = BufReader::new(stream.try_clone()?);
        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }
        stream.write_all(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
        )?;
        Ok(head)
    });
    Ok((base, handle))
}

/// The values of every header named `name` in a captured request head.
pub fn header_values<'a>(head: &'a str, name: &str) -> Vec<&'a str> {
    head.lines()
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .filter(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim())
        .collect()
}
