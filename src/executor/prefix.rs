// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Host-labeled, line-atomic output forwarding.
//!
//! Each session stream is read line by line. A line is labeled with the
//! source host (fixed-width, colored from a small palette) and written to the
//! shared destination while holding its lock, so lines from different hosts
//! can interleave but never tear.

use owo_colors::{AnsiColors, OwoColorize};
use tokio::io::{self, AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};

use super::output_sync::SharedSink;

/// Width the host label is padded to.
pub const LABEL_WIDTH: usize = 15;

/// Colors used to tell hosts apart.
pub const PALETTE: [AnsiColors; 6] = [
    AnsiColors::Red,
    AnsiColors::Green,
    AnsiColors::Yellow,
    AnsiColors::Blue,
    AnsiColors::Magenta,
    AnsiColors::Cyan,
];

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a hash.
pub fn fnv1a32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Palette color for an address. Same address, same color, on every run.
pub fn color_for(address: &str) -> AnsiColors {
    PALETTE[fnv1a32(address.as_bytes()) as usize % PALETTE.len()]
}

/// Build the label prepended to every line from `address`.
pub fn label(address: &str, use_colors: bool) -> String {
    let text = format!("{address:<LABEL_WIDTH$}| ");
    if use_colors {
        text.color(color_for(address)).to_string()
    } else {
        text
    }
}

/// Forwards a byte stream to a shared destination one labeled line at a time.
#[derive(Clone)]
pub struct PrefixWriter {
    prefix: String,
    sink: SharedSink,
}

impl PrefixWriter {
    pub fn new(prefix: String, sink: SharedSink) -> Self {
        Self { prefix, sink }
    }

    /// Writer labeled for `address`.
    pub fn for_host(address: &str, sink: SharedSink, use_colors: bool) -> Self {
        Self::new(label(address, use_colors), sink)
    }

    /// Write one labeled line. `line` must not contain the trailing newline.
    pub async fn write_line(&self, line: &[u8]) -> io::Result<()> {
        let mut labeled = Vec::with_capacity(self.prefix.len() + line.len() + 1);
        labeled.extend_from_slice(self.prefix.as_bytes());
        labeled.extend_from_slice(line);
        labeled.push(b'\n');

        let mut sink = self.sink.lock().await;
        sink.write_all(&labeled).await?;
        sink.flush().await
    }

    /// Drain `reader` until EOF, returning the number of lines forwarded.
    ///
    /// A trailing `\r` (pty output) is dropped. A final line without a
    /// newline is still forwarded, with the newline added.
    pub async fn copy_from<R>(&self, reader: R) -> io::Result<u64>
    where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut line = Vec::new();
        let mut count = 0;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                break;
            }

            if line.last() == Some(&b'\n') {
                line.pop();
            }
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            self.write_line(&line).await?;
            count += 1;
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::output_sync::shared_sink;
    use std::pin::Pin;
    use std::sync::{Arc, Mutex};
    use std::task::{Context, Poll};
    use tokio::io::AsyncWrite;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl AsyncWrite for Capture {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[test]
    fn test_fnv1a32_reference_values() {
        assert_eq!(fnv1a32(b""), 0x811c_9dc5);
        assert_eq!(fnv1a32(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a32(b"foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_color_is_stable() {
        for address in ["10.0.0.1", "10.0.0.2", "web-1.example.com"] {
            assert_eq!(color_for(address), color_for(address));
        }
        let index = fnv1a32(b"10.0.0.1") as usize % PALETTE.len();
        assert_eq!(color_for("10.0.0.1"), PALETTE[index]);
    }

    #[test]
    fn test_label_is_fixed_width() {
        assert_eq!(label("10.0.0.1", false), "10.0.0.1       | ");
        assert_eq!(label("10.100.200.255", false).len(), LABEL_WIDTH + 2);

        // Longer addresses are not truncated
        let long = "very-long-hostname.example.com";
        assert_eq!(label(long, false), format!("{long}| "));
    }

    #[test]
    fn test_colored_label_wraps_plain_label() {
        let colored = label("10.0.0.1", true);
        assert!(colored.starts_with("\x1b["));
        assert!(colored.contains("10.0.0.1       | "));
    }

    #[tokio::test]
    async fn test_copy_from_labels_every_line() {
        let capture = Capture::default();
        let writer = PrefixWriter::for_host("10.0.0.1", shared_sink(capture.clone()), false);

        let input: &[u8] = b"one\r\ntwo\nthree";
        let lines = writer.copy_from(input).await.unwrap();

        assert_eq!(lines, 3);
        assert_eq!(
            capture.text(),
            "10.0.0.1       | one\n10.0.0.1       | two\n10.0.0.1       | three\n"
        );
    }

    #[tokio::test]
    async fn test_copy_from_empty_stream() {
        let capture = Capture::default();
        let writer = PrefixWriter::for_host("10.0.0.1", shared_sink(capture.clone()), false);

        let lines = writer.copy_from(&b""[..]).await.unwrap();

        assert_eq!(lines, 0);
        assert_eq!(capture.text(), "");
    }

    #[tokio::test]
    async fn test_blank_lines_are_kept() {
        let capture = Capture::default();
        let writer = PrefixWriter::for_host("h", shared_sink(capture.clone()), false);

        writer.copy_from(&b"a\n\nb\n"[..]).await.unwrap();

        let text = capture.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "h              | ");
    }
}
