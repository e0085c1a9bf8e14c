//! Incremental UTF-8 decoding of streamed response bodies.

use std::fmt;
use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};

use crate::domain::error::DomainError;
use crate::domain::ports::content_generator::AdviceStream;

struct DecodeState<S> {
    inner: Pin<Box<S>>,
    pending: Vec<u8>,
    done: bool,
}

/// Turns raw body chunks into text chunks.
///
/// A multi-byte character split across chunks is held back until its last
/// byte arrives; invalid bytes become U+FFFD. A transport error ends the
/// stream after being yielded once.
pub fn decode_utf8_chunks<S, B, E>(chunks: S) -> AdviceStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    let state = DecodeState {
        inner: Box::pin(chunks),
        pending: Vec::new(),
        done: false,
    };
    stream::unfold(state, |mut st| async move {
        if st.done {
            return None;
        }
        loop {
            match st.inner.next().await {
                Some(Ok(bytes)) => {
                    st.pending.extend_from_slice(bytes.as_ref());
                    let text = take_complete_utf8(&mut st.pending);
                    if !text.is_empty() {
                        return Some((Ok(text), st));
                    }
                }
                Some(Err(e)) => {
                    st.done = true;
                    let err = DomainError::RemoteGeneration(format!(
                        "advice stream interrupted: {e}"
                    ));
                    return Some((Err(err), st));
                }
                None => {
                    st.done = true;
                    if st.pending.is_empty() {
                        return None;
                    }
                    let tail = String::from_utf8_lossy(&st.pending).into_owned();
                    st.pending.clear();
                    return Some((Ok(tail), st));
                }
            }
        }
    })
    .boxed()
}

/// Drains every complete character from `pending`, leaving an incomplete trailing sequence.
fn take_complete_utf8(pending: &mut Vec<u8>) -> String {
    let mut out = String::new();
    let mut start = 0;
    loop {
        match std::str::from_utf8(&pending[start..]) {
            Ok(text) => {
                out.push_str(text);
                start = pending.len();
                break;
            }
            Err(e) => {
                let valid_end = start + e.valid_up_to();
                out.push_str(&String::from_utf8_lossy(&pending[start..valid_end]));
                match e.error_len() {
                    Some(len) => {
                        out.push(char::REPLACEMENT_CHARACTER);
                        start = valid_end + len;
                    }
                    None => {
                        start = valid_end;
                        break;
                    }
                }
            }
        }
    }
    pending.drain(..start);
    out
}
