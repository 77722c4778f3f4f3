//! Property tests for header name canonicalisation and body streaming.

use std::num::NonZeroUsize;

use bytes::Bytes;
use emitframe::{MemoryBody, MemoryChannel, emit::stream_body, headers::canonicalize};
use proptest::prelude::*;

proptest! {
    #[test]
    fn canonicalize_is_idempotent(name in "[A-Za-z0-9-]{0,40}") {
        let once = canonicalize(&name);
        prop_assert_eq!(canonicalize(&once), once);
    }

    #[test]
    fn canonicalize_keeps_segments(name in "[A-Za-z0-9-]{0,40}") {
        let out = canonicalize(&name);
        prop_assert_eq!(out.len(), name.len());
        prop_assert_eq!(out.split('-').count(), name.split('-').count());
        prop_assert!(out.eq_ignore_ascii_case(&name));
        for segment in out.split('-') {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                prop_assert!(!first.is_ascii_lowercase());
            }
            prop_assert!(chars.all(|c| !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn streamed_chunks_reassemble_body(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        chunk in 1usize..512,
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let mut body = MemoryBody::new(data.clone());
        let mut channel = MemoryChannel::new();
        let chunk_size = NonZeroUsize::new(chunk).expect("non-zero");

        let written = runtime
            .block_on(stream_body(&mut channel, &mut body, chunk_size))
            .expect("stream body");

        prop_assert_eq!(written, data.len() as u64);
        prop_assert_eq!(channel.chunks().len(), data.len().div_ceil(chunk));
        prop_assert_eq!(channel.body(), Bytes::from(data));
    }
}
