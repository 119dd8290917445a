//! AFL++ fuzz target for `segspan`.
//!
//! This binary is stdin-driven, so it can be used with AFL++.
//! Build and run it via `cargo-afl`:
//!
//! ```bash
//! cargo install cargo-afl
//!
//! cargo afl build --release --features afl_fuzz --bin segspan_afl_build
//!
//! mkdir -p fuzz/afl/out
//!
//! cargo afl fuzz \
//!   -i fuzz/afl/in \
//!   -o fuzz/afl/out \
//!   target/release/segspan_afl_build
//! ```
//!
//! Input layout: the first byte selects the separator policy and offset unit,
//! the rest is split on `\n` into segments. Every segment gets one annotation.
//!
//! Rust panics normally unwind and exit with a non-crashing status code.
//! AFL++ only treats crashes as signals/aborts. We therefore catch any unwind
//! and turn it into `abort()`.

use std::io::Read;

use segspan::SpanBuilder;
use segspan::rich::*;
use segspan::render;

const MAX_INPUT_LEN: usize = 1_000_000; // 1MB guardrail; AFL++ will typically cap this anyway.

fn check_ranges(rich: &RichText<Annotation>) {
    let len = rich.len();
    let mut last_start = 0;
    for r in &rich.ranges {
        assert!(r.span.start <= r.span.end, "invalid span: {:?}", r.span);
        assert!(r.span.end <= len, "span out of bounds (len={len}): {:?}", r.span);
        assert!(r.span.start >= last_start, "ranges out of order: {:?}", r.span);
        assert!(rich.byte_span(r.span).is_some(), "span splits a character: {:?}", r.span);
        last_start = r.span.start;
    }
}

fn run_one_input(data: &[u8]) {
    if data.len() > MAX_INPUT_LEN || data.is_empty() {
        return;
    }

    let flags = data[0];
    let unit = match flags % 3 {
        0 => SpanUnit::Char,
        1 => SpanUnit::Byte,
        _ => SpanUnit::Utf16,
    };

    // lossy conversion keeps the harness total for arbitrary bytes.
    let src = String::from_utf8_lossy(&data[1..]).to_string();
    let segments: Vec<&str> = src.split('\n').collect();

    let mut builder: SpanBuilder<Annotation> =
        SpanBuilder::new(segments.iter().copied(), flags & 0x80 != 0).with_unit(unit);
    for i in 0..builder.len() {
        builder.underline([i]).unwrap();
    }

    let rich = builder.build().unwrap();
    assert_eq!(rich.ranges.len(), builder.len());
    check_ranges(&rich);

    // JSON round-trip must never panic.
    let json = serde_json::to_vec(&rich).unwrap();
    let back: RichText<Annotation> = serde_json::from_slice(&json).unwrap();
    assert_eq!(back, rich);

    // rendering should never panic.
    let _html = render::render_html(&back);
}

fn main() {
    let mut data = Vec::new();
    std::io::stdin().read_to_end(&mut data).unwrap();

    // convert any panic into an abort().
    if std::panic::catch_unwind(|| run_one_input(&data)).is_err() {
        std::process::abort();
    }
}
