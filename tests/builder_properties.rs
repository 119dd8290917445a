use std::cell::Cell;
use std::rc::Rc;

use segspan::rich::{RichText, Span};
use segspan::{Error, SpanBuilder};

fn spans<A>(rich: &RichText<A>) -> Vec<Span> {
    rich.ranges.iter().map(|r| r.span).collect()
}

#[test]
fn offsets_without_separator() {
    let builder: SpanBuilder<()> = SpanBuilder::new(["ab", "cd", "e"], false);
    let starts: Vec<usize> = builder.segment_spans().iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![0, 2, 4]);
    assert_eq!(builder.build().unwrap().text, "abcde");
}

#[test]
fn offsets_with_separator() {
    let builder: SpanBuilder<()> = SpanBuilder::new(["ab", "cd", "e"], true);
    let starts: Vec<usize> = builder.segment_spans().iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![0, 3, 6]);
    assert_eq!(builder.build().unwrap().text, "ab cd e");
}

#[test]
fn separator_belongs_to_the_preceding_segment_except_at_the_end() {
    let mut builder: SpanBuilder<&'static str> = SpanBuilder::new(["a", "b", "c"], true);
    builder.add_annotation([0, 1, 2], || "x").unwrap();

    let rich = builder.build().unwrap();
    assert_eq!(
        spans(&rich),
        vec![Span::new(0, 2), Span::new(2, 4), Span::new(4, 5)]
    );
    let covered: Vec<&str> = rich
        .ranges
        .iter()
        .map(|r| rich.slice(r.span).unwrap())
        .collect();
    assert_eq!(covered, vec!["a ", "b ", "c"]);
}

#[test]
fn annotations_on_one_index_accumulate_in_order() {
    let mut builder: SpanBuilder<&'static str> = SpanBuilder::new(["ab", "cd"], true);
    builder.add_annotation([1], || "first").unwrap();
    builder.add_annotation([0], || "zero").unwrap();
    builder.add_annotation([1], || "second").unwrap();

    let rich = builder.build().unwrap();
    let got: Vec<(Span, &str)> = rich.ranges.iter().map(|r| (r.span, r.annotation)).collect();
    assert_eq!(
        got,
        vec![
            (Span::new(0, 3), "zero"),
            (Span::new(3, 5), "first"),
            (Span::new(3, 5), "second"),
        ]
    );
}

#[test]
fn multi_index_registration_creates_one_instance_per_index() {
    let calls = Rc::new(Cell::new(0u32));
    let mut builder: SpanBuilder<Rc<Cell<u32>>> = SpanBuilder::new(["a", "b", "c"], false);

    let counter = Rc::clone(&calls);
    builder
        .add_annotation([0, 2], move || {
            counter.set(counter.get() + 1);
            Rc::new(Cell::new(0))
        })
        .unwrap();

    // nothing runs until build.
    assert_eq!(calls.get(), 0);

    let rich = builder.build().unwrap();
    assert_eq!(calls.get(), 2);
    assert_eq!(spans(&rich), vec![Span::new(0, 1), Span::new(2, 3)]);

    // mutating one instance must not affect the other.
    rich.ranges[0].annotation.set(42);
    assert_eq!(rich.ranges[1].annotation.get(), 0);
    assert!(!Rc::ptr_eq(&rich.ranges[0].annotation, &rich.ranges[1].annotation));
}

#[test]
fn out_of_range_index_is_rejected_without_partial_mutation() {
    let mut builder: SpanBuilder<u8> = SpanBuilder::new(["a", "b", "c"], false);
    assert_eq!(
        builder.add_annotation([5], || 1),
        Err(Error::IndexOutOfRange { index: 5, len: 3 })
    );
    assert_eq!(
        builder.add_annotation([0, 1, 3], || 1),
        Err(Error::IndexOutOfRange { index: 3, len: 3 })
    );

    let rich = builder.build().unwrap();
    assert!(rich.ranges.is_empty());
}

#[test]
fn empty_segment_sequence_is_rejected() {
    let builder: SpanBuilder<u8> = SpanBuilder::new(Vec::<&str>::new(), false);
    assert_eq!(builder.build(), Err(Error::EmptySegmentSequence));
    assert_eq!(
        Error::<std::convert::Infallible>::EmptySegmentSequence.to_string(),
        "cannot build rich text from an empty segment sequence"
    );
}

#[test]
fn empty_segments_produce_zero_width_ranges() {
    let mut builder: SpanBuilder<u8> = SpanBuilder::new(["", "x", ""], false);
    builder.add_annotation([0, 2], || 0).unwrap();

    let rich = builder.build().unwrap();
    assert_eq!(rich.text, "x");
    assert_eq!(spans(&rich), vec![Span::new(0, 0), Span::new(1, 1)]);
}

#[test]
fn repeated_builds_are_equal_but_reinvoke_factories() {
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);

    let mut builder: SpanBuilder<String> = SpanBuilder::new(["ab", "cd"], true);
    builder
        .add_annotation([0, 1], move || {
            counter.set(counter.get() + 1);
            "style".to_string()
        })
        .unwrap();

    let first = builder.build().unwrap();
    let second = builder.build().unwrap();
    assert_eq!(first, second);
    assert_eq!(calls.get(), 4);
}

#[test]
fn factory_errors_propagate_unchanged() {
    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("color `{0}` not found")]
    struct Missing(&'static str);

    let mut builder: SpanBuilder<u32, Missing> = SpanBuilder::new(["a", "b"], false);
    builder.add_annotation([0], || 1).unwrap();
    builder
        .try_add_annotation([1], || Err(Missing("accent")))
        .unwrap();

    let err = builder.build().unwrap_err();
    assert_eq!(err, Error::Annotation(Missing("accent")));
    assert_eq!(err.to_string(), "color `accent` not found");
}

#[test]
fn map_keeps_spans() {
    let mut builder: SpanBuilder<u32> = SpanBuilder::new(["ab", "c"], false);
    builder.add_annotation([0, 1], || 2).unwrap();
    let rich = builder.build().unwrap().map(|n| n * 10);
    assert_eq!(spans(&rich), vec![Span::new(0, 2), Span::new(2, 3)]);
    assert!(rich.ranges.iter().all(|r| r.annotation == 20));
}
