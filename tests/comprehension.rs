use std::cell::RefCell;
use std::rc::Rc;

use expect_test::expect;
use pretty_assertions::assert_eq;
use seqview::{
    ChainView, Error, IntRange, Item, Marker, RangeError, Sequence, SliceView, build_iter,
    build_view,
};

fn drain<T>(iter: impl Iterator<Item = Result<T, Error>>) -> Vec<T> {
    iter.collect::<Result<_, _>>().unwrap()
}

// =============================================================================
// build_iter
// =============================================================================

#[test]
fn iterator_chains_literals_and_splices() {
    let iter = build_iter(vec![
        Item::Chain(Marker::iterator(0..3)),
        Item::Value(3),
        Item::Value(4),
        Item::Chain(Marker::iterator(5..7)),
        Item::Value(7),
    ])
    .unwrap();
    assert_eq!(drain(iter), [0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn iterator_accepts_indexable_splices() {
    let iter = build_iter(vec![
        Item::Chain(Marker::sequence(vec![1, 2])),
        Item::Value(3),
        Item::Chain(Marker::sequence(IntRange::to(4, 6).unwrap())),
    ])
    .unwrap();
    assert_eq!(drain(iter), [1, 2, 3, 4, 5, 6]);
}

#[test]
fn bare_value_cannot_be_chained_into_an_iterator() {
    let err = build_iter(vec![Item::Value(1), Item::Chain(Marker::value(2))]).unwrap_err();
    match err {
        Error::NotIterable { type_name } => assert!(type_name.contains("i32")),
        other => panic!("expected NotIterable, got {other:?}"),
    }
}

#[test]
fn iterator_is_one_shot_and_fused() {
    let mut iter = build_iter(vec![Item::Value(1), Item::Value(2)]).unwrap();
    assert_eq!(iter.next(), Some(Ok(1)));
    assert_eq!(iter.next(), Some(Ok(2)));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn stale_splice_surfaces_mid_iteration() {
    let source = Rc::new(RefCell::new(vec![1, 2, 3]));
    let view = SliceView::new(source.clone(), None, None, None).unwrap();
    let mut iter = build_iter(vec![
        Item::Value(0),
        Item::Chain(Marker::sequence(view)),
    ])
    .unwrap();
    assert_eq!(iter.next(), Some(Ok(0)));
    assert_eq!(iter.next(), Some(Ok(1)));

    source.borrow_mut().push(4);
    assert_eq!(iter.next(), Some(Err(Error::LengthChanged)));
    assert_eq!(iter.next(), None);
}

#[test]
fn raw_splices_follow_the_live_source() {
    // A spliced container (not a view) has no snapshot to invalidate; like
    // iterating a list, growth mid-iteration just yields the new elements.
    let source = Rc::new(RefCell::new(vec![1, 2]));
    let mut iter = build_iter(vec![Item::Chain(Marker::shared(
        source.clone() as Rc<dyn Sequence<i32>>
    ))])
    .unwrap();
    assert_eq!(iter.next(), Some(Ok(1)));
    source.borrow_mut().push(3);
    assert_eq!(iter.next(), Some(Ok(2)));
    assert_eq!(iter.next(), Some(Ok(3)));
    assert_eq!(iter.next(), None);
}

// =============================================================================
// build_view
// =============================================================================

#[test]
fn view_groups_literal_runs() {
    let view = build_view(vec![
        Item::Value(1),
        Item::Value(2),
        Item::Chain(Marker::sequence(vec![3, 4])),
        Item::Value(5),
    ])
    .unwrap();
    // [1, 2] | [3, 4] | [5]
    assert_eq!(view.parts().len(), 3);
    assert_eq!(view.len(), 5);
    assert_eq!(drain(view.iter()), [1, 2, 3, 4, 5]);
}

#[test]
fn view_splices_share_the_source() {
    let source: Rc<dyn Sequence<i32>> = Rc::new(vec![1, 2, 3]);
    let view = build_view(vec![Item::Chain(Marker::shared(source.clone()))]).unwrap();
    assert!(Rc::ptr_eq(&view.parts()[0], &source));
}

#[test]
fn view_rejects_forward_only_splices() {
    let err = build_view(vec![Item::Chain(Marker::iterator(0..3))]).unwrap_err();
    assert!(matches!(err, Error::NotASequence { .. }));
}

#[test]
fn view_rejects_bare_value_splices() {
    let err = build_view(vec![Item::Chain(Marker::value(7))]).unwrap_err();
    match err {
        Error::NotASequence { type_name } => assert!(type_name.contains("i32")),
        other => panic!("expected NotASequence, got {other:?}"),
    }
}

#[test]
fn bounded_markers_are_invalid_everywhere() {
    let bounded = || Marker::sequence(vec![1, 2]).with_bounds(None, Some(1));
    assert_eq!(
        build_view(vec![Item::Chain(bounded())]).unwrap_err(),
        Error::InvalidChainSyntax
    );
    assert_eq!(
        build_iter(vec![Item::Chain(bounded())]).unwrap_err(),
        Error::InvalidChainSyntax
    );
}

#[test]
fn built_views_slice_like_any_other() {
    let view = build_view(vec![
        Item::Chain(Marker::sequence(IntRange::new(0, 3, 1).unwrap())),
        Item::Value(100),
        Item::Chain(Marker::sequence(IntRange::new(5, 7, 1).unwrap())),
    ])
    .unwrap();
    assert_eq!(drain(view.iter()), [0, 1, 2, 100, 5, 6]);

    let stride = view.slice(None, None, Some(2)).unwrap();
    assert_eq!(drain(stride.iter()), [0, 2, 5]);
}

// =============================================================================
// Inclusive ranges as sources
// =============================================================================

#[test]
fn ranges_chain_and_slice() {
    let chain = ChainView::new([
        Rc::new(IntRange::to(1, 3).unwrap()) as Rc<dyn Sequence<i64>>,
        Rc::new(IntRange::to_by(10, 4, -3).unwrap()) as Rc<dyn Sequence<i64>>,
    ]);
    assert_eq!(drain(chain.iter()), [1, 2, 3, 10, 7, 4]);

    let window = chain.slice(Some(1), Some(-1), None).unwrap();
    assert_eq!(drain(window.iter()), [2, 3, 10, 7]);
}

#[test]
fn range_direction_errors() {
    assert_eq!(
        IntRange::to(5, 1),
        Err(RangeError::StepMustBeNegative { first: 5, last: 1 })
    );
    assert_eq!(
        IntRange::spaced(5, 4, 9),
        Err(RangeError::StepMustBePositive { first: 5, last: 9 })
    );
}

// =============================================================================
// Preview rendering
// =============================================================================

#[test]
fn short_views_render_in_full() {
    let view = build_view(vec![
        Item::Chain(Marker::sequence(IntRange::new(0, 3, 1).unwrap())),
        Item::Value(7),
    ])
    .unwrap();
    expect![[r#"<sequence view 4: [0, 1, 2, 7] >"#]].assert_eq(&view.to_string());
}

#[test]
fn long_views_render_head_and_tail() {
    let view = SliceView::new(
        Rc::new((0..100).collect::<Vec<i64>>()),
        None,
        None,
        None,
    )
    .unwrap();
    expect![[r#"<sequence view 100: [0, 1, 2, 3, 4, ..., 96, 97, 98, 99] >"#]]
        .assert_eq(&view.to_string());
}

#[test]
fn boundary_length_renders_in_full() {
    let view = SliceView::new(Rc::new((0..10).collect::<Vec<i64>>()), None, None, None).unwrap();
    expect![[r#"<sequence view 10: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9] >"#]]
        .assert_eq(&view.to_string());
}

#[test]
fn stale_views_render_a_marker() {
    let source = Rc::new(RefCell::new(vec![1, 2, 3]));
    let view = SliceView::new(source.clone(), None, None, None).unwrap();
    source.borrow_mut().push(4);
    expect![[r#"<sequence view 3: <stale> >"#]].assert_eq(&view.to_string());
}
