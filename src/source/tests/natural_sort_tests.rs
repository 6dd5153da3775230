use std::cmp::Ordering;

use crate::source::natural_cmp;

#[test]
fn test_numbers_compare_by_value() {
    assert_eq!(natural_cmp("frame2.png", "frame10.png"), Ordering::Less);
    assert_eq!(natural_cmp("frame10.png", "frame9.png"), Ordering::Greater);
    assert_eq!(natural_cmp("a100b", "a99c"), Ordering::Greater);
}

#[test]
fn test_leading_zeros() {
    assert_eq!(natural_cmp("img007", "img7"), Ordering::Greater);
    assert_eq!(natural_cmp("img007", "img8"), Ordering::Less);
}

#[test]
fn test_text_is_case_insensitive() {
    assert_eq!(natural_cmp("Alpha1", "alpha2"), Ordering::Less);
    assert_eq!(natural_cmp("beta", "Alpha"), Ordering::Greater);
}

#[test]
fn test_digits_before_text_and_prefix_first() {
    assert_eq!(natural_cmp("1abc", "abc"), Ordering::Less);
    assert_eq!(natural_cmp("frame", "frame1"), Ordering::Less);
    assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
}

#[test]
fn test_sorting_a_listing() {
    let mut names = vec!["f10.png", "F1.png", "f2.png", "f100.png", "f02b.png"];
    names.sort_by(|a, b| natural_cmp(a, b));
    assert_eq!(names, vec!["F1.png", "f2.png", "f02b.png", "f10.png", "f100.png"]);
}
