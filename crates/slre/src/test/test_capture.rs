// Tests for capture slots
use crate::*;
use pretty_assertions::assert_eq;

const UNSET: Capture = Capture { start: 99, len: 99 };

fn captured(pattern: &str, subject: &str, slots: usize) -> (Result<usize>, Vec<String>) {
    let mut caps = vec![Capture::default(); slots];
    let n = matches(pattern, subject.as_bytes(), Some(&mut caps));
    let texts = caps
        .iter()
        .map(|cap| String::from_utf8_lossy(cap.as_bytes(subject.as_bytes())).into_owned())
        .collect();
    (n, texts)
}

#[test]
fn test_single_group() {
    assert_eq!(captured("^(te)", "tenacity subdues all", 1), (Ok(2), vec!["te".into()]));
    assert_eq!(captured("(bc)", "abcdef", 1), (Ok(3), vec!["bc".into()]));
    assert_eq!(captured(".(d.)", "abcdef", 1), (Ok(5), vec!["de".into()]));
    assert_eq!(captured(r".(d.)\)?", "abcdef", 1), (Ok(5), vec!["de".into()]));
}

#[test]
fn test_group_with_repetition() {
    assert_eq!(captured("(.+)", "123", 1), (Ok(3), vec!["123".into()]));
    assert_eq!(captured("(2.+)", "123", 1), (Ok(3), vec!["23".into()]));
    assert_eq!(captured("(.+2)", "123", 1), (Ok(2), vec!["12".into()]));
}

#[test]
fn test_multiple_groups() {
    assert_eq!(
        captured("(.)(.)", "123", 2),
        (Ok(2), vec!["1".into(), "2".into()])
    );
    assert_eq!(
        captured(r"(\d+)\s+(\S+)", "12 hi", 2),
        (Ok(5), vec!["12".into(), "hi".into()])
    );
    assert_eq!(
        captured("(.*(2.))", "123", 2),
        (Ok(3), vec!["123".into(), "23".into()])
    );
}

#[test]
fn test_empty_alternative() {
    assert_eq!(captured("(|.c)", "abc", 1), (Ok(3), vec!["bc".into()]));
}

#[test]
fn test_nested_alternative_groups() {
    let mut caps = [UNSET; 3];
    assert_eq!(matches("((a)|(b))", b"b", Some(&mut caps)), Ok(1));
    assert_eq!(caps, [Capture::new(0, 1), UNSET, Capture::new(0, 1)]);
}

#[test]
fn test_branch_inside_sibling_group() {
    // The `|` belongs to the second group, not to the whole pattern
    let mut caps = [UNSET; 3];
    assert_eq!(matches("(a)((b)|c)", b"ac", Some(&mut caps)), Ok(2));
    assert_eq!(caps, [Capture::new(0, 1), Capture::new(1, 1), UNSET]);
}

#[test]
fn test_last_repetition_wins() {
    let mut caps = [Capture::default(); 1];
    assert_eq!(matches("ab(cd)+ef", b"abcdcdef", Some(&mut caps)), Ok(8));
    assert_eq!(caps[0], Capture::new(4, 2));
}

#[test]
fn test_offsets_are_absolute() {
    let mut caps = [Capture::default(); 1];
    assert_eq!(matches("x(y+)", b"aaxyy", Some(&mut caps)), Ok(5));
    assert_eq!(caps[0].start, 3);
    assert_eq!(caps[0].end(), 5);
    assert_eq!(caps[0].range(), 3..5);
}

#[test]
fn test_unmatched_group_left_unwritten() {
    let mut caps = [UNSET; 1];
    assert_eq!(matches("a(x)?b", b"ab", Some(&mut caps)), Ok(2));
    assert_eq!(caps[0], UNSET);
}

#[test]
fn test_earlier_start_offsets_do_not_leak() {
    // At offset 0 the group matches before the attempt fails on 'c'
    let mut caps = [UNSET; 1];
    assert_eq!(matches("(a)?b", b"acb", Some(&mut caps)), Ok(3));
    assert_eq!(caps[0], UNSET);
}

#[test]
fn test_failed_call_leaves_captures() {
    let mut caps = [UNSET; 2];
    assert_eq!(matches("(a)(x)", b"abc", Some(&mut caps)), Err(Error::NoMatch));
    assert_eq!(caps, [UNSET; 2]);
}

#[test]
fn test_capture_array_too_small() {
    let mut caps = [Capture::default(); 1];
    assert_eq!(matches("(a)(b)", b"ab", Some(&mut caps)), Err(Error::Internal));
}

#[test]
fn test_capture_count() {
    assert_eq!(capture_count("abc"), Ok(0));
    assert_eq!(capture_count(r"(a)(b(c))\(d\)"), Ok(3));
    assert_eq!(capture_count("(a"), Err(Error::UnbalancedBrackets));
}

#[test]
fn test_as_bytes_out_of_range() {
    assert_eq!(Capture::new(2, 5).as_bytes(b"abc"), b"");
}
