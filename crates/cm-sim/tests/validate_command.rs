use cm_sim::commands::validate::verdict;

#[test]
fn valid_degrees_report_vertices_and_stubs() {
    let value = verdict(&[3, 1, 1, 1]);
    assert_eq!(value["valid"], true);
    assert_eq!(value["vertices"], 4);
    assert_eq!(value["stubs"], 6);
}

#[test]
fn odd_sum_reports_the_structured_error() {
    let value = verdict(&[1, 2, 2]);
    assert_eq!(value["valid"], false);
    assert_eq!(value["error"]["family"], "Sequence");
    assert_eq!(value["error"]["detail"]["code"], "odd-sum");
}

#[test]
fn sum_of_huge_degrees_is_rejected_without_panicking() {
    // Each degree fits in i64, but their total exceeds every machine word.
    let value = verdict(&[i64::MAX; 4]);
    assert_eq!(value["valid"], false);
    assert_eq!(value["error"]["detail"]["code"], "stub-overflow");
}

#[test]
fn largest_even_i64_pair_is_counted_exactly() {
    let value = verdict(&[i64::MAX, i64::MAX]);
    assert_eq!(value["valid"], true);
    assert_eq!(value["stubs"], (i64::MAX as u64) * 2);
}
