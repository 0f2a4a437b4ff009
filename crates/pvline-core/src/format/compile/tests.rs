//! Tests for directive compilation.

use super::*;

fn lit(s: &str) -> Segment {
    Segment::Literal(s.to_owned())
}

#[test]
fn name_timer_rate_progress() {
    let layout = compile("%N: %t %r %p", Some("input"));
    assert_eq!(
        layout.segments(),
        &[
            Segment::Fixed(Field::Name),
            lit(": "),
            Segment::Fixed(Field::Timer),
            lit(" "),
            Segment::Fixed(Field::Rate),
            lit(" "),
            Segment::Variable(Field::Progress),
        ]
    );
    let expected: FieldSet = [Field::Name, Field::Timer, Field::Rate, Field::Progress]
        .into_iter()
        .collect();
    assert_eq!(layout.fields(), expected);
    assert_eq!(layout.name_label(), "    input:");
}

#[test]
fn empty_string_compiles_to_nothing() {
    let layout = compile("", None);
    assert!(layout.segments().is_empty());
    assert!(layout.fields().is_empty());
}

#[test]
fn trailing_percent_is_literal() {
    let layout = compile("done %", None);
    assert_eq!(layout.segments(), &[lit("done "), lit("%")]);

    let layout = compile("%12", None);
    assert_eq!(layout.segments(), &[lit("%")]);
}

#[test]
fn double_percent_is_literal() {
    let layout = compile("%b %%", None);
    assert_eq!(
        layout.segments(),
        &[Segment::Fixed(Field::Bytes), lit(" "), lit("%")]
    );
}

#[test]
fn unknown_directive_passes_through() {
    let layout = compile("%z%5q", None);
    assert_eq!(layout.segments(), &[lit("%z"), lit("%q")]);
    assert!(layout.fields().is_empty());
}

#[test]
fn non_ascii_after_percent() {
    let layout = compile("%é ok", None);
    assert_eq!(layout.segments(), &[lit("%é"), lit(" ok")]);
}

#[test]
fn last_output_width_is_clamped() {
    assert_eq!(compile("%16A", None).last_output_len(), 16);
    assert_eq!(compile("%A", None).last_output_len(), 1);
    assert_eq!(compile("%0A", None).last_output_len(), 1);
    assert_eq!(compile("%100000A", None).last_output_len(), MAX_LAST_OUTPUT);
    assert_eq!(
        compile("%99999999999999999999999999A", None).last_output_len(),
        MAX_LAST_OUTPUT
    );
    assert!(compile("%8A", None).uses(Field::LastOutput));
}

#[test]
fn width_digits_are_ignored_for_other_fields() {
    let layout = compile("%20t", None);
    assert_eq!(layout.segments(), &[Segment::Fixed(Field::Timer)]);
}

#[test]
fn every_directive_letter() {
    let layout = compile("%p%t%e%I%A%r%a%b%T%N", None);
    assert_eq!(layout.fields().len(), 10);
    assert_eq!(layout.segments().len(), 10);
}

#[test]
fn excess_segments_are_dropped() {
    let format = "%t".repeat(150);
    let layout = compile(&format, None);
    assert_eq!(layout.segments().len(), MAX_SEGMENTS);
}

#[test]
fn literal_runs_count_towards_capacity() {
    let format = "%t-".repeat(60);
    let layout = compile(&format, None);
    assert_eq!(layout.segments().len(), MAX_SEGMENTS);
    assert_eq!(layout.segments()[MAX_SEGMENTS - 1], Segment::Fixed(Field::Timer));
}

#[test]
fn name_label_pads_and_truncates() {
    assert_eq!(name_label("abc"), "      abc:");
    assert_eq!(name_label("exactly-9"), "exactly-9:");
    let long = "x".repeat(800);
    assert_eq!(name_label(&long).len(), 501);
}

#[test]
fn name_label_cuts_multibyte_names_by_bytes() {
    let label = name_label(&"é".repeat(500));
    assert_eq!(label.len(), 501);
    assert_eq!(label.chars().count(), 251);
    assert!(label.ends_with("é:"));

    // A three-byte character straddling the limit is dropped whole.
    let name = format!("{}€", "x".repeat(498));
    assert_eq!(name_label(&name), format!("{}:", "x".repeat(498)));
}

#[test]
fn name_directive_without_name_is_empty() {
    let layout = compile("%N", None);
    assert!(layout.uses(Field::Name));
    assert_eq!(layout.name_label(), "");
}
