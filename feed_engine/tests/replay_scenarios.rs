//! End-to-end script scenarios: text in, response lines out.

use feed_common::OutputFormat;
use feed_engine::{AccessCoordinator, ScriptReplayer};
use rstest::rstest;

fn replay_with(coordinator: AccessCoordinator, script: &str) -> Vec<String> {
    let mut replayer = ScriptReplayer::new(coordinator, Vec::new(), OutputFormat::Csv);
    replayer.run(script.as_bytes()).unwrap();
    String::from_utf8(replayer.into_sink())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn replay(script: &str) -> Vec<String> {
    replay_with(AccessCoordinator::new(), script)
}

#[test]
fn test_free_subscriber_reads_equity() {
    let output = replay("P 200 1501449788 1682366923\nS F 101 subscribe 200\nS F 101 get_data 200\n");
    assert_eq!(output, vec!["F,101,200,1501449788.000000,1682366923.000000"]);
}

#[test]
fn test_read_before_anything_published() {
    let output = replay("S P 102 get_data 500\n");
    assert_eq!(output, vec!["P,102,500,invalid_request"]);
}

#[test]
fn test_counted_script_with_bonds() {
    let script = "\
5
P 1001 98.25 4.5
S P bank subscribe 1001
S P bank get_data 1001
P 1001 97.75 4.75
S P bank get_data 1001
";
    let output = replay(script);
    assert_eq!(
        output,
        vec![
            "P,bank,1001,98.250000,4.500000",
            "P,bank,1001,97.750000,4.750000",
        ]
    );
}

#[rstest]
#[case(2000)]
#[case(2500)]
#[case(123456)]
fn test_ids_beyond_bond_range_are_invalid(#[case] id: u64) {
    let script = format!("P {id} 1 1\nS P p subscribe {id}\nS P p get_data {id}\n");
    assert_eq!(replay(&script), vec![format!("P,p,{id},invalid_request")]);
}

#[test]
fn test_last_write_wins_for_every_equity() {
    let mut script = String::new();
    for id in (0..1000).step_by(37) {
        script.push_str(&format!("P {id} {} {}\n", id, id * 2));
        script.push_str(&format!("P {id} {} {}\n", id + 1, id * 3));
        script.push_str(&format!("S P reader subscribe {id}\n"));
        script.push_str(&format!("S P reader get_data {id}\n"));
    }
    let output = replay(&script);
    for (line, id) in output.iter().zip((0..1000u64).step_by(37)) {
        assert_eq!(line, &format!("P,reader,{id},{}.000000,{}.000000", id + 1, id * 3));
    }
}

#[test]
fn test_free_quota_hundred_and_first_call_is_refused() {
    let mut script = String::from("P 10 5 6\nS F f subscribe 10\n");
    for _ in 0..101 {
        script.push_str("S F f get_data 10\n");
    }
    let output = replay(&script);
    assert_eq!(output.len(), 101);
    assert!(output[..100].iter().all(|line| line == "F,f,10,5.000000,6.000000"));
    assert_eq!(output[100], "F,f,10,invalid_request");
}

#[test]
fn test_failed_requests_do_not_consume_quota() {
    let mut script = String::from("S F f get_data 10\nP 10 5 6\nS F f get_data 10\nS F f subscribe 10\n");
    for _ in 0..40 {
        script.push_str("S F f get_data 11\nS F f get_data 2001\nS P f get_data 10\n");
    }
    for _ in 0..100 {
        script.push_str("S F f get_data 10\n");
    }
    let output = replay(&script);
    let successes = output.iter().filter(|line| !line.ends_with("invalid_request")).count();
    assert_eq!(successes, 100);
    assert!(output[output.len() - 100..].iter().all(|line| line == "F,f,10,5.000000,6.000000"));
}

#[test]
fn test_kind_mismatch_is_rejected_and_state_kept() {
    let script = "\
P 10 5 6
S F f subscribe 10
S P f get_data 10
S P f subscribe 11
S F f get_data 10
";
    let output = replay(script);
    assert_eq!(output, vec!["P,f,10,invalid_request", "F,f,10,5.000000,6.000000"]);
}

#[test]
fn test_unknown_kind_letter_is_echoed() {
    let output = replay("P 10 5 6\nS X who subscribe 10\nS X who get_data 10\n");
    assert_eq!(output, vec!["X,who,10,invalid_request"]);
}

#[test]
fn test_configured_free_quota() {
    let script = "P 10 5 6\nS F f subscribe 10\nS F f get_data 10\nS F f get_data 10\nS F f get_data 10\n";
    let output = replay_with(AccessCoordinator::with_free_quota(2), script);
    assert_eq!(output[2], "F,f,10,invalid_request");
    assert_eq!(output.len(), 3);
}

#[rstest]
#[case("S F 101 get_data -5", "F,101,-5,invalid_request")]
#[case("S F 101 get_data 99999999999999999999", "F,101,99999999999999999999,invalid_request")]
#[case("S P 102 get_data abc", "P,102,abc,invalid_request")]
fn test_get_data_with_unparsable_instrument_answers(#[case] line: &str, #[case] expected: &str) {
    assert_eq!(replay(&format!("P 0 1 1\n{line}\n")), vec![expected]);
}

#[test]
fn test_unparsable_instrument_binds_kind() {
    let script = "\
P 3 1 2
S F 7 get_data xyz
S P 7 subscribe 3
S P 7 get_data 3
";
    assert_eq!(replay(script), vec!["F,7,xyz,invalid_request", "P,7,3,invalid_request"]);
}

#[test]
fn test_unknown_action_then_mismatched_kind() {
    let script = "\
P 2 5 6
S F 1 foo 2
S P 1 subscribe 2
S P 1 get_data 2
S F 1 subscribe 2
S F 1 get_data 2
";
    assert_eq!(
        replay(script),
        vec!["P,1,2,invalid_request", "F,1,2,5.000000,6.000000"]
    );
}
