use gapsat::forbidden::ForbiddenRow;
use gapsat::{solve_batch, Clause, Driver, RoundOption, RoundOptions};
use rand::prelude::*;
use std::collections::BTreeSet;
use test_log::test;

fn run(input: &str, options: RoundOptions) -> String {
    let mut driver = Driver::new(input.as_bytes(), Vec::<u8>::new(), options);
    driver.run().unwrap();
    String::from_utf8(driver.into_output()).unwrap()
}

fn run_both(input: &str) -> String {
    let parallel = run(input, RoundOptions::default());
    let sequential = run(input, RoundOptions::sequential());
    assert_eq!(parallel, sequential);
    parallel
}

#[test]
fn single_positive_clause() {
    assert_eq!(run_both("1 2\n\n"), "Result:\n0 1\n1 0\n1 1\n\n");
}

#[test]
fn duplicate_literal() {
    assert_eq!(
        run_both("1 1\n\n"),
        "Result:\nInvalid input, clause (1) repeats literal 1\n\n"
    );
}

#[test]
fn clause_contradiction() {
    assert_eq!(
        run_both("1 -1\n\n"),
        "Result:\nUnsatisfiable, clause (1) contains both 1 and -1\n\n"
    );
}

#[test]
fn arity_mismatch() {
    assert_eq!(
        run_both("1\n-1 2\n\n"),
        "Result:\nInvalid input, clause (1) has 1 literals but clause (2) has 2\n\n"
    );
}

#[test]
fn domain_exhausted() {
    assert_eq!(
        run_both("1 2\n1 -2\n-1 2\n-1 -2\n\n"),
        "Result:\nUnsatisfiable, no head, gap or tail in the forbidden keys\n\n"
    );
}

#[test]
fn head_gap_and_tail() {
    // keys: 1 (0 0 1), 4 (1 0 0), 4 again
    let out = run_both("1 2 -3\n-1 2 3\n-4 5 6\n\n");
    assert_eq!(
        out,
        "Result:\n0 0 0\n0 1 0\n0 1 1\n1 0 1\n1 1 0\n1 1 1\n\n"
    );
}

#[test]
fn zero_tokens_and_garbage_ignored() {
    assert_eq!(run_both("1 x 0 2 0\n\n"), "Result:\n0 1\n1 0\n1 1\n\n");
}

#[test]
fn driver_recovers_after_failures() {
    let out = run_both("1 -1\n\n1\n2 3\n\n-1\n");
    assert_eq!(
        out,
        "Result:\nUnsatisfiable, clause (1) contains both 1 and -1\n\n\
         Result:\nInvalid input, clause (1) has 1 literals but clause (2) has 2\n\n\
         Result:\n0\n\n"
    );
}

#[test]
fn blank_lines_between_batches_are_not_rounds() {
    assert_eq!(
        run_both("\n1\n\n\n-1\n\n\n"),
        "Result:\n1\n\nResult:\n0\n\n"
    );
    assert_eq!(run_both("\n1 2\n\n"), "Result:\n0 1\n1 0\n1 1\n\n");
}

#[test]
fn invalid_utf8_is_ignored_like_garbage() {
    let mut driver = Driver::new(
        &b"1 \xff 2\n\n-1 2\n\n"[..],
        Vec::<u8>::new(),
        RoundOptions::sequential(),
    );
    let stats = driver.run().unwrap();
    assert_eq!(stats.rounds, 2);
    assert_eq!(
        String::from_utf8(driver.into_output()).unwrap(),
        "Result:\n0 1\n1 0\n1 1\n\nResult:\n0 0\n0 1\n1 1\n\n"
    );
}

#[test]
fn arity_ceiling() {
    let mut options = RoundOptions::sequential();
    options.option(RoundOption::MaxArity(2));
    assert_eq!(
        run("1 2 3\n", options),
        "Result:\nInvalid input, arity 3 exceeds the supported maximum of 2\n\n"
    );
}

#[test]
fn prompt_banner() {
    let mut options = RoundOptions::sequential();
    options.option(RoundOption::Prompt(true));
    assert_eq!(
        run("-1\n", options),
        "Enter clause(s) and blank line to finish:\nResult:\n0\n\n\
         Enter clause(s) and blank line to finish:\n"
    );
}

#[test]
fn confirm_stops_on_no() {
    let mut options = RoundOptions::sequential();
    options.option(RoundOption::Confirm(true));
    assert_eq!(
        run("1\n\ny\n-1\n\nn\n1\n\n", options),
        "Result:\n1\n\nAnother round? (y/n)\nResult:\n0\n\nAnother round? (y/n)\n"
    );
}

#[test]
fn small_chunks_keep_order() {
    let mut options = RoundOptions::default();
    options.option(RoundOption::ChunkSize(3));
    let input = "1 2 3 4 5 6\n-1 2 3 4 5 6\n1 -2 -3 -4 -5 -6\n\n";
    assert_eq!(run(input, options), run(input, RoundOptions::sequential()));
}

fn random_clause<R: Rng>(rng: &mut R, arity: usize) -> Vec<i32> {
    (1..=arity as i32)
        .map(|v| if rng.gen::<bool>() { -v } else { v })
        .collect()
}

#[test]
fn random_rounds_cover_domain_exactly_once() {
    let mut rng = thread_rng();
    for _ in 0..200 {
        let arity = rng.gen_range(1, 7);
        let n_clauses = rng.gen_range(1, 1 << arity);
        let values: Vec<Vec<i32>> = (0..n_clauses)
            .map(|_| random_clause(&mut rng, arity))
            .collect();
        let clauses = || -> Vec<Clause> { values.iter().map(|v| Clause::from_dimacs(v)).collect() };

        let round = solve_batch(clauses(), &RoundOptions::default()).unwrap();
        let sequential = solve_batch(clauses(), &RoundOptions::sequential()).unwrap();
        assert_eq!(round.keys(), sequential.keys());
        assert_eq!(round.solution(), sequential.solution());

        let keys = round.keys().as_slice();
        for &key in keys {
            assert_eq!(ForbiddenRow::from_key(key, arity).key(), key);
        }

        let assignments: Vec<u64> = round.solution().assignments().map(|a| a.value()).collect();
        assert!(assignments.windows(2).all(|w| w[0] < w[1]));

        let forbidden: BTreeSet<u64> = keys.iter().copied().collect();
        assert!(assignments.iter().all(|a| !forbidden.contains(a)));
        assert_eq!(
            forbidden.len() + assignments.len(),
            1usize << arity,
            "keys and assignments must partition the domain"
        );
    }
}

#[test]
fn random_rows_round_trip() {
    let mut rng = thread_rng();
    for _ in 0..500 {
        let arity = rng.gen_range(1, 20);
        let values = random_clause(&mut rng, arity);
        let row = ForbiddenRow::from_clause(&Clause::from_dimacs(&values)).unwrap();
        assert_eq!(ForbiddenRow::from_key(row.key(), arity), row);
    }
}

#[test]
fn contradiction_wins_regardless_of_other_clauses() {
    let mut rng = thread_rng();
    for _ in 0..50 {
        let arity = rng.gen_range(2, 6);
        let n_clauses = rng.gen_range(1, 40);
        let bad = rng.gen_range(0, n_clauses);
        let mut input = String::new();
        for i in 0..n_clauses {
            let mut clause = random_clause(&mut rng, arity);
            if i == bad {
                clause[1] = -clause[0];
            }
            let line: Vec<String> = clause.iter().map(|l| l.to_string()).collect();
            input.push_str(&line.join(" "));
            input.push('\n');
        }
        let out = run(&input, RoundOptions::sequential());
        let lines: Vec<&str> = out.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Unsatisfiable, clause ("));
    }
}
