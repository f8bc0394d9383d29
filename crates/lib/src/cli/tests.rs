use core::time::Duration;

use super::{
    run_checked, run_expect, CliError, Mode, Opts, Output, OutputEq, OutputKind, Report, Unsolved,
};
use crate::input::{IStr, IStrError};

const INPUT: &[u8] = b"1 2\n3 x\n";

fn pairs(mut input: IStr) -> Result<Vec<(u32, u32)>, IStrError> {
    let mut pairs = Vec::new();

    while let Some(pair) = input.try_line()? {
        pairs.push(pair);
    }

    Ok(pairs)
}

fn opts(args: &[&'static str]) -> anyhow::Result<Opts> {
    Opts::parse_from(args.iter().map(Ok::<_, ()>))
}

#[test]
fn test_parse_opts() {
    let o = opts(&["--bench", "--count", "10", "--warmup", "0", "--json"]).unwrap();

    assert!(matches!(o.mode, Mode::Bench));
    assert_eq!(o.count, Some(10));
    assert_eq!(o.warmup, Some(0));
    assert_eq!(o.time_limit, None);
    assert!(o.json);
    assert!(!o.verbose);

    let o = opts(&["--verbose", "--", "--unknown"]).unwrap();
    assert!(matches!(o.mode, Mode::Default));
    assert!(o.verbose);
}

#[test]
fn test_parse_opts_errors() {
    assert!(opts(&["--bench", "--bench"]).is_err());
    assert!(opts(&["--count"]).is_err());
    assert!(opts(&["--time-limit", "soon"]).is_err());
    assert!(opts(&["--frobnicate"]).is_err());
}

#[test]
fn test_report() {
    let samples = (1..=100).map(Duration::from_millis).collect::<Vec<_>>();
    let report = Report::from_sorted(&samples);

    assert_eq!(report.count, 100);
    assert_eq!(report.min, Duration::from_millis(1));
    assert_eq!(report.max, Duration::from_millis(100));
    assert_eq!(report.p50, Duration::from_millis(50));
    assert_eq!(report.p99, Duration::from_millis(99));
    assert_eq!(report.avg, Duration::from_micros(50500));

    let mut total = Report::default();
    total += &report;
    total += &report;
    assert_eq!(total.count, 200);

    assert_eq!(Report::from_sorted(&[]), Report::default());
}

#[test]
fn test_output_normal() {
    let mut buf = Vec::new();
    let mut o = Output::new(&mut buf, OutputKind::Normal);
    o.answer(format_args!("{:?}", (1135, Unsolved))).unwrap();
    o.info("done").unwrap();

    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "answer: (1135, Not implemented)\ninfo: done\n"
    );
}

#[test]
fn test_output_json() {
    let mut buf = Vec::new();
    let mut o = Output::new(&mut buf, OutputKind::Json);
    o.answer(format_args!("{:?}", (8, 2286))).unwrap();
    o.report(&Report::default()).unwrap();

    let lines = buf
        .split(|&b| b == b'\n')
        .filter(|l| !l.is_empty())
        .map(|l| serde_json::from_slice::<serde_json::Value>(l).unwrap())
        .collect::<Vec<_>>();

    assert_eq!(
        lines[0],
        serde_json::json!({"type": "message", "data": {"kind": "answer", "output": "(8, 2286)"}})
    );
    assert_eq!(lines[1]["type"], "report");
    assert_eq!(lines[1]["data"]["count"], 0);
}

#[test]
fn test_output_eq() {
    assert!((1u32, 2u64).output_eq(&(1u32, 2u64)));
    assert!(!(1u32, 2u64).output_eq(&(1u32, 3u64)));
    assert!((1u32, Unsolved).output_eq(&(1u32, Unsolved)));
    assert!(Some(3usize).output_eq(&Some(3usize)));
    assert!(!Some(3usize).output_eq(&None));
    assert!(String::from("abc").output_eq(&"abc"));
}

#[test]
fn test_cli_error_position() {
    let mut input = IStr::from_static(b"1 2\n3 x\n");
    let original = input;

    input.line::<(u32, u32)>().unwrap();
    let error = input.line::<(u32, u32)>().unwrap_err();

    let error = CliError::cli("inputs/test.txt", original, error);
    let cli = error.downcast_ref::<CliError>().unwrap();

    assert_eq!(cli.pos().to_string(), "2:2-3");
    assert_eq!(cli.to_string(), "inputs/test.txt:2:2-3");
}

#[test]
fn test_run_answer() {
    let mut buf = Vec::new();
    let input = IStr::from_static(b"1 2\n");

    run_checked(&mut buf, &Opts::default(), "inputs/test.txt", input, pairs, |_| Ok(())).unwrap();

    let out = String::from_utf8(buf).unwrap();
    assert!(out.starts_with("answer: [(1, 2)]\ninfo: time: "), "{out}");
}

#[test]
fn test_run_failing_solver() {
    let mut buf = Vec::new();
    let input = IStr::from_static(INPUT);

    let error = run_checked(&mut buf, &Opts::default(), "inputs/test.txt", input, pairs, |_| Ok(()))
        .unwrap_err();

    let cli = error.downcast_ref::<CliError>().unwrap();
    assert_eq!(cli.to_string(), "inputs/test.txt:2:2-3");
    assert!(error.downcast_ref::<IStrError>().is_some());
    assert!(buf.is_empty());
}

#[test]
fn test_run_expect_mismatch() {
    let input = IStr::from_static(b"1 2\n");

    let error = run_expect(&Opts::default(), "inputs/test.txt", input, (1u32, 3u32), |mut input: IStr| {
        input.line::<(u32, u32)>()
    })
    .unwrap_err();

    assert_eq!(error.to_string(), "(1, 2) (value) != (1, 3) (expected)");
}

#[test]
fn test_bench_failing_solver() {
    let opts = opts(&["--bench", "--warmup", "0", "--count", "1"]).unwrap();
    let mut buf = Vec::new();
    let input = IStr::from_static(INPUT);

    run_checked(&mut buf, &opts, "inputs/test.txt", input, pairs, |_| Ok(())).unwrap();

    let out = String::from_utf8(buf).unwrap();
    let error = out.lines().find(|l| l.starts_with("error: ")).unwrap();
    assert!(error.starts_with("error: inputs/test.txt:2:2-3: "), "{out}");
}
