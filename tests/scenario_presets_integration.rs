use std::process::Command;

#[derive(Debug)]
struct Headline {
    required_mw: f64,
    accredited_mw: f64,
    verdict_line: String,
}

#[test]
fn presets_run_via_cli_and_produce_distinct_plans() {
    let baseline = run_and_parse("baseline");
    let hyperscale = run_and_parse("hyperscale");
    let off_grid = run_and_parse("off_grid");

    assert!(
        (baseline.required_mw - hyperscale.required_mw).abs() > 1.0,
        "expected baseline and hyperscale targets to differ: baseline={:.2}, hyperscale={:.2}",
        baseline.required_mw,
        hyperscale.required_mw
    );

    assert!(
        (baseline.required_mw - off_grid.required_mw).abs() > 1.0,
        "expected baseline and off_grid targets to differ: baseline={:.2}, off_grid={:.2}",
        baseline.required_mw,
        off_grid.required_mw
    );

    // off_grid carries larger PV/wind/battery shares than baseline.
    assert!(
        off_grid.accredited_mw > baseline.accredited_mw,
        "expected off_grid to accredit more non-firm MW: off_grid={:.2}, baseline={:.2}",
        off_grid.accredited_mw,
        baseline.accredited_mw
    );

    for preset in [&baseline, &hyperscale, &off_grid] {
        assert!(
            preset.verdict_line.contains("MET"),
            "every preset should print a reliability verdict: {preset:?}"
        );
    }
}

#[test]
fn target_override_changes_the_plan() {
    let stock = run(&["--preset", "baseline"]);
    let bumped = run(&["--preset", "baseline", "--target", "240.0"]);

    let stock_required = parse_metric(&stock, "Required:", "MW");
    let bumped_required = parse_metric(&bumped, "Required:", "MW");
    assert!(
        bumped_required > stock_required,
        "doubled target should raise required MW: {stock_required:.2} -> {bumped_required:.2}"
    );
}

#[test]
fn unknown_preset_exits_nonzero() {
    let output = Command::new(env!("CARGO_BIN_EXE_dc-plan"))
        .args(["--preset", "nonexistent"])
        .output()
        .expect("dc-plan process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"));
}

fn run(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_dc-plan"))
        .args(args)
        .output()
        .expect("dc-plan process should run");

    assert!(
        output.status.success(),
        "plan run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

fn run_and_parse(preset: &str) -> Headline {
    let stdout = run(&["--preset", preset]);
    let verdict_line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with("Reliability target:"))
        .unwrap_or_else(|| panic!("missing verdict line in output: {stdout}"))
        .to_string();

    Headline {
        required_mw: parse_metric(&stdout, "Required:", "MW"),
        accredited_mw: parse_metric(&stdout, "Accredited non-firm:", "MW"),
        verdict_line,
    }
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from line `{line}`"))
}
