use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("moo-viz").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("scatter"))
        .stdout(predicate::str::contains("pcp"));
}

#[test]
fn scatter_csv_to_svg() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("nsga2.csv");
    fs::write(&input, "cost,weight\n1,4\n2,2.5\n4,1\n").unwrap();
    let out = dir.path().join("front.svg");

    let mut cmd = Command::cargo_bin("moo-viz").unwrap();
    cmd.env("MOO_VIZ_BACKEND", "agg")
        .arg("scatter")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .args(["--legend", "--title", "Front"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Wrote plot"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("cost"));
}

#[test]
fn pcp_json_with_bounds_to_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("run.json");
    fs::write(&input, "[[1, 2, 3], [3, 2, 1]]").unwrap();
    let out = dir.path().join("pcp.png");

    let mut cmd = Command::cargo_bin("moo-viz").unwrap();
    cmd.arg("pcp")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .args(["--bounds", "0:5", "--locale", "de", "--cmap", "plasma_r"]);
    cmd.assert().success();
    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn mismatching_inputs_fail() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    fs::write(&a, "1,2\n").unwrap();
    fs::write(&b, "1,2,3\n").unwrap();

    let mut cmd = Command::cargo_bin("moo-viz").unwrap();
    cmd.arg("scatter")
        .arg(&a)
        .arg(&b)
        .arg("--out")
        .arg(dir.path().join("x.svg"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("different dimensions"));
}

#[test]
fn nothing_to_do_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.csv");
    fs::write(&a, "1,2\n").unwrap();
    let mut cmd = Command::cargo_bin("moo-viz").unwrap();
    cmd.arg("scatter").arg(&a);
    cmd.assert().failure();
}

#[test]
fn inputs_without_objectives_fail() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.csv");
    let header_only = dir.path().join("header.csv");
    fs::write(&empty, "").unwrap();
    fs::write(&header_only, "cost,weight\n").unwrap();

    for input in [&empty, &header_only] {
        let out = dir.path().join("blank.svg");
        let mut cmd = Command::cargo_bin("moo-viz").unwrap();
        cmd.arg("scatter").arg(input).arg("--out").arg(&out);
        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("no objectives"));
        assert!(!out.exists());
    }
}

#[test]
fn missing_config_file_is_named() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("a.csv");
    fs::write(&input, "1,2\n").unwrap();

    let mut cmd = Command::cargo_bin("moo-viz").unwrap();
    cmd.arg("pcp")
        .arg(&input)
        .arg("--out")
        .arg(dir.path().join("x.svg"))
        .arg("--config")
        .arg(dir.path().join("nope.json"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("reading config"))
        .stderr(predicate::str::contains("nope.json"));
}
