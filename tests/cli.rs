use std::fs;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("aoc2023").unwrap()
}

fn write_input(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("input.txt");
    fs::write(&path, contents).expect("write input");
    path.to_string_lossy().into_owned()
}

const DAY17: &str = "\
2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

#[test]
fn solves_day17() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, DAY17);

    cmd()
        .args(["17", "--input", &input])
        .assert()
        .success()
        .stdout("P1: 102, P2: 94\n");
}

#[test]
fn reads_input_txt_from_working_directory() {
    let dir = TempDir::new().unwrap();
    write_input(&dir, "1abc2\npqr3stu8vwx\na1b2c3d4e5f\ntreb7uchet\n");

    cmd()
        .current_dir(dir.path())
        .arg("1")
        .assert()
        .success()
        .stdout(contains("P1: 142"));
}

#[test]
fn single_answer_day() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "jqt: rhn xhk nvd\nrsh: frs pzl lsr\nxhk: hfx\ncmg: qnr nvd lhk bvb\n\
         rhn: xhk bvb hfx\nbvb: xhk hfx\npzl: lsr hfx nvd\nqnr: nvd\n\
         ntq: jqt hfx bvb xhk\nnvd: lhk\nlsr: lhk\nrzs: qnr cmg lsr rsh\nfrs: qnr lhk lsr\n",
    );

    cmd()
        .args(["25", "-i", &input])
        .assert()
        .success()
        .stdout("P1: 54\n");
}

#[test]
fn params_from_environment() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "...........\n.....###.#.\n.###.##..#.\n..#.#...#..\n....#.#....\n.##..S####.\n\
         .##..#...#.\n.......##..\n.##.#.####.\n.##..##.##.\n...........\n",
    );

    cmd()
        .env("AOC_DAY21_STEPS", "6")
        .env("AOC_DAY21_TARGET_STEPS", "10")
        .args(["21", "-i", &input])
        .assert()
        .success()
        .stdout("P1: 16, P2: 50\n");
}

#[test]
fn unknown_day_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "x\n");

    cmd()
        .args(["3", "-i", &input])
        .assert()
        .failure()
        .stderr(contains("no solver for day 3"));
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");

    cmd()
        .args(["17", "-i"])
        .arg(&missing)
        .assert()
        .failure()
        .stderr(contains("failed to read input"));
}

#[test]
fn malformed_input_reports_the_cell() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "12\n3x\n");

    cmd()
        .args(["17", "-i", &input])
        .assert()
        .failure()
        .stderr(contains("unexpected cell 'x'"));
}
