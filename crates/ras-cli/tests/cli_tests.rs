//! Subcommands run against temporary project directories

use pretty_assertions::assert_eq;
use ras_cli::{cli, execute, logging};
use ras_test_utils::{ProjectFixture, FLOW_U01, PROJECT_PRJ};

fn run(args: &[&str]) -> anyhow::Result<(bool, String)> {
    logging::init_test();
    let matches = cli().try_get_matches_from(std::iter::once("ras-edit").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    let ok = execute(&matches, &mut out)?;
    Ok((ok, String::from_utf8(out)?))
}

fn arg(path: &std::path::Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn generate_two_peaks() {
    let fixture = ProjectFixture::new();
    let (project, flow, plan) = (fixture.project(), fixture.flow(1), fixture.plan(1));

    let (ok, out) = run(&[
        "generate",
        "--project",
        arg(&project),
        "--flow-file",
        arg(&flow),
        "--plan-file",
        arg(&plan),
        "--peak",
        "4",
        "--peak",
        "2.5",
    ])
    .unwrap();

    assert!(ok);
    assert!(out.contains("peak 4: flow u02"));
    assert!(out.contains("peak 2.5: flow u03"));
    assert!(out.ends_with("2 scenario(s), 0 failed\n"));
    assert!(fixture.plan(3).is_file());
    assert!(fixture.read(fixture.plan(3)).contains("Plan Title=MW_2o50cms"));
}

#[test]
fn generate_reports_failures_as_json() {
    let fixture = ProjectFixture::new();
    let (project, flow, plan) = (fixture.project(), fixture.flow(1), fixture.plan(1));

    let (ok, out) = run(&[
        "generate",
        "--project",
        arg(&project),
        "--flow-file",
        arg(&flow),
        "--plan-file",
        arg(&plan),
        "--peak=-1",
        "--peak",
        "6",
        "--json",
    ])
    .unwrap();

    assert!(!ok);
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report[0]["ok"], false);
    assert_eq!(report[1]["ok"], true);
    assert_eq!(report[1]["outcome"]["plan"]["extension"], "p02");
}

#[test]
fn generate_rejects_flow_file_from_another_directory() {
    let fixture = ProjectFixture::new();
    let elsewhere = tempfile::tempdir().unwrap();
    let flow = elsewhere.path().join("MW_Valleys.u01");
    std::fs::write(&flow, FLOW_U01).unwrap();

    let err = run(&[
        "generate",
        "--project",
        arg(&fixture.project()),
        "--flow-file",
        arg(&flow),
        "--plan-file",
        arg(&fixture.plan(1)),
        "--peak",
        "4",
    ])
    .unwrap_err();

    assert!(format!("{err:#}").contains("same project directory"));
    assert!(!elsewhere.path().join("MW_Valleys.u02").exists());
    assert!(!fixture.flow(2).exists());
    assert_eq!(fixture.read(fixture.project()), PROJECT_PRJ);
}

#[test]
fn hydrograph_rejects_peak_wider_than_a_column() {
    let err = run(&["hydrograph", "--peak", "123456789"]).unwrap_err();
    assert!(format!("{err:#}").contains("8-character column"));

    let (_, out) = run(&[
        "hydrograph",
        "--peak",
        "99999999",
        "--ramp",
        "0",
        "--steady",
        "1",
    ])
    .unwrap();
    assert_eq!(out, "Flow Hydrograph= 1 \n99999999\n");
}

#[test]
fn patch_with_explicit_keys() {
    let fixture = ProjectFixture::new();
    let plan = fixture.plan(1);

    let (ok, out) = run(&[
        "patch",
        "--file",
        arg(&plan),
        "--set",
        "Flow File=u07",
        "--set",
        "Missing Key=x",
    ])
    .unwrap();

    assert!(ok);
    assert!(out.starts_with(arg(&fixture.plan(2))));
    assert!(out.contains("skipped: 'Missing Key=' not found"));
    assert!(fixture.read(fixture.plan(2)).contains("Flow File=u07\r\n"));
}

#[test]
fn patch_rejects_wrong_role() {
    let fixture = ProjectFixture::new();
    let flow = fixture.flow(1);
    let err = run(&["patch", "--file", arg(&flow), "--set", "A=b", "--role", "p"]).unwrap_err();
    assert!(format!("{err:#}").contains("expected a plan file"));
}

#[test]
fn set_plan_existing_and_missing() {
    let fixture = ProjectFixture::new();
    let project = fixture.project();

    let err = run(&["set-plan", "--project", arg(&project), "--plan", "p99"]).unwrap_err();
    assert!(format!("{err:#}").contains("plan p99 not found"));
    assert_eq!(fixture.read(&project), PROJECT_PRJ);

    let (ok, out) = run(&["set-plan", "--project", arg(&project), "--plan", "p01"]).unwrap();
    assert!(ok);
    assert_eq!(out, "Current plan left unchanged\n");
}

#[test]
fn titles_and_plans() {
    let fixture = ProjectFixture::new();
    let dir = fixture.dir().to_path_buf();

    let (_, titles) = run(&["titles", "--dir", arg(&dir)]).unwrap();
    assert_eq!(
        titles,
        "MW_Valleys.g01: MW_valley\nMW_Valleys.p01: MW_4cms\nMW_Valleys.u01: MW_4cms\n"
    );

    let (_, plans) = run(&["plans", "--dir", arg(&dir), "--json"]).unwrap();
    let plans: serde_json::Value = serde_json::from_str(&plans).unwrap();
    assert_eq!(plans[0]["file_name"], "MW_Valleys.p01");
    assert_eq!(plans[0]["flow_file"], "u01");
    assert_eq!(plans[0]["geom_file"], "g01");
}

#[test]
fn config_file_changes_shape() {
    let fixture = ProjectFixture::new();
    let config = fixture.write("ras-edit.toml", "[hydrograph]\nramp_steps = 0\nsteady_steps = 2\n");

    let (_, out) = run(&["--config", arg(&config), "hydrograph", "--peak", "7"]).unwrap();
    assert_eq!(out, "Flow Hydrograph= 2 \n       7       7\n");
}

#[test]
fn bad_config_is_an_error() {
    let fixture = ProjectFixture::new();
    let config = fixture.write("ras-edit.toml", "unknown = 1\n");
    assert!(run(&["--config", arg(&config), "hydrograph", "--peak", "7"]).is_err());
}
