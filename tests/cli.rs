use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::env;
use std::path::PathBuf;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("matjip").unwrap();
    cmd.env_remove("MATJIP_DATABASE_URL").env_remove("RUST_LOG");
    cmd
}

fn posts_file(name: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("matjip_{name}_{}.json", uuid::Uuid::new_v4()));
    let posts = r#"[
        {"url": "https://blog.example/1", "content": "상호: 온기카페\n대표 메뉴 라떼가 진해요. 맛 5점", "source": "blog"},
        {"url": "https://blog.example/2", "content": "개인적으로 너무 달아서 별로. 맛 2점", "source": "blog"},
        {"url": "https://kin.example/3", "title": "사진만", "source": "knowledge"}
    ]"#;
    std::fs::write(&path, posts).unwrap();
    path
}

fn database_url() -> String {
    let path = env::temp_dir().join(format!("matjip_cli_{}.db", uuid::Uuid::new_v4()));
    format!("sqlite://{}", path.display())
}

#[test]
fn extract_from_stdin() {
    cmd()
        .args(["extract", "-"])
        .write_stdin("주소: 서울시 강남구\n맛 5점")
        .assert()
        .success()
        .stdout(contains("address: 서울시 강남구"))
        .stdout(contains("taste: 5"));
}

#[test]
fn extract_menu_and_phone() {
    cmd()
        .args(["extract", "-"])
        .write_stdin("메뉴: 시즌 딸기라떼\nhotel 근처 5분 거리")
        .assert()
        .success()
        .stdout(contains("menu: 시즌 딸기라떼"))
        .stdout(contains("phone").not());
}

#[test]
fn extract_json() {
    cmd()
        .args(["--json", "extract", "-"])
        .write_stdin("가성비 2점")
        .assert()
        .success()
        .stdout(contains("\"category\": \"value\""))
        .stdout(contains("\"name\": \"unknown\""));
}

#[test]
fn analyze_batch_file() {
    let path = posts_file("analyze");
    cmd()
        .arg("analyze")
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("평균 별점: 3.5"))
        .stdout(contains("온기카페"))
        .stdout(contains("포스팅 수가 부족"));
    std::fs::remove_file(&path).ok();
}

#[test]
fn analyze_rejects_bad_json() {
    let path = env::temp_dir().join(format!("matjip_bad_{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, "{not json").unwrap();
    cmd().arg("analyze").arg(&path).assert().failure();
    std::fs::remove_file(&path).ok();
}

#[test]
fn import_then_report() {
    let path = posts_file("import");
    let url = database_url();

    cmd()
        .args(["--database-url", &url, "import", "--venue", "온기카페"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("stored 3 posts"));

    cmd()
        .args(["--database-url", &url, "import", "--venue", "온기카페"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("(3 already stored)"));

    cmd()
        .args(["--database-url", &url, "--json", "report", "--venue", "온기카페"])
        .assert()
        .success()
        .stdout(contains("\"overall_score\": 3.5"))
        .stdout(contains("\"post_count\": 2"));

    cmd()
        .args(["--database-url", &url, "venues"])
        .assert()
        .success()
        .stdout(contains("온기카페"));

    std::fs::remove_file(&path).ok();
}

#[test]
fn report_requires_database_url() {
    cmd()
        .args(["report", "--venue", "온기카페"])
        .assert()
        .failure()
        .stderr(contains("MATJIP_DATABASE_URL"));
}
