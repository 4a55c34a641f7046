//! End-to-end lifecycle tests driving the cork binary.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_full_card_lifecycle() {
    let env = TestEnv::new();
    let (_board_id, column_id, card_id) = env.seed_board();

    env.cork()
        .args(["card", "describe", &card_id, "Draft the outline first"])
        .assert()
        .success();
    env.cork()
        .args(["card", "priority", &card_id, "high"])
        .assert()
        .success();
    env.cork()
        .args(["card", "due", &card_id, "2026-09-15", "--time", "17:00"])
        .assert()
        .success();
    env.cork()
        .args(["subtask", "add", &card_id, "outline"])
        .assert()
        .success();

    env.cork()
        .args(["card", "show", &card_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Write spec"))
        .stdout(predicate::str::contains("priority: High"))
        .stdout(predicate::str::contains("due: 2026-09-15 17:00"))
        .stdout(predicate::str::contains("outline"));

    env.cork()
        .args(["card", "toggle", &card_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("completed"));

    // Everything above survives a fresh process
    let snapshot = env.snapshot();
    let card = &snapshot["cards"][0];
    assert_eq!(card["id"], card_id.as_str());
    assert_eq!(card["completed"], true);
    assert_eq!(card["priority"], "High");
    assert_eq!(card["dueDate"], "2026-09-15");
    assert_eq!(snapshot["columns"][0]["id"], column_id.as_str());
    assert_eq!(snapshot["columns"][0]["cardIds"][0], card_id.as_str());
}

#[test]
fn test_move_between_columns() {
    let env = TestEnv::new();
    let (board_id, column_a, card_id) = env.seed_board();
    let column_b = env.cork_json(&["column", "create", &board_id, "Doing"]);
    let column_b = column_b["id"].as_str().unwrap();

    env.cork()
        .args(["card", "move", &card_id, column_b])
        .assert()
        .success();

    let snapshot = env.snapshot();
    let columns = snapshot["columns"].as_array().unwrap();
    let a = columns.iter().find(|c| c["id"] == column_a.as_str()).unwrap();
    let b = columns.iter().find(|c| c["id"] == column_b).unwrap();
    assert_eq!(a["cardIds"].as_array().unwrap().len(), 0);
    assert_eq!(b["cardIds"][0], card_id.as_str());
}

#[test]
fn test_move_to_position_orders_cards() {
    let env = TestEnv::new();
    let (_board_id, column_id, first) = env.seed_board();
    let second = env.cork_json(&["card", "create", &column_id, "Second"]);
    let second = second["id"].as_str().unwrap().to_string();

    env.cork()
        .args(["card", "move", &second, &column_id, "--position", "0"])
        .assert()
        .success();

    let snapshot = env.snapshot();
    let ids = snapshot["columns"][0]["cardIds"].as_array().unwrap();
    assert_eq!(ids[0], second.as_str());
    assert_eq!(ids[1], first.as_str());
}

#[test]
fn test_board_delete_cascades_and_spares_labels() {
    let env = TestEnv::new();
    let (board_id, _column_id, card_id) = env.seed_board();
    let label = env.cork_json(&["label", "create", "Bug", "--colour", "#E34234"]);
    let label_id = label["id"].as_str().unwrap().to_string();
    env.cork()
        .args(["label", "attach", &card_id, &label_id])
        .assert()
        .success();

    env.cork()
        .args(["board", "delete", &board_id, "--yes"])
        .assert()
        .success();

    let snapshot = env.snapshot();
    assert!(snapshot["boards"].as_array().unwrap().is_empty());
    assert!(snapshot["columns"].as_array().unwrap().is_empty());
    assert!(snapshot["cards"].as_array().unwrap().is_empty());
    // Labels are a global pool, the cascade must not touch them
    assert_eq!(snapshot["labels"].as_array().unwrap().len(), 1);
}

#[test]
fn test_label_delete_detaches_from_cards() {
    let env = TestEnv::new();
    let (_board_id, _column_id, card_id) = env.seed_board();
    let label = env.cork_json(&["label", "create", "Bug"]);
    let label_id = label["id"].as_str().unwrap().to_string();
    env.cork()
        .args(["label", "attach", &card_id, &label_id])
        .assert()
        .success();

    env.cork()
        .args(["label", "delete", &label_id, "--yes"])
        .assert()
        .success();

    let snapshot = env.snapshot();
    assert!(snapshot["labels"].as_array().unwrap().is_empty());
    assert!(snapshot["cards"][0]["labels"].as_array().unwrap().is_empty());
    // The card itself survives
    assert_eq!(snapshot["cards"][0]["id"], card_id.as_str());
}

#[test]
fn test_delete_prompt_declined_on_piped_no() {
    let env = TestEnv::new();
    let (board_id, _column_id, _card_id) = env.seed_board();

    env.cork()
        .args(["board", "delete", &board_id])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    let snapshot = env.snapshot();
    assert_eq!(snapshot["boards"].as_array().unwrap().len(), 1);
}

#[test]
fn test_theme_round_trips_through_snapshot() {
    let env = TestEnv::new();
    env.seed_board();
    env.cork().args(["theme", "dark"]).assert().success();
    assert_eq!(env.snapshot()["theme"], "theme-dark");

    env.cork().args(["theme", "light"]).assert().success();
    assert_eq!(env.snapshot()["theme"], "theme-light");

    env.cork()
        .args(["theme", "solarized"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme"));
}

#[test]
fn test_accent_pref_survives_wipe() {
    let env = TestEnv::new();
    env.seed_board();
    env.cork()
        .args(["accent", "#19b9bf"])
        .assert()
        .success();

    env.cork().args(["wipe", "--yes"]).assert().success();

    let snapshot = env.snapshot();
    assert!(snapshot["boards"].as_array().unwrap().is_empty());
    // Preferences live outside the snapshot and survive delete-all
    env.cork()
        .arg("accent")
        .assert()
        .success()
        .stdout(predicate::str::contains("#19b9bf"));
}

#[test]
fn test_background_set_and_clear() {
    let env = TestEnv::new();
    let (board_id, _column_id, _card_id) = env.seed_board();

    env.cork()
        .args(["board", "background", &board_id, "/tmp/bg.png"])
        .assert()
        .success();
    env.cork()
        .args(["board", "blur", &board_id, "8"])
        .assert()
        .success();

    let snapshot = env.snapshot();
    assert_eq!(snapshot["boards"][0]["background"], "/tmp/bg.png");
    assert_eq!(snapshot["boards"][0]["blurAmount"], 8);

    env.cork()
        .args(["board", "background", &board_id, "--clear"])
        .assert()
        .success();
    let snapshot = env.snapshot();
    assert!(snapshot["boards"][0].get("background").is_none());
    assert_eq!(snapshot["boards"][0]["blurAmount"], 0);
}

#[test]
fn test_json_output_mode() {
    let env = TestEnv::new();
    let board = env.cork_json(&["board", "create", "Sprint 1"]);
    assert_eq!(board["name"], "Sprint 1");
    assert!(board["id"].as_str().unwrap().starts_with("board-"));

    let boards = env.cork_json(&["board", "list"]);
    assert_eq!(boards.as_array().unwrap().len(), 1);
}
