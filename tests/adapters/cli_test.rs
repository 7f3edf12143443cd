//! REPL behaviour over in-memory input and output.

use adcraft::adapters::cli::run_repl;
use adcraft::collector::{Collector, Step};
use tokio::io::BufReader;

use crate::support::authorized_mock;

async fn run(script: &str) -> (Step, String, Collector) {
    let mut collector = Collector::new(authorized_mock().await);
    let mut output = Vec::new();
    let step = run_repl(&mut collector, BufReader::new(script.as_bytes()), &mut output)
        .await
        .expect("repl should run");
    let text = String::from_utf8(output).expect("utf-8 output");
    (step, text, collector)
}

#[tokio::test]
async fn completed_session_prints_final_payload() {
    let (step, text, collector) =
        run("Summer Sale\nTraffic\n50% off today!\nshop\nno music\n").await;

    assert_eq!(step, Step::Complete);
    assert!(text.contains("AD CAMPAIGN CREATION ASSISTANT"));
    assert!(text.contains("🤖 Assistant: 👋 Hi!"));
    assert!(text.contains("📦 FINAL AD PAYLOAD (JSON)"));
    assert!(text.contains("\"campaign_name\": \"Summer Sale\""));
    assert!(text.contains("\"cta\": \"Shop Now\""));
    assert!(text.contains("\"music_id\": null"));
    assert!(collector.payload().is_some());
}

#[tokio::test]
async fn input_after_completion_is_not_read() {
    let (step, text, collector) =
        run("Summer Sale\nTraffic\n50% off today!\nshop\n3\nquit\n").await;

    assert_eq!(step, Step::Complete);
    assert!(!text.contains("Goodbye"));
    assert_eq!(collector.transcript().len(), 12);
}

#[tokio::test]
async fn blank_lines_are_skipped() {
    let (_, _, collector) = run("\n   \nSummer Sale\n\n").await;

    assert_eq!(collector.step(), Step::CollectObjective);
    assert_eq!(collector.draft().campaign_name.as_deref(), Some("Summer Sale"));
    assert_eq!(collector.transcript().len(), 4);
}

#[tokio::test]
async fn end_of_input_stops_without_payload() {
    let (step, text, collector) = run("Summer Sale\n").await;

    assert_eq!(step, Step::CollectObjective);
    assert!(text.contains("Input closed. Campaign creation cancelled."));
    assert!(!text.contains("FINAL AD PAYLOAD"));
    assert!(collector.payload().is_none());
}

#[tokio::test]
async fn quit_cancels() {
    let (step, text, _) = run("Summer Sale\nquit\nTraffic\n").await;

    assert_eq!(step, Step::Cancelled);
    assert!(text.contains("Goodbye! Campaign creation cancelled."));
    assert!(!text.contains("Objective set to"));
}
