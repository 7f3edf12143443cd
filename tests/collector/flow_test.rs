//! End-to-end conversation flows and per-field validation.

use adcraft::campaign::{CampaignPayload, Creative};
use adcraft::collector::{Collector, Role, Step, Transition};
use adcraft::rules::{Cta, Objective};

use crate::support::{authorized_mock, drive, last, ScriptedService};

#[tokio::test]
async fn first_turn_greets_and_asks_for_name() {
    let mut collector = Collector::new(authorized_mock().await);
    assert_eq!(collector.step(), Step::Start);

    let outcome = collector.submit_turn("start").await;
    assert_eq!(outcome.step, Step::CollectName);
    assert!(outcome.reply.contains("name your campaign"));
    assert_eq!(
        outcome.transitions,
        vec![Transition {
            from: Step::Start,
            to: Step::CollectName
        }]
    );
}

#[tokio::test]
async fn traffic_campaign_without_music_completes() {
    let mut collector = Collector::new(authorized_mock().await);
    let outcomes = drive(
        &mut collector,
        &["Summer Sale", "Traffic", "50% off today!", "shop", "no music"],
    )
    .await;

    let final_turn = last(&outcomes);
    assert_eq!(final_turn.step, Step::Complete);
    assert!(final_turn.reply.contains("SUCCESS"));
    assert!(final_turn.reply.contains("Campaign ID: campaign_"));
    assert!(final_turn.reply.contains("Status: ACTIVE"));

    let expected = CampaignPayload {
        campaign_name: "Summer Sale".to_owned(),
        objective: Objective::Traffic,
        creative: Creative {
            text: "50% off today!".to_owned(),
            cta: Cta::ShopNow,
            music_id: None,
        },
    };
    assert_eq!(final_turn.payload.as_ref(), Some(&expected));
    assert_eq!(collector.payload(), Some(&expected));
    assert!(collector.receipt().is_some());

    let json = serde_json::to_value(&expected).expect("should serialize");
    assert_eq!(json["creative"]["music_id"], serde_json::Value::Null);
    assert_eq!(json["creative"]["cta"], "Shop Now");
}

#[tokio::test]
async fn music_skip_auto_advances_through_validation() {
    let mut collector = Collector::new(authorized_mock().await);
    let outcomes = drive(
        &mut collector,
        &["Summer Sale", "traffic", "Hello world", "Learn More", "skip"],
    )
    .await;

    assert_eq!(
        last(&outcomes).transitions,
        vec![
            Transition {
                from: Step::CollectMusic,
                to: Step::Validate
            },
            Transition {
                from: Step::Validate,
                to: Step::Complete
            },
        ]
    );
}

#[tokio::test]
async fn short_name_is_rejected_without_mutation() {
    let mut collector = Collector::new(authorized_mock().await);
    let outcomes = drive(&mut collector, &["ab"]).await;

    let outcome = last(&outcomes);
    assert_eq!(outcome.step, Step::CollectName);
    assert!(outcome.transitions.is_empty());
    assert!(outcome.reply.contains("'ab' which is 2 character(s)"));
    assert!(outcome.reply.contains("at least 3 characters"));
    assert!(collector.draft().campaign_name.is_none());
}

#[tokio::test]
async fn every_short_name_stays_on_name_step() {
    let mut collector = Collector::new(authorized_mock().await);
    collector.submit_turn("start").await;

    for input in ["", "a", "ab", "  x  ", "é"] {
        let outcome = collector.submit_turn(input).await;
        assert_eq!(outcome.step, Step::CollectName, "input {input:?}");
        assert!(collector.draft().campaign_name.is_none());
    }
}

#[tokio::test]
async fn objective_is_normalized_and_conversions_warns_about_music() {
    let mut collector = Collector::new(authorized_mock().await);
    let outcomes = drive(&mut collector, &["Launch", "CONVERSIONS"]).await;

    let outcome = last(&outcomes);
    assert_eq!(outcome.step, Step::CollectAdText);
    assert!(outcome.reply.contains("Objective set to: Conversions"));
    assert!(outcome.reply.contains("Music is mandatory for Conversions"));
    assert_eq!(collector.draft().objective, Some(Objective::Conversions));
}

#[tokio::test]
async fn unknown_objective_holds() {
    let mut collector = Collector::new(authorized_mock().await);
    let outcomes = drive(&mut collector, &["Launch", "Awareness"]).await;

    let outcome = last(&outcomes);
    assert_eq!(outcome.step, Step::CollectObjective);
    assert!(outcome.reply.contains("'Awareness' is not a valid objective"));
    assert!(collector.draft().objective.is_none());
}

#[tokio::test]
async fn traffic_objective_has_no_music_note() {
    let mut collector = Collector::new(authorized_mock().await);
    let outcomes = drive(&mut collector, &["Launch", "traffic"]).await;
    assert!(!last(&outcomes).reply.contains("mandatory"));
}

#[tokio::test]
async fn overlong_ad_text_reports_exact_overflow() {
    let mut collector = Collector::new(authorized_mock().await);
    let text = "a".repeat(101);
    let outcomes = drive(&mut collector, &["Launch", "Traffic", &text]).await;

    let outcome = last(&outcomes);
    assert_eq!(outcome.step, Step::CollectAdText);
    assert!(outcome.reply.contains("Length: 101 characters"));
    assert!(outcome.reply.contains("shorten your message by 1 characters"));
    assert!(collector.draft().ad_text.is_none());
}

#[tokio::test]
async fn ad_text_at_limit_is_accepted() {
    let mut collector = Collector::new(authorized_mock().await);
    let text = "b".repeat(100);
    let outcomes = drive(&mut collector, &["Launch", "Traffic", &text]).await;

    assert_eq!(last(&outcomes).step, Step::CollectCta);
    assert_eq!(collector.draft().ad_text.as_deref(), Some(text.as_str()));
}

#[tokio::test]
async fn fuzzy_cta_is_stored_as_canonical_label() {
    let mut collector = Collector::new(authorized_mock().await);
    let outcomes = drive(
        &mut collector,
        &["Launch", "Traffic", "Big sale", "I want to buy stuff"],
    )
    .await;

    let outcome = last(&outcomes);
    assert_eq!(outcome.step, Step::CollectMusic);
    assert!(outcome.reply.contains("CTA set to: Shop Now"));
    assert_eq!(collector.draft().cta, Some(Cta::ShopNow));
}

#[tokio::test]
async fn unmatched_cta_lists_options() {
    let mut collector = Collector::new(authorized_mock().await);
    let outcomes = drive(&mut collector, &["Launch", "Traffic", "Big sale", "xyz"]).await;

    let outcome = last(&outcomes);
    assert_eq!(outcome.step, Step::CollectCta);
    assert!(outcome.reply.contains("'xyz' doesn't match any available CTA"));
    assert!(outcome.reply.contains("• Watch Now"));
}

#[tokio::test]
async fn music_menu_depends_on_objective() {
    let mut traffic = Collector::new(authorized_mock().await);
    let outcomes = drive(&mut traffic, &["Launch", "Traffic", "Big sale", "Download"]).await;
    assert!(last(&outcomes).reply.contains("3. No music"));

    let mut conversions = Collector::new(authorized_mock().await);
    let outcomes = drive(
        &mut conversions,
        &["Launch", "Conversions", "Big sale", "Download"],
    )
    .await;
    let reply = &last(&outcomes).reply;
    assert!(reply.contains("REQUIRED"));
    assert!(!reply.contains("3. No music"));
}

#[tokio::test]
async fn advance_reports_next_step_without_applying_it() {
    let mut collector = Collector::new(authorized_mock().await);
    let advance = collector.advance("anything").await;
    assert_eq!(advance.next, Step::CollectName);
    assert_eq!(collector.step(), Step::Start);
}

#[tokio::test]
async fn cancel_ends_session_without_submission() {
    let service = ScriptedService::new().await;
    let mut collector = Collector::new(service.clone());
    let outcomes = drive(&mut collector, &["Launch", "Exit"]).await;

    let outcome = last(&outcomes);
    assert_eq!(outcome.step, Step::Cancelled);
    assert!(outcome.payload.is_none());
    assert_eq!(service.submits(), 0);

    let after = collector.submit_turn("Traffic").await;
    assert_eq!(after.step, Step::Cancelled);
    assert!(after.transitions.is_empty());
}

#[tokio::test]
async fn completed_session_does_not_resubmit() {
    let service = ScriptedService::new().await;
    let mut collector = Collector::new(service.clone());
    drive(
        &mut collector,
        &["Summer Sale", "Traffic", "50% off today!", "shop", "3"],
    )
    .await;
    assert_eq!(collector.step(), Step::Complete);
    assert_eq!(service.submits(), 1);

    let outcome = collector.submit_turn("submit again").await;
    assert_eq!(outcome.step, Step::Complete);
    assert!(outcome.reply.contains("already been created"));
    assert!(outcome.payload.is_none());
    assert_eq!(service.submits(), 1);
}

#[tokio::test]
async fn transcript_records_both_sides() {
    let mut collector = Collector::new(authorized_mock().await);
    drive(&mut collector, &["Summer Sale"]).await;

    let roles: Vec<Role> = collector.transcript().iter().map(|t| t.role).collect();
    assert_eq!(
        roles,
        vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
    );
    assert_eq!(collector.transcript()[2].text, "Summer Sale");
}

#[tokio::test]
async fn reset_returns_to_start() {
    let mut collector = Collector::new(authorized_mock().await);
    drive(&mut collector, &["Summer Sale", "Traffic"]).await;
    collector.reset();

    assert_eq!(collector.step(), Step::Start);
    assert_eq!(collector.draft(), &adcraft::campaign::CampaignDraft::new());
    assert!(collector.transcript().is_empty());
}
