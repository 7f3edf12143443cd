//! Conversational campaign collector.
//!
//! A [`Collector`] walks one user through a fixed sequence of steps,
//! validating one field per accepted turn:
//!
//! ```text
//! start -> collect_name -> collect_objective -> collect_ad_text
//!       -> collect_cta -> collect_music -> validate -> complete
//! ```
//!
//! A rejected answer keeps the collector on the same step with a corrective
//! message. Questions are answered from the [`HelpResponder`] without
//! touching the draft. Accepting music moves into `validate` and submits in
//! the same turn; every step taken is reported in [`TurnOutcome::transitions`].

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::campaign::{CampaignDraft, CampaignPayload};
use crate::service::{AdService, SubmitReceipt};
use crate::submission::{confirmation, submit_draft};

pub mod fields;
pub mod help;
mod music;
mod prompts;

pub use self::help::{is_question, CannedHelp, HelpResponder};

/// Inputs that end the session without submitting.
pub const CANCEL_TOKENS: [&str; 3] = ["quit", "exit", "stop"];

/// Returns true when the input asks to cancel the session.
pub fn is_cancel(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    CANCEL_TOKENS.contains(&lowered.as_str())
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Position in the collection sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Nothing asked yet; the next turn triggers the greeting.
    Start,
    /// Waiting for the campaign name.
    CollectName,
    /// Waiting for the objective.
    CollectObjective,
    /// Waiting for the ad text.
    CollectAdText,
    /// Waiting for the call-to-action.
    CollectCta,
    /// Waiting for a music choice, id or file path.
    CollectMusic,
    /// Draft complete; the last submission attempt failed.
    Validate,
    /// Campaign created.
    Complete,
    /// User cancelled.
    Cancelled,
}

impl Step {
    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::CollectName => "collect_name",
            Self::CollectObjective => "collect_objective",
            Self::CollectAdText => "collect_ad_text",
            Self::CollectCta => "collect_cta",
            Self::CollectMusic => "collect_music",
            Self::Validate => "validate",
            Self::Complete => "complete",
            Self::Cancelled => "cancelled",
        }
    }

    /// Steps that accept field answers and questions.
    pub fn is_collecting(self) -> bool {
        matches!(
            self,
            Self::CollectName
                | Self::CollectObjective
                | Self::CollectAdText
                | Self::CollectCta
                | Self::CollectMusic
        )
    }

    /// Steps after which no further turns have any effect.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Cancelled)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discrete move between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Step before the move.
    pub from: Step,
    /// Step after the move.
    pub to: Step,
}

/// Result of handling one step for one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// Text for the user.
    pub reply: String,
    /// Step to move to; equal to the current step when holding.
    pub next: Step,
}

impl Advance {
    fn stay(step: Step, reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            next: step,
        }
    }

    fn to(next: Step, reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            next,
        }
    }
}

/// Everything produced by one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Combined reply for the user.
    pub reply: String,
    /// Moves taken during the turn, in order. Empty when holding.
    pub transitions: Vec<Transition>,
    /// Step after the turn.
    pub step: Step,
    /// Final payload, set on the turn that completed the campaign.
    pub payload: Option<CampaignPayload>,
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person filling in the campaign.
    User,
    /// The collector.
    Assistant,
}

/// One entry of the append-only transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// Author.
    pub role: Role,
    /// Message text.
    pub text: String,
    /// When it was recorded.
    pub at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Collector
// ---------------------------------------------------------------------------

/// One campaign conversation.
///
/// Owns its draft and transcript; the ad service may be shared.
pub struct Collector {
    service: Arc<dyn AdService>,
    help: Arc<dyn HelpResponder>,
    step: Step,
    draft: CampaignDraft,
    transcript: Vec<Turn>,
    submission: Option<(CampaignPayload, SubmitReceipt)>,
}

impl fmt::Debug for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collector")
            .field("step", &self.step)
            .field("draft", &self.draft)
            .field("turns", &self.transcript.len())
            .finish_non_exhaustive()
    }
}

impl Collector {
    /// New session at [`Step::Start`] with canned help.
    pub fn new(service: Arc<dyn AdService>) -> Self {
        Self::with_help(service, Arc::new(CannedHelp))
    }

    /// New session with a custom help responder.
    pub fn with_help(service: Arc<dyn AdService>, help: Arc<dyn HelpResponder>) -> Self {
        Self {
            service,
            help,
            step: Step::Start,
            draft: CampaignDraft::new(),
            transcript: Vec::new(),
            submission: None,
        }
    }

    /// Current step.
    pub fn step(&self) -> Step {
        self.step
    }

    /// The draft collected so far.
    pub fn draft(&self) -> &CampaignDraft {
        &self.draft
    }

    /// Every recorded turn, oldest first.
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Final payload once the campaign is created.
    pub fn payload(&self) -> Option<&CampaignPayload> {
        self.submission.as_ref().map(|(payload, _)| payload)
    }

    /// Service identifiers once the campaign is created.
    pub fn receipt(&self) -> Option<&SubmitReceipt> {
        self.submission.as_ref().map(|(_, receipt)| receipt)
    }

    /// Clear the draft and transcript and return to [`Step::Start`].
    pub fn reset(&mut self) {
        self.step = Step::Start;
        self.draft = CampaignDraft::new();
        self.transcript.clear();
        self.submission = None;
    }

    /// Handle one user turn, including any automatic follow-up steps.
    pub async fn submit_turn(&mut self, text: &str) -> TurnOutcome {
        self.record(Role::User, text);
        let mut transitions = Vec::new();

        let reply = if is_cancel(text) && !self.step.is_terminal() {
            self.move_to(Step::Cancelled, &mut transitions);
            prompts::cancelled().to_owned()
        } else {
            let from = self.step;
            let first = self.advance(text).await;
            self.move_to(first.next, &mut transitions);

            if from == Step::CollectMusic && self.step == Step::Validate {
                let second = self.validate_and_submit().await;
                self.move_to(second.next, &mut transitions);
                join_replies(&first.reply, &second.reply)
            } else {
                first.reply
            }
        };

        self.record(Role::Assistant, &reply);
        let payload = transitions
            .iter()
            .any(|t| t.to == Step::Complete)
            .then(|| self.payload().cloned())
            .flatten();

        TurnOutcome {
            reply,
            transitions,
            step: self.step,
            payload,
        }
    }

    /// Handle the current step for one input without auto-advancing.
    ///
    /// Mutates the draft when the answer is accepted but leaves the step
    /// unchanged; the caller applies [`Advance::next`].
    pub async fn advance(&mut self, text: &str) -> Advance {
        let step = self.step;

        if step.is_collecting() && self.help.is_question(text) {
            if let Some(help) = self.help.help_for(step) {
                debug!(step = %step, "answering question");
                return Advance::stay(step, help);
            }
        }

        match step {
            Step::Start => Advance::to(Step::CollectName, prompts::greeting()),
            Step::CollectName => match fields::campaign_name(text) {
                Ok(name) => {
                    let reply = prompts::name_accepted(&name);
                    self.draft.campaign_name = Some(name);
                    Advance::to(Step::CollectObjective, reply)
                }
                Err(err) => Advance::stay(step, prompts::correction(&err)),
            },
            Step::CollectObjective => match fields::objective(text) {
                Ok(objective) => {
                    self.draft.objective = Some(objective);
                    Advance::to(Step::CollectAdText, prompts::objective_accepted(objective))
                }
                Err(err) => Advance::stay(step, prompts::correction(&err)),
            },
            Step::CollectAdText => match fields::ad_text(text) {
                Ok(ad_text) => {
                    self.draft.ad_text = Some(ad_text);
                    Advance::to(Step::CollectCta, prompts::ad_text_accepted())
                }
                Err(err) => Advance::stay(step, prompts::correction(&err)),
            },
            Step::CollectCta => match fields::cta(text) {
                Ok(cta) => {
                    self.draft.cta = Some(cta);
                    Advance::to(
                        Step::CollectMusic,
                        prompts::cta_accepted(cta, self.draft.objective),
                    )
                }
                Err(err) => Advance::stay(step, prompts::correction(&err)),
            },
            Step::CollectMusic => self.handle_music(text).await,
            Step::Validate => self.validate_and_submit().await,
            Step::Complete => Advance::stay(step, prompts::already_complete()),
            Step::Cancelled => Advance::stay(step, prompts::cancelled()),
        }
    }

    /// Re-verify and submit the draft.
    ///
    /// Success moves to [`Step::Complete`]. Failures that only a different
    /// music choice can fix return to [`Step::CollectMusic`] with the choice
    /// cleared; any other failure holds at [`Step::Validate`], where the next
    /// turn tries again.
    async fn validate_and_submit(&mut self) -> Advance {
        match submit_draft(self.service.as_ref(), &self.draft).await {
            Ok(submission) => {
                let reply = confirmation(&submission.receipt);
                self.submission = Some((submission.payload, submission.receipt));
                Advance::to(Step::Complete, reply)
            }
            Err(failure) if failure.needs_music() => {
                self.draft.music_option = None;
                self.draft.music_id = None;
                let reply = join_replies(
                    &failure.explain(),
                    &prompts::music_menu(self.draft.objective),
                );
                Advance::to(Step::CollectMusic, reply)
            }
            Err(failure) => Advance::stay(
                Step::Validate,
                join_replies(
                    &failure.explain(),
                    "Send any message to retry the submission, or type 'quit' to cancel.",
                ),
            ),
        }
    }

    fn move_to(&mut self, next: Step, transitions: &mut Vec<Transition>) {
        if next != self.step {
            info!(from = %self.step, to = %next, "step transition");
            transitions.push(Transition {
                from: self.step,
                to: next,
            });
            self.step = next;
        }
    }

    fn record(&mut self, role: Role, text: &str) {
        self.transcript.push(Turn {
            role,
            text: text.to_owned(),
            at: Utc::now(),
        });
    }
}

fn join_replies(first: &str, second: &str) -> String {
    if first.is_empty() {
        second.to_owned()
    } else {
        format!("{first}\n\n{second}")
    }
}
