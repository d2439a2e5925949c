//! ReportFlow: reporte de un mensaje puntual.
//!
//! Pasos: link al mensaje → texto del mensaje → motivo → revisión. El texto
//! pegado por el usuario es lo que el router evalúa con el pipeline al entrar
//! en revisión.
use std::fmt;
use std::str::FromStr;

use modflow_core::{CommunityId, CorrelationId, Lifecycle, UserId, Workflow, WorkflowKind, WorkflowState};
use serde::{Deserialize, Serialize};

use super::script::{advance, is_cancel, mod_action};
use crate::links::{parse_message_link, MessageLink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportReason {
    Spam,
    Harassment,
    Misinformation,
    Violence,
    Other,
}

impl ReportReason {
    pub const ALL: [ReportReason; 5] = [ReportReason::Spam,
                                        ReportReason::Harassment,
                                        ReportReason::Misinformation,
                                        ReportReason::Violence,
                                        ReportReason::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportReason::Spam => "spam",
            ReportReason::Harassment => "harassment",
            ReportReason::Misinformation => "misinformation",
            ReportReason::Violence => "violence",
            ReportReason::Other => "other",
        }
    }
}

impl fmt::Display for ReportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acepta el nombre o el número del menú (1-based).
impl FromStr for ReportReason {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Ok(n) = s.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied()).ok_or(());
        }
        Self::ALL.iter().copied().find(|r| r.as_str() == s).ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportVerdict {
    Confirmed,
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportStep {
    Start,
    AwaitingLink,
    AwaitingContent,
    AwaitingReason,
    Submitted,
}

#[derive(Debug)]
pub struct ReportFlow {
    id: CorrelationId,
    owner: UserId,
    lifecycle: Lifecycle,
    step: ReportStep,
    link: Option<MessageLink>,
    content: Option<String>,
    reason: Option<ReportReason>,
    verdict: Option<ReportVerdict>,
}

impl ReportFlow {
    pub fn new(owner: UserId, id: CorrelationId) -> Self {
        Self { id,
               owner,
               lifecycle: Lifecycle::new(),
               step: ReportStep::Start,
               link: None,
               content: None,
               reason: None,
               verdict: None }
    }

    pub fn link(&self) -> Option<&MessageLink> {
        self.link.as_ref()
    }

    pub fn reason(&self) -> Option<ReportReason> {
        self.reason
    }

    pub fn verdict(&self) -> Option<ReportVerdict> {
        self.verdict
    }

    fn reason_menu() -> String {
        let options: Vec<String> = ReportReason::ALL.iter()
                                                    .enumerate()
                                                    .map(|(i, r)| format!("{}. {r}", i + 1))
                                                    .collect();
        format!("Why are you reporting this message? Reply with one of:\n{}", options.join("\n"))
    }

    fn collect(&mut self, content: &str) -> Vec<String> {
        match self.step {
            ReportStep::Start => {
                self.step = ReportStep::AwaitingLink;
                vec![format!("Thank you for starting the reporting process (report #{}). Say `cancel` at any time to cancel.",
                             self.id),
                     "Please copy paste the link to the message you want to report.\nYou can obtain this link by right-clicking the message and clicking `Copy Message Link`.".to_string()]
            }
            ReportStep::AwaitingLink => match parse_message_link(content) {
                Some(link) if link.message.is_some() => {
                    self.link = Some(link);
                    self.step = ReportStep::AwaitingContent;
                    vec!["Got it. Please paste the text of that message so the moderators can review it.".to_string()]
                }
                _ => vec!["I'm sorry, I couldn't read that link. Please try again or say `cancel` to cancel.".to_string()],
            },
            ReportStep::AwaitingContent => {
                let text = content.trim();
                if text.is_empty() {
                    return vec!["Please paste the text of the message you are reporting.".to_string()];
                }
                self.content = Some(text.to_string());
                self.step = ReportStep::AwaitingReason;
                vec![Self::reason_menu()]
            }
            ReportStep::AwaitingReason => match content.parse::<ReportReason>() {
                Ok(reason) => {
                    self.reason = Some(reason);
                    self.step = ReportStep::Submitted;
                    advance(&mut self.lifecycle, WorkflowState::AwaitingModReview);
                    vec![format!("Thank you. Your report #{} has been sent to the moderators.", self.id)]
                }
                Err(()) => vec![format!("I didn't understand that reason.\n{}", Self::reason_menu())],
            },
            ReportStep::Submitted => vec![],
        }
    }

    fn summary(&self) -> Vec<String> {
        let link = self.link.map(|l| l.url()).unwrap_or_default();
        let reason = self.reason.map(|r| r.as_str()).unwrap_or("unspecified");
        let quoted = self.content.as_deref().unwrap_or_default();
        vec![format!("{}: New report from user {} (reason: {reason})\n{link}\n> {quoted}", self.id, self.owner),
             format!("{id}: Reply with `{id}:confirm` to act on this report or `{id}:dismiss` to close it.", id = self.id)]
    }
}

impl Workflow for ReportFlow {
    fn kind(&self) -> WorkflowKind {
        WorkflowKind::Report
    }

    fn correlation_id(&self) -> CorrelationId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.owner
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn community(&self) -> Option<CommunityId> {
        self.link.map(|l| l.community)
    }

    fn handle_message(&mut self, content: &str) -> Vec<String> {
        self.lifecycle.begin_turn();
        if self.lifecycle.is_complete() {
            return vec![];
        }
        if is_cancel(content) {
            advance(&mut self.lifecycle, WorkflowState::Cancelled);
            return vec![format!("Report #{} cancelled.", self.id)];
        }
        if !self.lifecycle.is_collecting() {
            return vec![];
        }
        self.collect(content)
    }

    fn mod_flow(&mut self, content: &str) -> Vec<String> {
        self.lifecycle.begin_turn();
        if !self.lifecycle.in_review() {
            return vec![];
        }
        let action = mod_action(content);
        match action.as_str() {
            "" => self.summary(),
            "confirm" => {
                self.verdict = Some(ReportVerdict::Confirmed);
                advance(&mut self.lifecycle, WorkflowState::Resolved);
                vec![format!("{}: Report confirmed. The reported message has been flagged for removal.", self.id)]
            }
            "dismiss" => {
                self.verdict = Some(ReportVerdict::Dismissed);
                advance(&mut self.lifecycle, WorkflowState::Resolved);
                vec![format!("{}: Report dismissed.", self.id)]
            }
            other => vec![format!("{}: Unknown action `{other}`. Use `confirm` or `dismiss`.", self.id)],
        }
    }

    fn evaluation_subject(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "https://discord.com/channels/10/20/30";

    fn submitted() -> ReportFlow {
        let mut flow = ReportFlow::new(UserId(1), CorrelationId(4));
        flow.handle_message("report");
        flow.handle_message(LINK);
        flow.handle_message("buy cheap followers now");
        flow.handle_message("spam");
        flow
    }

    #[test]
    fn reasons_parse_by_name_or_number() {
        assert_eq!("2".parse::<ReportReason>(), Ok(ReportReason::Harassment));
        assert_eq!(" Violence ".parse::<ReportReason>(), Ok(ReportReason::Violence));
        assert!("0".parse::<ReportReason>().is_err());
        assert!("6".parse::<ReportReason>().is_err());
        assert!("rude".parse::<ReportReason>().is_err());
    }

    #[test]
    fn invalid_link_keeps_the_step() {
        let mut flow = ReportFlow::new(UserId(1), CorrelationId(1));
        flow.handle_message("report");
        let replies = flow.handle_message("https://example.com/nope");
        assert!(replies[0].contains("couldn't read that link"));
        // Un link de canal sin mensaje tampoco alcanza para reportar.
        let replies = flow.handle_message("https://discord.com/channels/10/20");
        assert!(replies[0].contains("couldn't read that link"));
        assert_eq!(flow.state(), WorkflowState::Collecting);
        assert_eq!(flow.community(), None);
    }

    #[test]
    fn full_script_reaches_review_once() {
        let mut flow = ReportFlow::new(UserId(1), CorrelationId(4));
        flow.handle_message("report");
        flow.handle_message(LINK);
        flow.handle_message("buy cheap followers now");
        assert!(!flow.needs_mod_review());
        let replies = flow.handle_message("spam");
        assert!(replies[0].contains("report #4"));
        assert!(flow.needs_mod_review());
        assert_eq!(flow.community(), Some(CommunityId(10)));
        assert_eq!(flow.evaluation_subject(), Some("buy cheap followers now"));

        // Mensajes posteriores del usuario no cambian nada mientras se revisa.
        assert!(flow.handle_message("hello?").is_empty());
        assert!(!flow.needs_mod_review());
        assert_eq!(flow.state(), WorkflowState::AwaitingModReview);
    }

    #[test]
    fn kickoff_is_tagged_with_the_correlation_id() {
        let mut flow = submitted();
        let kickoff = flow.mod_flow("");
        assert!(kickoff.iter().all(|m| m.starts_with("4: ")));
        assert!(kickoff[0].contains("reason: spam"));
        assert!(kickoff[0].contains(LINK));
        assert_eq!(flow.state(), WorkflowState::AwaitingModReview);
    }

    #[test]
    fn moderator_actions() {
        let mut flow = submitted();
        let replies = flow.mod_flow("approve");
        assert!(replies[0].contains("Unknown action"));
        assert!(!flow.complete());

        flow.mod_flow(" Confirm ");
        assert!(flow.complete());
        assert_eq!(flow.state(), WorkflowState::Resolved);
        assert_eq!(flow.verdict(), Some(ReportVerdict::Confirmed));
        assert!(flow.mod_flow("dismiss").is_empty(), "terminal flows ignore moderators");
    }

    #[test]
    fn cancel_during_collection_and_review() {
        let mut flow = ReportFlow::new(UserId(1), CorrelationId(1));
        flow.handle_message("report");
        assert_eq!(flow.handle_message("CANCEL"), vec!["Report #1 cancelled.".to_string()]);
        assert_eq!(flow.state(), WorkflowState::Cancelled);

        let mut flow = submitted();
        flow.handle_message("cancel");
        assert!(flow.complete());
        assert!(flow.mod_flow("confirm").is_empty());
    }

    #[test]
    fn mod_flow_before_review_is_a_no_op() {
        let mut flow = ReportFlow::new(UserId(1), CorrelationId(1));
        flow.handle_message("report");
        assert!(flow.mod_flow("").is_empty());
        assert!(flow.mod_flow("confirm").is_empty());
        assert_eq!(flow.state(), WorkflowState::Collecting);
    }
}
