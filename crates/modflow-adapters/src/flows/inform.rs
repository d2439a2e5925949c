//! InformFlow: un usuario avisa de un coloquialismo o término codificado.
//!
//! Si el moderador aprueba, el término queda disponible en `approved_terms`
//! y el router lo suma a la lista de bloqueo en vivo.
use modflow_core::{CommunityId, CorrelationId, Lifecycle, UserId, Workflow, WorkflowKind, WorkflowState};

use super::script::{advance, is_cancel, mod_action};
use crate::links::parse_message_link;

pub const MAX_TERM_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InformStep {
    Start,
    AwaitingTerm,
    AwaitingMeaning,
    AwaitingServer,
    Submitted,
}

#[derive(Debug)]
pub struct InformFlow {
    id: CorrelationId,
    owner: UserId,
    lifecycle: Lifecycle,
    step: InformStep,
    term: Option<String>,
    meaning: Option<String>,
    community: Option<CommunityId>,
    approved: Vec<String>,
}

impl InformFlow {
    pub fn new(owner: UserId, id: CorrelationId) -> Self {
        Self { id,
               owner,
               lifecycle: Lifecycle::new(),
               step: InformStep::Start,
               term: None,
               meaning: None,
               community: None,
               approved: Vec::new() }
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn meaning(&self) -> Option<&str> {
        self.meaning.as_deref()
    }

    fn collect(&mut self, content: &str) -> Vec<String> {
        let text = content.trim();
        match self.step {
            InformStep::Start => {
                self.step = InformStep::AwaitingTerm;
                vec![format!("Thank you for helping us keep up with new language (inform #{}). Say `cancel` at any time to cancel.",
                             self.id),
                     "Which word or phrase would you like to tell the moderators about?".to_string()]
            }
            InformStep::AwaitingTerm => {
                if text.is_empty() || text.chars().count() > MAX_TERM_LEN {
                    return vec![format!("Please send a single word or short phrase (up to {MAX_TERM_LEN} characters).")];
                }
                self.term = Some(text.to_string());
                self.step = InformStep::AwaitingMeaning;
                vec![format!("What does \"{text}\" mean or refer to?")]
            }
            InformStep::AwaitingMeaning => {
                if text.is_empty() {
                    return vec!["Please describe what the term means.".to_string()];
                }
                self.meaning = Some(text.to_string());
                self.step = InformStep::AwaitingServer;
                vec!["Please paste a link to any message or channel in the server where this term is being used.".to_string()]
            }
            InformStep::AwaitingServer => match parse_message_link(text) {
                Some(link) => {
                    self.community = Some(link.community);
                    self.step = InformStep::Submitted;
                    advance(&mut self.lifecycle, WorkflowState::AwaitingModReview);
                    vec![format!("Thank you. Inform #{} has been sent to the moderators.", self.id)]
                }
                None => vec!["I'm sorry, I couldn't read that link. Please try again or say `cancel` to cancel.".to_string()],
            },
            InformStep::Submitted => vec![],
        }
    }

    fn summary(&self) -> Vec<String> {
        let term = self.term.as_deref().unwrap_or_default();
        let meaning = self.meaning.as_deref().unwrap_or_default();
        vec![format!("{}: User {} informed about the term \"{term}\", meaning: {meaning}", self.id, self.owner),
             format!("{id}: Reply with `{id}:approve` to add it to the colloquialism list or `{id}:reject` to discard it.",
                     id = self.id)]
    }
}

impl Workflow for InformFlow {
    fn kind(&self) -> WorkflowKind {
        WorkflowKind::Inform
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
        self.community
    }

    fn handle_message(&mut self, content: &str) -> Vec<String> {
        self.lifecycle.begin_turn();
        if self.lifecycle.is_complete() {
            return vec![];
        }
        if is_cancel(content) {
            advance(&mut self.lifecycle, WorkflowState::Cancelled);
            return vec![format!("Inform #{} cancelled.", self.id)];
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
        match mod_action(content).as_str() {
            "" => self.summary(),
            "approve" => {
                if let Some(term) = &self.term {
                    self.approved.push(term.clone());
                }
                advance(&mut self.lifecycle, WorkflowState::Resolved);
                vec![format!("{}: Term approved and added to the colloquialism list.", self.id)]
            }
            "reject" => {
                advance(&mut self.lifecycle, WorkflowState::Resolved);
                vec![format!("{}: Term rejected.", self.id)]
            }
            other => vec![format!("{}: Unknown action `{other}`. Use `approve` or `reject`.", self.id)],
        }
    }

    fn approved_terms(&self) -> &[String] {
        &self.approved
    }
}
