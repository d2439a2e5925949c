//! Router de mensajes: único punto de entrada del bot.
//!
//! Precedencia por mensaje:
//! 1. mensajes del propio bot se descartan;
//! 2. mensajes directos: ayuda, o se ofrecen a cada `WorkflowKind` en orden;
//! 3. canal de moderación: prefijo `"<id>:"` → flujo correlacionado;
//! 4. canal monitoreado: evaluación automática y reenvío a moderación.
//!
//! Todo el estado mutable (registry, lista de bloqueo) vive acá y se muta
//! sólo dentro de `route`, un mensaje a la vez.
mod message;
mod prefix;

pub use message::{Destination, InboundMessage, Outbound};
pub use prefix::parse_correlation_prefix;

use log::{debug, info, warn};
use modflow_adapters::StandardWorkflows;
use modflow_core::constants::{CANCEL_KEYWORD, HELP_KEYWORD};
use modflow_core::{CommunityId, CorrelationId, EventStore, FlowRegistry, InMemoryEventStore, UserId, WorkflowKind};
use modflow_policies::normalize::{case_fold, transliterate};
use modflow_policies::{render_evaluation, Denylist, EvaluationPipeline};

use crate::directory::Directory;
use crate::errors::RoutingError;

pub struct DispatchRouter<E: EventStore = InMemoryEventStore> {
    bot_id: UserId,
    kinds: Vec<WorkflowKind>,
    registry: FlowRegistry<E>,
    directory: Directory,
    denylist: Denylist,
    pipeline: EvaluationPipeline,
}

impl DispatchRouter<InMemoryEventStore> {
    /// Router con los guiones estándar y log de eventos en memoria.
    pub fn new(bot_id: UserId,
               kinds: Vec<WorkflowKind>,
               directory: Directory,
               denylist: Denylist,
               pipeline: EvaluationPipeline)
               -> Self {
        Self::with_registry(bot_id,
                            kinds,
                            FlowRegistry::new(Box::new(StandardWorkflows)),
                            directory,
                            denylist,
                            pipeline)
    }
}

impl<E: EventStore> DispatchRouter<E> {
    pub fn with_registry(bot_id: UserId,
                         kinds: Vec<WorkflowKind>,
                         registry: FlowRegistry<E>,
                         directory: Directory,
                         denylist: Denylist,
                         pipeline: EvaluationPipeline)
                         -> Self {
        Self { bot_id,
               kinds,
               registry,
               directory,
               denylist,
               pipeline }
    }

    pub async fn route(&mut self, msg: &InboundMessage) -> Vec<Outbound> {
        if msg.author == self.bot_id {
            return vec![];
        }
        match msg.community {
            None => self.route_direct(msg).await,
            Some(community) if self.directory.naming().is_moderation(&msg.channel) => self.route_moderation(community, msg),
            Some(community) if self.directory.naming().is_monitored(&msg.channel) => self.route_monitored(community, msg).await,
            Some(_) => vec![],
        }
    }

    pub fn help_text(&self) -> String {
        let mut lines: Vec<String> = self.kinds.iter().map(|k| k.usage().to_string()).collect();
        lines.push(format!("Say `{CANCEL_KEYWORD}` at any time to cancel an open workflow."));
        lines.join("\n")
    }

    pub fn registry(&self) -> &FlowRegistry<E> {
        &self.registry
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn denylist(&self) -> &Denylist {
        &self.denylist
    }

    async fn route_direct(&mut self, msg: &InboundMessage) -> Vec<Outbound> {
        let author = msg.author;
        let content = msg.content.as_str();
        if content == HELP_KEYWORD {
            return vec![Outbound::to_user(author, self.help_text())];
        }

        let mut out = Vec::new();
        for kind in self.kinds.clone() {
            if !self.registry.is_active(author, kind) && !kind.matches_start(content) {
                continue;
            }
            let replies = self.registry.deliver(author, kind, content);
            out.extend(replies.into_iter().map(|r| Outbound::to_user(author, r)));

            let Some(flow) = self.registry.get(author, kind) else { continue };
            if flow.needs_mod_review() {
                let id = flow.correlation_id();
                let community = flow.community();
                let subject = flow.evaluation_subject().map(str::to_string);
                out.extend(self.escalate(author, id, community, subject).await);
            }
            self.retire(author, kind);
        }
        out
    }

    /// Primer mensaje al canal de moderación cuando un flujo entra en revisión.
    async fn escalate(&mut self,
                      author: UserId,
                      id: CorrelationId,
                      community: Option<CommunityId>,
                      subject: Option<String>)
                      -> Vec<Outbound> {
        let kickoff = self.registry.moderate(id, "").unwrap_or_default();
        let channel = match community.and_then(|c| self.directory.resolve(c)) {
            Some(ch) => ch.channel_id,
            None => {
                match community {
                    Some(c) => warn!("router:dropped id={id} {}", RoutingError::NoModerationChannel(c)),
                    None => warn!("router:dropped id={id} reason=no_community"),
                }
                return vec![Outbound::to_user(author,
                                              format!("Sorry, submission #{id} could not be delivered: that server has no moderation channel I can reach."))];
            }
        };

        let mut out: Vec<Outbound> = kickoff.into_iter().map(|m| Outbound::to_channel(channel, m)).collect();
        if let Some(text) = subject {
            let evaluation = self.pipeline.evaluate(&text).await;
            out.push(Outbound::to_channel(channel, render_evaluation(&evaluation, self.pipeline.toxicity_threshold())));
        }
        out
    }

    fn route_moderation(&mut self, community: CommunityId, msg: &InboundMessage) -> Vec<Outbound> {
        let Some(channel) = self.directory.resolve(community).map(|c| c.channel_id) else {
            warn!("router:dropped community={community} reason=moderation_channel_not_in_directory");
            return vec![];
        };
        let (id, rest) = match parse_correlation_prefix(&msg.content) {
            Ok(parsed) => parsed,
            Err(e) => return vec![Outbound::to_channel(channel, e.to_string())],
        };
        let Some(replies) = self.registry.moderate(id, rest) else {
            debug!("router:unknown_correlation id={id}");
            return vec![Outbound::to_channel(channel, RoutingError::UnknownCorrelation(id).to_string())];
        };

        let out = replies.into_iter().map(|m| Outbound::to_channel(channel, m)).collect();
        if let Some((owner, kind)) = self.registry.resolve(id) {
            self.retire(owner, kind);
        }
        out
    }

    async fn route_monitored(&mut self, community: CommunityId, msg: &InboundMessage) -> Vec<Outbound> {
        let Some(channel) = self.directory.resolve(community).map(|c| c.channel_id) else {
            warn!("router:dropped community={community} reason=no_moderation_channel");
            return vec![];
        };
        let evaluation = self.pipeline.evaluate(&msg.content).await;

        // El texto se compara antes y después de traducir.
        let literal = case_fold(&transliterate(&msg.content));
        let mut hits = self.denylist.matches(&literal);
        for term in self.denylist.matches(&evaluation.normalized) {
            if !hits.contains(&term) {
                hits.push(term);
            }
        }

        let header = if hits.is_empty() {
            format!("Forwarded message:\n{}: \"{}\"", msg.display_author(), msg.content)
        } else {
            info!("router:flagged community={community} terms={}", hits.len());
            format!("colloquialism detected ({}):\n{}: \"{}\"", hits.join(", "), msg.display_author(), msg.content)
        };
        vec![Outbound::to_channel(channel, header),
             Outbound::to_channel(channel, render_evaluation(&evaluation, self.pipeline.toxicity_threshold()))]
    }

    /// Quita el flujo si terminó; los términos aprobados pasan a la lista de bloqueo.
    fn retire(&mut self, owner: UserId, kind: WorkflowKind) {
        let Some(flow) = self.registry.remove(owner, kind) else { return };
        for term in flow.approved_terms() {
            if self.denylist.insert(term) {
                info!("router:denylist_add id={} term={term}", flow.correlation_id());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use modflow_core::ChannelId;
    use modflow_policies::{DisabledService, EvaluationConfig};
    use regex::Regex;

    use super::*;
    use crate::directory::{ChannelNaming, ChannelSnapshot, GuildSnapshot};

    fn router(kinds: Vec<WorkflowKind>) -> DispatchRouter {
        let re = Regex::new(r"[gG]roup (\d+) [bB]ot").unwrap();
        let naming = ChannelNaming::from_identity("Group 2 Bot", &re, "group-{group}-mod", "group-{group}").unwrap();
        let guild = GuildSnapshot { id: CommunityId(1),
                                    name: String::new(),
                                    channels: vec![ChannelSnapshot { id: ChannelId(3), name: "group-2-mod".into() }] };
        let off = Arc::new(DisabledService::new("off"));
        let pipeline = EvaluationPipeline::new(off.clone(), off.clone(), off, EvaluationConfig::default());
        DispatchRouter::new(UserId(99), kinds, Directory::build(naming, &[guild]), Denylist::new(), pipeline)
    }

    #[test]
    fn only_enabled_kinds_are_offered() {
        let mut router = router(vec![WorkflowKind::Inform]);
        let help = router.help_text();
        assert!(help.contains("`inform`"));
        assert!(!help.contains("`report`"));
        assert!(help.contains("`cancel`"));

        let out = tokio_test::block_on(router.route(&InboundMessage::direct(UserId(4), "report")));
        assert!(out.is_empty(), "report deshabilitado");
        assert_eq!(router.registry().active_count(), 0);
    }

    #[test]
    fn moderation_channel_of_unknown_community_is_dropped() {
        let mut router = router(WorkflowKind::ALL.to_vec());
        tokio_test::block_on(router.route(&InboundMessage::direct(UserId(4), "report")));
        // Mismo nombre de canal, pero la comunidad no estaba al arrancar.
        let msg = InboundMessage::in_channel(UserId(5), CommunityId(8), "group-2-mod", "1:confirm");
        assert!(tokio_test::block_on(router.route(&msg)).is_empty());
        let bad = InboundMessage::in_channel(UserId(5), CommunityId(8), "group-2-mod", "no prefix");
        assert!(tokio_test::block_on(router.route(&bad)).is_empty());
        assert!(router.registry().is_active(UserId(4), WorkflowKind::Report), "el flujo no se toca");
    }

    #[test]
    fn monitored_channel_without_moderation_channel_is_dropped() {
        let mut router = router(WorkflowKind::ALL.to_vec());
        let msg = InboundMessage::in_channel(UserId(4), CommunityId(8), "group-2", "hola");
        assert!(tokio_test::block_on(router.route(&msg)).is_empty());
    }
}
