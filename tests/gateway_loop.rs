use std::collections::HashMap;
use std::sync::Arc;

use modflow::bot::serve;
use modflow::gateway::GatewayCommand;
use modflow::{AppConfig, BotError, Destination};
use modflow_core::{ChannelId, UserId};
use modflow_policies::{Denylist, DisabledService, EvaluationConfig, EvaluationPipeline};

fn config() -> AppConfig {
    let env: HashMap<&str, &str> = HashMap::from([("MODFLOW_BOT_NAME", "Group 13 Bot"), ("MODFLOW_BOT_ID", "1000")]);
    AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap()
}

fn offline_pipeline() -> EvaluationPipeline {
    let off = Arc::new(DisabledService::new("offline"));
    EvaluationPipeline::new(off.clone(), off.clone(), off, EvaluationConfig::default())
}

const READY: &str = r#"{"type":"ready","bot":{"id":1000,"name":"Group 13 Bot"},"guilds":[{"id":10,"name":"cs","channels":[{"id":11,"name":"group-13-mod"},{"id":12,"name":"group-13"}]}]}"#;

#[tokio::test]
async fn serves_a_report_through_the_bridge() {
    let input = [READY,
                 "",
                 r#"{"type":"message","author":5,"content":"report"}"#,
                 r#"{"type":"message","author":5,"content":"https://discord.com/channels/10/12/30"}"#,
                 r#"{"type":"message","author":5,"content":"you are all idiots"}"#,
                 r#"{"type":"message","author":5,"content":"harassment"}"#,
                 r#"{"type":"message","author":7,"community":10,"channel":"group-13-mod","content":"1:dismiss"}"#].join("\n");
    let mut output: Vec<u8> = Vec::new();
    serve(&config(), Denylist::new(), offline_pipeline(), input.as_bytes(), &mut output).await.unwrap();

    let commands: Vec<GatewayCommand> = String::from_utf8(output).unwrap()
                                                                 .lines()
                                                                 .map(|l| serde_json::from_str(l).unwrap())
                                                                 .collect();
    let to_mods: Vec<&str> = commands.iter()
                                     .filter_map(|GatewayCommand::Send { destination, content }| {
                                         (*destination == Destination::Channel(ChannelId(11))).then_some(content.as_str())
                                     })
                                     .collect();
    assert!(to_mods[0].starts_with("1: New report from user 5 (reason: harassment)"));
    // Servicios apagados: la evaluación se manda igual, degradada.
    assert!(to_mods.iter().any(|m| m.contains("Toxicity score: unavailable")));
    assert_eq!(to_mods.last().copied(), Some("1: Report dismissed."));
    assert!(commands.iter()
                    .any(|GatewayCommand::Send { destination, .. }| *destination == Destination::User(UserId(5))));
}

#[tokio::test]
async fn message_before_ready_is_fatal() {
    let input = r#"{"type":"message","author":5,"content":"report"}"#;
    let mut output: Vec<u8> = Vec::new();
    let err = serve(&config(), Denylist::new(), offline_pipeline(), input.as_bytes(), &mut output).await.unwrap_err();
    assert!(matches!(err, BotError::NotReady));
    assert!(output.is_empty());
}

#[tokio::test]
async fn undecodable_lines_are_skipped() {
    let input = [READY,
                 "not json",
                 r#"{"type":"typing","author":5}"#,
                 r#"{"type":"message","author":5,"content":"help"}"#].join("\n");
    let mut output: Vec<u8> = Vec::new();
    serve(&config(), Denylist::new(), offline_pipeline(), input.as_bytes(), &mut output).await.unwrap();

    let commands: Vec<GatewayCommand> = String::from_utf8(output).unwrap()
                                                                 .lines()
                                                                 .map(|l| serde_json::from_str(l).unwrap())
                                                                 .collect();
    assert_eq!(commands.len(), 1, "sólo la respuesta a help");
    let GatewayCommand::Send { destination, content } = &commands[0];
    assert_eq!(*destination, Destination::User(UserId(5)));
    assert!(content.contains("`report`"));
}
