//! Loop principal: eventos del gateway → router → comandos de salida.
use log::{debug, info, warn};
use modflow_policies::{Denylist, EvaluationPipeline};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::AppConfig;
use crate::directory::Directory;
use crate::errors::BotError;
use crate::gateway::{encode_command, parse_event, GatewayEvent};
use crate::router::DispatchRouter;

/// Atiende el gateway hasta que se cierra la entrada.
///
/// El directorio se arma con el primer `ready`; un `message` antes de eso es
/// un error de protocolo y corta el loop. Líneas que no se pueden decodificar
/// (JSON roto o eventos desconocidos) se registran y se saltan. Los errores de
/// ruteo nunca llegan acá: el router los responde como texto.
pub async fn serve<R, W>(config: &AppConfig,
                         denylist: Denylist,
                         pipeline: EvaluationPipeline,
                         reader: R,
                         mut writer: W)
                         -> Result<(), BotError>
    where R: AsyncBufRead + Unpin,
          W: AsyncWrite + Unpin
{
    let mut lines = reader.lines();
    let mut pending = Some((denylist, pipeline));
    let mut router: Option<DispatchRouter> = None;

    while let Some(line) = lines.next_line().await? {
        let event = match parse_event(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                warn!("bot:bad_line error={e}");
                continue;
            }
        };
        match event {
            GatewayEvent::Ready { bot, guilds } => {
                let Some((denylist, pipeline)) = pending.take() else {
                    warn!("bot:ready_ignored reason=already_ready");
                    continue;
                };
                if let Some(identity) = bot.filter(|b| b.id != config.bot_id || b.name != config.bot_name) {
                    warn!("bot:identity_mismatch gateway_id={} gateway_name={} configured={}",
                          identity.id, identity.name, config.bot_name);
                }
                let directory = Directory::build(config.naming.clone(), &guilds);
                info!("bot:ready guilds={} denylist={}", guilds.len(), denylist.len());
                router = Some(DispatchRouter::new(config.bot_id, config.workflows.clone(), directory, denylist, pipeline));
            }
            GatewayEvent::Message(msg) => {
                let router = router.as_mut().ok_or(BotError::NotReady)?;
                let outbound = router.route(&msg).await;
                debug!("bot:routed author={} sends={}", msg.author, outbound.len());
                for out in outbound {
                    let mut line = encode_command(out)?;
                    line.push('\n');
                    writer.write_all(line.as_bytes()).await?;
                }
                writer.flush().await?;
            }
        }
    }
    info!("bot:input_closed");
    Ok(())
}
