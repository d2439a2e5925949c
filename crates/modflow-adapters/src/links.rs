//! Links de la plataforma: `https://discord.com/channels/<guild>/<channel>[/<message>]`.

use modflow_core::{ChannelId, CommunityId};
use once_cell::sync::Lazy;
use regex::Regex;

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(?:(?:ptb|canary)\.)?discord(?:app)?\.com/channels/(\d+)/(\d+)(?:/(\d+))?").expect("static link regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLink {
    pub community: CommunityId,
    pub channel: ChannelId,
    pub message: Option<u64>,
}

impl MessageLink {
    pub fn url(&self) -> String {
        match self.message {
            Some(m) => format!("https://discord.com/channels/{}/{}/{m}", self.community, self.channel),
            None => format!("https://discord.com/channels/{}/{}", self.community, self.channel),
        }
    }
}

/// Primer link válido dentro del texto. IDs que no entran en `u64` no cuentan.
pub fn parse_message_link(text: &str) -> Option<MessageLink> {
    let caps = LINK_RE.captures(text)?;
    let community = caps.get(1)?.as_str().parse().ok()?;
    let channel = caps.get(2)?.as_str().parse().ok()?;
    let message = match caps.get(3) {
        Some(m) => Some(m.as_str().parse().ok()?),
        None => None,
    };
    Some(MessageLink { community: CommunityId(community),
                       channel: ChannelId(channel),
                       message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_message_and_channel_links() {
        let link = parse_message_link("see https://discord.com/channels/11/22/33 please").unwrap();
        assert_eq!(link.community, CommunityId(11));
        assert_eq!(link.channel, ChannelId(22));
        assert_eq!(link.message, Some(33));
        assert_eq!(link.url(), "https://discord.com/channels/11/22/33");

        let chan = parse_message_link("https://ptb.discordapp.com/channels/5/6").unwrap();
        assert_eq!(chan.message, None);
    }

    #[test]
    fn rejects_garbage_and_overflow() {
        assert!(parse_message_link("not a link").is_none());
        assert!(parse_message_link("https://discord.com/channels/99999999999999999999999/1/2").is_none());
    }
}
