//! Channel and thread enumeration for a guild

use crate::api::client::RestClient;
use crate::config::ChannelFilter;
use crate::model::{Channel, ChannelKind, ThreadList};
use crate::ApiError;
use tokio::task::JoinSet;

/// Fetches a single channel by id
pub async fn get_channel(client: &RestClient, channel_id: &str) -> Result<Channel, ApiError> {
    client
        .get_json(&format!("/channels/{}", channel_id), &[])
        .await
}

/// Tests a channel against the configured filter policy
fn keep_channel(channel: &Channel, filter: ChannelFilter) -> bool {
    match filter {
        ChannelFilter::ExcludeVoice => channel.kind != ChannelKind::Voice,
        ChannelFilter::TextAndThreads => {
            matches!(channel.kind, ChannelKind::Text | ChannelKind::PublicThread)
        }
    }
}

/// Lists a guild's channels, keeping only conversational ones
///
/// The guild channel list fits in a single response; there is no pagination
/// at this level.
pub async fn list_guild_channels(
    client: &RestClient,
    guild_id: &str,
    filter: ChannelFilter,
) -> Result<Vec<Channel>, ApiError> {
    let channels: Vec<Channel> = client
        .get_json(&format!("/guilds/{}/channels", guild_id), &[])
        .await?;

    Ok(channels
        .into_iter()
        .filter(|channel| keep_channel(channel, filter))
        .collect())
}

/// Lists a channel's archived public and active threads
///
/// Thread discovery is best-effort: a failed call is already counted and
/// logged by the client and degrades to an empty list here, so one
/// unfetchable channel never stops the run.
pub async fn list_channel_threads(client: &RestClient, channel_id: &str) -> Vec<Channel> {
    let archived: Vec<Channel> = match client
        .get_json::<ThreadList>(
            &format!("/channels/{}/threads/archived/public", channel_id),
            &[],
        )
        .await
    {
        Ok(list) => list.threads,
        Err(e) => {
            tracing::warn!("Skipping archived threads for {}: {}", channel_id, e);
            Vec::new()
        }
    };

    let active: Vec<Channel> = match client
        .get_json::<ThreadList>(&format!("/channels/{}/threads/active", channel_id), &[])
        .await
    {
        Ok(list) => list.threads,
        Err(e) => {
            tracing::warn!("Skipping active threads for {}: {}", channel_id, e);
            Vec::new()
        }
    };

    tracing::debug!(
        "Fetched {} archived threads and {} active threads in {}",
        archived.len(),
        active.len(),
        channel_id
    );

    let mut threads = archived;
    threads.extend(active);
    threads
}

/// Lists a guild's channels plus the threads belonging to each of them
///
/// Channels are enumerated first, then thread discovery runs per channel.
/// With `concurrent` set, thread discovery fans out over all channels at
/// once and joins before returning; otherwise it proceeds one channel at a
/// time like the rest of the crawl.
pub async fn list_guild_channels_and_threads(
    client: &RestClient,
    guild_id: &str,
    filter: ChannelFilter,
    concurrent: bool,
) -> Result<Vec<Channel>, ApiError> {
    let channels = list_guild_channels(client, guild_id, filter).await?;
    tracing::info!("Fetched {} channels", channels.len());

    let mut threads: Vec<Channel> = Vec::new();
    if concurrent {
        let mut tasks: JoinSet<(usize, Vec<Channel>)> = JoinSet::new();
        for (index, channel) in channels.iter().enumerate() {
            let client = client.clone();
            let channel_id = channel.id.clone();
            tasks.spawn(async move {
                let threads = list_channel_threads(&client, &channel_id).await;
                (index, threads)
            });
        }

        // Join everything, then restore channel order
        let mut results: Vec<(usize, Vec<Channel>)> = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => tracing::warn!("Thread discovery task failed: {}", e),
            }
        }
        results.sort_by_key(|(index, _)| *index);
        threads.extend(results.into_iter().flat_map(|(_, t)| t));
    } else {
        for channel in &channels {
            threads.extend(list_channel_threads(client, &channel.id).await);
        }
    }

    let mut all = channels;
    all.extend(threads);
    Ok(all)
}
