//! End-to-end archive runs against a mock API server

use guild_scribe::archiver::{run_archive, RunOptions};
use guild_scribe::config::{ApiConfig, ChannelFilter, Config, GuildConfig, OutputConfig};
use guild_scribe::model::{ReducedMessage, UserStats};
use guild_scribe::output::write_json;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str, data_dir: &Path) -> Config {
    Config {
        api: ApiConfig {
            token: Some("test-token".to_string()),
            base_url: base_url.to_string(),
            page_size: 100,
            max_page_retries: 0,
        },
        guild: GuildConfig {
            id: "9".to_string(),
            genesis_date: "2021-06-01T00:00:00Z".to_string(),
            channel_filter: ChannelFilter::TextAndThreads,
            include_threads: false,
            concurrent_thread_discovery: false,
            exclude_bots: true,
        },
        output: OutputConfig {
            data_dir: data_dir.display().to_string(),
        },
    }
}

fn message_json(id: &str, username: &str, bot: bool, timestamp: &str, content: &str) -> Value {
    json!({
        "id": id,
        "author": {"username": username, "bot": bot},
        "timestamp": timestamp,
        "content": content
    })
}

#[tokio::test]
async fn test_full_archive_run_writes_all_outputs() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/guilds/9/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "10", "name": "general", "type": 0},
            {"id": "11", "name": "voice-chat", "type": 2}
        ])))
        .mount(&server)
        .await;

    // Five messages: three human before genesis, one bot before genesis,
    // one human after genesis
    Mock::given(method("GET"))
        .and(path("/channels/10/messages"))
        .and(query_param("before", "496"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/channels/10/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            message_json("500", "alice", false, "2021-07-01T00:00:00+00:00", "too late"),
            message_json("499", "helper", true, "2021-05-04T00:00:00+00:00", "beep boop"),
            message_json("498", "alice", false, "2021-05-03T00:00:00+00:00", "one two three"),
            message_json("497", "alice", false, "2021-05-02T00:00:00+00:00", "a  b"),
            message_json("496", "bob", false, "2021-05-01T00:00:00+00:00", "hi"),
        ])))
        .with_priority(5)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    let summary = run_archive(config, RunOptions::default()).await.unwrap();

    // Voice channel filtered out; one channel crawled in two page requests
    assert_eq!(summary.channels, 1);
    assert_eq!(summary.messages, 5);
    assert_eq!(summary.genesis_messages, 3);
    assert_eq!(summary.users, 2);
    assert_eq!(summary.requests, 3);
    assert_eq!(summary.errors, 0);
    assert!(summary.truncated_channels.is_empty());

    for file in [
        "all-messages.json",
        "messages.csv",
        "genesis-messages.json",
        "user-stats.json",
        "user-stats.csv",
    ] {
        assert!(dir.path().join(file).exists(), "missing {}", file);
    }

    let stats: BTreeMap<String, UserStats> = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("user-stats.json")).unwrap(),
    )
    .unwrap();

    let alice = &stats["alice"];
    // "one two three" = 3 words, "a  b" = 3 words under the split rule
    assert_eq!(alice.message_count, 2);
    assert_eq!(alice.total_word_count, 6);
    assert_eq!(alice.average_word_count, 3);

    let bob = &stats["bob"];
    assert_eq!(bob.message_count, 1);
    assert_eq!(bob.average_word_count, 1);

    // The bot author never reaches the statistics
    assert!(!stats.contains_key("helper"));

    let genesis: Vec<ReducedMessage> = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("genesis-messages.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(genesis.len(), 3);
    assert!(genesis.iter().all(|m| !m.bot));
}

#[tokio::test]
async fn test_single_channel_run() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/channels/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": "10", "name": "general", "type": 0}
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/channels/10/messages"))
        .and(query_param("before", "496"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/channels/10/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            message_json("496", "bob", false, "2021-05-01T00:00:00+00:00", "hi"),
        ])))
        .with_priority(5)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    let options = RunOptions {
        channel: Some("10".to_string()),
        skip_fetch: false,
    };
    let summary = run_archive(config, options).await.unwrap();

    assert_eq!(summary.channels, 1);
    assert_eq!(summary.messages, 1);
}

#[tokio::test]
async fn test_unavailable_channel_is_an_error() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/channels/10"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    let options = RunOptions {
        channel: Some("10".to_string()),
        skip_fetch: false,
    };

    assert!(run_archive(config, options).await.is_err());
}

#[tokio::test]
async fn test_skip_fetch_reuses_previous_dump() {
    let dir = tempdir().unwrap();

    let dump = vec![
        ReducedMessage {
            username: "alice".to_string(),
            bot: false,
            timestamp: "2021-05-01T00:00:00+00:00".to_string(),
            content: "hello world".to_string(),
            word_count: 2,
        },
        ReducedMessage {
            username: "alice".to_string(),
            bot: false,
            timestamp: "2021-07-01T00:00:00+00:00".to_string(),
            content: "after genesis".to_string(),
            word_count: 2,
        },
    ];
    write_json(&dir.path().join("all-messages.json"), &dump).unwrap();

    // No mock server: skip-fetch must not touch the network
    let config = test_config("http://127.0.0.1:9", dir.path());
    let options = RunOptions {
        channel: None,
        skip_fetch: true,
    };
    let summary = run_archive(config, options).await.unwrap();

    assert_eq!(summary.messages, 2);
    assert_eq!(summary.genesis_messages, 1);
    assert_eq!(summary.users, 1);
    assert_eq!(summary.requests, 0);

    assert!(dir.path().join("user-stats.json").exists());
    assert!(dir.path().join("user-stats.csv").exists());
}

#[tokio::test]
async fn test_run_with_truncated_channel_still_writes_outputs() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/guilds/9/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "10", "name": "general", "type": 0}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/channels/10/messages"))
        .and(query_param("before", "496"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/channels/10/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            message_json("496", "bob", false, "2021-05-01T00:00:00+00:00", "hi"),
        ])))
        .with_priority(5)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), dir.path());
    let summary = run_archive(config, RunOptions::default()).await.unwrap();

    // The failing page truncated the channel but the run completed and
    // wrote everything it had
    assert_eq!(summary.messages, 1);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.truncated_channels, vec!["10".to_string()]);
    assert!(dir.path().join("all-messages.json").exists());
    assert!(dir.path().join("user-stats.csv").exists());
}
