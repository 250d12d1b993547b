//! External LLM provider streaming implementations.
//!
//! Each provider streams tokens via SSE from its API. OpenAI and Groq share
//! the chat-completions format; Anthropic uses the Messages API.

use std::pin::Pin;

use futures::Stream;
use lexbrief_core::{Error, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tokio_stream::StreamExt;
use tracing::{debug, error, warn};

use crate::types::{ChatMessage, LLMProvider, ResolvedProvider};

/// Boxed stream type for returning different stream implementations.
pub type BoxedStream = Pin<Box<dyn Stream<Item = StreamChunk> + Send>>;

/// A single streamed token or error.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamChunk {
    Token(String),
    Done { tokens_used: usize },
    Error(String),
}

/// What one SSE `data:` payload means for the stream.
#[derive(Debug, PartialEq)]
enum SseEvent {
    Token(String),
    Done,
    Error(String),
    Ignore,
}

/// Stream tokens from the resolved provider.
pub fn stream_llm(
    client: &Client,
    target: &ResolvedProvider,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: usize,
) -> BoxedStream {
    let request = match target.provider {
        LLMProvider::OpenAI | LLMProvider::Groq => client
            .post(&target.url)
            .header("Authorization", format!("Bearer {}", target.api_key))
            .json(&openai_body(&messages, &target.model, temperature, max_tokens)),
        LLMProvider::Anthropic => client
            .post(&target.url)
            .header("x-api-key", &target.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&anthropic_body(&messages, &target.model, temperature, max_tokens)),
    };
    let parse: fn(&str) -> SseEvent = match target.provider {
        LLMProvider::OpenAI | LLMProvider::Groq => parse_openai_data,
        LLMProvider::Anthropic => parse_anthropic_data,
    };

    let provider = target.provider;
    debug!("Streaming from {} with model {}", target.url, target.model);

    Box::pin(async_stream::stream! {
        let response = match request.header("Content-Type", "application/json").send().await {
            Ok(r) => r,
            Err(e) => {
                yield StreamChunk::Error(format!("Request failed: {}", e));
                return;
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            yield StreamChunk::Error(format!("API error {}: {}", status, body));
            return;
        }

        let mut stream = response.bytes_stream();
        // Raw bytes: a UTF-8 sequence may straddle two network chunks
        let mut buffer: Vec<u8> = Vec::new();
        let mut token_count = 0usize;
        let mut body_done = false;

        while !body_done {
            match stream.next().await {
                Some(Ok(bytes)) => buffer.extend_from_slice(&bytes),
                Some(Err(e)) => {
                    yield StreamChunk::Error(format!("Stream read error: {}", e));
                    return;
                }
                None => {
                    // Flush a final line sent without a trailing newline
                    body_done = true;
                    buffer.push(b'\n');
                }
            }

            for data in drain_data_lines(&mut buffer) {
                match parse(&data) {
                    SseEvent::Token(text) => {
                        token_count += 1;
                        yield StreamChunk::Token(text);
                    }
                    SseEvent::Done => {
                        yield StreamChunk::Done { tokens_used: token_count };
                        return;
                    }
                    SseEvent::Error(msg) => {
                        error!("{} stream error: {}", provider, msg);
                        yield StreamChunk::Error(msg);
                        return;
                    }
                    SseEvent::Ignore => {}
                }
            }
        }

        warn!("{} stream ended after {} tokens without a completion event", provider, token_count);
        yield StreamChunk::Error("stream ended before completion".into());
    })
}

/// Collect a full completion from the provider stream.
pub async fn complete(
    client: &Client,
    target: &ResolvedProvider,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: usize,
) -> Result<String> {
    let mut stream = stream_llm(client, target, messages, temperature, max_tokens);
    let mut output = String::new();

    while let Some(chunk) = stream.next().await {
        match chunk {
            StreamChunk::Token(text) => output.push_str(&text),
            StreamChunk::Done { tokens_used } => {
                debug!("{} returned {} tokens", target.provider, tokens_used);
                break;
            }
            StreamChunk::Error(e) => return Err(Error::Llm(e)),
        }
    }

    if output.trim().is_empty() {
        return Err(Error::Llm("Provider returned an empty completion".into()));
    }
    Ok(output)
}

fn openai_body(messages: &[ChatMessage], model: &str, temperature: f64, max_tokens: usize) -> Value {
    let msgs: Vec<Value> = messages
        .iter()
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();
    json!({
        "model": model,
        "messages": msgs,
        "temperature": temperature,
        "max_tokens": max_tokens,
        "stream": true,
    })
}

fn anthropic_body(messages: &[ChatMessage], model: &str, temperature: f64, max_tokens: usize) -> Value {
    // Anthropic takes the system prompt as a top-level field
    let system: Option<&str> = messages
        .iter()
        .find(|m| m.role == "system")
        .map(|m| m.content.as_str());
    let conv: Vec<Value> = messages
        .iter()
        .filter(|m| m.role != "system")
        .map(|m| json!({"role": m.role, "content": m.content}))
        .collect();

    let mut body = json!({
        "model": model,
        "messages": conv,
        "temperature": temperature,
        "max_tokens": max_tokens,
        "stream": true,
    });
    if let Some(sys) = system {
        body["system"] = json!(sys);
    }
    body
}

/// Remove complete lines from `buffer`, returning the `data:` payloads.
/// A trailing partial line stays in the buffer undecoded.
fn drain_data_lines(buffer: &mut Vec<u8>) -> Vec<String> {
    let mut payloads = Vec::new();
    while let Some(line_end) = buffer.iter().position(|b| *b == b'\n') {
        let raw: Vec<u8> = buffer.drain(..=line_end).collect();
        let line = String::from_utf8_lossy(&raw);
        let line = line.trim();
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        // Anthropic also sends "event: " lines; the data line carries the type
        if let Some(data) = line.strip_prefix("data:") {
            payloads.push(data.trim_start().to_string());
        }
    }
    payloads
}

fn parse_openai_data(data: &str) -> SseEvent {
    if data.trim() == "[DONE]" {
        return SseEvent::Done;
    }
    let Ok(parsed) = serde_json::from_str::<Value>(data) else {
        return SseEvent::Ignore;
    };
    if let Some(msg) = parsed["error"]["message"].as_str() {
        return SseEvent::Error(msg.to_string());
    }
    match parsed["choices"][0]["delta"]["content"].as_str() {
        Some(content) if !content.is_empty() => SseEvent::Token(content.to_string()),
        _ => SseEvent::Ignore,
    }
}

fn parse_anthropic_data(data: &str) -> SseEvent {
    let Ok(parsed) = serde_json::from_str::<Value>(data) else {
        return SseEvent::Ignore;
    };
    match parsed["type"].as_str() {
        Some("content_block_delta") => match parsed["delta"]["text"].as_str() {
            Some(text) if !text.is_empty() => SseEvent::Token(text.to_string()),
            _ => SseEvent::Ignore,
        },
        Some("message_stop") => SseEvent::Done,
        Some("error") => SseEvent::Error(
            parsed["error"]["message"]
                .as_str()
                .unwrap_or("Unknown error")
                .to_string(),
        ),
        _ => SseEvent::Ignore,
    }
}
