//! 中继主流程测试：窥探首块、类型闸门、回填首块后按序透传、终止事件唯一。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::classify::DetectedType;
use crate::relay::RelayStatus;
use crate::tests::{
    MockHttpClient, Tail, WAIT, collect_events, data_bytes, png_payload, random_bytes,
};
use crate::{Downldr, RelayError, RelayEvent, TransferOptions, TypeDescriptor};

const URL: &str = "http://mock.local/avatar";

fn only_png() -> TransferOptions {
    TransferOptions::new().filter(|t, _, _| t.mime() == Some("image/png"))
}

fn terminal_count(events: &[RelayEvent]) -> usize {
    events.iter().filter(|e| e.is_terminal()).count()
}

#[tokio::test]
async fn png_is_detected_and_relayed_in_order() {
    let payload = png_payload(10 * 1024);
    let client = MockHttpClient::new(200)
        .header("content-type", "image/png")
        .chunked(&payload, 1024);

    let events = collect_events(Downldr::with_client(client).transfer(URL, only_png())).await;

    match &events[0] {
        RelayEvent::Type(d) => assert_eq!(
            d,
            &TypeDescriptor::new(
                Some("image/png".into()),
                Some("png".into()),
                Some("image/png".into())
            )
        ),
        other => panic!("首个事件应为 Type，得到 {:?}", other),
    }
    assert_eq!(data_bytes(&events), payload);
    assert!(matches!(events.last(), Some(RelayEvent::Complete)));
    assert_eq!(terminal_count(&events), 1);
    assert_eq!(
        events.iter().filter(|e| matches!(e, RelayEvent::Type(_))).count(),
        1
    );
}

#[tokio::test]
async fn first_chunk_is_spliced_back_exactly_once() {
    // 首块很小，之后的块较大：首块必须出现且只出现一次
    let (middle, last) = (random_bytes(4096), random_bytes(17));
    let client = MockHttpClient::new(200)
        .chunk(&b"GIF89a"[..])
        .chunk(middle.clone())
        .chunk(last.clone());

    let events = collect_events(Downldr::with_client(client).transfer(URL, TransferOptions::new())).await;

    let expected = [&b"GIF89a"[..], &middle[..], &last[..]].concat();
    assert_eq!(data_bytes(&events), expected);
    match &events[0] {
        RelayEvent::Type(d) => assert_eq!(d.ext(), Some("gif")),
        other => panic!("首个事件应为 Type，得到 {:?}", other),
    }
}

#[tokio::test]
async fn error_status_is_rejected_without_data() {
    let client = MockHttpClient::new(404)
        .header("content-type", "text/html")
        .chunk(&b"<html>not found</html>"[..]);

    let events =
        collect_events(Downldr::with_client(client.clone()).transfer(URL, TransferOptions::new())).await;

    assert_eq!(events.len(), 1);
    match &events[0] {
        RelayEvent::Error(e @ RelayError::Status { status: 404 }) => {
            assert!(e.to_string().contains("404"));
            assert!(e.is_rejection());
        }
        other => panic!("应以状态码拒绝，得到 {:?}", other),
    }
    assert!(client.body_dropped());
}

#[tokio::test]
async fn ignore_status_relays_error_page() {
    let page = b"<html>not found</html>";
    let client = MockHttpClient::new(404)
        .header("content-type", "text/html")
        .chunk(&page[..]);

    let events = collect_events(
        Downldr::with_client(client).transfer(URL, TransferOptions::new().ignore_status(true)),
    )
    .await;

    match &events[0] {
        RelayEvent::Type(d) => {
            assert_eq!(d.mime(), None);
            assert_eq!(d.resolved(), "text/html");
        }
        other => panic!("首个事件应为 Type，得到 {:?}", other),
    }
    assert_eq!(data_bytes(&events), page);
    assert!(matches!(events.last(), Some(RelayEvent::Complete)));
}

#[tokio::test]
async fn filter_rejects_plain_text() {
    let client = MockHttpClient::new(200)
        .header("content-type", "text/plain")
        .chunk(&b"just some words"[..])
        .chunk(&b" and more words"[..]);

    let options = TransferOptions::new().filter(|t, _, _| t.mime().is_some());
    let events = collect_events(Downldr::with_client(client.clone()).transfer(URL, options)).await;

    assert_eq!(events.len(), 1);
    match &events[0] {
        RelayEvent::Error(e) => {
            let message = e.to_string();
            assert!(message.contains("text/plain"), "{}", message);
            assert!(message.contains("200"), "{}", message);
        }
        other => panic!("应被过滤器拒绝，得到 {:?}", other),
    }
    assert!(client.body_dropped());
}

#[tokio::test]
async fn filter_is_called_once_with_first_chunk() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let (c, s) = (Arc::clone(&calls), Arc::clone(&seen));

    let payload = png_payload(3000);
    let client = MockHttpClient::new(200).chunked(&payload, 1000);
    let options = TransferOptions::new().filter(move |_, chunk, status| {
        c.fetch_add(1, Ordering::SeqCst);
        s.lock().unwrap().extend_from_slice(chunk);
        status == 200
    });

    let events = collect_events(Downldr::with_client(client).transfer(URL, options)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(seen.lock().unwrap().as_slice(), &payload[..1000]);
    assert_eq!(data_bytes(&events), payload);
}

#[tokio::test]
async fn header_type_used_when_signature_unknown() {
    let client = MockHttpClient::new(200)
        .header("content-type", "application/json")
        .chunk(&br#"{"ok":true}"#[..]);

    let events = collect_events(Downldr::with_client(client).transfer(URL, TransferOptions::new())).await;

    match &events[0] {
        RelayEvent::Type(d) => {
            assert!(!d.is_detected());
            assert_eq!(d.ext(), None);
            assert_eq!(d.content_type(), Some("application/json"));
        }
        other => panic!("首个事件应为 Type，得到 {:?}", other),
    }
}

#[tokio::test]
async fn empty_body_yields_type_then_complete() {
    let client = MockHttpClient::new(204).header("content-type", "image/png");

    let events = collect_events(Downldr::with_client(client).transfer(URL, TransferOptions::new())).await;

    assert_eq!(events.len(), 2, "{:?}", events);
    match &events[0] {
        RelayEvent::Type(d) => {
            assert_eq!(d.mime(), None);
            assert_eq!(d.content_type(), Some("image/png"));
        }
        other => panic!("首个事件应为 Type，得到 {:?}", other),
    }
    assert!(matches!(events[1], RelayEvent::Complete));
}

#[tokio::test]
async fn empty_body_still_respects_status() {
    let client = MockHttpClient::new(500);
    let events = collect_events(Downldr::with_client(client).transfer(URL, TransferOptions::new())).await;
    assert!(matches!(
        events.as_slice(),
        [RelayEvent::Error(RelayError::Status { status: 500 })]
    ));
}

#[tokio::test]
async fn empty_chunks_are_skipped() {
    let client = MockHttpClient::new(200)
        .chunk(&PNG_HEAD[..])
        .chunk(Vec::<u8>::new())
        .chunk(&b"tail"[..]);

    let events = collect_events(Downldr::with_client(client).transfer(URL, only_png())).await;

    let data: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, RelayEvent::Data(_)))
        .collect();
    assert_eq!(data.len(), 2);
    assert!(matches!(events.last(), Some(RelayEvent::Complete)));
}

const PNG_HEAD: [u8; 8] = crate::tests::PNG_SIGNATURE;

#[tokio::test]
async fn body_error_mid_relay_is_only_terminal() {
    let payload = png_payload(2048);
    let client = MockHttpClient::new(200)
        .chunked(&payload, 512)
        .tail(Tail::Error);

    let events = collect_events(Downldr::with_client(client).transfer(URL, only_png())).await;

    assert!(matches!(events[0], RelayEvent::Type(_)));
    assert_eq!(data_bytes(&events), payload);
    assert!(matches!(events.last(), Some(RelayEvent::Error(RelayError::Network(_)))));
    assert_eq!(terminal_count(&events), 1);
}

#[tokio::test]
async fn request_error_is_terminal() {
    let client = MockHttpClient::new(200).request_error("connection refused");
    let events = collect_events(Downldr::with_client(client).transfer(URL, TransferOptions::new())).await;

    match events.as_slice() {
        [RelayEvent::Error(e @ RelayError::Network(_))] => {
            assert!(e.to_string().contains("connection refused"));
        }
        other => panic!("应为网络错误，得到 {:?}", other),
    }
}

#[tokio::test]
async fn invalid_url_is_rejected_before_request() {
    let client = MockHttpClient::new(200).chunk(&b"x"[..]);
    let events = collect_events(
        Downldr::with_client(client.clone()).transfer("not a url", TransferOptions::new()),
    )
    .await;

    assert!(matches!(events.as_slice(), [RelayEvent::Error(RelayError::InvalidUrl(_))]));
    assert_eq!(client.requests(), 0);
}

#[tokio::test]
async fn custom_classifier_replaces_signatures() {
    let classifier = |chunk: &[u8]| {
        chunk
            .starts_with(b"DLDR")
            .then(|| DetectedType::new("application/x-downldr", "dldr"))
    };
    let client = MockHttpClient::new(200).chunk(&b"DLDR\x01\x02"[..]);

    let downldr = Downldr::with_client(client).classifier(classifier);
    let descriptor = downldr
        .transfer_as_future(URL, TransferOptions::new())
        .await
        .unwrap();

    assert_eq!(descriptor.mime(), Some("application/x-downldr"));
    assert_eq!(descriptor.ext(), Some("dldr"));
}

#[tokio::test]
async fn status_reaches_completed() {
    let client = MockHttpClient::new(200).chunked(&png_payload(4096), 1024);
    let stream = Downldr::with_client(client).transfer(URL, only_png());
    let controller = stream.controller();

    let events = collect_events(stream).await;

    assert!(matches!(events.last(), Some(RelayEvent::Complete)));
    assert_eq!(controller.status(), RelayStatus::Completed);
    assert_eq!(controller.relayed_bytes(), 4096);
}

#[tokio::test]
async fn subscribed_status_ends_with_terminal() {
    let client = MockHttpClient::new(200).chunked(&png_payload(4096), 256);
    let stream = Downldr::with_client(client).transfer(URL, only_png());

    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    stream
        .controller()
        .subscribe_status(true, move |status| s.lock().unwrap().push(status));

    collect_events(stream).await;

    // 订阅回调在独立任务中执行，等待它收到终止状态
    tokio::time::timeout(WAIT, async {
        while seen.lock().unwrap().last() != Some(&RelayStatus::Completed) {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("订阅未收到终止状态");

    let seen = seen.lock().unwrap();
    let order = |s: &RelayStatus| match s {
        RelayStatus::Pending => 0,
        RelayStatus::Peeking => 1,
        RelayStatus::Deciding => 2,
        RelayStatus::Relaying => 3,
        _ => 4,
    };
    assert!(seen.windows(2).all(|w| order(&w[0]) <= order(&w[1])), "{:?}", seen);
}
