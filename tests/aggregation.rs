//! Aggregation scenarios against mock word providers.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use insult_service::aggregation::InsultService;
use insult_service::messaging::LogPublisher;
use insult_service::resilience::BreakerState;

mod common;

fn service(config: &insult_service::ServiceConfig) -> InsultService {
    InsultService::from_config(config, Arc::new(LogPublisher)).unwrap()
}

#[tokio::test]
async fn healthy_dependencies_compose_the_full_insult() {
    let noun_addr: SocketAddr = "127.0.0.1:29101".parse().unwrap();
    let adj_addr: SocketAddr = "127.0.0.1:29102".parse().unwrap();
    common::start_word_backend(noun_addr, r#"{"noun":"noun"}"#).await;
    common::start_word_backend(adj_addr, r#"{"adj":"adjective"}"#).await;
    common::settle().await;

    let service = service(&common::test_config(noun_addr, adj_addr));
    let insult = service.aggregate().await.unwrap();

    assert_eq!(insult.noun, "noun");
    assert_eq!(insult.adj1, "adjective");
    assert_eq!(insult.adj2, "adjective");
}

#[tokio::test]
async fn failing_dependencies_substitute_failure_sentinels() {
    let noun_addr: SocketAddr = "127.0.0.1:29111".parse().unwrap();
    let adj_addr: SocketAddr = "127.0.0.1:29112".parse().unwrap();
    common::start_programmable_backend(noun_addr, || async {
        (500, r#"{"error":"boom"}"#.to_string())
    })
    .await;
    common::start_programmable_backend(adj_addr, || async {
        (503, r#"{"error":"down"}"#.to_string())
    })
    .await;
    common::settle().await;

    let service = service(&common::test_config(noun_addr, adj_addr));
    // Dependency failure must not fail the aggregate.
    let insult = service.aggregate().await.unwrap();

    assert_eq!(insult.noun, "[failure]");
    assert_eq!(insult.adj1, "[failure]");
    assert_eq!(insult.adj2, "[failure]");
}

#[tokio::test]
async fn slow_noun_degrades_only_the_noun() {
    let noun_addr: SocketAddr = "127.0.0.1:29121".parse().unwrap();
    let adj_addr: SocketAddr = "127.0.0.1:29122".parse().unwrap();
    // Past the 250ms breaker deadline but within the transport budget.
    common::start_programmable_backend(noun_addr, || async {
        tokio::time::sleep(Duration::from_millis(400)).await;
        (200, r#"{"noun":"noun"}"#.to_string())
    })
    .await;
    common::start_word_backend(adj_addr, r#"{"adj":"adjective"}"#).await;
    common::settle().await;

    let service = service(&common::test_config(noun_addr, adj_addr));
    let insult = service.aggregate().await.unwrap();

    assert_eq!(insult.noun, "[failure]");
    assert_eq!(insult.adj1, "adjective");
    assert_eq!(insult.adj2, "adjective");
}

#[tokio::test]
async fn unreachable_dependencies_still_resolve_with_sentinels() {
    // Nothing listens on either port: connection refused on every call.
    let noun_addr: SocketAddr = "127.0.0.1:29131".parse().unwrap();
    let adj_addr: SocketAddr = "127.0.0.1:29132".parse().unwrap();

    let service = service(&common::test_config(noun_addr, adj_addr));
    let insult = service.aggregate().await.unwrap();

    assert_eq!(insult.noun, "[failure]");
    assert_eq!(insult.adj1, "[failure]");
    assert_eq!(insult.adj2, "[failure]");
}

#[tokio::test]
async fn repeated_failures_open_the_circuits_and_stop_calling_upstream() {
    let noun_addr: SocketAddr = "127.0.0.1:29141".parse().unwrap();
    let adj_addr: SocketAddr = "127.0.0.1:29142".parse().unwrap();

    let noun_calls = Arc::new(AtomicU32::new(0));
    let nc = noun_calls.clone();
    common::start_programmable_backend(noun_addr, move || {
        let nc = nc.clone();
        async move {
            nc.fetch_add(1, Ordering::SeqCst);
            (500, "noun down".to_string())
        }
    })
    .await;

    let adj_calls = Arc::new(AtomicU32::new(0));
    let ac = adj_calls.clone();
    common::start_programmable_backend(adj_addr, move || {
        let ac = ac.clone();
        async move {
            ac.fetch_add(1, Ordering::SeqCst);
            (500, "adj down".to_string())
        }
    })
    .await;
    common::settle().await;

    let mut config = common::test_config(noun_addr, adj_addr);
    // Long reset so the circuits stay open for the whole test.
    config.breaker.reset_timeout_ms = 60_000;
    let service = service(&config);

    // Three aggregations: nine upstream failures, enough to open both circuits
    // (the two adjective calls share one breaker and one failure counter).
    for _ in 0..3 {
        let insult = service.aggregate().await.unwrap();
        assert!(insult.noun == "[failure]" || insult.noun == "[open]");
    }

    assert_eq!(service.noun_breaker().state().await, BreakerState::Open);
    assert_eq!(service.adj_breaker().state().await, BreakerState::Open);

    let noun_calls_when_open = noun_calls.load(Ordering::SeqCst);
    let adj_calls_when_open = adj_calls.load(Ordering::SeqCst);

    // Open circuits short-circuit to the open handler; upstream stays quiet.
    let insult = service.aggregate().await.unwrap();
    assert_eq!(insult.noun, "[open]");
    assert_eq!(insult.adj1, "[open]");
    assert_eq!(insult.adj2, "[open]");
    assert_eq!(noun_calls.load(Ordering::SeqCst), noun_calls_when_open);
    assert_eq!(adj_calls.load(Ordering::SeqCst), adj_calls_when_open);
}

#[tokio::test]
async fn recovered_dependency_closes_the_circuit_after_reset_timeout() {
    let noun_addr: SocketAddr = "127.0.0.1:29151".parse().unwrap();
    let adj_addr: SocketAddr = "127.0.0.1:29152".parse().unwrap();

    let healthy = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let h = healthy.clone();
    common::start_programmable_backend(noun_addr, move || {
        let h = h.clone();
        async move {
            if h.load(Ordering::SeqCst) {
                (200, r#"{"noun":"noun"}"#.to_string())
            } else {
                (500, "noun down".to_string())
            }
        }
    })
    .await;
    common::start_word_backend(adj_addr, r#"{"adj":"adjective"}"#).await;
    common::settle().await;

    let service = service(&common::test_config(noun_addr, adj_addr));

    for _ in 0..3 {
        service.aggregate().await.unwrap();
    }
    assert_eq!(service.noun_breaker().state().await, BreakerState::Open);

    // Recover the backend and wait out the 500ms reset window.
    healthy.store(true, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(service.noun_breaker().state().await, BreakerState::HalfOpen);

    let insult = service.aggregate().await.unwrap();
    assert_eq!(insult.noun, "noun");
    assert_eq!(service.noun_breaker().state().await, BreakerState::Closed);
}
