use paramserve::params::ParameterStore;
use std::collections::HashMap;

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_merge_is_idempotent() {
    let batch = params(&[("a", "1"), ("b", "2"), ("important", "on")]);

    let once = ParameterStore::new();
    once.merge(&batch).await;

    let twice = ParameterStore::new();
    twice.merge(&batch).await;
    twice.merge(&batch).await;

    let mut a = once.snapshot().await;
    let mut b = twice.snapshot().await;
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_important_value_validation() {
    let store = ParameterStore::new();
    store.merge(&params(&[("important", "off")])).await;
    store.merge(&params(&[("important", "yes"), ("x", "1")])).await;

    assert_eq!(store.get("important").await.as_deref(), Some("off"));
    assert_eq!(store.get("x").await.as_deref(), Some("1"));
    assert_eq!(store.len().await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_merges_never_tear() {
    let store = ParameterStore::new();

    let writers: Vec<_> = (0..16)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                for round in 0..50 {
                    let value = format!("w{}-r{}", i, round);
                    let own = format!("own{}", i);
                    store
                        .merge(&params(&[("shared", value.as_str()), (own.as_str(), value.as_str())]))
                        .await;
                }
            })
        })
        .collect();

    let reader = {
        let store = store.clone();
        tokio::spawn(async move {
            for _ in 0..200 {
                for (key, value) in store.snapshot().await {
                    assert!(value.starts_with('w'), "torn entry {}={}", key, value);
                }
                tokio::task::yield_now().await;
            }
        })
    };

    for w in writers {
        w.await.unwrap();
    }
    reader.await.unwrap();

    assert_eq!(store.len().await, 17);
    for i in 0..16 {
        assert_eq!(
            store.get(&format!("own{}", i)).await,
            Some(format!("w{}-r49", i))
        );
    }
}

#[tokio::test]
async fn test_concurrent_remove_and_merge() {
    let store = ParameterStore::new();
    store.merge(&params(&[("k", "v")])).await;

    let remover = {
        let store = store.clone();
        tokio::spawn(async move { store.remove("k").await })
    };
    let merger = {
        let store = store.clone();
        tokio::spawn(async move { store.merge(&params(&[("other", "1")])).await })
    };

    remover.await.unwrap();
    merger.await.unwrap();

    assert_eq!(store.get("k").await, None);
    assert_eq!(store.get("other").await.as_deref(), Some("1"));
}
