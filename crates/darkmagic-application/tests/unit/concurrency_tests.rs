//! Concurrency tests: completion order, shared producers, parallel injection

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use darkmagic_domain::value_objects::{Arguments, Callable, Value};

use crate::test_utils::{MapLoader, counter, injector};

fn sleeper(name: &'static str, millis: u64, finished: Arc<Mutex<Vec<&'static str>>>) -> Callable {
    Callable::future(name, Vec::<String>::new(), move |_| {
        let finished = Arc::clone(&finished);
        async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            finished.lock().unwrap().push(name);
            Ok(Some(Value::new(name)))
        }
    })
}

#[tokio::test]
async fn test_order_survives_reversed_completion() {
    let finished = Arc::new(Mutex::new(Vec::new()));
    let loader = MapLoader::new()
        .local("slow", sleeper("slow", 40, Arc::clone(&finished)))
        .local("fast", sleeper("fast", 1, Arc::clone(&finished)));
    let injector = injector(&loader);

    let target = Callable::returning("main", ["slow", "fast"], |args: Arguments| {
        let order: Vec<&'static str> = args
            .iter()
            .map(|(_, value)| *value.and_then(|v| v.downcast_ref::<&'static str>()).unwrap())
            .collect();
        Ok(Some(Value::new(order)))
    });

    let order = injector.inject(target).await.unwrap().unwrap();
    assert_eq!(
        order.downcast_ref::<Vec<&'static str>>().unwrap(),
        &["slow", "fast"]
    );
    assert_eq!(*finished.lock().unwrap(), ["fast", "slow"]);
}

#[tokio::test]
async fn test_diamond_produces_shared_input_once() {
    let invocations = counter();
    let seen = Arc::clone(&invocations);
    let loader = MapLoader::new()
        .local(
            "shared",
            Callable::future("shared", Vec::<String>::new(), move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                async {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Ok(Some(Value::new(String::from("pool"))))
                }
            }),
        )
        .local(
            "left",
            Callable::returning("left", ["shared"], |args: Arguments| Ok(args.value(0).cloned())),
        )
        .local(
            "right",
            Callable::returning("right", ["shared"], |args: Arguments| Ok(args.value(0).cloned())),
        );
    let injector = injector(&loader);

    let same = injector
        .inject(Callable::returning("main", ["left", "right"], |args: Arguments| {
            let left = args.value(0).unwrap();
            let right = args.value(1).unwrap();
            Ok(Some(Value::new(left.ptr_eq(right))))
        }))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(same.downcast_ref::<bool>(), Some(&true));
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_injections_share_one_production() {
    let invocations = counter();
    let seen = Arc::clone(&invocations);
    let loader = MapLoader::new().local(
        "pool",
        Callable::future("pool", Vec::<String>::new(), move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(Some(Value::new(vec![1u8, 2, 3])))
            }
        }),
    );
    let injector = injector(&loader);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let injector = injector.clone();
            tokio::spawn(async move {
                injector
                    .inject(Callable::returning("main", ["pool"], |args: Arguments| {
                        Ok(args.value(0).cloned())
                    }))
                    .await
            })
        })
        .collect();

    let mut pools = Vec::new();
    for handle in handles {
        pools.push(handle.await.unwrap().unwrap().unwrap());
    }

    assert_eq!(invocations.load(Ordering::SeqCst), 1);
    assert!(pools.iter().all(|pool| pool.ptr_eq(&pools[0])));
}

#[tokio::test]
async fn test_cycle_between_siblings_does_not_hang() {
    let loader = MapLoader::new()
        .local("x", Callable::returning("x", ["y"], |_| Ok(Some(Value::new(1u8)))))
        .local("y", Callable::returning("y", ["x"], |_| Ok(Some(Value::new(2u8)))));
    let injector = injector(&loader);

    let outcome = tokio::time::timeout(
        Duration::from_secs(2),
        injector.inject(Callable::returning("main", ["x", "y"], |_| Ok(None))),
    )
    .await
    .expect("resolution hung");

    assert!(outcome.unwrap_err().is_circular());
}
