//! Callable construction tests

use darkmagic_domain::constants::CONTINUATION_PARAM;
use darkmagic_domain::value_objects::{Arguments, Body, Callable, Classification, Continuation};

#[test]
fn test_deferred_appends_continuation_once() {
    let appended = Callable::deferred("db", ["config"], |_, done: Continuation| done.resolve_empty());
    let explicit = Callable::deferred("db", ["config", CONTINUATION_PARAM], |_, done: Continuation| {
        done.resolve_empty()
    });

    assert_eq!(appended.parameters(), ["config", CONTINUATION_PARAM]);
    assert_eq!(explicit.parameters(), ["config", CONTINUATION_PARAM]);
    assert!(matches!(appended.body(), Body::Deferred(_)));
}

#[test]
fn test_explicit_classification() {
    let callable = Callable::returning("factory", ["a"], |_| Ok(None))
        .with_classification(Classification::Class);
    assert_eq!(callable.classification(), Some(Classification::Class));
    assert_eq!(callable.body().kind(), "returning");
}

#[tokio::test]
async fn test_continuation_delivers_outcome() {
    let (done, receiver) = Continuation::channel("db");
    assert_eq!(done.producer(), "db");

    std::thread::spawn(move || done.resolve(5i32));

    let value = receiver.await.unwrap().unwrap().unwrap();
    assert_eq!(value.downcast_ref::<i32>(), Some(&5));
}

#[tokio::test]
async fn test_future_body_runs() {
    let callable = Callable::future("answer", Vec::<String>::new(), |_| async {
        Ok(Some(darkmagic_domain::Value::new(42u32)))
    });

    let Body::Future(body) = callable.body() else {
        panic!("expected future body");
    };
    let value = body(Arguments::empty("answer")).await.unwrap().unwrap();
    assert_eq!(value.downcast_ref::<u32>(), Some(&42));
}
