//! Facade entry point tests

use darkmagic::{Arguments, Callable, Error, Value};

#[tokio::test]
async fn test_inject_nullary_target() {
    let answer = darkmagic::inject(Callable::returning("answer", Vec::<String>::new(), |_| {
        Ok(Some(Value::new(42u32)))
    }))
    .await
    .unwrap()
    .unwrap();

    assert_eq!(answer.downcast_ref::<u32>(), Some(&42));
}

#[tokio::test]
async fn test_inject_reports_missing_inputs() {
    let err = darkmagic::inject(Callable::returning(
        "main",
        ["definitelyNotConfigured"],
        |_: Arguments| Ok(None),
    ))
    .await
    .unwrap_err();

    assert!(matches!(err, Error::MissingDependency { .. }));
}

#[tokio::test]
async fn test_injectors_do_not_share_registries() {
    let first = darkmagic::injector().unwrap();
    let second = darkmagic::injector().unwrap();

    first.add_value("port", Value::new(1u16)).unwrap();

    assert!(first.get_dependency("port").is_some());
    assert!(second.get_dependency("port").is_none());
}
