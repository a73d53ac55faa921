//! Auto-injection policy, naming conventions and overrides

use std::sync::atomic::Ordering;
use std::sync::Arc;

use darkmagic_application::Injector;
use darkmagic_domain::error::Error;
use darkmagic_domain::value_objects::{Arguments, Callable, Classification, Origin, Value};

use crate::test_utils::{MapLoader, counter, injector};

fn counting(name: &str, invocations: &Arc<std::sync::atomic::AtomicUsize>) -> Callable {
    let seen = Arc::clone(invocations);
    Callable::returning(name, Vec::<String>::new(), move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Value::new(String::from("produced"))))
    })
}

fn handed_over(dependency: &'static str) -> Callable {
    Callable::returning("main", [dependency], move |args: Arguments| {
        let callable = args.get::<Callable>(dependency)?;
        Ok(Some(Value::new(callable.name().to_string())))
    })
}

fn produced(dependency: &'static str) -> Callable {
    Callable::returning("main", [dependency], |args: Arguments| Ok(args.value(0).cloned()))
}

#[tokio::test]
async fn test_external_producers_are_handed_over_by_default() {
    let invocations = counter();
    let loader = MapLoader::new().external("uuid", counting("uuid", &invocations));
    let injector = injector(&loader);

    let name = injector.inject(handed_over("uuid")).await.unwrap().unwrap();

    assert_eq!(name.downcast_ref::<String>().unwrap(), "uuid");
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
    let descriptor = injector.get_dependency("uuid").unwrap();
    assert_eq!(descriptor.origin(), Origin::External);
    assert!(!descriptor.is_injectable());
}

#[tokio::test]
async fn test_external_producers_run_when_enabled() {
    let invocations = counter();
    let loader = MapLoader::new().external("uuid", counting("uuid", &invocations));
    let injector = Injector::builder(loader.clone())
        .auto_inject_external_factories(true)
        .build()
        .unwrap();

    let value = injector.inject(produced("uuid")).await.unwrap().unwrap();

    assert_eq!(value.downcast_ref::<String>().unwrap(), "produced");
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_local_producers_can_be_disabled() {
    let invocations = counter();
    let loader = MapLoader::new().local("db", counting("db", &invocations));
    let injector = Injector::builder(loader.clone())
        .auto_inject_local_factories(false)
        .build()
        .unwrap();

    injector.inject(handed_over("db")).await.unwrap();
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_classes_are_never_invoked() {
    let invocations = counter();
    let loader = MapLoader::new()
        .local("Widget", counting("Widget", &invocations))
        .local("helper", counting("$helper", &invocations));
    let injector = injector(&loader);

    let widget = injector.inject(handed_over("Widget")).await.unwrap().unwrap();
    let helper = injector.inject(handed_over("helper")).await.unwrap().unwrap();

    assert_eq!(widget.downcast_ref::<String>().unwrap(), "Widget");
    assert_eq!(helper.downcast_ref::<String>().unwrap(), "$helper");
    assert_eq!(invocations.load(Ordering::SeqCst), 0);
    assert_eq!(
        injector.get_dependency("Widget").unwrap().classification(),
        Classification::Class
    );
}

#[tokio::test]
async fn test_explicit_tag_beats_naming() {
    let invocations = counter();
    let loader = MapLoader::new().local(
        "Widget",
        counting("Widget", &invocations).with_classification(Classification::Producer),
    );
    let injector = injector(&loader);

    injector.inject(produced("Widget")).await.unwrap();
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_force_marker_ignores_policy() {
    let invocations = counter();
    let loader = MapLoader::new().external("widget", counting("inject_widget", &invocations));
    let injector = Injector::builder(loader.clone())
        .auto_inject_local_factories(false)
        .auto_inject_external_factories(false)
        .build()
        .unwrap();

    let value = injector.inject(produced("widget")).await.unwrap().unwrap();

    assert_eq!(value.downcast_ref::<String>().unwrap(), "produced");
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_override_value_skips_loader() {
    let loader = MapLoader::new().local("port", Value::new(80u16));
    let injector = Injector::builder(loader.clone())
        .override_artifact("port", Value::new(9090u16))
        .build()
        .unwrap();

    let port = injector.inject(produced("port")).await.unwrap().unwrap();

    assert_eq!(port.downcast_ref::<u16>(), Some(&9090));
    assert_eq!(loader.loads(), 0);
    assert_eq!(injector.get_dependency("port").unwrap().origin(), Origin::Explicit);
}

#[tokio::test]
async fn test_override_locator_fetches_instead_of_searching() {
    let loader = MapLoader::new().local("database", Value::new(String::from("sqlite")));
    let injector = Injector::builder(loader.clone())
        .override_locator("db", "lib/database")
        .build()
        .unwrap();

    let db = injector.inject(produced("db")).await.unwrap().unwrap();

    assert_eq!(db.downcast_ref::<String>().unwrap(), "sqlite");
    assert_eq!(loader.loads(), 0);
    assert_eq!(loader.fetches(), 1);
}

#[test]
fn test_illegal_override_name_is_rejected() {
    let err = Injector::builder(MapLoader::new())
        .override_artifact("../secrets", Value::new(1u8))
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::IllegalParameterName { .. }));
}
